//! Step 1: the initial invention questions.

use crate::types::{Draft, DraftUpdate};
use crate::ui::form_field::FormField;

/// Editor for the five step-1 fields. Three of them (title, field of
/// invention, brief summary) gate step-1 completion; all five are owned and
/// saved by this step.
pub struct InitialQuestionsEditor {
    pub fields: Vec<FormField>,
    pub focused: usize,
}

impl InitialQuestionsEditor {
    pub fn seeded(draft: &Draft) -> Self {
        let fields = vec![
            FormField::input(
                "Invention Title",
                &draft.title,
                "A concise, descriptive title for your invention",
            ),
            FormField::input(
                "Field of Invention",
                &draft.field_of_invention,
                "The technical field, e.g. wireless communication",
            ),
            FormField::area(
                "Brief Summary",
                &draft.brief_summary,
                "What does the invention do, in a few sentences?",
            ),
            FormField::area(
                "Key Components",
                &draft.key_components,
                "The main parts or modules that make it work",
            ),
            FormField::area(
                "Problem Solved",
                &draft.problem_solved,
                "What problem does this invention address?",
            ),
        ];
        Self { fields, focused: 0 }
    }

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        self.focused = if self.focused == 0 {
            self.fields.len() - 1
        } else {
            self.focused - 1
        };
    }

    pub fn focused_field_mut(&mut self) -> &mut FormField {
        &mut self.fields[self.focused]
    }

    /// All five owned fields, whether edited or not; the backend only
    /// changes keys present in the payload, so sending the seeded values
    /// back is harmless.
    pub fn save_payload(&self) -> DraftUpdate {
        DraftUpdate {
            title: Some(self.fields[0].value()),
            field_of_invention: Some(self.fields[1].value()),
            brief_summary: Some(self.fields[2].value()),
            key_components: Some(self.fields[3].value()),
            problem_solved: Some(self.fields[4].value()),
            ..DraftUpdate::default()
        }
    }
}
