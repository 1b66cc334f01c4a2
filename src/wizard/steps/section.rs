//! Generic editor for the five generatable sections (steps 2-5 and 7).

use crate::types::{Draft, DraftUpdate, Section};
use crate::ui::form_field::FormField;

/// One textarea bound to a single [`Section`], with AI generate and rephrase
/// actions that replace the buffer without saving.
pub struct SectionEditor {
    section: Section,
    pub buffer: FormField,
    /// True while a generate/rephrase call is in flight.
    pub generating: bool,
    /// The backend recorded this section as AI-generated.
    pub ai_generated: bool,
}

impl SectionEditor {
    pub fn seeded(section: Section, draft: &Draft) -> Self {
        let buffer = FormField::area(
            section.display_name(),
            draft.section_text(section),
            placeholder_for(section),
        );
        Self {
            section,
            buffer,
            generating: false,
            ai_generated: draft.is_ai_generated(section),
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Replace the edit buffer with generated or rephrased content. The
    /// draft snapshot is untouched until the user saves explicitly.
    pub fn apply_generated(&mut self, content: &str) {
        self.buffer.set_value(content);
        self.ai_generated = true;
    }

    /// Rephrase needs existing text to work on.
    pub fn can_rephrase(&self) -> bool {
        !self.buffer.is_blank()
    }

    pub fn save_payload(&self) -> DraftUpdate {
        DraftUpdate::section(self.section, self.buffer.value())
    }
}

fn placeholder_for(section: Section) -> &'static str {
    match section {
        Section::Background => {
            "Describe the current state of technology, existing solutions, and their shortcomings..."
        }
        Section::Summary => "Summarize the invention and its advantages...",
        Section::DetailedDescription => {
            "Describe the invention in enough detail for a skilled person to reproduce it..."
        }
        Section::Claims => "1. A device comprising...",
        Section::Abstract => "A single-paragraph overview of the disclosure...",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_content_fills_buffer_only() {
        let draft = Draft::default();
        let mut editor = SectionEditor::seeded(Section::Summary, &draft);
        editor.apply_generated("Generated text");
        assert_eq!(editor.buffer.value(), "Generated text");
        assert!(editor.ai_generated);

        let payload = editor.save_payload();
        assert_eq!(payload.summary.as_deref(), Some("Generated text"));
        assert!(payload.background.is_none());
    }

    #[test]
    fn rephrase_requires_content() {
        let mut editor = SectionEditor::seeded(Section::Background, &Draft::default());
        assert!(!editor.can_rephrase());
        editor.buffer.set_value("prior art exists");
        assert!(editor.can_rephrase());
    }

    #[test]
    fn seeded_from_existing_section_text() {
        let draft = Draft {
            claims: "1. A widget.".to_string(),
            ai_generated_sections: vec!["claims".to_string()],
            ..Draft::default()
        };
        let editor = SectionEditor::seeded(Section::Claims, &draft);
        assert_eq!(editor.buffer.value(), "1. A widget.");
        assert!(editor.ai_generated);
    }
}
