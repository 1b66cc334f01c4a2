//! Step editors: one transient edit surface per wizard step.
//!
//! All eight steps share the same contract: the editor is seeded from the
//! draft snapshot when the step is entered, holds buffers the user (or the
//! AI actions) mutate freely, and on explicit save emits a [`DraftUpdate`]
//! containing only the fields it owns. Buffers are never authoritative; the
//! snapshot only changes when a save round-trip returns the server's record.

pub mod drawings;
pub mod initial;
pub mod preview;
pub mod section;

pub use drawings::DrawingsEditor;
pub use initial::InitialQuestionsEditor;
pub use preview::PreviewEditor;
pub use section::SectionEditor;

use crate::types::{Draft, DraftUpdate, Section};

/// The editor bound to the active step.
pub enum StepEditor {
    /// Step 1: the five initial-questions fields.
    Initial(InitialQuestionsEditor),
    /// Steps 2-5 and 7: one generatable section each.
    Section(SectionEditor),
    /// Step 6: drawing upload and listing.
    Drawings(DrawingsEditor),
    /// Step 8: preview, download, mark complete.
    Preview(PreviewEditor),
}

/// Section edited by a given step, if any.
pub fn section_for_step(step: u8) -> Option<Section> {
    match step {
        2 => Some(Section::Background),
        3 => Some(Section::Summary),
        4 => Some(Section::DetailedDescription),
        5 => Some(Section::Claims),
        7 => Some(Section::Abstract),
        _ => None,
    }
}

impl StepEditor {
    /// Build the editor for `step`, seeded from the current snapshot.
    pub fn for_step(step: u8, draft: &Draft) -> Self {
        match step {
            1 => StepEditor::Initial(InitialQuestionsEditor::seeded(draft)),
            6 => StepEditor::Drawings(DrawingsEditor::new()),
            8 => StepEditor::Preview(PreviewEditor::new()),
            other => {
                // Steps 2-5 and 7; out-of-range ids never reach here because
                // the controller rejects them.
                let section = section_for_step(other).unwrap_or(Section::Background);
                StepEditor::Section(SectionEditor::seeded(section, draft))
            }
        }
    }

    /// Partial update carrying only this editor's fields.
    ///
    /// Steps 6 and 8 own no text fields; their routine save is an empty
    /// update (a persisted touch, matching the original flow). Step 8's
    /// completion action uses [`PreviewEditor::completion_update`] instead.
    pub fn save_payload(&self) -> DraftUpdate {
        match self {
            StepEditor::Initial(editor) => editor.save_payload(),
            StepEditor::Section(editor) => editor.save_payload(),
            StepEditor::Drawings(_) | StepEditor::Preview(_) => DraftUpdate::default(),
        }
    }

    /// Section this editor can generate/rephrase, if any.
    pub fn section(&self) -> Option<Section> {
        match self {
            StepEditor::Section(editor) => Some(editor.section()),
            _ => None,
        }
    }
}
