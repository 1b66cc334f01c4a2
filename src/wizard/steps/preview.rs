//! Step 8: preview, document download, and the final completion save.

use std::path::PathBuf;

use crate::types::{Draft, DraftUpdate};

/// Editor state for the preview step. Owns no text fields; its two actions
/// are the binary download and the `is_complete` flag.
pub struct PreviewEditor {
    pub downloading: bool,
    /// Where the last download was written, for the status line.
    pub downloaded_to: Option<PathBuf>,
}

impl PreviewEditor {
    pub fn new() -> Self {
        Self {
            downloading: false,
            downloaded_to: None,
        }
    }

    /// The final save: flips `is_complete` and nothing else.
    pub fn completion_update() -> DraftUpdate {
        DraftUpdate {
            is_complete: Some(true),
            ..DraftUpdate::default()
        }
    }

    /// Output filename for the downloaded document, derived from the draft
    /// title with whitespace collapsed to underscores.
    pub fn download_file_name(draft: &Draft) -> String {
        let title = draft.title.trim();
        let stem: String = if title.is_empty() {
            draft.id.clone()
        } else {
            title.split_whitespace().collect::<Vec<_>>().join("_")
        };
        format!("patent_application_{stem}.docx")
    }

    /// Per-section populated/missing rows for the status panel.
    pub fn completion_rows(draft: &Draft) -> Vec<(&'static str, bool)> {
        vec![
            ("Title", !draft.title.trim().is_empty()),
            ("Background", !draft.background.trim().is_empty()),
            ("Summary", !draft.summary.trim().is_empty()),
            (
                "Detailed Description",
                !draft.detailed_description.trim().is_empty(),
            ),
            ("Claims", !draft.claims.trim().is_empty()),
            ("Abstract", !draft.abstract_text.trim().is_empty()),
        ]
    }
}

impl Default for PreviewEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_update_touches_only_is_complete() {
        let update = PreviewEditor::completion_update();
        let value = serde_json::to_value(&update).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj["is_complete"], true);
    }

    #[test]
    fn download_name_slugs_the_title() {
        let draft = Draft {
            title: "Self Sealing  Valve".to_string(),
            ..Draft::default()
        };
        assert_eq!(
            PreviewEditor::download_file_name(&draft),
            "patent_application_Self_Sealing_Valve.docx"
        );
    }

    #[test]
    fn download_name_falls_back_to_id() {
        let draft = Draft {
            id: "d1".to_string(),
            ..Draft::default()
        };
        assert_eq!(
            PreviewEditor::download_file_name(&draft),
            "patent_application_d1.docx"
        );
    }

    #[test]
    fn completion_rows_reflect_populated_sections() {
        let draft = Draft {
            title: "X".to_string(),
            claims: "1.".to_string(),
            ..Draft::default()
        };
        let rows = PreviewEditor::completion_rows(&draft);
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().any(|(n, ok)| *n == "Title" && *ok));
        assert!(rows.iter().any(|(n, ok)| *n == "Claims" && *ok));
        assert!(rows.iter().any(|(n, ok)| *n == "Summary" && !*ok));
    }
}
