//! Drawing records attached to a draft.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A drawing or figure uploaded for a draft.
///
/// Owned exclusively by its draft. The list is fetched fresh every time the
/// drawings step is entered; it is never cached across steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drawing {
    pub id: String,
    pub draft_id: String,
    /// Storage name assigned by the backend (unique per upload).
    pub filename: String,
    /// Name the file had on the uploader's machine.
    pub original_filename: String,
    pub file_size: u64,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Drawing {
    /// Human-readable size, matching what the sidebar shows.
    pub fn size_display(&self) -> String {
        if self.file_size >= 1024 * 1024 {
            format!("{:.1} MB", self.file_size as f64 / (1024.0 * 1024.0))
        } else {
            format!("{:.1} KB", self.file_size as f64 / 1024.0)
        }
    }
}
