//! Step 6: drawing upload and listing.

use std::path::Path;

use crate::api::{ApiError, DrawingUpload};
use crate::types::Drawing;
use crate::ui::form_field::FormField;

/// Upload size cap, mirroring the backend's limit.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Extensions the backend accepts.
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tiff", "pdf"];

/// Editor state for the drawings step. The list is refreshed every time the
/// step is entered, never carried across steps.
pub struct DrawingsEditor {
    pub path_field: FormField,
    pub description_field: FormField,
    /// 0 = path, 1 = description.
    pub focused: usize,
    pub drawings: Vec<Drawing>,
    pub uploading: bool,
    pub loaded: bool,
}

impl DrawingsEditor {
    pub fn new() -> Self {
        Self {
            path_field: FormField::input(
                "File Path",
                "",
                "Path to a drawing (png, jpg, gif, bmp, tiff, pdf; max 10 MB)",
            ),
            description_field: FormField::input(
                "Description (optional)",
                "",
                "Brief description, e.g. Fig. 1",
            ),
            focused: 0,
            drawings: Vec::new(),
            uploading: false,
            loaded: false,
        }
    }

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % 2;
    }

    pub fn focused_field_mut(&mut self) -> &mut FormField {
        if self.focused == 0 {
            &mut self.path_field
        } else {
            &mut self.description_field
        }
    }

    pub fn set_drawings(&mut self, drawings: Vec<Drawing>) {
        self.drawings = drawings;
        self.loaded = true;
    }

    pub fn push_uploaded(&mut self, drawing: Drawing) {
        self.drawings.push(drawing);
        self.path_field.set_value("");
        self.description_field.set_value("");
    }

    /// Read and validate the selected file, producing the multipart payload.
    /// Validation mirrors the backend's checks so obvious rejects never
    /// leave the client.
    pub fn build_upload(&self) -> Result<DrawingUpload, ApiError> {
        let path_text = self.path_field.value();
        let path_text = path_text.trim();
        if path_text.is_empty() {
            return Err(ApiError::Validation("no file selected".to_string()));
        }

        let path = Path::new(path_text);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| ApiError::Validation("invalid file path".to_string()))?;

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ApiError::Validation(format!(
                "file type not allowed: .{extension}"
            )));
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| ApiError::Validation(format!("cannot read {path_text}: {e}")))?;
        if metadata.len() > MAX_UPLOAD_BYTES {
            return Err(ApiError::Validation("file too large (max 10MB)".to_string()));
        }

        let bytes = std::fs::read(path)
            .map_err(|e| ApiError::Validation(format!("cannot read {path_text}: {e}")))?;

        let description = self.description_field.value();
        Ok(DrawingUpload {
            file_name,
            bytes,
            mime_type: mime_for_extension(&extension).to_string(),
            description: if description.trim().is_empty() {
                None
            } else {
                Some(description)
            },
        })
    }
}

impl Default for DrawingsEditor {
    fn default() -> Self {
        Self::new()
    }
}

fn mime_for_extension(extension: &str) -> &'static str {
    match extension {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tiff" => "image/tiff",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}
