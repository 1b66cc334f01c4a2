//! Client for the drafting backend's REST API.
//!
//! The backend owns AI generation, DOCX rendering, and file storage; this
//! module only speaks its HTTP surface. Every call is single-attempt,
//! fire-and-report: no retries, no backoff, no configured timeouts.
//!
//! [`DraftApi`] is the seam the wizard controller is written against, so
//! tests can swap in an in-memory backend.

pub mod client;
pub mod error;

pub use client::HttpDraftClient;
pub use error::ApiError;

use async_trait::async_trait;

use crate::types::{
    Draft, DraftUpdate, Drawing, GeneratedSection, Project, Section, StartDraftRequest,
    StartedDraft,
};

/// File contents and metadata for a drawing upload.
#[derive(Debug, Clone)]
pub struct DrawingUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub description: Option<String>,
}

/// Typed operations against the drafting backend.
#[async_trait]
pub trait DraftApi: Send + Sync {
    /// Create a project and an empty draft in one call.
    async fn start_draft(&self, request: &StartDraftRequest) -> Result<StartedDraft, ApiError>;

    async fn get_draft(&self, draft_id: &str) -> Result<Draft, ApiError>;

    /// Partial update. The returned draft is the server's full record and
    /// replaces the caller's snapshot wholesale.
    async fn update_draft(&self, draft_id: &str, update: &DraftUpdate) -> Result<Draft, ApiError>;

    async fn generate_section(
        &self,
        draft_id: &str,
        section: Section,
    ) -> Result<GeneratedSection, ApiError>;

    async fn rephrase_section(
        &self,
        draft_id: &str,
        section: Section,
        instruction: &str,
    ) -> Result<GeneratedSection, ApiError>;

    async fn upload_drawing(
        &self,
        draft_id: &str,
        upload: DrawingUpload,
    ) -> Result<Drawing, ApiError>;

    async fn list_drawings(&self, draft_id: &str) -> Result<Vec<Drawing>, ApiError>;

    /// Rendered document bytes. Bypasses the JSON envelope entirely.
    async fn download_document(&self, draft_id: &str) -> Result<Vec<u8>, ApiError>;

    async fn list_projects(&self, user_id: &str) -> Result<Vec<Project>, ApiError>;

    async fn list_drafts(&self, project_id: &str) -> Result<Vec<Draft>, ApiError>;
}
