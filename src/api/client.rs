//! reqwest implementation of [`DraftApi`].
//!
//! Responses use the backend's uniform envelope `{success, data?, error?,
//! message?}`, except that list endpoints nest their payload under a
//! per-endpoint key (`drawings`, `projects`, `drafts`, `drawing`) and the
//! rephrase endpoint returns `content`/`section` at the top level. The
//! decoder normalizes all of these into `Result<T, ApiError>`.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::error::ApiError;
use super::{DraftApi, DrawingUpload};
use crate::types::{
    Draft, DraftUpdate, Drawing, GeneratedSection, Project, Section, StartDraftRequest,
    StartedDraft,
};

/// HTTP client for the drafting backend.
pub struct HttpDraftClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpDraftClient {
    /// Build a client for `base_url` (e.g. `http://localhost:5000`). The
    /// drafts root (`/drafts`) is appended here.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("patdraft/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            http,
            base_url: format!("{}/drafts", base_url.trim_end_matches('/')),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_enveloped<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &str,
    ) -> Result<T, ApiError> {
        let response = self.http.get(self.url(path)).send().await?;
        decode(response, key).await
    }

    async fn post_enveloped<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        key: &str,
    ) -> Result<T, ApiError> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        decode(response, key).await
    }
}

#[async_trait]
impl DraftApi for HttpDraftClient {
    async fn start_draft(&self, request: &StartDraftRequest) -> Result<StartedDraft, ApiError> {
        self.post_enveloped("/start", request, "data").await
    }

    async fn get_draft(&self, draft_id: &str) -> Result<Draft, ApiError> {
        self.get_enveloped(&format!("/{draft_id}"), "data").await
    }

    async fn update_draft(&self, draft_id: &str, update: &DraftUpdate) -> Result<Draft, ApiError> {
        let response = self
            .http
            .patch(self.url(&format!("/{draft_id}")))
            .json(update)
            .send()
            .await?;
        decode(response, "data").await
    }

    async fn generate_section(
        &self,
        draft_id: &str,
        section: Section,
    ) -> Result<GeneratedSection, ApiError> {
        // Empty object body keeps Content-Type: application/json, which the
        // backend requires even for bodyless generation requests.
        let empty = serde_json::json!({});
        self.post_enveloped(&format!("/{draft_id}/generate/{section}"), &empty, "data")
            .await
    }

    async fn rephrase_section(
        &self,
        draft_id: &str,
        section: Section,
        instruction: &str,
    ) -> Result<GeneratedSection, ApiError> {
        let body = serde_json::json!({ "instruction": instruction });
        let response = self
            .http
            .post(self.url(&format!("/{draft_id}/rephrase/{section}")))
            .json(&body)
            .send()
            .await?;
        // Rephrase puts content/section beside `success` rather than under
        // `data`. Decode the whole body once the envelope checks pass.
        decode_root(response).await
    }

    async fn upload_drawing(
        &self,
        draft_id: &str,
        upload: DrawingUpload,
    ) -> Result<Drawing, ApiError> {
        let part = reqwest::multipart::Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.mime_type)
            .map_err(|e| ApiError::Validation(format!("invalid MIME type: {e}")))?;
        let mut form = reqwest::multipart::Form::new().part("file", part);
        if let Some(description) = upload.description {
            form = form.text("description", description);
        }

        let response = self
            .http
            .post(self.url(&format!("/{draft_id}/upload-drawing")))
            .multipart(form)
            .send()
            .await?;
        decode(response, "drawing").await
    }

    async fn list_drawings(&self, draft_id: &str) -> Result<Vec<Drawing>, ApiError> {
        self.get_enveloped(&format!("/{draft_id}/drawings"), "drawings")
            .await
    }

    async fn download_document(&self, draft_id: &str) -> Result<Vec<u8>, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/{draft_id}/download")))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Failure bodies are the JSON envelope even on this endpoint.
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(ApiError::Server(message));
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn list_projects(&self, user_id: &str) -> Result<Vec<Project>, ApiError> {
        self.get_enveloped(&format!("/projects/{user_id}"), "projects")
            .await
    }

    async fn list_drafts(&self, project_id: &str) -> Result<Vec<Draft>, ApiError> {
        self.get_enveloped(&format!("/projects/{project_id}/drafts"), "drafts")
            .await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response, key: &str) -> Result<T, ApiError> {
    let status = response.status();
    let body = read_body(status, response).await?;
    let body = check_envelope(status.as_u16(), body)?;

    let data = body
        .get(key)
        .cloned()
        .ok_or_else(|| ApiError::Server(format!("response missing `{key}` field")))?;
    serde_json::from_value(data).map_err(|e| ApiError::Server(format!("malformed `{key}`: {e}")))
}

async fn decode_root<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = read_body(status, response).await?;
    let body = check_envelope(status.as_u16(), body)?;
    serde_json::from_value(body).map_err(|e| ApiError::Server(format!("malformed response: {e}")))
}

async fn read_body(
    status: reqwest::StatusCode,
    response: reqwest::Response,
) -> Result<Value, ApiError> {
    match response.json::<Value>().await {
        Ok(value) => Ok(value),
        Err(e) if status.is_success() => Err(ApiError::Server(format!("invalid JSON body: {e}"))),
        Err(_) => Err(ApiError::Server(format!("HTTP {status}"))),
    }
}

/// Apply the uniform envelope rules: failure statuses and `success: false`
/// both become [`ApiError::Server`], preferring the server's `error` string.
fn check_envelope(status: u16, body: Value) -> Result<Value, ApiError> {
    let success = body
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if !(200..300).contains(&status) || !success {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {status}"));
        return Err(ApiError::Server(message));
    }

    Ok(body)
}
