//! The draft record and its partial-update payload.
//!
//! A `Draft` is the patent-specification-in-progress edited across the eight
//! wizard steps. The server copy is always authoritative: the client sends
//! partial updates and replaces its snapshot with whatever comes back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of steps in the drafting wizard.
pub const STEP_COUNT: u8 = 8;

/// A patent draft as returned by the backend.
///
/// Text fields default to empty because the backend omits sections that have
/// never been written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Draft {
    pub id: String,
    pub project_id: String,

    // Step 1: initial questions
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub field_of_invention: String,
    #[serde(default)]
    pub brief_summary: String,
    #[serde(default)]
    pub key_components: String,
    #[serde(default)]
    pub problem_solved: String,

    // Steps 2-5, 7: generatable sections
    #[serde(default)]
    pub background: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub detailed_description: String,
    #[serde(default)]
    pub claims: String,
    #[serde(default, rename = "abstract")]
    pub abstract_text: String,

    #[serde(default = "default_step")]
    pub current_step: u8,
    #[serde(default)]
    pub is_complete: bool,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Section names the backend filled via AI generation.
    #[serde(default)]
    pub ai_generated_sections: Vec<String>,
    /// Ordered history of generation attempts, oldest first.
    #[serde(default)]
    pub generation_history: Vec<GenerationRecord>,
}

fn default_step() -> u8 {
    1
}

impl Draft {
    /// Read the text of a generatable section.
    pub fn section_text(&self, section: Section) -> &str {
        match section {
            Section::Background => &self.background,
            Section::Summary => &self.summary,
            Section::DetailedDescription => &self.detailed_description,
            Section::Claims => &self.claims,
            Section::Abstract => &self.abstract_text,
        }
    }

    /// Whether a section was filled by AI generation rather than typed.
    pub fn is_ai_generated(&self, section: Section) -> bool {
        self.ai_generated_sections
            .iter()
            .any(|s| s == section.as_str())
    }
}

/// One attempt at AI generation for a section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub section: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// The five sections eligible for AI generation and rephrasing.
///
/// Wire names match the backend's URL path segments and the draft's field
/// names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Background,
    Summary,
    DetailedDescription,
    Claims,
    Abstract,
}

impl Section {
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Background => "background",
            Section::Summary => "summary",
            Section::DetailedDescription => "detailed_description",
            Section::Claims => "claims",
            Section::Abstract => "abstract",
        }
    }

    /// Heading used in editor titles and the preview screen.
    pub fn display_name(self) -> &'static str {
        match self {
            Section::Background => "Background",
            Section::Summary => "Summary",
            Section::DetailedDescription => "Detailed Description",
            Section::Claims => "Claims",
            Section::Abstract => "Abstract",
        }
    }

    pub fn all() -> &'static [Section] {
        &[
            Section::Background,
            Section::Summary,
            Section::DetailedDescription,
            Section::Claims,
            Section::Abstract,
        ]
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partial update sent with PATCH. Only set fields appear on the wire, so
/// fields the caller does not own are left untouched server-side.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DraftUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_of_invention: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brief_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_components: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_solved: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claims: Option<String>,
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_step: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_complete: Option<bool>,
}

impl DraftUpdate {
    /// Update carrying only a step change.
    pub fn step(step: u8) -> Self {
        Self {
            current_step: Some(step),
            ..Self::default()
        }
    }

    /// Update carrying only one section's text.
    pub fn section(section: Section, text: impl Into<String>) -> Self {
        let mut update = Self::default();
        let text = text.into();
        match section {
            Section::Background => update.background = Some(text),
            Section::Summary => update.summary = Some(text),
            Section::DetailedDescription => update.detailed_description = Some(text),
            Section::Claims => update.claims = Some(text),
            Section::Abstract => update.abstract_text = Some(text),
        }
        update
    }

    pub fn is_empty(&self) -> bool {
        serde_json::to_value(self)
            .map(|v| v.as_object().map_or(true, serde_json::Map::is_empty))
            .unwrap_or(true)
    }
}

/// Body of POST /drafts/start.
#[derive(Debug, Clone, Serialize)]
pub struct StartDraftRequest {
    pub user_id: String,
    pub project_title: String,
    pub project_description: String,
    pub title: String,
    pub field_of_invention: String,
    pub brief_summary: String,
    pub key_components: String,
    pub problem_solved: String,
}

impl StartDraftRequest {
    /// Request for a brand-new, empty draft owned by `user_id`.
    pub fn blank(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            project_title: "New Patent Project".to_string(),
            project_description: String::new(),
            title: String::new(),
            field_of_invention: String::new(),
            brief_summary: String::new(),
            key_components: String::new(),
            problem_solved: String::new(),
        }
    }
}

/// Identifiers returned by POST /drafts/start.
#[derive(Debug, Clone, Deserialize)]
pub struct StartedDraft {
    pub draft_id: String,
    pub project_id: String,
}

/// Result of a generate or rephrase call.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedSection {
    pub content: String,
    pub section: String,
}
