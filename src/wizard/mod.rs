//! Wizard controller: owns the draft snapshot and the step state machine.
//!
//! Lifecycle is `Uninitialized -> Loading -> Ready | Failed`. A `Failed`
//! controller is only recoverable by running [`WizardController::init`]
//! again (the full-reload rule); individual operations are never retried.
//!
//! Step navigation is two-phase: `step` is the local intent, applied before
//! the persistence round-trip, and `confirmed_step` is what the backend last
//! acknowledged. Persistence failure leaves the visible step in place; the
//! reconciliation rule is last write wins.

pub mod navigation;
pub mod steps;

use std::sync::Arc;

use crate::api::{ApiError, DraftApi};
use crate::types::draft::STEP_COUNT;
use crate::types::{Draft, DraftUpdate, Section, StartDraftRequest};

use navigation::StepStatus;

/// Lifecycle of the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardPhase {
    Uninitialized,
    Loading,
    Ready,
    /// Initial load or create failed. Carries the banner message.
    Failed(String),
}

/// Single owner of the in-memory draft snapshot.
///
/// Step editors hold transient buffers seeded from this snapshot; nothing
/// they type is authoritative until a save round-trip replaces the snapshot
/// with the server's record. Concurrent saves are not deduplicated: the last
/// response to arrive wins. That can race when two sections are saved in
/// quick succession; accepted limitation, inherited from the wire contract.
pub struct WizardController {
    api: Arc<dyn DraftApi>,
    user_id: String,
    phase: WizardPhase,
    draft: Option<Draft>,
    /// Step currently shown (local intent, set optimistically).
    step: u8,
    /// Step most recently acknowledged by the backend.
    confirmed_step: Option<u8>,
    saving: bool,
}

impl WizardController {
    pub fn new(api: Arc<dyn DraftApi>, user_id: impl Into<String>) -> Self {
        Self {
            api,
            user_id: user_id.into(),
            phase: WizardPhase::Uninitialized,
            draft: None,
            step: 1,
            confirmed_step: None,
            saving: false,
        }
    }

    pub fn phase(&self) -> &WizardPhase {
        &self.phase
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    pub fn current_step(&self) -> u8 {
        self.step
    }

    pub fn confirmed_step(&self) -> Option<u8> {
        self.confirmed_step
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Load an existing draft, or create a project + draft when `draft_id`
    /// is `None`. Entry point for mount and for the full-reload recovery
    /// path.
    pub async fn init(&mut self, draft_id: Option<&str>) {
        self.phase = WizardPhase::Loading;

        let result = match draft_id {
            Some(id) => self.api.get_draft(id).await,
            None => {
                let request = StartDraftRequest::blank(self.user_id.clone());
                match self.api.start_draft(&request).await {
                    // The create response only carries identifiers; fetch
                    // the canonical record before rendering.
                    Ok(started) => self.api.get_draft(&started.draft_id).await,
                    Err(e) => Err(e),
                }
            }
        };

        match result {
            Ok(draft) => {
                self.step = draft.current_step.clamp(1, STEP_COUNT);
                self.confirmed_step = Some(self.step);
                tracing::info!(draft_id = %draft.id, step = self.step, "wizard ready");
                self.draft = Some(draft);
                self.phase = WizardPhase::Ready;
            }
            Err(e) => {
                tracing::error!(error = %e, "wizard initialization failed");
                self.phase = WizardPhase::Failed(e.banner_message());
            }
        }
    }

    /// Jump to `step`. Ignored outside `[1, 8]` or when not ready. The
    /// visible step changes before persistence and is not reverted if the
    /// round-trip fails.
    pub async fn go_to_step(&mut self, step: u8) {
        if !(1..=STEP_COUNT).contains(&step) || self.phase != WizardPhase::Ready {
            return;
        }

        self.step = step;

        let Some(draft_id) = self.draft.as_ref().map(|d| d.id.clone()) else {
            return;
        };

        match self.api.update_draft(&draft_id, &DraftUpdate::step(step)).await {
            Ok(draft) => {
                self.confirmed_step = Some(draft.current_step);
                self.draft = Some(draft);
            }
            Err(e) => {
                // Accepted staleness window: the UI stays on the new step.
                tracing::warn!(error = %e, step, "failed to persist step change");
            }
        }
    }

    /// Advance one step; no-op at step 8.
    pub async fn next_step(&mut self) {
        if self.step < STEP_COUNT {
            self.go_to_step(self.step + 1).await;
        }
    }

    /// Go back one step; no-op at step 1.
    pub async fn prev_step(&mut self) {
        if self.step > 1 {
            self.go_to_step(self.step - 1).await;
        }
    }

    /// Persist a partial update and replace the snapshot with the server's
    /// full record. The client never merges locally.
    pub async fn update_draft(&mut self, update: DraftUpdate) -> Result<(), ApiError> {
        let Some(draft_id) = self.draft.as_ref().map(|d| d.id.clone()) else {
            return Err(ApiError::Validation("no draft loaded".to_string()));
        };

        self.saving = true;
        let result = self.api.update_draft(&draft_id, &update).await;
        self.saving = false;

        match result {
            Ok(draft) => {
                self.confirmed_step = Some(draft.current_step);
                self.draft = Some(draft);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Ask the backend to generate a section. Returns the content for the
    /// caller's edit buffer; the snapshot is untouched until an explicit
    /// save.
    pub async fn generate_section(&self, section: Section) -> Result<String, ApiError> {
        let Some(draft_id) = self.draft.as_ref().map(|d| d.id.clone()) else {
            return Err(ApiError::Validation("no draft loaded".to_string()));
        };
        let generated = self.api.generate_section(&draft_id, section).await?;
        Ok(generated.content)
    }

    /// Ask the backend to rephrase a section with a free-text instruction.
    /// Buffer-only, like generation.
    pub async fn rephrase_section(
        &self,
        section: Section,
        instruction: &str,
    ) -> Result<String, ApiError> {
        let Some(draft_id) = self.draft.as_ref().map(|d| d.id.clone()) else {
            return Err(ApiError::Validation("no draft loaded".to_string()));
        };
        let generated = self
            .api
            .rephrase_section(&draft_id, section, instruction)
            .await?;
        Ok(generated.content)
    }

    /// Derived sidebar state for one step.
    pub fn step_status(&self, step: u8) -> StepStatus {
        match &self.draft {
            Some(draft) => navigation::step_status(step, self.step, draft),
            None => StepStatus {
                completed: false,
                accessible: false,
            },
        }
    }

    pub fn api(&self) -> &Arc<dyn DraftApi> {
        &self.api
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DrawingUpload;
    use crate::types::{Drawing, GeneratedSection, Project, StartedDraft};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory backend that merges PATCH payloads like the real one.
    struct StubBackend {
        draft: Mutex<Draft>,
        fail_updates: bool,
    }

    impl StubBackend {
        fn new(draft: Draft) -> Self {
            Self {
                draft: Mutex::new(draft),
                fail_updates: false,
            }
        }

        fn failing(draft: Draft) -> Self {
            Self {
                draft: Mutex::new(draft),
                fail_updates: true,
            }
        }

        fn merge(draft: &mut Draft, update: &DraftUpdate) {
            let set = |target: &mut String, source: &Option<String>| {
                if let Some(v) = source {
                    target.clone_from(v);
                }
            };
            set(&mut draft.title, &update.title);
            set(&mut draft.field_of_invention, &update.field_of_invention);
            set(&mut draft.brief_summary, &update.brief_summary);
            set(&mut draft.key_components, &update.key_components);
            set(&mut draft.problem_solved, &update.problem_solved);
            set(&mut draft.background, &update.background);
            set(&mut draft.summary, &update.summary);
            set(&mut draft.detailed_description, &update.detailed_description);
            set(&mut draft.claims, &update.claims);
            set(&mut draft.abstract_text, &update.abstract_text);
            if let Some(step) = update.current_step {
                draft.current_step = step;
            }
            if let Some(complete) = update.is_complete {
                draft.is_complete = complete;
            }
        }
    }

    #[async_trait]
    impl DraftApi for StubBackend {
        async fn start_draft(
            &self,
            _request: &StartDraftRequest,
        ) -> Result<StartedDraft, ApiError> {
            let draft = self.draft.lock().unwrap();
            Ok(StartedDraft {
                draft_id: draft.id.clone(),
                project_id: draft.project_id.clone(),
            })
        }

        async fn get_draft(&self, _draft_id: &str) -> Result<Draft, ApiError> {
            Ok(self.draft.lock().unwrap().clone())
        }

        async fn update_draft(
            &self,
            _draft_id: &str,
            update: &DraftUpdate,
        ) -> Result<Draft, ApiError> {
            if self.fail_updates {
                return Err(ApiError::Network("connection refused".to_string()));
            }
            let mut draft = self.draft.lock().unwrap();
            Self::merge(&mut draft, update);
            Ok(draft.clone())
        }

        async fn generate_section(
            &self,
            _draft_id: &str,
            section: Section,
        ) -> Result<GeneratedSection, ApiError> {
            Ok(GeneratedSection {
                content: "Generated text".to_string(),
                section: section.as_str().to_string(),
            })
        }

        async fn rephrase_section(
            &self,
            _draft_id: &str,
            section: Section,
            instruction: &str,
        ) -> Result<GeneratedSection, ApiError> {
            Ok(GeneratedSection {
                content: format!("rephrased ({instruction})"),
                section: section.as_str().to_string(),
            })
        }

        async fn upload_drawing(
            &self,
            _draft_id: &str,
            _upload: DrawingUpload,
        ) -> Result<Drawing, ApiError> {
            Err(ApiError::Validation("not supported in stub".to_string()))
        }

        async fn list_drawings(&self, _draft_id: &str) -> Result<Vec<Drawing>, ApiError> {
            Ok(Vec::new())
        }

        async fn download_document(&self, _draft_id: &str) -> Result<Vec<u8>, ApiError> {
            Ok(Vec::new())
        }

        async fn list_projects(&self, _user_id: &str) -> Result<Vec<Project>, ApiError> {
            Ok(Vec::new())
        }

        async fn list_drafts(&self, _project_id: &str) -> Result<Vec<Draft>, ApiError> {
            Ok(Vec::new())
        }
    }

    fn base_draft() -> Draft {
        Draft {
            id: "d1".to_string(),
            project_id: "p1".to_string(),
            ..Draft::default()
        }
    }

    async fn ready_controller(backend: StubBackend) -> WizardController {
        let mut controller = WizardController::new(Arc::new(backend), "default_user");
        controller.init(Some("d1")).await;
        assert_eq!(*controller.phase(), WizardPhase::Ready);
        controller
    }

    #[tokio::test]
    async fn init_without_id_creates_then_loads() {
        let mut controller =
            WizardController::new(Arc::new(StubBackend::new(base_draft())), "default_user");
        controller.init(None).await;
        assert_eq!(*controller.phase(), WizardPhase::Ready);
        assert_eq!(controller.current_step(), 1);
        assert_eq!(controller.draft().unwrap().id, "d1");
    }

    #[tokio::test]
    async fn init_resumes_at_saved_step() {
        let mut draft = base_draft();
        draft.current_step = 5;
        let mut controller =
            WizardController::new(Arc::new(StubBackend::new(draft)), "default_user");
        controller.init(Some("d1")).await;
        assert_eq!(controller.current_step(), 5);
        assert_eq!(controller.confirmed_step(), Some(5));
    }

    #[tokio::test]
    async fn out_of_range_steps_are_ignored() {
        let mut controller = ready_controller(StubBackend::new(base_draft())).await;
        controller.go_to_step(3).await;
        assert_eq!(controller.current_step(), 3);

        controller.go_to_step(0).await;
        assert_eq!(controller.current_step(), 3);
        controller.go_to_step(9).await;
        assert_eq!(controller.current_step(), 3);
    }

    #[tokio::test]
    async fn next_step_is_noop_at_eight() {
        let mut draft = base_draft();
        draft.current_step = 8;
        let mut controller = ready_controller(StubBackend::new(draft)).await;
        controller.next_step().await;
        assert_eq!(controller.current_step(), 8);
        assert_eq!(controller.confirmed_step(), Some(8));
    }

    #[tokio::test]
    async fn prev_step_is_noop_at_one() {
        let mut controller = ready_controller(StubBackend::new(base_draft())).await;
        controller.prev_step().await;
        assert_eq!(controller.current_step(), 1);
    }

    #[tokio::test]
    async fn failed_persistence_keeps_visible_step() {
        let mut controller = ready_controller(StubBackend::failing(base_draft())).await;
        controller.go_to_step(4).await;
        // Local intent advanced; the backend never confirmed it.
        assert_eq!(controller.current_step(), 4);
        assert_eq!(controller.confirmed_step(), Some(1));
    }

    #[tokio::test]
    async fn partial_update_preserves_absent_fields() {
        let mut draft = base_draft();
        draft.title = "Widget".to_string();
        draft.background = "Prior art".to_string();
        let mut controller = ready_controller(StubBackend::new(draft)).await;

        controller
            .update_draft(DraftUpdate::section(Section::Summary, "An overview"))
            .await
            .unwrap();

        let draft = controller.draft().unwrap();
        assert_eq!(draft.summary, "An overview");
        assert_eq!(draft.title, "Widget");
        assert_eq!(draft.background, "Prior art");
    }

    #[tokio::test]
    async fn step_one_completion_unlocks_step_two() {
        let mut controller = ready_controller(StubBackend::new(base_draft())).await;
        assert!(!controller.step_status(1).completed);

        controller
            .update_draft(DraftUpdate {
                title: Some("X".to_string()),
                field_of_invention: Some("Y".to_string()),
                brief_summary: Some("Z".to_string()),
                ..DraftUpdate::default()
            })
            .await
            .unwrap();

        assert!(controller.step_status(1).completed);
        assert!(controller.step_status(2).accessible);
    }

    #[tokio::test]
    async fn generation_does_not_touch_snapshot() {
        let controller = ready_controller(StubBackend::new(base_draft())).await;
        let content = controller.generate_section(Section::Summary).await.unwrap();
        assert_eq!(content, "Generated text");
        assert_eq!(controller.draft().unwrap().summary, "");
    }

    #[tokio::test]
    async fn update_fails_cleanly_when_backend_down() {
        let mut controller = ready_controller(StubBackend::failing(base_draft())).await;
        let err = controller
            .update_draft(DraftUpdate::section(Section::Claims, "1."))
            .await
            .unwrap_err();
        assert!(err.is_network());
        assert!(!controller.is_saving());
        // Snapshot untouched.
        assert_eq!(controller.draft().unwrap().claims, "");
    }
}
