//! End-to-end wizard flows against an in-memory backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use patdraft::api::{ApiError, DraftApi, DrawingUpload};
use patdraft::types::{
    Draft, DraftUpdate, Drawing, GeneratedSection, Project, Section, StartDraftRequest,
    StartedDraft,
};
use patdraft::wizard::steps::{section_for_step, PreviewEditor, StepEditor};
use patdraft::wizard::{WizardController, WizardPhase};

/// Backend double that applies PATCH payloads field by field, the way the
/// real service does.
struct InMemoryBackend {
    drafts: Mutex<HashMap<String, Draft>>,
    drawings: Mutex<Vec<Drawing>>,
    offline: AtomicBool,
}

impl InMemoryBackend {
    fn new() -> Self {
        Self {
            drafts: Mutex::new(HashMap::new()),
            drawings: Mutex::new(Vec::new()),
            offline: AtomicBool::new(false),
        }
    }

    fn with_draft(draft: Draft) -> Arc<Self> {
        let backend = Self::new();
        backend
            .drafts
            .lock()
            .unwrap()
            .insert(draft.id.clone(), draft);
        Arc::new(backend)
    }

    fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), ApiError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(ApiError::Network("connection refused".to_string()))
        } else {
            Ok(())
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
impl DraftApi for InMemoryBackend {
    async fn start_draft(&self, request: &StartDraftRequest) -> Result<StartedDraft, ApiError> {
        self.check_online()?;
        let draft = Draft {
            id: "draft-new".to_string(),
            project_id: "project-new".to_string(),
            title: request.title.clone(),
            ..Draft::default()
        };
        let started = StartedDraft {
            draft_id: draft.id.clone(),
            project_id: draft.project_id.clone(),
        };
        self.drafts.lock().unwrap().insert(draft.id.clone(), draft);
        Ok(started)
    }

    async fn get_draft(&self, draft_id: &str) -> Result<Draft, ApiError> {
        self.check_online()?;
        self.drafts
            .lock()
            .unwrap()
            .get(draft_id)
            .cloned()
            .ok_or_else(|| ApiError::Server("Draft not found".to_string()))
    }

    async fn update_draft(&self, draft_id: &str, update: &DraftUpdate) -> Result<Draft, ApiError> {
        self.check_online()?;
        let mut drafts = self.drafts.lock().unwrap();
        let draft = drafts
            .get_mut(draft_id)
            .ok_or_else(|| ApiError::Server("Draft not found".to_string()))?;
        Self::merge(draft, update);
        Ok(draft.clone())
    }

    async fn generate_section(
        &self,
        draft_id: &str,
        section: Section,
    ) -> Result<GeneratedSection, ApiError> {
        self.check_online()?;
        let _ = self.get_draft(draft_id).await?;
        Ok(GeneratedSection {
            content: format!("Generated {} text.", section.display_name()),
            section: section.as_str().to_string(),
        })
    }

    async fn rephrase_section(
        &self,
        draft_id: &str,
        section: Section,
        instruction: &str,
    ) -> Result<GeneratedSection, ApiError> {
        self.check_online()?;
        let _ = self.get_draft(draft_id).await?;
        Ok(GeneratedSection {
            content: format!("Rephrased per '{instruction}'."),
            section: section.as_str().to_string(),
        })
    }

    async fn upload_drawing(
        &self,
        draft_id: &str,
        upload: DrawingUpload,
    ) -> Result<Drawing, ApiError> {
        self.check_online()?;
        #[allow(clippy::cast_possible_truncation)]
        let drawing = Drawing {
            id: format!("drawing-{}", self.drawings.lock().unwrap().len() + 1),
            draft_id: draft_id.to_string(),
            filename: format!("stored_{}", upload.file_name),
            original_filename: upload.file_name,
            file_size: upload.bytes.len() as u64,
            mime_type: upload.mime_type,
            description: upload.description.unwrap_or_default(),
            created_at: None,
        };
        self.drawings.lock().unwrap().push(drawing.clone());
        Ok(drawing)
    }

    async fn list_drawings(&self, draft_id: &str) -> Result<Vec<Drawing>, ApiError> {
        self.check_online()?;
        Ok(self
            .drawings
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.draft_id == draft_id)
            .cloned()
            .collect())
    }

    async fn download_document(&self, draft_id: &str) -> Result<Vec<u8>, ApiError> {
        self.check_online()?;
        let draft = self.get_draft(draft_id).await?;
        Ok(format!("DOCX:{}", draft.title).into_bytes())
    }

    async fn list_projects(&self, user_id: &str) -> Result<Vec<Project>, ApiError> {
        self.check_online()?;
        Ok(vec![Project {
            id: "project-new".to_string(),
            user_id: user_id.to_string(),
            title: "New Patent Project".to_string(),
            description: String::new(),
            status: "active".to_string(),
            draft_count: 1,
            created_at: None,
            updated_at: None,
        }])
    }

    async fn list_drafts(&self, project_id: &str) -> Result<Vec<Draft>, ApiError> {
        self.check_online()?;
        Ok(self
            .drafts
            .lock()
            .unwrap()
            .values()
            .filter(|d| d.project_id == project_id)
            .cloned()
            .collect())
    }
}

fn existing_draft() -> Draft {
    Draft {
        id: "d1".to_string(),
        project_id: "p1".to_string(),
        ..Draft::default()
    }
}

#[tokio::test]
async fn new_draft_walks_the_first_three_steps() {
    let backend = Arc::new(InMemoryBackend::new());
    let mut controller = WizardController::new(backend.clone(), "default_user");
    controller.init(None).await;
    assert_eq!(*controller.phase(), WizardPhase::Ready);
    let draft_id = controller.draft().unwrap().id.clone();

    // Step 1: fill the initial questions and save.
    controller
        .update_draft(DraftUpdate {
            title: Some("Self-Sealing Valve".to_string()),
            field_of_invention: Some("Fluid mechanics".to_string()),
            brief_summary: Some("A valve that seals itself.".to_string()),
            ..DraftUpdate::default()
        })
        .await
        .unwrap();
    assert!(controller.step_status(1).completed);

    // Step 2: generate, keep in the buffer, then save explicitly.
    controller.next_step().await;
    assert_eq!(controller.current_step(), 2);
    let section = section_for_step(2).unwrap();
    let content = controller.generate_section(section).await.unwrap();
    assert_eq!(backend.get_draft(&draft_id).await.unwrap().background, "");
    controller
        .update_draft(DraftUpdate::section(section, &content))
        .await
        .unwrap();
    assert_eq!(
        backend.get_draft(&draft_id).await.unwrap().background,
        "Generated Background text."
    );

    // Step 3 rephrase works on saved content too.
    controller.next_step().await;
    let rephrased = controller
        .rephrase_section(Section::Summary, "shorter")
        .await
        .unwrap();
    assert_eq!(rephrased, "Rephrased per 'shorter'.");
}

#[tokio::test]
async fn step_jump_persists_and_survives_reload() {
    let backend = InMemoryBackend::with_draft(existing_draft());
    let mut controller = WizardController::new(backend.clone(), "default_user");
    controller.init(Some("d1")).await;

    controller.go_to_step(2).await;
    assert_eq!(controller.confirmed_step(), Some(2));

    // A second client loading the same draft resumes where the first left
    // off.
    let mut second = WizardController::new(backend, "default_user");
    second.init(Some("d1")).await;
    assert_eq!(second.current_step(), 2);
}

#[tokio::test]
async fn offline_navigation_keeps_local_step_but_not_server_state() {
    let backend = InMemoryBackend::with_draft(existing_draft());
    let mut controller = WizardController::new(backend.clone(), "default_user");
    controller.init(Some("d1")).await;

    backend.set_offline(true);
    controller.go_to_step(3).await;
    assert_eq!(controller.current_step(), 3);
    assert_eq!(controller.confirmed_step(), Some(1));

    // Once the backend is reachable again, the next navigation wins.
    backend.set_offline(false);
    controller.go_to_step(2).await;
    assert_eq!(controller.confirmed_step(), Some(2));
    assert_eq!(backend.get_draft("d1").await.unwrap().current_step, 2);
}

#[tokio::test]
async fn uploaded_drawings_show_up_in_the_step_list() {
    let backend = InMemoryBackend::with_draft(existing_draft());
    let upload = DrawingUpload {
        file_name: "fig1.png".to_string(),
        bytes: vec![0u8; 1024],
        mime_type: "image/png".to_string(),
        description: Some("Fig. 1".to_string()),
    };
    let drawing = backend.upload_drawing("d1", upload).await.unwrap();
    assert_eq!(drawing.original_filename, "fig1.png");
    assert_eq!(drawing.file_size, 1024);

    let listed = backend.list_drawings("d1").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].description, "Fig. 1");
    // Other drafts never see it.
    assert!(backend.list_drawings("other").await.unwrap().is_empty());
}

#[tokio::test]
async fn completion_and_download_round_out_the_flow() {
    let mut draft = existing_draft();
    draft.title = "Widget".to_string();
    let backend = InMemoryBackend::with_draft(draft);
    let mut controller = WizardController::new(backend.clone(), "default_user");
    controller.init(Some("d1")).await;

    controller
        .update_draft(PreviewEditor::completion_update())
        .await
        .unwrap();
    assert!(controller.draft().unwrap().is_complete);

    let bytes = backend.download_document("d1").await.unwrap();
    assert_eq!(bytes, b"DOCX:Widget");
    assert_eq!(
        PreviewEditor::download_file_name(controller.draft().unwrap()),
        "patent_application_Widget.docx"
    );
}

#[tokio::test]
async fn init_failure_reports_and_recovers_on_retry() {
    let backend = InMemoryBackend::with_draft(existing_draft());
    backend.set_offline(true);

    let mut controller = WizardController::new(backend.clone(), "default_user");
    controller.init(Some("d1")).await;
    let WizardPhase::Failed(message) = controller.phase() else {
        panic!("expected failed phase, got {:?}", controller.phase());
    };
    assert!(message.contains("network error"));

    backend.set_offline(false);
    controller.init(Some("d1")).await;
    assert_eq!(*controller.phase(), WizardPhase::Ready);
}

#[tokio::test]
async fn editors_seed_from_the_snapshot_on_entry() {
    let mut draft = existing_draft();
    draft.claims = "1. A widget.".to_string();
    draft.current_step = 5;
    let backend = InMemoryBackend::with_draft(draft);
    let mut controller = WizardController::new(backend, "default_user");
    controller.init(Some("d1")).await;

    let editor = StepEditor::for_step(controller.current_step(), controller.draft().unwrap());
    let StepEditor::Section(section) = editor else {
        panic!("step 5 should use the section editor");
    };
    assert_eq!(section.section(), Section::Claims);
    assert_eq!(section.buffer.value(), "1. A widget.");
}
