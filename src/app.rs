//! TUI application: the event loop and keyboard routing.
//!
//! One loop serves both screens. Every API round-trip happens inline in the
//! key handler; the next draw reflects whatever state it left behind.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;

use crate::api::{DraftApi, HttpDraftClient};
use crate::config::Config;
use crate::types::Draft;
use crate::ui::wizard_view;
use crate::ui::{
    install_panic_hook, LandingAction, LandingScreen, RephraseDialog, RephraseResult,
    TerminalGuard,
};
use crate::wizard::steps::{PreviewEditor, StepEditor};
use crate::wizard::{WizardController, WizardPhase};

/// Which screen owns the keyboard.
enum Screen {
    Landing(LandingScreen),
    Wizard(Box<WizardSession>),
}

/// Everything the wizard screen needs between draws.
struct WizardSession {
    controller: WizardController,
    editor: StepEditor,
    /// What `init` was asked to load, kept for the retry key.
    init_target: Option<String>,
    banner: Option<String>,
    status: Option<String>,
    rephrase: RephraseDialog,
}

impl WizardSession {
    fn new(api: Arc<dyn DraftApi>, user_id: &str, init_target: Option<String>) -> Self {
        Self {
            controller: WizardController::new(api, user_id),
            editor: StepEditor::for_step(1, &Draft::default()),
            init_target,
            banner: None,
            status: None,
            rephrase: RephraseDialog::new(),
        }
    }

    async fn init(&mut self) {
        self.controller.init(self.init_target.as_deref()).await;
        self.sync_editor().await;
    }

    /// Rebuild the editor for the controller's current step, seeding buffers
    /// from the snapshot. Entering the drawings step refreshes the list.
    async fn sync_editor(&mut self) {
        let Some(draft) = self.controller.draft() else {
            return;
        };
        self.editor = StepEditor::for_step(self.controller.current_step(), draft);
        if matches!(self.editor, StepEditor::Drawings(_)) {
            self.refresh_drawings().await;
        }
    }

    async fn refresh_drawings(&mut self) {
        let api = self.controller.api().clone();
        let Some(draft_id) = self.controller.draft().map(|d| d.id.clone()) else {
            return;
        };
        match api.list_drawings(&draft_id).await {
            Ok(drawings) => {
                if let StepEditor::Drawings(editor) = &mut self.editor {
                    editor.set_drawings(drawings);
                }
            }
            Err(e) => self.banner = Some(e.banner_message()),
        }
    }
}

pub struct App {
    config: Config,
    api: Arc<dyn DraftApi>,
    screen: Screen,
    should_quit: bool,
}

impl App {
    /// TUI starting at the landing screen.
    pub fn new(config: Config) -> Result<Self> {
        let api: Arc<dyn DraftApi> = Arc::new(HttpDraftClient::new(&config.backend.base_url)?);
        Ok(Self {
            config,
            api,
            screen: Screen::Landing(LandingScreen::new()),
            should_quit: false,
        })
    }

    /// TUI starting directly in the wizard. `draft_id == None` creates a
    /// fresh draft.
    pub fn with_wizard(config: Config, draft_id: Option<String>) -> Result<Self> {
        let api: Arc<dyn DraftApi> = Arc::new(HttpDraftClient::new(&config.backend.base_url)?);
        let session = WizardSession::new(api.clone(), &config.backend.user_id, draft_id);
        Ok(Self {
            config,
            api,
            screen: Screen::Wizard(Box::new(session)),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        install_panic_hook();
        let _guard = TerminalGuard::new()?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        // First draw happens before the initial load finishes only in the
        // landing case; the wizard shows its Loading phase instead.
        terminal.draw(|frame| self.render(frame))?;
        self.load_initial().await;

        let tick_rate = Duration::from_millis(self.config.ui.refresh_rate_ms);
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key).await;
                    }
                }
            }
        }
        Ok(())
    }

    async fn load_initial(&mut self) {
        match &mut self.screen {
            Screen::Landing(_) => self.reload_projects().await,
            Screen::Wizard(session) => session.init().await,
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        match &mut self.screen {
            Screen::Landing(landing) => {
                landing.render(frame, area, &self.config.backend.user_id);
            }
            Screen::Wizard(session) => {
                wizard_view::render(
                    frame,
                    &session.controller,
                    &mut session.editor,
                    session.banner.as_deref(),
                    session.status.as_deref(),
                );
                session.rephrase.render(frame);
            }
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        // Ctrl+C quits from anywhere, even mid-edit.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if matches!(self.screen, Screen::Landing(_)) {
            self.handle_landing_key(key).await;
        } else {
            self.handle_wizard_key(key).await;
        }
    }

    async fn reload_projects(&mut self) {
        let result = self.api.list_projects(&self.config.backend.user_id).await;
        if let Screen::Landing(landing) = &mut self.screen {
            match result {
                Ok(projects) => landing.set_projects(projects),
                Err(e) => landing.set_error(e.banner_message()),
            }
        }
    }

    async fn handle_landing_key(&mut self, key: KeyEvent) {
        let action = match &mut self.screen {
            Screen::Landing(landing) => landing.handle_key(key),
            Screen::Wizard(_) => return,
        };

        match action {
            LandingAction::None => {}
            LandingAction::Quit => self.should_quit = true,
            LandingAction::Reload => self.reload_projects().await,
            LandingAction::LoadDrafts(project_id) => {
                let result = self.api.list_drafts(&project_id).await;
                if let Screen::Landing(landing) = &mut self.screen {
                    match result {
                        Ok(drafts) => landing.set_drafts(drafts),
                        Err(e) => landing.set_error(e.banner_message()),
                    }
                }
            }
            LandingAction::OpenDraft(draft_id) => self.open_wizard(Some(draft_id)).await,
            LandingAction::NewDraft => self.open_wizard(None).await,
        }
    }

    async fn open_wizard(&mut self, draft_id: Option<String>) {
        let mut session = WizardSession::new(
            self.api.clone(),
            &self.config.backend.user_id,
            draft_id,
        );
        session.init().await;
        self.screen = Screen::Wizard(Box::new(session));
    }

    fn back_to_landing(&mut self) {
        self.screen = Screen::Landing(LandingScreen::new());
    }

    async fn handle_wizard_key(&mut self, key: KeyEvent) {
        // Failed phase has its own tiny keymap.
        let failed = matches!(
            &self.screen,
            Screen::Wizard(session)
                if matches!(session.controller.phase(), WizardPhase::Failed(_))
        );
        if failed {
            match key.code {
                KeyCode::Char('R' | 'r') => {
                    if let Screen::Wizard(session) = &mut self.screen {
                        session.init().await;
                    }
                }
                KeyCode::Esc => {
                    self.back_to_landing();
                    self.reload_projects().await;
                }
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        let Screen::Wizard(session) = &mut self.screen else {
            return;
        };

        // The rephrase prompt swallows everything while open.
        if session.rephrase.is_visible() {
            match session.rephrase.handle_key(key) {
                RephraseResult::Open | RephraseResult::Cancelled => {}
                RephraseResult::Submitted {
                    section,
                    instruction,
                } => match session.controller.rephrase_section(section, &instruction).await {
                    Ok(content) => {
                        if let StepEditor::Section(editor) = &mut session.editor {
                            editor.apply_generated(&content);
                        }
                        session.status =
                            Some(format!("{} rephrased (unsaved)", section.display_name()));
                    }
                    // Rephrase failures stay off the banner; the buffer is
                    // simply left as it was.
                    Err(e) => tracing::warn!(error = %e, "rephrase failed"),
                },
            }
            return;
        }

        session.status = None;

        // Alt+1-8 jumps straight to an unlocked step.
        if key.modifiers.contains(KeyModifiers::ALT) {
            if let KeyCode::Char(c @ '1'..='8') = key.code {
                let step = c as u8 - b'0';
                if session.controller.step_status(step).accessible {
                    session.controller.go_to_step(step).await;
                    session.sync_editor().await;
                } else {
                    session.banner = Some(format!("step {step} is locked"));
                }
                return;
            }
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                if session.banner.is_some() {
                    session.banner = None;
                } else {
                    self.back_to_landing();
                    self.reload_projects().await;
                }
            }
            KeyCode::PageDown => {
                session.controller.next_step().await;
                session.sync_editor().await;
            }
            KeyCode::PageUp => {
                session.controller.prev_step().await;
                session.sync_editor().await;
            }
            KeyCode::Char('s') if ctrl => Self::save_step(session).await,
            KeyCode::Char('g') if ctrl => Self::generate(session).await,
            KeyCode::Char('r') if ctrl => {
                match &session.editor {
                    StepEditor::Section(editor) if editor.can_rephrase() => {
                        session.rephrase.open(editor.section());
                    }
                    StepEditor::Section(_) => {
                        session.banner = Some("nothing to rephrase yet".to_string());
                    }
                    _ => {}
                }
            }
            KeyCode::Char('d') if ctrl => Self::download(session, &self.config).await,
            KeyCode::Tab => match &mut session.editor {
                StepEditor::Initial(editor) => editor.focus_next(),
                StepEditor::Drawings(editor) => editor.focus_next(),
                _ => {}
            },
            KeyCode::BackTab => match &mut session.editor {
                StepEditor::Initial(editor) => editor.focus_prev(),
                StepEditor::Drawings(editor) => editor.focus_next(),
                _ => {}
            },
            KeyCode::Enter if matches!(session.editor, StepEditor::Drawings(_)) => {
                Self::upload_drawing(session).await;
            }
            _ => {
                // Everything else goes to the focused text field.
                match &mut session.editor {
                    StepEditor::Initial(editor) => {
                        editor.focused_field_mut().handle_key(key);
                    }
                    StepEditor::Section(editor) => {
                        editor.buffer.handle_key(key);
                    }
                    StepEditor::Drawings(editor) => {
                        editor.focused_field_mut().handle_key(key);
                    }
                    StepEditor::Preview(_) => {}
                }
            }
        }
    }

    /// Ctrl+S: persist the active editor's fields. On step 8 this is the
    /// mark-complete action instead.
    async fn save_step(session: &mut WizardSession) {
        let payload = match &session.editor {
            StepEditor::Preview(_) => PreviewEditor::completion_update(),
            other => other.save_payload(),
        };
        match session.controller.update_draft(payload).await {
            Ok(()) => {
                session.status = Some("saved".to_string());
                session.banner = None;
            }
            Err(e) => session.banner = Some(e.banner_message()),
        }
    }

    async fn generate(session: &mut WizardSession) {
        let Some(section) = session.editor.section() else {
            return;
        };
        match session.controller.generate_section(section).await {
            Ok(content) => {
                if let StepEditor::Section(editor) = &mut session.editor {
                    editor.apply_generated(&content);
                }
                session.status =
                    Some(format!("{} generated (unsaved)", section.display_name()));
            }
            // Generation failures stay off the banner; the buffer is simply
            // left as it was.
            Err(e) => tracing::warn!(error = %e, "generation failed"),
        }
    }

    async fn upload_drawing(session: &mut WizardSession) {
        let upload = match &session.editor {
            StepEditor::Drawings(editor) => editor.build_upload(),
            _ => return,
        };
        let upload = match upload {
            Ok(upload) => upload,
            Err(e) => {
                session.banner = Some(e.banner_message());
                return;
            }
        };

        let api = session.controller.api().clone();
        let Some(draft_id) = session.controller.draft().map(|d| d.id.clone()) else {
            return;
        };
        match api.upload_drawing(&draft_id, upload).await {
            Ok(drawing) => {
                if let StepEditor::Drawings(editor) = &mut session.editor {
                    editor.push_uploaded(drawing);
                }
                session.status = Some("drawing uploaded".to_string());
            }
            Err(e) => session.banner = Some(e.banner_message()),
        }
    }

    /// Ctrl+D on step 8: fetch the document and write it to the downloads
    /// directory.
    async fn download(session: &mut WizardSession, config: &Config) {
        if !matches!(session.editor, StepEditor::Preview(_)) {
            return;
        }
        let api = session.controller.api().clone();
        let Some(draft) = session.controller.draft().cloned() else {
            return;
        };

        if let StepEditor::Preview(editor) = &mut session.editor {
            editor.downloading = true;
        }
        let result = api.download_document(&draft.id).await;
        let outcome = result.and_then(|bytes| {
            let dir = config.downloads_path();
            std::fs::create_dir_all(&dir)
                .map_err(|e| crate::api::ApiError::Validation(e.to_string()))?;
            let path = dir.join(PreviewEditor::download_file_name(&draft));
            std::fs::write(&path, bytes)
                .map_err(|e| crate::api::ApiError::Validation(e.to_string()))?;
            Ok(path)
        });

        if let StepEditor::Preview(editor) = &mut session.editor {
            editor.downloading = false;
            match outcome {
                Ok(path) => {
                    session.status = Some(format!("saved {}", path.display()));
                    editor.downloaded_to = Some(path);
                }
                Err(e) => session.banner = Some(e.banner_message()),
            }
        }
    }
}
