//! Landing screen: the configured user's projects and their drafts.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::types::{Draft, Project};

/// Which pane has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Projects,
    Drafts,
}

/// What the app should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LandingAction {
    None,
    /// Load drafts for the selected project.
    LoadDrafts(String),
    /// Open the wizard on an existing draft.
    OpenDraft(String),
    /// Open the wizard on a fresh draft.
    NewDraft,
    /// Re-fetch the project list.
    Reload,
    Quit,
}

pub struct LandingScreen {
    projects: Vec<Project>,
    drafts: Vec<Draft>,
    project_state: ListState,
    draft_state: ListState,
    pane: Pane,
    pub loading: bool,
    pub error: Option<String>,
}

impl LandingScreen {
    pub fn new() -> Self {
        Self {
            projects: Vec::new(),
            drafts: Vec::new(),
            project_state: ListState::default(),
            draft_state: ListState::default(),
            pane: Pane::Projects,
            loading: true,
            error: None,
        }
    }

    pub fn set_projects(&mut self, projects: Vec<Project>) {
        self.projects = projects;
        self.loading = false;
        self.error = None;
        self.project_state
            .select(if self.projects.is_empty() { None } else { Some(0) });
        self.drafts.clear();
        self.draft_state.select(None);
        self.pane = Pane::Projects;
    }

    pub fn set_drafts(&mut self, drafts: Vec<Draft>) {
        self.drafts = drafts;
        self.loading = false;
        self.draft_state
            .select(if self.drafts.is_empty() { None } else { Some(0) });
        self.pane = Pane::Drafts;
    }

    pub fn set_error(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    fn selected_project(&self) -> Option<&Project> {
        self.project_state.selected().and_then(|i| self.projects.get(i))
    }

    fn selected_draft(&self) -> Option<&Draft> {
        self.draft_state.selected().and_then(|i| self.drafts.get(i))
    }

    fn move_selection(&mut self, delta: i64) {
        let (state, len) = match self.pane {
            Pane::Projects => (&mut self.project_state, self.projects.len()),
            Pane::Drafts => (&mut self.draft_state, self.drafts.len()),
        };
        if len == 0 {
            return;
        }
        #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
        let next = {
            let current = state.selected().unwrap_or(0) as i64;
            (current + delta).rem_euclid(len as i64) as usize
        };
        state.select(Some(next));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> LandingAction {
        if self.error.is_some() && key.code == KeyCode::Esc {
            self.error = None;
            return LandingAction::None;
        }

        match key.code {
            KeyCode::Char('q') => LandingAction::Quit,
            KeyCode::Char('n') => LandingAction::NewDraft,
            KeyCode::Char('r') => {
                self.loading = true;
                LandingAction::Reload
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(-1);
                LandingAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(1);
                LandingAction::None
            }
            KeyCode::Esc if self.pane == Pane::Drafts => {
                self.pane = Pane::Projects;
                LandingAction::None
            }
            KeyCode::Enter => match self.pane {
                Pane::Projects => match self.selected_project() {
                    Some(project) => {
                        let project_id = project.id.clone();
                        self.loading = true;
                        LandingAction::LoadDrafts(project_id)
                    }
                    None => LandingAction::None,
                },
                Pane::Drafts => match self.selected_draft() {
                    Some(draft) => LandingAction::OpenDraft(draft.id.clone()),
                    None => LandingAction::None,
                },
            },
            _ => LandingAction::None,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, user_id: &str) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(1)])
            .split(area);

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[0]);

        self.render_projects(frame, panes[0], user_id);
        self.render_drafts(frame, panes[1]);

        let footer = if let Some(error) = &self.error {
            Line::from(Span::styled(
                format!(" {error}  (Esc to dismiss)"),
                Style::default().fg(Color::Red),
            ))
        } else if self.loading {
            Line::from(Span::styled(" loading...", Style::default().fg(Color::Yellow)))
        } else {
            Line::from(Span::styled(
                " Enter: open   n: new draft   r: reload   q: quit",
                Style::default().fg(Color::DarkGray),
            ))
        };
        frame.render_widget(Paragraph::new(footer), rows[1]);
    }

    fn render_projects(&mut self, frame: &mut Frame, area: Rect, user_id: &str) {
        let items: Vec<ListItem> = self
            .projects
            .iter()
            .map(|p| ListItem::new(p.title.clone()))
            .collect();
        let focused = self.pane == Pane::Projects;
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style(focused))
                    .title(format!(" Projects ({user_id}) ")),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, area, &mut self.project_state);
    }

    fn render_drafts(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .drafts
            .iter()
            .map(|d| {
                let title = if d.title.trim().is_empty() {
                    "(untitled)"
                } else {
                    d.title.as_str()
                };
                let status = if d.is_complete {
                    Span::styled(" complete", Style::default().fg(Color::Green))
                } else {
                    Span::styled(
                        format!(" step {}/8", d.current_step),
                        Style::default().fg(Color::Yellow),
                    )
                };
                ListItem::new(Line::from(vec![Span::raw(title.to_string()), status]))
            })
            .collect();
        let focused = self.pane == Pane::Drafts;
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style(focused))
                    .title(" Drafts "),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, area, &mut self.draft_state);
    }
}

impl Default for LandingScreen {
    fn default() -> Self {
        Self::new()
    }
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn projects() -> Vec<Project> {
        vec![
            Project {
                id: "p1".to_string(),
                user_id: "u1".to_string(),
                title: "Valves".to_string(),
                description: String::new(),
                status: "active".to_string(),
                draft_count: 1,
                created_at: None,
                updated_at: None,
            },
            Project {
                id: "p2".to_string(),
                user_id: "u1".to_string(),
                title: "Widgets".to_string(),
                description: String::new(),
                status: "active".to_string(),
                draft_count: 2,
                created_at: None,
                updated_at: None,
            },
        ]
    }

    #[test]
    fn enter_on_project_requests_its_drafts() {
        let mut screen = LandingScreen::new();
        screen.set_projects(projects());
        screen.handle_key(key(KeyCode::Down));
        let action = screen.handle_key(key(KeyCode::Enter));
        assert_eq!(action, LandingAction::LoadDrafts("p2".to_string()));
        assert!(screen.loading);
    }

    #[test]
    fn enter_on_draft_opens_the_wizard() {
        let mut screen = LandingScreen::new();
        screen.set_projects(projects());
        screen.set_drafts(vec![Draft {
            id: "d1".to_string(),
            ..Draft::default()
        }]);
        let action = screen.handle_key(key(KeyCode::Enter));
        assert_eq!(action, LandingAction::OpenDraft("d1".to_string()));
    }

    #[test]
    fn selection_wraps_around_the_list() {
        let mut screen = LandingScreen::new();
        screen.set_projects(projects());
        screen.handle_key(key(KeyCode::Up));
        assert_eq!(screen.project_state.selected(), Some(1));
        screen.handle_key(key(KeyCode::Down));
        assert_eq!(screen.project_state.selected(), Some(0));
    }

    #[test]
    fn enter_on_empty_lists_is_a_noop() {
        let mut screen = LandingScreen::new();
        screen.set_projects(Vec::new());
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LandingAction::None);
    }

    #[test]
    fn esc_dismisses_error_before_anything_else() {
        let mut screen = LandingScreen::new();
        screen.set_error("network error: connection refused".to_string());
        assert_eq!(screen.handle_key(key(KeyCode::Esc)), LandingAction::None);
        assert!(screen.error.is_none());
    }
}
