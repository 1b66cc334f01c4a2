//! Modal dialogs: the rephrase instruction prompt.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;
use crate::types::Section;
use crate::ui::form_field::FormField;

/// What a key press did to the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RephraseResult {
    /// Dialog consumed the key, still open.
    Open,
    /// User cancelled.
    Cancelled,
    /// User submitted an instruction for the given section.
    Submitted { section: Section, instruction: String },
}

/// Free-text prompt for the rephrase action. One instruction per invocation;
/// the field is cleared when the dialog opens.
pub struct RephraseDialog {
    visible: bool,
    section: Option<Section>,
    input: FormField,
}

impl RephraseDialog {
    pub fn new() -> Self {
        Self {
            visible: false,
            section: None,
            input: FormField::input(
                "Instruction",
                "",
                "e.g. make it more formal, shorten to one paragraph",
            ),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn open(&mut self, section: Section) {
        self.visible = true;
        self.section = Some(section);
        self.input.set_value("");
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.section = None;
    }

    /// Route a key press. Enter submits (blank instructions are rejected by
    /// keeping the dialog open), Esc cancels, everything else edits.
    pub fn handle_key(&mut self, key: KeyEvent) -> RephraseResult {
        match key.code {
            KeyCode::Esc => {
                self.close();
                RephraseResult::Cancelled
            }
            KeyCode::Enter => {
                let instruction = self.input.value().trim().to_string();
                if instruction.is_empty() {
                    return RephraseResult::Open;
                }
                let Some(section) = self.section else {
                    self.close();
                    return RephraseResult::Cancelled;
                };
                self.close();
                RephraseResult::Submitted {
                    section,
                    instruction,
                }
            }
            _ => {
                self.input.handle_key(key);
                RephraseResult::Open
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        if !self.visible {
            return;
        }
        let Some(section) = self.section else {
            return;
        };

        let area = centered_rect(60, 20, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" Rephrase {} ", section.display_name()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(inner);

        frame.render_widget(
            Paragraph::new("How should the current text be rewritten?"),
            rows[0],
        );
        self.input.render(frame, rows[1], true);
        frame.render_widget(
            Paragraph::new(Line::from("Enter: rephrase   Esc: cancel"))
                .style(Style::default().fg(Color::DarkGray)),
            rows[2],
        );
    }
}

impl Default for RephraseDialog {
    fn default() -> Self {
        Self::new()
    }
}
