//! Text input widgets used by the wizard's step forms.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_textarea::TextArea;

/// A labeled form field: a one-line input or a multi-line textarea.
pub enum FormField {
    /// Single-line text input.
    TextInput {
        label: String,
        value: String,
        cursor_pos: usize,
        placeholder: String,
    },
    /// Multi-line text input backed by tui-textarea.
    TextArea {
        label: String,
        textarea: Box<TextArea<'static>>,
        placeholder: String,
    },
}

impl FormField {
    pub fn input(label: &str, initial: &str, placeholder: &str) -> Self {
        FormField::TextInput {
            label: label.to_string(),
            value: initial.to_string(),
            cursor_pos: initial.len(),
            placeholder: placeholder.to_string(),
        }
    }

    pub fn area(label: &str, initial: &str, placeholder: &str) -> Self {
        let mut textarea = TextArea::default();
        if !initial.is_empty() {
            textarea.insert_str(initial);
        }
        FormField::TextArea {
            label: label.to_string(),
            textarea: Box::new(textarea),
            placeholder: placeholder.to_string(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FormField::TextInput { label, .. } | FormField::TextArea { label, .. } => label,
        }
    }

    /// Current buffer contents.
    pub fn value(&self) -> String {
        match self {
            FormField::TextInput { value, .. } => value.clone(),
            FormField::TextArea { textarea, .. } => textarea.lines().join("\n"),
        }
    }

    /// Replace the buffer (used when AI generation fills a section).
    pub fn set_value(&mut self, new_value: &str) {
        match self {
            FormField::TextInput {
                value, cursor_pos, ..
            } => {
                *value = new_value.to_string();
                *cursor_pos = value.len();
            }
            FormField::TextArea { textarea, .. } => {
                textarea.select_all();
                textarea.cut();
                textarea.insert_str(new_value);
            }
        }
    }

    pub fn is_blank(&self) -> bool {
        self.value().trim().is_empty()
    }

    /// Handle a key event; returns true if consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self {
            FormField::TextInput {
                value, cursor_pos, ..
            } => match key.code {
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    value.insert(*cursor_pos, c);
                    *cursor_pos += c.len_utf8();
                    true
                }
                KeyCode::Backspace => {
                    if *cursor_pos > 0 {
                        let prev = floor_char_boundary(value, *cursor_pos - 1);
                        value.remove(prev);
                        *cursor_pos = prev;
                    }
                    true
                }
                KeyCode::Delete => {
                    if *cursor_pos < value.len() {
                        value.remove(*cursor_pos);
                    }
                    true
                }
                KeyCode::Left => {
                    if *cursor_pos > 0 {
                        *cursor_pos = floor_char_boundary(value, *cursor_pos - 1);
                    }
                    true
                }
                KeyCode::Right => {
                    if *cursor_pos < value.len() {
                        *cursor_pos = ceil_char_boundary(value, *cursor_pos + 1);
                    }
                    true
                }
                KeyCode::Home => {
                    *cursor_pos = 0;
                    true
                }
                KeyCode::End => {
                    *cursor_pos = value.len();
                    true
                }
                _ => false,
            },
            FormField::TextArea { textarea, .. } => {
                textarea.input(key);
                true
            }
        }
    }

    /// Rows this field needs, including its border or label line.
    pub fn render_height(&self) -> u16 {
        match self {
            FormField::TextInput { .. } => 3,
            FormField::TextArea { .. } => 10,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let border_color = if focused { Color::Cyan } else { Color::Gray };

        match self {
            FormField::TextInput {
                label,
                value,
                cursor_pos,
                placeholder,
            } => {
                let mut text = value.clone();
                if focused {
                    if *cursor_pos < text.len() {
                        text.insert(*cursor_pos, '|');
                    } else {
                        text.push('|');
                    }
                }

                let content = if value.is_empty() && !focused {
                    Line::from(Span::styled(
                        placeholder.as_str(),
                        Style::default().fg(Color::DarkGray),
                    ))
                } else {
                    Line::from(text)
                };

                let para = Paragraph::new(content).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(border_color))
                        .title(label.as_str()),
                );
                frame.render_widget(para, area);
            }
            FormField::TextArea {
                label,
                textarea,
                placeholder,
            } => {
                textarea.set_cursor_line_style(Style::default());
                textarea.set_cursor_style(if focused {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                });
                textarea.set_block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(border_color))
                        .title(label.clone()),
                );
                if textarea.lines().iter().all(String::is_empty) {
                    textarea.set_placeholder_text(placeholder.clone());
                    textarea.set_placeholder_style(Style::default().fg(Color::DarkGray));
                }
                frame.render_widget(&**textarea, area);
            }
        }
    }
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_char_boundary(s: &str, mut index: usize) -> usize {
    while index < s.len() && !s.is_char_boundary(index) {
        index += 1;
    }
    index
}
