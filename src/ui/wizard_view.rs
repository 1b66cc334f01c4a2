//! Wizard screen rendering: sidebar, active step editor, status footer.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::ui::sidebar;
use crate::wizard::navigation::STEPS;
use crate::wizard::steps::{
    DrawingsEditor, InitialQuestionsEditor, PreviewEditor, SectionEditor, StepEditor,
};
use crate::wizard::{WizardController, WizardPhase};

/// Render the wizard screen for the current phase.
pub fn render(
    frame: &mut Frame,
    controller: &WizardController,
    editor: &mut StepEditor,
    banner: Option<&str>,
    status: Option<&str>,
) {
    let area = frame.area();

    match controller.phase() {
        WizardPhase::Uninitialized | WizardPhase::Loading => {
            render_notice(frame, area, "Loading draft...", Color::Yellow);
            return;
        }
        WizardPhase::Failed(message) => {
            render_failure(frame, area, message);
            return;
        }
        WizardPhase::Ready => {}
    }
    let Some(draft) = controller.draft() else {
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(40)])
        .split(area);

    sidebar::render(frame, columns[0], controller.current_step(), draft);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(8),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(columns[1]);

    render_header(frame, main[0], controller);
    match editor {
        StepEditor::Initial(e) => render_initial(frame, main[1], e),
        StepEditor::Section(e) => render_section(frame, main[1], e),
        StepEditor::Drawings(e) => render_drawings(frame, main[1], e),
        StepEditor::Preview(e) => render_preview(frame, main[1], e, controller),
    }
    render_footer(frame, main[2], editor, controller.is_saving());
    render_status(frame, main[3], banner, status);
}

fn render_header(frame: &mut Frame, area: Rect, controller: &WizardController) {
    let step = controller.current_step();
    let info = &STEPS[usize::from(step.saturating_sub(1)).min(STEPS.len() - 1)];
    let mut spans = vec![Span::styled(
        format!("Step {step}/8: {}", info.title),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if controller.confirmed_step() != Some(step) {
        spans.push(Span::styled(
            "  (not yet saved)",
            Style::default().fg(Color::Yellow),
        ));
    }
    let lines = vec![
        Line::from(spans),
        Line::from(Span::styled(
            info.description,
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_initial(frame: &mut Frame, area: Rect, editor: &mut InitialQuestionsEditor) {
    let constraints: Vec<Constraint> = editor
        .fields
        .iter()
        .map(|f| Constraint::Length(f.render_height()))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let focused = editor.focused;
    for (i, field) in editor.fields.iter_mut().enumerate() {
        field.render(frame, rows[i], i == focused);
    }
}

fn render_section(frame: &mut Frame, area: Rect, editor: &mut SectionEditor) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(1)])
        .split(area);

    editor.buffer.render(frame, rows[0], true);

    let tag = if editor.generating {
        Span::styled("generating...", Style::default().fg(Color::Yellow))
    } else if editor.ai_generated {
        Span::styled("AI generated", Style::default().fg(Color::Magenta))
    } else {
        Span::raw("")
    };
    frame.render_widget(Paragraph::new(Line::from(tag)), rows[1]);
}

fn render_drawings(frame: &mut Frame, area: Rect, editor: &mut DrawingsEditor) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(4),
        ])
        .split(area);

    let focused = editor.focused;
    editor.path_field.render(frame, rows[0], focused == 0);
    editor.description_field.render(frame, rows[1], focused == 1);

    let items: Vec<ListItem> = if !editor.loaded {
        vec![ListItem::new("loading drawings...")]
    } else if editor.drawings.is_empty() {
        vec![ListItem::new(Span::styled(
            "no drawings uploaded yet",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        editor
            .drawings
            .iter()
            .map(|d| {
                let description = if d.description.trim().is_empty() {
                    String::new()
                } else {
                    format!("  {}", d.description)
                };
                ListItem::new(format!(
                    "{} ({}){description}",
                    d.original_filename,
                    d.size_display()
                ))
            })
            .collect()
    };

    let title = if editor.uploading {
        " Drawings (uploading...) "
    } else {
        " Drawings "
    };
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, rows[2]);
}

fn render_preview(
    frame: &mut Frame,
    area: Rect,
    editor: &PreviewEditor,
    controller: &WizardController,
) {
    let Some(draft) = controller.draft() else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(2)])
        .split(area);

    let items: Vec<ListItem> = PreviewEditor::completion_rows(draft)
        .into_iter()
        .map(|(name, populated)| {
            let (mark, color) = if populated {
                ("x", Color::Green)
            } else {
                (" ", Color::Red)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("[{mark}] "), Style::default().fg(color)),
                Span::raw(name),
            ]))
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Application Sections "),
    );
    frame.render_widget(list, rows[0]);

    let mut lines = Vec::new();
    if editor.downloading {
        lines.push(Line::from(Span::styled(
            "downloading...",
            Style::default().fg(Color::Yellow),
        )));
    } else if let Some(path) = &editor.downloaded_to {
        lines.push(Line::from(Span::styled(
            format!("saved to {}", path.display()),
            Style::default().fg(Color::Green),
        )));
    }
    if draft.is_complete {
        lines.push(Line::from(Span::styled(
            "draft marked complete",
            Style::default().fg(Color::Green),
        )));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), rows[1]);
}

fn render_footer(frame: &mut Frame, area: Rect, editor: &StepEditor, saving: bool) {
    let hints = match editor {
        StepEditor::Initial(_) => "Tab: next field   Ctrl+S: save   PgDn/PgUp: step   Esc: back",
        StepEditor::Section(_) => {
            "Ctrl+G: generate   Ctrl+R: rephrase   Ctrl+S: save   PgDn/PgUp: step   Esc: back"
        }
        StepEditor::Drawings(_) => {
            "Tab: field   Enter: upload   Ctrl+S: save   PgDn/PgUp: step   Esc: back"
        }
        StepEditor::Preview(_) => {
            "Ctrl+D: download   Ctrl+S: mark complete   PgUp: step   Esc: back"
        }
    };
    let line = if saving {
        Line::from(Span::styled("saving...", Style::default().fg(Color::Yellow)))
    } else {
        Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_status(frame: &mut Frame, area: Rect, banner: Option<&str>, status: Option<&str>) {
    let line = if let Some(message) = banner {
        Line::from(Span::styled(
            format!("{message}  (Esc to dismiss)"),
            Style::default().fg(Color::White).bg(Color::Red),
        ))
    } else if let Some(message) = status {
        Line::from(Span::styled(message, Style::default().fg(Color::Green)))
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_notice(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let para = Paragraph::new(message)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(para, super::centered_rect(50, 20, area));
}

fn render_failure(frame: &mut Frame, area: Rect, message: &str) {
    let lines = vec![
        Line::from(Span::styled(
            "Failed to load draft",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "R: retry   Esc: back to projects   q: quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let para = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(para, super::centered_rect(60, 40, area));
}
