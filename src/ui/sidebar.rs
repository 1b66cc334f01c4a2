//! Wizard sidebar: the step list and the overall progress gauge.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem},
    Frame,
};

use crate::types::Draft;
use crate::wizard::navigation::{progress_fraction, step_status, STEPS};

/// Render the step list plus the gauge. `current` is the visible step, which
/// may be ahead of what the backend has confirmed.
pub fn render(frame: &mut Frame, area: Rect, current: u8, draft: &Draft) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(3)])
        .split(area);

    let items: Vec<ListItem> = STEPS
        .iter()
        .map(|step| {
            let status = step_status(step.id, current, draft);
            let marker = if step.id == current {
                "> "
            } else if status.completed {
                "x "
            } else {
                "  "
            };

            let style = if step.id == current {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if status.completed {
                Style::default().fg(Color::Green)
            } else if status.accessible {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{marker}{}. {}", step.id, step.title), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Steps (Alt+1-8) "),
    );
    frame.render_widget(list, chunks[0]);

    let fraction = progress_fraction(current);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percent = (fraction * 100.0).round() as u16;
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Progress "))
        .gauge_style(Style::default().fg(Color::Green))
        .percent(percent.min(100));
    frame.render_widget(gauge, chunks[1]);
}
