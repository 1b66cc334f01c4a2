//! Terminal UI: screens, widgets, and terminal lifecycle.

pub mod dialogs;
pub mod form_field;
pub mod landing;
pub mod sidebar;
pub mod terminal_guard;
pub mod wizard_view;

pub use dialogs::{RephraseDialog, RephraseResult};
pub use landing::{LandingAction, LandingScreen};
pub use terminal_guard::{install_panic_hook, TerminalGuard};

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Centered sub-rectangle taking `percent_x` by `percent_y` of `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_stays_inside_parent() {
        let parent = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(60, 50, parent);
        assert!(rect.x >= parent.x && rect.right() <= parent.right());
        assert!(rect.y >= parent.y && rect.bottom() <= parent.bottom());
        assert_eq!(rect.width, 60);
        assert_eq!(rect.height, 20);
    }
}
