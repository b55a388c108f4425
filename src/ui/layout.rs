//! Layout management for the TUI.

use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// Width of the toast column.
const TOAST_WIDTH: u16 = 44;
/// Height of one toast including borders.
pub const TOAST_HEIGHT: u16 = 3;

/// UI layout areas.
pub struct Layout {
    /// Status bar area (top).
    pub status_area: Rect,
    /// Tab bar area.
    pub tab_area: Rect,
    /// Main content area.
    pub main_area: Rect,
    /// Bottom-right column where toasts stack upwards.
    pub toast_area: Rect,
}

impl Layout {
    /// Create a new layout from the terminal area.
    pub fn new(area: Rect) -> Self {
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Status bar
                Constraint::Length(1), // Tab bar
                Constraint::Min(0),    // Main content
            ])
            .split(area);

        let width = TOAST_WIDTH.min(area.width);
        let toast_area = Rect {
            x: area.x + area.width - width,
            y: chunks[2].y,
            width,
            height: chunks[2].height,
        };

        Self {
            status_area: chunks[0],
            tab_area: chunks[1],
            main_area: chunks[2],
            toast_area,
        }
    }
}

/// Dashboard main-area split.
pub struct DashboardLayout {
    pub kpi_area: Rect,
    pub input_area: Rect,
    pub table_area: Rect,
    pub pager_area: Rect,
}

impl DashboardLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            kpi_area: chunks[0],
            input_area: chunks[1],
            table_area: chunks[2],
            pager_area: chunks[3],
        }
    }
}

/// Create a centered popup area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_column_is_bottom_right_of_main() {
        let layout = Layout::new(Rect::new(0, 0, 120, 40));
        assert_eq!(layout.toast_area.x + layout.toast_area.width, 120);
        assert_eq!(layout.toast_area.y, layout.main_area.y);
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 40, area);
        assert!(popup.x >= 20 && popup.right() <= 80);
        assert_eq!(popup.width, 60);
    }
}
