//! Tab bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::{Store, View};
use crate::ui::theme::Palette;

/// Tab bar widget.
pub struct TabBar;

impl TabBar {
    /// Render the tab bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, palette: &Palette) {
        let tabs = [("Dashboard", View::Dashboard), ("Fast Trade", View::FastTrade)];

        let mut spans = vec![Span::styled(" [Tab] ", palette.muted())];

        for (name, view) in tabs {
            let name_style = if store.app.current_view == view {
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(palette.fg)
            };

            spans.push(Span::styled(name, name_style));
            spans.push(Span::raw("  "));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).style(palette.base()), area);
    }
}
