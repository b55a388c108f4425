//! Status bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::{Store, View};
use crate::ui::theme::Palette;

/// Status bar widget.
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, palette: &Palette) {
        let (loading, last_updated) = match store.app.current_view {
            View::Dashboard => (store.dashboard.loading, store.dashboard.last_updated),
            View::FastTrade => (false, store.fast_trade.last_updated),
        };

        let mut spans = vec![
            Span::styled(
                " Predscope ",
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
        ];

        if store.fast_trade.running {
            spans.push(Span::styled("● Polling", Style::default().fg(palette.up)));
        } else {
            spans.push(Span::styled("○ Idle", palette.muted()));
        }

        if loading {
            spans.push(Span::styled(
                "  Loading...",
                Style::default()
                    .fg(palette.header)
                    .add_modifier(Modifier::ITALIC),
            ));
        } else if let Some(at) = last_updated {
            spans.push(Span::styled(
                format!("  Updated {}", at.with_timezone(&chrono::Local).format("%H:%M:%S")),
                palette.muted(),
            ));
        }

        let help_hint = Span::styled(
            format!(" {} theme | Press ? for help ", store.app.theme.as_str()),
            palette.muted(),
        );

        // Right-align the help hint
        let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let right_len = help_hint.content.chars().count();
        let padding = (area.width as usize).saturating_sub(left_len + right_len);
        spans.push(Span::raw(" ".repeat(padding)));
        spans.push(help_hint);

        let paragraph = Paragraph::new(Line::from(spans))
            .style(Style::default().fg(palette.fg).bg(palette.bar_bg));

        frame.render_widget(paragraph, area);
    }
}
