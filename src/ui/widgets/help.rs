//! Help panel widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::config::KeyBindings;
use crate::ui::layout::centered_rect;
use crate::ui::theme::Palette;

/// Help panel showing keybindings.
pub struct HelpPanel;

impl HelpPanel {
    /// Render the help panel.
    pub fn render(frame: &mut Frame, area: Rect, keys: &KeyBindings, palette: &Palette) {
        let popup_area = centered_rect(60, 80, area);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let section = |title: &'static str| {
            Line::from(Span::styled(
                title,
                Style::default()
                    .fg(palette.header)
                    .add_modifier(Modifier::BOLD),
            ))
        };
        let entry = |key: String, description: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<10}"), Style::default().fg(palette.accent)),
                Span::raw(description),
            ])
        };

        let help_text = vec![
            section("Navigation"),
            entry(format!("{}/↓ {}/↑", keys.down, keys.up), "Move selection"),
            entry("←/→".into(), "Previous / next page"),
            entry("gg / G".into(), "First / last row"),
            entry(keys.switch_view.clone(), "Switch view"),
            Line::from(""),
            section("Dashboard"),
            entry(keys.search.clone(), "Search tickers"),
            entry(keys.new_prediction.clone(), "New prediction (Enter submits)"),
            entry(format!("{}/Enter", keys.details), "Ticker details"),
            entry("1-9".into(), "Sort by column (again to reverse)"),
            entry(keys.page_size.clone(), "Cycle page size"),
            entry(keys.refresh.clone(), "Refresh"),
            entry("Esc".into(), "Leave input"),
            Line::from(""),
            section("Fast Trade"),
            entry(keys.start_polling.clone(), "Start polling"),
            entry(keys.stop_polling.clone(), "Stop polling"),
            entry(keys.refresh.clone(), "Load once"),
            Line::from(""),
            section("General"),
            entry(keys.theme.clone(), "Toggle light/dark theme"),
            entry(keys.help.clone(), "Toggle help"),
            entry(keys.quit.clone(), "Quit"),
        ];

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.header)),
            )
            .style(palette.base());

        frame.render_widget(help, popup_area);
    }
}
