//! KPI summary strip.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::format;
use crate::state::{Kpis, Signal};
use crate::ui::theme::Palette;

/// Counts and averages over all loaded predictions.
pub struct KpiBar;

impl KpiBar {
    pub fn render(frame: &mut Frame, area: Rect, kpis: &Kpis, palette: &Palette) {
        let value = Style::default()
            .fg(palette.fg)
            .add_modifier(Modifier::BOLD);

        let line = Line::from(vec![
            Span::styled(" Predictions ", palette.muted()),
            Span::styled(kpis.count.to_string(), value),
            Span::styled("   Avg probability ", palette.muted()),
            Span::styled(format::pct(kpis.mean_probability), value),
            Span::styled("   Avg R:R ", palette.muted()),
            Span::styled(
                kpis.mean_reward_to_risk
                    .map(format::ratio)
                    .unwrap_or_else(|| format::MISSING.to_string()),
                value,
            ),
            Span::raw("   "),
            Span::styled(format!("Buy {}", kpis.buy), palette.signal(Signal::Buy)),
            Span::raw("  "),
            Span::styled(format!("Hold {}", kpis.hold), palette.signal(Signal::Hold)),
            Span::raw("  "),
            Span::styled(format!("Sell {}", kpis.sell), palette.signal(Signal::Sell)),
        ]);

        let paragraph = Paragraph::new(line).style(palette.base()).block(
            Block::default()
                .title(" Overview ")
                .borders(Borders::ALL)
                .border_style(palette.border()),
        );
        frame.render_widget(paragraph, area);
    }
}
