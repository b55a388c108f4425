//! Fast-trade view: a live, unsorted list of the first predictions.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::state::FastViewState;
use crate::state::table::DerivedRow;
use crate::ui::theme::Palette;

pub struct FastView;

impl FastView {
    pub fn render(frame: &mut Frame, area: Rect, state: &FastViewState, palette: &Palette) {
        let header = Row::new(
            ["Ticker", "Price", "Exp.", "Prob.", "Outcome", "R:R", "Signal", "Date"]
                .into_iter()
                .map(|h| Cell::from(h).style(palette.header())),
        )
        .bottom_margin(1);

        let rows = state.predictions.iter().map(|p| {
            let row = DerivedRow::derive(p, &state.quotes);
            let cells = row.cells();
            Row::new(vec![
                Cell::from(cells.ticker).style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(cells.price),
                Cell::from(cells.expected).style(palette.change(row.expected)),
                Cell::from(cells.probability),
                Cell::from(cells.outcome).style(palette.outcome(row.outcome)),
                Cell::from(cells.reward_to_risk),
                Cell::from(cells.signal).style(palette.signal(row.signal)),
                Cell::from(cells.date).style(palette.muted()),
            ])
        });

        let status = if state.running {
            Span::styled(" live ", Style::default().fg(palette.up))
        } else {
            Span::styled(" stopped (s to start) ", palette.muted())
        };

        let table = Table::new(
            rows,
            [
                Constraint::Length(8),
                Constraint::Length(10),
                Constraint::Length(9),
                Constraint::Length(6),
                Constraint::Length(10),
                Constraint::Length(6),
                Constraint::Length(7),
                Constraint::Min(16),
            ],
        )
        .header(header)
        .style(palette.base())
        .block(
            Block::default()
                .title(" Fast Trade ")
                .title(status)
                .borders(Borders::ALL)
                .border_style(palette.border()),
        );
        frame.render_widget(table, area);

        if state.predictions.is_empty() && area.height > 4 {
            let hint = Rect {
                x: area.x + 2,
                y: area.y + 3,
                width: area.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(
                Paragraph::new(Span::styled("Waiting for data...", palette.muted())),
                hint,
            );
        }
    }
}
