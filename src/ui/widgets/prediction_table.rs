//! Dashboard prediction table and pager.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::state::table::{DerivedRow, clamp_probability};
use crate::state::{SortKey, Store, TableModel};
use crate::ui::theme::Palette;

/// Cells in the probability meter.
const METER_WIDTH: usize = 10;

/// Prediction table widget.
pub struct PredictionTable;

impl PredictionTable {
    /// Render the current page into `area` and the pager into `pager_area`.
    pub fn render(frame: &mut Frame, area: Rect, pager_area: Rect, store: &Store, palette: &Palette) {
        let dashboard = &store.dashboard;
        let model = dashboard.table();
        let view = &dashboard.view;

        let header_cells = SortKey::COLUMNS.iter().enumerate().map(|(i, key)| {
            let arrow = if *key == view.sort_key { view.sort_dir.arrow() } else { "" };
            Cell::from(format!("{} {}{}", i + 1, key.label(), arrow)).style(palette.header())
        });
        let header = Row::new(header_cells).height(1).bottom_margin(1);

        let rows = model.rows.iter().map(|row| table_row(row, palette));

        let title = if view.search.trim().is_empty() {
            format!(" Predictions ({}) ", dashboard.predictions.len())
        } else {
            format!(" Predictions matching \"{}\" ", view.search.trim())
        };

        let table = Table::new(
            rows,
            [
                Constraint::Length(8),
                Constraint::Length(10),
                Constraint::Length(10),
                Constraint::Length(19),
                Constraint::Length(17),
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
                .title(title)
                .borders(Borders::ALL)
                .border_style(palette.border()),
        )
        .row_highlight_style(Style::default().bg(palette.selection_bg).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

        let mut state = TableState::default();
        if !model.rows.is_empty() {
            state.select(Some(dashboard.selected));
        }
        frame.render_stateful_widget(table, area, &mut state);

        if model.rows.is_empty() {
            render_empty(frame, area, dashboard.loading, palette);
        }
        render_pager(frame, pager_area, &model, palette);
    }
}

fn table_row<'a>(row: &DerivedRow<'_>, palette: &Palette) -> Row<'a> {
    let cells = row.cells();
    let probability = Line::from(vec![
        Span::raw(format!("{:>4} ", cells.probability)),
        Span::styled(meter(row.prediction.probability_pct), Style::default().fg(palette.accent)),
    ]);

    Row::new(vec![
        Cell::from(cells.ticker).style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(cells.price),
        Cell::from(cells.expected).style(palette.change(row.expected)),
        Cell::from(cells.estimate),
        Cell::from(probability),
        Cell::from(cells.outcome).style(palette.outcome(row.outcome)),
        Cell::from(cells.reward_to_risk),
        Cell::from(cells.signal).style(palette.signal(row.signal)),
        Cell::from(cells.date).style(palette.muted()),
    ])
}

/// Ten-cell gauge of a 0-100 probability.
pub fn meter(probability_pct: f64) -> String {
    let filled = (clamp_probability(probability_pct) / 100.0 * METER_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(METER_WIDTH - filled))
}

fn render_pager(frame: &mut Frame, area: Rect, model: &TableModel<'_>, palette: &Palette) {
    let pager = model.pager;
    let enabled = |on: bool| if on { Style::default().fg(palette.accent) } else { palette.muted() };

    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(pager.rows_info(), palette.muted()),
        Span::raw("   "),
        Span::styled("◀ Prev", enabled(pager.has_prev())),
        Span::raw("  "),
        Span::styled(pager.page_info(), Style::default().fg(palette.fg)),
        Span::raw("  "),
        Span::styled("Next ▶", enabled(pager.has_next())),
        Span::styled(format!("   {} per page (p)", pager.page_size), palette.muted()),
    ]);
    frame.render_widget(Paragraph::new(line).style(palette.base()), area);
}

fn render_empty(frame: &mut Frame, area: Rect, loading: bool, palette: &Palette) {
    let text = if loading { "Loading..." } else { "No predictions." };
    let inner = Rect {
        x: area.x + 2,
        y: area.y + 3,
        width: area.width.saturating_sub(4),
        height: 1,
    };
    if area.height > 4 {
        frame.render_widget(
            Paragraph::new(Span::styled(text, palette.muted().add_modifier(Modifier::ITALIC))),
            inner,
        );
    }
}
