//! Search and new-prediction inputs.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
};

use crate::state::{Focus, InputField, Store};
use crate::ui::theme::Palette;

pub struct InputBar;

impl InputBar {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, palette: &Palette) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(50),
                Constraint::Percentage(30),
                Constraint::Percentage(20),
            ])
            .split(area);

        let dashboard = &store.dashboard;
        let focus = store.app.focus;
        render_field(frame, chunks[0], " / Search ", &dashboard.search, focus == Focus::Search, palette);
        render_field(frame, chunks[1], " n Ticker ", &dashboard.ticker, focus == Focus::Ticker, palette);
        render_field(frame, chunks[2], " Horizon (d) ", &dashboard.horizon, focus == Focus::Horizon, palette);
    }
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    field: &InputField,
    focused: bool,
    palette: &Palette,
) {
    let border = if focused {
        Style::default().fg(palette.header)
    } else {
        palette.muted()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border);
    let inner = block.inner(area);

    frame.render_widget(
        Paragraph::new(field.value()).style(palette.base()).block(block),
        area,
    );

    if focused && inner.width > 0 {
        let offset = (field.cursor() as u16).min(inner.width - 1);
        frame.set_cursor_position(Position::new(inner.x + offset, inner.y));
    }
}
