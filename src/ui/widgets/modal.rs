//! Modal dialog and the ticker details body.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};

use super::prediction_table::meter;
use super::sparkline::PriceSparkline;
use crate::format;
use crate::state::{Modal, ModalContent, ModalPhase, PredictionDetails};
use crate::ui::layout::centered_rect;
use crate::ui::theme::Palette;

/// Text shown when a ticker has no predictions.
pub const NO_PREDICTIONS: &str = "No predictions for this ticker.";

pub struct ModalView;

impl ModalView {
    pub fn render(frame: &mut Frame, area: Rect, modal: &Modal, palette: &Palette) {
        let (width, height) = modal.size.percent();
        let popup = centered_rect(width, height, area);
        frame.render_widget(Clear, popup);

        let mut border = Style::default().fg(palette.accent);
        if !matches!(modal.phase, ModalPhase::Open) {
            border = border.add_modifier(Modifier::DIM);
        }
        let block = Block::default()
            .title(format!(" {} ", modal.title))
            .title_bottom(focus_line(modal, palette))
            .borders(Borders::ALL)
            .border_style(border)
            .style(palette.base());
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        match &modal.content {
            ModalContent::Text(text) => {
                frame.render_widget(
                    Paragraph::new(text.as_str()).wrap(Wrap { trim: true }),
                    inner,
                );
            }
            ModalContent::Details(details) => {
                let history_focused = modal.focused() == "History";
                render_details(frame, inner, details, history_focused, palette);
            }
        }
    }
}

/// `[ Close ]  [ History ]` with the focused control highlighted.
fn focus_line<'a>(modal: &Modal, palette: &Palette) -> Line<'a> {
    let mut spans = vec![Span::raw(" ")];
    for label in modal.focusables() {
        let style = if *label == modal.focused() {
            Style::default()
                .fg(Color::Black)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            palette.muted()
        };
        spans.push(Span::styled(format!("[ {label} ]"), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled("Tab to cycle, Esc to close ", palette.muted()));
    Line::from(spans)
}

fn render_details(
    frame: &mut Frame,
    area: Rect,
    details: &PredictionDetails,
    history_focused: bool,
    palette: &Palette,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(10),
            Constraint::Length(2),
            Constraint::Min(3),
        ])
        .split(area);

    let meta = Line::from(vec![
        Span::styled("Period ", palette.muted()),
        Span::raw(details.period.as_str()),
        Span::styled("   Interval ", palette.muted()),
        Span::raw(details.interval.as_str()),
    ]);
    frame.render_widget(Paragraph::new(meta), chunks[0]);

    PriceSparkline::render(frame, chunks[1], &details.closes(), palette);
    frame.render_widget(Paragraph::new(summary(details, palette)), chunks[2]);

    let history: Vec<_> = details.history().collect();
    if history.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                NO_PREDICTIONS,
                palette.muted().add_modifier(Modifier::ITALIC),
            )),
            chunks[3],
        );
        return;
    }

    let header = Row::new(
        ["Date", "Horizon", "Prob.", "Exp. %", "R:R", "Outcome"]
            .into_iter()
            .map(|h| Cell::from(h).style(palette.header())),
    );
    let rows = history.iter().map(|p| {
        Row::new(vec![
            Cell::from(format::date(&p.created_at)),
            Cell::from(format!("{}d", p.horizon_days)),
            Cell::from(format::pct(Some(p.probability_pct))),
            Cell::from(format::pct(p.expected_change_pct)).style(palette.change(p.expected_change())),
            Cell::from(format::ratio(p.reward_to_risk)),
            Cell::from(p.outcome.clone().unwrap_or_else(|| format::MISSING.to_string())),
        ])
    });

    let border = if history_focused {
        Style::default().fg(palette.header)
    } else {
        palette.muted()
    };
    let table = Table::new(
        rows,
        [
            Constraint::Length(17),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Min(8),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(" History ")
            .borders(Borders::ALL)
            .border_style(border),
    );
    frame.render_widget(table, chunks[3]);
}

/// Last price and headline numbers of the latest prediction.
fn summary<'a>(details: &PredictionDetails, palette: &Palette) -> Vec<Line<'a>> {
    let mut first = vec![
        Span::styled("Last price ", palette.muted()),
        Span::styled(
            format::price(details.last_price),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];

    if let Some(p) = &details.prediction {
        first.extend([
            Span::styled("   Probability ", palette.muted()),
            Span::raw(format::pct(Some(p.probability_pct))),
            Span::raw(" "),
            Span::styled(meter(p.probability_pct), Style::default().fg(palette.accent)),
        ]);
        let second = vec![
            Span::styled("Expected ", palette.muted()),
            Span::styled(format::pct(p.expected_change_pct), palette.change(p.expected_change())),
            Span::styled("   R:R ", palette.muted()),
            Span::raw(format::ratio(p.reward_to_risk)),
        ];
        return vec![Line::from(first), Line::from(second)];
    }
    vec![Line::from(first)]
}
