//! Price sparkline drawn on a braille canvas.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Modifier,
    symbols::Marker,
    widgets::{
        Block, Borders, Paragraph,
        canvas::{Canvas, Line as CanvasLine},
    },
};

use crate::chart::{CHART_HEIGHT, CHART_WIDTH, ChartModel, LinePlot, Trend};
use crate::ui::theme::Palette;

pub struct PriceSparkline;

impl PriceSparkline {
    pub fn render(frame: &mut Frame, area: Rect, closes: &[f64], palette: &Palette) {
        let block = Block::default()
            .title(" Price ")
            .borders(Borders::ALL)
            .border_style(palette.muted());

        match ChartModel::from_samples(closes, CHART_WIDTH, CHART_HEIGHT) {
            ChartModel::InsufficientData => {
                let placeholder = Paragraph::new(ChartModel::PLACEHOLDER)
                    .alignment(Alignment::Center)
                    .style(palette.muted().add_modifier(Modifier::ITALIC))
                    .block(block);
                frame.render_widget(placeholder, area);
            }
            ChartModel::Line(plot) => {
                frame.render_widget(line_canvas(&plot, palette, block), area);
            }
        }
    }
}

fn line_canvas<'a>(
    plot: &'a LinePlot,
    palette: &Palette,
    block: Block<'a>,
) -> Canvas<'a, impl Fn(&mut ratatui::widgets::canvas::Context<'_>) + 'a> {
    let (color, fill) = match plot.trend {
        Trend::Up => (palette.up, palette.up_fill),
        Trend::Down => (palette.down, palette.down_fill),
    };
    let height = plot.height;

    // Chart geometry grows downwards; the canvas grows upwards.
    Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, plot.width])
        .y_bounds([0.0, height])
        .paint(move |ctx| {
            for &(x, y) in &plot.points {
                ctx.draw(&CanvasLine {
                    x1: x,
                    y1: height - plot.baseline,
                    x2: x,
                    y2: height - y,
                    color: fill,
                });
            }
            ctx.layer();
            for pair in plot.points.windows(2) {
                let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
                ctx.draw(&CanvasLine {
                    x1,
                    y1: height - y1,
                    x2,
                    y2: height - y2,
                    color,
                });
            }
        })
}

