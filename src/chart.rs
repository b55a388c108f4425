//! Sparkline geometry for closing-price series.
//!
//! Pure layout math; the canvas widget in `ui::widgets::sparkline` only
//! draws what [`ChartModel`] computes.

/// Default drawing surface width.
pub const CHART_WIDTH: f64 = 300.0;
/// Default drawing surface height.
pub const CHART_HEIGHT: f64 = 120.0;

const PAD_TOP: f64 = 8.0;
const PAD_BOTTOM: f64 = 14.0;
const PAD_X: f64 = 8.0;

/// Direction of a series, from its first to its last sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

/// A plotted line. `y` grows downwards, as on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePlot {
    pub width: f64,
    pub height: f64,
    pub points: Vec<(f64, f64)>,
    pub trend: Trend,
    /// Bottom edge the area fill closes against.
    pub baseline: f64,
}

impl LinePlot {
    /// Closed outline of the filled area under the line.
    pub fn area(&self) -> Vec<(f64, f64)> {
        let mut area = self.points.clone();
        if let (Some(&(first_x, _)), Some(&(last_x, _))) = (self.points.first(), self.points.last())
        {
            area.push((last_x, self.baseline));
            area.push((first_x, self.baseline));
        }
        area
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartModel {
    /// Fewer than two samples.
    InsufficientData,
    Line(LinePlot),
}

impl ChartModel {
    pub const PLACEHOLDER: &'static str = "Not enough data";

    pub fn from_samples(samples: &[f64], width: f64, height: f64) -> Self {
        let (Some(&first), Some(&last)) = (samples.first(), samples.last()) else {
            return Self::InsufficientData;
        };
        if samples.len() < 2 {
            return Self::InsufficientData;
        }

        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = if max - min == 0.0 { 1.0 } else { max - min };

        let inner_w = width - 2.0 * PAD_X;
        let inner_h = height - PAD_TOP - PAD_BOTTOM;
        let step = inner_w / (samples.len() - 1) as f64;

        let points = samples
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let x = PAD_X + i as f64 * step;
                let y = PAD_TOP + (1.0 - (v - min) / range) * inner_h;
                (x, y)
            })
            .collect();

        Self::Line(LinePlot {
            width,
            height,
            points,
            trend: if last >= first { Trend::Up } else { Trend::Down },
            baseline: height - PAD_BOTTOM,
        })
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::InsufficientData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn line(samples: &[f64]) -> LinePlot {
        match ChartModel::from_samples(samples, CHART_WIDTH, CHART_HEIGHT) {
            ChartModel::Line(plot) => plot,
            ChartModel::InsufficientData => panic!("expected a line"),
        }
    }

    #[test]
    fn test_too_few_samples_is_placeholder() {
        assert!(ChartModel::from_samples(&[], CHART_WIDTH, CHART_HEIGHT).is_placeholder());
        assert!(ChartModel::from_samples(&[1.0], CHART_WIDTH, CHART_HEIGHT).is_placeholder());
        assert!(!ChartModel::from_samples(&[1.0, 2.0], CHART_WIDTH, CHART_HEIGHT).is_placeholder());
    }

    #[test]
    fn test_points_span_padded_box() {
        let plot = line(&[10.0, 20.0, 15.0]);
        assert_eq!(plot.points.len(), 3);
        assert_eq!(plot.points[0], (8.0, 106.0));
        assert_eq!(plot.points[1], (150.0, 8.0));
        assert_eq!(plot.points[2], (292.0, 57.0));
        assert_eq!(plot.baseline, 106.0);
    }

    #[test]
    fn test_flat_series_does_not_divide_by_zero() {
        let plot = line(&[5.0, 5.0, 5.0]);
        assert!(plot.points.iter().all(|&(x, y)| x.is_finite() && y.is_finite()));
        assert_eq!(plot.trend, Trend::Up);
    }

    #[test]
    fn test_trend_from_endpoints() {
        assert_eq!(line(&[1.0, 3.0, 2.0]).trend, Trend::Up);
        assert_eq!(line(&[3.0, 1.0, 2.0]).trend, Trend::Down);
    }

    #[test]
    fn test_area_closes_on_baseline() {
        let plot = line(&[1.0, 2.0]);
        let area = plot.area();
        assert_eq!(area.len(), 4);
        assert_eq!(area[2], (292.0, 106.0));
        assert_eq!(area[3], (8.0, 106.0));
    }
}
