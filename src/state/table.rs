//! Dashboard table view-model.
//!
//! Turns raw predictions, quotes and a [`ViewState`] into the rows to show:
//! filter by ticker, derive price bands and signals, sort, then paginate.
//! Everything here is pure; persistence and rendering live elsewhere.

use std::cmp::Ordering;
use std::fmt;

use super::prediction_state::{Prediction, Quotes};
use super::view_state::{SortDir, SortKey, ViewState};
use crate::format;

/// Minimum half-width of the estimated price band, as a fraction of price.
const MIN_BAND_FRACTION: f64 = 0.015;
/// Share of the expected move used as band half-width.
const MOVE_BAND_SHARE: f64 = 0.20;

/// Buy/Hold/Sell classification of a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Buy,
    Hold,
    Sell,
}

impl Signal {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "Buy",
            Self::Hold => "Hold",
            Self::Sell => "Sell",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a prediction. Buy is checked before Sell; bounds are inclusive.
pub fn decide_signal(probability_pct: f64, expected_change_pct: f64, reward_to_risk: f64) -> Signal {
    if probability_pct >= 75.0 && expected_change_pct >= 1.0 && reward_to_risk >= 1.15 {
        Signal::Buy
    } else if expected_change_pct <= -1.0 && probability_pct >= 60.0 {
        Signal::Sell
    } else {
        Signal::Hold
    }
}

/// Resolution of a prediction as shown in the outcome badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Loss,
    Breakeven,
    Win,
}

impl Outcome {
    /// Sort rank: loss < pending < win.
    pub fn rank(self) -> u8 {
        match self {
            Self::Loss => 0,
            Self::Breakeven => 1,
            Self::Win => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loss => "Loss",
            Self::Breakeven => "Breakeven",
            Self::Win => "Win",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a raw server outcome to its badge. Anything but win/loss is Breakeven.
pub fn outcome_badge(outcome: Option<&str>) -> Outcome {
    match outcome {
        Some("win") => Outcome::Win,
        Some("loss") => Outcome::Loss,
        _ => Outcome::Breakeven,
    }
}

/// A prediction joined with its quote plus client-computed fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedRow<'a> {
    pub prediction: &'a Prediction,
    pub price: Option<f64>,
    pub expected: f64,
    pub est_mid: Option<f64>,
    pub est_low: Option<f64>,
    pub est_high: Option<f64>,
    pub signal: Signal,
    pub outcome: Outcome,
}

impl<'a> DerivedRow<'a> {
    pub fn derive(prediction: &'a Prediction, quotes: &Quotes) -> Self {
        let price = quotes.get(&prediction.ticker).copied();
        let expected = prediction.expected_change();
        let est_mid = price.map(|p| p * (1.0 + expected / 100.0));
        let band = price.map(|p| (p * MIN_BAND_FRACTION).max(expected.abs() / 100.0 * p * MOVE_BAND_SHARE));
        let (est_low, est_high) = match (est_mid, band) {
            (Some(mid), Some(band)) => (Some(mid - band), Some(mid + band)),
            _ => (None, None),
        };

        Self {
            prediction,
            price,
            expected,
            est_mid,
            est_low,
            est_high,
            signal: decide_signal(prediction.probability_pct, expected, prediction.reward_to_risk),
            outcome: outcome_badge(prediction.outcome.as_deref()),
        }
    }

    pub fn outcome_rank(&self) -> u8 {
        self.outcome.rank()
    }

    /// Display strings for every column.
    pub fn cells(&self) -> RowCells {
        let p = self.prediction;
        RowCells {
            ticker: p.ticker.clone(),
            price: format::price(self.price),
            expected: format::signed_pct(Some(self.expected)),
            estimate: format::band(self.est_low, self.est_high),
            probability: probability_pill(p.probability_pct),
            outcome: self.outcome.as_str().to_string(),
            reward_to_risk: format::ratio(p.reward_to_risk),
            signal: self.signal.as_str().to_string(),
            date: format::date(&p.created_at),
        }
    }
}

/// Formatted table cells for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowCells {
    pub ticker: String,
    pub price: String,
    pub expected: String,
    pub estimate: String,
    pub probability: String,
    pub outcome: String,
    pub reward_to_risk: String,
    pub signal: String,
    pub date: String,
}

/// Probability clamped to 0-100, for meters.
pub fn clamp_probability(pct: f64) -> f64 {
    if pct.is_nan() { 0.0 } else { pct.clamp(0.0, 100.0) }
}

/// Rounded percentage label for the probability pill.
pub fn probability_pill(pct: f64) -> String {
    format!("{}%", clamp_probability(pct).round() as i64)
}

/// Keep rows whose ticker contains `search`, ignoring case. Empty passes all.
pub fn filter_rows<'a>(rows: &'a [Prediction], search: &str) -> Vec<&'a Prediction> {
    let needle = search.trim().to_uppercase();
    rows.iter()
        .filter(|p| needle.is_empty() || p.ticker.to_uppercase().contains(&needle))
        .collect()
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn timestamp_key(row: &DerivedRow<'_>) -> i64 {
    row.prediction
        .created_at()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(i64::MIN)
}

/// Stable sort by `key`. Missing prices sort as negative infinity; unknown
/// keys leave the order untouched.
pub fn sort_rows(rows: &mut [DerivedRow<'_>], key: &SortKey, dir: SortDir) {
    let compare: fn(&DerivedRow<'_>, &DerivedRow<'_>) -> Ordering = match key {
        SortKey::Ticker => |a, b| a.prediction.ticker.cmp(&b.prediction.ticker),
        SortKey::Price => |a, b| {
            cmp_f64(
                a.price.unwrap_or(f64::NEG_INFINITY),
                b.price.unwrap_or(f64::NEG_INFINITY),
            )
        },
        SortKey::Prediction => |a, b| cmp_f64(a.expected, b.expected),
        SortKey::EstPrice => |a, b| {
            cmp_f64(
                a.est_mid.unwrap_or(f64::NEG_INFINITY),
                b.est_mid.unwrap_or(f64::NEG_INFINITY),
            )
        },
        SortKey::Probability => {
            |a, b| cmp_f64(a.prediction.probability_pct, b.prediction.probability_pct)
        }
        SortKey::Outcome => |a, b| a.outcome_rank().cmp(&b.outcome_rank()),
        SortKey::Rr => |a, b| cmp_f64(a.prediction.reward_to_risk, b.prediction.reward_to_risk),
        SortKey::Signal => |a, b| a.signal.as_str().cmp(b.signal.as_str()),
        SortKey::Date => |a, b| timestamp_key(a).cmp(&timestamp_key(b)),
        SortKey::Unknown(_) => return,
    };

    match dir {
        SortDir::Asc => rows.sort_by(compare),
        SortDir::Desc => rows.sort_by(|a, b| compare(a, b).reverse()),
    }
}

/// Rows of 1-based `page`, clamped to the last page that exists.
pub fn page_slice<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    let pager = Pager::new(rows.len(), page, page_size);
    &rows[pager.start_index..pager.end_index]
}

/// Pagination summary for a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    /// Clamped 1-based page.
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total: usize,
    /// Zero-based slice bounds.
    pub start_index: usize,
    pub end_index: usize,
}

impl Pager {
    pub fn new(total: usize, page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total.div_ceil(page_size).max(1);
        let page = page.clamp(1, total_pages);
        let start_index = ((page - 1) * page_size).min(total);
        let end_index = (page * page_size).min(total);
        Self {
            page,
            page_size,
            total_pages,
            total,
            start_index,
            end_index,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// "Showing a–b of n", with a = 0 for an empty set.
    pub fn rows_info(&self) -> String {
        let first = if self.total == 0 { 0 } else { self.start_index + 1 };
        format!("Showing {}–{} of {}", first, self.end_index, self.total)
    }

    pub fn page_info(&self) -> String {
        format!("Page {} / {}", self.page, self.total_pages)
    }
}

/// Aggregates over the full, unfiltered prediction list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Kpis {
    pub count: usize,
    pub mean_probability: Option<f64>,
    pub mean_reward_to_risk: Option<f64>,
    pub buy: usize,
    pub hold: usize,
    pub sell: usize,
}

impl Kpis {
    pub fn from_predictions(predictions: &[Prediction]) -> Self {
        let count = predictions.len();
        let mean = |f: fn(&Prediction) -> f64| {
            (count > 0).then(|| predictions.iter().map(f).sum::<f64>() / count as f64)
        };

        let mut kpis = Self {
            count,
            mean_probability: mean(|p| p.probability_pct),
            mean_reward_to_risk: mean(|p| p.reward_to_risk),
            ..Default::default()
        };
        for p in predictions {
            match decide_signal(p.probability_pct, p.expected_change(), p.reward_to_risk) {
                Signal::Buy => kpis.buy += 1,
                Signal::Hold => kpis.hold += 1,
                Signal::Sell => kpis.sell += 1,
            }
        }
        kpis
    }
}

/// The page of rows to render plus its pager.
#[derive(Debug, Clone)]
pub struct TableModel<'a> {
    pub rows: Vec<DerivedRow<'a>>,
    pub pager: Pager,
}

impl<'a> TableModel<'a> {
    /// Run filter, derive, sort and paginate in that order.
    pub fn build(predictions: &'a [Prediction], quotes: &Quotes, view: &ViewState) -> Self {
        let mut rows: Vec<DerivedRow<'a>> = filter_rows(predictions, &view.search)
            .into_iter()
            .map(|p| DerivedRow::derive(p, quotes))
            .collect();
        sort_rows(&mut rows, &view.sort_key, view.sort_dir);

        let pager = Pager::new(rows.len(), view.page, view.page_size);
        rows.truncate(pager.end_index);
        rows.drain(..pager.start_index);
        Self { rows, pager }
    }
}

/// Number of rows passing the search filter.
pub fn filtered_count(predictions: &[Prediction], search: &str) -> usize {
    filter_rows(predictions, search).len()
}
