//! Dashboard data and controls.

use chrono::{DateTime, Utc};

use super::app_state::InputField;
use super::prediction_state::{Prediction, Quotes};
use super::table::{Kpis, TableModel, filtered_count};
use super::view_state::ViewState;
use crate::error::{Error, Result};

/// Horizon used when the horizon field is empty or not a number.
pub const DEFAULT_HORIZON_DAYS: u32 = 7;

/// Validated input for creating a prediction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRequest {
    pub ticker: String,
    pub horizon_days: u32,
}

impl PredictionRequest {
    /// Uppercase the ticker and parse the horizon, defaulting to 7 days.
    pub fn parse(ticker: &str, horizon: &str) -> Result<Self> {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(Error::invalid_input("Ticker required"));
        }
        Ok(Self {
            ticker,
            horizon_days: parse_horizon(horizon),
        })
    }
}

/// Leading digits of the field, so `"14d"` reads as 14. Anything without
/// leading digits (including a minus sign) falls back to the default.
fn parse_horizon(raw: &str) -> u32 {
    let raw = raw.trim_start();
    let end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    raw[..end].parse().unwrap_or(DEFAULT_HORIZON_DAYS)
}

/// State behind the dashboard view.
#[derive(Debug)]
pub struct DashboardState {
    /// Every prediction from the last refresh, unfiltered.
    pub predictions: Vec<Prediction>,
    /// Latest quotes for those predictions.
    pub quotes: Quotes,
    /// Aggregates over `predictions`.
    pub kpis: Kpis,
    /// Persisted sort/search/page preferences.
    pub view: ViewState,
    /// Search field; mirrored into `view.search` on every edit.
    pub search: InputField,
    /// New-prediction ticker field.
    pub ticker: InputField,
    /// New-prediction horizon field.
    pub horizon: InputField,
    /// Selected row within the current page.
    pub selected: usize,
    /// Whether a refresh is in flight.
    pub loading: bool,
    /// Last completed refresh.
    pub last_updated: Option<DateTime<Utc>>,
    /// Latest refresh generation handed out.
    generation: u64,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(ViewState::default())
    }
}

impl DashboardState {
    pub fn new(view: ViewState) -> Self {
        Self {
            predictions: Vec::new(),
            quotes: Quotes::new(),
            kpis: Kpis::default(),
            search: InputField::new(view.search.clone()),
            ticker: InputField::default(),
            horizon: InputField::new(DEFAULT_HORIZON_DAYS.to_string()),
            view,
            selected: 0,
            loading: false,
            last_updated: None,
            generation: 0,
        }
    }

    /// Start a refresh and return its generation.
    pub fn begin_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.generation
    }

    /// Latest generation handed out by [`Self::begin_refresh`].
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether results tagged with `generation` are still wanted.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Store the prediction list of a refresh. Stale generations are ignored.
    pub fn apply_predictions(&mut self, generation: u64, predictions: Vec<Prediction>) -> bool {
        if !self.is_current(generation) {
            tracing::warn!(generation, latest = self.generation, "Discarding stale predictions");
            return false;
        }
        self.kpis = Kpis::from_predictions(&predictions);
        self.predictions = predictions;
        self.clamp_page();
        true
    }

    /// Store quotes and finish a refresh, resetting to the first page.
    pub fn apply_quotes(&mut self, generation: u64, quotes: Quotes) -> bool {
        if !self.is_current(generation) {
            tracing::warn!(generation, latest = self.generation, "Discarding stale quotes");
            return false;
        }
        self.quotes = quotes;
        self.view.page = 1;
        self.selected = 0;
        self.loading = false;
        self.last_updated = Some(Utc::now());
        true
    }

    /// Mark a refresh as failed.
    pub fn fail_refresh(&mut self, generation: u64) {
        if self.is_current(generation) {
            self.loading = false;
        }
    }

    /// Copy the search field into the view state.
    pub fn sync_search(&mut self) {
        self.view.search = self.search.value().to_string();
        self.clamp_page();
    }

    /// Keep `view.page` inside the filtered result set.
    pub fn clamp_page(&mut self) {
        let total = filtered_count(&self.predictions, &self.view.search);
        self.view.clamp_page(total);
        self.clamp_selection();
    }

    /// The rows to render.
    pub fn table(&self) -> TableModel<'_> {
        TableModel::build(&self.predictions, &self.quotes, &self.view)
    }

    pub fn selected_prediction(&self) -> Option<&Prediction> {
        self.table().rows.get(self.selected).map(|row| row.prediction)
    }

    pub fn select_next(&mut self) {
        self.selected += 1;
        self.clamp_selection();
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.table().rows.len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let rows = self.table().rows.len();
        self.selected = self.selected.min(rows.saturating_sub(1));
    }

    /// Validated request from the ticker and horizon fields.
    pub fn prediction_request(&self) -> Result<PredictionRequest> {
        PredictionRequest::parse(self.ticker.value(), self.horizon.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SortKey;
    use pretty_assertions::assert_eq;

    fn prediction(ticker: &str) -> Prediction {
        Prediction {
            id: None,
            ticker: ticker.to_string(),
            horizon_days: 7,
            probability_pct: 50.0,
            expected_change_pct: Some(0.5),
            reward_to_risk: 1.0,
            outcome: None,
            rationale: None,
            created_at: String::new(),
        }
    }

    #[test]
    fn test_prediction_request_parsing() {
        assert_eq!(
            PredictionRequest::parse("  aapl ", "14").unwrap(),
            PredictionRequest {
                ticker: "AAPL".into(),
                horizon_days: 14
            }
        );
        assert_eq!(PredictionRequest::parse("msft", "soon").unwrap().horizon_days, 7);
        assert_eq!(PredictionRequest::parse("msft", "").unwrap().horizon_days, 7);
        let err = PredictionRequest::parse("   ", "7").unwrap_err();
        assert_eq!(err.to_string(), "Ticker required");
    }

    #[test]
    fn test_horizon_reads_leading_digits() {
        assert_eq!(parse_horizon("14d"), 14);
        assert_eq!(parse_horizon("  30 days"), 30);
        assert_eq!(parse_horizon("-3"), DEFAULT_HORIZON_DAYS);
        assert_eq!(parse_horizon("d14"), DEFAULT_HORIZON_DAYS);
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let mut state = DashboardState::default();
        let first = state.begin_refresh();
        let second = state.begin_refresh();

        assert!(!state.apply_predictions(first, vec![prediction("OLD")]));
        assert!(state.apply_predictions(second, vec![prediction("NEW")]));
        assert!(!state.apply_quotes(first, Quotes::from([("OLD".to_string(), 1.0)])));
        assert!(state.loading);

        assert!(state.apply_quotes(second, Quotes::new()));
        assert!(!state.loading);
        assert_eq!(state.predictions[0].ticker, "NEW");
        assert_eq!(state.kpis.count, 1);
    }

    #[test]
    fn test_quotes_reset_page() {
        let mut state = DashboardState::default();
        let generation = state.begin_refresh();
        state.apply_predictions(generation, (0..40).map(|i| prediction(&format!("T{i:02}"))).collect());
        state.view.page = 2;
        state.apply_quotes(generation, Quotes::new());
        assert_eq!(state.view.page, 1);
    }

    #[test]
    fn test_search_shrink_clamps_page_and_selection() {
        let mut state = DashboardState::default();
        let generation = state.begin_refresh();
        let mut rows: Vec<Prediction> = (0..40).map(|i| prediction(&format!("ZZ{i:02}"))).collect();
        rows.push(prediction("AAPL"));
        state.apply_predictions(generation, rows);
        state.view.page = 3;
        state.selected = 9;

        for c in "aap".chars() {
            state.search.push_char(c);
        }
        state.sync_search();
        assert_eq!(state.view.search, "aap");
        assert_eq!(state.view.page, 1);
        assert_eq!(state.selected, 0);
        assert_eq!(state.selected_prediction().unwrap().ticker, "AAPL");
    }

    #[test]
    fn test_selection_follows_sorted_page() {
        let mut state = DashboardState::default();
        let generation = state.begin_refresh();
        state.apply_predictions(generation, vec![prediction("B"), prediction("A"), prediction("C")]);
        state.view.sort_by(SortKey::Ticker);
        state.select_last();
        assert_eq!(state.selected_prediction().unwrap().ticker, "A");
        state.select_first();
        assert_eq!(state.selected_prediction().unwrap().ticker, "C");
    }
}
