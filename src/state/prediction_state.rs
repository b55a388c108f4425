//! Prediction records and market data served by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Latest price per uppercase ticker. Tickers without a quote are absent.
pub type Quotes = HashMap<String, f64>;

/// A server-issued forecast for a ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Server row ID.
    #[serde(default)]
    pub id: Option<i64>,
    /// Uppercase symbol. Not unique: history is kept per ticker.
    pub ticker: String,
    /// Forecast horizon in days.
    pub horizon_days: u32,
    /// Probability of the forecast move, 0-100.
    pub probability_pct: f64,
    /// Signed expected change in percent.
    #[serde(default)]
    pub expected_change_pct: Option<f64>,
    /// Potential gain versus potential loss.
    pub reward_to_risk: f64,
    /// `win`, `loss`, or anything else for pending/breakeven.
    #[serde(default)]
    pub outcome: Option<String>,
    /// Short model explanation.
    #[serde(default)]
    pub rationale: Option<String>,
    /// Creation timestamp as sent by the server.
    #[serde(default)]
    pub created_at: String,
}

impl Prediction {
    /// Expected change with a missing value treated as zero.
    pub fn expected_change(&self) -> f64 {
        self.expected_change_pct.unwrap_or(0.0)
    }

    /// Parsed creation time.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        crate::format::parse_timestamp(&self.created_at)
    }
}

/// One OHLCV bar of price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub open: f64,
    #[serde(default)]
    pub high: f64,
    #[serde(default)]
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

/// Price history and prediction history for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionDetails {
    pub ticker: String,
    pub period: String,
    pub interval: String,
    #[serde(default)]
    pub last_price: Option<f64>,
    #[serde(default)]
    pub candles: Vec<Candle>,
    /// Most recent prediction for the ticker.
    #[serde(default)]
    pub prediction: Option<Prediction>,
    /// Older predictions, newest first.
    #[serde(default)]
    pub previous: Vec<Prediction>,
}

impl PredictionDetails {
    /// Closing prices in chronological order.
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    /// Latest prediction followed by the previous ones.
    pub fn history(&self) -> impl Iterator<Item = &Prediction> {
        self.prediction.iter().chain(self.previous.iter())
    }
}

/// Query parameters for the details endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsQuery {
    pub period: String,
    pub interval: String,
    pub limit: u32,
}

impl Default for DetailsQuery {
    fn default() -> Self {
        Self {
            period: "6mo".to_string(),
            interval: "1d".to_string(),
            limit: 12,
        }
    }
}

/// Rows shown by the fast-trade view.
#[derive(Debug, Default)]
pub struct FastViewState {
    /// First predictions from the latest poll.
    pub predictions: Vec<Prediction>,
    /// Quotes for those predictions.
    pub quotes: Quotes,
    /// Whether the poller is running.
    pub running: bool,
    /// Last successful load.
    pub last_updated: Option<DateTime<Utc>>,
}
