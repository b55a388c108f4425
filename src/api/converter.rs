//! Wire types and conversion of API responses.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::state::Quotes;

/// Body of `POST /api/predictions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePredictionBody<'a> {
    pub ticker: &'a str,
    pub horizon_days: u32,
}

/// Response of `GET /api/market/quotes`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuotesResponse {
    #[serde(default)]
    pub quotes: Vec<QuoteEntry>,
}

/// One entry of [`QuotesResponse`].
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteEntry {
    pub ticker: String,
    #[serde(default)]
    pub price: Option<f64>,
}

/// Converts API responses to internal state types.
pub struct DataConverter;

impl DataConverter {
    /// Ticker → price map. Entries without a price are left out.
    pub fn convert_quotes(response: QuotesResponse) -> Quotes {
        response
            .quotes
            .into_iter()
            .filter_map(|q| q.price.map(|price| (q.ticker.to_uppercase(), price)))
            .collect()
    }

    /// Uppercase and de-duplicate tickers, keeping first-seen order.
    pub fn normalize_tickers<I, S>(tickers: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        tickers
            .into_iter()
            .map(|t| t.as_ref().trim().to_uppercase())
            .filter(|t| !t.is_empty() && seen.insert(t.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_tickers() {
        assert_eq!(
            DataConverter::normalize_tickers(["aapl", "AAPL", " msft", ""]),
            vec!["AAPL".to_string(), "MSFT".to_string()]
        );
        assert!(DataConverter::normalize_tickers(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_convert_quotes_skips_missing_prices() {
        let response: QuotesResponse = serde_json::from_str(
            r#"{"quotes":[{"ticker":"AAPL","price":150.5},{"ticker":"ZZZ","price":null}]}"#,
        )
        .unwrap();
        let quotes = DataConverter::convert_quotes(response);
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes.get("AAPL"), Some(&150.5));
    }
}
