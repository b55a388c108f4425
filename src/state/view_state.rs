//! Persisted sort, search and pagination preferences.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::storage::KeyValueStore;

/// Storage key for [`ViewState`].
pub const PREFS_KEY: &str = "dashPrefs_v1";

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZES: [usize; 4] = [10, 15, 25, 50];

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// Column the dashboard table is sorted by.
///
/// Unknown keys read from storage are kept verbatim and leave rows in
/// their original order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortKey {
    #[default]
    Ticker,
    Price,
    Prediction,
    EstPrice,
    Probability,
    Outcome,
    Rr,
    Signal,
    Date,
    Unknown(String),
}

impl SortKey {
    /// Sortable columns in display order.
    pub const COLUMNS: [SortKey; 9] = [
        SortKey::Ticker,
        SortKey::Price,
        SortKey::Prediction,
        SortKey::EstPrice,
        SortKey::Probability,
        SortKey::Outcome,
        SortKey::Rr,
        SortKey::Signal,
        SortKey::Date,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Ticker => "ticker",
            Self::Price => "price",
            Self::Prediction => "prediction",
            Self::EstPrice => "estprice",
            Self::Probability => "probability",
            Self::Outcome => "outcome",
            Self::Rr => "rr",
            Self::Signal => "signal",
            Self::Date => "date",
            Self::Unknown(key) => key,
        }
    }

    /// Column header text.
    pub fn label(&self) -> &str {
        match self {
            Self::Ticker => "Ticker",
            Self::Price => "Price",
            Self::Prediction => "Exp.",
            Self::EstPrice => "Est. price",
            Self::Probability => "Prob.",
            Self::Outcome => "Outcome",
            Self::Rr => "R:R",
            Self::Signal => "Signal",
            Self::Date => "Date",
            Self::Unknown(key) => key,
        }
    }

    /// Column for a 1-based shortcut digit.
    pub fn from_digit(digit: char) -> Option<Self> {
        let index = digit.to_digit(10)? as usize;
        index
            .checked_sub(1)
            .and_then(|i| Self::COLUMNS.get(i))
            .cloned()
    }
}

impl From<String> for SortKey {
    fn from(key: String) -> Self {
        match key.as_str() {
            "ticker" => Self::Ticker,
            "price" => Self::Price,
            "prediction" => Self::Prediction,
            "estprice" => Self::EstPrice,
            "probability" => Self::Probability,
            "outcome" => Self::Outcome,
            "rr" => Self::Rr,
            "signal" => Self::Signal,
            "date" => Self::Date,
            _ => Self::Unknown(key),
        }
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.as_str().to_string()
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

/// Client-local view preferences, persisted under [`PREFS_KEY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewState {
    pub sort_key: SortKey,
    pub sort_dir: SortDir,
    pub page_size: usize,
    pub search: String,
    /// 1-based page number.
    pub page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            sort_key: SortKey::Ticker,
            sort_dir: SortDir::Asc,
            page_size: DEFAULT_PAGE_SIZE,
            search: String::new(),
            page: 1,
        }
    }
}

impl ViewState {
    /// Load from storage, applying defaults for missing or invalid fields.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let mut state = match store.get(PREFS_KEY) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("Discarding unreadable view preferences: {}", e);
                Self::default()
            }),
            None => Self::default(),
        };
        if state.page_size == 0 {
            state.page_size = DEFAULT_PAGE_SIZE;
        }
        state.page = state.page.max(1);
        state
    }

    /// Write to storage.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        store.set(PREFS_KEY, serde_json::to_string(self)?)
    }

    /// Sort by `key`; re-selecting the active key flips the direction.
    pub fn sort_by(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.sort_dir = self.sort_dir.toggled();
        } else {
            self.sort_key = key;
            self.sort_dir = SortDir::Asc;
        }
        self.page = 1;
    }

    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Advance one page. The pager clamps overshoot on the next render.
    pub fn next_page(&mut self) {
        self.page += 1;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        self.page = 1;
    }

    /// Switch to the next entry of [`PAGE_SIZES`].
    pub fn cycle_page_size(&mut self) {
        let next = PAGE_SIZES
            .iter()
            .position(|&s| s == self.page_size)
            .map(|i| PAGE_SIZES[(i + 1) % PAGE_SIZES.len()])
            .unwrap_or(DEFAULT_PAGE_SIZE);
        self.set_page_size(next);
    }

    /// Total pages for `total` rows; never less than one.
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size.max(1)).max(1)
    }

    /// Clamp `page` into `[1, total_pages]`.
    pub fn clamp_page(&mut self, total: usize) {
        self.page = self.page.clamp(1, self.total_pages(total));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_defaults_when_missing() {
        let store = MemoryStore::new();
        assert_eq!(ViewState::load(&store), ViewState::default());
    }

    #[test]
    fn test_load_merges_partial_prefs() {
        let mut store = MemoryStore::new();
        store
            .set(PREFS_KEY, r#"{"sortKey":"rr","sortDir":"desc"}"#.to_string())
            .unwrap();
        let state = ViewState::load(&store);
        assert_eq!(state.sort_key, SortKey::Rr);
        assert_eq!(state.sort_dir, SortDir::Desc);
        assert_eq!(state.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_load_recovers_from_garbage_and_zero_page_size() {
        let mut store = MemoryStore::new();
        store.set(PREFS_KEY, "{not json".to_string()).unwrap();
        assert_eq!(ViewState::load(&store), ViewState::default());

        store
            .set(PREFS_KEY, r#"{"pageSize":0,"page":0}"#.to_string())
            .unwrap();
        let state = ViewState::load(&store);
        assert_eq!(state.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_save_uses_camel_case_keys() {
        let mut store = MemoryStore::new();
        let state = ViewState {
            sort_key: SortKey::EstPrice,
            sort_dir: SortDir::Desc,
            page_size: 25,
            search: "aa".to_string(),
            page: 3,
        };
        state.save(&mut store).unwrap();

        let raw: serde_json::Value = serde_json::from_str(&store.get(PREFS_KEY).unwrap()).unwrap();
        assert_eq!(
            raw,
            serde_json::json!({
                "sortKey": "estprice",
                "sortDir": "desc",
                "pageSize": 25,
                "search": "aa",
                "page": 3
            })
        );
        assert_eq!(ViewState::load(&store), state);
    }

    #[test]
    fn test_unknown_sort_key_round_trips() {
        let mut store = MemoryStore::new();
        store
            .set(PREFS_KEY, r#"{"sortKey":"volume"}"#.to_string())
            .unwrap();
        let state = ViewState::load(&store);
        assert_eq!(state.sort_key, SortKey::Unknown("volume".to_string()));
        assert_eq!(state.sort_key.as_str(), "volume");
    }

    #[test]
    fn test_sort_by_toggles_and_resets_page() {
        let mut state = ViewState {
            page: 4,
            ..Default::default()
        };
        state.sort_by(SortKey::Ticker);
        assert_eq!(state.sort_dir, SortDir::Desc);
        assert_eq!(state.page, 1);

        state.page = 2;
        state.sort_by(SortKey::Date);
        assert_eq!(state.sort_key, SortKey::Date);
        assert_eq!(state.sort_dir, SortDir::Asc);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_paging_bounds() {
        let mut state = ViewState::default();
        state.prev_page();
        assert_eq!(state.page, 1);

        state.next_page();
        state.next_page();
        state.clamp_page(20);
        assert_eq!(state.page, 2);

        state.clamp_page(0);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_cycle_page_size() {
        let mut state = ViewState::default();
        state.page = 3;
        state.cycle_page_size();
        assert_eq!(state.page_size, 25);
        assert_eq!(state.page, 1);
        state.cycle_page_size();
        state.cycle_page_size();
        assert_eq!(state.page_size, 10);

        state.page_size = 7;
        state.cycle_page_size();
        assert_eq!(state.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_sort_key_from_digit() {
        assert_eq!(SortKey::from_digit('1'), Some(SortKey::Ticker));
        assert_eq!(SortKey::from_digit('9'), Some(SortKey::Date));
        assert_eq!(SortKey::from_digit('0'), None);
    }
}
