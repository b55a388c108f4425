//! Configuration settings for Predscope.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::state::Theme;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "PREDSCOPE";

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API configuration.
    pub api: ApiConfig,
    /// UI configuration.
    pub ui: UiConfig,
    /// Key bindings.
    pub keybindings: KeyBindings,
    /// Theme configuration.
    pub theme: ThemeConfig,
}

impl Config {
    /// Load configuration from file, returning default if file doesn't exist.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load(None)
    }

    /// Load configuration layered as defaults, then `config.toml`, then
    /// `PREDSCOPE_*` environment variables (`__` separates sections).
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(default_config_path);

        let defaults = config::Config::try_from(&Self::default())
            .map_err(|e| crate::Error::config(e.to_string()))?;

        config::Config::builder()
            .add_source(defaults)
            .add_source(
                config::File::from(config_path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| crate::Error::config(e.to_string()))
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = path.unwrap_or_else(default_config_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

fn default_config_path() -> PathBuf {
    super::config_dir()
        .map(|p| p.join("config.toml"))
        .unwrap_or_else(|_| PathBuf::from("config.toml"))
}

/// API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Prediction API base URL.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 30,
            user_agent: format!("predscope/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tick rate in milliseconds for UI updates.
    pub tick_rate_ms: u64,
    /// Rows per page when nothing is persisted.
    pub default_page_size: usize,
    /// Fast-trade polling interval in seconds.
    pub poll_interval_secs: u64,
    /// Number of predictions shown in the fast-trade view.
    pub fast_view_limit: usize,
    /// How long a toast stays visible.
    pub toast_duration_ms: u64,
    /// Exit transition of a toast before it is removed.
    pub toast_transition_ms: u64,
    /// Delay before a freshly opened modal is considered fully open.
    pub modal_open_delay_ms: u64,
    /// Exit transition of a modal before it is removed.
    pub modal_close_ms: u64,
    /// Maximum gap between the two presses of `gg`.
    pub gg_chord_ms: u64,
    /// History period requested for the details view.
    pub details_period: String,
    /// Candle interval requested for the details view.
    pub details_interval: String,
    /// Number of previous predictions requested for the details view.
    pub details_limit: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            default_page_size: 15,
            poll_interval_secs: 5,
            fast_view_limit: 25,
            toast_duration_ms: 2500,
            toast_transition_ms: 250,
            modal_open_delay_ms: 10,
            modal_close_ms: 160,
            gg_chord_ms: 350,
            details_period: "6mo".to_string(),
            details_interval: "1d".to_string(),
            details_limit: 12,
        }
    }
}

impl UiConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    pub fn toast_transition(&self) -> Duration {
        Duration::from_millis(self.toast_transition_ms)
    }

    pub fn modal_open_delay(&self) -> Duration {
        Duration::from_millis(self.modal_open_delay_ms)
    }

    pub fn modal_close(&self) -> Duration {
        Duration::from_millis(self.modal_close_ms)
    }

    pub fn gg_chord(&self) -> Duration {
        Duration::from_millis(self.gg_chord_ms)
    }
}

/// Key bindings configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Quit the application.
    pub quit: String,
    /// Show help.
    pub help: String,
    /// Navigate up.
    pub up: String,
    /// Navigate down.
    pub down: String,
    /// Refresh data.
    pub refresh: String,
    /// Focus the search field.
    pub search: String,
    /// Focus the new-prediction ticker field.
    pub new_prediction: String,
    /// Open the details view for the selected row.
    pub details: String,
    /// Cycle rows per page.
    pub page_size: String,
    /// Toggle light/dark theme.
    pub theme: String,
    /// Switch between dashboard and fast-trade views.
    pub switch_view: String,
    /// Start fast-trade polling.
    pub start_polling: String,
    /// Stop fast-trade polling.
    pub stop_polling: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            help: "?".to_string(),
            up: "k".to_string(),
            down: "j".to_string(),
            refresh: "r".to_string(),
            search: "/".to_string(),
            new_prediction: "n".to_string(),
            details: "d".to_string(),
            page_size: "p".to_string(),
            theme: "t".to_string(),
            switch_view: "Tab".to_string(),
            start_polling: "s".to_string(),
            stop_polling: "x".to_string(),
        }
    }
}

/// Theme configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Theme used when no preference has been persisted yet.
    pub default: Theme,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("predscope-{}-{}", uuid::Uuid::new_v4(), name))
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = Config::load(Some(temp_path("missing.toml"))).unwrap();
        assert_eq!(config.ui.default_page_size, 15);
        assert_eq!(config.ui.poll_interval_secs, 5);
        assert_eq!(config.theme.default, Theme::Dark);
    }

    #[test]
    fn test_save_then_load_preserves_overrides() {
        let path = temp_path("config.toml");
        let mut config = Config::default();
        config.api.base_url = "http://example.test:9000".to_string();
        config.ui.fast_view_limit = 10;
        config.save(Some(path.clone())).unwrap();

        let loaded = Config::load(Some(path.clone())).unwrap();
        assert_eq!(loaded.api.base_url, "http://example.test:9000");
        assert_eq!(loaded.ui.fast_view_limit, 10);
        assert_eq!(loaded.ui.gg_chord_ms, 350);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let path = temp_path("partial.toml");
        std::fs::write(&path, "[ui]\ndefault_page_size = 25\n").unwrap();

        let loaded = Config::load(Some(path.clone())).unwrap();
        assert_eq!(loaded.ui.default_page_size, 25);
        assert_eq!(loaded.ui.details_period, "6mo");
        assert_eq!(loaded.api, ApiConfig::default());

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_env_overrides_file() {
        let path = temp_path("env.toml");
        std::fs::write(&path, "[ui]\ntoast_duration_ms = 3000\n").unwrap();

        let var = format!("{ENV_PREFIX}_UI__TOAST_DURATION_MS");
        // SAFETY: no other test touches this variable.
        unsafe { std::env::set_var(&var, "4000") };
        let loaded = Config::load(Some(path.clone()));
        unsafe { std::env::remove_var(&var) };

        let loaded = loaded.unwrap();
        assert_eq!(loaded.ui.toast_duration_ms, 4000);
        assert_eq!(loaded.ui.toast_duration(), Duration::from_millis(4000));

        let _ = std::fs::remove_file(path);
    }
}
