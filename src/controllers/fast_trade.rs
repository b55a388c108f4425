//! Fast-trade view polling.

use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::poller::Poller;
use crate::api::ApiClient;
use crate::error::Result;
use crate::state::{Action, Notification, Prediction, Quotes};

/// Owns the fast-trade poller.
///
/// `start`/`stop` are no-ops when already in the requested state. Dropping
/// the controller stops polling.
#[derive(Debug)]
pub struct FastTradeController {
    api: ApiClient,
    action_tx: mpsc::UnboundedSender<Action>,
    poller: Poller,
    limit: usize,
}

impl FastTradeController {
    pub fn new(
        api: ApiClient,
        action_tx: mpsc::UnboundedSender<Action>,
        interval: Duration,
        limit: usize,
    ) -> Self {
        Self {
            api,
            action_tx,
            poller: Poller::new(interval),
            limit,
        }
    }

    pub fn is_running(&self) -> bool {
        self.poller.is_running()
    }

    /// Load now, then every poll interval. Tick errors are logged only.
    pub fn start(&mut self) -> bool {
        let api = self.api.clone();
        let tx = self.action_tx.clone();
        let limit = self.limit;

        let started = self.poller.start(move || {
            let api = api.clone();
            let tx = tx.clone();
            async move {
                match Self::fetch(&api, limit).await {
                    Ok(action) => {
                        let _ = tx.send(action);
                    }
                    Err(e) => warn!(error = %e, "Fast trade poll failed"),
                }
            }
        });

        if started {
            info!(interval = ?self.poller.interval(), "Fast trade polling started");
            let _ = self.action_tx.send(Action::SetFastTradeRunning(true));
            let _ = self
                .action_tx
                .send(Action::ShowNotification(Notification::success("Fast Trade: started")));
        }
        started
    }

    pub fn stop(&mut self) -> bool {
        let stopped = self.poller.stop();
        if stopped {
            info!("Fast trade polling stopped");
            let _ = self.action_tx.send(Action::SetFastTradeRunning(false));
            let _ = self
                .action_tx
                .send(Action::ShowNotification(Notification::info("Fast Trade: stopped")));
        }
        stopped
    }

    /// Single load outside the poller. Errors become a toast.
    pub fn load_once(&self) {
        let api = self.api.clone();
        let tx = self.action_tx.clone();
        let limit = self.limit;

        tokio::spawn(async move {
            let action = match Self::fetch(&api, limit).await {
                Ok(action) => action,
                Err(e) => {
                    warn!(error = %e, "Fast trade load failed");
                    Action::ShowNotification(Notification::error(e.to_string()))
                }
            };
            let _ = tx.send(action);
        });
    }

    async fn fetch(api: &ApiClient, limit: usize) -> Result<Action> {
        let (predictions, quotes) = fetch_snapshot(api, limit).await?;
        Ok(Action::FastTradeLoaded {
            predictions,
            quotes,
        })
    }
}

/// First `limit` predictions and the quotes for their tickers.
pub async fn fetch_snapshot(api: &ApiClient, limit: usize) -> Result<(Vec<Prediction>, Quotes)> {
    let mut predictions = api.fetch_predictions().await?;
    predictions.truncate(limit);
    let quotes = api.fetch_quotes(predictions.iter().map(|p| p.ticker.as_str())).await?;
    Ok((predictions, quotes))
}
