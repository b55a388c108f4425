//! Dashboard side effects.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::error::Result;
use crate::state::{Action, DetailsQuery, Notification, PredictionRequest};

/// Runs dashboard network calls on background tasks and reports back
/// through the action channel.
#[derive(Debug, Clone)]
pub struct DashboardController {
    api: ApiClient,
    action_tx: mpsc::UnboundedSender<Action>,
    details_query: DetailsQuery,
}

impl DashboardController {
    pub fn new(
        api: ApiClient,
        action_tx: mpsc::UnboundedSender<Action>,
        details_query: DetailsQuery,
    ) -> Self {
        Self {
            api,
            action_tx,
            details_query,
        }
    }

    /// Fetch predictions, then quotes for their tickers.
    ///
    /// Results are tagged with `generation` so the store can drop them if a
    /// newer refresh has started in the meantime.
    pub fn refresh(&self, generation: u64) {
        let api = self.api.clone();
        let tx = self.action_tx.clone();
        info!(generation, "Refreshing dashboard");

        tokio::spawn(async move {
            if let Err(e) = Self::load(&api, &tx, generation).await {
                warn!(generation, error = %e, "Dashboard refresh failed");
                let _ = tx.send(Action::RefreshFailed {
                    generation,
                    message: e.to_string(),
                });
            }
        });
    }

    async fn load(
        api: &ApiClient,
        tx: &mpsc::UnboundedSender<Action>,
        generation: u64,
    ) -> Result<()> {
        let predictions = api.fetch_predictions().await?;
        let tickers: Vec<String> = predictions.iter().map(|p| p.ticker.clone()).collect();
        debug!(generation, count = predictions.len(), "Predictions loaded");
        let _ = tx.send(Action::PredictionsLoaded {
            generation,
            predictions,
        });

        let quotes = api.fetch_quotes(&tickers).await?;
        debug!(generation, count = quotes.len(), "Quotes loaded");
        let _ = tx.send(Action::QuotesLoaded { generation, quotes });
        Ok(())
    }

    /// Create a prediction and trigger a full refresh on success.
    pub fn submit(&self, request: PredictionRequest) {
        let api = self.api.clone();
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            match api
                .create_prediction(&request.ticker, request.horizon_days)
                .await
            {
                Ok(prediction) => {
                    info!(ticker = %prediction.ticker, "Prediction created");
                    let _ = tx.send(Action::PredictionCreated(prediction));
                    let _ = tx.send(Action::Refresh);
                }
                Err(e) => {
                    warn!(ticker = %request.ticker, error = %e, "Create prediction failed");
                    let _ = tx.send(Action::ShowNotification(Notification::error(e.to_string())));
                }
            }
        });
    }

    /// Load chart history and prior predictions for the details modal.
    pub fn open_details(&self, ticker: String) {
        let api = self.api.clone();
        let tx = self.action_tx.clone();
        let query = self.details_query.clone();

        tokio::spawn(async move {
            match api.fetch_prediction_details(&ticker, &query).await {
                Ok(details) => {
                    let _ = tx.send(Action::DetailsLoaded(details));
                }
                Err(e) => {
                    warn!(%ticker, error = %e, "Details request failed");
                    let _ = tx.send(Action::ShowNotification(Notification::error(e.to_string())));
                }
            }
        });
    }
}
