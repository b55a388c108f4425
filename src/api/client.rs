//! Prediction API client.

use reqwest::Url;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

use super::converter::{CreatePredictionBody, DataConverter, QuotesResponse};
use super::transport::{HttpRequest, HttpResponse, HttpTransport, Method, Transport};
use crate::config::ApiConfig;
use crate::error::{ApiError, Error, Result};
use crate::state::{DetailsQuery, Prediction, PredictionDetails, Quotes};

/// Builder for creating an API client.
pub struct ApiClientBuilder {
    config: ApiConfig,
}

impl ApiClientBuilder {
    /// Create a new builder with default config.
    pub fn new() -> Self {
        Self {
            config: ApiConfig::default(),
        }
    }

    /// Set the API configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the API client over `reqwest`.
    pub fn build(self) -> Result<ApiClient> {
        let transport = Arc::new(HttpTransport::new(&self.config)?);
        ApiClient::with_transport(&self.config.base_url, transport)
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the prediction and market-data endpoints.
///
/// Every call is a single attempt. Non-2xx responses become [`ApiError`]s.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client using `reqwest`.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        ApiClientBuilder::new().config(config.clone()).build()
    }

    /// Create a client over an arbitrary transport.
    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::config(format!("invalid base URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!("{base_url} cannot be used as a base URL")));
        }
        Ok(Self {
            base_url,
            transport,
        })
    }

    /// `GET /api/predictions`.
    pub async fn fetch_predictions(&self) -> Result<Vec<Prediction>> {
        let url = self.endpoint(&["api", "predictions"], &[])?;
        self.request_json(Method::Get, url, None).await
    }

    /// `POST /api/predictions`. The server computes every derived field.
    pub async fn create_prediction(&self, ticker: &str, horizon_days: u32) -> Result<Prediction> {
        let url = self.endpoint(&["api", "predictions"], &[])?;
        let body = serde_json::to_value(CreatePredictionBody {
            ticker,
            horizon_days,
        })?;
        self.request_json(Method::Post, url, Some(body)).await
    }

    /// `GET /api/market/quotes`. Tickers are uppercased and de-duplicated;
    /// an empty set returns an empty map without a request.
    pub async fn fetch_quotes<I, S>(&self, tickers: I) -> Result<Quotes>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tickers = DataConverter::normalize_tickers(tickers);
        if tickers.is_empty() {
            return Ok(Quotes::new());
        }
        let csv = tickers.join(",");
        let url = self.endpoint(&["api", "market", "quotes"], &[("tickers", &csv)])?;
        let response: QuotesResponse = self.request_json(Method::Get, url, None).await?;
        Ok(DataConverter::convert_quotes(response))
    }

    /// `GET /api/predictions/{ticker}` with history and prior predictions.
    pub async fn fetch_prediction_details(
        &self,
        ticker: &str,
        query: &DetailsQuery,
    ) -> Result<PredictionDetails> {
        let limit = query.limit.to_string();
        let url = self.endpoint(
            &["api", "predictions", ticker],
            &[
                ("period", &query.period),
                ("interval", &query.interval),
                ("limit", &limit),
            ],
        )?;
        self.request_json(Method::Get, url, None).await
    }

    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::config("base URL cannot have path segments"))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        let url = url.to_string();
        debug!(%method, %url, "API request");

        let response = self
            .transport
            .send(HttpRequest {
                method,
                url: url.clone(),
                body,
            })
            .await?;
        debug!(%method, %url, status = response.status, "API response");

        if !response.is_success() {
            let HttpResponse {
                status,
                status_text,
                body,
            } = response;
            return Err(ApiError::new(method.to_string(), url, status, status_text, &body).into());
        }
        Ok(serde_json::from_str(&response.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::MockTransport;
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;

    const BASE: &str = "http://localhost:8000";

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            status_text: "OK".into(),
            body: body.into(),
        }
    }

    fn client(mock: MockTransport) -> ApiClient {
        ApiClient::with_transport(BASE, Arc::new(mock)).unwrap()
    }

    const AAPL: &str = r#"{"id":1,"ticker":"AAPL","horizon_days":7,"probability_pct":80.0,
        "expected_change_pct":2.0,"reward_to_risk":1.2,"outcome":null,
        "created_at":"2025-01-01T00:00:00"}"#;

    #[tokio::test]
    async fn test_fetch_predictions() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .with(eq(HttpRequest {
                method: Method::Get,
                url: format!("{BASE}/api/predictions"),
                body: None,
            }))
            .times(1)
            .returning(|_| Ok(ok(&format!("[{AAPL}]"))));

        let predictions = client(mock).fetch_predictions().await.unwrap();
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].ticker, "AAPL");
    }

    #[tokio::test]
    async fn test_create_prediction_posts_json() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .with(eq(HttpRequest {
                method: Method::Post,
                url: format!("{BASE}/api/predictions"),
                body: Some(serde_json::json!({"ticker": "AAPL", "horizon_days": 7})),
            }))
            .times(1)
            .returning(|_| Ok(ok(AAPL)));

        let created = client(mock).create_prediction("AAPL", 7).await.unwrap();
        assert_eq!(created.horizon_days, 7);
    }

    #[test]
    fn test_empty_quotes_make_no_request() {
        let mut mock = MockTransport::new();
        mock.expect_send().never();
        let client = client(mock);

        // Resolves on first poll: nothing to wait for.
        let mut fut = tokio_test::task::spawn(client.fetch_quotes(Vec::<String>::new()));
        let quotes = tokio_test::assert_ready_ok!(fut.poll());
        assert!(quotes.is_empty());
    }

    #[tokio::test]
    async fn test_quotes_dedupe_to_single_request() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| req.url == format!("{BASE}/api/market/quotes?tickers=AAPL"))
            .times(1)
            .returning(|_| Ok(ok(r#"{"quotes":[{"ticker":"AAPL","price":150.0}]}"#)));

        let quotes = client(mock).fetch_quotes(["aapl", "AAPL"]).await.unwrap();
        assert_eq!(quotes, Quotes::from([("AAPL".to_string(), 150.0)]));
    }

    #[tokio::test]
    async fn test_quotes_csv_is_url_encoded() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| req.url == format!("{BASE}/api/market/quotes?tickers=AAPL%2CMSFT"))
            .times(1)
            .returning(|_| Ok(ok(r#"{"quotes":[]}"#)));

        let quotes = client(mock).fetch_quotes(["aapl", "msft", "Aapl"]).await.unwrap();
        assert!(quotes.is_empty());
    }

    #[tokio::test]
    async fn test_details_query_parameters() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| {
                req.method == Method::Get
                    && req.url == format!("{BASE}/api/predictions/AAPL?period=6mo&interval=1d&limit=12")
            })
            .times(1)
            .returning(|_| {
                Ok(ok(&format!(
                    r#"{{"ticker":"AAPL","period":"6mo","interval":"1d","last_price":150.0,
                        "candles":[{{"close":149.0}},{{"close":150.0}}],
                        "prediction":{AAPL},"previous":[]}}"#
                )))
            });

        let details = client(mock)
            .fetch_prediction_details("AAPL", &DetailsQuery::default())
            .await
            .unwrap();
        assert_eq!(details.closes(), vec![149.0, 150.0]);
        assert!(details.prediction.is_some());
    }

    #[tokio::test]
    async fn test_non_success_status_becomes_api_error() {
        let mut mock = MockTransport::new();
        let long_body = "e".repeat(300);
        mock.expect_send().times(1).returning(move |_| {
            Ok(HttpResponse {
                status: 502,
                status_text: "Bad Gateway".into(),
                body: long_body.clone(),
            })
        });

        let err = client(mock).create_prediction("AAPL", 7).await.unwrap_err();
        match err {
            Error::Api(api) => {
                assert_eq!(api.method, "POST");
                assert_eq!(api.url, format!("{BASE}/api/predictions"));
                assert_eq!(api.status, 502);
                assert_eq!(api.status_text, "Bad Gateway");
                assert_eq!(api.body_snippet.len(), 120);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_retried() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .times(1)
            .returning(|_| Err(Error::channel("connection refused")));

        assert!(client(mock).fetch_predictions().await.is_err());
    }

    #[test]
    fn test_base_url_with_prefix() {
        let client = ApiClient::with_transport("http://host/prefix/", Arc::new(MockTransport::new())).unwrap();
        let url = client.endpoint(&["api", "predictions"], &[]).unwrap();
        assert_eq!(url.as_str(), "http://host/prefix/api/predictions");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(ApiClient::with_transport("not a url", Arc::new(MockTransport::new())).is_err());
    }
}
