//! Prediction API integration.
//!
//! This module provides a high-level interface to the prediction service,
//! handling request building, error normalization and data conversion.

mod client;
mod converter;
mod transport;

pub use client::{ApiClient, ApiClientBuilder};
pub use converter::{CreatePredictionBody, DataConverter, QuoteEntry, QuotesResponse};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method, Transport};

#[cfg(test)]
pub use transport::MockTransport;
