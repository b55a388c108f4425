//! # Predscope - Stock Prediction Dashboard
//!
//! A terminal dashboard for browsing, sorting and creating stock price
//! predictions served by a prediction API. Built with ratatui and reqwest.
//!
//! ## Architecture
//!
//! The application follows a clean architecture pattern:
//!
//! - **App**: Core application state and lifecycle management
//! - **UI**: Layout and rendering logic
//! - **API**: Prediction service client behind a mockable transport
//! - **State**: Centralized state management and the table view-model
//! - **Controllers**: Background requests and the fast-trade poller
//! - **Events**: Input handling and event processing
//! - **Config**: Configuration management
//! - **Storage**: Persisted view preferences and theme

pub mod api;
pub mod app;
pub mod chart;
pub mod config;
pub mod controllers;
pub mod error;
pub mod events;
pub mod format;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
