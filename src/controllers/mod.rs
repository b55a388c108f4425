//! Page controllers.
//!
//! Controllers own the side effects of each view: they run API calls on
//! background tasks and feed the results back into the store as [`Action`]s.
//!
//! [`Action`]: crate::state::Action

mod dashboard;
mod fast_trade;
mod poller;

pub use dashboard::DashboardController;
pub use fast_trade::{FastTradeController, fetch_snapshot};
pub use poller::Poller;
