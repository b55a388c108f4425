//! TUI widgets.

mod fast_view;
mod help;
mod input_bar;
mod kpi_bar;
mod modal;
mod notifications;
mod prediction_table;
mod sparkline;
mod status_bar;
mod tab_bar;

pub use fast_view::FastView;
pub use help::HelpPanel;
pub use input_bar::InputBar;
pub use kpi_bar::KpiBar;
pub use modal::{ModalView, NO_PREDICTIONS};
pub use notifications::render_toasts;
pub use prediction_table::{PredictionTable, meter};
pub use sparkline::PriceSparkline;
pub use status_bar::StatusBar;
pub use tab_bar::TabBar;
