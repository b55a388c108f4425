//! UI rendering using ratatui.
//!
//! This module contains all TUI components and rendering logic.

mod layout;
mod theme;
mod widgets;

pub use layout::{DashboardLayout, Layout, centered_rect};
pub use theme::Palette;
pub use widgets::{
    FastView, HelpPanel, InputBar, KpiBar, ModalView, PredictionTable, PriceSparkline, StatusBar,
    TabBar,
};

use crate::config::KeyBindings;
use crate::state::{Store, View};
use ratatui::{Frame, widgets::Block};

/// Main UI renderer.
pub struct Ui;

impl Ui {
    /// Render the entire UI.
    pub fn render(frame: &mut Frame, store: &Store, keys: &KeyBindings) {
        let palette = Palette::for_theme(store.app.theme);
        let area = frame.area();
        let layout = Layout::new(area);

        frame.render_widget(Block::default().style(palette.base()), area);

        StatusBar::render(frame, layout.status_area, store, &palette);
        TabBar::render(frame, layout.tab_area, store, &palette);

        match store.app.current_view {
            View::Dashboard => {
                let dashboard = DashboardLayout::new(layout.main_area);
                KpiBar::render(frame, dashboard.kpi_area, &store.dashboard.kpis, &palette);
                InputBar::render(frame, dashboard.input_area, store, &palette);
                PredictionTable::render(
                    frame,
                    dashboard.table_area,
                    dashboard.pager_area,
                    store,
                    &palette,
                );
            }
            View::FastTrade => {
                FastView::render(frame, layout.main_area, &store.fast_trade, &palette);
            }
        }

        if let Some(modal) = store.modal.active() {
            ModalView::render(frame, area, modal, &palette);
        }

        if store.app.show_help {
            HelpPanel::render(frame, area, keys, &palette);
        }

        widgets::render_toasts(frame, layout.toast_area, &store.toasts, &palette);
    }
}
