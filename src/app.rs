//! Main application module.
//!
//! This module contains the main `App` struct that coordinates
//! the event loop, state management, and rendering.

use crate::api::ApiClient;
use crate::config::Config;
use crate::controllers::{DashboardController, FastTradeController};
use crate::error::Result;
use crate::events::EventHandler;
use crate::state::{Action, DetailsQuery, Focus, Notification, Preferences, Store, View};
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::ui::Ui;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// The main application.
pub struct App {
    /// Terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application store.
    store: Store,
    /// Event handler.
    event_handler: EventHandler,
    /// Action receiver.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Dashboard side effects.
    dashboard: DashboardController,
    /// Fast-trade poller owner.
    fast_trade: FastTradeController,
    /// Client-local preferences.
    preferences: Preferences,
    /// Whether the fast view has been shown once.
    fast_view_loaded: bool,
    /// Configuration.
    config: Config,
}

impl App {
    /// Create a new application.
    pub fn new(config: Config) -> Result<Self> {
        let storage: Box<dyn KeyValueStore> = match FileStore::open_default() {
            Ok(store) => {
                info!(path = %store.path().display(), "Using preference storage");
                Box::new(store)
            }
            Err(e) => {
                warn!("Preferences will not persist: {}", e);
                Box::new(MemoryStore::new())
            }
        };
        let preferences = Preferences::new(storage);
        let view = preferences.view().clone();
        let theme = preferences.theme(config.theme.default);

        let api = ApiClient::new(&config.api)?;

        // Create action channel
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let store = Store::new(action_tx.clone(), &config.ui, view, theme);
        let event_handler = EventHandler::new(
            config.keybindings.clone(),
            Duration::from_millis(config.ui.tick_rate_ms),
            config.ui.gg_chord(),
        );
        let details_query = DetailsQuery {
            period: config.ui.details_period.clone(),
            interval: config.ui.details_interval.clone(),
            limit: config.ui.details_limit,
        };
        let dashboard = DashboardController::new(api.clone(), action_tx.clone(), details_query);
        let fast_trade = FastTradeController::new(
            api,
            action_tx,
            config.ui.poll_interval(),
            config.ui.fast_view_limit,
        );

        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            store,
            event_handler,
            action_rx,
            dashboard,
            fast_trade,
            preferences,
            fast_view_loaded: false,
            config,
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        // Initial load
        self.store.dispatch(Action::Refresh)?;

        // Main event loop
        loop {
            self.store.tick(Instant::now());

            // Update event handler with current state
            self.event_handler.update_store_snapshot(&self.store);

            // Render UI
            let keys = &self.config.keybindings;
            let store = &self.store;
            self.terminal.draw(|frame| Ui::render(frame, store, keys))?;
            self.persist_view();

            // Handle events and actions
            tokio::select! {
                // Handle terminal events
                result = self.event_handler.next() => {
                    if let Some(action) = result? {
                        self.handle_action(action);
                    }
                }

                // Handle actions from the channel
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.handle_action(action);
            }

            // Check if we should quit
            if self.store.app.should_quit {
                break;
            }
        }

        self.fast_trade.stop();
        Ok(())
    }

    /// Handle an action, running its side effects.
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Refresh => self.refresh(),
            Action::InputChar(_) | Action::InputBackspace => {
                let searching = self.store.app.focus == Focus::Search;
                self.store.reduce(action);
                if searching {
                    self.refresh();
                }
            }
            Action::SubmitPrediction => match self.store.dashboard.prediction_request() {
                Ok(request) => self.dashboard.submit(request),
                Err(e) => self.store.notify(Notification::error(e.to_string())),
            },
            Action::OpenDetails => {
                if let Some(prediction) = self.store.dashboard.selected_prediction() {
                    self.dashboard.open_details(prediction.ticker.clone());
                }
            }
            Action::StartFastTrade => {
                self.fast_trade.start();
            }
            Action::StopFastTrade => {
                self.fast_trade.stop();
            }
            Action::LoadFastTrade => self.fast_trade.load_once(),
            Action::ToggleTheme => {
                self.store.reduce(Action::ToggleTheme);
                if let Err(e) = self.preferences.save_theme(self.store.app.theme) {
                    warn!("Failed to save theme: {}", e);
                    self.store.notify(Notification::warning("Theme not saved"));
                }
            }
            Action::ToggleView | Action::SetView(_) => {
                self.store.reduce(action);
                if self.store.app.current_view == View::FastTrade && !self.fast_view_loaded {
                    self.fast_view_loaded = true;
                    self.fast_trade.load_once();
                }
            }
            _ => {
                // Let the store handle the action
                self.store.reduce(action);
            }
        }
    }

    /// Start a new dashboard refresh generation.
    fn refresh(&mut self) {
        self.store.reduce(Action::Refresh);
        self.dashboard.refresh(self.store.dashboard.generation());
    }

    /// Write view preferences if they changed since the last render.
    fn persist_view(&mut self) {
        if let Err(e) = self.preferences.persist_view(&self.store.dashboard.view) {
            warn!("Failed to save view preferences: {}", e);
            self.store.notify(Notification::warning("View preferences not saved"));
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}
