//! Top-level application state and construction.
//!
//! `QuakeViewApp` owns the reducer state, the worker channel, and the purely
//! presentational UI flags (theme, dialogs, export feedback). Every change to
//! the event data, filters, selection or view mode goes through
//! [`QuakeViewApp::dispatch`]; rendering is delegated to the `ui/` modules.

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};

use crate::core::feed::{TimeWindow, UsgsFeed};
use crate::core::geocode::NominatimGeocoder;
use crate::core::state::{Action, AppState, Effect};
use crate::core::view::ViewMode;
use crate::core::worker::{self, Services, WorkerMessage};
use crate::util::constants;
use crate::util::error::QuakeViewError;

/// Persistence keys for eframe storage.
const KEY_DARK_MODE: &str = "dark_mode";
const KEY_TIME_WINDOW: &str = "time_window";
const KEY_MIN_MAGNITUDE: &str = "min_magnitude";
const KEY_VIEW_MODE: &str = "view_mode";

/// Work done before the window opens so the eframe creator closure is trivial.
pub struct PreInitState {
    services: Result<Services, String>,
}

impl PreInitState {
    /// Build the HTTP clients for the feed and the geocoder.
    pub fn build() -> Self {
        let services = UsgsFeed::new()
            .and_then(|feed| Ok((feed, NominatimGeocoder::new()?)))
            .map(|(feed, geocoder)| Services::new(Arc::new(feed), Arc::new(geocoder)))
            .map_err(|e: QuakeViewError| {
                tracing::error!("Failed to initialise HTTP clients: {}", e);
                e.to_string()
            });
        Self { services }
    }
}

/// Central application state for QuakeView.
///
/// UI rendering methods are defined in `ui/*.rs` via `impl QuakeViewApp` blocks.
pub struct QuakeViewApp {
    // ── Domain state ────────────────────────────────────────────
    /// Event store, filters, selection and view mode. Only mutated via `dispatch`.
    pub state: AppState,

    // ── Workers ─────────────────────────────────────────────────
    /// Clients the workers run against. `None` if they could not be built.
    pub services: Option<Services>,
    /// Cloned into every worker thread.
    pub worker_tx: Sender<WorkerMessage>,
    /// Drained once per frame.
    pub worker_rx: Receiver<WorkerMessage>,

    // ── Errors ──────────────────────────────────────────────────
    /// Internal errors (thread spawn failures, client setup). Capped at
    /// [`constants::MAX_ERRORS`].
    pub errors: Vec<String>,

    // ── Dialogs ─────────────────────────────────────────────────
    pub show_about: bool,

    // ── Theme ───────────────────────────────────────────────────
    /// `true` = dark mode (default), `false` = light mode.
    pub dark_mode: bool,

    // ── Export feedback ─────────────────────────────────────────
    /// Receiver for export completion messages from background threads.
    pub export_rx: Option<Receiver<String>>,
    /// Transient status message for export results.
    pub export_message: Option<(String, std::time::Instant)>,
}

// ── Construction ────────────────────────────────────────────────────────

impl QuakeViewApp {
    /// Create the app from pre-built services, restore persisted
    /// preferences, and issue the first feed fetch.
    pub fn from_pre_init(cc: &eframe::CreationContext<'_>, pre_init: PreInitState) -> Self {
        let mut dark_mode = true;
        let mut window = TimeWindow::default();
        let mut min_magnitude = 0.0;
        let mut view_mode = ViewMode::default();

        if let Some(storage) = cc.storage {
            if let Some(dark) = eframe::get_value::<bool>(storage, KEY_DARK_MODE) {
                dark_mode = dark;
            }
            if let Some(w) = eframe::get_value::<TimeWindow>(storage, KEY_TIME_WINDOW) {
                window = w;
            }
            if let Some(m) = eframe::get_value::<f64>(storage, KEY_MIN_MAGNITUDE) {
                min_magnitude = m;
            }
            if let Some(v) = eframe::get_value::<ViewMode>(storage, KEY_VIEW_MODE) {
                view_mode = v;
            }
        }

        crate::ui::theme::apply_theme(&cc.egui_ctx, dark_mode);

        let (worker_tx, worker_rx) = crossbeam_channel::bounded(constants::CHANNEL_BOUND);
        let mut errors = Vec::new();
        let services = match pre_init.services {
            Ok(s) => Some(s),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        let mut app = Self {
            state: AppState::with_preferences(window, min_magnitude, view_mode),
            services,
            worker_tx,
            worker_rx,
            errors,
            show_about: false,
            dark_mode,
            export_rx: None,
            export_message: None,
        };

        app.dispatch(Action::Refresh);
        app
    }

    /// Persist user preferences.
    pub fn save_preferences(&self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, KEY_DARK_MODE, &self.dark_mode);
        eframe::set_value(storage, KEY_TIME_WINDOW, &self.state.time_window);
        eframe::set_value(storage, KEY_MIN_MAGNITUDE, &self.state.criteria.min_magnitude);
        eframe::set_value(storage, KEY_VIEW_MODE, &self.state.view_mode);
    }
}

// ── Dispatch ────────────────────────────────────────────────────────────

impl QuakeViewApp {
    /// Apply `action` to the state and start any network work it requests.
    pub fn dispatch(&mut self, action: Action) {
        if let Some(effect) = self.state.reduce(action) {
            self.run_effect(effect);
        }
    }

    /// Hand an effect to a worker thread. If no worker can run it, the
    /// failure is fed straight back through the reducer so loading flags
    /// and notices stay consistent.
    fn run_effect(&mut self, effect: Effect) {
        let failure = match &self.services {
            Some(services) => match worker::spawn_effect(effect.clone(), services, self.worker_tx.clone()) {
                Ok(_handle) => return,
                Err(e) => e,
            },
            None => QuakeViewError::Http {
                context: "network unavailable".into(),
                message: "HTTP clients failed to initialise".into(),
            },
        };

        tracing::error!("Could not start {:?}: {}", effect, failure);
        self.push_error(failure.to_string());

        let action = match effect {
            Effect::FetchFeed { request, window } => Action::FeedLoaded {
                request,
                window,
                result: Err(failure),
                elapsed: std::time::Duration::ZERO,
            },
            Effect::Geocode { request, query } => Action::LocationResolved {
                request,
                query,
                result: Err(failure),
            },
        };
        // Failure actions never produce further effects.
        let _ = self.state.reduce(action);
    }

    pub fn push_error(&mut self, message: String) {
        if self.errors.len() < constants::MAX_ERRORS {
            self.errors.push(message);
        }
    }
}
