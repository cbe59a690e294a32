//! Extended actions for [`QuakeViewApp`]: export, export message
//! processing, keyboard shortcuts, and the About dialog.
//!
//! These are `impl` blocks on the app struct, split out from `app.rs`
//! to keep file sizes manageable.

use crate::app::QuakeViewApp;
use crate::core::quake_record::QuakeRecord;
use crate::core::state::Action;
use crate::util::constants;
use crate::util::error::QuakeViewError;

/// Output format for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Json => "JSON",
        }
    }

    fn write(self, events: &[QuakeRecord], path: &std::path::Path) -> Result<(), QuakeViewError> {
        match self {
            Self::Csv => crate::export::csv_export::export_csv(events, path),
            Self::Json => crate::export::json_export::export_json(events, path),
        }
    }
}

// ── Export actions ──────────────────────────────────────────────────────

impl QuakeViewApp {
    /// Export the visible subset via a native save dialog.
    ///
    /// Runs on a background thread and sends a completion message back
    /// via `export_rx` so the UI can display feedback.
    pub fn export_visible(&mut self, format: ExportFormat) {
        if self.export_rx.is_some() {
            self.export_message = Some(("Export already in progress".into(), std::time::Instant::now()));
            return;
        }

        let events = self.state.visible_event_list();
        if events.is_empty() {
            self.export_message = Some(("No events to export".into(), std::time::Instant::now()));
            return;
        }

        let (tx, rx) = crossbeam_channel::bounded::<String>(1);
        self.export_rx = Some(rx);

        let file_name = format!(
            "{}_{}.{}",
            constants::APP_NAME,
            self.state.time_window.feed_id(),
            format.extension()
        );
        std::thread::spawn(move || {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter(format.label(), &[format.extension()])
                .set_file_name(file_name)
                .save_file()
            {
                match format.write(&events, &path) {
                    Ok(()) => {
                        let _ = tx.send(format!("Exported {} events to {}", events.len(), format.label()));
                    }
                    Err(e) => {
                        tracing::error!("{} export failed: {}", format.label(), e);
                        let _ = tx.send(format!("{} export failed: {e}", format.label()));
                    }
                }
            }
        });
    }

    /// Process export completion messages from background threads.
    ///
    /// Called once per frame. Clears stale export messages after
    /// [`constants::NOTICE_TIMEOUT_SECS`].
    pub fn process_export_messages(&mut self) {
        if let Some(rx) = &self.export_rx {
            match rx.try_recv() {
                Ok(msg) => {
                    self.export_message = Some((msg, std::time::Instant::now()));
                    self.export_rx = None;
                }
                Err(crossbeam_channel::TryRecvError::Disconnected) => {
                    // Save dialog cancelled: the sender dropped without sending.
                    self.export_rx = None;
                }
                Err(crossbeam_channel::TryRecvError::Empty) => {}
            }
        }
        if let Some((_, instant)) = &self.export_message {
            if instant.elapsed() > std::time::Duration::from_secs(constants::NOTICE_TIMEOUT_SECS) {
                self.export_message = None;
            }
        }
    }
}

// ── Keyboard shortcuts ──────────────────────────────────────────────────

impl QuakeViewApp {
    /// Handle global keyboard shortcuts.
    ///
    /// - **F5 / Ctrl+R**: Refresh the current time window
    /// - **Ctrl+W**: Toggle world / recent view
    /// - **Escape**: Close the About dialog, then the detail window, then the notice
    pub fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        // Text fields keep their own keys.
        if ctx.wants_keyboard_input() {
            return;
        }

        let (refresh, toggle_view, escape) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::F5) || (i.modifiers.command && i.key_pressed(egui::Key::R)),
                i.modifiers.command && i.key_pressed(egui::Key::W),
                i.key_pressed(egui::Key::Escape),
            )
        });

        if refresh && !self.state.loading {
            self.dispatch(Action::Refresh);
        }
        if toggle_view {
            self.dispatch(Action::ToggleViewMode);
        }
        if escape {
            if self.show_about {
                self.show_about = false;
            } else if self.state.selected().is_some() {
                self.dispatch(Action::DismissDetails);
            } else if self.state.notice.is_some() {
                self.dispatch(Action::DismissNotice);
            }
        }
    }
}

// ── About dialog ────────────────────────────────────────────────────────

impl QuakeViewApp {
    pub fn render_about_dialog(&mut self, ctx: &egui::Context) {
        if !self.show_about {
            return;
        }

        let mut open = true;
        egui::Window::new("About")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .fixed_size([320.0, 0.0])
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.label(
                        egui::RichText::new(constants::APP_NAME)
                            .color(crate::ui::theme::accent(self.dark_mode))
                            .strong()
                            .size(20.0),
                    );
                    ui.label(
                        egui::RichText::new(format!("v{}", constants::APP_VERSION))
                            .color(crate::ui::theme::text_secondary(self.dark_mode)),
                    );
                    ui.add_space(8.0);
                    ui.label("Recent earthquakes from the USGS feed, on a map");
                    ui.add_space(12.0);
                    ui.label(
                        egui::RichText::new("Event data: U.S. Geological Survey")
                            .color(crate::ui::theme::text_secondary(self.dark_mode)),
                    );
                    ui.hyperlink_to("earthquake.usgs.gov", "https://earthquake.usgs.gov");
                    ui.label(
                        egui::RichText::new("Place search: Nominatim / OpenStreetMap")
                            .color(crate::ui::theme::text_secondary(self.dark_mode)),
                    );
                    ui.hyperlink_to("nominatim.org", "https://nominatim.org");
                    ui.add_space(8.0);
                });
            });

        if !open {
            self.show_about = false;
        }
    }
}
