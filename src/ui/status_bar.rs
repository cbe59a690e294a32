//! Bottom status bar: event counts, time window, fetch time, and loading status.

use crate::app::QuakeViewApp;
use crate::ui::theme;
use crate::util::time::{format_age, format_duration};

impl QuakeViewApp {
    /// Render the status bar at the bottom of the window.
    ///
    /// Shows: visible/total counts | window | fetch time | status | export
    /// feedback and internal errors on the right.
    pub fn render_status_bar(&self, ui: &mut egui::Ui) {
        let dark = self.dark_mode;
        ui.horizontal_centered(|ui| {
            // ── Event count ─────────────────────────────────────────
            let shown = self.state.visible_indices().len();
            let total = self.state.store.len();
            let count_text = if shown == total {
                format!("{total} events")
            } else {
                format!("Showing {shown} of {total} events")
            };
            ui.label(egui::RichText::new(count_text).color(theme::text_secondary(dark)));

            ui.separator();

            // ── Loaded window ───────────────────────────────────────
            if let Some(window) = self.state.store.window() {
                let mut text = window.label().to_string();
                if let Some(fetched) = self.state.store.fetched_at() {
                    text.push_str(&format!(", updated {}", format_age(&fetched, &chrono::Utc::now())));
                }
                ui.label(egui::RichText::new(text).color(theme::text_dim(dark)));
                ui.separator();
            }

            // ── Fetch time ──────────────────────────────────────────
            if let Some(elapsed) = self.state.last_fetch_elapsed {
                ui.label(
                    egui::RichText::new(format!("Fetch: {}", format_duration(elapsed)))
                        .color(theme::text_dim(dark)),
                );
                ui.separator();
            }

            // ── Status ──────────────────────────────────────────────
            if self.state.loading {
                ui.spinner();
                ui.label(
                    egui::RichText::new(format!("Loading {}…", self.state.time_window.label().to_lowercase()))
                        .color(theme::text_secondary(dark)),
                );
            } else if self.state.resolving {
                ui.spinner();
                ui.label(egui::RichText::new("Looking up place…").color(theme::text_secondary(dark)));
            } else {
                ui.label(egui::RichText::new("Ready").color(theme::ACCENT_DIM));
            }

            // ── Right side: export feedback and errors ──────────────
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if !self.errors.is_empty() {
                    let err_text = format!("!! {} error(s)", self.errors.len());
                    let response = ui.label(egui::RichText::new(err_text).color(theme::WARNING));
                    response.on_hover_ui(|ui| {
                        for msg in &self.errors {
                            ui.label(egui::RichText::new(msg).color(theme::SEVERITY_MAJOR).small());
                        }
                    });
                }
                if let Some((msg, _)) = &self.export_message {
                    ui.label(egui::RichText::new(msg).color(theme::accent(dark)));
                }
            });
        });
    }
}
