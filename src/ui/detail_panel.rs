//! Detail window for the selected event.
//!
//! Opened when a marker or table row is activated; closing it dispatches
//! [`Action::DismissDetails`].

use crate::app::QuakeViewApp;
use crate::core::quake_record::QuakeRecord;
use crate::core::state::Action;
use crate::ui::theme;
use crate::util::time::{format_age, format_detail_timestamp};

impl QuakeViewApp {
    /// Render the floating detail window, if an event is selected.
    pub fn render_detail_window(&mut self, ctx: &egui::Context) {
        let Some(event) = self.state.selected().cloned() else {
            return;
        };

        let mut open = true;
        let mut close_clicked = false;
        egui::Window::new(format!("M {} earthquake", event.display_magnitude()))
            .id(egui::Id::new("detail_window"))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .default_width(340.0)
            .anchor(egui::Align2::RIGHT_TOP, [-12.0, 48.0])
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(event.display_place())
                        .strong()
                        .size(15.0)
                        .color(theme::severity_color(event.severity())),
                );
                ui.add_space(6.0);

                egui::Grid::new("detail_grid")
                    .num_columns(2)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        self.render_detail_rows(ui, &event);
                    });

                ui.add_space(8.0);
                ui.separator();
                ui.horizontal(|ui| {
                    ui.hyperlink_to("🔗 USGS event page", event.event_page_url());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Close").clicked() {
                            close_clicked = true;
                        }
                        if ui
                            .small_button("📋 ID")
                            .on_hover_text("Copy the event id to the clipboard")
                            .clicked()
                        {
                            ui.ctx().copy_text(event.id.clone());
                        }
                    });
                });
            });

        if !open || close_clicked {
            self.dispatch(Action::DismissDetails);
        }
    }

    fn render_detail_rows(&self, ui: &mut egui::Ui, event: &QuakeRecord) {
        let dim = theme::text_secondary(self.dark_mode);

        let magnitude = match &event.mag_type {
            Some(kind) => format!("{} {kind}", event.display_magnitude()),
            None => event.display_magnitude(),
        };
        detail_row(ui, dim, "Magnitude", magnitude);

        let ts = event.timestamp();
        detail_row(ui, dim, "Time", format_detail_timestamp(&ts));
        detail_row(ui, dim, "Age", format_age(&ts, &chrono::Utc::now()));
        detail_row(ui, dim, "Location", event.coordinate.to_string());
        if let Some(depth) = event.depth_km {
            detail_row(ui, dim, "Depth", format!("{depth:.1} km"));
        }
        if let Some(felt) = event.felt {
            detail_row(ui, dim, "Felt reports", felt.to_string());
        }
        if let Some(alert) = &event.alert {
            detail_row(ui, dim, "Alert", alert.clone());
        }
        if event.tsunami {
            detail_row(ui, dim, "Tsunami", "Flagged".into());
        }
        if let Some(sig) = event.significance {
            detail_row(ui, dim, "Significance", sig.to_string());
        }
        detail_row(ui, dim, "Event id", event.id.clone());
    }
}

fn detail_row(ui: &mut egui::Ui, key_color: egui::Color32, key: &str, value: String) {
    ui.label(egui::RichText::new(key).color(key_color));
    ui.label(value);
    ui.end_row();
}
