//! Bottom event list with virtual scrolling.
//!
//! Uses `egui_extras::TableBuilder`, whose `body.rows()` only lays out the
//! rows on screen. Rows follow feed order (newest first).

use egui_extras::{Column, TableBuilder};

use crate::app::QuakeViewApp;
use crate::core::state::Action;
use crate::ui::theme;
use crate::util::constants::TABLE_ROW_HEIGHT;
use crate::util::time::format_table_timestamp;

impl QuakeViewApp {
    /// Render the visible subset as a table.
    ///
    /// Columns: Time, Magnitude, Place, Depth. Clicking a row activates the
    /// event exactly as clicking its marker would.
    pub fn render_event_table(&mut self, ui: &mut egui::Ui) {
        let dark = self.dark_mode;
        let events = self.state.store.snapshot();
        let visible = self.state.visible_indices().to_vec();
        let mut activated = None;

        let table = TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(140.0).clip(true)) // Time
            .column(Column::auto().at_least(50.0)) // Magnitude
            .column(Column::remainder().clip(true)) // Place
            .column(Column::auto().at_least(70.0)) // Depth
            .sense(egui::Sense::click());

        table
            .header(22.0, |mut header| {
                for title in ["Time", "Mag", "Place", "Depth"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(TABLE_ROW_HEIGHT, visible.len(), |mut row| {
                    let Some(event) = visible.get(row.index()).and_then(|&i| events.get(i)) else {
                        return;
                    };
                    row.set_selected(self.state.selection.is_selected(&event.id));

                    row.col(|ui| {
                        ui.label(
                            egui::RichText::new(format_table_timestamp(&event.timestamp()))
                                .color(theme::text_secondary(dark))
                                .small(),
                        );
                    });
                    row.col(|ui| {
                        ui.label(
                            egui::RichText::new(event.display_magnitude())
                                .color(theme::severity_color(event.severity()))
                                .strong(),
                        );
                    });
                    row.col(|ui| {
                        ui.label(event.display_place());
                    });
                    row.col(|ui| {
                        let depth = event
                            .depth_km
                            .map(|d| format!("{d:.1} km"))
                            .unwrap_or_else(|| "-".into());
                        ui.label(egui::RichText::new(depth).color(theme::text_secondary(dark)));
                    });

                    if row.response().clicked() {
                        activated = Some(event.clone());
                    }
                });
            });

        if let Some(event) = activated {
            self.dispatch(Action::ActivateMarker(event));
        }
    }
}
