//! Left-side filter panel: minimum magnitude presets and slider, place
//! search, the active search area, and the marker colour legend.

use crate::app::QuakeViewApp;
use crate::core::state::Action;
use crate::ui::theme;
use crate::util::constants::{MAGNITUDE_PRESETS, MAJOR_MAGNITUDE, MAX_MAGNITUDE_SLIDER, MODERATE_MAGNITUDE};

impl QuakeViewApp {
    /// Render the filter panel within the given `Ui` region.
    ///
    /// Every change is dispatched immediately; the visible subset is
    /// recomputed by the reducer.
    pub fn render_filter_panel(&mut self, ui: &mut egui::Ui) {
        let dark = self.dark_mode;
        ui.heading(egui::RichText::new("🔍 Filters").color(theme::accent(dark)));
        ui.separator();

        // ── Minimum magnitude ───────────────────────────────────────
        ui.label("📈 Minimum magnitude");
        let current = self.state.criteria.min_magnitude;
        ui.horizontal_wrapped(|ui| {
            for &preset in MAGNITUDE_PRESETS {
                let label = if preset == 0.0 {
                    "All".to_string()
                } else {
                    format!("{preset:.1}+")
                };
                if ui.selectable_label(current == preset, label).clicked() && current != preset {
                    self.dispatch(Action::SetMinMagnitude(preset));
                }
            }
        });

        let mut min_magnitude = current;
        let slider = ui.add(
            egui::Slider::new(&mut min_magnitude, 0.0..=MAX_MAGNITUDE_SLIDER)
                .step_by(0.1)
                .fixed_decimals(1),
        );
        if slider.changed() {
            self.dispatch(Action::SetMinMagnitude(min_magnitude));
        }
        ui.add_space(6.0);

        // ── Place search ────────────────────────────────────────────
        ui.label("📍 Location");
        let mut text = self.state.search_text.clone();
        let search_response = ui.add(
            egui::TextEdit::singleline(&mut text)
                .hint_text("City, region or country")
                .desired_width(f32::INFINITY),
        );
        if search_response.changed() {
            self.dispatch(Action::EditSearchText(text));
        }
        let submitted = search_response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        search_response.on_hover_text(
            "Show only events within 5° of the first match.\nPress Enter or click Search.",
        );

        ui.horizontal(|ui| {
            let can_search = !self.state.search_text.trim().is_empty() && !self.state.resolving;
            let search_btn = ui.add_enabled(can_search, egui::Button::new("🔎 Search"));
            if submitted || search_btn.clicked() {
                self.dispatch(Action::SubmitSearch);
            }
            if self.state.resolving {
                ui.spinner();
            }
        });

        // ── Active search area ──────────────────────────────────────
        if let Some(area) = &self.state.criteria.location {
            let query = area.query.clone();
            let center = area.center;
            ui.add_space(4.0);
            egui::Frame::new()
                .fill(ui.visuals().faint_bg_color)
                .corner_radius(4.0)
                .inner_margin(egui::Margin::same(6))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(format!("Near \"{query}\"")).strong());
                    ui.label(
                        egui::RichText::new(center.to_string())
                            .color(theme::text_secondary(dark))
                            .small(),
                    );
                    if ui.small_button("✖ Clear location").clicked() {
                        self.dispatch(Action::ClearLocation);
                    }
                });
        }

        ui.add_space(8.0);
        ui.separator();

        // ── Filter summary ──────────────────────────────────────────
        let shown = self.state.visible_indices().len();
        let total = self.state.store.len();
        if self.state.criteria.is_empty() {
            ui.label(
                egui::RichText::new(format!("No filters ({total} events)"))
                    .color(theme::text_dim(dark))
                    .small(),
            );
        } else {
            ui.label(
                egui::RichText::new(format!("🟢 Filters active: {shown} of {total}"))
                    .color(theme::accent(dark))
                    .small(),
            );
            if ui
                .small_button("🗑️ Reset filters")
                .on_hover_text("Clear the magnitude threshold and the place search")
                .clicked()
            {
                self.dispatch(Action::ResetFilters);
            }
        }

        ui.add_space(8.0);

        // ── Legend ──────────────────────────────────────────────────
        ui.label(egui::RichText::new("Legend").color(theme::text_secondary(dark)));
        legend_row(ui, theme::SEVERITY_MINOR, &format!("Below M{MODERATE_MAGNITUDE:.0}"));
        legend_row(
            ui,
            theme::SEVERITY_MODERATE,
            &format!("M{MODERATE_MAGNITUDE:.0} to M{MAJOR_MAGNITUDE:.0}"),
        );
        legend_row(ui, theme::SEVERITY_MAJOR, &format!("M{MAJOR_MAGNITUDE:.0} and above"));
    }
}

fn legend_row(ui: &mut egui::Ui, color: egui::Color32, label: &str) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
        ui.painter().circle_filled(rect.center(), 5.0, color);
        ui.label(egui::RichText::new(label).small());
    });
}
