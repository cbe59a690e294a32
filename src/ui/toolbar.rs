//! Top toolbar: time window selector, refresh, view toggle and export.

use crate::app::QuakeViewApp;
use crate::app_actions::ExportFormat;
use crate::core::feed::TimeWindow;
use crate::core::state::Action;
use crate::ui::theme;

impl QuakeViewApp {
    /// Render the top toolbar within the given `Ui` region.
    ///
    /// Contains the time window selector, refresh control, the world /
    /// recent toggle, and the export dropdown.
    pub fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_centered(|ui| {
            ui.spacing_mut().item_spacing.x = 8.0;

            // ── Time window selector ────────────────────────────────
            let mut window = self.state.time_window;
            egui::ComboBox::from_id_salt("time_window")
                .selected_text(window.label())
                .width(120.0)
                .show_ui(ui, |ui| {
                    for option in TimeWindow::ALL {
                        ui.selectable_value(&mut window, option, option.label());
                    }
                });
            if window != self.state.time_window {
                self.dispatch(Action::SelectTimeWindow(window));
            }

            // ── Refresh ─────────────────────────────────────────────
            if self.state.loading {
                ui.spinner();
                ui.label(egui::RichText::new("Loading…").color(theme::text_secondary(self.dark_mode)));
            } else if ui
                .button("🔄 Refresh")
                .on_hover_text("Fetch the feed again (F5)")
                .clicked()
            {
                self.dispatch(Action::Refresh);
            }

            ui.separator();

            // ── View toggle ─────────────────────────────────────────
            let toggle_label = self.state.view_mode.toggle_label();
            if ui
                .button(format!("🌍 {toggle_label}"))
                .on_hover_text("Switch map framing (Ctrl+W)")
                .clicked()
            {
                self.dispatch(Action::ToggleViewMode);
            }

            ui.separator();

            // ── Export dropdown ─────────────────────────────────────
            ui.menu_button("📤 Export", |ui| {
                if ui.button("📄 Export to CSV...").clicked() {
                    self.export_visible(ExportFormat::Csv);
                    ui.close_menu();
                }
                if ui.button("📋 Export to JSON...").clicked() {
                    self.export_visible(ExportFormat::Json);
                    ui.close_menu();
                }
            });

            // ── Right-aligned app title + about + theme toggle ──────
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let about_btn = ui.add(
                    egui::Button::new(egui::RichText::new("ℹ").size(14.0)).min_size(egui::vec2(22.0, 22.0)),
                );
                if about_btn.on_hover_text("About QuakeView").clicked() {
                    self.show_about = true;
                }

                let theme_icon = if self.dark_mode { "☀" } else { "🌙" };
                let theme_tooltip = if self.dark_mode {
                    "Switch to light mode"
                } else {
                    "Switch to dark mode"
                };
                let theme_btn = ui.add(
                    egui::Button::new(egui::RichText::new(theme_icon).size(14.0))
                        .min_size(egui::vec2(22.0, 22.0)),
                );
                if theme_btn.on_hover_text(theme_tooltip).clicked() {
                    self.dark_mode = !self.dark_mode;
                    theme::apply_theme(ui.ctx(), self.dark_mode);
                }

                ui.label(
                    egui::RichText::new("🌋 QuakeView")
                        .color(theme::accent(self.dark_mode))
                        .strong()
                        .size(16.0),
                );
            });
        });
    }
}
