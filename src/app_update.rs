//! Frame-by-frame update loop.
//!
//! Contains the [`eframe::App`] implementation for `QuakeViewApp`, plus the
//! worker-message draining that feeds results back into the reducer.

use crate::app::QuakeViewApp;
use crate::core::state::Action;

impl QuakeViewApp {
    /// Poll the worker channel and apply every finished request.
    ///
    /// Called once per frame. Non-blocking: uses `try_recv` in a loop to
    /// drain all available messages.
    pub(crate) fn process_worker_messages(&mut self) {
        while let Ok(msg) = self.worker_rx.try_recv() {
            self.dispatch(Action::from(msg));
        }
    }
}

// ── eframe::App implementation ──────────────────────────────────────────

impl eframe::App for QuakeViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // 1. Apply finished network requests
        self.process_worker_messages();

        // 2. Process export completion messages
        self.process_export_messages();

        // 3. Keep repainting while anything is in flight (to poll messages)
        if self.state.loading || self.state.resolving || self.export_rx.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        // 4. Handle keyboard shortcuts
        self.handle_keyboard_shortcuts(ctx);

        // ── Top toolbar ─────────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .exact_height(36.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                self.render_toolbar(ui);
            });

        // ── Bottom status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(26.0)
            .show(ctx, |ui| {
                self.render_status_bar(ui);
            });

        // ── Bottom event list ───────────────────────────────────────
        egui::TopBottomPanel::bottom("event_table")
            .resizable(true)
            .default_height(220.0)
            .min_height(90.0)
            .show(ctx, |ui| {
                self.render_event_table(ui);
            });

        // ── Left filter panel ───────────────────────────────────────
        egui::SidePanel::left("filter_panel")
            .resizable(true)
            .default_width(220.0)
            .min_width(180.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.render_filter_panel(ui);
                });
            });

        // ── Central map ─────────────────────────────────────────────
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_notice_banner(ui);
            self.render_map(ui);
        });

        // ── Floating windows ────────────────────────────────────────
        self.render_detail_window(ctx);
        self.render_about_dialog(ctx);
    }

    /// Persist user preferences to eframe storage on shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.save_preferences(storage);
    }
}
