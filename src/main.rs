//! QuakeView: a desktop viewer for the USGS earthquake feed.
//!
//! Entry point: initialises structured logging and launches the eframe
//! application window.

// Hide the console window in release builds on Windows.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// Declare crate modules
mod app;
mod app_actions;
mod app_update;
mod core;
mod export;
mod ui;
mod util;

use app::QuakeViewApp;
use util::constants;

fn main() -> eframe::Result<()> {
    let log_location = util::logging::LogLocation::platform_default();
    util::logging::init(log_location.as_ref());

    tracing::info!("{} v{} starting", constants::APP_NAME, constants::APP_VERSION);
    match &log_location {
        Some(loc) => tracing::info!("Log file: {}", loc.file.display()),
        None => tracing::warn!("No persistent log; stderr only"),
    }

    // Build the HTTP clients before the window opens so the creator
    // closure stays trivial.
    let pre_init = app::PreInitState::build();

    let viewport = egui::ViewportBuilder::default()
        .with_title(format!("{} v{}", constants::APP_NAME, constants::APP_VERSION))
        .with_inner_size([1280.0, 820.0])
        .with_min_inner_size([820.0, 520.0]);

    let options = eframe::NativeOptions {
        viewport,
        persist_window: true,
        ..Default::default()
    };

    eframe::run_native(
        constants::APP_NAME,
        options,
        Box::new(move |cc| Ok(Box::new(QuakeViewApp::from_pre_init(cc, pre_init)))),
    )
}
