//! Colour palette and style helpers for QuakeView's dark and light themes.
//!
//! Marker colours follow the usual traffic-light convention: green for
//! minor events, orange from M3, red from M5.

use egui::Color32;

use crate::core::quake_record::Severity;

// ── Background colours ──────────────────────────────────────────────────

/// Main window background.
pub const BG_DARK: Color32 = Color32::from_rgb(24, 28, 38);

/// Panel / sidebar background.
pub const BG_PANEL: Color32 = Color32::from_rgb(32, 36, 50);

/// Faint row striping.
pub const BG_ROW_FAINT: Color32 = Color32::from_rgb(36, 40, 56);

/// Currently selected / highlighted row.
pub const BG_SELECTED: Color32 = Color32::from_rgb(52, 62, 98);

// ── Text colours ────────────────────────────────────────────────────────

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(210, 212, 220);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(140, 146, 166);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 106, 126);

// ── Severity colours ────────────────────────────────────────────────────

pub const SEVERITY_MINOR: Color32 = Color32::from_rgb(76, 175, 80);
pub const SEVERITY_MODERATE: Color32 = Color32::from_rgb(255, 152, 0);
pub const SEVERITY_MAJOR: Color32 = Color32::from_rgb(229, 57, 53);

// ── Accent colours ──────────────────────────────────────────────────────

/// Primary accent (teal).
pub const ACCENT: Color32 = Color32::from_rgb(80, 200, 220);

/// Dimmer accent for secondary highlights.
pub const ACCENT_DIM: Color32 = Color32::from_rgb(60, 150, 170);

/// Warning banner text.
pub const WARNING: Color32 = Color32::from_rgb(230, 170, 60);

// ── Map colours ─────────────────────────────────────────────────────────

/// Ocean fill behind the graticule (dark / light).
const MAP_OCEAN_DARK: Color32 = Color32::from_rgb(18, 30, 48);
const MAP_OCEAN_LIGHT: Color32 = Color32::from_rgb(214, 230, 244);

/// Graticule line colour (dark / light).
const MAP_GRID_DARK: Color32 = Color32::from_rgb(44, 60, 84);
const MAP_GRID_LIGHT: Color32 = Color32::from_rgb(176, 196, 216);

/// Search box outline.
pub const MAP_SEARCH_BOX: Color32 = Color32::from_rgb(120, 170, 255);

// ── Helpers ─────────────────────────────────────────────────────────────

/// Return the marker colour for a severity band.
pub fn severity_color(severity: Severity) -> Color32 {
    match severity {
        Severity::Minor => SEVERITY_MINOR,
        Severity::Moderate => SEVERITY_MODERATE,
        Severity::Major => SEVERITY_MAJOR,
    }
}

pub fn text_secondary(dark: bool) -> Color32 {
    if dark {
        TEXT_SECONDARY
    } else {
        Color32::from_rgb(96, 100, 118)
    }
}

pub fn text_dim(dark: bool) -> Color32 {
    if dark {
        TEXT_DIM
    } else {
        Color32::from_rgb(130, 134, 150)
    }
}

pub fn accent(dark: bool) -> Color32 {
    if dark {
        ACCENT
    } else {
        Color32::from_rgb(20, 130, 150)
    }
}

pub fn map_ocean(dark: bool) -> Color32 {
    if dark {
        MAP_OCEAN_DARK
    } else {
        MAP_OCEAN_LIGHT
    }
}

pub fn map_grid(dark: bool) -> Color32 {
    if dark {
        MAP_GRID_DARK
    } else {
        MAP_GRID_LIGHT
    }
}

/// Apply the dark or light theme to the given egui context.
pub fn apply_theme(ctx: &egui::Context, dark: bool) {
    if dark {
        apply_dark_theme(ctx);
    } else {
        apply_light_theme(ctx);
    }
}

/// Apply the QuakeView dark theme.
pub fn apply_dark_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();

    // Background tones
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_DARK;
    visuals.faint_bg_color = BG_ROW_FAINT;

    visuals.override_text_color = Some(TEXT_PRIMARY);

    // Widget states
    visuals.widgets.inactive.bg_fill = Color32::from_rgb(44, 50, 70);
    visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.inactive.weak_bg_fill = Color32::from_rgb(40, 46, 64);
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(56, 64, 88);
    visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.active.bg_fill = Color32::from_rgb(66, 76, 104);
    visuals.widgets.noninteractive.bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, TEXT_SECONDARY);

    // Selection
    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = egui::Stroke::new(1.0, ACCENT);

    visuals.window_shadow = egui::Shadow::NONE;
    visuals.window_stroke = egui::Stroke::new(1.0, Color32::from_rgb(52, 58, 78));

    ctx.set_visuals(visuals);
}

/// Apply the QuakeView light theme.
pub fn apply_light_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::light();

    visuals.panel_fill = Color32::from_rgb(245, 246, 249);
    visuals.window_fill = Color32::from_rgb(250, 250, 252);
    visuals.extreme_bg_color = Color32::WHITE;
    visuals.faint_bg_color = Color32::from_rgb(236, 238, 243);

    visuals.override_text_color = Some(Color32::from_rgb(36, 40, 52));

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(224, 226, 234);
    visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, Color32::from_rgb(80, 84, 102));
    visuals.widgets.inactive.weak_bg_fill = Color32::from_rgb(230, 232, 238);
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(208, 212, 224);
    visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, Color32::from_rgb(36, 40, 52));
    visuals.widgets.active.bg_fill = Color32::from_rgb(192, 198, 214);
    visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(240, 241, 245);
    visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, Color32::from_rgb(100, 104, 122));

    visuals.selection.bg_fill = Color32::from_rgb(180, 212, 236);
    visuals.selection.stroke = egui::Stroke::new(1.0, Color32::from_rgb(40, 150, 180));

    visuals.window_shadow = egui::Shadow::NONE;
    visuals.window_stroke = egui::Stroke::new(1.0, Color32::from_rgb(200, 202, 212));

    ctx.set_visuals(visuals);
}
