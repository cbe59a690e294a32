//! Central map: an equirectangular projection painted with egui shapes.
//!
//! The camera comes from the reducer state; the map never changes it. Markers
//! are drawn for the visible subset only, and a click on a marker dispatches
//! [`Action::ActivateMarker`].

use egui::{Color32, Pos2, Rect, Shape, Stroke};

use crate::app::QuakeViewApp;
use crate::core::quake_record::{Coordinate, QuakeRecord};
use crate::core::state::Action;
use crate::core::view::Camera;
use crate::ui::theme;
use crate::util::constants::SEARCH_HALF_WIDTH_DEG;
use crate::util::time::{format_age, format_table_timestamp};

/// Extra pixels around a marker that still count as a hit.
const HIT_SLOP: f32 = 3.0;

/// Maps geographic coordinates to screen positions for one frame.
#[derive(Debug, Clone, Copy)]
pub struct MapProjection {
    rect: Rect,
    center: Coordinate,
    /// Pixels per degree, identical on both axes.
    scale: f32,
}

impl MapProjection {
    pub fn new(rect: Rect, camera: &Camera) -> Self {
        let scale = rect.width() / camera.lon_span() as f32;
        Self {
            rect,
            center: camera.center,
            scale: scale.max(f32::EPSILON),
        }
    }

    pub fn project(&self, point: Coordinate) -> Pos2 {
        let dx = (point.lon - self.center.lon) as f32 * self.scale;
        let dy = (point.lat - self.center.lat) as f32 * self.scale;
        Pos2::new(self.rect.center().x + dx, self.rect.center().y - dy)
    }

    pub fn unproject(&self, pos: Pos2) -> Coordinate {
        let lon = self.center.lon + f64::from((pos.x - self.rect.center().x) / self.scale);
        let lat = self.center.lat - f64::from((pos.y - self.rect.center().y) / self.scale);
        Coordinate::new(lat, lon)
    }

    /// Degrees covered by the viewport as `(lat_min, lat_max, lon_min, lon_max)`.
    fn bounds(&self) -> (f64, f64, f64, f64) {
        let top_left = self.unproject(self.rect.left_top());
        let bottom_right = self.unproject(self.rect.right_bottom());
        (bottom_right.lat, top_left.lat, top_left.lon, bottom_right.lon)
    }

    /// Graticule spacing that keeps roughly half a dozen lines on screen.
    fn grid_step(&self) -> f64 {
        let span = f64::from(self.rect.width() / self.scale);
        match span {
            s if s > 180.0 => 30.0,
            s if s > 60.0 => 10.0,
            s if s > 20.0 => 5.0,
            _ => 1.0,
        }
    }
}

/// Marker radius in points: larger quakes get larger dots.
pub fn marker_radius(event: &QuakeRecord) -> f32 {
    let magnitude = event.magnitude.unwrap_or(0.0).clamp(0.0, 9.5) as f32;
    4.0 + magnitude * 1.4
}

/// The visible event under `pointer`, preferring the one drawn on top.
///
/// `events` is in feed order (newest first) and is drawn back to front, so
/// the first hit in feed order is the topmost marker.
pub fn hit_test<'a, I>(projection: &MapProjection, events: I, pointer: Pos2) -> Option<&'a QuakeRecord>
where
    I: IntoIterator<Item = &'a QuakeRecord>,
{
    events.into_iter().find(|event| {
        let pos = projection.project(event.coordinate);
        pos.distance(pointer) <= marker_radius(event) + HIT_SLOP
    })
}

impl QuakeViewApp {
    /// Render the map into the remaining central area.
    pub fn render_map(&mut self, ui: &mut egui::Ui) {
        let dark = self.dark_mode;
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click());
        let rect = response.rect;
        let projection = MapProjection::new(rect, &self.state.camera());

        painter.rect_filled(rect, 0.0, theme::map_ocean(dark));
        paint_graticule(&painter, &projection, dark);

        // ── Search area ─────────────────────────────────────────────
        if let Some(area) = &self.state.criteria.location {
            let c = area.center;
            let corners = [
                Coordinate::new(c.lat + SEARCH_HALF_WIDTH_DEG, c.lon - SEARCH_HALF_WIDTH_DEG),
                Coordinate::new(c.lat + SEARCH_HALF_WIDTH_DEG, c.lon + SEARCH_HALF_WIDTH_DEG),
                Coordinate::new(c.lat - SEARCH_HALF_WIDTH_DEG, c.lon + SEARCH_HALF_WIDTH_DEG),
                Coordinate::new(c.lat - SEARCH_HALF_WIDTH_DEG, c.lon - SEARCH_HALF_WIDTH_DEG),
            ];
            let points = corners.iter().map(|&p| projection.project(p)).collect();
            painter.add(Shape::closed_line(points, Stroke::new(1.5, theme::MAP_SEARCH_BOX)));
        }

        // ── Markers (oldest first so the newest end up on top) ──────
        let outline = if dark { Color32::from_gray(230) } else { Color32::WHITE };
        let visible: Vec<&QuakeRecord> = self.state.visible_events().collect();
        for event in visible.iter().rev() {
            let pos = projection.project(event.coordinate);
            let radius = marker_radius(event);
            if !rect.expand(radius).contains(pos) {
                continue;
            }
            painter.circle(
                pos,
                radius,
                theme::severity_color(event.severity()),
                Stroke::new(1.5, outline),
            );
        }

        // ── Selected ring ───────────────────────────────────────────
        if let Some(selected) = self.state.selected() {
            let pos = projection.project(selected.coordinate);
            painter.circle_stroke(
                pos,
                marker_radius(selected) + 5.0,
                Stroke::new(2.5, theme::accent(dark)),
            );
        }

        if self.state.store.is_empty() && !self.state.loading {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "No events loaded",
                egui::FontId::proportional(16.0),
                theme::text_secondary(dark),
            );
        }

        // ── Hover and click ─────────────────────────────────────────
        let now = chrono::Utc::now();
        let hovered = response
            .hover_pos()
            .and_then(|p| hit_test(&projection, visible.iter().copied(), p))
            .cloned();
        let clicked = response
            .interact_pointer_pos()
            .filter(|_| response.clicked())
            .and_then(|p| hit_test(&projection, visible.iter().copied(), p))
            .cloned();

        if let Some(event) = hovered {
            let ts = event.timestamp();
            response.on_hover_ui_at_pointer(|ui| {
                ui.label(egui::RichText::new(event.display_place()).strong());
                ui.label(format!("Magnitude {}", event.display_magnitude()));
                ui.label(format!("{} ({})", format_table_timestamp(&ts), format_age(&ts, &now)));
            });
        }

        if let Some(event) = clicked {
            tracing::debug!("Marker activated: {}", event.id);
            self.dispatch(Action::ActivateMarker(event));
        }
    }

    /// Render the transient notice (failed fetch or lookup) above the map.
    pub fn render_notice_banner(&mut self, ui: &mut egui::Ui) {
        let Some(notice) = &self.state.notice else {
            return;
        };
        let text = notice.to_string();
        let mut dismiss = false;

        egui::Frame::new()
            .fill(ui.visuals().faint_bg_color)
            .stroke(Stroke::new(1.0, theme::WARNING))
            .corner_radius(4.0)
            .inner_margin(egui::Margin::same(6))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(format!("⚠ {text}")).color(theme::WARNING));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✖").on_hover_text("Dismiss (Esc)").clicked() {
                            dismiss = true;
                        }
                    });
                });
            });
        ui.add_space(4.0);

        if dismiss {
            self.dispatch(Action::DismissNotice);
        }
    }
}

fn paint_graticule(painter: &egui::Painter, projection: &MapProjection, dark: bool) {
    let grid = Stroke::new(0.5, theme::map_grid(dark));
    let equator = Stroke::new(1.0, theme::text_dim(dark));
    let rect = projection.rect;
    let step = projection.grid_step();
    let (lat_min, lat_max, lon_min, lon_max) = projection.bounds();

    let mut lon = (lon_min / step).floor() * step;
    while lon <= lon_max {
        let x = projection.project(Coordinate::new(0.0, lon)).x;
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], grid);
        lon += step;
    }

    let mut lat = (lat_min.max(-90.0) / step).floor() * step;
    while lat <= lat_max.min(90.0) {
        let y = projection.project(Coordinate::new(lat, 0.0)).y;
        let stroke = if lat == 0.0 { equator } else { grid };
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        lat += step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quake_record::test_support::quake;

    fn world_projection() -> MapProjection {
        let rect = Rect::from_min_size(Pos2::ZERO, egui::vec2(360.0, 180.0));
        MapProjection::new(rect, &Camera::world())
    }

    #[test]
    fn test_camera_center_projects_to_rect_center() {
        let projection = world_projection();
        let pos = projection.project(Camera::world().center);
        assert!((pos.x - 180.0).abs() < 1e-3);
        assert!((pos.y - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_north_is_up() {
        let projection = world_projection();
        let north = projection.project(Coordinate::new(40.0, 0.0));
        let south = projection.project(Coordinate::new(-40.0, 0.0));
        assert!(north.y < south.y);
    }

    #[test]
    fn test_unproject_inverts_project() {
        let projection = world_projection();
        let point = Coordinate::new(-33.9, 151.2);
        let back = projection.unproject(projection.project(point));
        assert!((back.lat - point.lat).abs() < 1e-3);
        assert!((back.lon - point.lon).abs() < 1e-3);
    }

    #[test]
    fn test_marker_radius_grows_with_magnitude() {
        let small = quake("a", Some(1.0), 0.0, 0.0);
        let large = quake("b", Some(6.0), 0.0, 0.0);
        let unknown = quake("c", None, 0.0, 0.0);
        assert!(marker_radius(&large) > marker_radius(&small));
        assert_eq!(marker_radius(&unknown), 4.0);
    }

    #[test]
    fn test_hit_test_prefers_newest() {
        let projection = world_projection();
        let newest = quake("new", Some(3.0), 20.0, 0.0);
        let older = quake("old", Some(3.0), 20.0, 0.0);
        let events = [newest, older];
        let pointer = projection.project(Coordinate::new(20.0, 0.0));
        let hit = hit_test(&projection, events.iter(), pointer);
        assert_eq!(hit.map(|e| e.id.as_str()), Some("new"));
    }

    #[test]
    fn test_hit_test_misses_empty_area() {
        let projection = world_projection();
        let events = [quake("a", Some(3.0), 20.0, 0.0)];
        let pointer = projection.project(Coordinate::new(-60.0, 120.0));
        assert!(hit_test(&projection, events.iter(), pointer).is_none());
    }
}
