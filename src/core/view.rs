//! Map framing: the two display modes and the camera they produce.

use crate::core::quake_record::{Coordinate, QuakeRecord};
use crate::util::constants::{RECENT_ZOOM, WORLD_CENTER, WORLD_ZOOM};

/// Whether the map shows the whole world or centres on the latest event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum ViewMode {
    #[default]
    World,
    Recent,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::World => Self::Recent,
            Self::Recent => Self::World,
        }
    }

    /// Label for the button that switches *away* from this mode.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::World => "View Recent Quake",
            Self::Recent => "View World Map",
        }
    }
}

/// Map centre and zoom level.
///
/// Zoom follows the slippy-map convention: each step halves the visible span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub center: Coordinate,
    pub zoom: u8,
}

impl Camera {
    pub fn world() -> Self {
        Self {
            center: Coordinate::new(WORLD_CENTER.0, WORLD_CENTER.1),
            zoom: WORLD_ZOOM,
        }
    }

    /// Longitude span, in degrees, that fits across the viewport width.
    /// Zoom 1 shows the full 360°.
    pub fn lon_span(&self) -> f64 {
        360.0 / f64::from(1u32 << self.zoom.saturating_sub(1).min(20))
    }
}

/// Choose the camera for `mode`.
///
/// `Recent` centres on the first visible event (the feed is newest first);
/// with nothing visible it falls back to the world framing.
pub fn camera(mode: ViewMode, events: &[QuakeRecord], visible: &[usize]) -> Camera {
    match mode {
        ViewMode::World => Camera::world(),
        ViewMode::Recent => visible
            .first()
            .and_then(|&i| events.get(i))
            .map(|event| Camera {
                center: event.coordinate,
                zoom: RECENT_ZOOM,
            })
            .unwrap_or_else(Camera::world),
    }
}
