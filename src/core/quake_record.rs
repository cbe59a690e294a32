//! Canonical data structure for a single seismic event.
//!
//! Every feature in the USGS GeoJSON feed is decoded into a [`QuakeRecord`]
//! by [`crate::core::feed::parse_feed`]. Records are never mutated after
//! decoding; a new fetch replaces the whole collection.

use chrono::{DateTime, Utc};

use crate::util::constants::{EVENT_PAGE_BASE_URL, MAJOR_MAGNITUDE, MODERATE_MAGNITUDE};
use crate::util::time::epoch_ms_to_utc;

/// A geographic point in decimal degrees.
///
/// The feed delivers `[lon, lat]` while the geocoder and the map work in
/// `(lat, lon)`; naming the fields removes the ordering question entirely.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude, positive north.
    pub lat: f64,
    /// Longitude, positive east.
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ns = if self.lat >= 0.0 { 'N' } else { 'S' };
        let ew = if self.lon >= 0.0 { 'E' } else { 'W' };
        write!(f, "{:.3}°{ns}, {:.3}°{ew}", self.lat.abs(), self.lon.abs())
    }
}

/// Marker colour band derived from magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Below [`MODERATE_MAGNITUDE`] or unknown.
    Minor,
    /// At least [`MODERATE_MAGNITUDE`].
    Moderate,
    /// At least [`MAJOR_MAGNITUDE`].
    Major,
}

/// Represents a single decoded seismic event.
///
/// The struct is `Clone` (the selection holds its own copy) and
/// `serde::Serialize` (for JSON export).
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct QuakeRecord {
    /// Feed-assigned unique identifier, e.g. `"us7000abcd"`.
    pub id: String,

    /// Magnitude. The feed occasionally publishes `null` for events that
    /// have not been sized yet.
    pub magnitude: Option<f64>,

    /// Magnitude type (`"ml"`, `"mb"`, `"mww"`, ...), if reported.
    pub mag_type: Option<String>,

    /// Human-readable place description, e.g. `"10 km SW of Anza, CA"`.
    pub place: String,

    /// Occurrence time as integer epoch milliseconds.
    pub time_ms: i64,

    /// Epicentre.
    pub coordinate: Coordinate,

    /// Hypocentre depth in kilometres, if the feed supplied a third coordinate.
    pub depth_km: Option<f64>,

    /// Short title assigned by the feed, e.g. `"M 4.5 - 10 km SW of Anza, CA"`.
    pub title: Option<String>,

    /// Link to the provider's event page.
    pub url: Option<String>,

    /// Number of "felt" reports submitted.
    pub felt: Option<u32>,

    /// `true` when the provider flagged a possible tsunami.
    pub tsunami: bool,

    /// PAGER alert level (`"green"`, `"yellow"`, `"orange"`, `"red"`).
    pub alert: Option<String>,

    /// Provider significance score (0..=1000+).
    pub significance: Option<u32>,
}

impl QuakeRecord {
    /// Occurrence time as a UTC timestamp. Falls back to the Unix epoch for
    /// out-of-range values.
    pub fn timestamp(&self) -> DateTime<Utc> {
        epoch_ms_to_utc(self.time_ms).unwrap_or_default()
    }

    /// Returns the place text, or a placeholder when the feed left it empty.
    pub fn display_place(&self) -> &str {
        if self.place.is_empty() {
            "(unknown location)"
        } else {
            &self.place
        }
    }

    /// Magnitude formatted to one decimal, or `"?"` when unknown.
    pub fn display_magnitude(&self) -> String {
        match self.magnitude {
            Some(m) => format!("{m:.1}"),
            None => "?".into(),
        }
    }

    /// Colour band for the map marker.
    pub fn severity(&self) -> Severity {
        match self.magnitude {
            Some(m) if m >= MAJOR_MAGNITUDE => Severity::Major,
            Some(m) if m >= MODERATE_MAGNITUDE => Severity::Moderate,
            _ => Severity::Minor,
        }
    }

    /// Link to the event page, built from the id when the feed gave none.
    pub fn event_page_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!("{EVENT_PAGE_BASE_URL}/{}", self.id),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::quake;
    use super::*;

    #[test]
    fn test_severity_bands() {
        assert_eq!(quake("a", Some(2.9), 0.0, 0.0).severity(), Severity::Minor);
        assert_eq!(quake("b", Some(3.0), 0.0, 0.0).severity(), Severity::Moderate);
        assert_eq!(quake("c", Some(4.99), 0.0, 0.0).severity(), Severity::Moderate);
        assert_eq!(quake("d", Some(5.0), 0.0, 0.0).severity(), Severity::Major);
        assert_eq!(quake("e", None, 0.0, 0.0).severity(), Severity::Minor);
    }

    #[test]
    fn test_display_place_placeholder() {
        let mut q = quake("a", Some(1.0), 0.0, 0.0);
        q.place.clear();
        assert_eq!(q.display_place(), "(unknown location)");
    }

    #[test]
    fn test_event_page_url_fallback() {
        let q = quake("us7000abcd", Some(1.0), 0.0, 0.0);
        assert!(q.event_page_url().ends_with("/us7000abcd"));
    }

    #[test]
    fn test_coordinate_display_hemispheres() {
        let c = Coordinate::new(-33.5, 151.25);
        assert_eq!(c.to_string(), "33.500°S, 151.250°E");
    }
}
