//! USGS GeoJSON summary feed: time windows, decoding, and the HTTP source.
//!
//! [`parse_feed`] is the pure decoding step and is all-or-nothing: a single
//! malformed feature fails the whole payload so a partial collection is
//! never installed. [`UsgsFeed`] performs the blocking request and is only
//! ever called from a worker thread.

use std::time::Duration;

use serde::Deserialize;

use crate::core::quake_record::{Coordinate, QuakeRecord};
use crate::util::constants::{FEED_BASE_URL, HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::util::error::{http_err, QuakeViewError, Result};

/// Lookback period selecting which feed snapshot to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum TimeWindow {
    #[default]
    PastDay,
    PastWeek,
    PastMonth,
}

impl TimeWindow {
    /// All windows in display order.
    pub const ALL: [TimeWindow; 3] = [Self::PastDay, Self::PastWeek, Self::PastMonth];

    /// Identifier used in the feed URL.
    pub fn feed_id(self) -> &'static str {
        match self {
            Self::PastDay => "all_day",
            Self::PastWeek => "all_week",
            Self::PastMonth => "all_month",
        }
    }

    /// Label shown in the toolbar selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::PastDay => "Past Day",
            Self::PastWeek => "Past Week",
            Self::PastMonth => "Past Month",
        }
    }

    /// Full feed URL for this window under `base_url`.
    pub fn feed_url(self, base_url: &str) -> String {
        format!("{}/{}.geojson", base_url.trim_end_matches('/'), self.feed_id())
    }
}

/// Anything that can produce the event collection for a time window.
///
/// The production implementation is [`UsgsFeed`]; tests substitute fakes.
pub trait FeedSource: Send + Sync {
    fn fetch(&self, window: TimeWindow) -> Result<Vec<QuakeRecord>>;
}

// ── Wire format ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    id: String,
    properties: Properties,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Properties {
    mag: Option<f64>,
    #[serde(rename = "magType")]
    mag_type: Option<String>,
    place: Option<String>,
    time: i64,
    url: Option<String>,
    title: Option<String>,
    felt: Option<u32>,
    tsunami: Option<u8>,
    alert: Option<String>,
    sig: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    /// `[lon, lat]` or `[lon, lat, depth_km]`.
    coordinates: Vec<f64>,
}

impl Feature {
    fn into_record(self) -> Result<QuakeRecord> {
        let (lon, lat) = match self.geometry.coordinates.as_slice() {
            [lon, lat, ..] => (*lon, *lat),
            other => {
                return Err(QuakeViewError::FeedFormat(format!(
                    "feature '{}' has {} coordinate(s), expected at least 2",
                    self.id,
                    other.len()
                )))
            }
        };
        let depth_km = self.geometry.coordinates.get(2).copied();
        let p = self.properties;

        Ok(QuakeRecord {
            id: self.id,
            magnitude: p.mag,
            mag_type: p.mag_type,
            place: p.place.unwrap_or_default(),
            time_ms: p.time,
            coordinate: Coordinate::new(lat, lon),
            depth_km,
            title: p.title,
            url: p.url,
            felt: p.felt,
            tsunami: p.tsunami.unwrap_or(0) != 0,
            alert: p.alert,
            significance: p.sig,
        })
    }
}

/// Decode a GeoJSON FeatureCollection into event records, preserving feed order.
///
/// # Errors
/// Returns [`QuakeViewError::FeedFormat`] if the payload is not valid JSON,
/// lacks `features`, or any feature is missing its id, time, or coordinates.
pub fn parse_feed(body: &str) -> Result<Vec<QuakeRecord>> {
    let collection: FeatureCollection =
        serde_json::from_str(body).map_err(|e| QuakeViewError::FeedFormat(e.to_string()))?;

    collection
        .features
        .into_iter()
        .map(Feature::into_record)
        .collect()
}

// ── HTTP source ─────────────────────────────────────────────────────────

/// Blocking client for the USGS summary feeds.
pub struct UsgsFeed {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl UsgsFeed {
    /// Build a client against the public feed endpoint.
    pub fn new() -> Result<Self> {
        Self::with_base_url(FEED_BASE_URL)
    }

    /// Build a client against an alternative base URL (mirrors, local fixtures).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| http_err("building feed client", &e))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

impl FeedSource for UsgsFeed {
    fn fetch(&self, window: TimeWindow) -> Result<Vec<QuakeRecord>> {
        let url = window.feed_url(&self.base_url);
        tracing::debug!("Fetching feed: {}", url);

        let context = format!("GET {url}");
        let body = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(|e| http_err(context, &e))?;

        let records = parse_feed(&body)?;
        tracing::debug!("Decoded {} events from {}", records.len(), window.feed_id());
        Ok(records)
    }
}
