//! Free-text place lookup against the Nominatim search API.
//!
//! Only the first candidate is ever used. There is no caching and no
//! debounce: each explicit search performs a new request.

use std::time::Duration;

use serde::Deserialize;

use crate::core::quake_record::Coordinate;
use crate::util::constants::{GEOCODER_URL, HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::util::error::{http_err, QuakeViewError, Result};

/// Anything that can turn a place name into a coordinate.
///
/// The production implementation is [`NominatimGeocoder`]; tests substitute fakes.
pub trait Geocoder: Send + Sync {
    /// Resolve `query` to the coordinate of its best match.
    ///
    /// # Errors
    /// [`QuakeViewError::LocationNotFound`] when the provider has no match,
    /// [`QuakeViewError::Geocode`] or [`QuakeViewError::Http`] otherwise.
    fn resolve(&self, query: &str) -> Result<Coordinate>;
}

/// One search candidate. Nominatim encodes coordinates as decimal strings.
#[derive(Debug, Deserialize)]
struct Candidate {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// Decode a Nominatim response body and return the first candidate's coordinate.
pub fn parse_candidates(query: &str, body: &str) -> Result<Coordinate> {
    let candidates: Vec<Candidate> =
        serde_json::from_str(body).map_err(|e| QuakeViewError::Geocode(e.to_string()))?;

    let first = candidates
        .into_iter()
        .next()
        .ok_or_else(|| QuakeViewError::LocationNotFound(query.to_owned()))?;

    let parse = |axis: &str, raw: &str| {
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| QuakeViewError::Geocode(format!("invalid {axis} \"{raw}\"")))
    };
    let coordinate = Coordinate::new(parse("latitude", &first.lat)?, parse("longitude", &first.lon)?);

    tracing::debug!(
        "Resolved \"{}\" to {} ({})",
        query,
        coordinate,
        first.display_name.as_deref().unwrap_or("unnamed")
    );
    Ok(coordinate)
}

/// Blocking client for the Nominatim `/search` endpoint.
pub struct NominatimGeocoder {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl NominatimGeocoder {
    pub fn new() -> Result<Self> {
        Self::with_endpoint(GEOCODER_URL)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| http_err("building geocoder client", &e))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl Geocoder for NominatimGeocoder {
    fn resolve(&self, query: &str) -> Result<Coordinate> {
        let context = format!("geocode \"{query}\"");
        let body = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query), ("format", "json")])
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(|e| http_err(context, &e))?;

        parse_candidates(query, &body)
    }
}
