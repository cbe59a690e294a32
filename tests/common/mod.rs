//! Shared fixtures for integration tests.

use quakeview::core::feed::parse_feed;
use quakeview::core::quake_record::QuakeRecord;

/// Build a GeoJSON FeatureCollection body from `(id, mag, lat, lon)` tuples.
pub fn feed_body(items: &[(&str, Option<f64>, f64, f64)]) -> String {
    let features: Vec<serde_json::Value> = items
        .iter()
        .enumerate()
        .map(|(i, (id, mag, lat, lon))| {
            serde_json::json!({
                "type": "Feature",
                "id": id,
                "properties": {
                    "mag": mag,
                    "magType": "ml",
                    "place": format!("{i} km N of Somewhere"),
                    "time": 1_700_000_000_000_i64 - i as i64 * 60_000,
                    "url": format!("https://earthquake.usgs.gov/earthquakes/eventpage/{id}"),
                    "title": format!("M {} - test", mag.unwrap_or(0.0)),
                    "tsunami": 0,
                    "sig": 100
                },
                "geometry": { "type": "Point", "coordinates": [lon, lat, 10.0] }
            })
        })
        .collect();
    serde_json::json!({ "type": "FeatureCollection", "features": features }).to_string()
}

/// Decode fixture events through the real feed parser.
pub fn events(items: &[(&str, Option<f64>, f64, f64)]) -> Vec<QuakeRecord> {
    parse_feed(&feed_body(items)).expect("fixture feed must parse")
}
