//! Validates that compile-time constants are internally consistent.
#![allow(clippy::assertions_on_constants)]

use quakeview::util::constants::*;

#[test]
fn channel_bound_is_positive() {
    assert!(CHANNEL_BOUND > 0, "CHANNEL_BOUND must be > 0");
}

#[test]
fn max_errors_is_bounded() {
    assert!(MAX_ERRORS > 0, "MAX_ERRORS must be > 0");
    assert!(MAX_ERRORS <= 10_000, "MAX_ERRORS should be bounded");
}

#[test]
fn endpoints_use_https() {
    for url in [FEED_BASE_URL, GEOCODER_URL, EVENT_PAGE_BASE_URL] {
        assert!(url.starts_with("https://"), "Endpoint must use HTTPS: {url}");
        assert!(!url.ends_with('/'), "Endpoint must not end with a slash: {url}");
    }
}

#[test]
fn user_agent_names_the_app() {
    assert!(USER_AGENT.starts_with(APP_NAME));
    assert!(USER_AGENT.contains(APP_VERSION));
}

#[test]
fn search_box_is_five_degrees() {
    assert_eq!(SEARCH_HALF_WIDTH_DEG, 5.0);
}

#[test]
fn magnitude_presets_are_sorted_and_in_range() {
    assert_eq!(MAGNITUDE_PRESETS.first(), Some(&0.0), "First preset must be 'All'");
    assert!(MAGNITUDE_PRESETS.windows(2).all(|w| w[0] < w[1]));
    assert!(MAGNITUDE_PRESETS.iter().all(|&m| m <= MAX_MAGNITUDE_SLIDER));
}

#[test]
fn severity_thresholds_are_ordered() {
    assert!(0.0 < MODERATE_MAGNITUDE && MODERATE_MAGNITUDE < MAJOR_MAGNITUDE);
}

#[test]
fn recent_view_zooms_closer_than_world() {
    assert!(RECENT_ZOOM > WORLD_ZOOM);
    assert!((-90.0..=90.0).contains(&WORLD_CENTER.0));
    assert!((-180.0..=180.0).contains(&WORLD_CENTER.1));
}

#[test]
fn timeouts_are_reasonable() {
    assert!(HTTP_TIMEOUT_SECS >= 5 && HTTP_TIMEOUT_SECS <= 120);
    assert!(NOTICE_TIMEOUT_SECS > 0);
}

#[test]
fn table_row_height_is_positive() {
    assert!(TABLE_ROW_HEIGHT > 0.0);
}

#[test]
fn log_file_size_is_reasonable() {
    assert!(MAX_LOG_FILE_SIZE >= 1024 * 1024, "Log file limit should be at least 1MB");
    assert!(MAX_LOG_FILE_SIZE <= 100 * 1024 * 1024, "Log file limit should not exceed 100MB");
}

#[test]
fn app_metadata_is_populated() {
    assert!(!APP_NAME.is_empty(), "APP_NAME must not be empty");
    assert!(!APP_VERSION.is_empty(), "APP_VERSION must not be empty");
    assert!(!LOG_FILE_NAME.is_empty());
}

#[test]
fn log_filters_are_set() {
    assert!(!LOG_ENV_VAR.is_empty());
    assert!(!DEFAULT_LOG_FILTER.is_empty());
    assert!(FILE_LOG_FILTER.contains("quakeview=debug"));
}
