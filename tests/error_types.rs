//! Integration tests for error type construction and display.

use quakeview::util::error::QuakeViewError;

#[test]
fn http_error_displays_context_and_message() {
    let err = QuakeViewError::Http {
        context: "GET all_day feed".into(),
        message: "status 503".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("all_day"), "Error message should contain context: {msg}");
    assert!(msg.contains("503"), "Error message should contain detail: {msg}");
}

#[test]
fn feed_format_error_preserves_message() {
    let err = QuakeViewError::FeedFormat("missing field `features`".into());
    let msg = err.to_string();
    assert!(msg.contains("features"), "Should contain detail: {msg}");
}

#[test]
fn location_not_found_quotes_query() {
    let err = QuakeViewError::LocationNotFound("Atlantis".into());
    assert_eq!(err.to_string(), "No location found for \"Atlantis\"");
}

#[test]
fn export_error_preserves_message() {
    let err = QuakeViewError::Export("disk full".into());
    let msg = err.to_string();
    assert!(msg.contains("disk full"), "Should contain detail: {msg}");
}

#[test]
fn io_error_converts() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no access");
    let err: QuakeViewError = io_err.into();
    let msg = err.to_string();
    assert!(msg.contains("no access"), "Should preserve IO error: {msg}");
}

#[test]
fn error_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    // Errors travel from worker threads over crossbeam channels
    assert_send_sync::<QuakeViewError>();
}

#[test]
fn worker_error_preserves_panic_detail() {
    let err = QuakeViewError::Worker("feed fetch panicked: index out of bounds".into());
    let msg = err.to_string();
    assert!(msg.starts_with("Worker failed"), "Should name the failure: {msg}");
    assert!(msg.contains("index out of bounds"), "Should contain detail: {msg}");
}
