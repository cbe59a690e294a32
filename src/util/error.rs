//! Unified error types for QuakeView.
//!
//! All fallible operations throughout the codebase return `Result<T, QuakeViewError>`.
//! This ensures consistent error reporting and clean propagation via the `?` operator.

/// Unified error type used throughout QuakeView.
///
/// Each variant captures enough context to produce an actionable message for
/// the user or for log output.
#[derive(Debug, thiserror::Error)]
pub enum QuakeViewError {
    /// A network request failed or returned a non-success status.
    /// `context` names the request that failed.
    #[error("HTTP error: {context}: {message}")]
    Http {
        /// Human-readable description of the request that failed.
        context: String,
        /// Transport or status detail.
        message: String,
    },

    /// The seismic feed responded but the payload did not have the expected shape.
    #[error("Feed format error: {0}")]
    FeedFormat(String),

    /// The geocoder responded but a candidate could not be decoded.
    #[error("Geocoding error: {0}")]
    Geocode(String),

    /// The geocoder returned no candidates for the query.
    #[error("No location found for \"{0}\"")]
    LocationNotFound(String),

    /// A background worker panicked before it could report a result.
    #[error("Worker failed: {0}")]
    Worker(String),

    /// Export (CSV or JSON) failed, typically an I/O error.
    #[error("Export failed: {0}")]
    Export(String),

    /// Catch-all for I/O errors (file writes, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QuakeViewError>;

/// Build a [`QuakeViewError::Http`] from a `reqwest` error and a context string.
///
/// # Example
/// ```ignore
/// http_err("GET all_day feed", &e)
/// ```
pub fn http_err(context: impl Into<String>, err: &reqwest::Error) -> QuakeViewError {
    QuakeViewError::Http {
        context: context.into(),
        message: err.to_string(),
    }
}
