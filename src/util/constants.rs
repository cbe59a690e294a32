//! Application-wide constants for QuakeView.
//!
//! Centralising endpoints, thresholds and tuning values here keeps the rest
//! of the codebase clean and makes tuning straightforward.

/// Application display name used in titles, dialogs, etc.
pub const APP_NAME: &str = "QuakeView";

/// Application version string.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Base URL of the USGS GeoJSON summary feeds. The time-window identifier
/// and `.geojson` suffix are appended per request.
pub const FEED_BASE_URL: &str = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary";

/// Nominatim free-text search endpoint.
pub const GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Public page for a single event, used when the feed omits `url`.
pub const EVENT_PAGE_BASE_URL: &str = "https://earthquake.usgs.gov/earthquakes/eventpage";

/// `User-Agent` sent with every request. Nominatim rejects anonymous clients.
pub const USER_AGENT: &str = concat!("QuakeView/", env!("CARGO_PKG_VERSION"));

/// Timeout applied to every HTTP request.
pub const HTTP_TIMEOUT_SECS: u64 = 20;

/// Half-width, in degrees, of the latitude/longitude box used by a place
/// search. Events must lie strictly inside the box.
pub const SEARCH_HALF_WIDTH_DEG: f64 = 5.0;

/// Minimum-magnitude presets offered in the filter panel. `0.0` means "All".
pub const MAGNITUDE_PRESETS: &[f64] = &[0.0, 2.5, 4.0, 5.0];

/// Upper bound of the fine magnitude slider.
pub const MAX_MAGNITUDE_SLIDER: f64 = 9.0;

/// Magnitude at or above which a marker is drawn as moderate (orange).
pub const MODERATE_MAGNITUDE: f64 = 3.0;

/// Magnitude at or above which a marker is drawn as major (red).
pub const MAJOR_MAGNITUDE: f64 = 5.0;

/// Map centre `(lat, lon)` for the whole-world framing.
pub const WORLD_CENTER: (f64, f64) = (20.0, 0.0);

/// Zoom level for the whole-world framing.
pub const WORLD_ZOOM: u8 = 2;

/// Zoom level used when centring on the most recent event.
pub const RECENT_ZOOM: u8 = 5;

/// Size of the channel used to send worker results to the UI.
pub const CHANNEL_BOUND: usize = 16;

/// Row height in the event table (in logical pixels).
pub const TABLE_ROW_HEIGHT: f32 = 22.0;

/// How long a transient notice (export result, errors) stays on screen.
pub const NOTICE_TIMEOUT_SECS: u64 = 8;

/// Maximum number of worker errors retained for the status-bar tooltip.
pub const MAX_ERRORS: usize = 50;

/// Application data subdirectory name for logs.
pub const APP_DATA_DIR: &str = "QuakeView";

/// Log subdirectory name under the app data directory.
pub const LOG_DIR: &str = "logs";

/// Log file name for persistent debug logging.
pub const LOG_FILE_NAME: &str = "quakeview.log";

/// Environment variable holding the stderr log filter. Falls back to
/// `RUST_LOG`, then to [`DEFAULT_LOG_FILTER`].
pub const LOG_ENV_VAR: &str = "QUAKEVIEW_LOG";

/// Stderr filter when neither [`LOG_ENV_VAR`] nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Filter for the persistent log file: everything from this crate, and
/// request-level detail from the HTTP stack without its connection chatter.
pub const FILE_LOG_FILTER: &str = "info,quakeview=debug,QuakeView=debug,reqwest=debug,hyper_util=info";

/// Maximum log file size in bytes before rotation (5 MB).
pub const MAX_LOG_FILE_SIZE: u64 = 5 * 1024 * 1024;
