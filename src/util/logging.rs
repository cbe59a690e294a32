//! Tracing setup: a stderr layer for interactive runs and a persistent
//! debug file under the platform's local data directory.

use std::path::{Path, PathBuf};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::util::constants::{
    APP_DATA_DIR, DEFAULT_LOG_FILTER, FILE_LOG_FILTER, LOG_DIR, LOG_ENV_VAR, LOG_FILE_NAME, MAX_LOG_FILE_SIZE,
};

/// Where the persistent log lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLocation {
    pub dir: PathBuf,
    pub file: PathBuf,
}

impl LogLocation {
    /// Create `<base>/QuakeView/logs` and rotate an oversized log out of the way.
    pub fn prepare(base: &Path) -> std::io::Result<Self> {
        let dir = base.join(APP_DATA_DIR).join(LOG_DIR);
        std::fs::create_dir_all(&dir)?;
        let file = dir.join(LOG_FILE_NAME);
        rotate_if_larger(&file, MAX_LOG_FILE_SIZE)?;
        Ok(Self { dir, file })
    }

    /// The log location under the local data directory, if the platform has one.
    pub fn platform_default() -> Option<Self> {
        let base = dirs::data_local_dir()?;
        match Self::prepare(&base) {
            Ok(location) => Some(location),
            Err(e) => {
                eprintln!("Log directory unavailable, logging to stderr only: {e}");
                None
            }
        }
    }
}

/// Move `file` to `<file>.old` once it exceeds `limit` bytes, replacing any
/// previous backup. Returns whether a rotation happened.
pub fn rotate_if_larger(file: &Path, limit: u64) -> std::io::Result<bool> {
    let size = match std::fs::metadata(file) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    if size <= limit {
        return Ok(false);
    }
    let mut backup = file.as_os_str().to_owned();
    backup.push(".old");
    std::fs::rename(file, PathBuf::from(backup))?;
    Ok(true)
}

/// Stderr filter: `QUAKEVIEW_LOG`, then `RUST_LOG`, then `info`.
pub fn stderr_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the global subscriber. The file layer is added when `location`
/// is given and the file can be opened for appending.
pub fn init(location: Option<&LogLocation>) {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(stderr_filter());

    let file = location.and_then(|loc| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&loc.file)
            .map_err(|e| eprintln!("Cannot open {}: {e}", loc.file.display()))
            .ok()
    });
    let file_layer = file.map(|file| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_names(true)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .with_filter(EnvFilter::new(FILE_LOG_FILTER))
    });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();
}
