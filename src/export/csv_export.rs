//! CSV export for the visible event subset.
//!
//! Writes all currently visible events to a CSV file with standard columns.

use crate::core::quake_record::QuakeRecord;
use crate::util::error::QuakeViewError;
use crate::util::time::format_table_timestamp;
use std::path::Path;

/// Check that `path` can plausibly be written before opening it.
///
/// # Errors
/// Returns [`QuakeViewError::Export`] if the parent directory does not exist
/// or is not a directory.
pub fn validate_export_path(path: &Path) -> Result<(), QuakeViewError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        // A bare file name resolves against the current directory.
        _ => Path::new("."),
    };
    if !parent.exists() {
        return Err(QuakeViewError::Export(format!(
            "Target directory does not exist: {}",
            parent.display()
        )));
    }
    if !parent.is_dir() {
        return Err(QuakeViewError::Export(format!(
            "Target parent is not a directory: {}",
            parent.display()
        )));
    }
    Ok(())
}

/// Export the given events to a CSV file at `path`.
///
/// Columns: Time, Magnitude, MagType, Place, Latitude, Longitude, DepthKm, Id, Url.
///
/// # Errors
/// Returns [`QuakeViewError::Export`] if the file cannot be created or written.
pub fn export_csv(events: &[QuakeRecord], path: &Path) -> Result<(), QuakeViewError> {
    validate_export_path(path)?;

    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| QuakeViewError::Export(format!("Failed to create CSV file: {e}")))?;

    writer
        .write_record([
            "Time",
            "Magnitude",
            "MagType",
            "Place",
            "Latitude",
            "Longitude",
            "DepthKm",
            "Id",
            "Url",
        ])
        .map_err(|e| QuakeViewError::Export(format!("Failed to write CSV header: {e}")))?;

    for event in events {
        let depth = event.depth_km.map(|d| format!("{d:.1}")).unwrap_or_default();
        let magnitude = event.magnitude.map(|m| m.to_string()).unwrap_or_default();
        writer
            .write_record([
                format_table_timestamp(&event.timestamp()).as_str(),
                magnitude.as_str(),
                event.mag_type.as_deref().unwrap_or(""),
                event.place.as_str(),
                event.coordinate.lat.to_string().as_str(),
                event.coordinate.lon.to_string().as_str(),
                depth.as_str(),
                event.id.as_str(),
                event.event_page_url().as_str(),
            ])
            .map_err(|e| QuakeViewError::Export(format!("Failed to write CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| QuakeViewError::Export(format!("Failed to flush CSV: {e}")))?;

    tracing::info!("Exported {} events to CSV: {}", events.len(), path.display());
    Ok(())
}
