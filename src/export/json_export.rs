//! JSON export for the visible event subset.
//!
//! Serialises the event list as a pretty-printed JSON array using Serde.

use crate::core::quake_record::QuakeRecord;
use crate::export::csv_export::validate_export_path;
use crate::util::error::QuakeViewError;
use std::path::Path;

/// Export the given events to a JSON file at `path`.
///
/// Output is a pretty-printed JSON array of [`QuakeRecord`] objects.
///
/// # Errors
/// Returns [`QuakeViewError::Export`] if the file cannot be created or written.
pub fn export_json(events: &[QuakeRecord], path: &Path) -> Result<(), QuakeViewError> {
    validate_export_path(path)?;

    let file = std::fs::File::create(path)
        .map_err(|e| QuakeViewError::Export(format!("Failed to create JSON file: {e}")))?;

    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, events)
        .map_err(|e| QuakeViewError::Export(format!("Failed to write JSON: {e}")))?;

    // BufWriter::drop swallows flush errors.
    use std::io::Write;
    writer
        .flush()
        .map_err(|e| QuakeViewError::Export(format!("Failed to flush JSON output: {e}")))?;

    tracing::info!("Exported {} events to JSON: {}", events.len(), path.display());
    Ok(())
}
