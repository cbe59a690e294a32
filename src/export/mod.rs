//! Export of the visible event subset to CSV and JSON files.

pub mod csv_export;
pub mod json_export;
