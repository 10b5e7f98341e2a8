//! JSON export functionality
//!
//! Pretty-printed JSON serialization of a completed session snapshot
//! with full structure preservation.

use std::io::Write;
use std::path::Path;

use super::{ExportError, SessionExport};

/// Serialize a session export to pretty-printed JSON
pub fn session_to_json_string(export: &SessionExport) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(export)?)
}

/// Write a session export to a JSON file
pub fn write_session_json(export: &SessionExport, path: &Path) -> Result<(), ExportError> {
    let json = session_to_json_string(export)?;

    let mut file = std::fs::File::create(path)?;
    file.write_all(json.as_bytes())?;

    Ok(())
}
