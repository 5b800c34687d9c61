use crate::error::ReportError;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Read and parse a report. The file is fully read and closed before parsing.
pub fn read_report(path: &Path) -> Result<Value, ReportError> {
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ReportError::NotFound(path.to_path_buf()),
        _ => ReportError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "read report");
    let v: Value = serde_json::from_slice(&bytes)?;
    Ok(v)
}
