use crate::error::{FailureKind, ReportError};
use serde::Serialize;
use std::path::Path;

pub const REPORT_KEYS: [&str; 5] = ["version", "timestamp", "project", "files", "worst_offenders"];

pub const PROJECT_KEYS: [&str; 5] = [
    "total_files",
    "successful_files",
    "failed_files",
    "totals",
    "averages",
];

pub const TOTALS_KEYS: [&str; 2] = ["cc", "cog"];

pub const AVERAGES_KEYS: [&str; 3] = ["cc", "cog", "confidence"];

pub const WORST_OFFENDERS_KEYS: [&str; 2] = ["cc", "cog"];

pub const FILE_KEYS: [&str; 5] = ["file", "success", "cc", "cog", "confidence"];

pub const PASSED_MESSAGE: &str = "Report validation passed";

/// Result of validating one report file.
#[derive(Debug, Serialize)]
pub struct Outcome {
    pub path: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FailureKind>,
    pub message: String,
}

impl Outcome {
    pub fn passed(path: &Path) -> Self {
        Self {
            path: path.display().to_string(),
            valid: true,
            kind: None,
            message: PASSED_MESSAGE.to_string(),
        }
    }

    pub fn failed(path: &Path, err: &ReportError) -> Self {
        Self {
            path: path.display().to_string(),
            valid: false,
            kind: Some(err.kind()),
            message: err.to_string(),
        }
    }
}
