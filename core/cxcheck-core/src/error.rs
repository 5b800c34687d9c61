use serde::Serialize;
use std::io;
use std::path::PathBuf;

/// Coarse failure category reported alongside every diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    NotFound,
    ParseError,
    MissingKey,
    TypeMismatch,
    EmptyCollection,
    SchemaViolation,
}

/// Object in the report that a required key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Root,
    Project,
    Totals,
    Averages,
    WorstOffenders,
    /// Element of `files`, by index.
    File(usize),
}

#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("Report file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Cannot read report file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{}", missing_key_message(.scope, .key))]
    MissingKey { scope: Scope, key: &'static str },
    #[error("{location} must be {expected}")]
    TypeMismatch {
        location: String,
        expected: &'static str,
    },
    #[error("No files in report")]
    EmptyCollection,
    #[error("Schema violation at {pointer}: {detail}")]
    SchemaViolation { pointer: String, detail: String },
}

impl ReportError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ReportError::NotFound(_) | ReportError::Unreadable { .. } => FailureKind::NotFound,
            ReportError::Parse(_) => FailureKind::ParseError,
            ReportError::MissingKey { .. } => FailureKind::MissingKey,
            ReportError::TypeMismatch { .. } => FailureKind::TypeMismatch,
            ReportError::EmptyCollection => FailureKind::EmptyCollection,
            ReportError::SchemaViolation { .. } => FailureKind::SchemaViolation,
        }
    }

    pub(crate) fn missing(scope: Scope, key: &'static str) -> Self {
        ReportError::MissingKey { scope, key }
    }

    pub(crate) fn mismatch(location: impl Into<String>, expected: &'static str) -> Self {
        ReportError::TypeMismatch {
            location: location.into(),
            expected,
        }
    }
}

fn missing_key_message(scope: &Scope, key: &str) -> String {
    match scope {
        Scope::Root => format!("Missing required key: {key}"),
        Scope::Project => format!("Missing project key: {key}"),
        Scope::Totals => format!("Missing totals.{key}"),
        Scope::Averages => format!("Missing averages.{key}"),
        Scope::WorstOffenders => format!("Missing worst_offenders.{key}"),
        Scope::File(index) => format!("Missing file key: {key} (files[{index}])"),
    }
}
