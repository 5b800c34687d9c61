pub mod checks;
pub mod load;
pub mod models;
pub mod schema;

use crate::error::ReportError;
use anyhow::Result;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

pub use models::{Outcome, PASSED_MESSAGE};
pub use schema::ReportSchema;

/// Runs the report checklist, optionally followed by an external schema.
#[derive(Default)]
pub struct Validator {
    schema: Option<ReportSchema>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(mut self, schema_path: &Path) -> Result<Self> {
        self.schema = Some(ReportSchema::load(schema_path)?);
        Ok(self)
    }

    pub fn validate_value(&self, report: &Value) -> Result<(), ReportError> {
        checks::run_checklist(report)?;
        if let Some(schema) = &self.schema {
            debug!(schema = %schema.path().display(), "applying schema");
            schema.check(report)?;
        }
        Ok(())
    }

    pub fn validate_path(&self, path: &Path) -> Result<(), ReportError> {
        let report = load::read_report(path)?;
        self.validate_value(&report)
    }

    pub fn outcome(&self, path: &Path) -> Outcome {
        match self.validate_path(path) {
            Ok(()) => {
                info!(path = %path.display(), "report valid");
                Outcome::passed(path)
            }
            Err(e) => {
                info!(path = %path.display(), kind = ?e.kind(), "report invalid");
                Outcome::failed(path, &e)
            }
        }
    }
}

/// Validate a report file with the built-in checklist only.
pub fn validate_report(path: &Path) -> Outcome {
    Validator::new().outcome(path)
}
