use crate::error::ReportError;
use anyhow::{anyhow, Context, Result};
use jsonschema::Validator;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// An external JSON Schema applied after the built-in checklist.
pub struct ReportSchema {
    path: PathBuf,
    compiled: Validator,
}

impl ReportSchema {
    pub fn load(schema_path: &Path) -> Result<Self> {
        let schema_str = fs::read_to_string(schema_path)
            .with_context(|| format!("reading schema: {}", schema_path.display()))?;
        let schema_json: Value = serde_json::from_str(&schema_str)
            .with_context(|| format!("parsing schema json: {}", schema_path.display()))?;
        let compiled = Validator::new(&schema_json)
            .map_err(|e| anyhow!("compiling schema {}: {e}", schema_path.display()))?;
        Ok(Self {
            path: schema_path.to_path_buf(),
            compiled,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reports only the first violation.
    pub fn check(&self, report: &Value) -> Result<(), ReportError> {
        if let Err(mut errors) = self.compiled.validate(report) {
            if let Some(first) = errors.next() {
                let pointer = first.instance_path.to_string();
                return Err(ReportError::SchemaViolation {
                    pointer: if pointer.is_empty() { "/".to_string() } else { pointer },
                    detail: first.to_string(),
                });
            }
        }
        Ok(())
    }
}
