//! Validation of code-complexity report documents.
//!
//! A report is checked against a fixed, ordered list of key-presence checks;
//! the first failure is returned as a [`ReportError`].

pub mod error;
pub mod report;

pub use error::{FailureKind, ReportError, Scope};
pub use report::{validate_report, Outcome, Validator};
