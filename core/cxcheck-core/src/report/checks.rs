use super::models::*;
use crate::error::{ReportError, Scope};
use serde_json::{Map, Value};
use tracing::debug;

/// One named predicate over a parsed report.
pub struct Check {
    pub name: &'static str,
    pub run: fn(&Value) -> Result<(), ReportError>,
}

/// Checks in the order they are applied. The first failure ends the run.
pub const CHECKLIST: &[Check] = &[
    Check { name: "report keys", run: check_report_keys },
    Check { name: "project keys", run: check_project_keys },
    Check { name: "project.totals keys", run: check_totals_keys },
    Check { name: "project.averages keys", run: check_averages_keys },
    Check { name: "worst_offenders keys", run: check_worst_offenders_keys },
    Check { name: "files is an array", run: check_files_is_array },
    Check { name: "files is not empty", run: check_files_not_empty },
    Check { name: "file entry keys", run: check_file_entries },
];

pub fn run_checklist(report: &Value) -> Result<(), ReportError> {
    for check in CHECKLIST {
        debug!(check = check.name, "running check");
        (check.run)(report)?;
    }
    Ok(())
}

fn as_object<'a>(value: &'a Value, location: &str) -> Result<&'a Map<String, Value>, ReportError> {
    value
        .as_object()
        .ok_or_else(|| ReportError::mismatch(location, "an object"))
}

fn require_keys(obj: &Map<String, Value>, scope: Scope, keys: &[&'static str]) -> Result<(), ReportError> {
    match keys.iter().find(|k| !obj.contains_key(**k)) {
        Some(key) => Err(ReportError::missing(scope, *key)),
        None => Ok(()),
    }
}

fn field<'a>(obj: &'a Map<String, Value>, scope: Scope, key: &'static str) -> Result<&'a Value, ReportError> {
    obj.get(key).ok_or_else(|| ReportError::missing(scope, key))
}

fn root(report: &Value) -> Result<&Map<String, Value>, ReportError> {
    as_object(report, "report")
}

fn project(report: &Value) -> Result<&Map<String, Value>, ReportError> {
    as_object(field(root(report)?, Scope::Root, "project")?, "project")
}

fn files(report: &Value) -> Result<&Vec<Value>, ReportError> {
    field(root(report)?, Scope::Root, "files")?
        .as_array()
        .ok_or_else(|| ReportError::mismatch("files", "an array"))
}

pub fn check_report_keys(report: &Value) -> Result<(), ReportError> {
    require_keys(root(report)?, Scope::Root, &REPORT_KEYS)
}

pub fn check_project_keys(report: &Value) -> Result<(), ReportError> {
    require_keys(project(report)?, Scope::Project, &PROJECT_KEYS)
}

pub fn check_totals_keys(report: &Value) -> Result<(), ReportError> {
    let totals = field(project(report)?, Scope::Project, "totals")?;
    require_keys(as_object(totals, "project.totals")?, Scope::Totals, &TOTALS_KEYS)
}

pub fn check_averages_keys(report: &Value) -> Result<(), ReportError> {
    let averages = field(project(report)?, Scope::Project, "averages")?;
    require_keys(as_object(averages, "project.averages")?, Scope::Averages, &AVERAGES_KEYS)
}

pub fn check_worst_offenders_keys(report: &Value) -> Result<(), ReportError> {
    let worst = field(root(report)?, Scope::Root, "worst_offenders")?;
    require_keys(
        as_object(worst, "worst_offenders")?,
        Scope::WorstOffenders,
        &WORST_OFFENDERS_KEYS,
    )
}

pub fn check_files_is_array(report: &Value) -> Result<(), ReportError> {
    files(report).map(|_| ())
}

pub fn check_files_not_empty(report: &Value) -> Result<(), ReportError> {
    if files(report)?.is_empty() {
        return Err(ReportError::EmptyCollection);
    }
    Ok(())
}

pub fn check_file_entries(report: &Value) -> Result<(), ReportError> {
    for (index, entry) in files(report)?.iter().enumerate() {
        let obj = as_object(entry, &format!("files[{index}]"))?;
        require_keys(obj, Scope::File(index), &FILE_KEYS)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use serde_json::json;

    fn valid_report() -> Value {
        json!({
            "version": 1,
            "timestamp": "t",
            "project": {
                "total_files": 1,
                "successful_files": 1,
                "failed_files": 0,
                "totals": {"cc": 1, "cog": 1},
                "averages": {"cc": 1, "cog": 1, "confidence": 1}
            },
            "files": [{"file": "a.py", "success": true, "cc": 1, "cog": 1, "confidence": 1}],
            "worst_offenders": {"cc": [], "cog": []}
        })
    }

    fn remove(report: &mut Value, pointer: &str, key: &str) {
        report
            .pointer_mut(pointer)
            .and_then(Value::as_object_mut)
            .unwrap()
            .remove(key);
    }

    fn message(report: &Value) -> String {
        run_checklist(report).unwrap_err().to_string()
    }

    #[test]
    fn well_formed_report_passes() {
        run_checklist(&valid_report()).unwrap();
    }

    #[test]
    fn empty_object_reports_version_first() {
        assert_eq!(message(&json!({})), "Missing required key: version");
    }

    #[test]
    fn each_missing_top_level_key_is_named() {
        for key in REPORT_KEYS {
            let mut report = valid_report();
            remove(&mut report, "", key);
            let err = run_checklist(&report).unwrap_err();
            assert_eq!(err.kind(), FailureKind::MissingKey);
            assert_eq!(err.to_string(), format!("Missing required key: {key}"));
        }
    }

    #[test]
    fn each_missing_project_key_is_named() {
        for key in PROJECT_KEYS {
            let mut report = valid_report();
            remove(&mut report, "/project", key);
            assert_eq!(message(&report), format!("Missing project key: {key}"));
        }
    }

    #[test]
    fn nested_metric_keys_are_required() {
        let mut report = valid_report();
        remove(&mut report, "/project/totals", "cog");
        assert_eq!(message(&report), "Missing totals.cog");

        let mut report = valid_report();
        remove(&mut report, "/project/averages", "confidence");
        assert_eq!(message(&report), "Missing averages.confidence");

        let mut report = valid_report();
        remove(&mut report, "/worst_offenders", "cc");
        assert_eq!(message(&report), "Missing worst_offenders.cc");
    }

    #[test]
    fn null_values_count_as_present() {
        let mut report = valid_report();
        report["timestamp"] = Value::Null;
        report["project"]["totals"]["cc"] = Value::Null;
        run_checklist(&report).unwrap();
    }

    #[test]
    fn files_must_be_an_array() {
        for bad in [json!(3), json!({"a.py": {}}), json!("a.py")] {
            let mut report = valid_report();
            report["files"] = bad;
            let err = run_checklist(&report).unwrap_err();
            assert_eq!(err.kind(), FailureKind::TypeMismatch);
            assert_eq!(err.to_string(), "files must be an array");
        }
    }

    #[test]
    fn empty_files_is_rejected() {
        let mut report = valid_report();
        report["files"] = json!([]);
        let err = run_checklist(&report).unwrap_err();
        assert_eq!(err.kind(), FailureKind::EmptyCollection);
        assert_eq!(err.to_string(), "No files in report");
    }

    #[test]
    fn first_incomplete_file_entry_is_reported() {
        let mut report = valid_report();
        report["files"] = json!([
            {"file": "a.py", "success": true, "cc": 1, "cog": 1, "confidence": 1},
            {"file": "b.py", "success": true, "cc": 1, "confidence": 1},
            {"file": "c.py"}
        ]);
        assert_eq!(message(&report), "Missing file key: cog (files[1])");
    }

    #[test]
    fn non_object_file_entry_is_a_type_mismatch() {
        let mut report = valid_report();
        report["files"] = json!([{"file": "a.py", "success": true, "cc": 1, "cog": 1, "confidence": 1}, 7]);
        let err = run_checklist(&report).unwrap_err();
        assert_eq!(err.kind(), FailureKind::TypeMismatch);
        assert_eq!(err.to_string(), "files[1] must be an object");
    }

    #[test]
    fn non_object_containers_are_type_mismatches() {
        assert_eq!(message(&json!([])), "report must be an object");

        let mut report = valid_report();
        report["project"] = json!("p");
        assert_eq!(message(&report), "project must be an object");

        let mut report = valid_report();
        report["project"]["averages"] = json!([1, 2, 3]);
        assert_eq!(message(&report), "project.averages must be an object");

        let mut report = valid_report();
        report["worst_offenders"] = Value::Null;
        assert_eq!(message(&report), "worst_offenders must be an object");
    }

    #[test]
    fn earlier_checks_win() {
        let mut report = valid_report();
        report["files"] = json!([]);
        remove(&mut report, "/project/totals", "cc");
        assert_eq!(message(&report), "Missing totals.cc");

        let mut report = valid_report();
        report["files"] = json!(1);
        remove(&mut report, "/worst_offenders", "cog");
        assert_eq!(message(&report), "Missing worst_offenders.cog");
    }

    #[test]
    fn predicates_stand_alone() {
        let report = json!({"files": []});
        assert!(check_files_is_array(&report).is_ok());
        assert!(matches!(
            check_files_not_empty(&report),
            Err(ReportError::EmptyCollection)
        ));
        assert!(check_file_entries(&report).is_ok());
        assert!(matches!(
            check_totals_keys(&report),
            Err(ReportError::MissingKey { scope: Scope::Root, key: "project" })
        ));
    }
}
