//! Header verification results.
//!
//! A header goes through up to three checks, in order: it must exist, its
//! banner must record the expected bound, and its content must match a fresh
//! rendering. A failed check ends the run for that header.

use std::fmt;

use serde::Serialize;

use crate::op::Operation;

/// Which property of a header was checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    /// The header file exists.
    Present,
    /// The banner records the expected bound.
    Bound,
    /// The content matches the generator's output.
    Content,
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Present => "present",
            Self::Bound => "bound",
            Self::Content => "content",
        })
    }
}

/// Whether a check passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The check passed.
    Pass,
    /// The check failed.
    Failure,
}

/// Outcome of one check on one header.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// Operation whose header was checked.
    pub operation: Operation,
    /// Property checked.
    pub check: Check,
    /// Pass or failure.
    pub severity: Severity,
    /// One-line summary.
    pub message: String,
    /// Extra lines, such as where a stale header first differs.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl CheckResult {
    pub(crate) fn passed(operation: Operation, check: Check, message: String) -> Self {
        Self::new(operation, check, Severity::Pass, message)
    }

    pub(crate) fn failed(operation: Operation, check: Check, message: String) -> Self {
        Self::new(operation, check, Severity::Failure, message)
    }

    fn new(operation: Operation, check: Check, severity: Severity, message: String) -> Self {
        Self {
            operation,
            check,
            severity,
            message,
            details: Vec::new(),
        }
    }

    pub(crate) fn with_detail(mut self, detail: String) -> Self {
        self.details.push(detail);
        self
    }

    /// Returns true if the check failed.
    pub fn is_failure(&self) -> bool {
        self.severity == Severity::Failure
    }
}

/// `[PASS] eq/bound: message`, then one indented line per detail.
impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self.severity {
            Severity::Pass => "PASS",
            Severity::Failure => "FAIL",
        };
        write!(
            f,
            "[{status}] {}/{}: {}",
            self.operation, self.check, self.message
        )?;
        for detail in &self.details {
            write!(f, "\n       {detail}")?;
        }
        Ok(())
    }
}

/// Results for one or more headers, in the order the checks ran.
#[derive(Debug, Default, Serialize)]
pub struct VerifyReport {
    /// All individual results.
    pub results: Vec<CheckResult>,
}

impl VerifyReport {
    pub(crate) fn push(&mut self, result: CheckResult) {
        self.results.push(result);
    }

    pub(crate) fn merge(&mut self, other: VerifyReport) {
        self.results.extend(other.results);
    }

    /// Number of failed checks.
    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }

    /// Returns true if every check passed.
    pub fn all_passed(&self) -> bool {
        self.failure_count() == 0
    }

    /// Operations whose header failed a check, in [`Operation::ALL`] order.
    pub fn needs_regeneration(&self) -> Vec<Operation> {
        Operation::ALL
            .into_iter()
            .filter(|op| {
                self.results
                    .iter()
                    .any(|r| r.operation == *op && r.is_failure())
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_details_under_the_summary() {
        let result = CheckResult::failed(
            Operation::Add,
            Check::Content,
            "rf_xmacro_add.h is stale".to_string(),
        )
        .with_detail("first difference at line 21".to_string());
        assert_eq!(
            result.to_string(),
            "[FAIL] add/content: rf_xmacro_add.h is stale\n       first difference at line 21"
        );

        let ok = CheckResult::passed(Operation::Equal, Check::Bound, "ok".to_string());
        assert_eq!(ok.to_string(), "[PASS] eq/bound: ok");
    }

    #[test]
    fn regeneration_list_follows_failures() {
        let mut report = VerifyReport::default();
        report.push(CheckResult::failed(
            Operation::GreaterThan,
            Check::Present,
            "missing".to_string(),
        ));
        report.push(CheckResult::passed(
            Operation::Add,
            Check::Content,
            "ok".to_string(),
        ));
        report.push(CheckResult::failed(
            Operation::Equal,
            Check::Bound,
            "wrong bound".to_string(),
        ));

        assert_eq!(report.failure_count(), 2);
        assert!(!report.all_passed());
        assert_eq!(
            report.needs_regeneration(),
            vec![Operation::Equal, Operation::GreaterThan]
        );
    }

    #[test]
    fn json_names_the_check() {
        let result = CheckResult::passed(Operation::Add, Check::Present, "found".to_string());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["check"], "present");
        assert_eq!(json["severity"], "pass");
        assert!(json.get("details").is_none());
    }
}
