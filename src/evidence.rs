use serde::{Deserialize, Serialize};

use crate::extraction::FieldLocation;

/// How a finding weighs on the overall verdict. ERROR marks a certain rule
/// violation; WARNING marks anything inconclusive that needs a human; INFO is
/// a passing or informational result.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationStatus {
    Approved,
    Rejected,
    ReviewNeeded,
    Pending,
    Failed,
}

/// One check result with full audit context: what was checked, what was
/// found, what was expected, and where in the source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
    pub field_name: String,
    pub found_value: Option<String>,
    pub expected_value: Option<String>,
    pub location: Option<FieldLocation>,
}

/// Reduce findings to one verdict. Any ERROR rejects; otherwise any WARNING
/// sends the report to review; an all-INFO or empty list approves. This is
/// the single point of truth for the verdict, independent of finding order.
pub fn compute_status(findings: &[Finding]) -> ValidationStatus {
    let has_error = findings
        .iter()
        .any(|finding| finding.severity == Severity::Error);
    let has_warning = findings
        .iter()
        .any(|finding| finding.severity == Severity::Warning);

    if has_error {
        ValidationStatus::Rejected
    } else if has_warning {
        ValidationStatus::ReviewNeeded
    } else {
        ValidationStatus::Approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(severity: Severity) -> Finding {
        Finding {
            rule_id: "VAL-01".to_string(),
            severity,
            message: "test finding".to_string(),
            field_name: "expiration_date".to_string(),
            found_value: None,
            expected_value: None,
            location: None,
        }
    }

    #[test]
    fn empty_findings_approve() {
        assert_eq!(compute_status(&[]), ValidationStatus::Approved);
    }

    #[test]
    fn info_only_approves() {
        let findings = vec![finding(Severity::Info), finding(Severity::Info)];
        assert_eq!(compute_status(&findings), ValidationStatus::Approved);
    }

    #[test]
    fn any_warning_needs_review() {
        let findings = vec![finding(Severity::Info), finding(Severity::Warning)];
        assert_eq!(compute_status(&findings), ValidationStatus::ReviewNeeded);
    }

    #[test]
    fn any_error_rejects_regardless_of_order() {
        let forward = vec![
            finding(Severity::Info),
            finding(Severity::Warning),
            finding(Severity::Error),
        ];
        let reverse = vec![
            finding(Severity::Error),
            finding(Severity::Warning),
            finding(Severity::Info),
        ];
        assert_eq!(compute_status(&forward), ValidationStatus::Rejected);
        assert_eq!(compute_status(&reverse), ValidationStatus::Rejected);
    }

    #[test]
    fn adding_an_error_never_decreases_the_status() {
        let mut findings = vec![finding(Severity::Warning)];
        assert_eq!(compute_status(&findings), ValidationStatus::ReviewNeeded);

        findings.push(finding(Severity::Error));
        assert_eq!(compute_status(&findings), ValidationStatus::Rejected);

        findings.push(finding(Severity::Error));
        assert_eq!(compute_status(&findings), ValidationStatus::Rejected);
    }

    #[test]
    fn severity_and_status_use_upper_case_wire_spellings() {
        let serialized =
            serde_json::to_string(&finding(Severity::Error)).expect("finding should serialize");
        assert!(serialized.contains("\"ERROR\""), "unexpected: {serialized}");

        let status = serde_json::to_string(&ValidationStatus::ReviewNeeded)
            .expect("status should serialize");
        assert_eq!(status, "\"REVIEW_NEEDED\"");
    }
}
