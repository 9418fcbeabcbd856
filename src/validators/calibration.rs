use chrono::NaiveDate;

use crate::dates::parse_date;
use crate::evidence::{Finding, Severity};
use crate::extraction::CalibrationInfo;

/// Check that a calibration certificate was still valid on the test date.
///
/// The same check serves every instrument family; only `rule_id` varies
/// (`VAL-01`, `GROUND-01`, `MEGGER-01`, `THERMO-03`). Always returns exactly
/// one finding: ERROR when the certificate had expired, INFO when it was
/// valid, WARNING when the expiration date is missing or unparseable.
pub fn validate_calibration(
    calibration: &CalibrationInfo,
    test_date: NaiveDate,
    rule_id: &str,
) -> Vec<Finding> {
    let Some(expiration_field) = calibration.expiration_date.as_ref() else {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: "Missing calibration expiration date - manual review required".to_string(),
            field_name: "expiration_date".to_string(),
            found_value: None,
            expected_value: None,
            location: None,
        }];
    };

    let Some(raw_value) = expiration_field.value.as_deref() else {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: "Missing calibration expiration date - manual review required".to_string(),
            field_name: "expiration_date".to_string(),
            found_value: None,
            expected_value: None,
            location: expiration_field.location.clone(),
        }];
    };

    let Some(parsed_expiration) = parse_date(raw_value) else {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: format!(
                "Could not parse expiration date '{raw_value}' - manual review required"
            ),
            field_name: "expiration_date".to_string(),
            found_value: Some(raw_value.to_string()),
            expected_value: None,
            location: expiration_field.location.clone(),
        }];
    };

    // Expiring exactly on the test date still counts as valid.
    if parsed_expiration < test_date {
        vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Error,
            message: format!(
                "Calibration expired on {parsed_expiration}, test performed on {test_date}"
            ),
            field_name: "expiration_date".to_string(),
            found_value: Some(parsed_expiration.to_string()),
            expected_value: Some(format!(">= {test_date}")),
            location: expiration_field.location.clone(),
        }]
    } else {
        vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Info,
            message: format!("Calibration valid until {parsed_expiration}"),
            field_name: "expiration_date".to_string(),
            found_value: Some(parsed_expiration.to_string()),
            expected_value: None,
            location: expiration_field.location.clone(),
        }]
    }
}
