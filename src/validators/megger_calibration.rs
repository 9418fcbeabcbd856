use chrono::NaiveDate;

use crate::evidence::{Finding, Severity};
use crate::extraction::MeggerData;

use super::validate_calibration;

/// Check the insulation tester's calibration certificate against the test
/// date. Delegates to the shared calibration check under the `MEGGER-01`
/// rule; an entirely absent calibration record degrades to WARNING.
pub fn validate_megger_calibration(megger: &MeggerData, test_date: NaiveDate) -> Vec<Finding> {
    let Some(calibration) = megger.calibration.as_ref() else {
        return vec![Finding {
            rule_id: "MEGGER-01".to_string(),
            severity: Severity::Warning,
            message: "Megger calibration information missing - manual review required".to_string(),
            field_name: "megger_calibration".to_string(),
            found_value: None,
            expected_value: None,
            location: None,
        }];
    };
    validate_calibration(calibration, test_date, "MEGGER-01")
}
