use chrono::NaiveDate;

use crate::evidence::{Finding, Severity};
use crate::extraction::GroundingData;

use super::validate_calibration;

/// Check the grounding meter's calibration certificate against the test
/// date. Delegates to the shared calibration check under the `GROUND-01`
/// rule; an entirely absent calibration record degrades to WARNING.
pub fn validate_grounding_calibration(
    grounding: &GroundingData,
    test_date: NaiveDate,
) -> Vec<Finding> {
    let Some(calibration) = grounding.calibration.as_ref() else {
        return vec![Finding {
            rule_id: "GROUND-01".to_string(),
            severity: Severity::Warning,
            message: "Grounding meter calibration information missing - manual review required"
                .to_string(),
            field_name: "grounding_calibration".to_string(),
            found_value: None,
            expected_value: None,
            location: None,
        }];
    };
    validate_calibration(calibration, test_date, "GROUND-01")
}
