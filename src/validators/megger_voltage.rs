use crate::evidence::{Finding, Severity};
use crate::extraction::MeggerData;

use super::parse_numeric;

// IEEE 43 / IEC 60364-6 test voltages per equipment voltage class:
// (max_equipment_voltage, recommended_test_voltage, max_safe_test_voltage).
// Scanned in ascending order; the final row is open-ended.
const VOLTAGE_CLASS_TEST_VOLTAGES: &[(f64, f64, f64)] = &[
    (250.0, 500.0, 500.0),
    (500.0, 1000.0, 1000.0),
    (1000.0, 1000.0, 2500.0),
    (f64::INFINITY, 2500.0, 5000.0),
];

fn voltage_class(equipment_voltage: f64) -> Option<(f64, f64, f64)> {
    VOLTAGE_CLASS_TEST_VOLTAGES
        .iter()
        .copied()
        .find(|(max_equip, _, _)| equipment_voltage <= *max_equip)
}

/// Check that the insulation test voltage suits the equipment's voltage
/// class. Too high risks damaging the equipment (ERROR); too low may fail to
/// reveal insulation defects (WARNING).
pub fn validate_test_voltage(megger: &MeggerData, rule_id: &str) -> Vec<Finding> {
    let Some(rating_field) = megger.equipment_voltage_rating.as_ref() else {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message:
                "Equipment voltage rating missing - cannot validate test voltage appropriateness"
                    .to_string(),
            field_name: "equipment_voltage_rating".to_string(),
            found_value: None,
            expected_value: Some("equipment voltage rating in volts".to_string()),
            location: None,
        }];
    };

    let Some(rating_raw) = rating_field.value.as_deref() else {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: "Equipment voltage rating value is empty - cannot validate test voltage"
                .to_string(),
            field_name: "equipment_voltage_rating".to_string(),
            found_value: None,
            expected_value: Some("equipment voltage rating in volts".to_string()),
            location: rating_field.location.clone(),
        }];
    };

    let Some(voltage_field) = megger.test_voltage.as_ref() else {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: "Test voltage missing - cannot validate voltage appropriateness".to_string(),
            field_name: "test_voltage".to_string(),
            found_value: None,
            expected_value: Some("test voltage in volts".to_string()),
            location: None,
        }];
    };

    let Some(voltage_raw) = voltage_field.value.as_deref() else {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: "Test voltage value is empty - cannot validate voltage appropriateness"
                .to_string(),
            field_name: "test_voltage".to_string(),
            found_value: None,
            expected_value: Some("test voltage in volts".to_string()),
            location: voltage_field.location.clone(),
        }];
    };

    let Some(equipment_voltage) = parse_numeric(rating_raw) else {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: format!(
                "Could not parse equipment voltage rating '{rating_raw}' - manual review required"
            ),
            field_name: "equipment_voltage_rating".to_string(),
            found_value: Some(rating_raw.to_string()),
            expected_value: Some("numeric voltage value".to_string()),
            location: rating_field.location.clone(),
        }];
    };

    let Some(test_voltage) = parse_numeric(voltage_raw) else {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: format!("Could not parse test voltage '{voltage_raw}' - manual review required"),
            field_name: "test_voltage".to_string(),
            found_value: Some(voltage_raw.to_string()),
            expected_value: Some("numeric voltage value".to_string()),
            location: voltage_field.location.clone(),
        }];
    };

    let Some((_, recommended_test, max_safe_test)) = voltage_class(equipment_voltage) else {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: format!(
                "Unknown voltage class for equipment rated {equipment_voltage}V - manual review required"
            ),
            field_name: "equipment_voltage_rating".to_string(),
            found_value: Some(format!("{equipment_voltage}V")),
            expected_value: Some("standard voltage class".to_string()),
            location: rating_field.location.clone(),
        }];
    };

    if test_voltage > max_safe_test {
        vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Error,
            message: format!(
                "Test voltage {test_voltage}V too high for equipment rated {equipment_voltage}V (max safe: {max_safe_test}V) - potential equipment damage"
            ),
            field_name: "test_voltage".to_string(),
            found_value: Some(format!("{test_voltage}V")),
            expected_value: Some(format!("<= {max_safe_test}V")),
            location: voltage_field.location.clone(),
        }]
    } else if test_voltage < recommended_test {
        vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: format!(
                "Test voltage {test_voltage}V below recommended {recommended_test}V for equipment rated {equipment_voltage}V - may not reveal insulation defects"
            ),
            field_name: "test_voltage".to_string(),
            found_value: Some(format!("{test_voltage}V")),
            expected_value: Some(format!(">= {recommended_test}V")),
            location: voltage_field.location.clone(),
        }]
    } else {
        vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Info,
            message: format!(
                "Test voltage {test_voltage}V appropriate for equipment rated {equipment_voltage}V"
            ),
            field_name: "test_voltage".to_string(),
            found_value: Some(format!("{test_voltage}V")),
            expected_value: Some(format!("{recommended_test}V - {max_safe_test}V")),
            location: voltage_field.location.clone(),
        }]
    }
}
