use crate::evidence::{Finding, Severity};
use crate::extraction::MeggerData;

use super::parse_numeric;

// IEEE 43 minimum insulation resistance per equipment voltage class:
// (max_equipment_voltage, min_resistance_megohm). Scanned in ascending order.
const VOLTAGE_CLASS_MIN_RESISTANCE: &[(f64, f64)] = &[
    (250.0, 0.25),
    (500.0, 0.5),
    (1000.0, 1.0),
    (f64::INFINITY, 1.0),
];

fn min_resistance(equipment_voltage: f64) -> Option<f64> {
    VOLTAGE_CLASS_MIN_RESISTANCE
        .iter()
        .copied()
        .find(|(max_equip, _)| equipment_voltage <= *max_equip)
        .map(|(_, minimum)| minimum)
}

/// Check the measured insulation resistance against the voltage-class
/// minimum. Below-minimum readings are inconclusive (temperature and
/// humidity skew them), so they degrade to WARNING rather than ERROR.
pub fn validate_insulation_resistance(megger: &MeggerData, rule_id: &str) -> Vec<Finding> {
    let Some(rating_field) = megger.equipment_voltage_rating.as_ref() else {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: "Equipment voltage rating missing - cannot determine minimum insulation resistance requirement"
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
            message: "Equipment voltage rating value is empty - cannot determine minimum resistance"
                .to_string(),
            field_name: "equipment_voltage_rating".to_string(),
            found_value: None,
            expected_value: Some("equipment voltage rating in volts".to_string()),
            location: rating_field.location.clone(),
        }];
    };

    let Some(resistance_field) = megger.insulation_resistance.as_ref() else {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: "Insulation resistance value missing - cannot validate minimum requirement"
                .to_string(),
            field_name: "insulation_resistance".to_string(),
            found_value: None,
            expected_value: Some("insulation resistance in megohms".to_string()),
            location: None,
        }];
    };

    let Some(resistance_raw) = resistance_field.value.as_deref() else {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: "Insulation resistance value is empty - cannot validate minimum requirement"
                .to_string(),
            field_name: "insulation_resistance".to_string(),
            found_value: None,
            expected_value: Some("insulation resistance in megohms".to_string()),
            location: resistance_field.location.clone(),
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

    let Some(resistance) = parse_numeric(resistance_raw) else {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: format!(
                "Could not parse insulation resistance '{resistance_raw}' - manual review required"
            ),
            field_name: "insulation_resistance".to_string(),
            found_value: Some(resistance_raw.to_string()),
            expected_value: Some("numeric resistance value in megohms".to_string()),
            location: resistance_field.location.clone(),
        }];
    };

    let Some(minimum) = min_resistance(equipment_voltage) else {
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

    if resistance < minimum {
        vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: format!(
                "Insulation resistance {resistance} Mohm below minimum {minimum} Mohm for equipment rated {equipment_voltage}V - review required"
            ),
            field_name: "insulation_resistance".to_string(),
            found_value: Some(format!("{resistance} Mohm")),
            expected_value: Some(format!(">= {minimum} Mohm")),
            location: resistance_field.location.clone(),
        }]
    } else {
        vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Info,
            message: format!(
                "Insulation resistance {resistance} Mohm meets minimum requirement ({minimum} Mohm) for equipment rated {equipment_voltage}V"
            ),
            field_name: "insulation_resistance".to_string(),
            found_value: Some(format!("{resistance} Mohm")),
            expected_value: Some(format!(">= {minimum} Mohm")),
            location: resistance_field.location.clone(),
        }]
    }
}
