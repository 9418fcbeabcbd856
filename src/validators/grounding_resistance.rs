use crate::evidence::{Finding, Severity};
use crate::extraction::GroundingData;

use super::parse_numeric;

pub const RESISTANCE_WARNING_THRESHOLD: f64 = 5.0;
pub const RESISTANCE_ERROR_THRESHOLD: f64 = 10.0;

/// Evaluate the grounding resistance measurement against ABNT NBR 5419 /
/// IEEE 142 limits. A negative reading is a measurement or transcription
/// problem, not a grounding failure, so it degrades to WARNING.
pub fn validate_grounding_resistance(grounding: &GroundingData, rule_id: &str) -> Vec<Finding> {
    let Some(resistance_field) = grounding.resistance_value.as_ref() else {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: "Grounding resistance value not found - manual review required".to_string(),
            field_name: "grounding_resistance".to_string(),
            found_value: None,
            expected_value: Some("numeric resistance in ohms".to_string()),
            location: None,
        }];
    };

    let raw_value = resistance_field.value.as_deref().unwrap_or("");
    if raw_value.trim().is_empty() {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: "Grounding resistance value is missing or empty - manual review required"
                .to_string(),
            field_name: "grounding_resistance".to_string(),
            found_value: resistance_field.value.clone(),
            expected_value: Some("numeric resistance in ohms".to_string()),
            location: resistance_field.location.clone(),
        }];
    }

    let Some(resistance) = parse_numeric(raw_value) else {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: format!(
                "Could not parse grounding resistance '{raw_value}' as numeric value - manual review required"
            ),
            field_name: "grounding_resistance".to_string(),
            found_value: Some(raw_value.to_string()),
            expected_value: Some("numeric resistance in ohms".to_string()),
            location: resistance_field.location.clone(),
        }];
    };

    if resistance < 0.0 {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: format!(
                "Grounding resistance {resistance} ohms is negative (invalid measurement) - manual review required"
            ),
            field_name: "grounding_resistance".to_string(),
            found_value: Some(format!("{resistance} ohms")),
            expected_value: Some(">= 0 ohms".to_string()),
            location: resistance_field.location.clone(),
        }];
    }

    // Boundary values fall in the lower-severity bucket.
    if resistance > RESISTANCE_ERROR_THRESHOLD {
        vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Error,
            message: format!(
                "Grounding resistance {resistance} ohms exceeds maximum of {RESISTANCE_ERROR_THRESHOLD} ohms"
            ),
            field_name: "grounding_resistance".to_string(),
            found_value: Some(format!("{resistance} ohms")),
            expected_value: Some(format!("<= {RESISTANCE_ERROR_THRESHOLD} ohms")),
            location: resistance_field.location.clone(),
        }]
    } else if resistance > RESISTANCE_WARNING_THRESHOLD {
        vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: format!(
                "Grounding resistance {resistance} ohms is borderline - review recommended (threshold: {RESISTANCE_WARNING_THRESHOLD} ohms)"
            ),
            field_name: "grounding_resistance".to_string(),
            found_value: Some(format!("{resistance} ohms")),
            expected_value: Some(format!("<= {RESISTANCE_WARNING_THRESHOLD} ohms")),
            location: resistance_field.location.clone(),
        }]
    } else {
        vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Info,
            message: format!(
                "Grounding resistance {resistance} ohms within acceptable range (<= {RESISTANCE_WARNING_THRESHOLD} ohms)"
            ),
            field_name: "grounding_resistance".to_string(),
            found_value: Some(format!("{resistance} ohms")),
            expected_value: Some(format!("<= {RESISTANCE_WARNING_THRESHOLD} ohms")),
            location: resistance_field.location.clone(),
        }]
    }
}
