use std::collections::BTreeSet;

use crate::evidence::{Finding, Severity};
use crate::extraction::{ExtractedField, ExtractionResult};

/// Cross-check serial numbers found at different places in the document
/// (report header, photo metadata, certificate). Comparison is
/// case-insensitive with surrounding whitespace ignored.
///
/// A mismatch produces one ERROR finding followed by one supplementary INFO
/// finding per usable field so each source location stays on the audit trail.
pub fn validate_serial_consistency(
    serial_numbers: &[ExtractedField],
    rule_id: &str,
) -> Vec<Finding> {
    if serial_numbers.len() < 2 {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Info,
            message: "Serial number consistency check skipped (insufficient data)".to_string(),
            field_name: "serial_number".to_string(),
            found_value: serial_numbers.first().and_then(|field| field.value.clone()),
            expected_value: None,
            location: serial_numbers
                .first()
                .and_then(|field| field.location.clone()),
        }];
    }

    let normalized_serials = serial_numbers
        .iter()
        .filter_map(|field| {
            field
                .value
                .as_deref()
                .map(|value| (value.trim().to_uppercase(), field))
        })
        .collect::<Vec<(String, &ExtractedField)>>();

    if normalized_serials.len() < 2 {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Info,
            message: "Serial number consistency check skipped (insufficient valid values)"
                .to_string(),
            field_name: "serial_number".to_string(),
            found_value: None,
            expected_value: None,
            location: None,
        }];
    }

    let unique_values = normalized_serials
        .iter()
        .map(|(normalized, _)| normalized.clone())
        .collect::<BTreeSet<String>>();

    if unique_values.len() == 1 {
        let serial_value = unique_values
            .iter()
            .next()
            .cloned()
            .unwrap_or_default();
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Info,
            message: format!(
                "Serial numbers consistent: {serial_value} (found in {} locations)",
                normalized_serials.len()
            ),
            field_name: "serial_number".to_string(),
            found_value: Some(serial_value),
            expected_value: None,
            location: normalized_serials[0].1.location.clone(),
        }];
    }

    let unique_values_joined = unique_values.iter().cloned().collect::<Vec<_>>().join(", ");
    let mut findings = vec![Finding {
        rule_id: rule_id.to_string(),
        severity: Severity::Error,
        message: "Serial number mismatch detected".to_string(),
        field_name: "serial_number".to_string(),
        found_value: Some(unique_values_joined),
        expected_value: Some("All serial numbers should match".to_string()),
        location: normalized_serials[0].1.location.clone(),
    }];

    for (normalized, field) in &normalized_serials {
        findings.push(Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Info,
            message: format!("Serial number '{normalized}' found at this location"),
            field_name: "serial_number".to_string(),
            found_value: Some(normalized.clone()),
            expected_value: None,
            location: field.location.clone(),
        });
    }

    findings
}

/// The serial-number field of every calibration entry that has one, in
/// encounter order.
pub fn collect_serial_numbers(extraction: &ExtractionResult) -> Vec<ExtractedField> {
    extraction
        .calibrations
        .iter()
        .filter_map(|calibration| calibration.serial_number.clone())
        .collect()
}
