use crate::evidence::{Finding, Severity};
use crate::extraction::MeasurementReading;

use super::parse_numeric;

pub const DELTA_WARNING_THRESHOLD: f64 = 3.0;
pub const DELTA_ERROR_THRESHOLD: f64 = 15.0;

/// Evaluate the spread between phase temperatures: delta = max - min over
/// the readings that parse. Unparseable readings are reported in a single
/// WARNING listing the offending phase labels, and the delta is still
/// computed from whatever remains if at least two values parsed.
pub fn validate_phase_delta(phase_readings: &[MeasurementReading], rule_id: &str) -> Vec<Finding> {
    if phase_readings.len() < 2 {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Info,
            message:
                "Phase delta check skipped - insufficient data (need at least 2 phase readings)"
                    .to_string(),
            field_name: "phase_temperatures".to_string(),
            found_value: Some(phase_readings.len().to_string()),
            expected_value: Some(">= 2".to_string()),
            location: None,
        }];
    }

    let mut temperatures = Vec::<f64>::new();
    let mut phase_labels = Vec::<&str>::new();
    let mut unparseable_phases = Vec::<&str>::new();

    for reading in phase_readings {
        let label = reading.location_label.as_str();

        let Some(raw_value) = reading.value.value.as_deref() else {
            unparseable_phases.push(label);
            continue;
        };

        match parse_numeric(raw_value) {
            Some(temperature) => {
                temperatures.push(temperature);
                phase_labels.push(label);
            }
            None => unparseable_phases.push(label),
        }
    }

    let mut findings = Vec::new();

    if !unparseable_phases.is_empty() {
        let joined = unparseable_phases.join(", ");
        findings.push(Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: format!(
                "Could not parse temperature value(s) for phase(s): {joined} - manual review required"
            ),
            field_name: "phase_temperatures".to_string(),
            found_value: Some(joined),
            expected_value: Some("numeric temperature value".to_string()),
            location: None,
        });
    }

    if temperatures.len() < 2 {
        if findings.is_empty() {
            findings.push(Finding {
                rule_id: rule_id.to_string(),
                severity: Severity::Info,
                message: "Phase delta check skipped - insufficient valid temperature data"
                    .to_string(),
                field_name: "phase_temperatures".to_string(),
                found_value: Some(temperatures.len().to_string()),
                expected_value: Some(">= 2".to_string()),
                location: None,
            });
        }
        return findings;
    }

    let mut max_index = 0;
    let mut min_index = 0;
    for (index, temperature) in temperatures.iter().enumerate() {
        if *temperature > temperatures[max_index] {
            max_index = index;
        }
        if *temperature < temperatures[min_index] {
            min_index = index;
        }
    }

    let max_temp = temperatures[max_index];
    let min_temp = temperatures[min_index];
    let delta = max_temp - min_temp;
    let max_phase = phase_labels[max_index];
    let min_phase = phase_labels[min_index];

    // Boundary values fall in the lower-severity bucket.
    if delta > DELTA_ERROR_THRESHOLD {
        findings.push(Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Error,
            message: format!(
                "Phase delta {delta:.1}C exceeds critical threshold of {DELTA_ERROR_THRESHOLD}C ({max_phase}: {max_temp}C, {min_phase}: {min_temp}C)"
            ),
            field_name: "phase_delta".to_string(),
            found_value: Some(format!("{delta:.1}C")),
            expected_value: Some(format!("<= {DELTA_ERROR_THRESHOLD}C")),
            location: None,
        });
    } else if delta > DELTA_WARNING_THRESHOLD {
        findings.push(Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: format!(
                "Phase delta {delta:.1}C exceeds review threshold of {DELTA_WARNING_THRESHOLD}C ({max_phase}: {max_temp}C, {min_phase}: {min_temp}C)"
            ),
            field_name: "phase_delta".to_string(),
            found_value: Some(format!("{delta:.1}C")),
            expected_value: Some(format!("<= {DELTA_WARNING_THRESHOLD}C")),
            location: None,
        });
    } else {
        findings.push(Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Info,
            message: format!(
                "Phase delta {delta:.1}C within normal range (<= {DELTA_WARNING_THRESHOLD}C)"
            ),
            field_name: "phase_delta".to_string(),
            found_value: Some(format!("{delta:.1}C")),
            expected_value: Some(format!("<= {DELTA_WARNING_THRESHOLD}C")),
            location: None,
        });
    }

    findings
}
