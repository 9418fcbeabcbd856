use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::evidence::{compute_status, Finding, ValidationStatus};
use crate::extraction::ExtractionResult;
use crate::validators::{
    collect_serial_numbers, validate_calibration, validate_camera_config,
    validate_grounding_calibration, validate_grounding_resistance, validate_insulation_resistance,
    validate_megger_calibration, validate_phase_delta, validate_serial_consistency,
    validate_test_method, validate_test_voltage,
};

/// Bumped whenever a rule's thresholds or decision table change, so stored
/// records can be traced back to the rules that produced them.
pub const RULES_VERSION: &str = "2026-07-30";

/// What was checked during one validation run, kept alongside the findings
/// in every stored record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceSummary {
    pub test_date: String,
    pub calibrations_checked: usize,
    pub serial_numbers_checked: usize,
    pub thermography_validated: bool,
    pub phase_readings_checked: usize,
    pub grounding_validated: bool,
    pub megger_validated: bool,
    pub findings_count: usize,
}

/// One complete validation verdict. Records are append-only: re-validating a
/// document produces a fresh record, never an update of a prior one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRecord {
    pub status: ValidationStatus,
    pub findings: Vec<Finding>,
    pub evidence: EvidenceSummary,
}

/// Run every applicable validator over one extraction result, in a fixed
/// order: per-certificate calibration expiry, serial consistency, then the
/// thermography, grounding, and megger rule groups for whichever of those
/// sections the report carries.
pub fn run_validators(extraction: &ExtractionResult, test_date: NaiveDate) -> Vec<Finding> {
    let mut findings = Vec::new();

    for calibration in &extraction.calibrations {
        findings.extend(validate_calibration(calibration, test_date, "VAL-01"));
    }

    let serial_numbers = collect_serial_numbers(extraction);
    findings.extend(validate_serial_consistency(&serial_numbers, "VAL-02"));

    if let Some(thermography) = extraction.thermography.as_ref() {
        findings.extend(validate_camera_config(Some(thermography), "THERMO-01"));

        if !thermography.phase_readings.is_empty() {
            findings.extend(validate_phase_delta(
                &thermography.phase_readings,
                "THERMO-02",
            ));
        }
    }

    // Thermographic camera certificates get a second expiry check under the
    // thermography rule group, matched on instrument type.
    for calibration in &extraction.calibrations {
        let is_thermo = calibration
            .instrument_type
            .as_deref()
            .map(|instrument_type| instrument_type.to_lowercase().contains("thermo"))
            .unwrap_or(false);
        if is_thermo {
            findings.extend(validate_calibration(calibration, test_date, "THERMO-03"));
        }
    }

    if let Some(grounding) = extraction.grounding.as_ref() {
        findings.extend(validate_grounding_calibration(grounding, test_date));
        findings.extend(validate_grounding_resistance(grounding, "GROUND-02"));
        findings.extend(validate_test_method(grounding, "GROUND-03"));
    }

    if let Some(megger) = extraction.megger.as_ref() {
        findings.extend(validate_megger_calibration(megger, test_date));
        findings.extend(validate_test_voltage(megger, "MEGGER-02"));
        findings.extend(validate_insulation_resistance(megger, "MEGGER-03"));
    }

    findings
}

pub fn build_record(extraction: &ExtractionResult, test_date: NaiveDate) -> ValidationRecord {
    let findings = run_validators(extraction, test_date);
    let status = compute_status(&findings);

    let evidence = EvidenceSummary {
        test_date: test_date.to_string(),
        calibrations_checked: extraction.calibrations.len(),
        serial_numbers_checked: collect_serial_numbers(extraction).len(),
        thermography_validated: extraction.thermography.is_some(),
        phase_readings_checked: extraction
            .thermography
            .as_ref()
            .map(|thermography| thermography.phase_readings.len())
            .unwrap_or(0),
        grounding_validated: extraction.grounding.is_some(),
        megger_validated: extraction.megger.is_some(),
        findings_count: findings.len(),
    };

    ValidationRecord {
        status,
        findings,
        evidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::Severity;
    use crate::extraction::{
        CalibrationInfo, ExtractedField, GroundingData, MeasurementReading, ThermographyData,
    };

    fn field(name: &str, value: &str) -> ExtractedField {
        ExtractedField {
            name: name.to_string(),
            value: Some(value.to_string()),
            confidence: None,
            location: None,
        }
    }

    fn empty_extraction() -> ExtractionResult {
        ExtractionResult {
            document_id: "doc-1".to_string(),
            status: "completed".to_string(),
            page_count: 3,
            calibrations: Vec::new(),
            measurements: Vec::new(),
            thermography: None,
            grounding: None,
            megger: None,
            raw_markdown: None,
            raw_chunks_count: 0,
            processing_time_ms: None,
            model_version: None,
            error_message: None,
        }
    }

    fn calibration(instrument_type: &str, serial: &str, expiration: &str) -> CalibrationInfo {
        CalibrationInfo {
            instrument_type: Some(instrument_type.to_string()),
            serial_number: Some(field("serial_number", serial)),
            calibration_date: None,
            expiration_date: Some(field("expiration_date", expiration)),
            certificate_number: None,
            calibrating_lab: None,
        }
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, 1).expect("test date should be valid")
    }

    #[test]
    fn empty_extraction_approves_with_skipped_serial_check() {
        let record = build_record(&empty_extraction(), test_date());

        assert_eq!(record.status, ValidationStatus::Approved);
        assert_eq!(record.findings.len(), 1);
        assert_eq!(record.findings[0].rule_id, "VAL-02");
        assert_eq!(record.findings[0].severity, Severity::Info);
        assert_eq!(record.evidence.findings_count, 1);
    }

    #[test]
    fn borderline_grounding_report_needs_review_without_any_error() {
        let mut extraction = empty_extraction();
        extraction.grounding = Some(GroundingData {
            calibration: Some(calibration("grounding meter", "GM-100", "2030-01-01")),
            resistance_value: Some(field("resistance", "7.0")),
            test_method: Some(field("test_method", "clamp-on")),
            installation_type: Some(field("installation_type", "new")),
        });

        let record = build_record(&extraction, test_date());

        assert_eq!(record.status, ValidationStatus::ReviewNeeded);
        assert!(
            record
                .findings
                .iter()
                .all(|finding| finding.severity != Severity::Error),
            "borderline data must not produce an ERROR"
        );

        let warning_rules = record
            .findings
            .iter()
            .filter(|finding| finding.severity == Severity::Warning)
            .map(|finding| finding.rule_id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(warning_rules, vec!["GROUND-02", "GROUND-03"]);
    }

    #[test]
    fn camera_mismatch_rejects_the_report() {
        let mut extraction = empty_extraction();
        extraction.thermography = Some(ThermographyData {
            camera_ambient_temp: Some(field("camera_ambient_temp", "22.0")),
            datalogger_temp: Some(field("datalogger_temp", "22.5")),
            phase_readings: Vec::new(),
            energy_marshal_comment: None,
        });

        let record = build_record(&extraction, test_date());

        assert_eq!(record.status, ValidationStatus::Rejected);
        assert!(record
            .findings
            .iter()
            .any(|finding| finding.rule_id == "THERMO-01" && finding.severity == Severity::Error));
    }

    #[test]
    fn thermographic_instruments_get_a_second_expiry_check() {
        let mut extraction = empty_extraction();
        extraction.calibrations = vec![
            calibration("Thermographic Camera", "INST-7", "2030-01-01"),
            calibration("grounding meter", "INST-7", "2030-01-01"),
        ];

        let findings = run_validators(&extraction, test_date());

        let rule_ids = findings
            .iter()
            .map(|finding| finding.rule_id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(rule_ids, vec!["VAL-01", "VAL-01", "VAL-02", "THERMO-03"]);
    }

    #[test]
    fn phase_readings_are_only_checked_when_present() {
        let mut extraction = empty_extraction();
        extraction.thermography = Some(ThermographyData {
            camera_ambient_temp: Some(field("camera_ambient_temp", "21.0")),
            datalogger_temp: Some(field("datalogger_temp", "21.0")),
            phase_readings: vec![
                MeasurementReading {
                    location_label: "Phase A".to_string(),
                    value: field("temperature", "30.0"),
                    unit: Some("C".to_string()),
                },
                MeasurementReading {
                    location_label: "Phase B".to_string(),
                    value: field("temperature", "50.0"),
                    unit: Some("C".to_string()),
                },
            ],
            energy_marshal_comment: None,
        });

        let record = build_record(&extraction, test_date());

        assert_eq!(record.status, ValidationStatus::Rejected);
        assert!(record
            .findings
            .iter()
            .any(|finding| finding.rule_id == "THERMO-02" && finding.severity == Severity::Error));
        assert_eq!(record.evidence.phase_readings_checked, 2);
    }

    #[test]
    fn evidence_summary_reflects_what_was_checked() {
        let mut extraction = empty_extraction();
        extraction.calibrations = vec![calibration("megger", "MG-9", "2030-06-30")];
        extraction.megger = Some(crate::extraction::MeggerData {
            calibration: None,
            test_voltage: Some(field("test_voltage", "1000")),
            equipment_voltage_rating: Some(field("equipment_voltage_rating", "380")),
            insulation_resistance: Some(field("insulation_resistance", "1.2")),
        });

        let record = build_record(&extraction, test_date());

        assert_eq!(record.evidence.calibrations_checked, 1);
        assert_eq!(record.evidence.serial_numbers_checked, 1);
        assert!(!record.evidence.thermography_validated);
        assert!(record.evidence.megger_validated);
        assert_eq!(record.evidence.findings_count, record.findings.len());
    }
}
