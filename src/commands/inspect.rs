use std::fs;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::InspectArgs;
use crate::extraction::ExtractionResult;
use crate::validators::collect_serial_numbers;

#[derive(Debug, Serialize)]
pub struct ExtractionSummary {
    pub document_id: String,
    pub status: String,
    pub page_count: u32,
    pub calibration_count: usize,
    pub serial_number_count: usize,
    pub measurement_count: usize,
    pub has_thermography: bool,
    pub phase_reading_count: usize,
    pub has_grounding: bool,
    pub has_megger: bool,
}

pub fn run(args: InspectArgs) -> Result<()> {
    let raw = fs::read(&args.extraction_path)
        .with_context(|| format!("failed to read {}", args.extraction_path.display()))?;
    let extraction: ExtractionResult = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse {}", args.extraction_path.display()))?;

    if extraction.status == "failed" {
        warn!(
            document_id = %extraction.document_id,
            error = %extraction.error_message.as_deref().unwrap_or("unknown error"),
            "extraction failed upstream; nothing to validate"
        );
    }

    let summary = summarize(&extraction);
    info!(
        document_id = %summary.document_id,
        status = %summary.status,
        pages = summary.page_count,
        calibrations = summary.calibration_count,
        serial_numbers = summary.serial_number_count,
        measurements = summary.measurement_count,
        thermography = summary.has_thermography,
        phase_readings = summary.phase_reading_count,
        grounding = summary.has_grounding,
        megger = summary.has_megger,
        "extraction summary"
    );

    Ok(())
}

pub fn summarize(extraction: &ExtractionResult) -> ExtractionSummary {
    ExtractionSummary {
        document_id: extraction.document_id.clone(),
        status: extraction.status.clone(),
        page_count: extraction.page_count,
        calibration_count: extraction.calibrations.len(),
        serial_number_count: collect_serial_numbers(extraction).len(),
        measurement_count: extraction.measurements.len(),
        has_thermography: extraction.thermography.is_some(),
        phase_reading_count: extraction
            .thermography
            .as_ref()
            .map(|thermography| thermography.phase_readings.len())
            .unwrap_or(0),
        has_grounding: extraction.grounding.is_some(),
        has_megger: extraction.megger.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_sections_without_validating() {
        let raw = r#"
        {
          "document_id": "doc-3",
          "status": "completed",
          "page_count": 6,
          "calibrations": [
            {
              "instrument_type": "megger",
              "serial_number": {"name": "serial_number", "value": "MG-1", "confidence": null, "location": null},
              "calibration_date": null,
              "expiration_date": null,
              "certificate_number": null,
              "calibrating_lab": null
            }
          ],
          "thermography": {
            "camera_ambient_temp": null,
            "datalogger_temp": null,
            "phase_readings": [],
            "energy_marshal_comment": null
          }
        }
        "#;
        let extraction: ExtractionResult =
            serde_json::from_str(raw).expect("fixture should deserialize");

        let summary = summarize(&extraction);
        assert_eq!(summary.calibration_count, 1);
        assert_eq!(summary.serial_number_count, 1);
        assert!(summary.has_thermography);
        assert_eq!(summary.phase_reading_count, 0);
        assert!(!summary.has_grounding);
        assert!(!summary.has_megger);
    }
}
