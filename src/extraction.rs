use serde::{Deserialize, Serialize};

/// Bounding box normalized to page dimensions, all coordinates in [0, 1].
/// `right > left` and `bottom > top` are the upstream producer's invariants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

/// Where a field was read from in the source document. Evidentiary only,
/// never consulted by rule logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldLocation {
    pub page: u32,
    pub bbox: BoundingBox,
    pub chunk_id: Option<String>,
}

/// One datum pulled from the source document. `value: None` means the field
/// was recognized but empty, as opposed to the field being absent entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedField {
    pub name: String,
    pub value: Option<String>,
    pub confidence: Option<f64>,
    pub location: Option<FieldLocation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationInfo {
    pub instrument_type: Option<String>,
    pub serial_number: Option<ExtractedField>,
    pub calibration_date: Option<ExtractedField>,
    pub expiration_date: Option<ExtractedField>,
    pub certificate_number: Option<ExtractedField>,
    pub calibrating_lab: Option<ExtractedField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementReading {
    pub location_label: String,
    pub value: ExtractedField,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThermographyData {
    pub camera_ambient_temp: Option<ExtractedField>,
    pub datalogger_temp: Option<ExtractedField>,
    #[serde(default)]
    pub phase_readings: Vec<MeasurementReading>,
    pub energy_marshal_comment: Option<ExtractedField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundingData {
    pub calibration: Option<CalibrationInfo>,
    pub resistance_value: Option<ExtractedField>,
    pub test_method: Option<ExtractedField>,
    pub installation_type: Option<ExtractedField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeggerData {
    pub calibration: Option<CalibrationInfo>,
    pub test_voltage: Option<ExtractedField>,
    pub equipment_voltage_rating: Option<ExtractedField>,
    pub insulation_resistance: Option<ExtractedField>,
}

/// Complete extraction result for one document, as produced by the upstream
/// extraction pipeline. An absent sub-record means that test type was not
/// performed, not that extraction failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub document_id: String,
    pub status: String,
    pub page_count: u32,

    #[serde(default)]
    pub calibrations: Vec<CalibrationInfo>,
    #[serde(default)]
    pub measurements: Vec<MeasurementReading>,
    pub thermography: Option<ThermographyData>,
    pub grounding: Option<GroundingData>,
    pub megger: Option<MeggerData>,

    pub raw_markdown: Option<String>,
    #[serde(default)]
    pub raw_chunks_count: u32,

    pub processing_time_ms: Option<u64>,
    pub model_version: Option<String>,
    pub error_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_result_deserializes_without_optional_sections() {
        let raw = r#"
        {
          "document_id": "doc-1",
          "status": "completed",
          "page_count": 4
        }
        "#;

        let extraction: ExtractionResult =
            serde_json::from_str(raw).expect("minimal extraction should deserialize");
        assert!(extraction.calibrations.is_empty());
        assert!(extraction.thermography.is_none());
        assert!(extraction.grounding.is_none());
        assert!(extraction.megger.is_none());
        assert_eq!(extraction.raw_chunks_count, 0);
    }

    #[test]
    fn extracted_field_distinguishes_empty_from_absent() {
        let raw = r#"
        {
          "document_id": "doc-2",
          "status": "completed",
          "page_count": 1,
          "grounding": {
            "calibration": null,
            "resistance_value": {"name": "resistance", "value": null, "confidence": null, "location": null},
            "test_method": null,
            "installation_type": null
          }
        }
        "#;

        let extraction: ExtractionResult =
            serde_json::from_str(raw).expect("grounding section should deserialize");
        let grounding = extraction.grounding.expect("grounding should be present");
        let resistance = grounding
            .resistance_value
            .expect("resistance field should be present");
        assert!(resistance.value.is_none());
        assert!(grounding.test_method.is_none());
    }
}
