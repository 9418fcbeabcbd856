use crate::evidence::{Finding, Severity};
use crate::extraction::ThermographyData;

use super::parse_numeric;

/// Check that the camera's ambient temperature setting matches the external
/// datalogger reading exactly; the tolerance is zero. Returns no findings
/// when no thermography was performed.
pub fn validate_camera_config(
    thermography: Option<&ThermographyData>,
    rule_id: &str,
) -> Vec<Finding> {
    let Some(thermography) = thermography else {
        return Vec::new();
    };

    let Some(camera_field) = thermography.camera_ambient_temp.as_ref() else {
        return vec![missing_finding(rule_id, "camera_ambient_temp", None)];
    };
    let Some(camera_raw) = camera_field.value.as_deref() else {
        return vec![missing_finding(
            rule_id,
            "camera_ambient_temp",
            camera_field.location.clone(),
        )];
    };

    let Some(datalogger_field) = thermography.datalogger_temp.as_ref() else {
        return vec![missing_finding(rule_id, "datalogger_temp", None)];
    };
    let Some(datalogger_raw) = datalogger_field.value.as_deref() else {
        return vec![missing_finding(
            rule_id,
            "datalogger_temp",
            datalogger_field.location.clone(),
        )];
    };

    let Some(camera_temp) = parse_numeric(camera_raw) else {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: format!(
                "Could not parse camera ambient temperature '{camera_raw}' - manual review required"
            ),
            field_name: "camera_ambient_temp".to_string(),
            found_value: Some(camera_raw.to_string()),
            expected_value: None,
            location: camera_field.location.clone(),
        }];
    };

    let Some(datalogger_temp) = parse_numeric(datalogger_raw) else {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: format!(
                "Could not parse datalogger temperature '{datalogger_raw}' - manual review required"
            ),
            field_name: "datalogger_temp".to_string(),
            found_value: Some(datalogger_raw.to_string()),
            expected_value: None,
            location: datalogger_field.location.clone(),
        }];
    };

    if camera_temp != datalogger_temp {
        vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Error,
            message: format!(
                "Camera ambient temperature ({camera_temp}C) does not match datalogger ({datalogger_temp}C)"
            ),
            field_name: "camera_ambient_temp".to_string(),
            found_value: Some(camera_temp.to_string()),
            expected_value: Some(datalogger_temp.to_string()),
            location: camera_field.location.clone(),
        }]
    } else {
        vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Info,
            message: format!(
                "Camera configuration valid - ambient temperature matches datalogger ({camera_temp}C)"
            ),
            field_name: "camera_ambient_temp".to_string(),
            found_value: Some(camera_temp.to_string()),
            expected_value: None,
            location: camera_field.location.clone(),
        }]
    }
}

fn missing_finding(
    rule_id: &str,
    field_name: &str,
    location: Option<crate::extraction::FieldLocation>,
) -> Finding {
    let label = match field_name {
        "camera_ambient_temp" => "camera ambient temperature",
        _ => "datalogger temperature",
    };
    Finding {
        rule_id: rule_id.to_string(),
        severity: Severity::Warning,
        message: format!("Missing {label} - manual review required"),
        field_name: field_name.to_string(),
        found_value: None,
        expected_value: None,
        location,
    }
}
