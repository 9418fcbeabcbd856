use crate::evidence::{Finding, Severity};
use crate::extraction::GroundingData;

struct TestMethod {
    key: &'static str,
    aliases: &'static [&'static str],
    new_ok: bool,
    existing_ok: bool,
}

// IEEE 81 methods. Clamp-on needs an energized loop, so it is not valid for
// new installations.
const VALID_TEST_METHODS: &[TestMethod] = &[
    TestMethod {
        key: "fall-of-potential",
        aliases: &["fall of potential", "3-point", "three-point"],
        new_ok: true,
        existing_ok: true,
    },
    TestMethod {
        key: "slope",
        aliases: &[],
        new_ok: true,
        existing_ok: true,
    },
    TestMethod {
        key: "clamp-on",
        aliases: &["clamp on", "clamp"],
        new_ok: false,
        existing_ok: true,
    },
    TestMethod {
        key: "attached-rod",
        aliases: &["attached rod"],
        new_ok: true,
        existing_ok: true,
    },
    TestMethod {
        key: "star-delta",
        aliases: &["star delta"],
        new_ok: true,
        existing_ok: true,
    },
];

fn normalize_method(method: &str) -> String {
    method.trim().to_lowercase().replace(' ', "-")
}

fn find_method(normalized_method: &str) -> Option<&'static TestMethod> {
    VALID_TEST_METHODS.iter().find(|method| {
        method.key == normalized_method
            || method
                .aliases
                .iter()
                .any(|alias| normalize_method(alias) == normalized_method)
    })
}

/// Check that the grounding test method is documented, recognized, and
/// appropriate for the installation context. An undocumented method is the
/// one missing-data case that rejects outright: method traceability is a hard
/// audit requirement.
pub fn validate_test_method(grounding: &GroundingData, rule_id: &str) -> Vec<Finding> {
    let Some(method_field) = grounding.test_method.as_ref() else {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Error,
            message: "Test method not specified - must be documented for audit traceability"
                .to_string(),
            field_name: "test_method".to_string(),
            found_value: None,
            expected_value: Some(
                "Documented test method (e.g., fall-of-potential, clamp-on)".to_string(),
            ),
            location: None,
        }];
    };

    let raw_method = method_field.value.as_deref().unwrap_or("");
    if raw_method.trim().is_empty() {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Error,
            message: "Test method value is empty - must be documented for audit traceability"
                .to_string(),
            field_name: "test_method".to_string(),
            found_value: method_field.value.clone(),
            expected_value: Some(
                "Documented test method (e.g., fall-of-potential, clamp-on)".to_string(),
            ),
            location: method_field.location.clone(),
        }];
    }

    let normalized_method = normalize_method(raw_method);
    let Some(method) = find_method(&normalized_method) else {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: format!(
                "Test method '{raw_method}' is unrecognized - manual review required to verify validity"
            ),
            field_name: "test_method".to_string(),
            found_value: Some(raw_method.to_string()),
            expected_value: Some(
                "Recognized method: fall-of-potential, slope, clamp-on, attached-rod, star-delta"
                    .to_string(),
            ),
            location: method_field.location.clone(),
        }];
    };

    let context_value = grounding
        .installation_type
        .as_ref()
        .and_then(|field| field.value.as_deref());
    let Some(raw_context) = context_value.filter(|value| !value.trim().is_empty()) else {
        return vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: format!(
                "Test method '{}' is valid but installation type context is missing - cannot verify method appropriateness",
                method.key
            ),
            field_name: "test_method".to_string(),
            found_value: Some(method.key.to_string()),
            expected_value: Some("Installation type context (new or existing)".to_string()),
            location: method_field.location.clone(),
        }];
    };

    let normalized_context = raw_context.trim().to_lowercase();
    match normalized_context.as_str() {
        "new" if !method.new_ok => vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: format!(
                "Test method '{}' is not recommended for new installations - fall-of-potential method is standard",
                method.key
            ),
            field_name: "test_method".to_string(),
            found_value: Some(format!("{} (new installation)", method.key)),
            expected_value: Some(
                "fall-of-potential or equivalent for new installations".to_string(),
            ),
            location: method_field.location.clone(),
        }],
        "existing" if !method.existing_ok => vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: format!(
                "Test method '{}' is not appropriate for existing installations",
                method.key
            ),
            field_name: "test_method".to_string(),
            found_value: Some(format!("{} (existing installation)", method.key)),
            expected_value: Some(
                "Appropriate method for existing installation testing".to_string(),
            ),
            location: method_field.location.clone(),
        }],
        "new" | "existing" => vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Info,
            message: format!(
                "Test method '{}' is appropriate for {normalized_context} installation testing",
                method.key
            ),
            field_name: "test_method".to_string(),
            found_value: Some(method.key.to_string()),
            expected_value: Some(format!(
                "Valid method for {normalized_context} installation"
            )),
            location: method_field.location.clone(),
        }],
        _ => vec![Finding {
            rule_id: rule_id.to_string(),
            severity: Severity::Warning,
            message: format!(
                "Test method '{}' is valid but installation type '{raw_context}' is unrecognized - cannot verify method appropriateness",
                method.key
            ),
            field_name: "test_method".to_string(),
            found_value: Some(method.key.to_string()),
            expected_value: Some("Installation type: 'new' or 'existing'".to_string()),
            location: method_field.location.clone(),
        }],
    }
}
