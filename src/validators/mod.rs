mod calibration;
mod camera_config;
mod grounding_calibration;
mod grounding_resistance;
mod megger_calibration;
mod megger_insulation;
mod megger_voltage;
mod phase_delta;
mod serial;
mod test_method;


pub use self::calibration::validate_calibration;
pub use self::camera_config::validate_camera_config;
pub use self::grounding_calibration::validate_grounding_calibration;
pub use self::grounding_resistance::validate_grounding_resistance;
pub use self::megger_calibration::validate_megger_calibration;
pub use self::megger_insulation::validate_insulation_resistance;
pub use self::megger_voltage::validate_test_voltage;
pub use self::phase_delta::validate_phase_delta;
pub use self::serial::{collect_serial_numbers, validate_serial_consistency};
pub use self::test_method::validate_test_method;

// Measurement values arrive as raw document text.
pub(crate) fn parse_numeric(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}
