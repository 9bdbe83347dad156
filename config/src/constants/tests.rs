//! Tests for the centralized configuration constants.

use super::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_default_precision_is_two_places() {
    assert_eq!(DEFAULT_DECIMAL_PLACES, 2);
    assert!(DEFAULT_DECIMAL_PLACES <= MAX_DECIMAL_PLACES);
}

#[test]
fn test_epsilon_is_below_step_tolerance() {
    assert!(EPSILON_TOLERANCE > 0.0);
    assert!(
        EPSILON_TOLERANCE < LAYER_STEP_TOLERANCE_MM,
        "EPSILON_TOLERANCE must not swallow the step tolerance"
    );
}

// =============================================================================
// LAYER HEIGHT TESTS
// =============================================================================

#[test]
fn test_ratio_bounds_are_ordered() {
    assert!(MIN_LAYER_RATIO > 0.0);
    assert!(MIN_LAYER_RATIO < MAX_LAYER_RATIO);
    assert!(MAX_LAYER_RATIO <= 1.0);
}

#[test]
fn test_step_tolerance_is_smaller_than_half_step() {
    assert!(LAYER_STEP_TOLERANCE_MM < LAYER_STEP_MM / 2.0);
}

#[test]
fn test_layer_bounds_scale_with_nozzle() {
    let cfg = CalculatorConfig::default();
    let (min, max) = cfg.layer_bounds(0.6);
    assert!(approx_equal(min, 0.12));
    assert!(approx_equal(max, 0.48));
}

// =============================================================================
// ANGLE AND GRID TESTS
// =============================================================================

#[test]
fn test_angle_range_excludes_flat_and_vertical() {
    assert!(MIN_TARGET_ANGLE_DEG > 0.0);
    assert!(MAX_TARGET_ANGLE_DEG < RIGHT_ANGLE_DEG);
}

#[test]
fn test_flow_grid_holds_twenty_measurements() {
    assert_eq!(FLOW_GRID_ROWS * FLOW_GRID_COLUMNS, 20);
    assert_eq!(FLOW_MEASUREMENT_COUNT, 20);
}

// =============================================================================
// NOZZLE TESTS
// =============================================================================

#[test]
fn test_supported_nozzles_are_sorted_and_positive() {
    assert!(SUPPORTED_NOZZLE_DIAMETERS.iter().all(|&d| d > 0.0));
    assert!(SUPPORTED_NOZZLE_DIAMETERS.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_supported_nozzle_tolerates_float_noise() {
    assert_eq!(supported_nozzle(0.1 + 0.3), Some(0.4));
    assert_eq!(supported_nozzle(0.35), None);
}

// =============================================================================
// CALCULATOR CONFIG TESTS
// =============================================================================

/// Ensures default constants are sane and positive.
///
/// # Examples
/// ```
/// use config::constants::CalculatorConfig;
/// let cfg = CalculatorConfig::default();
/// assert!(cfg.layer_step > 0.0);
/// ```
#[test]
fn default_config_matches_constants() {
    let cfg = CalculatorConfig::default();
    assert_eq!(cfg.decimal_places, DEFAULT_DECIMAL_PLACES);
    assert_eq!(cfg.min_layer_ratio, MIN_LAYER_RATIO);
    assert_eq!(cfg.max_layer_ratio, MAX_LAYER_RATIO);
    assert_eq!(cfg.layer_step, LAYER_STEP_MM);
    assert_eq!(cfg.step_tolerance, LAYER_STEP_TOLERANCE_MM);
}

/// Validates the builder rejects invalid values.
#[test]
fn new_validates_inputs() {
    assert_eq!(
        CalculatorConfig::new(11, 0.2, 0.8, 0.02).unwrap_err(),
        ConfigError::InvalidPrecision(11)
    );
    assert_eq!(
        CalculatorConfig::new(2, 0.0, 0.8, 0.02).unwrap_err(),
        ConfigError::InvalidRatioBounds { min: 0.0, max: 0.8 }
    );
    assert_eq!(
        CalculatorConfig::new(2, 0.5, 1.5, 0.02).unwrap_err(),
        ConfigError::InvalidRatioBounds { min: 0.5, max: 1.5 }
    );
    assert_eq!(
        CalculatorConfig::new(2, 0.2, 0.8, 0.0).unwrap_err(),
        ConfigError::InvalidLayerStep(0.0)
    );
}

#[test]
fn new_rejects_nan_bounds() {
    assert!(CalculatorConfig::new(2, f64::NAN, 0.8, 0.02).is_err());
    assert!(CalculatorConfig::new(2, 0.2, 0.8, f64::NAN).is_err());
}

#[test]
fn config_error_display_names_the_field() {
    let err = CalculatorConfig::new(2, 0.2, 0.8, -1.0).unwrap_err();
    assert!(err.to_string().contains("layer_step"));
}
