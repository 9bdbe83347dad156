//! Tests for the layer height ratio calculator.

use super::*;

fn run(
    angle: impl Into<NumericInput>,
    convention: SlicerConvention,
    nozzle: impl Into<NumericInput>,
) -> CalcResult<LayerHeightResult> {
    evaluate(
        &LayerHeightInput::new(angle, convention, nozzle),
        &CalculatorConfig::default(),
    )
}

// =============================================================================
// HEIGHT DERIVATION
// =============================================================================

#[test]
fn forty_five_degrees_on_point_four_is_valid() {
    let result = run(45.0, SlicerConvention::Orca, 0.4).unwrap();
    assert_eq!(result.height_mm, 0.2);
    assert!(result.is_valid);
    assert!(result.failed_checks.is_empty());
    assert_eq!(result.suggestion, None);
}

#[test]
fn cura_convention_complements_the_angle() {
    // 60° from vertical is 30° from horizontal: tan(30°) × 0.2 = 0.1155
    let cura = run("60", SlicerConvention::Cura, "0.4").unwrap();
    let orca = run("30", SlicerConvention::Orca, "0.4").unwrap();
    assert_eq!(cura.height_mm, 0.12);
    assert_eq!(cura.height_mm, orca.height_mm);
    assert!(cura.is_valid);
}

#[test]
fn larger_nozzle_scales_height() {
    let result = run(45.0, SlicerConvention::Cura, 0.6).unwrap();
    assert_eq!(result.height_mm, 0.3);
    assert!(result.is_valid);
}

// =============================================================================
// VALIDITY CHECKS
// =============================================================================

#[test]
fn off_step_height_is_flagged_with_suggestion() {
    let result = run(33.0, SlicerConvention::Orca, 0.4).unwrap();
    assert_eq!(result.height_mm, 0.13);
    assert!(!result.is_valid);
    assert!(matches!(result.failed_checks[..], [LayerCheck::OffStep { .. }]));
    assert_eq!(
        result.suggestion,
        Some(AngleSuggestion {
            angle_degrees: 32.0,
            height_mm: 0.12
        })
    );
}

#[test]
fn steep_angle_fails_both_checks() {
    let result = run(80.0, SlicerConvention::Orca, 0.4).unwrap();
    assert_eq!(result.height_mm, 1.13);
    assert_eq!(result.failed_checks.len(), 2);
    assert!(matches!(
        result.failed_checks[0],
        LayerCheck::RatioOutOfBounds { .. }
    ));
    assert_eq!(result.suggestion.map(|s| s.angle_degrees), Some(58.0));
}

#[test]
fn shallow_angle_is_below_ratio_but_on_step() {
    let result = run(10.0, SlicerConvention::Orca, 0.4).unwrap();
    assert_eq!(result.height_mm, 0.04);
    assert_eq!(result.failed_checks.len(), 1);
    assert_eq!(result.suggestion.map(|s| s.height_mm), Some(0.08));
}

#[test]
fn check_height_accepts_bounds_exactly() {
    let config = CalculatorConfig::default();
    assert!(check_height(0.08, 0.4, &config).is_empty());
    assert!(check_height(0.32, 0.4, &config).is_empty());
    assert_eq!(check_height(0.34, 0.4, &config).len(), 1);
}

#[test]
fn invalid_result_explains_itself() {
    let result = run(33.0, SlicerConvention::Orca, 0.4).unwrap();
    let message = result.to_string();
    assert!(message.contains("0.13 mm"));
    assert!(message.contains("Try a different angle"));
    assert!(message.contains("32°"));

    let diagnostics = result.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, crate::Severity::Warning);
    assert!(diagnostics[0].hint.as_deref().unwrap_or_default().contains("32°"));
}

// =============================================================================
// INPUT VALIDATION
// =============================================================================

#[test]
fn angles_outside_range_are_rejected() {
    for angle in ["0", "90", "-5", "120", "", "steep"] {
        let err = run(angle, SlicerConvention::Orca, 0.4).unwrap_err();
        assert_eq!(
            err,
            CalcError::AngleOutOfRange { min: 1.0, max: 89.0 },
            "angle {angle:?}"
        );
    }
}

#[test]
fn range_limits_are_inclusive() {
    assert!(run(1.0, SlicerConvention::Orca, 0.4).is_ok());
    assert!(run(89.0, SlicerConvention::Orca, 0.4).is_ok());
}

/// The range applies to the angle as entered, not to its rounded value.
#[test]
fn angles_just_outside_range_are_not_rounded_in() {
    for angle in ["0.995", "89.004"] {
        let err = run(angle, SlicerConvention::Orca, 0.4).unwrap_err();
        assert!(matches!(err, CalcError::AngleOutOfRange { .. }), "angle {angle}");
    }
    let inside = run("88.999", SlicerConvention::Orca, 0.4).unwrap();
    assert_eq!(inside.angle_degrees, 89.0);
}

#[test]
fn coarse_output_precision_keeps_supported_nozzle() {
    let config = CalculatorConfig::new(1, 0.2, 0.8, 0.02).unwrap();
    let result = evaluate(
        &LayerHeightInput::new(45.0, SlicerConvention::Orca, "0.25"),
        &config,
    )
    .unwrap();

    assert_eq!(result.nozzle_diameter.mm(), 0.25);
    // tan(45°) × 0.125 rounded to one place
    assert_eq!(result.height_mm, 0.1);
}

#[test]
fn unsupported_nozzle_is_rejected() {
    let err = run(45.0, SlicerConvention::Orca, 0.45).unwrap_err();
    assert_eq!(err, CalcError::UnsupportedNozzle(0.45));

    let err = run(45.0, SlicerConvention::Orca, "").unwrap_err();
    assert_eq!(err, CalcError::InvalidValues(vec![Field::NozzleDiameter]));
}
