//! Tests for decimal normalization.

use super::*;

#[test]
fn rounds_half_away_from_zero() {
    assert_eq!(normalize(2.345, 2), Some(2.35));
    assert_eq!(normalize(-2.345, 2), Some(-2.35));
    assert_eq!(normalize(0.5, 0), Some(1.0));
    assert_eq!(normalize(-0.5, 0), Some(-1.0));
}

#[test]
fn defends_against_binary_artifacts() {
    // 1.005 is stored as 1.00499999999999989...
    assert_eq!(normalize(1.005, 2), Some(1.01));
    assert_eq!(normalize(1.45, 1), Some(1.5));
    assert_eq!(normalize(0.2 * 0.4 * 60.0, 2), Some(4.8));
}

#[test]
fn parses_trimmed_text() {
    assert_eq!(normalize("  0.42\n", 2), Some(0.42));
    assert_eq!(normalize("1e-1", 2), Some(0.1));
}

#[test]
fn rejects_unparseable_values() {
    assert_eq!(normalize("", 2), None);
    assert_eq!(normalize("0.4mm", 2), None);
    assert_eq!(normalize(NumericInput::Missing, 2), None);
    assert_eq!(normalize(f64::INFINITY, 2), None);
}

#[test]
fn negative_zero_collapses() {
    let value = normalize(-0.001, 2).unwrap();
    assert_eq!(value, 0.0);
    assert!(value.is_sign_positive());
}

#[test]
fn huge_values_pass_through() {
    assert_eq!(normalize(1.0e300, 10), Some(1.0e300));
}

#[test]
fn default_precision_is_two_places() {
    assert_eq!(normalize_default("3.14159"), Some(3.14));
}

#[test]
fn is_idempotent_for_sample_values() {
    for raw in [0.0, 0.125, 1.005, 12.3456, -7.777, 95.238095] {
        for places in 0..=4 {
            let once = normalize(raw, places).unwrap();
            assert_eq!(normalize(once, places), Some(once), "{raw} at {places} places");
        }
    }
}

#[test]
fn normalize_fields_collects_every_failure() {
    let good = NumericInput::from("0.4");
    let bad = NumericInput::from("x");
    let blank = NumericInput::Missing;

    let err = normalize_fields(
        [
            (Field::NozzleDiameter, &good),
            (Field::LayerHeight, &bad),
            (Field::PrintSpeed, &blank),
        ],
        2,
    )
    .unwrap_err();
    assert_eq!(err, vec![Field::LayerHeight, Field::PrintSpeed]);

    let values = normalize_fields([(Field::NozzleDiameter, &good)], 2).unwrap();
    assert_eq!(values, [0.4]);
}
