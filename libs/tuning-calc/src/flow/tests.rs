//! Tests for the flow calibration calculator.

use approx::assert_relative_eq;

use super::*;

fn run(input: FlowInput) -> CalcResult<FlowCalibrationResult> {
    evaluate(&input, &CalculatorConfig::default())
}

#[test]
fn thicker_walls_reduce_flow() {
    let result = run(FlowInput::new(vec!["0.42"; 20], "0.40", "100")).unwrap();

    assert_relative_eq!(result.mean_thickness, 0.42, epsilon = 1e-12);
    assert_eq!(result.new_flow_percent, 95.24);
    assert_eq!(result.configured_flow_percent, 100.0);
}

#[test]
fn thinner_walls_increase_flow() {
    let result = run(FlowInput::new(vec![0.38; 20], 0.4, 95.0)).unwrap();
    // 0.4 / 0.38 * 95 = 100.0
    assert_eq!(result.new_flow_percent, 100.0);
}

#[test]
fn order_of_measurements_is_irrelevant() {
    let mut values: Vec<f64> = (0..20).map(|i| 0.40 + f64::from(i % 5) * 0.01).collect();
    let forward = run(FlowInput::new(values.clone(), 0.4, 100.0)).unwrap();
    values.reverse();
    let reversed = run(FlowInput::new(values, 0.4, 100.0)).unwrap();

    assert_eq!(forward.new_flow_percent, reversed.new_flow_percent);
}

#[test]
fn nineteen_valid_measurements_fail() {
    let mut cells = vec!["0.42".to_string(); 20];
    cells[7] = "oops".to_string();

    let err = run(FlowInput::new(cells, "0.40", "100")).unwrap_err();
    assert_eq!(
        err,
        CalcError::IncompleteMeasurements {
            parsed: 19,
            expected: 20
        }
    );
}

#[test]
fn short_grid_fails() {
    let err = run(FlowInput::new(vec![0.42; 12], 0.4, 100.0)).unwrap_err();
    assert!(matches!(
        err,
        CalcError::IncompleteMeasurements { parsed: 12, .. }
    ));
}

#[test]
fn oversized_grid_fails() {
    let err = run(FlowInput::new(vec![0.42; 21], 0.4, 100.0)).unwrap_err();
    assert_eq!(
        err,
        CalcError::MeasurementCount {
            supplied: 21,
            expected: 20
        }
    );
}

#[test]
fn non_numeric_width_and_flow_fail() {
    let err = run(FlowInput::new(vec![0.42; 20], "wide", "")).unwrap_err();
    assert_eq!(
        err,
        CalcError::InvalidValues(vec![Field::ExtrusionWidth, Field::FlowPercent])
    );
}

#[test]
fn zero_mean_is_rejected() {
    let err = run(FlowInput::new(vec![0.0; 20], 0.4, 100.0)).unwrap_err();
    assert!(matches!(
        err,
        CalcError::NonPositive {
            field: Field::Measurement,
            ..
        }
    ));
}

#[test]
fn message_reports_new_flow() {
    let result = run(FlowInput::new(vec![0.42; 20], 0.4, 100.0)).unwrap();
    assert_eq!(
        result.to_string(),
        "New flow rate: 95.24% (average wall 0.420 mm)"
    );
}
