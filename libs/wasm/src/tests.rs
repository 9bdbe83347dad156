//! Tests for the WASM-facing calculator helpers.

use super::*;

/// Confirms the overhang helper reproduces the self-complementary case.
#[test]
fn overhang_half_nozzle_is_45_degrees() {
    let handle = compute_overhang_angle_internal("0.4", "0.2", "orca").expect("valid input");
    assert_eq!(handle.value(), 45.0);
    assert!(handle.is_valid());
    assert!(handle.message().contains("OrcaSlicer"));
}

/// Ensures invalid form values surface explicit diagnostics.
#[test]
fn overhang_rejects_blank_fields() {
    let diagnostics = compute_overhang_angle_internal("", "", "orca").unwrap_err();
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().all(|d| d.is_error()));
}

#[test]
fn unknown_convention_is_reported() {
    let diagnostics = compute_layer_height_internal("45", "slic3r", "0.4").unwrap_err();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("slic3r"));
}

#[test]
fn flow_grid_from_form_strings() {
    let cells = vec!["0.42".to_string(); 20];
    let handle = compute_flow_calibration_internal(&cells, "0.40", "100").expect("valid grid");
    assert_eq!(handle.value(), 95.24);
    assert!(handle.to_json().contains("new_flow_percent"));
}

#[test]
fn flow_grid_with_gap_fails() {
    let mut cells = vec!["0.42".to_string(); 20];
    cells[3] = " ".to_string();
    let diagnostics = compute_flow_calibration_internal(&cells, "0.40", "100").unwrap_err();
    assert!(diagnostics[0].message.contains("19 of 20"));
}

/// Tests that an off-step layer height is a success flagged invalid.
#[test]
fn layer_height_invalid_carries_warnings() {
    let handle = compute_layer_height_internal("33", "orca", "0.4").expect("angle in range");
    assert!(!handle.is_valid());

    let warnings = handle.diagnostics();
    assert!(!warnings.is_empty());
    let first = warnings.get(0).expect("one warning");
    assert_eq!(first.severity(), Severity::Warning);
    assert_eq!(first.field().as_deref(), Some("target_angle"));
    assert!(first.hint().is_some());
}

#[test]
fn volumetric_round_trip() {
    let flow = compute_volumetric_internal("0.2", "0.4", "flow", "60").expect("valid input");
    assert_eq!(flow.value(), 4.8);

    let speed = compute_volumetric_internal("0.2", "0.4", "speed", "4.8").expect("valid input");
    assert_eq!(speed.value(), 60.0);
}

#[test]
fn volumetric_accumulates_missing_fields() {
    let diagnostics = compute_volumetric_internal("", "", "speed", "").unwrap_err();
    assert_eq!(diagnostics.len(), 3);
}

#[test]
fn volumetric_failure_keeps_ratio_warning() {
    let diagnostics = compute_volumetric_internal("0.4", "0.4", "flow", "").unwrap_err();
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics[0].is_error());
    assert!(!diagnostics[1].is_error());
    assert!(diagnostics[1].message.contains("20-80%"));
}

#[test]
fn calculate_returns_json_response() {
    let json = calculate_internal(
        r#"{"calculator": "overhang", "nozzle_diameter": "0.4", "layer_height": "0.2"}"#,
    );
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["status"], "ok");
    assert_eq!(value["result"]["angle_degrees"], 45.0);
}

#[test]
fn calculate_reports_malformed_requests() {
    let json = calculate_internal("{not json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["status"], "error");
    assert!(value["message"]
        .as_str()
        .unwrap_or_default()
        .starts_with("Invalid request"));
}

#[test]
fn normalize_value_signals_nan() {
    assert_eq!(normalize_value("2.345", 2), 2.35);
    assert!(normalize_value("", 2).is_nan());
}
