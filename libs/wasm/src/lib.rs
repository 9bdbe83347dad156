//! WASM-facing entry points for the print tuning calculators.
//!
//! This crate is compiled to a `cdylib` and consumed from JavaScript via
//! `wasm-bindgen`. Form values arrive as raw strings exactly as the inputs
//! hold them. Native tests interact with the `*_internal` helpers to avoid
//! depending on a JS host.
//!
//! ```
//! let handle = tuning_wasm::compute_overhang_angle_internal("0.4", "0.2", "orca").unwrap();
//! assert_eq!(handle.value(), 45.0);
//! ```

use config::constants::{DEFAULT_DECIMAL_PLACES, SUPPORTED_NOZZLE_DIAMETERS};
use tuning_calc::{
    CalcError, CalculationOutput, CalculationRequest, CalculationResponse, Calculator,
    Diagnostic as RustDiagnostic, FlowInput, LayerHeightInput, OverhangInput, SlicerConvention,
    VolumetricInput, VolumetricMode,
};
use wasm_bindgen::prelude::*;

mod diagnostics;
mod logging;
mod result_handle;

pub use diagnostics::{Diagnostic, DiagnosticList, Severity};
pub use result_handle::CalculationHandle;

/// Installs a panic hook that forwards Rust panics to the browser console.
///
/// # Examples
/// ```no_run
/// // In JavaScript: import and call once at startup.
/// // import { init_panic_hook } from "tuning_wasm";
/// // init_panic_hook();
/// ```
#[wasm_bindgen]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Forwards calculator log events to the browser console.
///
/// `verbose` includes per-calculation debug events; otherwise only warnings
/// and errors are shown.
#[wasm_bindgen]
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    logging::install(level);
}

/// Returns the nozzle diameters the layer height calculator accepts, for
/// populating the select element.
///
/// # Examples
/// ```
/// let sizes = tuning_wasm::supported_nozzle_diameters();
/// assert!(sizes.contains(&0.4));
/// ```
#[wasm_bindgen]
pub fn supported_nozzle_diameters() -> Vec<f64> {
    SUPPORTED_NOZZLE_DIAMETERS.to_vec()
}

/// Rounds a raw form value to `decimal_places`, returning `NaN` when it does
/// not parse.
///
/// # Examples
/// ```
/// assert_eq!(tuning_wasm::normalize_value("1.005", 2), 1.01);
/// assert!(tuning_wasm::normalize_value("abc", 2).is_nan());
/// ```
#[wasm_bindgen]
pub fn normalize_value(value: &str, decimal_places: u32) -> f64 {
    tuning_calc::normalize(value, decimal_places).unwrap_or(f64::NAN)
}

/// Returns the default decimal precision used for inputs and results.
#[wasm_bindgen]
pub fn default_decimal_places() -> u32 {
    DEFAULT_DECIMAL_PLACES
}

/// Computes the maximum overhang angle.
///
/// # Errors
/// Returns a JavaScript error value containing a human-readable message
/// when validation fails.
///
/// # Examples
/// ```no_run
/// // In JavaScript: compute_overhang_angle("0.4", "0.2", "orca").message
/// ```
#[wasm_bindgen]
pub fn compute_overhang_angle(
    nozzle_diameter: &str,
    layer_height: &str,
    convention: &str,
) -> Result<CalculationHandle, JsValue> {
    compute_overhang_angle_internal(nozzle_diameter, layer_height, convention).map_err(to_js_error)
}

/// Computes a corrected flow percentage from the 20 grid cells.
///
/// # Errors
/// Returns a JavaScript error when a cell is empty or non-numeric, or when the
/// width or flow are invalid.
#[wasm_bindgen]
pub fn compute_flow_calibration(
    measurements: Vec<String>,
    extrusion_width: &str,
    flow_percent: &str,
) -> Result<CalculationHandle, JsValue> {
    compute_flow_calibration_internal(&measurements, extrusion_width, flow_percent)
        .map_err(to_js_error)
}

/// Computes the layer height for a target wall angle.
///
/// An out-of-bounds or off-step height is still a success; check `is_valid`.
///
/// # Errors
/// Returns a JavaScript error when the angle is outside 1-89° or the nozzle is
/// unsupported.
#[wasm_bindgen]
pub fn compute_layer_height(
    angle: &str,
    convention: &str,
    nozzle_diameter: &str,
) -> Result<CalculationHandle, JsValue> {
    compute_layer_height_internal(angle, convention, nozzle_diameter).map_err(to_js_error)
}

/// Computes volumetric flow (`mode = "flow"`) or print speed (`mode = "speed"`).
///
/// # Errors
/// Returns a JavaScript error listing every missing field, followed by any
/// layer ratio warning.
#[wasm_bindgen]
pub fn compute_volumetric(
    layer_height: &str,
    nozzle_diameter: &str,
    mode: &str,
    known_value: &str,
) -> Result<CalculationHandle, JsValue> {
    compute_volumetric_internal(layer_height, nozzle_diameter, mode, known_value)
        .map_err(to_js_error)
}

/// Evaluates a JSON-encoded [`CalculationRequest`] and returns the JSON
/// [`CalculationResponse`]. Never throws.
///
/// # Examples
/// ```no_run
/// // In JavaScript (e.g. inside a worker):
/// // const response = JSON.parse(calculate(JSON.stringify({
/// //   calculator: "volumetric", layer_height: "0.2", nozzle_diameter: "0.4",
/// //   mode: "solve_for_flow", known_value: "60",
/// // })));
/// ```
#[wasm_bindgen]
pub fn calculate(request_json: &str) -> String {
    calculate_internal(request_json)
}

/// Host-only helper for [`compute_overhang_angle`].
///
/// # Examples
/// ```
/// let handle = tuning_wasm::compute_overhang_angle_internal("0.4", "0.1", "cura").unwrap();
/// assert_eq!(handle.value(), 63.43);
/// ```
pub fn compute_overhang_angle_internal(
    nozzle_diameter: &str,
    layer_height: &str,
    convention: &str,
) -> Result<CalculationHandle, Vec<RustDiagnostic>> {
    let convention = parse_convention(convention)?;
    let input = OverhangInput::new(nozzle_diameter, layer_height, convention);
    Calculator::default()
        .overhang_angle(&input)
        .map(|r| CalculationOutput::Overhang(r).into())
        .map_err(|err| err.diagnostics())
}

/// Host-only helper for [`compute_flow_calibration`].
pub fn compute_flow_calibration_internal(
    measurements: &[String],
    extrusion_width: &str,
    flow_percent: &str,
) -> Result<CalculationHandle, Vec<RustDiagnostic>> {
    let input = FlowInput::new(measurements, extrusion_width, flow_percent);
    Calculator::default()
        .flow_calibration(&input)
        .map(|r| CalculationOutput::Flow(r).into())
        .map_err(|err| err.diagnostics())
}

/// Host-only helper for [`compute_layer_height`].
pub fn compute_layer_height_internal(
    angle: &str,
    convention: &str,
    nozzle_diameter: &str,
) -> Result<CalculationHandle, Vec<RustDiagnostic>> {
    let convention = parse_convention(convention)?;
    let input = LayerHeightInput::new(angle, convention, nozzle_diameter);
    Calculator::default()
        .layer_height(&input)
        .map(|r| CalculationOutput::LayerHeight(r).into())
        .map_err(|err| err.diagnostics())
}

/// Host-only helper for [`compute_volumetric`].
pub fn compute_volumetric_internal(
    layer_height: &str,
    nozzle_diameter: &str,
    mode: &str,
    known_value: &str,
) -> Result<CalculationHandle, Vec<RustDiagnostic>> {
    let mode: VolumetricMode = mode.parse().map_err(|err: CalcError| err.diagnostics())?;
    let input = VolumetricInput::new(layer_height, nozzle_diameter, mode, known_value);
    let calculator = Calculator::default();
    calculator
        .volumetric(&input)
        .map(|r| CalculationOutput::Volumetric(r).into())
        .map_err(|err| {
            let mut diagnostics = err.diagnostics();
            diagnostics.extend(calculator.volumetric_advisories(&input));
            diagnostics
        })
}

/// Host-only helper for [`calculate`].
///
/// # Examples
/// ```
/// let json = tuning_wasm::calculate_internal(r#"{"calculator": "flow"}"#);
/// assert!(json.contains(r#""status":"error""#));
/// ```
pub fn calculate_internal(request_json: &str) -> String {
    let response = match serde_json::from_str::<CalculationRequest>(request_json) {
        Ok(request) => Calculator::default().evaluate(&request),
        Err(err) => {
            let message = format!("Invalid request: {err}");
            CalculationResponse::Error {
                diagnostics: vec![RustDiagnostic::error(message.clone())],
                message,
            }
        }
    };

    serde_json::to_string(&response).unwrap_or_else(|err| {
        serde_json::json!({ "status": "error", "message": err.to_string() }).to_string()
    })
}

fn parse_convention(convention: &str) -> Result<SlicerConvention, Vec<RustDiagnostic>> {
    convention
        .parse::<SlicerConvention>()
        .map_err(|err| err.diagnostics())
}

fn to_js_error(diagnostics: Vec<RustDiagnostic>) -> JsValue {
    // Convert diagnostics to a JS-friendly error message
    let messages: Vec<String> = diagnostics.iter().map(|d| d.message.clone()).collect();
    JsValue::from_str(&messages.join("\n"))
}

#[cfg(test)]
mod tests;
