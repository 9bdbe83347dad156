//! # Calculation Handle
//!
//! WASM-friendly wrapper for a calculator result that can be handed to JavaScript.

use tuning_calc::CalculationOutput;
use wasm_bindgen::prelude::*;

use crate::diagnostics::DiagnosticList;

/// A handle to a successful calculation.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const result = compute_layer_height("45", "orca", "0.4");
///
/// output.textContent = result.message;
/// output.classList.toggle("invalid", !result.is_valid);
///
/// const warnings = result.diagnostics();
/// for (let i = 0; i < warnings.len(); i++) {
///   console.warn(warnings.get(i).message());
/// }
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct CalculationHandle {
    /// Headline number (angle, flow %, layer height, speed or flow)
    value: f64,
    /// Formatted message for display
    message: String,
    /// False only for layer heights failing a validity check
    is_valid: bool,
    /// Non-fatal warnings
    diagnostics: DiagnosticList,
    /// Full result record as JSON
    json: String,
}

#[wasm_bindgen]
impl CalculationHandle {
    /// Returns the headline value.
    #[wasm_bindgen(getter)]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the formatted message.
    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }

    /// Returns whether the result passed every validity check.
    #[wasm_bindgen(getter)]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Returns the warnings attached to the result.
    #[wasm_bindgen]
    pub fn diagnostics(&self) -> DiagnosticList {
        self.diagnostics.clone()
    }

    /// Returns the full result record serialized as JSON.
    #[wasm_bindgen]
    pub fn to_json(&self) -> String {
        self.json.clone()
    }
}

impl From<CalculationOutput> for CalculationHandle {
    fn from(output: CalculationOutput) -> Self {
        let json = serde_json::to_string(&output).unwrap_or_default();
        Self {
            value: output.value(),
            message: output.message(),
            is_valid: output.is_valid(),
            diagnostics: output.diagnostics().into_iter().collect(),
            json,
        }
    }
}
