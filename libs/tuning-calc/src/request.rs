//! # Request Dispatch
//!
//! Tagged request and response records so a host can drive every calculator
//! through one stateless handler (a JSON endpoint, a worker message, a CLI).
//!
//! ```text
//! {"calculator": "overhang", "nozzle_diameter": "0.4", "layer_height": "0.2"}
//!     → {"status": "ok", "result": {...}, "message": "...", "diagnostics": []}
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculator::Calculator;
use crate::diagnostic::Diagnostic;
use crate::error::CalcResult;
use crate::flow::{FlowCalibrationResult, FlowInput};
use crate::layer_height::{LayerHeightInput, LayerHeightResult};
use crate::overhang::{OverhangInput, OverhangResult};
use crate::volumetric::{VolumetricInput, VolumetricResult};

/// One calculation to perform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculationRequest {
    Overhang(OverhangInput),
    Flow(FlowInput),
    LayerHeight(LayerHeightInput),
    Volumetric(VolumetricInput),
}

impl CalculationRequest {
    /// Short name of the targeted calculator.
    pub fn name(&self) -> &'static str {
        match self {
            CalculationRequest::Overhang(_) => "overhang",
            CalculationRequest::Flow(_) => "flow",
            CalculationRequest::LayerHeight(_) => "layer_height",
            CalculationRequest::Volumetric(_) => "volumetric",
        }
    }
}

/// Successful output of any calculator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CalculationOutput {
    Overhang(OverhangResult),
    Flow(FlowCalibrationResult),
    LayerHeight(LayerHeightResult),
    Volumetric(VolumetricResult),
}

impl CalculationOutput {
    /// The headline number: angle, flow %, layer height, or derived speed/flow.
    pub fn value(&self) -> f64 {
        match self {
            CalculationOutput::Overhang(r) => r.angle_degrees,
            CalculationOutput::Flow(r) => r.new_flow_percent,
            CalculationOutput::LayerHeight(r) => r.height_mm,
            CalculationOutput::Volumetric(r) => r.derived_value,
        }
    }

    /// False only for layer heights that fail a validity check.
    pub fn is_valid(&self) -> bool {
        match self {
            CalculationOutput::LayerHeight(r) => r.is_valid,
            _ => true,
        }
    }

    /// Formatted message for the host to display.
    pub fn message(&self) -> String {
        match self {
            CalculationOutput::Overhang(r) => r.to_string(),
            CalculationOutput::Flow(r) => r.to_string(),
            CalculationOutput::LayerHeight(r) => r.to_string(),
            CalculationOutput::Volumetric(r) => r.to_string(),
        }
    }

    /// Non-fatal warnings attached to the result.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            CalculationOutput::LayerHeight(r) => r.diagnostics(),
            CalculationOutput::Volumetric(r) => r.advisories.clone(),
            CalculationOutput::Overhang(_) | CalculationOutput::Flow(_) => Vec::new(),
        }
    }
}

/// Outcome of a [`CalculationRequest`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalculationResponse {
    Ok {
        result: CalculationOutput,
        message: String,
        diagnostics: Vec<Diagnostic>,
    },
    Error {
        message: String,
        diagnostics: Vec<Diagnostic>,
    },
}

impl CalculationResponse {
    pub fn is_ok(&self) -> bool {
        matches!(self, CalculationResponse::Ok { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            CalculationResponse::Ok { message, .. } | CalculationResponse::Error { message, .. } => {
                message
            }
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            CalculationResponse::Ok { diagnostics, .. }
            | CalculationResponse::Error { diagnostics, .. } => diagnostics,
        }
    }
}

impl From<CalcResult<CalculationOutput>> for CalculationResponse {
    fn from(result: CalcResult<CalculationOutput>) -> Self {
        match result {
            Ok(output) => CalculationResponse::Ok {
                message: output.message(),
                diagnostics: output.diagnostics(),
                result: output,
            },
            Err(err) => CalculationResponse::Error {
                message: err.to_string(),
                diagnostics: err.diagnostics(),
            },
        }
    }
}

impl Calculator {
    /// Runs the calculator a request names. Never fails; validation errors
    /// come back as [`CalculationResponse::Error`].
    ///
    /// # Examples
    /// ```
    /// use tuning_calc::{Calculator, CalculationRequest, OverhangInput, SlicerConvention};
    ///
    /// let request = CalculationRequest::Overhang(OverhangInput::new("0.4", "", SlicerConvention::Cura));
    /// let response = Calculator::default().evaluate(&request);
    /// assert!(!response.is_ok());
    /// assert_eq!(response.diagnostics().len(), 1);
    /// ```
    pub fn evaluate(&self, request: &CalculationRequest) -> CalculationResponse {
        let result = match request {
            CalculationRequest::Overhang(input) => {
                self.overhang_angle(input).map(CalculationOutput::Overhang)
            }
            CalculationRequest::Flow(input) => {
                self.flow_calibration(input).map(CalculationOutput::Flow)
            }
            CalculationRequest::LayerHeight(input) => {
                self.layer_height(input).map(CalculationOutput::LayerHeight)
            }
            CalculationRequest::Volumetric(input) => {
                self.volumetric(input).map(CalculationOutput::Volumetric)
            }
        };

        if let Err(err) = &result {
            debug!(calculator = request.name(), %err, "Calculation rejected");
        }

        let mut response = CalculationResponse::from(result);
        // Advisories on a successful result already travel inside it.
        if let (
            CalculationResponse::Error { diagnostics, .. },
            CalculationRequest::Volumetric(input),
        ) = (&mut response, request)
        {
            diagnostics.extend(self.volumetric_advisories(input));
        }
        response
    }
}
