//! # Flow Calibration Calculator
//!
//! Corrects the configured extrusion flow from measured wall thickness.
//!
//! A calibration print is measured at 20 points (a 4 x 5 grid). If walls come
//! out thicker than the configured extrusion width the printer is
//! over-extruding, and the flow is scaled down by the same ratio:
//!
//! ```text
//! new_flow = (configured_width / mean_measured) × configured_flow
//! ```
//!
//! Grid position carries no weight; only the mean is used.

use std::fmt;

use config::constants::{CalculatorConfig, FLOW_MEASUREMENT_COUNT, INPUT_DECIMAL_PLACES};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CalcError, CalcResult};
use crate::input::{Field, NumericInput};
use crate::normalize::{normalize, normalize_fields, require_positive, round_to};

/// Raw inputs for the flow calibration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowInput {
    /// Wall thickness measurements in millimetres, in grid order.
    #[serde(default)]
    pub measurements: Vec<NumericInput>,
    /// Extrusion width configured in the slicer (mm).
    #[serde(default)]
    pub extrusion_width: NumericInput,
    /// Flow percentage configured in the slicer.
    #[serde(default)]
    pub flow_percent: NumericInput,
}

impl FlowInput {
    pub fn new<I, M>(
        measurements: I,
        extrusion_width: impl Into<NumericInput>,
        flow_percent: impl Into<NumericInput>,
    ) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<NumericInput>,
    {
        Self {
            measurements: measurements.into_iter().map(Into::into).collect(),
            extrusion_width: extrusion_width.into(),
            flow_percent: flow_percent.into(),
        }
    }
}

/// Corrected flow derived from a calibration print.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlowCalibrationResult {
    /// Arithmetic mean of the measurements (mm).
    pub mean_thickness: f64,
    /// Flow percentage before correction.
    pub configured_flow_percent: f64,
    /// Corrected flow percentage.
    pub new_flow_percent: f64,
}

impl FlowCalibrationResult {
    /// Difference between corrected and configured flow, in percentage points.
    ///
    /// # Examples
    /// ```
    /// use tuning_calc::compute_flow_calibration;
    ///
    /// let result = compute_flow_calibration(vec![0.5; 20], 0.4, 100.0).unwrap();
    /// assert_eq!(result.change_percent(), -20.0);
    /// ```
    pub fn change_percent(&self) -> f64 {
        round_to(self.new_flow_percent - self.configured_flow_percent, 2)
            .unwrap_or(f64::NAN)
    }
}

impl fmt::Display for FlowCalibrationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "New flow rate: {:.2}% (average wall {:.3} mm)",
            self.new_flow_percent, self.mean_thickness
        )
    }
}

pub(crate) fn evaluate(
    input: &FlowInput,
    config: &CalculatorConfig,
) -> CalcResult<FlowCalibrationResult> {
    let supplied = input.measurements.len();
    if supplied > FLOW_MEASUREMENT_COUNT {
        return Err(CalcError::MeasurementCount {
            supplied,
            expected: FLOW_MEASUREMENT_COUNT,
        });
    }

    let measurements: Vec<f64> = input
        .measurements
        .iter()
        .filter_map(|m| normalize(m, INPUT_DECIMAL_PLACES))
        .collect();
    if measurements.len() < FLOW_MEASUREMENT_COUNT {
        return Err(CalcError::IncompleteMeasurements {
            parsed: measurements.len(),
            expected: FLOW_MEASUREMENT_COUNT,
        });
    }

    let [width, flow] = normalize_fields(
        [
            (Field::ExtrusionWidth, &input.extrusion_width),
            (Field::FlowPercent, &input.flow_percent),
        ],
        INPUT_DECIMAL_PLACES,
    )
    .map_err(CalcError::InvalidValues)?;
    require_positive(Field::ExtrusionWidth, width)?;
    require_positive(Field::FlowPercent, flow)?;

    let mean = measurements.iter().sum::<f64>() / measurements.len() as f64;
    require_positive(Field::Measurement, mean)?;

    let new_flow = round_to((width / mean) * flow, config.decimal_places)
        .ok_or(CalcError::NonFinite("flow percentage"))?;

    debug!(
        mean_thickness = mean,
        extrusion_width = width,
        configured_flow = flow,
        new_flow,
        "Computed flow calibration"
    );

    Ok(FlowCalibrationResult {
        mean_thickness: mean,
        configured_flow_percent: flow,
        new_flow_percent: new_flow,
    })
}

#[cfg(test)]
mod tests;
