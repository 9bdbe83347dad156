//! # Calculator
//!
//! Entry points for the four calculators. [`Calculator`] carries a
//! [`CalculatorConfig`]; the free `compute_*` functions use the defaults.

use config::constants::CalculatorConfig;

use crate::diagnostic::Diagnostic;
use crate::error::CalcResult;
use crate::flow::{self, FlowCalibrationResult, FlowInput};
use crate::input::{NumericInput, SlicerConvention};
use crate::layer_height::{self, LayerHeightInput, LayerHeightResult};
use crate::overhang::{self, OverhangInput, OverhangResult};
use crate::volumetric::{self, VolumetricInput, VolumetricMode, VolumetricResult};

/// Stateless calculator bound to a configuration snapshot.
///
/// # Examples
/// ```
/// use config::constants::CalculatorConfig;
/// use tuning_calc::{Calculator, OverhangInput, SlicerConvention};
///
/// let calculator = Calculator::with_config(CalculatorConfig::new(3, 0.2, 0.8, 0.02).unwrap());
/// let result = calculator
///     .overhang_angle(&OverhangInput::new(0.4, 0.1, SlicerConvention::Orca))
///     .unwrap();
/// assert_eq!(result.angle_degrees, 26.565);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Calculator {
    config: CalculatorConfig,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CalculatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Maximum overhang angle for a nozzle and layer height.
    pub fn overhang_angle(&self, input: &OverhangInput) -> CalcResult<OverhangResult> {
        overhang::evaluate(input, &self.config)
    }

    /// Corrected flow percentage from 20 wall measurements.
    pub fn flow_calibration(&self, input: &FlowInput) -> CalcResult<FlowCalibrationResult> {
        flow::evaluate(input, &self.config)
    }

    /// Layer height for a target wall angle, with validity checks.
    pub fn layer_height(&self, input: &LayerHeightInput) -> CalcResult<LayerHeightResult> {
        layer_height::evaluate(input, &self.config)
    }

    /// Volumetric flow from speed, or speed from volumetric flow.
    pub fn volumetric(&self, input: &VolumetricInput) -> CalcResult<VolumetricResult> {
        volumetric::evaluate(input, &self.config)
    }

    /// Ratio advisories for volumetric inputs, available even when
    /// [`Calculator::volumetric`] fails.
    ///
    /// # Examples
    /// ```
    /// use tuning_calc::{Calculator, VolumetricInput, VolumetricMode};
    ///
    /// let input = VolumetricInput::new(0.4, 0.4, VolumetricMode::SolveForFlow, "");
    /// let calculator = Calculator::default();
    /// assert!(calculator.volumetric(&input).is_err());
    /// assert_eq!(calculator.volumetric_advisories(&input).len(), 1);
    /// ```
    pub fn volumetric_advisories(&self, input: &VolumetricInput) -> Vec<Diagnostic> {
        volumetric::input_advisories(input, &self.config)
    }
}

/// Computes the maximum overhang angle with the default configuration.
///
/// # Examples
/// ```
/// use tuning_calc::{compute_overhang_angle, SlicerConvention};
///
/// let result = compute_overhang_angle("0.4", "0.2", SlicerConvention::Orca).unwrap();
/// assert_eq!(result.angle_degrees, 45.0);
/// ```
pub fn compute_overhang_angle(
    nozzle_diameter: impl Into<NumericInput>,
    layer_height: impl Into<NumericInput>,
    convention: SlicerConvention,
) -> CalcResult<OverhangResult> {
    Calculator::default().overhang_angle(&OverhangInput::new(
        nozzle_diameter,
        layer_height,
        convention,
    ))
}

/// Computes a corrected flow percentage with the default configuration.
///
/// # Examples
/// ```
/// use tuning_calc::compute_flow_calibration;
///
/// let result = compute_flow_calibration(vec!["0.42"; 20], "0.40", "100").unwrap();
/// assert_eq!(result.new_flow_percent, 95.24);
/// ```
pub fn compute_flow_calibration<I, M>(
    measurements: I,
    extrusion_width: impl Into<NumericInput>,
    flow_percent: impl Into<NumericInput>,
) -> CalcResult<FlowCalibrationResult>
where
    I: IntoIterator<Item = M>,
    M: Into<NumericInput>,
{
    Calculator::default().flow_calibration(&FlowInput::new(
        measurements,
        extrusion_width,
        flow_percent,
    ))
}

/// Computes the layer height for a wall angle with the default configuration.
///
/// # Examples
/// ```
/// use tuning_calc::{compute_layer_height, SlicerConvention};
///
/// let result = compute_layer_height(45.0, SlicerConvention::Orca, 0.4).unwrap();
/// assert_eq!(result.height_mm, 0.2);
/// assert!(result.is_valid);
/// ```
pub fn compute_layer_height(
    angle: impl Into<NumericInput>,
    convention: SlicerConvention,
    nozzle_diameter: impl Into<NumericInput>,
) -> CalcResult<LayerHeightResult> {
    Calculator::default().layer_height(&LayerHeightInput::new(angle, convention, nozzle_diameter))
}

/// Computes volumetric flow or print speed with the default configuration.
///
/// # Examples
/// ```
/// use tuning_calc::{compute_volumetric, VolumetricMode};
///
/// let result = compute_volumetric(0.2, 0.4, VolumetricMode::SolveForSpeed, 4.8).unwrap();
/// assert_eq!(result.derived_value, 60.0);
/// ```
pub fn compute_volumetric(
    layer_height: impl Into<NumericInput>,
    nozzle_diameter: impl Into<NumericInput>,
    mode: VolumetricMode,
    known_value: impl Into<NumericInput>,
) -> CalcResult<VolumetricResult> {
    Calculator::default().volumetric(&VolumetricInput::new(
        layer_height,
        nozzle_diameter,
        mode,
        known_value,
    ))
}
