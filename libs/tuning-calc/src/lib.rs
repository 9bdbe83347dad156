//! # Tuning Calc
//!
//! Closed-form calculators for 3D printer tuning parameters:
//!
//! - **Overhang angle** from nozzle diameter and layer height
//! - **Flow calibration** from 20 measured wall thicknesses
//! - **Layer height** for a target wall angle, checked against nozzle ratio
//!   and Z step resolution
//! - **Volumetric speed**: flow from speed, or speed from flow
//!
//! Every calculator is a pure function of its inputs. Raw values (text or
//! numbers) pass through the [`normalize`] step before any arithmetic.
//! Invalid input produces a [`CalcError`]; out-of-range-but-usable input
//! produces warning [`Diagnostic`]s next to the result.
//!
//! ```
//! use tuning_calc::{compute_overhang_angle, compute_volumetric, SlicerConvention, VolumetricMode};
//!
//! let overhang = compute_overhang_angle("0.4", "0.2", SlicerConvention::Orca).unwrap();
//! assert_eq!(overhang.angle_degrees, 45.0);
//!
//! let flow = compute_volumetric(0.2, 0.4, VolumetricMode::SolveForFlow, 60.0).unwrap();
//! assert_eq!(flow.derived_value, 4.8);
//! ```

pub mod calculator;
pub mod diagnostic;
pub mod error;
pub mod flow;
pub mod input;
pub mod layer_height;
pub mod normalize;
pub mod overhang;
pub mod request;
pub mod volumetric;

pub use calculator::{
    compute_flow_calibration, compute_layer_height, compute_overhang_angle, compute_volumetric,
    Calculator,
};
pub use diagnostic::{Diagnostic, Severity};
pub use error::{CalcError, CalcResult};
pub use flow::{FlowCalibrationResult, FlowInput};
pub use input::{Field, NozzleDiameter, NumericInput, SlicerConvention};
pub use layer_height::{AngleSuggestion, LayerCheck, LayerHeightInput, LayerHeightResult};
pub use normalize::{normalize, normalize_default};
pub use overhang::{OverhangInput, OverhangResult};
pub use request::{CalculationOutput, CalculationRequest, CalculationResponse};
pub use volumetric::{VolumetricInput, VolumetricMode, VolumetricResult};
