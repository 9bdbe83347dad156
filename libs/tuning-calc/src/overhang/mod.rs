//! # Overhang Angle Calculator
//!
//! Derives the steepest printable overhang from nozzle diameter and layer
//! height. The extrusion width is taken to be the nozzle diameter, so each
//! layer can step out by at most half a nozzle over a rise of one layer.

use std::fmt;

use config::constants::{CalculatorConfig, INPUT_DECIMAL_PLACES, RIGHT_ANGLE_DEG};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CalcError, CalcResult};
use crate::input::{Field, NumericInput, SlicerConvention};
use crate::normalize::{normalize_fields, require_positive, round_to};

/// Raw inputs for the overhang calculator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OverhangInput {
    #[serde(default)]
    pub nozzle_diameter: NumericInput,
    #[serde(default)]
    pub layer_height: NumericInput,
    #[serde(default)]
    pub convention: SlicerConvention,
}

impl OverhangInput {
    pub fn new(
        nozzle_diameter: impl Into<NumericInput>,
        layer_height: impl Into<NumericInput>,
        convention: SlicerConvention,
    ) -> Self {
        Self {
            nozzle_diameter: nozzle_diameter.into(),
            layer_height: layer_height.into(),
            convention,
        }
    }
}

/// Maximum unsupported overhang for a nozzle/layer combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverhangResult {
    /// Overhang angle in degrees, expressed in the slicer's convention.
    pub angle_degrees: f64,
    pub convention: SlicerConvention,
}

impl fmt::Display for OverhangResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Maximum overhang for {}: {:.2}°",
            self.convention.label(),
            self.angle_degrees
        )
    }
}

/// Computes the overhang angle.
///
/// `atan(h / (d/2))` is the angle of the printed wall from the horizontal;
/// its complement is the overhang from vertical. OrcaSlicer expects the
/// former, Cura the latter.
pub(crate) fn evaluate(
    input: &OverhangInput,
    config: &CalculatorConfig,
) -> CalcResult<OverhangResult> {
    let [nozzle, layer] = normalize_fields(
        [
            (Field::NozzleDiameter, &input.nozzle_diameter),
            (Field::LayerHeight, &input.layer_height),
        ],
        INPUT_DECIMAL_PLACES,
    )
    .map_err(CalcError::InvalidValues)?;

    require_positive(Field::NozzleDiameter, nozzle)?;
    require_positive(Field::LayerHeight, layer)?;

    let wall_angle = (layer / (nozzle / 2.0)).atan().to_degrees();
    let from_vertical = RIGHT_ANGLE_DEG - wall_angle;
    let angle = match input.convention {
        SlicerConvention::Orca => RIGHT_ANGLE_DEG - from_vertical,
        SlicerConvention::Cura => from_vertical,
    };

    let angle_degrees =
        round_to(angle, config.decimal_places).ok_or(CalcError::NonFinite("overhang angle"))?;

    debug!(
        nozzle_diameter = nozzle,
        layer_height = layer,
        convention = %input.convention,
        angle_degrees,
        "Computed overhang angle"
    );

    Ok(OverhangResult {
        angle_degrees,
        convention: input.convention,
    })
}
