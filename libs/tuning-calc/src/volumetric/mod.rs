//! # Volumetric Speed Calculator
//!
//! Relates print speed to volumetric flow for a given layer height and
//! nozzle diameter (extrusion width is taken to be the nozzle diameter):
//!
//! ```text
//! flow (mm³/s) = layer height (mm) × nozzle diameter (mm) × speed (mm/s)
//! ```
//!
//! The layer ratio check is advisory only; missing inputs are accumulated
//! and reported together.

use std::fmt;
use std::str::FromStr;

use config::constants::{CalculatorConfig, EPSILON_TOLERANCE, INPUT_DECIMAL_PLACES};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::diagnostic::Diagnostic;
use crate::error::{CalcError, CalcResult};
use crate::input::{Field, NumericInput};
use crate::normalize::{normalize, require_positive, round_to};

/// Which quantity to derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumetricMode {
    /// Known print speed, derive volumetric flow.
    #[default]
    #[serde(alias = "flow")]
    SolveForFlow,
    /// Known volumetric flow, derive print speed.
    #[serde(alias = "speed")]
    SolveForSpeed,
}

impl VolumetricMode {
    /// The input this mode requires.
    pub fn known_field(self) -> Field {
        match self {
            VolumetricMode::SolveForFlow => Field::PrintSpeed,
            VolumetricMode::SolveForSpeed => Field::VolumetricFlow,
        }
    }

    /// The quantity this mode produces.
    pub fn derived_field(self) -> Field {
        match self {
            VolumetricMode::SolveForFlow => Field::VolumetricFlow,
            VolumetricMode::SolveForSpeed => Field::PrintSpeed,
        }
    }
}

impl FromStr for VolumetricMode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "flow" | "solve_for_flow" => Ok(VolumetricMode::SolveForFlow),
            "speed" | "solve_for_speed" => Ok(VolumetricMode::SolveForSpeed),
            _ => Err(CalcError::UnknownMode(s.to_string())),
        }
    }
}

/// Raw inputs for the volumetric calculator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VolumetricInput {
    #[serde(default)]
    pub layer_height: NumericInput,
    #[serde(default)]
    pub nozzle_diameter: NumericInput,
    #[serde(default)]
    pub mode: VolumetricMode,
    /// Print speed (mm/s) or volumetric flow (mm³/s), depending on `mode`.
    #[serde(default)]
    pub known_value: NumericInput,
}

impl VolumetricInput {
    pub fn new(
        layer_height: impl Into<NumericInput>,
        nozzle_diameter: impl Into<NumericInput>,
        mode: VolumetricMode,
        known_value: impl Into<NumericInput>,
    ) -> Self {
        Self {
            layer_height: layer_height.into(),
            nozzle_diameter: nozzle_diameter.into(),
            mode,
            known_value: known_value.into(),
        }
    }
}

/// The derived speed or flow with any advisories raised on the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumetricResult {
    pub mode: VolumetricMode,
    pub layer_height: f64,
    pub nozzle_diameter: f64,
    pub known_value: f64,
    /// Volumetric flow (mm³/s) or print speed (mm/s).
    pub derived_value: f64,
    pub advisories: Vec<Diagnostic>,
}

impl VolumetricResult {
    /// One sentence restating the relationship with the actual numbers.
    ///
    /// # Examples
    /// ```
    /// use tuning_calc::{compute_volumetric, VolumetricMode};
    ///
    /// let result = compute_volumetric(0.2, 0.4, VolumetricMode::SolveForFlow, 60.0).unwrap();
    /// assert!(result.explanation().contains("4.80 mm³/s"));
    /// ```
    pub fn explanation(&self) -> String {
        match self.mode {
            VolumetricMode::SolveForFlow => format!(
                "Printing at {:.2} mm/s with {:.2} mm layers and a {:.2} mm nozzle \
                 requires a volumetric flow of {:.2} mm³/s (layer height × nozzle diameter × speed).",
                self.known_value, self.layer_height, self.nozzle_diameter, self.derived_value
            ),
            VolumetricMode::SolveForSpeed => format!(
                "A volumetric flow of {:.2} mm³/s with {:.2} mm layers and a {:.2} mm nozzle \
                 allows a print speed of {:.2} mm/s (flow ÷ (layer height × nozzle diameter)).",
                self.known_value, self.layer_height, self.nozzle_diameter, self.derived_value
            ),
        }
    }
}

impl fmt::Display for VolumetricResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.explanation())
    }
}

pub(crate) fn evaluate(
    input: &VolumetricInput,
    config: &CalculatorConfig,
) -> CalcResult<VolumetricResult> {
    let layer = normalize(&input.layer_height, INPUT_DECIMAL_PLACES);
    let nozzle = normalize(&input.nozzle_diameter, INPUT_DECIMAL_PLACES);
    let known = normalize(&input.known_value, INPUT_DECIMAL_PLACES);

    let advisories = input_advisories(input, config);
    for advisory in &advisories {
        warn!(?layer, ?nozzle, "{}", advisory.message);
    }

    let missing: Vec<Field> = [
        (Field::LayerHeight, layer),
        (Field::NozzleDiameter, nozzle),
        (input.mode.known_field(), known),
    ]
    .into_iter()
    .filter_map(|(field, value)| value.is_none().then_some(field))
    .collect();

    let (Some(layer), Some(nozzle), Some(known)) = (layer, nozzle, known) else {
        return Err(CalcError::MissingValues(missing));
    };

    // Zero height or nozzle would divide by zero when solving for speed.
    require_positive(Field::LayerHeight, layer)?;
    require_positive(Field::NozzleDiameter, nozzle)?;
    require_positive(input.mode.known_field(), known)?;

    let raw = match input.mode {
        VolumetricMode::SolveForFlow => layer * nozzle * known,
        VolumetricMode::SolveForSpeed => known / (layer * nozzle),
    };
    let derived_name = match input.mode {
        VolumetricMode::SolveForFlow => "volumetric flow",
        VolumetricMode::SolveForSpeed => "print speed",
    };
    let derived_value =
        round_to(raw, config.decimal_places).ok_or(CalcError::NonFinite(derived_name))?;

    debug!(
        mode = ?input.mode,
        layer_height = layer,
        nozzle_diameter = nozzle,
        known,
        derived_value,
        "Computed volumetric relationship"
    );

    Ok(VolumetricResult {
        mode: input.mode,
        layer_height: layer,
        nozzle_diameter: nozzle,
        known_value: known,
        derived_value,
        advisories,
    })
}

/// Non-fatal advisories for the inputs.
///
/// Raised whenever layer height and nozzle both parse, independent of the
/// mode and of whether the calculation itself succeeds.
pub(crate) fn input_advisories(
    input: &VolumetricInput,
    config: &CalculatorConfig,
) -> Vec<Diagnostic> {
    let layer = normalize(&input.layer_height, INPUT_DECIMAL_PLACES);
    let nozzle = normalize(&input.nozzle_diameter, INPUT_DECIMAL_PLACES);
    match (layer, nozzle) {
        (Some(layer), Some(nozzle)) => ratio_advisory(layer, nozzle, config).into_iter().collect(),
        _ => Vec::new(),
    }
}

/// Warns when the layer height falls outside the recommended nozzle ratio.
fn ratio_advisory(layer: f64, nozzle: f64, config: &CalculatorConfig) -> Option<Diagnostic> {
    let (min, max) = config.layer_bounds(nozzle);
    if layer >= min - EPSILON_TOLERANCE && layer <= max + EPSILON_TOLERANCE {
        return None;
    }

    Some(
        Diagnostic::warning(format!(
            "Layer height {layer:.2} mm is outside the recommended {:.0}-{:.0}% of the {nozzle:.2} mm nozzle",
            config.min_layer_ratio * 100.0,
            config.max_layer_ratio * 100.0,
        ))
        .with_field(Field::LayerHeight)
        .with_hint(format!("use a layer height between {min:.2} and {max:.2} mm")),
    )
}
