//! # Layer Height Ratio Calculator
//!
//! Derives the layer height that produces a target wall angle, then checks it
//! against the practical nozzle ratio and the printer's Z step.
//!
//! For a wall stepping out half a nozzle per layer, the wall angle from the
//! horizontal satisfies `tan(angle) = height / (nozzle / 2)`.
//!
//! Invalid heights come with a concrete suggestion: the nearest angle (searched
//! one degree at a time, below first) whose height passes both checks.

use std::fmt;

use config::constants::{
    CalculatorConfig, EPSILON_TOLERANCE, INPUT_DECIMAL_PLACES, MAX_TARGET_ANGLE_DEG,
    MIN_TARGET_ANGLE_DEG, RIGHT_ANGLE_DEG,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::diagnostic::Diagnostic;
use crate::error::{CalcError, CalcResult};
use crate::input::{Field, NozzleDiameter, NumericInput, SlicerConvention};
use crate::normalize::{normalize, round_to};

/// Raw inputs for the layer height calculator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayerHeightInput {
    /// Target wall angle in degrees.
    #[serde(default)]
    pub angle: NumericInput,
    #[serde(default)]
    pub convention: SlicerConvention,
    /// Nozzle diameter in millimetres; must be a supported size.
    #[serde(default)]
    pub nozzle_diameter: NumericInput,
}

impl LayerHeightInput {
    pub fn new(
        angle: impl Into<NumericInput>,
        convention: SlicerConvention,
        nozzle_diameter: impl Into<NumericInput>,
    ) -> Self {
        Self {
            angle: angle.into(),
            convention,
            nozzle_diameter: nozzle_diameter.into(),
        }
    }
}

/// A validity check a computed layer height failed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum LayerCheck {
    /// Height outside `[min, max]`, the configured fraction of the nozzle.
    RatioOutOfBounds { min: f64, max: f64 },
    /// Height not within tolerance of a Z step multiple.
    OffStep { nearest_step: f64 },
}

impl fmt::Display for LayerCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerCheck::RatioOutOfBounds { min, max } => {
                write!(f, "outside the safe range of {min:.2}-{max:.2} mm")
            }
            LayerCheck::OffStep { nearest_step } => {
                write!(f, "not on a printer step (nearest is {nearest_step:.2} mm)")
            }
        }
    }
}

/// A nearby angle whose layer height passes every check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AngleSuggestion {
    pub angle_degrees: f64,
    pub height_mm: f64,
}

/// Layer height for a target wall angle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerHeightResult {
    pub height_mm: f64,
    pub is_valid: bool,
    pub angle_degrees: f64,
    pub nozzle_diameter: NozzleDiameter,
    pub convention: SlicerConvention,
    /// Checks the height failed; empty when valid.
    pub failed_checks: Vec<LayerCheck>,
    pub suggestion: Option<AngleSuggestion>,
}

impl LayerHeightResult {
    /// Warnings describing why the height is unusable, with the suggestion as a hint.
    ///
    /// # Examples
    /// ```
    /// use tuning_calc::{compute_layer_height, SlicerConvention};
    ///
    /// let valid = compute_layer_height(45.0, SlicerConvention::Orca, 0.4).unwrap();
    /// assert!(valid.diagnostics().is_empty());
    /// ```
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.failed_checks
            .iter()
            .map(|check| {
                let diagnostic = Diagnostic::warning(format!(
                    "Layer height {:.2} mm is {check}",
                    self.height_mm
                ))
                .with_field(Field::TargetAngle);
                match self.suggestion {
                    Some(s) => diagnostic.with_hint(format!(
                        "try {:.0}° for a {:.2} mm layer",
                        s.angle_degrees, s.height_mm
                    )),
                    None => diagnostic,
                }
            })
            .collect()
    }
}

impl fmt::Display for LayerHeightResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid {
            return write!(
                f,
                "Layer height: {:.2} mm for {:.2}° with a {:.2} mm nozzle",
                self.height_mm,
                self.angle_degrees,
                self.nozzle_diameter.mm()
            );
        }

        let reasons = self
            .failed_checks
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" and ");
        write!(
            f,
            "Layer height {:.2} mm is {reasons}. Try a different angle",
            self.height_mm
        )?;
        if let Some(s) = self.suggestion {
            write!(f, " (nearest valid: {:.0}° → {:.2} mm)", s.angle_degrees, s.height_mm)?;
        }
        Ok(())
    }
}

pub(crate) fn evaluate(
    input: &LayerHeightInput,
    config: &CalculatorConfig,
) -> CalcResult<LayerHeightResult> {
    // The range applies to the angle as entered, before normalization.
    let angle = input
        .angle
        .parse()
        .filter(|a| (MIN_TARGET_ANGLE_DEG..=MAX_TARGET_ANGLE_DEG).contains(a))
        .and_then(|a| round_to(a, INPUT_DECIMAL_PLACES))
        .ok_or(CalcError::AngleOutOfRange {
            min: MIN_TARGET_ANGLE_DEG,
            max: MAX_TARGET_ANGLE_DEG,
        })?;

    let nozzle = normalize(&input.nozzle_diameter, INPUT_DECIMAL_PLACES)
        .ok_or_else(|| CalcError::InvalidValues(vec![Field::NozzleDiameter]))
        .and_then(NozzleDiameter::try_from)?;

    let height = height_for_angle(angle, input.convention, nozzle.mm(), config)?;
    let failed_checks = check_height(height, nozzle.mm(), config);
    let is_valid = failed_checks.is_empty();

    let suggestion = if is_valid {
        None
    } else {
        suggest_angle(angle, input.convention, nozzle.mm(), config)
    };

    if is_valid {
        debug!(angle, nozzle = nozzle.mm(), height, "Computed layer height");
    } else {
        warn!(
            angle,
            nozzle = nozzle.mm(),
            height,
            failed = failed_checks.len(),
            suggested = ?suggestion.map(|s| s.angle_degrees),
            "Layer height fails validity checks"
        );
    }

    Ok(LayerHeightResult {
        height_mm: height,
        is_valid,
        angle_degrees: angle,
        nozzle_diameter: nozzle,
        convention: input.convention,
        failed_checks,
        suggestion,
    })
}

/// `tan(effective) × nozzle / 2`, rounded to the configured precision.
///
/// OrcaSlicer angles are used as given; other conventions are complemented.
pub(crate) fn height_for_angle(
    angle: f64,
    convention: SlicerConvention,
    nozzle: f64,
    config: &CalculatorConfig,
) -> CalcResult<f64> {
    let effective = match convention {
        SlicerConvention::Orca => angle,
        SlicerConvention::Cura => RIGHT_ANGLE_DEG - angle,
    };
    let raw = effective.to_radians().tan() * (nozzle / 2.0);
    round_to(raw, config.decimal_places).ok_or(CalcError::NonFinite("layer height"))
}

/// Runs both validity checks; both are always evaluated.
pub(crate) fn check_height(
    height: f64,
    nozzle: f64,
    config: &CalculatorConfig,
) -> Vec<LayerCheck> {
    let mut failed = Vec::new();

    let (min, max) = config.layer_bounds(nozzle);
    if height < min - EPSILON_TOLERANCE || height > max + EPSILON_TOLERANCE {
        failed.push(LayerCheck::RatioOutOfBounds { min, max });
    }

    let nearest_step = (height / config.layer_step).round() * config.layer_step;
    let distance = (height - nearest_step).abs();
    if distance > config.step_tolerance + EPSILON_TOLERANCE {
        failed.push(LayerCheck::OffStep {
            nearest_step: round_to(nearest_step, config.decimal_places).unwrap_or(nearest_step),
        });
    }

    failed
}

/// Searches `angle ∓ 1°, angle ∓ 2°, …` within the accepted range for the
/// closest angle producing a valid height. Lower angles win ties.
fn suggest_angle(
    angle: f64,
    convention: SlicerConvention,
    nozzle: f64,
    config: &CalculatorConfig,
) -> Option<AngleSuggestion> {
    let span = (MAX_TARGET_ANGLE_DEG - MIN_TARGET_ANGLE_DEG) as u32;
    let range = MIN_TARGET_ANGLE_DEG..=MAX_TARGET_ANGLE_DEG;

    (1..=span)
        .flat_map(|offset| {
            let offset = f64::from(offset);
            [angle - offset, angle + offset]
        })
        .filter(|candidate| range.contains(candidate))
        .find_map(|candidate| {
            let candidate = round_to(candidate, INPUT_DECIMAL_PLACES)?;
            let height = height_for_angle(candidate, convention, nozzle, config).ok()?;
            check_height(height, nozzle, config)
                .is_empty()
                .then_some(AngleSuggestion {
                    angle_degrees: candidate,
                    height_mm: height,
                })
        })
}

#[cfg(test)]
mod tests;
