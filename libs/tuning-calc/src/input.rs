//! # Input Model
//!
//! Raw values as they arrive from a form, plus the enumerated selectors the
//! calculators accept.

use std::fmt;
use std::str::FromStr;

use config::constants::{supported_nozzle, SUPPORTED_NOZZLE_DIAMETERS};
use serde::{Deserialize, Serialize};

use crate::error::CalcError;

/// A raw numeric-like value supplied by the host.
///
/// Form fields usually arrive as text; programmatic callers pass numbers.
/// Deserializes from a JSON number, a JSON string, or `null`.
///
/// # Examples
/// ```
/// use tuning_calc::NumericInput;
///
/// assert_eq!(NumericInput::from(" 0.4 ").parse(), Some(0.4));
/// assert_eq!(NumericInput::from(0.2).parse(), Some(0.2));
/// assert_eq!(NumericInput::from("abc").parse(), None);
/// assert!(NumericInput::from("").is_blank());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl NumericInput {
    /// Parses the value as a finite `f64`.
    ///
    /// Text is trimmed first. Blank text, non-numeric text and non-finite
    /// values (`inf`, `NaN`) all yield `None`.
    pub fn parse(&self) -> Option<f64> {
        match self {
            NumericInput::Number(value) => Some(*value).filter(|v| v.is_finite()),
            NumericInput::Text(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite()),
            NumericInput::Missing => None,
        }
    }

    /// Returns true when no value was supplied at all.
    pub fn is_blank(&self) -> bool {
        match self {
            NumericInput::Text(text) => text.trim().is_empty(),
            NumericInput::Missing => true,
            NumericInput::Number(_) => false,
        }
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(value: String) -> Self {
        NumericInput::Text(value)
    }
}

impl From<&String> for NumericInput {
    fn from(value: &String) -> Self {
        NumericInput::Text(value.clone())
    }
}

impl From<&NumericInput> for NumericInput {
    fn from(value: &NumericInput) -> Self {
        value.clone()
    }
}

impl<T: Into<NumericInput>> From<Option<T>> for NumericInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(NumericInput::Missing, Into::into)
    }
}

/// Named inputs, used to point diagnostics at form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    NozzleDiameter,
    LayerHeight,
    ExtrusionWidth,
    FlowPercent,
    Measurement,
    TargetAngle,
    PrintSpeed,
    VolumetricFlow,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::NozzleDiameter => "nozzle diameter",
            Field::LayerHeight => "layer height",
            Field::ExtrusionWidth => "extrusion width",
            Field::FlowPercent => "flow percentage",
            Field::Measurement => "wall measurement",
            Field::TargetAngle => "target angle",
            Field::PrintSpeed => "print speed",
            Field::VolumetricFlow => "volumetric flow",
        };
        f.write_str(name)
    }
}

/// Angle-measurement convention of a slicer family.
///
/// OrcaSlicer measures overhangs from the horizontal; Cura (and the other
/// slicers grouped with it) measure from the vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlicerConvention {
    #[default]
    #[serde(alias = "orcaslicer")]
    Orca,
    #[serde(alias = "other")]
    Cura,
}

impl SlicerConvention {
    /// Human-readable slicer name used in result messages.
    pub fn label(self) -> &'static str {
        match self {
            SlicerConvention::Orca => "OrcaSlicer",
            SlicerConvention::Cura => "Cura",
        }
    }
}

impl FromStr for SlicerConvention {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orca" | "orcaslicer" => Ok(SlicerConvention::Orca),
            "cura" | "other" => Ok(SlicerConvention::Cura),
            _ => Err(CalcError::UnknownConvention(s.to_string())),
        }
    }
}

impl fmt::Display for SlicerConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A nozzle diameter drawn from the supported set.
///
/// # Examples
/// ```
/// use tuning_calc::NozzleDiameter;
///
/// let nozzle = NozzleDiameter::try_from(0.4).unwrap();
/// assert_eq!(nozzle.mm(), 0.4);
/// assert!(NozzleDiameter::try_from(0.45).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct NozzleDiameter(f64);

impl NozzleDiameter {
    /// Diameter in millimetres.
    pub fn mm(self) -> f64 {
        self.0
    }

    /// Every supported nozzle, smallest first.
    pub fn all() -> impl Iterator<Item = NozzleDiameter> {
        SUPPORTED_NOZZLE_DIAMETERS.iter().copied().map(NozzleDiameter)
    }
}

impl TryFrom<f64> for NozzleDiameter {
    type Error = CalcError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        supported_nozzle(value)
            .map(NozzleDiameter)
            .ok_or(CalcError::UnsupportedNozzle(value))
    }
}
