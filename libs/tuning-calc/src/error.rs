//! # Error Types
//!
//! Validation failures raised by the calculators. Every failure halts the
//! calculation before a numeric result is produced and is returned to the
//! caller as a value; none of them is fatal to the host.
//!
//! Non-fatal findings (values that are numeric but outside a recommended
//! range) are not errors. They travel with successful results as
//! [`Diagnostic`]s of [`Severity::Warning`](crate::Severity::Warning).

use thiserror::Error;

use crate::diagnostic::Diagnostic;
use crate::input::Field;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while evaluating a calculator.
///
/// ## Example
///
/// ```rust
/// use tuning_calc::{compute_overhang_angle, CalcError, SlicerConvention};
///
/// match compute_overhang_angle("abc", "0.2", SlicerConvention::Orca) {
///     Ok(result) => println!("{result}"),
///     Err(CalcError::InvalidValues(fields)) => assert_eq!(fields.len(), 1),
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// One or more required inputs could not be parsed as numbers.
    #[error("Please enter valid values for: {}", field_list(.0))]
    InvalidValues(Vec<Field>),

    /// One or more required inputs were left empty.
    ///
    /// All missing fields are accumulated before failing.
    #[error("Missing required values: {}", field_list(.0))]
    MissingValues(Vec<Field>),

    /// A value parsed but is zero or negative where a positive size is needed.
    #[error("{field} must be greater than zero (got {value})")]
    NonPositive {
        /// Offending input
        field: Field,
        /// Normalized value that was rejected
        value: f64,
    },

    /// Fewer wall measurements parsed than the calibration requires.
    #[error("Incomplete measurements: {parsed} of {expected} values are valid numbers")]
    IncompleteMeasurements {
        /// Number of measurements that parsed
        parsed: usize,
        /// Number of measurements required
        expected: usize,
    },

    /// The measurement grid was supplied with the wrong number of cells.
    #[error("Expected {expected} measurements, received {supplied}")]
    MeasurementCount {
        /// Number of cells supplied
        supplied: usize,
        /// Number of cells required
        expected: usize,
    },

    /// Target angle missing, non-numeric, or outside the accepted range.
    #[error("Please enter an angle between {min} and {max} degrees")]
    AngleOutOfRange {
        /// Smallest accepted angle
        min: f64,
        /// Largest accepted angle
        max: f64,
    },

    /// Nozzle diameter is not one of the supported sizes.
    #[error("Unsupported nozzle diameter: {0} mm")]
    UnsupportedNozzle(f64),

    /// Slicer convention selector not recognised.
    #[error("Unknown slicer convention '{0}' (expected 'orca' or 'cura')")]
    UnknownConvention(String),

    /// Volumetric mode selector not recognised.
    #[error("Unknown calculation mode '{0}' (expected 'flow' or 'speed')")]
    UnknownMode(String),

    /// The formula produced an infinite or NaN value.
    #[error("Calculated {0} is not a finite number")]
    NonFinite(&'static str),
}

impl CalcError {
    /// Expands the error into host-facing diagnostics.
    ///
    /// Accumulated field errors produce one diagnostic per field so a form
    /// layer can flag each input separately.
    ///
    /// # Examples
    /// ```
    /// use tuning_calc::{CalcError, Field, Severity};
    ///
    /// let err = CalcError::MissingValues(vec![Field::LayerHeight, Field::NozzleDiameter]);
    /// let diagnostics = err.diagnostics();
    /// assert_eq!(diagnostics.len(), 2);
    /// assert!(diagnostics.iter().all(|d| d.severity == Severity::Error));
    /// ```
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            CalcError::InvalidValues(fields) => fields
                .iter()
                .map(|&field| {
                    Diagnostic::error(format!("Please enter a valid {field}")).with_field(field)
                })
                .collect(),
            CalcError::MissingValues(fields) => fields
                .iter()
                .map(|&field| {
                    Diagnostic::error(format!("Please enter the {field}")).with_field(field)
                })
                .collect(),
            CalcError::NonPositive { field, .. } => {
                vec![Diagnostic::error(self.to_string()).with_field(*field)]
            }
            CalcError::IncompleteMeasurements { .. } | CalcError::MeasurementCount { .. } => {
                vec![Diagnostic::error(self.to_string())
                    .with_field(Field::Measurement)
                    .with_hint("Fill in every cell of the measurement grid".to_string())]
            }
            CalcError::AngleOutOfRange { .. } => {
                vec![Diagnostic::error(self.to_string()).with_field(Field::TargetAngle)]
            }
            CalcError::UnsupportedNozzle(_) => {
                vec![Diagnostic::error(self.to_string()).with_field(Field::NozzleDiameter)]
            }
            CalcError::UnknownConvention(_)
            | CalcError::UnknownMode(_)
            | CalcError::NonFinite(_) => vec![Diagnostic::error(self.to_string())],
        }
    }
}

fn field_list(fields: &[Field]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for calculator operations.
pub type CalcResult<T> = Result<T, CalcError>;

// =============================================================================
// TESTS
// =============================================================================
