//! # Numeric Normalizer
//!
//! Rounds raw inputs to a fixed decimal precision before any arithmetic
//! consumes them.
//!
//! Rounding is round-half-away-from-zero applied to the *decimal* text of
//! the value rather than to its binary approximation. The value is shifted by
//! `decimal_places` through its exponent (`"1.005e2"` parses as exactly
//! `100.5`), rounded, and shifted back. A plain `(v * 100.0).round() / 100.0`
//! would turn `1.005` into `1.0` because `1.005 * 100.0 == 100.49999999999999`.

use config::constants::DEFAULT_DECIMAL_PLACES;

use crate::error::{CalcError, CalcResult};
use crate::input::{Field, NumericInput};

/// Parses `value` and rounds it to `decimal_places` fractional digits.
///
/// Returns `None` when the value does not parse as a finite number. Never
/// panics.
///
/// # Examples
/// ```
/// use tuning_calc::normalize;
///
/// assert_eq!(normalize("1.005", 2), Some(1.01));
/// assert_eq!(normalize(0.1 + 0.2, 2), Some(0.3));
/// assert_eq!(normalize("-2.5", 0), Some(-3.0));
/// assert_eq!(normalize("n/a", 2), None);
/// ```
pub fn normalize(value: impl Into<NumericInput>, decimal_places: u32) -> Option<f64> {
    let raw = value.into().parse()?;
    round_to(raw, decimal_places)
}

/// [`normalize`] at the default precision of two places.
pub fn normalize_default(value: impl Into<NumericInput>) -> Option<f64> {
    normalize(value, DEFAULT_DECIMAL_PLACES)
}

/// Rounds an already-parsed value. `None` for non-finite input.
pub(crate) fn round_to(value: f64, decimal_places: u32) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }

    let shifted: f64 = format!("{value}e{decimal_places}").parse().ok()?;
    if !shifted.is_finite() {
        // Too large to carry any fractional digits.
        return Some(value);
    }

    let rounded = shifted.round();
    let result: f64 = format!("{rounded}e-{decimal_places}").parse().ok()?;

    // Collapse -0.0 so that results print and compare as plain zero.
    Some(if result == 0.0 { 0.0 } else { result })
}

/// Normalizes a fixed set of named inputs, collecting every field that fails.
pub(crate) fn normalize_fields<const N: usize>(
    fields: [(Field, &NumericInput); N],
    decimal_places: u32,
) -> Result<[f64; N], Vec<Field>> {
    let mut values = [0.0; N];
    let mut invalid = Vec::new();

    for (slot, (field, input)) in values.iter_mut().zip(fields) {
        match normalize(input, decimal_places) {
            Some(value) => *slot = value,
            None => invalid.push(field),
        }
    }

    if invalid.is_empty() {
        Ok(values)
    } else {
        Err(invalid)
    }
}

/// Rejects zero and negative sizes.
pub(crate) fn require_positive(field: Field, value: f64) -> CalcResult<f64> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(CalcError::NonPositive { field, value })
    }
}

#[cfg(test)]
mod tests;
