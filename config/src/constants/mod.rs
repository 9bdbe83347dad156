//! Centralized configuration values shared across the print tuning calculators.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Default number of fractional digits results are rounded to.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_DECIMAL_PLACES;
/// assert_eq!(DEFAULT_DECIMAL_PLACES, 2);
/// ```
pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

/// Fractional digits raw inputs are normalized to before any arithmetic.
///
/// Fixed regardless of the configured output precision, so a coarse output
/// setting never changes the values a user entered.
///
/// # Examples
/// ```
/// use config::constants::INPUT_DECIMAL_PLACES;
/// // 0.25 mm nozzles must survive normalization intact.
/// assert!(INPUT_DECIMAL_PLACES >= 2);
/// ```
pub const INPUT_DECIMAL_PLACES: u32 = 2;

/// Upper bound accepted for a configured decimal precision.
///
/// `f64` carries roughly 15-17 significant digits, so anything beyond this
/// only reintroduces representation noise.
pub const MAX_DECIMAL_PLACES: u32 = 10;

/// Numerical tolerance for comparing already-rounded millimetre values.
///
/// # Examples
/// ```
/// use config::constants::EPSILON_TOLERANCE;
/// assert!(EPSILON_TOLERANCE < 1.0e-6);
/// ```
pub const EPSILON_TOLERANCE: f64 = 1.0e-9;

// =============================================================================
// LAYER HEIGHT CONSTANTS
// =============================================================================

/// Smallest practical layer height as a fraction of the nozzle diameter.
///
/// # Examples
/// ```
/// use config::constants::MIN_LAYER_RATIO;
/// let nozzle = 0.4;
/// assert!((nozzle * MIN_LAYER_RATIO - 0.08).abs() < 1e-12);
/// ```
pub const MIN_LAYER_RATIO: f64 = 0.2;

/// Largest practical layer height as a fraction of the nozzle diameter.
///
/// # Examples
/// ```
/// use config::constants::{MAX_LAYER_RATIO, MIN_LAYER_RATIO};
/// assert!(MAX_LAYER_RATIO > MIN_LAYER_RATIO);
/// ```
pub const MAX_LAYER_RATIO: f64 = 0.8;

/// Mechanical Z step most printers and slicers resolve layer heights to (mm).
///
/// # Examples
/// ```
/// use config::constants::LAYER_STEP_MM;
/// let layers = (0.2_f64 / LAYER_STEP_MM).round();
/// assert_eq!(layers, 10.0);
/// ```
pub const LAYER_STEP_MM: f64 = 0.02;

/// Maximum distance (mm) a layer height may sit from the nearest step.
pub const LAYER_STEP_TOLERANCE_MM: f64 = 0.001;

// =============================================================================
// ANGLE CONSTANTS
// =============================================================================

/// Smallest target wall angle accepted by the layer height calculator (degrees).
pub const MIN_TARGET_ANGLE_DEG: f64 = 1.0;

/// Largest target wall angle accepted by the layer height calculator (degrees).
///
/// # Examples
/// ```
/// use config::constants::{MAX_TARGET_ANGLE_DEG, MIN_TARGET_ANGLE_DEG};
/// assert!((MIN_TARGET_ANGLE_DEG..=MAX_TARGET_ANGLE_DEG).contains(&45.0));
/// assert!(!(MIN_TARGET_ANGLE_DEG..=MAX_TARGET_ANGLE_DEG).contains(&90.0));
/// ```
pub const MAX_TARGET_ANGLE_DEG: f64 = 89.0;

/// Right angle in degrees, used for complementary slicer conventions.
pub const RIGHT_ANGLE_DEG: f64 = 90.0;

// =============================================================================
// FLOW CALIBRATION CONSTANTS
// =============================================================================

/// Rows in the flow calibration measurement grid.
pub const FLOW_GRID_ROWS: usize = 4;

/// Columns in the flow calibration measurement grid.
pub const FLOW_GRID_COLUMNS: usize = 5;

/// Number of wall-thickness measurements a flow calibration requires.
///
/// # Examples
/// ```
/// use config::constants::FLOW_MEASUREMENT_COUNT;
/// assert_eq!(FLOW_MEASUREMENT_COUNT, 20);
/// ```
pub const FLOW_MEASUREMENT_COUNT: usize = FLOW_GRID_ROWS * FLOW_GRID_COLUMNS;

// =============================================================================
// NOZZLE CONSTANTS
// =============================================================================

/// Nozzle diameters (mm) offered by the layer height calculator.
///
/// # Examples
/// ```
/// use config::constants::SUPPORTED_NOZZLE_DIAMETERS;
/// assert!(SUPPORTED_NOZZLE_DIAMETERS.contains(&0.4));
/// assert!(SUPPORTED_NOZZLE_DIAMETERS.windows(2).all(|w| w[0] < w[1]));
/// ```
pub const SUPPORTED_NOZZLE_DIAMETERS: [f64; 9] = [0.2, 0.25, 0.3, 0.4, 0.5, 0.6, 0.8, 1.0, 1.2];

// =============================================================================
// CONFIGURATION SNAPSHOT
// =============================================================================

/// Immutable snapshot of the tunable calculator settings.
///
/// # Examples
/// ```
/// use config::constants::CalculatorConfig;
/// let config = CalculatorConfig::default();
/// assert_eq!(config.decimal_places, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculatorConfig {
    /// Fractional digits results are rounded to.
    pub decimal_places: u32,
    /// Lower layer-height bound as a fraction of nozzle diameter.
    pub min_layer_ratio: f64,
    /// Upper layer-height bound as a fraction of nozzle diameter.
    pub max_layer_ratio: f64,
    /// Z step layer heights must align to (mm).
    pub layer_step: f64,
    /// Allowed distance from the nearest step (mm).
    pub step_tolerance: f64,
}

impl CalculatorConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// values. The step tolerance defaults to [`LAYER_STEP_TOLERANCE_MM`].
    ///
    /// # Examples
    /// ```
    /// use config::constants::CalculatorConfig;
    /// let cfg = CalculatorConfig::new(3, 0.25, 0.75, 0.04).expect("valid config");
    /// assert_eq!(cfg.decimal_places, 3);
    /// assert!(CalculatorConfig::new(2, 0.8, 0.2, 0.02).is_err());
    /// ```
    pub fn new(
        decimal_places: u32,
        min_layer_ratio: f64,
        max_layer_ratio: f64,
        layer_step: f64,
    ) -> Result<Self, ConfigError> {
        if decimal_places > MAX_DECIMAL_PLACES {
            return Err(ConfigError::InvalidPrecision(decimal_places));
        }
        if !(min_layer_ratio > 0.0 && min_layer_ratio < max_layer_ratio && max_layer_ratio <= 1.0)
        {
            return Err(ConfigError::InvalidRatioBounds {
                min: min_layer_ratio,
                max: max_layer_ratio,
            });
        }
        if !(layer_step > 0.0 && layer_step.is_finite()) {
            return Err(ConfigError::InvalidLayerStep(layer_step));
        }
        Ok(Self {
            decimal_places,
            min_layer_ratio,
            max_layer_ratio,
            layer_step,
            step_tolerance: LAYER_STEP_TOLERANCE_MM,
        })
    }

    /// Returns the `[min, max]` layer height range for a nozzle diameter.
    ///
    /// # Examples
    /// ```
    /// use config::constants::CalculatorConfig;
    /// let (min, max) = CalculatorConfig::default().layer_bounds(0.4);
    /// assert!((min - 0.08).abs() < 1e-12);
    /// assert!((max - 0.32).abs() < 1e-12);
    /// ```
    pub fn layer_bounds(&self, nozzle_diameter: f64) -> (f64, f64) {
        (
            nozzle_diameter * self.min_layer_ratio,
            nozzle_diameter * self.max_layer_ratio,
        )
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            decimal_places: DEFAULT_DECIMAL_PLACES,
            min_layer_ratio: MIN_LAYER_RATIO,
            max_layer_ratio: MAX_LAYER_RATIO,
            layer_step: LAYER_STEP_MM,
            step_tolerance: LAYER_STEP_TOLERANCE_MM,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the precision exceeds [`MAX_DECIMAL_PLACES`].
    InvalidPrecision(u32),
    /// Raised when ratio bounds are non-positive, inverted, or above 1.
    InvalidRatioBounds { min: f64, max: f64 },
    /// Raised when the layer step is zero, negative, or not finite.
    InvalidLayerStep(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPrecision(value) => {
                write!(f, "decimal_places must be <= {MAX_DECIMAL_PLACES}: {value}")
            }
            ConfigError::InvalidRatioBounds { min, max } => {
                write!(f, "layer ratio bounds must satisfy 0 < min < max <= 1: [{min}, {max}]")
            }
            ConfigError::InvalidLayerStep(value) => {
                write!(f, "layer_step must be positive: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two f64 values are approximately equal within [`EPSILON_TOLERANCE`].
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(0.1 + 0.2, 0.3));
/// assert!(!approx_equal(0.2, 0.22));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON_TOLERANCE
}

/// Looks up the supported nozzle diameter matching `value`, if any.
///
/// # Example
///
/// ```rust
/// use config::constants::supported_nozzle;
///
/// assert_eq!(supported_nozzle(0.4), Some(0.4));
/// assert_eq!(supported_nozzle(0.45), None);
/// ```
pub fn supported_nozzle(value: f64) -> Option<f64> {
    SUPPORTED_NOZZLE_DIAMETERS
        .iter()
        .copied()
        .find(|&diameter| approx_equal(diameter, value))
}

#[cfg(test)]
mod tests;
