//! # Config Crate
//!
//! Numeric limits and tunables shared by the print tuning calculators and
//! their hosts: rounding precision, the layer-to-nozzle ratio window, the
//! Z step, the accepted angle range, the flow grid shape and the supported
//! nozzle sizes.
//!
//! Hosts that need non-default behaviour build a validated
//! [`constants::CalculatorConfig`]; everything else reads the constants.
//!
//! ```rust
//! use config::constants::{CalculatorConfig, LAYER_STEP_MM, MIN_LAYER_RATIO};
//!
//! // Layer heights snap to the mechanical Z step
//! let height: f64 = 0.2;
//! let steps = (height / LAYER_STEP_MM).round();
//! assert_eq!(steps, 10.0);
//!
//! // Ratio bounds are relative to the nozzle diameter
//! let (min, _max) = CalculatorConfig::default().layer_bounds(0.4);
//! assert!(min >= 0.4 * MIN_LAYER_RATIO - 1e-12);
//! ```
//!
//! The crate has no dependencies so it stays usable from the WASM build.

pub mod constants;
