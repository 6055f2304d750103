//! Core data layer for the Uptight spoke tension meter
//!
//! Holds spoke profiles (gauges plus the dial calibration) and turns dial
//! indicator readings into spoke tension. Built to run on the meter itself.
//!
//! Key constraints:
//! - `no_std` without the `std` feature
//! - No heap allocation
//! - Gauges never pass through binary floating point
//!
//! ## Features
//!
//! - `std` (default): enables `serde` and `log`, and adds the std `Error`
//!   impl for errors
//! - `embedded`: enables `defmt` and `fixed`
//! - `fixed`: enables `FixedCalibration`, the `I16F16` tension converter
//!
//! Tests for the fixed-point converter only build with the feature on:
//!
//! ```bash
//! cargo test -p uptight-core --features fixed
//! ```
//!
//! ```no_run
//! use uptight_core::{profiles, TensionModel};
//!
//! let calibration = profiles::DT_ALPINE_III_234X18X20.calibration;
//!
//! // Dial shows 7.50 mm
//! match calibration.tension_kgf(750) {
//!     Ok(kgf) => {}, // Show it
//!     Err(e) => {},  // Reading makes no sense for this spoke
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod constants;
pub mod errors;
pub mod fit;
pub mod gauge;
pub mod profile;
pub mod profiles;
pub mod tension;

// Public API
pub use errors::{ProfileError, ProfileResult};
pub use gauge::Gauge;
pub use profile::{Calibration, SpokeProfile};
pub use tension::TensionModel;

#[cfg(feature = "fixed")]
pub use tension::FixedCalibration;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
