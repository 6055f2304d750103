//! Error Types for Profiles and Tension Conversion
//!
//! Errors are small and `Copy` so they can be returned from the measurement
//! loop on the meter without allocation. Messages are `&'static str`; the
//! numeric payload carries whatever is needed to show the user what went
//! wrong.
//!
//! ## Error Categories
//!
//! ### Profile data
//! - `InvalidGauge`: Gauge text could not be parsed
//! - `GaugeOutOfRange`: Gauge parsed but is not a plausible spoke diameter
//! - `InvalidProfile`: Gauges contradict each other
//! - `InvalidGrade` / `OffsetOutOfRange`: Calibration values unusable
//!
//! ### Measurement
//! - `ReadingOutOfRange`: Dial reading outside the indicator's travel
//! - `ReadingBelowOffset`: Dial reading under the calibration offset
//! - `TensionOutOfRange`: Requested tension cannot be expressed
//! - `InvalidValue`: NaN or infinity
//!
//! ### Calibration fitting
//! - `InsufficientData`: Too few calibration points
//! - `DegenerateFit`: Points do not define a usable line
//!
//! ```rust
//! use uptight_core::{profiles, ProfileError, TensionModel};
//!
//! let calibration = profiles::DT_ALPINE_III_234X18X20.calibration;
//! match calibration.tension_kgf(500) {
//!     Ok(_) => {}
//!     Err(ProfileError::ReadingBelowOffset { .. }) => {
//!         // Meter not seated on the spoke
//!     }
//!     Err(_) => {}
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for profile and tension operations
pub type ProfileResult<T> = Result<T, ProfileError>;

/// Profile and conversion errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ProfileError {
    /// Gauge text is not a decimal millimetre value
    #[error("Invalid gauge: {reason}")]
    InvalidGauge {
        /// What was wrong with the text
        reason: &'static str,
    },

    /// Gauge outside plausible spoke diameters
    #[error("Gauge {value_um}um outside range [{min_um}, {max_um}]um")]
    GaugeOutOfRange {
        /// Parsed gauge in micrometres
        value_um: u32,
        /// Thinnest accepted gauge
        min_um: u32,
        /// Thickest accepted gauge
        max_um: u32,
    },

    /// Profile fields are individually valid but inconsistent
    #[error("Invalid profile: {reason}")]
    InvalidProfile {
        /// Which relationship failed
        reason: &'static str,
    },

    /// Calibration grade unusable
    #[error("Invalid grade {grade}: {reason}")]
    InvalidGrade {
        /// The rejected grade
        grade: f32,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Calibration offset outside the dial's travel
    #[error("Offset {y_offset} outside dial range [{min}, {max}]")]
    OffsetOutOfRange {
        /// The rejected offset
        y_offset: i32,
        /// Lowest dial reading
        min: i32,
        /// Highest dial reading
        max: i32,
    },

    /// Dial reading outside the indicator's travel
    #[error("Reading {reading} outside dial range [{min}, {max}]")]
    ReadingOutOfRange {
        /// The rejected reading
        reading: i32,
        /// Lowest dial reading
        min: i32,
        /// Highest dial reading
        max: i32,
    },

    /// Reading is below the calibration offset (no tension on the spoke)
    #[error("Reading {reading} below calibration offset {y_offset}")]
    ReadingBelowOffset {
        /// The dial reading
        reading: i32,
        /// Calibration offset of the active profile
        y_offset: i32,
    },

    /// Tension cannot be mapped to a dial reading
    #[error("Tension {kgf}kgf outside range [0, {max_kgf}]kgf")]
    TensionOutOfRange {
        /// Requested tension
        kgf: f32,
        /// Largest tension the dial can show for this calibration
        max_kgf: f32,
    },

    /// Value makes no physical sense (NaN, infinity)
    #[error("Invalid value: not a valid number")]
    InvalidValue,

    /// Not enough calibration points
    #[error("Insufficient data: need {required}, have {available}")]
    InsufficientData {
        /// Minimum number of points
        required: usize,
        /// Points supplied
        available: usize,
    },

    /// Calibration points do not define a usable line
    #[error("Degenerate fit: {reason}")]
    DegenerateFit {
        /// Why the fit failed
        reason: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ProfileError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidGauge { reason } =>
                defmt::write!(fmt, "Invalid gauge: {}", reason),
            Self::GaugeOutOfRange { value_um, min_um, max_um } =>
                defmt::write!(fmt, "Gauge {}um outside [{}, {}]", value_um, min_um, max_um),
            Self::InvalidProfile { reason } =>
                defmt::write!(fmt, "Invalid profile: {}", reason),
            Self::InvalidGrade { grade, reason } =>
                defmt::write!(fmt, "Invalid grade {}: {}", grade, reason),
            Self::OffsetOutOfRange { y_offset, min, max } =>
                defmt::write!(fmt, "Offset {} outside [{}, {}]", y_offset, min, max),
            Self::ReadingOutOfRange { reading, min, max } =>
                defmt::write!(fmt, "Reading {} outside [{}, {}]", reading, min, max),
            Self::ReadingBelowOffset { reading, y_offset } =>
                defmt::write!(fmt, "Reading {} below offset {}", reading, y_offset),
            Self::TensionOutOfRange { kgf, max_kgf } =>
                defmt::write!(fmt, "Tension {} outside [0, {}]", kgf, max_kgf),
            Self::InvalidValue =>
                defmt::write!(fmt, "Invalid value"),
            Self::InsufficientData { required, available } =>
                defmt::write!(fmt, "Need {} points, have {}", required, available),
            Self::DegenerateFit { reason } =>
                defmt::write!(fmt, "Degenerate fit: {}", reason),
        }
    }
}
