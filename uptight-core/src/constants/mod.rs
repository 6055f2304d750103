//! Constants for Uptight Core
//!
//! Numeric limits and conversion factors used by the profile, tension and
//! fitting modules. Each value names its unit.
//!
//! ## Organization
//!
//! - **Gauges**: Spoke diameter limits and the implied threaded end
//! - **Dial**: Dial indicator range and calibration bounds
//! - **Units**: Force conversions

/// Spoke gauge limits and defaults.
pub mod gauges;

/// Dial indicator range and calibration limits.
pub mod dial;

/// Unit conversion factors.
pub mod units;

pub use gauges::{GAUGE_MAX_DECIMALS, GAUGE_MAX_UM, GAUGE_MIN_UM, THREADED_END_GAUGE};
pub use dial::{DIAL_READING_MAX, DIAL_READING_MIN, GRADE_MAX};
pub use units::NEWTONS_PER_KGF;
