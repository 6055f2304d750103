//! Dial Indicator and Calibration Limits
//!
//! Readings come from a dial indicator with 0.01 mm resolution, so one
//! count is one hundredth of a millimetre.

/// Lowest reading the dial can report (counts).
pub const DIAL_READING_MIN: i32 = 0;

/// Highest reading the dial can report (counts).
///
/// One inch of plunger travel at 0.01 mm per count.
pub const DIAL_READING_MAX: i32 = 2_540;

/// Largest accepted calibration grade (kgf per count).
///
/// Real grades sit around 1. A grade of 100 or more is the old percentage
/// notation (118 for 1.18) and is rejected.
pub const GRADE_MAX: f32 = 10.0;

/// Minimum number of calibration points for a line fit.
pub const FIT_MIN_POINTS: usize = 2;
