//! Spoke profile record
//!
//! A profile is everything the meter needs to know about one spoke model:
//! the two gauges shown to the user for reference and the calibration that
//! turns dial readings into tension. Profiles are immutable values, usually
//! `const` items in [`crate::profiles`] or entries loaded into a catalog.

use core::fmt::Write;

use crate::{
    constants::{
        dial::{DIAL_READING_MAX, DIAL_READING_MIN, GRADE_MAX},
        gauges::THREADED_END_GAUGE,
    },
    errors::{ProfileError, ProfileResult},
    gauge::Gauge,
};

/// "2.34 x 1.8 x 2.0"
pub type DimensionText = heapless::String<40>;

/// "234x18x20"
pub type DimensionKey = heapless::String<36>;

/// Dial calibration from graph fitting
///
/// Fitting dial reading against tension gives a line; `y_offset` is its
/// intercept in dial counts and `grade` the reciprocal of its slope
/// (kgf per count).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Calibration {
    /// Dial reading at zero tension (0.01 mm counts)
    pub y_offset: i32,
    /// Reciprocal of the fitted slope (kgf per count)
    pub grade: f32,
}

impl Calibration {
    /// Create a calibration, rejecting unusable values
    pub fn new(y_offset: i32, grade: f32) -> ProfileResult<Self> {
        let calibration = Self { y_offset, grade };
        calibration.validate()?;
        Ok(calibration)
    }

    /// Check the grade and offset are usable
    pub fn validate(&self) -> ProfileResult<()> {
        if !self.grade.is_finite() {
            return Err(ProfileError::InvalidValue);
        }
        if self.grade <= 0.0 {
            return Err(ProfileError::InvalidGrade {
                grade: self.grade,
                reason: "grade must be positive",
            });
        }
        if self.grade > GRADE_MAX {
            return Err(ProfileError::InvalidGrade {
                grade: self.grade,
                reason: "grade too large, percentage notation is not supported",
            });
        }
        if !(DIAL_READING_MIN..=DIAL_READING_MAX).contains(&self.y_offset) {
            return Err(ProfileError::OffsetOutOfRange {
                y_offset: self.y_offset,
                min: DIAL_READING_MIN,
                max: DIAL_READING_MAX,
            });
        }
        Ok(())
    }
}

/// Gauges and calibration for one spoke model
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpokeProfile {
    /// Diameter at the bent (head) end
    pub elbow_gauge: Gauge,
    /// Diameter of the butted middle section
    pub trunk_gauge: Gauge,
    /// Dial calibration for this spoke
    pub calibration: Calibration,
}

impl SpokeProfile {
    /// Assemble a profile. No validation, so it can build `const` tables.
    pub const fn new(elbow_gauge: Gauge, trunk_gauge: Gauge, calibration: Calibration) -> Self {
        Self {
            elbow_gauge,
            trunk_gauge,
            calibration,
        }
    }

    /// Threaded end gauge, the same for every profile
    pub const fn threaded_gauge(&self) -> Gauge {
        THREADED_END_GAUGE
    }

    /// Human readable dimension, e.g. "2.34 x 1.8 x 2.0"
    pub fn dimension(&self) -> DimensionText {
        let mut text = DimensionText::new();
        // Three gauge texts of at most 11 characters plus separators fit in
        // 40 once each gauge passes check_range
        let _ = write!(
            text,
            "{} x {} x {}",
            self.elbow_gauge,
            self.trunk_gauge,
            self.threaded_gauge()
        );
        text
    }

    /// Compact dimension key, e.g. "234x18x20"
    pub fn dimension_key(&self) -> DimensionKey {
        let mut key = DimensionKey::new();
        // Three u32 digit strings and two separators never exceed 32
        let _ = write!(
            key,
            "{}x{}x{}",
            self.elbow_gauge.digits(),
            self.trunk_gauge.digits(),
            self.threaded_gauge().digits()
        );
        key
    }

    /// Check gauges and calibration
    pub fn validate(&self) -> ProfileResult<()> {
        self.elbow_gauge.check_range()?;
        self.trunk_gauge.check_range()?;

        if self.trunk_gauge.micrometres() > self.elbow_gauge.micrometres() {
            return Err(ProfileError::InvalidProfile {
                reason: "trunk gauge thicker than elbow gauge",
            });
        }

        self.calibration.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpine() -> SpokeProfile {
        SpokeProfile::new(
            Gauge::from_digits(234, 2),
            Gauge::from_digits(18, 1),
            Calibration { y_offset: 649, grade: 0.848 },
        )
    }

    #[test]
    fn dimension_strings() {
        let profile = alpine();
        assert_eq!(profile.dimension(), "2.34 x 1.8 x 2.0");
        assert_eq!(profile.dimension_key(), "234x18x20");
    }

    #[test]
    fn threaded_end_is_implied() {
        assert_eq!(alpine().threaded_gauge().to_text(), "2.0");
    }

    #[test]
    fn valid_profile() {
        assert!(alpine().validate().is_ok());
    }

    #[test]
    fn straight_gauge_is_valid() {
        let mut profile = alpine();
        profile.elbow_gauge = Gauge::from_digits(20, 1);
        profile.trunk_gauge = Gauge::from_digits(20, 1);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn trunk_thicker_than_elbow() {
        let mut profile = alpine();
        profile.trunk_gauge = Gauge::from_digits(26, 1);
        assert!(matches!(profile.validate(), Err(ProfileError::InvalidProfile { .. })));
    }

    #[test]
    fn percentage_grade_rejected() {
        // The old "118 meaning 1.18" notation
        let result = Calibration::new(649, 118.0);
        assert!(matches!(result, Err(ProfileError::InvalidGrade { .. })));
    }

    #[test]
    fn grade_must_be_positive_and_finite() {
        assert!(Calibration::new(649, 0.0).is_err());
        assert!(Calibration::new(649, -0.5).is_err());
        assert_eq!(Calibration::new(649, f32::NAN), Err(ProfileError::InvalidValue));
    }

    #[test]
    fn offset_must_fit_dial() {
        assert!(matches!(
            Calibration::new(-1, 0.848),
            Err(ProfileError::OffsetOutOfRange { y_offset: -1, .. })
        ));
        assert!(Calibration::new(3000, 0.848).is_err());
    }
}
