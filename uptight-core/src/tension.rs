//! Dial reading to spoke tension conversion
//!
//! ## Calibration line
//!
//! Calibrating a spoke model means hanging known tensions on a sample spoke
//! and noting the dial reading for each. Plotting reading (y) against
//! tension (x) gives a straight line:
//!
//! ```text
//! reading = slope × kgf + y_offset
//! grade   = 1 / slope
//!
//! kgf     = (reading - y_offset) × grade
//! ```
//!
//! For the DT Alpine III the fit gave a slope of 1.18 counts per kgf, so
//! `grade = 0.848`, and an intercept of 649 counts (6.49 mm).
//!
//! ## Fixed point
//!
//! With the `fixed` feature, [`FixedCalibration`] does the same conversion
//! in `I16F16` for microcontrollers without an FPU.

use crate::{
    constants::{
        dial::{DIAL_READING_MAX, DIAL_READING_MIN},
        units::NEWTONS_PER_KGF,
    },
    errors::{ProfileError, ProfileResult},
    profile::{Calibration, SpokeProfile},
};

/// Convert kilogram-force to newtons
pub fn kgf_to_newtons(kgf: f32) -> f32 {
    kgf * NEWTONS_PER_KGF
}

/// Convert newtons to kilogram-force
pub fn newtons_to_kgf(newtons: f32) -> f32 {
    newtons / NEWTONS_PER_KGF
}

/// Check a dial reading lies within the indicator's travel
pub fn check_reading(reading: i32) -> ProfileResult<()> {
    if !(DIAL_READING_MIN..=DIAL_READING_MAX).contains(&reading) {
        return Err(ProfileError::ReadingOutOfRange {
            reading,
            min: DIAL_READING_MIN,
            max: DIAL_READING_MAX,
        });
    }
    Ok(())
}

/// Anything that maps dial readings to tension and back
pub trait TensionModel {
    /// Tension in kgf for a dial reading (0.01 mm counts)
    fn tension_kgf(&self, reading: i32) -> ProfileResult<f32>;

    /// Dial reading at which a spoke carries `kgf`
    fn reading_for_tension(&self, kgf: f32) -> ProfileResult<i32>;

    /// Largest tension the dial can show
    fn max_tension_kgf(&self) -> f32;

    /// Tension in newtons for a dial reading
    fn tension_newtons(&self, reading: i32) -> ProfileResult<f32> {
        self.tension_kgf(reading).map(kgf_to_newtons)
    }
}

impl TensionModel for Calibration {
    fn tension_kgf(&self, reading: i32) -> ProfileResult<f32> {
        check_reading(reading)?;
        self.validate()?;

        if reading < self.y_offset {
            return Err(ProfileError::ReadingBelowOffset {
                reading,
                y_offset: self.y_offset,
            });
        }

        let counts = reading
            .checked_sub(self.y_offset)
            .ok_or(ProfileError::InvalidValue)?;
        let kgf = counts as f32 * self.grade;
        if !kgf.is_finite() {
            return Err(ProfileError::InvalidValue);
        }

        log_debug!("reading {} -> {} kgf", reading, kgf);
        Ok(kgf)
    }

    fn reading_for_tension(&self, kgf: f32) -> ProfileResult<i32> {
        if !kgf.is_finite() {
            return Err(ProfileError::InvalidValue);
        }
        self.validate()?;

        let max_kgf = self.max_tension_kgf();
        if kgf < 0.0 || kgf > max_kgf {
            return Err(ProfileError::TensionOutOfRange { kgf, max_kgf });
        }

        let counts = libm::roundf(kgf / self.grade) as i32;
        let reading = self
            .y_offset
            .checked_add(counts)
            .ok_or(ProfileError::InvalidValue)?;
        Ok(reading.min(DIAL_READING_MAX))
    }

    fn max_tension_kgf(&self) -> f32 {
        // Offsets outside the dial are clamped so unvalidated values
        // cannot overflow
        let offset = self.y_offset.clamp(DIAL_READING_MIN, DIAL_READING_MAX);
        (DIAL_READING_MAX - offset) as f32 * self.grade
    }
}

impl TensionModel for SpokeProfile {
    fn tension_kgf(&self, reading: i32) -> ProfileResult<f32> {
        self.calibration.tension_kgf(reading)
    }

    fn reading_for_tension(&self, kgf: f32) -> ProfileResult<i32> {
        self.calibration.reading_for_tension(kgf)
    }

    fn max_tension_kgf(&self) -> f32 {
        self.calibration.max_tension_kgf()
    }
}

#[cfg(feature = "fixed")]
pub use fixed_point::FixedCalibration;

#[cfg(feature = "fixed")]
mod fixed_point {
    use fixed::types::I16F16;

    use super::{check_reading, TensionModel};
    use crate::{
        constants::dial::DIAL_READING_MAX,
        errors::{ProfileError, ProfileResult},
        profile::Calibration,
    };

    /// Calibration with a fixed-point grade
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FixedCalibration {
        y_offset: i32,
        grade: I16F16,
    }

    impl FixedCalibration {
        /// Convert a validated float calibration
        pub fn from_calibration(calibration: &Calibration) -> ProfileResult<Self> {
            calibration.validate()?;

            let grade = I16F16::checked_from_num(calibration.grade)
                .filter(|g| *g > I16F16::ZERO)
                .ok_or(ProfileError::InvalidGrade {
                    grade: calibration.grade,
                    reason: "grade not representable in fixed point",
                })?;

            Ok(Self {
                y_offset: calibration.y_offset,
                grade,
            })
        }

        /// Calibration offset in dial counts
        pub fn y_offset(&self) -> i32 {
            self.y_offset
        }

        /// Fixed-point grade
        pub fn grade(&self) -> I16F16 {
            self.grade
        }

        /// Tension in kgf without touching floats
        pub fn tension_fixed(&self, reading: i32) -> ProfileResult<I16F16> {
            check_reading(reading)?;

            if reading < self.y_offset {
                return Err(ProfileError::ReadingBelowOffset {
                    reading,
                    y_offset: self.y_offset,
                });
            }

            I16F16::checked_from_num(reading - self.y_offset)
                .and_then(|counts| counts.checked_mul(self.grade))
                .ok_or(ProfileError::InvalidValue)
        }
    }

    impl TensionModel for FixedCalibration {
        fn tension_kgf(&self, reading: i32) -> ProfileResult<f32> {
            self.tension_fixed(reading).map(|kgf| kgf.to_num::<f32>())
        }

        fn reading_for_tension(&self, kgf: f32) -> ProfileResult<i32> {
            let max_kgf = self.max_tension_kgf();
            let fixed_kgf = I16F16::checked_from_num(kgf).ok_or(ProfileError::InvalidValue)?;
            if fixed_kgf < I16F16::ZERO || kgf > max_kgf {
                return Err(ProfileError::TensionOutOfRange { kgf, max_kgf });
            }

            let counts = fixed_kgf
                .checked_div(self.grade)
                .ok_or(ProfileError::InvalidValue)?
                .round()
                .to_num::<i32>();
            let reading = self
                .y_offset
                .checked_add(counts)
                .ok_or(ProfileError::InvalidValue)?;
            Ok(reading.min(DIAL_READING_MAX))
        }

        fn max_tension_kgf(&self) -> f32 {
            let span = (DIAL_READING_MAX - self.y_offset).max(0);
            I16F16::saturating_from_num(span)
                .saturating_mul(self.grade)
                .to_num::<f32>()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALPINE: Calibration = Calibration { y_offset: 649, grade: 0.848 };

    #[test]
    fn zero_tension_at_offset() {
        assert_eq!(ALPINE.tension_kgf(649).unwrap(), 0.0);
    }

    #[test]
    fn typical_build_tension() {
        // 118 counts above offset is 100 kgf on the fitted line
        let kgf = ALPINE.tension_kgf(649 + 118).unwrap();
        assert!((kgf - 100.064).abs() < 1e-3);
    }

    #[test]
    fn reading_below_offset() {
        let result = ALPINE.tension_kgf(600);
        assert_eq!(
            result,
            Err(ProfileError::ReadingBelowOffset { reading: 600, y_offset: 649 })
        );
    }

    #[test]
    fn reading_outside_dial() {
        assert!(matches!(
            ALPINE.tension_kgf(-5),
            Err(ProfileError::ReadingOutOfRange { .. })
        ));
        assert!(matches!(
            ALPINE.tension_kgf(DIAL_READING_MAX + 1),
            Err(ProfileError::ReadingOutOfRange { .. })
        ));
    }

    #[test]
    fn inverse_conversion() {
        let reading = ALPINE.reading_for_tension(120.0).unwrap();
        // 120 / 0.848 = 141.5 counts
        assert_eq!(reading, 649 + 142);

        let kgf = ALPINE.tension_kgf(reading).unwrap();
        assert!((kgf - 120.0).abs() < ALPINE.grade);
    }

    #[test]
    fn inverse_rejects_impossible_tension() {
        assert!(matches!(
            ALPINE.reading_for_tension(-1.0),
            Err(ProfileError::TensionOutOfRange { .. })
        ));
        assert!(matches!(
            ALPINE.reading_for_tension(10_000.0),
            Err(ProfileError::TensionOutOfRange { .. })
        ));
        assert_eq!(ALPINE.reading_for_tension(f32::NAN), Err(ProfileError::InvalidValue));
    }

    #[test]
    fn newtons() {
        let newtons = ALPINE.tension_newtons(649 + 118).unwrap();
        assert!((newtons - 100.064 * NEWTONS_PER_KGF).abs() < 1e-2);
        assert!((newtons_to_kgf(kgf_to_newtons(50.0)) - 50.0).abs() < 1e-4);
    }

    #[test]
    fn offset_outside_dial_is_refused() {
        let off_dial = Calibration { y_offset: 3000, grade: 0.848 };
        assert!(matches!(
            off_dial.reading_for_tension(0.0),
            Err(ProfileError::OffsetOutOfRange { y_offset: 3000, .. })
        ));
        assert!(matches!(
            off_dial.tension_kgf(DIAL_READING_MAX),
            Err(ProfileError::OffsetOutOfRange { .. })
        ));
        assert_eq!(off_dial.max_tension_kgf(), 0.0);
    }

    #[test]
    fn extreme_offset_does_not_overflow() {
        let extreme = Calibration { y_offset: i32::MIN, grade: 0.848 };
        assert!(matches!(
            extreme.tension_kgf(700),
            Err(ProfileError::OffsetOutOfRange { .. })
        ));
        assert!(extreme.reading_for_tension(10.0).is_err());

        let max = extreme.max_tension_kgf();
        assert!((max - DIAL_READING_MAX as f32 * 0.848).abs() < 1e-2);

        let huge = Calibration { y_offset: i32::MAX, grade: 0.848 };
        assert!(huge.tension_kgf(700).is_err());
        assert_eq!(huge.max_tension_kgf(), 0.0);
    }

    #[test]
    fn unvalidated_grade_is_refused() {
        let percent = Calibration { y_offset: 649, grade: 118.0 };
        assert!(matches!(
            percent.tension_kgf(700),
            Err(ProfileError::InvalidGrade { .. })
        ));
    }

    #[test]
    fn max_tension_covers_dial() {
        let max = ALPINE.max_tension_kgf();
        assert!((max - (DIAL_READING_MAX - 649) as f32 * 0.848).abs() < 1e-3);
    }

    #[cfg(feature = "fixed")]
    #[test]
    fn fixed_point_matches_float() {
        let fixed = FixedCalibration::from_calibration(&ALPINE).unwrap();

        for reading in [649, 700, 767, 900, 1200] {
            let float_kgf = ALPINE.tension_kgf(reading).unwrap();
            let fixed_kgf = fixed.tension_kgf(reading).unwrap();
            assert!((float_kgf - fixed_kgf).abs() < 0.05, "reading {reading}");
        }

        assert_eq!(
            fixed.reading_for_tension(120.0).unwrap(),
            ALPINE.reading_for_tension(120.0).unwrap()
        );
    }

    #[cfg(feature = "fixed")]
    #[test]
    fn fixed_point_rejects_bad_calibration() {
        let percent = Calibration { y_offset: 649, grade: 118.0 };
        assert!(FixedCalibration::from_calibration(&percent).is_err());
    }
}
