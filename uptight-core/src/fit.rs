//! Calibration graph fitting
//!
//! Turns a set of `(tension, dial reading)` points taken on a calibration
//! rig into a [`Calibration`]. An ordinary least-squares line
//! `reading = slope × kgf + intercept` is fitted; the intercept becomes
//! `y_offset` (rounded to whole counts) and `1 / slope` becomes `grade`.
//!
//! ```rust
//! use uptight_core::fit::{fit_calibration, CalibrationPoint};
//!
//! let points = [
//!     CalibrationPoint::new(0.0, 649),
//!     CalibrationPoint::new(50.0, 708),
//!     CalibrationPoint::new(100.0, 767),
//! ];
//! let fit = fit_calibration(&points)?;
//! assert_eq!(fit.calibration.y_offset, 649);
//! # Ok::<(), uptight_core::ProfileError>(())
//! ```

use crate::{
    constants::dial::FIT_MIN_POINTS,
    errors::{ProfileError, ProfileResult},
    profile::Calibration,
    tension::check_reading,
};

/// Variance below this is treated as zero
const MIN_VARIANCE: f32 = 1e-6;

/// One measurement from the calibration rig
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationPoint {
    /// Applied tension (kgf)
    pub kgf: f32,
    /// Dial reading at that tension (0.01 mm counts)
    pub reading: i32,
}

impl CalibrationPoint {
    /// New calibration point
    pub const fn new(kgf: f32, reading: i32) -> Self {
        Self { kgf, reading }
    }
}

/// Result of fitting a calibration line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationFit {
    /// The fitted calibration
    pub calibration: Calibration,
    /// Fitted slope in counts per kgf
    pub slope: f32,
    /// Unrounded intercept in counts
    pub intercept: f32,
    /// Coefficient of determination (1.0 = points exactly on the line)
    pub r_squared: f32,
}

/// Fit a calibration line through rig measurements
pub fn fit_calibration(points: &[CalibrationPoint]) -> ProfileResult<CalibrationFit> {
    if points.len() < FIT_MIN_POINTS {
        return Err(ProfileError::InsufficientData {
            required: FIT_MIN_POINTS,
            available: points.len(),
        });
    }

    for point in points {
        if !point.kgf.is_finite() {
            return Err(ProfileError::InvalidValue);
        }
        check_reading(point.reading)?;
    }

    let n = points.len() as f32;
    let mean_x = points.iter().map(|p| p.kgf).sum::<f32>() / n;
    let mean_y = points.iter().map(|p| p.reading as f32).sum::<f32>() / n;

    let (mut sxx, mut sxy, mut syy) = (0.0f32, 0.0f32, 0.0f32);
    for point in points {
        let dx = point.kgf - mean_x;
        let dy = point.reading as f32 - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if sxx < MIN_VARIANCE {
        return Err(ProfileError::DegenerateFit {
            reason: "all points at the same tension",
        });
    }

    let slope = sxy / sxx;
    if slope <= 0.0 || !slope.is_finite() {
        return Err(ProfileError::DegenerateFit {
            reason: "reading does not rise with tension",
        });
    }

    let intercept = mean_y - slope * mean_x;
    let r_squared = if syy < MIN_VARIANCE {
        0.0
    } else {
        (sxy * sxy) / (sxx * syy)
    };

    let calibration = Calibration::new(libm::roundf(intercept) as i32, 1.0 / slope)?;

    if r_squared < 0.99 {
        log_warn!("calibration fit is loose: r² = {}", r_squared);
    }
    log_debug!(
        "fitted y_offset {} grade {} over {} points",
        calibration.y_offset,
        calibration.grade,
        points.len()
    );

    Ok(CalibrationFit {
        calibration,
        slope,
        intercept,
        r_squared,
    })
}
