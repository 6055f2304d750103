//! Fitting a New Calibration
//!
//! Hang known weights on a sample spoke, note the dial, and fit the
//! calibration line. The output is ready to paste into a profile.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_fit_calibration
//! ```

use uptight_core::{
    fit::{fit_calibration, CalibrationPoint},
    Gauge, SpokeProfile,
};

fn main() {
    println!("Uptight Calibration Fit Example");
    println!("===============================\n");

    // Rig measurements: (kgf hung on the spoke, dial counts)
    let points = [
        CalibrationPoint::new(40.0, 697),
        CalibrationPoint::new(80.0, 743),
        CalibrationPoint::new(120.0, 792),
        CalibrationPoint::new(160.0, 837),
    ];

    for point in &points {
        println!("  {:5.1} kgf -> {:4}", point.kgf, point.reading);
    }

    let fit = match fit_calibration(&points) {
        Ok(fit) => fit,
        Err(e) => {
            println!("\nFit failed: {}", e);
            return;
        }
    };

    println!("\nslope:     {:.4} counts/kgf", fit.slope);
    println!("intercept: {:.2} counts", fit.intercept);
    println!("r²:        {:.5}", fit.r_squared);

    let elbow: Gauge = "2.34".parse().expect("literal gauge");
    let trunk: Gauge = "1.8".parse().expect("literal gauge");
    let profile = SpokeProfile::new(elbow, trunk, fit.calibration);

    match profile.validate() {
        Ok(()) => {
            println!("\nProfile {}:", profile.dimension_key());
            println!("  y_offset = {}", profile.calibration.y_offset);
            println!("  grade    = {:.3}", profile.calibration.grade);
        }
        Err(e) => println!("\nProfile rejected: {}", e),
    }
}
