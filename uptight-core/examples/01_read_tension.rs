//! Reading Spoke Tension
//!
//! Converts a handful of dial readings to tension with the built-in
//! DT Alpine III profile, then works out where the dial should sit for a
//! target tension.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_read_tension
//! ```

use uptight_core::{profiles, ProfileError, TensionModel};

fn main() {
    println!("Uptight Tension Example");
    println!("=======================\n");

    for entry in profiles::BUILTIN {
        println!("Profile: {} ({})", entry.model, entry.profile.dimension());
        println!("  y_offset: {}", entry.profile.calibration.y_offset);
        println!("  grade:    {}", entry.profile.calibration.grade);
        println!("  max:      {:.1} kgf\n", entry.profile.max_tension_kgf());
    }

    let spoke = profiles::DT_ALPINE_III_234X18X20;

    // Dial readings around a wheel, 0.01 mm counts
    let readings = [612, 731, 760, 774, 789, 3000];

    for reading in readings {
        match spoke.tension_kgf(reading) {
            Ok(kgf) => println!(
                "  {:5} -> {:6.1} kgf ({:6.0} N)",
                reading,
                kgf,
                uptight_core::tension::kgf_to_newtons(kgf)
            ),
            Err(ProfileError::ReadingBelowOffset { .. }) => {
                println!("  {:5} -> meter not seated on the spoke", reading)
            }
            Err(e) => println!("  {:5} -> {}", reading, e),
        }
    }

    println!();
    for target in [100.0, 110.0, 120.0] {
        match spoke.reading_for_tension(target) {
            Ok(reading) => println!("  {:.0} kgf target -> tighten until dial shows {}", target, reading),
            Err(e) => println!("  {:.0} kgf target -> {}", target, e),
        }
    }
}
