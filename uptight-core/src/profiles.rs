//! Built-in Spoke Profiles
//!
//! Profiles compiled into the firmware. Each comes from a calibration run
//! on the named spoke; values are trusted as measured and are not derived
//! from anything else in the crate.

use crate::{
    gauge::Gauge,
    profile::{Calibration, SpokeProfile},
};

/// A compiled-in profile with its catalog identity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuiltinProfile {
    /// Manufacturer and model name
    pub model: &'static str,
    /// Approximate spoke length used for calibration (mm)
    pub length_mm: Option<u16>,
    /// Gauges and calibration
    pub profile: SpokeProfile,
}

// ===== DT ALPINE III =====

/// DT Alpine III, triple butted 2.34 x 1.8 x 2.0, approx. 300 mm.
///
/// Calibration line: slope 1.18 counts/kgf, intercept 649 counts.
pub const DT_ALPINE_III_234X18X20: SpokeProfile = SpokeProfile::new(
    Gauge::from_digits(234, 2),
    Gauge::from_digits(18, 1),
    Calibration {
        y_offset: 649,
        grade: 0.848,
    },
);

/// Every profile shipped with the meter
pub const BUILTIN: &[BuiltinProfile] = &[BuiltinProfile {
    model: "DT Alpine III",
    length_mm: Some(300),
    profile: DT_ALPINE_III_234X18X20,
}];

/// Look up a built-in profile by model name and dimension key
pub fn find(model: &str, dimension_key: &str) -> Option<&'static BuiltinProfile> {
    BUILTIN.iter().find(|entry| {
        entry.model.eq_ignore_ascii_case(model) && entry.profile.dimension_key() == dimension_key
    })
}

/// All built-in profiles with the given dimension key
pub fn by_dimension(dimension_key: &str) -> impl Iterator<Item = &'static BuiltinProfile> + '_ {
    BUILTIN
        .iter()
        .filter(move |entry| entry.profile.dimension_key() == dimension_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_profiles_are_valid() {
        for entry in BUILTIN {
            assert!(entry.profile.validate().is_ok(), "{}", entry.model);
        }
    }

    #[test]
    fn find_alpine() {
        let entry = find("dt alpine iii", "234x18x20").unwrap();
        assert_eq!(entry.profile, DT_ALPINE_III_234X18X20);
        assert_eq!(entry.length_mm, Some(300));

        assert!(find("DT Alpine III", "20x20x20").is_none());
        assert!(find("DT Competition", "234x18x20").is_none());
    }

    #[test]
    fn lookup_by_dimension() {
        assert_eq!(by_dimension("234x18x20").count(), 1);
        assert_eq!(by_dimension("20x18x20").count(), 0);
    }
}
