//! Decimal spoke gauges
//!
//! A gauge is a spoke diameter in millimetres as the manufacturer writes it:
//! "2.34", "1.8", "2.0". Values like 2.34 have no exact binary float
//! representation, so a gauge is stored as its decimal digits plus the
//! number of fractional digits. That keeps the text exact through display,
//! serialization and parsing, and "1.8" stays "1.8" rather than "1.80".
//!
//! ```rust
//! use uptight_core::Gauge;
//!
//! let elbow: Gauge = "2.34".parse()?;
//! assert_eq!(elbow.to_text(), "2.34");
//! assert_eq!(elbow.micrometres(), 2340);
//! # Ok::<(), uptight_core::ProfileError>(())
//! ```

use core::fmt::{self, Write};
use core::str::FromStr;

use crate::{
    constants::gauges::{GAUGE_MAX_DECIMALS, GAUGE_MAX_UM, GAUGE_MIN_UM},
    errors::{ProfileError, ProfileResult},
};

/// Room for the longest gauge text: ten digits, a dot and slack.
pub const GAUGE_TEXT_CAPACITY: usize = 12;

/// Fixed-capacity gauge text
pub type GaugeText = heapless::String<GAUGE_TEXT_CAPACITY>;

/// Spoke diameter in millimetres with its textual precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gauge {
    /// All digits with the decimal point removed ("2.34" -> 234)
    digits: u32,
    /// Number of digits after the decimal point ("2.34" -> 2)
    decimals: u8,
}

impl Gauge {
    /// Build a gauge from its digits and decimal count.
    ///
    /// `Gauge::from_digits(234, 2)` is "2.34". Intended for compile-time
    /// tables; nothing is checked until [`Gauge::check_range`].
    pub const fn from_digits(digits: u32, decimals: u8) -> Self {
        Self { digits, decimals }
    }

    /// Digits with the decimal point removed
    pub const fn digits(&self) -> u32 {
        self.digits
    }

    /// Number of fractional digits
    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Numeric value in micrometres, for comparisons between gauges
    ///
    /// Digits beyond micrometre resolution are truncated.
    pub const fn micrometres(&self) -> u32 {
        if self.decimals > GAUGE_MAX_DECIMALS {
            self.digits / pow10(self.decimals - GAUGE_MAX_DECIMALS)
        } else {
            self.digits.saturating_mul(pow10(GAUGE_MAX_DECIMALS - self.decimals))
        }
    }

    /// Lossy millimetre value for display arithmetic only
    pub fn to_mm_f32(&self) -> f32 {
        self.digits as f32 / pow10(self.decimals) as f32
    }

    /// Exact gauge text ("2.34")
    pub fn to_text(&self) -> GaugeText {
        let mut text = GaugeText::new();
        // Ten u32 digits, a point and a leading zero fit while decimals
        // stay within GAUGE_MAX_DECIMALS; check_range enforces that
        let _ = write!(text, "{}", self);
        text
    }

    /// Check the gauge is a plausible spoke diameter written with at most
    /// three decimals
    pub fn check_range(&self) -> ProfileResult<()> {
        if self.decimals > GAUGE_MAX_DECIMALS {
            return Err(ProfileError::InvalidGauge { reason: "more than three decimals" });
        }
        if self.digits == 0 {
            return Err(ProfileError::InvalidGauge { reason: "zero diameter" });
        }

        let value_um = self.micrometres();
        if !(GAUGE_MIN_UM..=GAUGE_MAX_UM).contains(&value_um) {
            return Err(ProfileError::GaugeOutOfRange {
                value_um,
                min_um: GAUGE_MIN_UM,
                max_um: GAUGE_MAX_UM,
            });
        }
        Ok(())
    }
}

const fn pow10(exp: u8) -> u32 {
    let mut value = 1u32;
    let mut i = 0;
    while i < exp {
        value = value.saturating_mul(10);
        i += 1;
    }
    value
}

impl fmt::Display for Gauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.decimals == 0 {
            return write!(f, "{}", self.digits);
        }
        let scale = pow10(self.decimals);
        write!(
            f,
            "{}.{:0width$}",
            self.digits / scale,
            self.digits % scale,
            width = self.decimals as usize
        )
    }
}

impl FromStr for Gauge {
    type Err = ProfileError;

    fn from_str(text: &str) -> ProfileResult<Self> {
        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (text, None),
        };

        if whole.is_empty() {
            return Err(ProfileError::InvalidGauge { reason: "missing whole millimetres" });
        }
        if let Some(fraction) = fraction {
            if fraction.is_empty() {
                return Err(ProfileError::InvalidGauge { reason: "trailing decimal point" });
            }
            if fraction.len() > GAUGE_MAX_DECIMALS as usize {
                return Err(ProfileError::InvalidGauge { reason: "more than three decimals" });
            }
        }

        let mut digits = 0u32;
        let all_digits = whole.bytes().chain(fraction.unwrap_or("").bytes());
        for byte in all_digits {
            if !byte.is_ascii_digit() {
                return Err(ProfileError::InvalidGauge { reason: "not a decimal number" });
            }
            digits = digits
                .checked_mul(10)
                .and_then(|d| d.checked_add(u32::from(byte - b'0')))
                .ok_or(ProfileError::InvalidGauge { reason: "too many digits" })?;
        }

        if digits == 0 {
            return Err(ProfileError::InvalidGauge { reason: "zero diameter" });
        }

        let decimals = fraction.map_or(0, |f| f.len() as u8);
        Ok(Self { digits, decimals })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Gauge {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_text())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Gauge {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GaugeVisitor;

        impl<'de> serde::de::Visitor<'de> for GaugeVisitor {
            type Value = Gauge;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a gauge in millimetres as a decimal string, e.g. \"2.34\"")
            }

            fn visit_str<E: serde::de::Error>(self, text: &str) -> Result<Gauge, E> {
                text.parse().map_err(|e: ProfileError| match e {
                    ProfileError::InvalidGauge { reason } => E::custom(reason),
                    _ => E::custom("invalid gauge"),
                })
            }
        }

        deserializer.deserialize_str(GaugeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_keeps_text() {
        assert_eq!(Gauge::from_digits(234, 2).to_text(), "2.34");
        assert_eq!(Gauge::from_digits(18, 1).to_text(), "1.8");
        assert_eq!(Gauge::from_digits(20, 1).to_text(), "2.0");
        assert_eq!(Gauge::from_digits(2, 0).to_text(), "2");
        assert_eq!(Gauge::from_digits(2005, 3).to_text(), "2.005");
    }

    #[test]
    fn parse_valid() {
        let gauge: Gauge = "2.34".parse().unwrap();
        assert_eq!(gauge, Gauge::from_digits(234, 2));

        let gauge: Gauge = "1.8".parse().unwrap();
        assert_eq!(gauge.digits(), 18);
        assert_eq!(gauge.decimals(), 1);
    }

    #[test]
    fn textual_precision_is_identity() {
        let short: Gauge = "1.8".parse().unwrap();
        let long: Gauge = "1.80".parse().unwrap();

        // Same diameter, different text
        assert_ne!(short, long);
        assert_eq!(short.micrometres(), long.micrometres());
        assert_eq!(long.to_text(), "1.80");
    }

    #[test]
    fn parse_rejects_garbage() {
        for text in ["", ".5", "2.", "2..3", "2.3.4", "-1.8", "+1.8", " 1.8", "1,8", "2.0001", "0", "0.00", "abc"] {
            assert!(
                matches!(text.parse::<Gauge>(), Err(ProfileError::InvalidGauge { .. })),
                "{text:?} should not parse"
            );
        }
    }

    #[test]
    fn parse_rejects_overflow() {
        assert!("99999999999".parse::<Gauge>().is_err());
    }

    #[test]
    fn micrometre_conversion() {
        assert_eq!(Gauge::from_digits(234, 2).micrometres(), 2340);
        assert_eq!(Gauge::from_digits(18, 1).micrometres(), 1800);
        assert_eq!(Gauge::from_digits(2, 0).micrometres(), 2000);
        assert_eq!(Gauge::from_digits(1805, 3).micrometres(), 1805);
    }

    #[test]
    fn range_check() {
        assert!(Gauge::from_digits(234, 2).check_range().is_ok());
        assert!(matches!(
            Gauge::from_digits(5, 1).check_range(),
            Err(ProfileError::GaugeOutOfRange { value_um: 500, .. })
        ));
        assert!(Gauge::from_digits(45, 1).check_range().is_err());
    }

    #[test]
    fn excess_decimals_fail_range_check() {
        // "0.2340" is 234 µm, not 2.34 mm
        let gauge = Gauge::from_digits(2340, 4);
        assert_eq!(gauge.micrometres(), 234);
        assert_eq!(
            gauge.check_range(),
            Err(ProfileError::InvalidGauge { reason: "more than three decimals" })
        );

        let long = Gauge::from_digits(234, 12);
        assert!(matches!(long.check_range(), Err(ProfileError::InvalidGauge { .. })));
    }

    #[test]
    fn float_view_is_close() {
        let gauge = Gauge::from_digits(234, 2);
        assert!((gauge.to_mm_f32() - 2.34).abs() < 1e-6);
    }
}
