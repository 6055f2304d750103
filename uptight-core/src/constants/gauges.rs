//! Spoke Gauge Limits
//!
//! Gauges are diameters in millimetres written with up to three decimals.
//! Limits are stored in micrometres so they can be compared without floats.

use crate::gauge::Gauge;

/// Maximum number of fractional digits a gauge may carry.
///
/// Three decimals is micrometre resolution, finer than any spoke
/// manufacturer publishes.
pub const GAUGE_MAX_DECIMALS: u8 = 3;

/// Thinnest plausible spoke section (µm).
///
/// Aero bladed and superlight butted spokes go down to roughly 1.4 mm;
/// 1.0 mm leaves room for unusual sections.
pub const GAUGE_MIN_UM: u32 = 1_000;

/// Thickest plausible spoke section (µm).
///
/// Tandem and e-bike spokes reach 2.6 mm at the elbow; 4.0 mm covers
/// motorcycle-style spokes.
pub const GAUGE_MAX_UM: u32 = 4_000;

/// Threaded (nipple) end gauge assumed for every profile: 2.0 mm.
///
/// Not stored per profile.
pub const THREADED_END_GAUGE: Gauge = Gauge::from_digits(20, 1);
