//! Force Unit Conversions

/// Newtons per kilogram-force (standard gravity).
///
/// Source: CGPM 1901 definition of standard gravity, 9.80665 m/s²
pub const NEWTONS_PER_KGF: f32 = 9.806_65;
