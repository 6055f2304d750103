//! Spoke Profile Catalog
//!
//! ## Overview
//!
//! The meter firmware ships a handful of profiles compiled in as constants
//! (see `uptight_core::profiles`). Workshops calibrate their own spokes as
//! well, so profiles also live in JSON catalog files that can be shared,
//! versioned and loaded at runtime. This crate owns that file format and a
//! registry to look profiles up in.
//!
//! ## Catalog File Format
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "profiles": [
//!     {
//!       "model": "DT Alpine III",
//!       "length_mm": 300,
//!       "profile": {
//!         "elbow_gauge": "2.34",
//!         "trunk_gauge": "1.8",
//!         "calibration": { "y_offset": 649, "grade": 0.848 }
//!       }
//!     }
//!   ]
//! }
//! ```
//!
//! Gauges are strings. They are written and read back exactly as given, so
//! "1.8" never turns into "1.8000000715255737". The grade is the reciprocal
//! form (0.848); the old percentage notation (118) is rejected on load.
//!
//! Every entry is validated when a document is parsed; a catalog never
//! holds a profile the meter would refuse.
//!
//! ## Registry
//!
//! [`ProfileCatalog`] is a thread-safe map keyed by
//! `"<model>-<dimension key>"`, e.g. `dt-alpine-iii-234x18x20`.
//!
//! Keys are normalised, so some distinct entries share a key:
//! - The model name is lower-cased and whitespace runs become `-`. As a
//!   result "DT Alpine III", "dt  alpine iii" and "DT-Alpine III" all map
//!   to `dt-alpine-iii` and count as duplicates.
//! - The dimension key is built from each gauge's digits as written, not
//!   its diameter. A trunk of "1.8" gives `234x18x20` and "1.80" gives
//!   `234x180x20`, so both can be registered side by side.
//!
//! ```rust
//! use uptight_catalog::ProfileCatalog;
//!
//! let catalog = ProfileCatalog::new();
//! catalog.load_defaults()?;
//!
//! let entry = catalog.find("DT Alpine III", "234x18x20")?;
//! assert_eq!(entry.profile.calibration.y_offset, 649);
//! # Ok::<(), uptight_catalog::CatalogError>(())
//! ```

use uptight_core::ProfileError;

pub mod document;
pub mod registry;

pub use document::{CatalogDocument, CatalogEntry, FORMAT_VERSION};
pub use registry::{ProfileCatalog, GLOBAL_CATALOG};

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog errors
#[derive(Debug, thiserror_no_std::Error)]
pub enum CatalogError {
    #[error("Failed to parse catalog: {0}")]
    ParseError(String),

    #[error("Unsupported catalog format version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Invalid profile {key}: {error}")]
    InvalidProfile { key: String, error: ProfileError },

    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error("Profile already registered: {0}")]
    Duplicate(String),

    #[error("Catalog I/O failed: {0}")]
    Io(String),

    #[error("Catalog lock poisoned")]
    LockPoisoned,
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::ParseError(e.to_string())
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        CatalogError::Io(e.to_string())
    }
}
