//! Catalog documents and entries
//!
//! A document is one JSON file: a format version and a list of entries.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use uptight_core::{profiles::BuiltinProfile, SpokeProfile};

use crate::{CatalogError, CatalogResult};

/// Catalog file format understood by this crate
pub const FORMAT_VERSION: u32 = 1;

/// One spoke model in a catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Manufacturer and model name
    pub model: String,

    /// Approximate spoke length used for calibration (mm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_mm: Option<u16>,

    /// Gauges and calibration
    pub profile: SpokeProfile,
}

impl CatalogEntry {
    /// New entry
    pub fn new(model: impl Into<String>, length_mm: Option<u16>, profile: SpokeProfile) -> Self {
        Self {
            model: model.into(),
            length_mm,
            profile,
        }
    }

    /// Registry key, e.g. "dt-alpine-iii-234x18x20"
    pub fn key(&self) -> String {
        entry_key(&self.model, &self.profile.dimension_key())
    }

    /// Validate the profile, tagging errors with this entry's key
    pub fn validate(&self) -> CatalogResult<()> {
        if self.model.trim().is_empty() {
            return Err(CatalogError::ParseError("profile entry without a model name".to_string()));
        }
        self.profile
            .validate()
            .map_err(|error| CatalogError::InvalidProfile { key: self.key(), error })
    }
}

impl From<&BuiltinProfile> for CatalogEntry {
    fn from(builtin: &BuiltinProfile) -> Self {
        Self::new(builtin.model, builtin.length_mm, builtin.profile)
    }
}

/// Build a registry key from a model name and dimension key
///
/// The model name is lower-cased and whitespace runs become `-`, so case,
/// spacing and a hyphen in place of a space do not change the key. The
/// dimension key is taken as given.
pub fn entry_key(model: &str, dimension_key: &str) -> String {
    let model = model
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    format!("{}-{}", model, dimension_key)
}

/// A catalog file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// File format version
    pub format_version: u32,

    /// Profiles in file order
    #[serde(default)]
    pub profiles: Vec<CatalogEntry>,
}

impl Default for CatalogDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogDocument {
    /// Empty document at the current format version
    pub fn new() -> Self {
        Self {
            format_version: FORMAT_VERSION,
            profiles: Vec::new(),
        }
    }

    /// Document holding every compiled-in profile
    pub fn builtin() -> Self {
        Self {
            format_version: FORMAT_VERSION,
            profiles: uptight_core::profiles::BUILTIN.iter().map(CatalogEntry::from).collect(),
        }
    }

    /// Parse and validate a JSON catalog
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }

    /// Pretty JSON, as written to catalog files
    pub fn to_json_pretty(&self) -> CatalogResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check version and every entry
    pub fn validate(&self) -> CatalogResult<()> {
        if self.format_version != FORMAT_VERSION {
            return Err(CatalogError::UnsupportedVersion {
                found: self.format_version,
                expected: FORMAT_VERSION,
            });
        }
        self.profiles.iter().try_for_each(CatalogEntry::validate)
    }

    /// Read a catalog file
    pub fn load_file(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| CatalogError::Io(format!("{}: {}", path.display(), e)))?;
        let document = Self::from_json(&json)?;
        log::info!("loaded {} profiles from {}", document.profiles.len(), path.display());
        Ok(document)
    }

    /// Write a catalog file, replacing any existing one
    pub fn save_file(&self, path: impl AsRef<Path>) -> CatalogResult<()> {
        let path = path.as_ref();
        self.validate()?;
        let mut json = self.to_json_pretty()?;
        json.push('\n');
        fs::write(path, json).map_err(|e| CatalogError::Io(format!("{}: {}", path.display(), e)))?;
        log::info!("saved {} profiles to {}", self.profiles.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uptight_core::{profiles::DT_ALPINE_III_234X18X20, Gauge, ProfileError};

    const ALPINE_JSON: &str = r#"{
        "format_version": 1,
        "profiles": [{
            "model": "DT Alpine III",
            "length_mm": 300,
            "profile": {
                "elbow_gauge": "2.34",
                "trunk_gauge": "1.8",
                "calibration": { "y_offset": 649, "grade": 0.848 }
            }
        }]
    }"#;

    #[test]
    fn parse_alpine() {
        let document = CatalogDocument::from_json(ALPINE_JSON).unwrap();
        assert_eq!(document.profiles.len(), 1);

        let entry = &document.profiles[0];
        assert_eq!(entry.model, "DT Alpine III");
        assert_eq!(entry.profile, DT_ALPINE_III_234X18X20);
    }

    #[test]
    fn entry_keys() {
        let entry = CatalogEntry::new("DT  Alpine III", None, DT_ALPINE_III_234X18X20);
        assert_eq!(entry.key(), "dt-alpine-iii-234x18x20");
    }

    #[test]
    fn model_spelling_collapses() {
        let spaced = CatalogEntry::new("DT Alpine III", None, DT_ALPINE_III_234X18X20);
        let hyphenated = CatalogEntry::new("DT-Alpine III", None, DT_ALPINE_III_234X18X20);
        assert_eq!(spaced.key(), hyphenated.key());
    }

    #[test]
    fn dimension_key_follows_written_digits() {
        let mut padded = DT_ALPINE_III_234X18X20;
        padded.trunk_gauge = "1.80".parse().unwrap();
        let padded = CatalogEntry::new("DT Alpine III", None, padded);

        assert_eq!(padded.key(), "dt-alpine-iii-234x180x20");
        assert_ne!(
            padded.key(),
            CatalogEntry::new("DT Alpine III", None, DT_ALPINE_III_234X18X20).key()
        );
    }

    #[test]
    fn gauges_serialize_as_text() {
        let json = CatalogDocument::builtin().to_json_pretty().unwrap();
        assert!(json.contains("\"elbow_gauge\": \"2.34\""));
        assert!(json.contains("\"trunk_gauge\": \"1.8\""));
        assert!(json.contains("\"grade\": 0.848"));
    }

    #[test]
    fn length_is_optional() {
        let json = ALPINE_JSON.replace("\"length_mm\": 300,", "");
        let document = CatalogDocument::from_json(&json).unwrap();
        assert_eq!(document.profiles[0].length_mm, None);
    }

    #[test]
    fn rejects_percentage_grade() {
        let json = ALPINE_JSON.replace("0.848", "118");
        let result = CatalogDocument::from_json(&json);
        assert!(matches!(result, Err(CatalogError::InvalidProfile { .. })));
    }

    #[test]
    fn rejects_numeric_gauge() {
        let json = ALPINE_JSON.replace("\"2.34\"", "2.34");
        assert!(matches!(
            CatalogDocument::from_json(&json),
            Err(CatalogError::ParseError(_))
        ));
    }

    #[test]
    fn rejects_future_version() {
        let json = ALPINE_JSON.replace("\"format_version\": 1", "\"format_version\": 2");
        assert!(matches!(
            CatalogDocument::from_json(&json),
            Err(CatalogError::UnsupportedVersion { found: 2, expected: 1 })
        ));
    }

    #[test]
    fn save_refuses_unrepresentable_gauge() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");

        // "0.2340" would be written but could never be read back
        let mut profile = DT_ALPINE_III_234X18X20;
        profile.elbow_gauge = Gauge::from_digits(2340, 4);
        let mut document = CatalogDocument::new();
        document.profiles.push(CatalogEntry::new("DT Alpine III", None, profile));

        let result = document.save_file(&path);
        assert!(matches!(
            result,
            Err(CatalogError::InvalidProfile {
                error: ProfileError::InvalidGauge { .. },
                ..
            })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn saved_document_loads_back() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");

        let document = CatalogDocument::builtin();
        document.save_file(&path).unwrap();
        assert_eq!(CatalogDocument::load_file(&path).unwrap(), document);
    }

    #[test]
    fn rejects_blank_model() {
        let json = ALPINE_JSON.replace("DT Alpine III", "  ");
        assert!(CatalogDocument::from_json(&json).is_err());
    }
}
