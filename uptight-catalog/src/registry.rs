//! Profile Registry
//!
//! Thread-safe lookup of catalog entries by key, model or dimension. The
//! bundled catalog files under `profiles/` are embedded at compile time and
//! loaded by [`ProfileCatalog::load_defaults`].

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::RwLock;

use include_dir::{include_dir, Dir};

use crate::{
    document::{entry_key, CatalogDocument, CatalogEntry},
    CatalogError, CatalogResult,
};

/// Catalog files shipped with the crate
static BUNDLED_PROFILES: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/profiles");

/// Thread-safe spoke profile registry
pub struct ProfileCatalog {
    /// Entries indexed by key
    entries: RwLock<HashMap<String, CatalogEntry>>,
}

impl ProfileCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Register an entry. Fails if the key is taken.
    pub fn register(&self, entry: CatalogEntry) -> CatalogResult<()> {
        entry.validate()?;
        let key = entry.key();

        let mut entries = self.entries.write().map_err(|_| CatalogError::LockPoisoned)?;
        if entries.contains_key(&key) {
            return Err(CatalogError::Duplicate(key));
        }

        log::debug!("registered profile {}", key);
        entries.insert(key, entry);
        Ok(())
    }

    /// Get an entry by key
    pub fn get(&self, key: &str) -> CatalogResult<CatalogEntry> {
        let entries = self.entries.read().map_err(|_| CatalogError::LockPoisoned)?;
        entries
            .get(key)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(key.to_string()))
    }

    /// Get an entry by model name and dimension key ("234x18x20")
    pub fn find(&self, model: &str, dimension_key: &str) -> CatalogResult<CatalogEntry> {
        self.get(&entry_key(model, dimension_key))
    }

    /// Every entry with the given dimension key, ordered by key
    pub fn find_by_dimension(&self, dimension_key: &str) -> CatalogResult<Vec<CatalogEntry>> {
        let entries = self.entries.read().map_err(|_| CatalogError::LockPoisoned)?;

        let mut matches: Vec<(String, CatalogEntry)> = entries
            .iter()
            .filter(|(_, entry)| entry.profile.dimension_key() == dimension_key)
            .map(|(key, entry)| (key.clone(), entry.clone()))
            .collect();
        matches.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(matches.into_iter().map(|(_, entry)| entry).collect())
    }

    /// Remove an entry, returning it
    pub fn remove(&self, key: &str) -> CatalogResult<CatalogEntry> {
        let mut entries = self.entries.write().map_err(|_| CatalogError::LockPoisoned)?;
        entries
            .remove(key)
            .ok_or_else(|| CatalogError::NotFound(key.to_string()))
    }

    /// Sorted list of keys
    pub fn keys(&self) -> CatalogResult<Vec<String>> {
        let entries = self.entries.read().map_err(|_| CatalogError::LockPoisoned)?;
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// True if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register every entry of a document, or none of them.
    ///
    /// Keys are checked against the registry and within the document under
    /// a single write lock before anything is inserted.
    pub fn load_document(&self, document: CatalogDocument) -> CatalogResult<usize> {
        document.validate()?;

        let keyed: Vec<(String, CatalogEntry)> = document
            .profiles
            .into_iter()
            .map(|entry| (entry.key(), entry))
            .collect();

        let mut entries = self.entries.write().map_err(|_| CatalogError::LockPoisoned)?;

        let mut seen = HashSet::with_capacity(keyed.len());
        for (key, _) in &keyed {
            if entries.contains_key(key) || !seen.insert(key.as_str()) {
                return Err(CatalogError::Duplicate(key.clone()));
            }
        }

        let count = keyed.len();
        for (key, entry) in keyed {
            log::debug!("registered profile {}", key);
            entries.insert(key, entry);
        }
        Ok(count)
    }

    /// Load a catalog file into the registry
    pub fn load_file(&self, path: impl AsRef<Path>) -> CatalogResult<usize> {
        let document = CatalogDocument::load_file(path)?;
        self.load_document(document)
    }

    /// Snapshot as a document, entries ordered by key
    pub fn to_document(&self) -> CatalogResult<CatalogDocument> {
        let entries = self.entries.read().map_err(|_| CatalogError::LockPoisoned)?;

        let mut sorted: Vec<(&String, &CatalogEntry)> = entries.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        let mut document = CatalogDocument::new();
        document.profiles = sorted.into_iter().map(|(_, entry)| entry.clone()).collect();
        Ok(document)
    }

    /// Load the bundled catalog files
    pub fn load_defaults(&self) -> CatalogResult<usize> {
        let mut total = 0;

        for file in BUNDLED_PROFILES.files() {
            let path = file.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let json = file
                .contents_utf8()
                .ok_or_else(|| CatalogError::ParseError(format!("{} is not UTF-8", path.display())))?;
            let document = CatalogDocument::from_json(json)?;
            total += self.load_document(document)?;
        }

        log::info!("loaded {} bundled profiles", total);
        Ok(total)
    }
}

impl Default for ProfileCatalog {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static::lazy_static! {
    /// Global catalog with the bundled profiles loaded
    pub static ref GLOBAL_CATALOG: ProfileCatalog = {
        let catalog = ProfileCatalog::new();
        if let Err(e) = catalog.load_defaults() {
            log::warn!("bundled profiles failed to load: {}", e);
        }
        catalog
    };
}
