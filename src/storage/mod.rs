//! Persistence of the last loaded catalog.
//!
//! Only the raw JSON text is persisted, never the normalized catalog, so a
//! restart runs the normalizer over exactly the same input again.

mod file;
mod memory;
mod traits;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::{KeyValueStore, StoreLimits, validate_key};

use crate::error::Result;

/// Fixed key under which the raw catalog JSON is stored.
pub const STORAGE_KEY: &str = "allergenAppData";

/// Persistence adapter for the raw catalog text.
#[derive(Debug, Clone)]
pub struct CatalogStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> CatalogStore<S> {
    /// Wrap a store using the fixed [`STORAGE_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    /// Wrap a store using a custom key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Persist the raw catalog text.
    pub fn save(&mut self, raw: &str) -> Result<()> {
        self.store.set(&self.key, raw)
    }

    /// Read the persisted raw catalog text, if any.
    pub fn load(&self) -> Result<Option<String>> {
        self.store.get(&self.key)
    }

    /// Remove the persisted catalog.
    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(&self.key)
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.store
    }

    pub const fn inner_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::parse_catalog_str;

    #[test]
    fn test_round_trip_reproduces_catalog() {
        let raw = r#"{"x": {"name": "Brezel", "components": [{"ingredients": [{"allergen": "Gluten"}]}]}}"#;
        let mut store = CatalogStore::new(MemoryStore::new());
        store.save(raw).expect("save");

        let loaded = store.load().expect("load").expect("persisted");
        assert_eq!(loaded, raw);
        assert_eq!(
            parse_catalog_str(&loaded).expect("parse").catalog,
            parse_catalog_str(raw).expect("parse").catalog
        );
    }

    #[test]
    fn test_clear() {
        let mut store = CatalogStore::new(MemoryStore::new());
        store.save("[]").expect("save");
        store.clear().expect("clear");
        assert_eq!(store.load().expect("load"), None);
        assert_eq!(store.key(), STORAGE_KEY);
    }
}
