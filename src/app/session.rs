//! Command handling for the viewer.

use super::messages;
use super::state::AppState;
use crate::model::FilterMode;
use crate::parsers::{self, CatalogShape};
use crate::storage::{CatalogStore, KeyValueStore};
use std::path::PathBuf;

/// A user or host action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Restore the catalog persisted by a previous run
    RestorePersisted,
    /// Load catalog JSON text
    LoadCatalog(String),
    /// Read a catalog file and load it
    LoadFile(PathBuf),
    /// Forget the catalog, in memory and on disk
    ClearCatalog,
    ToggleAllergen(String),
    SetMode(FilterMode),
    SetSearch(String),
}

/// What a command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A new catalog replaced the old one
    CatalogLoaded {
        shape: CatalogShape,
        products: usize,
        /// Whether the raw text reached the persistent store
        persisted: bool,
    },
    CatalogRestored { products: usize },
    NothingPersisted,
    /// Persisted data could not be read or parsed; state is unchanged
    RestoreFailed(String),
    /// The JSON was malformed; state is unchanged
    ParseFailed(String),
    /// The file could not be read; state is unchanged
    ReadFailed(String),
    CatalogCleared,
    SelectionChanged { selected: bool },
    ModeChanged(FilterMode),
    SearchChanged,
}

impl Outcome {
    /// Whether the command left the catalog unchanged because of a failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::RestoreFailed(_) | Self::ParseFailed(_) | Self::ReadFailed(_)
        )
    }
}

/// Application state plus the store that persists it.
pub struct Session<S> {
    state: AppState,
    store: CatalogStore<S>,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self {
            state: AppState::new(),
            store: CatalogStore::new(store),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    pub const fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    #[must_use]
    pub const fn store(&self) -> &CatalogStore<S> {
        &self.store
    }

    /// Apply a command and report what happened.
    pub fn handle(&mut self, command: Command) -> Outcome {
        match command {
            Command::RestorePersisted => self.restore(),
            Command::LoadCatalog(text) => self.load_text(&text),
            Command::LoadFile(path) => match parsers::read_catalog_text(&path) {
                Ok(text) => self.load_text(&text),
                Err(e) => {
                    tracing::warn!("Could not read {}: {}", path.display(), e);
                    self.state.status.error(messages::READ_FAILED);
                    Outcome::ReadFailed(e.to_string())
                }
            },
            Command::ClearCatalog => self.clear(),
            Command::ToggleAllergen(label) => {
                let selected = self.state.selection.toggle(&label);
                Outcome::SelectionChanged { selected }
            }
            Command::SetMode(mode) => {
                self.state.mode = mode;
                Outcome::ModeChanged(mode)
            }
            Command::SetSearch(query) => {
                self.state.search = query;
                Outcome::SearchChanged
            }
        }
    }

    fn restore(&mut self) -> Outcome {
        let raw = match self.store.load() {
            Ok(Some(raw)) => raw,
            Ok(None) => return Outcome::NothingPersisted,
            Err(e) => {
                tracing::warn!("Could not read persisted catalog: {}", e);
                return Outcome::RestoreFailed(e.to_string());
            }
        };
        match parsers::parse_catalog_str(&raw) {
            Ok(parsed) => {
                let products = parsed.catalog.product_count();
                self.state.replace_catalog(parsed.catalog);
                self.state.status.info(messages::RESTORED);
                tracing::info!("Restored {} products from local storage", products);
                Outcome::CatalogRestored { products }
            }
            Err(e) => {
                tracing::warn!("Persisted catalog is not valid JSON: {}", e);
                Outcome::RestoreFailed(e.to_string())
            }
        }
    }

    fn load_text(&mut self, text: &str) -> Outcome {
        let parsed = match parsers::parse_catalog_str(text) {
            Ok(parsed) => parsed,
            Err(e) => {
                let message = e
                    .json_message()
                    .map_or_else(|| e.to_string(), str::to_string);
                self.state.status.error(messages::parse_failed(&message));
                return Outcome::ParseFailed(message);
            }
        };

        let shape = parsed.shape;
        let products = parsed.catalog.product_count();
        self.state.replace_catalog(parsed.catalog);
        tracing::info!("Loaded {} products ({})", products, shape);

        let persisted = match self.store.save(&parsed.raw) {
            Ok(()) => {
                self.state.status.info(messages::LOADED);
                true
            }
            Err(e) => {
                tracing::warn!("Catalog loaded but not persisted: {}", e);
                self.state.status.warn(messages::not_persisted(&e));
                false
            }
        };

        Outcome::CatalogLoaded {
            shape,
            products,
            persisted,
        }
    }

    fn clear(&mut self) -> Outcome {
        let removed = self.store.clear();
        self.state.reset();
        match removed {
            Ok(()) => self.state.status.info(messages::CLEARED),
            Err(e) => {
                tracing::warn!("Could not remove persisted catalog: {}", e);
                self.state.status.warn(messages::not_cleared(&e));
            }
        }
        Outcome::CatalogCleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::StatusLevel;
    use crate::storage::{MemoryStore, StoreLimits};

    const BAKERY: &str = r#"{"products": [
        {"id": "b1", "name": "Brot", "components": [{"name": "Teig",
            "ingredients": [{"name": "Weizenmehl", "allergens": ["Gluten"]}]}]},
        {"id": "k1", "name": "Kuchen", "components": [{"name": "Boden",
            "ingredients": [{"name": "Ei", "allergen": "Ei"}, {"name": "Butter", "allergens": ["Milch"]}]}]}
    ]}"#;

    #[test]
    fn test_load_persists_raw_text() {
        let mut session = Session::new(MemoryStore::new());
        let outcome = session.handle(Command::LoadCatalog(BAKERY.to_string()));

        assert_eq!(
            outcome,
            Outcome::CatalogLoaded {
                shape: CatalogShape::ProductsField,
                products: 2,
                persisted: true
            }
        );
        assert_eq!(session.state().status.peek(), Some(messages::LOADED));
        assert_eq!(session.store().load().expect("load").as_deref(), Some(BAKERY));
        assert_eq!(session.state().index().as_slice(), ["Ei", "Gluten", "Milch"]);
    }

    #[test]
    fn test_parse_failure_keeps_state() {
        let mut session = Session::new(MemoryStore::new());
        session.handle(Command::LoadCatalog(BAKERY.to_string()));

        let message = match session.handle(Command::LoadCatalog("{not valid".to_string())) {
            Outcome::ParseFailed(message) => message,
            other => panic!("expected parse failure, got {other:?}"),
        };
        assert!(!message.is_empty());
        assert_eq!(session.state().catalog().product_count(), 2);
        assert_eq!(session.store().load().expect("load").as_deref(), Some(BAKERY));
        let status = session.state().status.peek().expect("status");
        assert!(status.starts_with("Fehler beim Parsen der JSON: "));
        assert_eq!(session.state().status.level(), StatusLevel::Error);
    }

    #[test]
    fn test_disabled_storage_still_loads() {
        let mut session = Session::new(MemoryStore::with_limits(StoreLimits::disabled()));
        let outcome = session.handle(Command::LoadCatalog(BAKERY.to_string()));

        assert!(matches!(outcome, Outcome::CatalogLoaded { persisted: false, .. }));
        assert_eq!(session.state().catalog().product_count(), 2);
        assert_eq!(session.state().status.level(), StatusLevel::Warning);
        assert!(
            session
                .state()
                .status
                .peek()
                .is_some_and(|s| s.starts_with("JSON geladen, aber nicht lokal gespeichert"))
        );
    }

    /// Store that keeps its data but cannot delete it.
    struct StickyStore(MemoryStore);

    impl KeyValueStore for StickyStore {
        fn get(&self, key: &str) -> crate::Result<Option<String>> {
            self.0.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> crate::Result<()> {
            self.0.set(key, value)
        }

        fn remove(&mut self, key: &str) -> crate::Result<()> {
            Err(crate::AllergenError::storage(
                key,
                crate::error::StorageErrorKind::WriteFailed("read-only".to_string()),
            ))
        }

        fn backend_name(&self) -> &'static str {
            "sticky"
        }
    }

    #[test]
    fn test_failed_clear_is_reported() {
        let mut session = Session::new(StickyStore(MemoryStore::new()));
        session.handle(Command::LoadCatalog(BAKERY.to_string()));

        assert_eq!(session.handle(Command::ClearCatalog), Outcome::CatalogCleared);
        assert_eq!(session.state().catalog().product_count(), 0);
        assert_eq!(session.state().status.level(), StatusLevel::Warning);
        assert!(
            session
                .state()
                .status
                .peek()
                .is_some_and(|s| s.starts_with("Lokale Daten konnten nicht gelöscht werden: "))
        );
        assert!(session.store().load().expect("load").is_some());
    }

    #[test]
    fn test_restore_and_clear() {
        let mut store = MemoryStore::new();
        store.set(crate::storage::STORAGE_KEY, BAKERY).expect("seed");
        let mut session = Session::new(store);

        assert_eq!(
            session.handle(Command::RestorePersisted),
            Outcome::CatalogRestored { products: 2 }
        );
        assert_eq!(session.state().status.peek(), Some(messages::RESTORED));

        session.handle(Command::ToggleAllergen("Gluten".to_string()));
        assert_eq!(session.handle(Command::ClearCatalog), Outcome::CatalogCleared);
        assert!(session.state().catalog().is_empty());
        assert!(session.state().selection.is_empty());
        assert_eq!(session.state().status.peek(), Some(messages::CLEARED));
        assert_eq!(session.handle(Command::RestorePersisted), Outcome::NothingPersisted);
    }

    #[test]
    fn test_corrupt_persisted_data_is_only_logged() {
        let mut store = MemoryStore::new();
        store.set(crate::storage::STORAGE_KEY, "{oops").expect("seed");
        let mut session = Session::new(store);

        assert!(session.handle(Command::RestorePersisted).is_failure());
        assert!(!session.state().status.has_message());
    }

    #[test]
    fn test_read_failure() {
        let mut session = Session::new(MemoryStore::new());
        let outcome = session.handle(Command::LoadFile(PathBuf::from("/nonexistent/katalog.json")));
        assert!(matches!(outcome, Outcome::ReadFailed(_)));
        assert_eq!(session.state().status.peek(), Some(messages::READ_FAILED));
    }

    #[test]
    fn test_selection_and_mode() {
        let mut session = Session::new(MemoryStore::new());
        session.handle(Command::LoadCatalog(BAKERY.to_string()));

        assert_eq!(
            session.handle(Command::ToggleAllergen("Ei".to_string())),
            Outcome::SelectionChanged { selected: true }
        );
        let suitable: Vec<_> = session
            .state()
            .visible_products()
            .iter()
            .map(|p| p.name.clone())
            .collect();
        assert_eq!(suitable, vec!["Brot"]);

        session.handle(Command::SetMode(FilterMode::Contains));
        let contains: Vec<_> = session
            .state()
            .visible_products()
            .iter()
            .map(|p| p.name.clone())
            .collect();
        assert_eq!(contains, vec!["Kuchen"]);

        session.handle(Command::SetSearch("k1".to_string()));
        assert_eq!(session.state().lookup().allergens(), ["Ei", "Milch"]);
    }
}
