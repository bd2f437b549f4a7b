//! Application state owned by the host.

use super::status::StatusMessage;
use crate::filter::{self, ProductLookup};
use crate::model::{AllergenIndex, Catalog, FilterMode, Product, Selection};

/// Everything the viewer renders from.
///
/// The catalog and its index only change together through
/// [`AppState::replace_catalog`] and [`AppState::reset`].
#[derive(Debug, Clone, Default)]
pub struct AppState {
    catalog: Catalog,
    index: AllergenIndex,
    pub selection: Selection,
    pub mode: FilterMode,
    /// Product lookup query
    pub search: String,
    pub status: StatusMessage,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn index(&self) -> &AllergenIndex {
        &self.index
    }

    /// Install a new catalog, rebuild the index and drop selected labels
    /// the new catalog no longer has.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        self.index = AllergenIndex::build(&catalog);
        self.catalog = catalog;
        self.selection.retain_indexed(&self.index);
    }

    /// Back to an empty catalog with nothing selected.
    pub fn reset(&mut self) {
        self.catalog = Catalog::empty();
        self.index = AllergenIndex::empty();
        self.selection.clear();
        self.status.clear();
    }

    /// Products visible under the current selection and mode.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        filter::filter(&self.catalog, &self.selection, self.mode)
    }

    /// Result of looking up the current search query.
    #[must_use]
    pub fn lookup(&self) -> ProductLookup<'_> {
        filter::lookup(&self.catalog, &self.search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::parse_catalog_str;

    fn catalog(json: &str) -> Catalog {
        parse_catalog_str(json).expect("valid json").catalog
    }

    #[test]
    fn test_replace_prunes_selection() {
        let mut state = AppState::new();
        state.replace_catalog(catalog(
            r#"[{"name": "A", "components": [{"ingredients": [{"allergens": ["Ei", "Milch"]}]}]}]"#,
        ));
        state.selection.toggle("Ei");
        state.selection.toggle("Milch");

        state.replace_catalog(catalog(
            r#"[{"name": "B", "components": [{"ingredients": [{"allergens": ["Milch"]}]}]}]"#,
        ));
        assert_eq!(state.selection.iter().collect::<Vec<_>>(), vec!["Milch"]);
        assert_eq!(state.index().as_slice(), ["Milch"]);
    }

    #[test]
    fn test_reset() {
        let mut state = AppState::new();
        state.replace_catalog(catalog(r#"[{"name": "A", "components": [{"ingredients": [{"allergen": "Ei"}]}]}]"#));
        state.selection.toggle("Ei");
        state.status.info("geladen");
        state.reset();

        assert!(state.catalog().is_empty());
        assert!(state.index().is_empty());
        assert!(state.selection.is_empty());
        assert!(!state.status.has_message());
    }

    #[test]
    fn test_lookup_uses_search() {
        let mut state = AppState::new();
        state.replace_catalog(catalog(r#"[{"id": "x1", "name": "Brot"}]"#));
        assert_eq!(state.lookup(), ProductLookup::NoQuery);
        state.search = "BROT".to_string();
        assert!(state.lookup().is_found());
    }
}
