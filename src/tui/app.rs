//! `ViewApp` state and the actions bound to keys.

use super::state::{ListNavigation, ListState};
use super::theme::{Theme, set_theme};
use super::viewmodel::{FilterState, LookupInput, OverlayKind, OverlayState};
use crate::app::{AppState, Command, Outcome, StatusMessage};
use crate::config::TuiConfig;
use crate::model::{FilterMode, Product};
use crate::pipeline::CliSession;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

/// Which panel receives navigation keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusPanel {
    #[default]
    Allergens,
    Products,
}

impl FocusPanel {
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Allergens => Self::Products,
            Self::Products => Self::Allergens,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Allergens => "allergens",
            Self::Products => "products",
        }
    }
}

/// Interactive catalog viewer.
pub struct ViewApp {
    session: CliSession,
    /// File reloaded by `r`; without one, `r` restores the persisted catalog
    source: Option<PathBuf>,
    pub focus: FocusPanel,
    pub allergen_list: ListState,
    pub product_list: ListState,
    /// Catalog positions of products whose detail table is open
    pub expanded: HashSet<usize>,
    /// Show the normalized JSON under open detail tables
    pub show_raw: bool,
    pub mode_filter: FilterState<FilterMode>,
    pub lookup: LookupInput,
    pub overlay: OverlayState,
    pub should_quit: bool,
    pub tick: u64,
}

impl ViewApp {
    /// Wrap a loaded session.
    pub fn new(mut session: CliSession, source: Option<PathBuf>, config: &TuiConfig) -> Self {
        set_theme(Theme::from_name(&config.theme));

        // Carry the load message over into a status line that expires
        if config.status_timeout_secs > 0 {
            let status = &mut session.state_mut().status;
            let level = status.level();
            let pending = status.take();
            *status =
                StatusMessage::with_auto_clear(Duration::from_secs(config.status_timeout_secs));
            if let Some(message) = pending {
                status.set(level, message);
            }
        }

        let mode = session.state().mode;
        let mut app = Self {
            session,
            source,
            focus: FocusPanel::default(),
            allergen_list: ListState::new(),
            product_list: ListState::new(),
            expanded: HashSet::new(),
            show_raw: false,
            mode_filter: FilterState::with_filter(mode),
            lookup: LookupInput::new(),
            overlay: OverlayState::new(),
            should_quit: false,
            tick: 0,
        };
        app.sync_lists();
        app
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        self.session.state()
    }

    pub const fn state_mut(&mut self) -> &mut AppState {
        self.session.state_mut()
    }

    /// Products visible under the current selection and mode.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        self.state().visible_products()
    }

    /// The allergen under the cursor.
    #[must_use]
    pub fn current_allergen(&self) -> Option<&str> {
        self.state().index().get(self.allergen_list.selected)
    }

    /// The product under the cursor.
    #[must_use]
    pub fn current_product(&self) -> Option<&Product> {
        self.visible_products()
            .get(self.product_list.selected)
            .copied()
    }

    #[must_use]
    pub fn is_expanded(&self, product: &Product) -> bool {
        self.catalog_position(product)
            .is_some_and(|position| self.expanded.contains(&position))
    }

    /// Position of a product borrowed from the current catalog.
    fn catalog_position(&self, product: &Product) -> Option<usize> {
        self.state()
            .catalog()
            .products
            .iter()
            .position(|p| std::ptr::eq(p, product))
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggle();
    }

    pub fn select_next(&mut self) {
        self.focused_list().select_next();
    }

    pub fn select_prev(&mut self) {
        self.focused_list().select_prev();
    }

    pub fn page_down(&mut self) {
        self.focused_list().page_down();
    }

    pub fn page_up(&mut self) {
        self.focused_list().page_up();
    }

    pub fn go_first(&mut self) {
        self.focused_list().go_first();
    }

    pub fn go_last(&mut self) {
        self.focused_list().go_last();
    }

    /// Toggle the allergen under the cursor in or out of the selection.
    pub fn toggle_current_allergen(&mut self) {
        let Some(label) = self.current_allergen().map(str::to_string) else {
            return;
        };
        self.session.handle(Command::ToggleAllergen(label));
        self.sync_lists();
    }

    /// Switch between "Zum Verzehr geeignet" and "Enthält Allergene".
    pub fn cycle_mode(&mut self) {
        self.mode_filter.next();
        self.session.handle(Command::SetMode(self.mode_filter.current));
        self.sync_lists();
    }

    /// Open or close the detail table of the product under the cursor.
    pub fn toggle_current_product(&mut self) {
        let Some(position) = self
            .current_product()
            .and_then(|product| self.catalog_position(product))
        else {
            return;
        };
        if !self.expanded.remove(&position) {
            self.expanded.insert(position);
        }
    }

    /// Show or hide the normalized JSON of open products.
    pub fn toggle_raw(&mut self) {
        self.show_raw = !self.show_raw;
    }

    pub fn toggle_help(&mut self) {
        self.overlay.toggle(OverlayKind::Help);
    }

    /// Open the lookup overlay, keeping the previous query.
    pub fn start_lookup(&mut self) {
        self.overlay.show(OverlayKind::Lookup);
    }

    pub fn lookup_push(&mut self, c: char) {
        self.lookup.push_char(c);
        self.update_lookup();
    }

    pub fn lookup_pop(&mut self) {
        self.lookup.pop_char();
        self.update_lookup();
    }

    /// Close the overlay and forget the query.
    pub fn cancel_lookup(&mut self) {
        self.lookup.clear();
        self.update_lookup();
        self.overlay.close();
    }

    /// Close the overlay, keeping the result in the status bar.
    pub fn submit_lookup(&mut self) {
        self.overlay.close();
    }

    fn update_lookup(&mut self) {
        let query = self.lookup.trimmed().to_string();
        self.session.handle(Command::SetSearch(query));
    }

    /// Forget the catalog in memory and on disk.
    pub fn clear_data(&mut self) {
        self.session.handle(Command::ClearCatalog);
        self.expanded.clear();
        self.sync_lists();
    }

    /// Read the source file again, or restore the persisted catalog.
    ///
    /// Open detail tables stay open when the catalog content did not change.
    pub fn reload(&mut self) -> Outcome {
        let before = self.state().catalog().content_hash();
        let command = self
            .source
            .clone()
            .map_or(Command::RestorePersisted, Command::LoadFile);
        let outcome = self.session.handle(command);
        match &outcome {
            Outcome::NothingPersisted => {
                self.state_mut().status.warn(crate::app::messages::NO_ALLERGENS);
            }
            Outcome::RestoreFailed(reason) => {
                self.state_mut().status.error(reason.clone());
            }
            _ => {}
        }
        if self.state().catalog().content_hash() != before {
            self.expanded.clear();
        }
        self.sync_lists();
        outcome
    }

    /// Keep both cursors within their lists after the data changed.
    pub fn sync_lists(&mut self) {
        let allergens = self.state().index().len();
        let products = self.visible_products().len();
        self.allergen_list.resize(allergens);
        self.product_list.resize(products);
    }

    const fn focused_list(&mut self) -> &mut ListState {
        match self.focus {
            FocusPanel::Allergens => &mut self.allergen_list,
            FocusPanel::Products => &mut self.product_list,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::app::Session;
    use crate::storage::{KeyValueStore, MemoryStore};

    pub(crate) const BAKERY: &str = r#"{"products": [
        {"id": "b1", "name": "Brot", "components": [{"name": "Teig",
            "ingredients": [{"name": "Mehl", "allergens": ["Gluten"]}]}]},
        {"id": "o1", "name": "Obstsalat", "components": [{"name": "Obst",
            "ingredients": [{"name": "Apfel", "allergens": []}]}]},
        {"id": "p1", "name": "Pudding", "components": [{"name": "Creme",
            "ingredients": [{"name": "Milch", "allergens": ["Milch"]}, {"name": "Ei", "allergens": ["Ei"]}]}]}
    ]}"#;

    pub(crate) fn bakery_app() -> ViewApp {
        let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        let mut session = Session::new(store);
        session.handle(Command::LoadCatalog(BAKERY.to_string()));
        ViewApp::new(session, None, &TuiConfig::default())
    }

    fn visible_names(app: &ViewApp) -> Vec<String> {
        app.visible_products().iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_new_app_shows_everything() {
        let app = bakery_app();
        assert_eq!(app.allergen_list.total, 3);
        assert_eq!(app.product_list.total, 3);
        assert_eq!(app.current_allergen(), Some("Ei"));
        assert_eq!(
            app.state().status.peek(),
            Some(crate::app::messages::LOADED)
        );
    }

    #[test]
    fn test_toggle_and_cycle_mode() {
        let mut app = bakery_app();
        // Index order: Ei, Gluten, Milch
        app.select_next();
        app.toggle_current_allergen();
        assert!(app.state().selection.contains("Gluten"));
        assert_eq!(visible_names(&app), vec!["Obstsalat", "Pudding"]);

        app.cycle_mode();
        assert_eq!(app.state().mode, FilterMode::Contains);
        assert_eq!(visible_names(&app), vec!["Brot"]);
        assert_eq!(app.product_list.total, 1);

        app.toggle_current_allergen();
        assert!(app.state().selection.is_empty());
        assert_eq!(app.product_list.total, 3);
    }

    #[test]
    fn test_expand_product() {
        let mut app = bakery_app();
        app.toggle_focus();
        app.select_next();
        app.toggle_current_product();
        let product = app.current_product().expect("product");
        assert_eq!(product.name, "Obstsalat");
        assert!(app.is_expanded(product));
        app.toggle_current_product();
        assert!(!app.is_expanded(app.current_product().expect("product")));
    }

    #[test]
    fn test_expand_one_of_duplicate_ids() {
        let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        let mut session = Session::new(store);
        session.handle(Command::LoadCatalog(
            r#"[{"id": "x", "name": "Brot"}, {"id": "x", "name": "Brötchen"}]"#.to_string(),
        ));
        let mut app = ViewApp::new(session, None, &TuiConfig::default());
        app.toggle_focus();
        app.toggle_current_product();

        let products = app.visible_products();
        assert!(app.is_expanded(products[0]));
        assert!(!app.is_expanded(products[1]));
    }

    #[test]
    fn test_lookup_typing() {
        let mut app = bakery_app();
        app.start_lookup();
        for c in "pudding".chars() {
            app.lookup_push(c);
        }
        assert!(app.overlay.is_showing(OverlayKind::Lookup));
        assert_eq!(app.state().lookup().allergens(), ["Milch", "Ei"]);

        app.cancel_lookup();
        assert!(!app.overlay.has_overlay());
        assert!(app.state().search.is_empty());
    }

    #[test]
    fn test_clear_then_reload_without_source() {
        let mut app = bakery_app();
        app.clear_data();
        assert_eq!(app.allergen_list.total, 0);
        assert_eq!(app.product_list.total, 0);
        assert_eq!(
            app.state().status.peek(),
            Some(crate::app::messages::CLEARED)
        );

        assert_eq!(app.reload(), Outcome::NothingPersisted);
        assert_eq!(app.product_list.total, 0);
    }

    #[test]
    fn test_reload_restores_persisted() {
        let mut app = bakery_app();
        app.select_next();
        app.toggle_current_allergen();
        app.toggle_focus();
        app.toggle_current_product();
        assert_eq!(app.expanded.len(), 1);

        let outcome = app.reload();
        assert_eq!(outcome, Outcome::CatalogRestored { products: 3 });
        assert!(app.state().selection.contains("Gluten"));
        assert_eq!(app.expanded.len(), 1);
    }
}
