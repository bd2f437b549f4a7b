//! Report format selection and the data every reporter renders.

use crate::model::{AllergenIndex, Catalog, FilterMode, Product, Selection};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Auto-detect: TUI if TTY, summary otherwise
    #[default]
    Auto,
    /// Interactive TUI display
    Tui,
    /// One line per visible product
    Summary,
    /// Component and ingredient table per product
    Table,
    /// Structured JSON output
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Tui => write!(f, "tui"),
            Self::Summary => write!(f, "summary"),
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// A filtered view of a catalog, as rendered by reporters.
#[derive(Debug, Clone)]
pub struct CatalogView<'a> {
    pub mode: FilterMode,
    pub selection: &'a Selection,
    pub index: &'a AllergenIndex,
    /// Visible products in catalog order
    pub products: Vec<&'a Product>,
    /// Number of products in the whole catalog
    pub total: usize,
}

impl<'a> CatalogView<'a> {
    /// Filter `catalog` and capture everything a report needs.
    #[must_use]
    pub fn new(
        catalog: &'a Catalog,
        index: &'a AllergenIndex,
        selection: &'a Selection,
        mode: FilterMode,
    ) -> Self {
        Self {
            mode,
            selection,
            index,
            products: crate::filter::filter(catalog, selection, mode),
            total: catalog.product_count(),
        }
    }

    #[must_use]
    pub fn from_state(state: &'a crate::app::AppState) -> Self {
        Self::new(state.catalog(), state.index(), &state.selection, state.mode)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Distinct allergens of a product in first-seen order.
pub(crate) fn product_allergens(product: &Product) -> Vec<&str> {
    let set: indexmap::IndexSet<&str> = product.allergen_labels().collect();
    set.into_iter().collect()
}
