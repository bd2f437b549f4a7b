//! JSON report generator.

use super::types::product_allergens;
use super::{CatalogView, ReportError, ReportFormat, ReportGenerator};
use crate::model::{FilterMode, Product};
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    pretty: bool,
}

impl JsonReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    mode: FilterMode,
    selection: Vec<&'a str>,
    allergens: &'a [String],
    total_products: usize,
    products: Vec<JsonProduct<'a>>,
}

#[derive(Serialize)]
struct JsonProduct<'a> {
    #[serde(flatten)]
    product: &'a Product,
    allergens: Vec<&'a str>,
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, view: &CatalogView<'_>) -> Result<String, ReportError> {
        let report = JsonReport {
            generated_at: Utc::now().to_rfc3339(),
            mode: view.mode,
            selection: view.selection.iter().collect(),
            allergens: view.index.as_slice(),
            total_products: view.total,
            products: view
                .products
                .iter()
                .map(|product| JsonProduct {
                    product,
                    allergens: product_allergens(product),
                })
                .collect(),
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        json.map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}
