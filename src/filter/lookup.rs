//! Product lookup by name or id.
//!
//! Lookup is exact equality after lowercasing, not a substring search. When
//! several products share a name or id the first one in catalog order wins.

use crate::model::{Catalog, Product};
use indexmap::IndexSet;

/// Result of looking up a product by free-text query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductLookup<'a> {
    /// The query was empty; nothing to show
    NoQuery,
    /// No product name or id equals the query
    NotFound,
    /// The first matching product and its distinct allergens, in first-seen order
    Found {
        product: &'a Product,
        allergens: Vec<String>,
    },
}

impl ProductLookup<'_> {
    /// The allergens found, empty unless a product matched.
    #[must_use]
    pub fn allergens(&self) -> &[String] {
        match self {
            Self::Found { allergens, .. } => allergens,
            Self::NoQuery | Self::NotFound => &[],
        }
    }

    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// Find the first product whose name or id equals `query`, ignoring case.
#[must_use]
pub fn find_product<'a>(catalog: &'a Catalog, query: &str) -> Option<&'a Product> {
    if query.is_empty() {
        return None;
    }
    let query_lower = query.to_lowercase();
    catalog.products.iter().find(|product| {
        product.name.to_lowercase() == query_lower || product.id.to_lowercase() == query_lower
    })
}

/// Look up a product and collect the allergens of all its ingredients.
#[must_use]
pub fn lookup<'a>(catalog: &'a Catalog, query: &str) -> ProductLookup<'a> {
    if query.is_empty() {
        return ProductLookup::NoQuery;
    }
    match find_product(catalog, query) {
        Some(product) => {
            let allergens: IndexSet<&str> = product.allergen_labels().collect();
            ProductLookup::Found {
                product,
                allergens: allergens.into_iter().map(str::to_string).collect(),
            }
        }
        None => ProductLookup::NotFound,
    }
}
