//! Core catalog data structures.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// Normalized product catalog - the canonical in-memory model.
///
/// A catalog is rebuilt in full every time new JSON is loaded; it is never
/// merged incrementally with a previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    /// Products in input order
    pub products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from already-normalized products.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Create an empty catalog.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// Total number of ingredients across all products and components.
    #[must_use]
    pub fn ingredient_count(&self) -> usize {
        self.products
            .iter()
            .flat_map(|p| &p.components)
            .map(|c| c.ingredients.len())
            .sum()
    }

    /// Iterate over every allergen label, in document order, duplicates included.
    pub fn allergen_labels(&self) -> impl Iterator<Item = &str> {
        self.products.iter().flat_map(Product::allergen_labels)
    }

    /// Content hash of the normalized catalog, for quick equality checks.
    #[must_use]
    pub fn content_hash(&self) -> u64 {
        serde_json::to_vec(self).map_or(0, |bytes| xxh3_64(&bytes))
    }
}

/// A product with its components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Caller-supplied id, or `p_<index>` when absent
    pub id: String,
    /// Display name, or `Produkt <n>` when absent
    pub name: String,
    /// Components in input order
    pub components: Vec<Component>,
}

impl Product {
    /// Iterate over the allergen labels of every ingredient of this product.
    pub fn allergen_labels(&self) -> impl Iterator<Item = &str> {
        self.components
            .iter()
            .flat_map(|c| &c.ingredients)
            .flat_map(|i| i.allergens.iter().map(String::as_str))
    }

    /// Iterate over every ingredient of this product.
    pub fn ingredients(&self) -> impl Iterator<Item = &Ingredient> {
        self.components.iter().flat_map(|c| &c.ingredients)
    }
}

/// A named part of a product (e.g. dough, filling).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub ingredients: Vec<Ingredient>,
}

/// An ingredient and the allergens it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    /// Allergen labels, verbatim (case-sensitive, untrimmed)
    pub allergens: Vec<String>,
}

impl Ingredient {
    /// Check whether this ingredient carries any of the given labels.
    pub fn has_any(&self, mut contains: impl FnMut(&str) -> bool) -> bool {
        self.allergens.iter().any(|a| contains(a))
    }
}
