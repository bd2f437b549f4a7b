//! Allergen filtering and product lookup.
//!
//! Filtering never reorders: the visible products are always a subsequence
//! of the catalog. For a non-empty selection the two modes partition the
//! catalog, so every product is visible in exactly one of them.

mod lookup;

pub use lookup::{ProductLookup, find_product, lookup};

use crate::model::{Catalog, FilterMode, Product, Selection};

/// Whether any ingredient of `product` carries a selected allergen.
#[must_use]
pub fn matches(product: &Product, selection: &Selection) -> bool {
    product
        .ingredients()
        .any(|ingredient| ingredient.has_any(|label| selection.contains(label)))
}

/// The products visible for `selection` under `mode`, in catalog order.
///
/// An empty selection shows every product regardless of mode.
#[must_use]
pub fn filter<'a>(
    catalog: &'a Catalog,
    selection: &Selection,
    mode: FilterMode,
) -> Vec<&'a Product> {
    if selection.is_empty() {
        return catalog.products.iter().collect();
    }
    catalog
        .products
        .iter()
        .filter(|product| match mode {
            FilterMode::Contains => matches(product, selection),
            FilterMode::Suitable => !matches(product, selection),
        })
        .collect()
}
