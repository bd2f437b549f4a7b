//! Coercion of product-like JSON entries into the canonical model.
//!
//! Normalization never fails. Missing or unusable fields fall back to
//! positional defaults (`p_<idx>`, `Produkt <n>`, `Komponente <n>`,
//! `Zutat <n>`), and non-array collections become empty.

use super::shape::{CatalogShape, locate_products};
use super::truthy;
use crate::model::{Catalog, Component, Ingredient, Product};
use serde_json::Value;

/// Normalize arbitrary JSON into a [`Catalog`].
#[must_use]
pub fn normalize(raw: &Value) -> Catalog {
    normalize_with_shape(raw).0
}

/// Normalize arbitrary JSON, also reporting which input shape was used.
#[must_use]
pub fn normalize_with_shape(raw: &Value) -> (Catalog, CatalogShape) {
    let (shape, entries) = locate_products(raw);
    let products = entries
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| normalize_product(entry, idx))
        .collect();
    (Catalog::new(products), shape)
}

fn normalize_product(entry: &Value, idx: usize) -> Product {
    Product {
        id: text_field(entry, "id").unwrap_or_else(|| format!("p_{idx}")),
        name: text_field(entry, "name").unwrap_or_else(|| format!("Produkt {}", idx + 1)),
        components: array_field(entry, "components")
            .iter()
            .enumerate()
            .map(|(ci, c)| normalize_component(c, ci))
            .collect(),
    }
}

fn normalize_component(entry: &Value, ci: usize) -> Component {
    Component {
        name: text_field(entry, "name").unwrap_or_else(|| format!("Komponente {}", ci + 1)),
        ingredients: array_field(entry, "ingredients")
            .iter()
            .enumerate()
            .map(|(ii, i)| normalize_ingredient(i, ii))
            .collect(),
    }
}

fn normalize_ingredient(entry: &Value, ii: usize) -> Ingredient {
    let allergens = match entry.get("allergens") {
        Some(Value::Array(labels)) => labels.iter().filter_map(label_text).collect(),
        _ => entry
            .get("allergen")
            .filter(|v| truthy(v))
            .and_then(label_text)
            .into_iter()
            .collect(),
    };

    Ingredient {
        name: text_field(entry, "name").unwrap_or_else(|| format!("Zutat {}", ii + 1)),
        allergens,
    }
}

/// A truthy scalar field rendered as text.
///
/// Returns `None` for missing, falsy (`null`, `false`, `0`, `""`) and
/// structured (array/object) values.
fn text_field(entry: &Value, key: &str) -> Option<String> {
    let value = entry.get(key)?;
    if !truthy(value) {
        return None;
    }
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(_) => Some("true".to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// An allergen label as text; labels are kept verbatim.
fn label_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// The array stored under `key`, or an empty slice.
fn array_field<'a>(entry: &'a Value, key: &str) -> &'a [Value] {
    match entry.get(key) {
        Some(Value::Array(items)) => items,
        _ => &[],
    }
}
