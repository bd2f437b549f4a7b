//! Detection of where the product list lives inside loosely structured JSON.
//!
//! Uploaded catalogs come in several shapes: a bare array, a wrapper object
//! with a `products` array, an object keyed by product id, or a single
//! product object. Detection picks the first shape that applies.

use super::truthy;
use serde_json::Value;

/// The input shape the product list was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogShape {
    /// The document itself is an array of products
    Array,
    /// An object with a `products` array
    ProductsField,
    /// An object whose values are product-like objects
    KeyedValues,
    /// The document is one product (`name` and `components`)
    SingleProduct,
    /// Nothing product-like was found
    Empty,
}

impl CatalogShape {
    /// Human-readable name for this shape.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::ProductsField => "products field",
            Self::KeyedValues => "keyed object",
            Self::SingleProduct => "single product",
            Self::Empty => "empty",
        }
    }
}

impl std::fmt::Display for CatalogShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Locate the product-like entries of `raw`.
///
/// Returns the detected shape and the entries in document order.
pub fn locate_products(raw: &Value) -> (CatalogShape, Vec<&Value>) {
    if let Value::Array(items) = raw {
        return (CatalogShape::Array, items.iter().collect());
    }

    let Value::Object(map) = raw else {
        return (CatalogShape::Empty, Vec::new());
    };

    if let Some(Value::Array(items)) = map.get("products") {
        return (CatalogShape::ProductsField, items.iter().collect());
    }

    let keyed: Vec<&Value> = map.values().filter(|v| is_product_like(v)).collect();
    if !keyed.is_empty() {
        return (CatalogShape::KeyedValues, keyed);
    }

    if map.get("name").is_some_and(truthy) && map.get("components").is_some_and(truthy) {
        return (CatalogShape::SingleProduct, vec![raw]);
    }

    (CatalogShape::Empty, Vec::new())
}

/// An object value carrying a truthy `name` or `id`.
fn is_product_like(value: &Value) -> bool {
    value.as_object().is_some_and(|obj| {
        obj.get("name").is_some_and(truthy) || obj.get("id").is_some_and(truthy)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_shape() {
        let raw = json!([{"name": "Brot"}, 3]);
        let (shape, items) = locate_products(&raw);
        assert_eq!(shape, CatalogShape::Array);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_products_field_wins_over_keyed_values() {
        let raw = json!({"products": [], "extra": {"name": "Kuchen"}});
        let (shape, items) = locate_products(&raw);
        assert_eq!(shape, CatalogShape::ProductsField);
        assert!(items.is_empty());
    }

    #[test]
    fn test_non_array_products_falls_through() {
        let raw = json!({"products": {"name": "Brot"}});
        let (shape, items) = locate_products(&raw);
        assert_eq!(shape, CatalogShape::KeyedValues);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_keyed_values_keep_document_order() {
        let raw = json!({
            "z": {"name": "Zopf"},
            "meta": "ignored",
            "a": {"id": "apfelstrudel"},
            "blank": {"name": ""}
        });
        let (shape, items) = locate_products(&raw);
        assert_eq!(shape, CatalogShape::KeyedValues);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["name"], "Zopf");
        assert_eq!(items[1]["id"], "apfelstrudel");
    }

    #[test]
    fn test_single_product_shape() {
        // Scalar name and components are not objects, so the keyed scan finds nothing.
        let raw = json!({"name": "Brot", "components": [{"name": "Teig"}]});
        let (shape, items) = locate_products(&raw);
        assert_eq!(shape, CatalogShape::SingleProduct);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_scalars_are_empty() {
        for raw in [json!(null), json!(42), json!("text"), json!(true), json!({})] {
            let (shape, items) = locate_products(&raw);
            assert_eq!(shape, CatalogShape::Empty);
            assert!(items.is_empty());
        }
    }

    #[test]
    fn test_single_product_requires_truthy_components() {
        let raw = json!({"name": "Brot", "components": null});
        assert_eq!(locate_products(&raw).0, CatalogShape::Empty);
    }
}
