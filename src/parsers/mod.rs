//! Catalog parsing and normalization.
//!
//! Catalog files have no declared schema. Any JSON document is accepted and
//! coerced into a [`Catalog`](crate::model::Catalog) on a best-effort basis;
//! the only hard failure is text that is not JSON at all.
//!
//! ```no_run
//! use allergen_tools::parsers::parse_catalog_str;
//!
//! let parsed = parse_catalog_str(r#"[{"name": "Brot"}]"#).unwrap();
//! assert_eq!(parsed.catalog.products[0].id, "p_0");
//! ```

mod normalize;
mod shape;

pub use normalize::{normalize, normalize_with_shape};
pub use shape::{CatalogShape, locate_products};

use crate::error::{ErrorContext, Result};
use crate::model::Catalog;
use serde_json::Value;
use std::path::Path;

/// A parsed catalog together with the text it came from.
#[derive(Debug, Clone)]
pub struct ParsedCatalog {
    /// The normalized catalog
    pub catalog: Catalog,
    /// Which input shape the products were taken from
    pub shape: CatalogShape,
    /// The original JSON text, as persisted
    pub raw: String,
}

impl ParsedCatalog {
    #[must_use]
    pub fn into_parts(self) -> (Catalog, String) {
        (self.catalog, self.raw)
    }
}

/// Parse JSON text and normalize it into a catalog.
///
/// Malformed JSON yields a parse error carrying the parser's message.
pub fn parse_catalog_str(text: &str) -> Result<ParsedCatalog> {
    let value: Value = serde_json::from_str(text)?;
    let (catalog, shape) = normalize_with_shape(&value);
    tracing::debug!(
        products = catalog.product_count(),
        shape = %shape,
        "Normalized catalog"
    );
    Ok(ParsedCatalog {
        catalog,
        shape,
        raw: text.to_string(),
    })
}

/// Read a catalog file as UTF-8 and parse it.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn parse_catalog_file(path: &Path) -> Result<ParsedCatalog> {
    let text = read_catalog_text(path)?;
    parse_catalog_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Read a catalog file as UTF-8 text with lossy decoding.
pub fn read_catalog_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| crate::error::AllergenError::io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Truthiness of a JSON value for field presence checks.
///
/// `null`, `false`, `0`, `NaN` and `""` are falsy; every array and object,
/// even an empty one, is truthy.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthy() {
        assert!(!truthy(&json!(null)));
        assert!(!truthy(&json!(false)));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!(0.0)));
        assert!(!truthy(&json!("")));
        assert!(truthy(&json!([])));
        assert!(truthy(&json!({})));
        assert!(truthy(&json!("0")));
        assert!(truthy(&json!(-1)));
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = parse_catalog_str("{not valid").expect_err("should fail");
        let message = err.json_message().expect("json parse error");
        assert!(message.contains("line 1"), "unexpected message: {message}");
    }

    #[test]
    fn test_parse_keeps_raw_text() {
        let text = r#"{"products": [{"name": "Brot"}]}"#;
        let parsed = parse_catalog_str(text).expect("parse");
        assert_eq!(parsed.raw, text);
        assert_eq!(parsed.shape, CatalogShape::ProductsField);
    }

    #[test]
    fn test_parse_file_lossy_utf8() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("catalog.json");
        let mut bytes = br#"[{"name": "Br"#.to_vec();
        bytes.push(0xFF);
        bytes.extend_from_slice(br#"t"}]"#);
        std::fs::write(&path, bytes).expect("write");

        let parsed = parse_catalog_file(&path).expect("parse");
        assert_eq!(parsed.catalog.products[0].name, "Br\u{FFFD}t");
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_catalog_file(Path::new("/nonexistent/catalog.json")).expect_err("missing");
        assert!(matches!(err, crate::error::AllergenError::Io { .. }));
    }
}
