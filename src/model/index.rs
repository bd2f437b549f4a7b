//! Allergen index derived from a catalog.
//!
//! The index is the sorted, deduplicated set of every allergen label that
//! appears anywhere in a [`Catalog`]. It is never stored on its own; callers
//! rebuild it whenever the catalog changes.
//!
//! # Example
//!
//! ```ignore
//! use allergen_tools::model::AllergenIndex;
//!
//! let parsed = parse_catalog_str(&text)?;
//! let index = AllergenIndex::build(&parsed.catalog);
//! for label in index.iter() {
//!     println!("{label}");
//! }
//! ```

use super::Catalog;
use super::collation::sort_german;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Sorted, distinct allergen labels of a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[must_use]
pub struct AllergenIndex {
    labels: Vec<String>,
}

impl AllergenIndex {
    /// Build the index from a catalog.
    ///
    /// Labels keep their exact spelling; `"Gluten"` and `"gluten"` are two
    /// entries. The result is ordered by German collation.
    pub fn build(catalog: &Catalog) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut labels: Vec<String> = catalog
            .allergen_labels()
            .filter(|label| seen.insert(*label))
            .map(str::to_string)
            .collect();
        sort_german(&mut labels);
        Self { labels }
    }

    /// An empty index.
    pub const fn empty() -> Self {
        Self { labels: Vec::new() }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&str> {
        self.labels.get(position).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.labels
    }
}

impl<'a> IntoIterator for &'a AllergenIndex {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Component, Ingredient, Product};

    fn product(id: &str, allergens: &[&[&str]]) -> Product {
        Product {
            id: id.to_string(),
            name: id.to_string(),
            components: vec![Component {
                name: "Komponente 1".to_string(),
                ingredients: allergens
                    .iter()
                    .enumerate()
                    .map(|(i, labels)| Ingredient {
                        name: format!("Zutat {}", i + 1),
                        allergens: labels.iter().map(|l| (*l).to_string()).collect(),
                    })
                    .collect(),
            }],
        }
    }

    #[test]
    fn test_build_dedups_and_sorts() {
        let catalog = Catalog::new(vec![
            product("a", &[&["Milch", "Gluten"], &["Ei"]]),
            product("b", &[&["Gluten"], &["Äpfel", "Sellerie"]]),
        ]);
        let index = AllergenIndex::build(&catalog);
        assert_eq!(
            index.as_slice(),
            &["Äpfel", "Ei", "Gluten", "Milch", "Sellerie"]
        );
    }

    #[test]
    fn test_case_sensitive_identity() {
        let catalog = Catalog::new(vec![product("a", &[&["Gluten", "gluten", " Gluten"]])]);
        let index = AllergenIndex::build(&catalog);
        assert_eq!(index.len(), 3);
        assert!(index.contains("gluten"));
        assert!(index.contains(" Gluten"));
    }

    #[test]
    fn test_empty_catalog() {
        let index = AllergenIndex::build(&Catalog::empty());
        assert!(index.is_empty());
        assert_eq!(index, AllergenIndex::empty());
    }

    #[test]
    fn test_order_independent() {
        let a = product("a", &[&["Senf"], &["Soja"]]);
        let b = product("b", &[&["Erdnuss", "Senf"]]);
        let forward = AllergenIndex::build(&Catalog::new(vec![a.clone(), b.clone()]));
        let backward = AllergenIndex::build(&Catalog::new(vec![b, a]));
        assert_eq!(forward, backward);
    }
}
