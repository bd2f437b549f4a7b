//! Canonical data model for allergen catalogs.
//!
//! Every accepted input shape is normalized into [`Catalog`] before any
//! filtering or rendering happens. The [`AllergenIndex`] is derived from a
//! catalog and must be rebuilt whenever the catalog changes:
//!
//! ```ignore
//! let parsed = parse_catalog_str(&text)?;
//! let index = AllergenIndex::build(&parsed.catalog);
//! ```

mod catalog;
pub mod collation;
mod index;
mod selection;

pub use catalog::*;
pub use index::*;
pub use selection::*;
