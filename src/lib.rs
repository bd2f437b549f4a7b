//! **Browse food allergen catalogs from loosely structured JSON.**
//!
//! `allergen-tools` reads product catalogs (products made of components made of
//! ingredients, each ingredient listing its allergens), normalizes them into a
//! fixed model and lets you filter products by allergen. The last loaded catalog
//! is persisted locally, and an asset cache keeps the application shell usable
//! offline.
//!
//! ## Core Concepts & Modules
//!
//! - **[`parsers`]**: coerces arbitrary JSON into a [`Catalog`]. Arrays, objects
//!   with a `products` field, objects keyed by product id and single products
//!   are all accepted; missing names and ids are filled in.
//! - **[`model`]**: the catalog types, the German-collated [`AllergenIndex`] and
//!   the [`Selection`] / [`FilterMode`] pair.
//! - **[`filter`]**: the visible products for a selection, and product lookup
//!   by name or id.
//! - **[`storage`]**: persists the raw catalog text under one fixed key.
//! - **[`shell`]**: the versioned asset cache and its request interception.
//! - **[`app`]**: the viewer state and the command handler that ties loading,
//!   filtering and persistence together.
//! - **[`reports`]**, **[`tui`]**, **[`cli`]**: output for humans and scripts.
//!
//! ## Getting Started
//!
//! ```
//! use allergen_tools::filter::filter;
//! use allergen_tools::{AllergenIndex, FilterMode, Selection, parse_catalog_str};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let parsed = parse_catalog_str(
//!         r#"[{"name": "Brot", "components": [{"ingredients": [{"allergens": ["Gluten"]}]}]},
//!             {"name": "Apfel"}]"#,
//!     )?;
//!     let index = AllergenIndex::build(&parsed.catalog);
//!     assert_eq!(index.as_slice(), ["Gluten"]);
//!
//!     let selection: Selection = ["Gluten"].into_iter().collect();
//!     let suitable = filter(&parsed.catalog, &selection, FilterMode::Suitable);
//!     assert_eq!(suitable[0].name, "Apfel");
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `network` (default): the `reqwest`-backed HTTP client used by the asset
//!   cache. Without it the shell can only serve what is already cached.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // TUI layout math casts between u16 and usize
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // TUI render functions are inherently long
    clippy::too_many_lines,
    clippy::fn_params_excessive_bools,
    clippy::similar_names
)]

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;
pub mod shell;
pub mod storage;
pub mod tui;

// Re-export main types for convenience
pub use app::{AppState, Command, Outcome, Session, StatusMessage};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, TuiConfig, Validatable};
pub use error::{AllergenError, ErrorContext, OptionContext, Result};
pub use model::{AllergenIndex, Catalog, Component, FilterMode, Ingredient, Product, Selection};
pub use parsers::{ParsedCatalog, normalize, parse_catalog_file, parse_catalog_str};
pub use reports::{ReportFormat, ReportGenerator};
pub use shell::{AssetCacheWorker, AssetManifest, CacheStorage, FetchOutcome, Request, Response};
pub use storage::{CatalogStore, FileStore, KeyValueStore, MemoryStore, STORAGE_KEY};

// TUI view state exports for building custom panels
pub use tui::{CycleFilter, FilterState, ListNavigation, ListState, OverlayState};
