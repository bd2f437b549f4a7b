//! Configuration module for allergen-tools.
//!
//! This module provides:
//! - Type-safe configuration structures with defaults
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Configuration File
//!
//! Place a `.allergen-tools.yaml` file in your project root or
//! `~/.config/allergen-tools/`:
//!
//! ```yaml
//! filter:
//!   mode: contains
//! shell:
//!   origin: https://allergene.example
//!   version: allergen-app-v2
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_STATUS_TIMEOUT_SECS, DEFAULT_TICK_RATE_MS, THEMES,
};
pub use types::{
    AppConfig, AppConfigBuilder, FilterConfig, OutputConfig, ShellConfig, StorageConfig,
    TuiConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    ConfigFileError, discover_config_file, generate_example_config, generate_full_example_config,
    load_config_file, load_or_default,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.allergen-tools.yaml` config files. It can be used by editors for
/// validation and autocompletion.
pub fn generate_json_schema() -> crate::error::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    Ok(serde_json::to_string_pretty(&schema)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema().expect("schema");
        for section in ["storage", "filter", "output", "shell", "tui"] {
            assert!(schema.contains(&format!("\"{section}\"")), "missing {section}");
        }
    }
}
