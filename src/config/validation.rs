//! Configuration validation for allergen-tools.

use super::defaults::THEMES;
use super::types::{AppConfig, OutputConfig, ShellConfig, StorageConfig, TuiConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.storage.validate());
        errors.extend(self.output.validate());
        errors.extend(self.shell.validate());
        errors.extend(self.tui.validate());
        errors
    }
}

impl Validatable for StorageConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.max_bytes == Some(0) {
            errors.push(ConfigError::new(
                "storage.max_bytes",
                "Quota must be greater than zero",
            ));
        }
        if let Some(dir) = &self.data_dir
            && dir.is_file()
        {
            errors.push(ConfigError::new(
                "storage.data_dir",
                format!("{} is a file, not a directory", dir.display()),
            ));
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(parent) = self.file.as_ref().and_then(|f| f.parent())
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            errors.push(ConfigError::new(
                "output.file",
                format!("Parent directory does not exist: {}", parent.display()),
            ));
        }
        errors
    }
}

impl Validatable for ShellConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let manifest = &self.manifest;

        let version_ok = !manifest.version.is_empty()
            && manifest
                .version
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !manifest.version.starts_with('.');
        if !version_ok {
            errors.push(ConfigError::new(
                "shell.version",
                format!(
                    "Invalid version '{}'. Use ASCII letters, digits, '-', '_' or '.'",
                    manifest.version
                ),
            ));
        }

        if !(manifest.origin.starts_with("http://") || manifest.origin.starts_with("https://")) {
            errors.push(ConfigError::new(
                "shell.origin",
                format!("Origin must start with http:// or https://, got '{}'", manifest.origin),
            ));
        }

        for asset in &manifest.assets {
            if !asset.starts_with('/') {
                errors.push(ConfigError::new(
                    "shell.assets",
                    format!("Asset path must start with '/': '{asset}'"),
                ));
            }
        }

        if !manifest.assets.contains(&manifest.root_document) {
            errors.push(ConfigError::new(
                "shell.root_document",
                format!(
                    "'{}' is not in the asset list, so offline navigation has no fallback",
                    manifest.root_document
                ),
            ));
        }

        if self.timeout_secs == 0 {
            errors.push(ConfigError::new(
                "shell.timeout_secs",
                "Timeout must be greater than zero",
            ));
        }
        errors
    }
}

impl Validatable for TuiConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !THEMES.contains(&self.theme.as_str()) {
            errors.push(ConfigError::new(
                "tui.theme",
                format!(
                    "Invalid theme '{}'. Valid options: {}",
                    self.theme,
                    THEMES.join(", ")
                ),
            ));
        }
        if !(16..=5000).contains(&self.tick_rate_ms) {
            errors.push(ConfigError::new(
                "tui.tick_rate_ms",
                format!("Tick rate must be between 16 and 5000, got {}", self.tick_rate_ms),
            ));
        }
        errors
    }
}
