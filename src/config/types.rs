//! Configuration types for allergen-tools.

use crate::model::FilterMode;
use crate::reports::ReportFormat;
use crate::shell::AssetManifest;
use crate::storage::StoreLimits;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments are merged over the file settings with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Where and how the last catalog is persisted
    pub storage: StorageConfig,
    /// Initial filter settings
    pub filter: FilterConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Application shell asset cache
    pub shell: ShellConfig,
    /// TUI-specific configuration
    pub tui: TuiConfig,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.storage.data_dir = Some(dir.into());
        self
    }

    pub const fn persist(mut self, persist: bool) -> Self {
        self.config.storage.persist = persist;
        self
    }

    pub const fn mode(mut self, mode: FilterMode) -> Self {
        self.config.filter.mode = mode;
        self
    }

    pub fn allergens(mut self, allergens: Vec<String>) -> Self {
        self.config.filter.allergens = allergens;
        self
    }

    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.config.shell.manifest.origin = origin.into();
        self
    }

    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.shell.cache_dir = Some(dir.into());
        self
    }

    pub const fn offline(mut self, offline: bool) -> Self {
        self.config.shell.offline = offline;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// Persistence of the last loaded catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage directory (defaults to the platform data directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Keep the last loaded catalog across runs
    pub persist: bool,
    /// Reject catalogs larger than this many bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bytes: Option<usize>,
}

impl StorageConfig {
    /// Write limits for the persistent store.
    #[must_use]
    pub const fn limits(&self) -> StoreLimits {
        match self.max_bytes {
            Some(max_bytes) => StoreLimits::with_quota(max_bytes),
            None => StoreLimits {
                enabled: true,
                max_bytes: None,
            },
        }
    }

    /// Directory of the persistent store.
    #[must_use]
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(crate::pipeline::dirs::storage_dir)
    }
}

/// Initial filter settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FilterConfig {
    /// Filter mode: suitable or contains
    pub mode: FilterMode,
    /// Allergens selected on start
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allergens: Vec<String>,
}

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

/// Application shell asset cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ShellConfig {
    /// Version, origin and assets of the shell
    #[serde(flatten)]
    pub manifest: AssetManifest,
    /// Cache directory (defaults to the platform cache directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
    /// Never touch the network
    pub offline: bool,
}

impl ShellConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub fn resolved_cache_dir(&self) -> PathBuf {
        self.cache_dir
            .clone()
            .unwrap_or_else(crate::pipeline::dirs::shell_cache_dir)
    }
}

/// TUI-specific configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TuiConfig {
    /// Theme name: "dark", "light", or "high-contrast"
    pub theme: String,
    /// Event loop tick in milliseconds
    #[schemars(range(min = 16, max = 5000))]
    pub tick_rate_ms: u64,
    /// Seconds before a status message disappears (0 keeps it)
    pub status_timeout_secs: u64,
}

impl TuiConfig {
    #[must_use]
    pub const fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}
