//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".allergen-tools.yaml",
    ".allergen-tools.yml",
    "allergen-tools.yaml",
    "allergen-tools.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/allergen-tools/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path
        && path.exists()
    {
        return Some(path.to_path_buf());
    }

    if let Ok(cwd) = std::env::current_dir()
        && let Some(path) = find_config_in_dir(&cwd)
    {
        return Some(path);
    }

    if let Some(git_root) = find_git_root()
        && let Some(path) = find_config_in_dir(&git_root)
    {
        return Some(path);
    }

    if let Some(dir) = user_config_dir()
        && let Some(path) = find_config_in_dir(&dir)
    {
        return Some(path);
    }

    if let Some(home) = dirs::home_dir()
        && let Some(path) = find_config_in_dir(&home)
    {
        return Some(path);
    }

    None
}

/// The per-user config directory, e.g. `~/.config/allergen-tools`.
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("allergen-tools"))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    // An empty file is a valid, all-default config
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    Ok(serde_yaml::from_str(&content)?)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence
    /// wherever it differs from the defaults.
    pub fn merge(&mut self, other: &Self) {
        let defaults = Self::default();

        if other.storage.data_dir.is_some() {
            self.storage.data_dir.clone_from(&other.storage.data_dir);
        }
        if !other.storage.persist {
            self.storage.persist = false;
        }
        if other.storage.max_bytes.is_some() {
            self.storage.max_bytes = other.storage.max_bytes;
        }

        if other.filter.mode != defaults.filter.mode {
            self.filter.mode = other.filter.mode;
        }
        if !other.filter.allergens.is_empty() {
            self.filter.allergens.clone_from(&other.filter.allergens);
        }

        if other.output.format != ReportFormat::Auto {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }

        if other.shell.manifest.origin != defaults.shell.manifest.origin {
            self.shell.manifest.origin.clone_from(&other.shell.manifest.origin);
        }
        if other.shell.cache_dir.is_some() {
            self.shell.cache_dir.clone_from(&other.shell.cache_dir);
        }
        if other.shell.offline {
            self.shell.offline = true;
        }

        if other.tui.theme != defaults.tui.theme {
            self.tui.theme.clone_from(&other.tui.theme);
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# allergen-tools configuration
# Place this file at .allergen-tools.yaml in your project root or ~/.config/allergen-tools/

{}",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# allergen-tools configuration file
# =================================
#
# Place it at:
#   - .allergen-tools.yaml in your project root
#   - ~/.config/allergen-tools/allergen-tools.yaml for global config
#
# CLI arguments always override file settings.

# Persistence of the last loaded catalog
storage:
  # Storage directory (default: platform data dir)
  # data_dir: ./data
  # Keep the last catalog across runs
  persist: true
  # Reject catalogs larger than this many bytes
  # max_bytes: 5242880

# Initial filter
filter:
  # suitable: hide products with a selected allergen
  # contains: show only products with a selected allergen
  mode: suitable
  # allergens: [Gluten, Milch]

# Output configuration
output:
  # Format: auto, tui, summary, table, json
  format: auto
  # file: report.json
  no_color: false

# Offline cache of the application shell
shell:
  # Bump the version whenever an asset changes
  version: allergen-app-v1
  origin: http://localhost:8080
  base_path: ''
  assets:
    - /
    - /index.html
    - /app.js
    - /manifest.json
    - /icons/icon-192.png
    - /icons/icon-512.png
  root_document: /index.html
  # cache_dir: ./shell-cache
  timeout_secs: 30
  offline: false

# TUI configuration
tui:
  # Theme: dark, light, high-contrast
  theme: dark
  tick_rate_ms: 250
  status_timeout_secs: 6
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FilterMode;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().expect("temp dir");
        let config_path = tmp.path().join(".allergen-tools.yaml");
        std::fs::write(&config_path, "filter:\n  mode: contains\n").expect("write");

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().expect("temp dir");
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().expect("temp dir");
        let config_path = tmp.path().join("config.yaml");

        let yaml = r"
filter:
  mode: contains
  allergens: [Gluten]
shell:
  version: allergen-app-v2
  origin: https://allergene.example
tui:
  theme: light
";
        std::fs::write(&config_path, yaml).expect("write");

        let config = load_config_file(&config_path).expect("load");
        assert_eq!(config.filter.mode, FilterMode::Contains);
        assert_eq!(config.filter.allergens, vec!["Gluten"]);
        assert_eq!(config.shell.manifest.version, "allergen-app-v2");
        assert_eq!(config.shell.manifest.assets.len(), 6);
        assert_eq!(config.tui.theme, "light");
        assert!(config.storage.persist);
    }

    #[test]
    fn test_load_empty_file() {
        let tmp = TempDir::new().expect("temp dir");
        let config_path = tmp.path().join("empty.yaml");
        std::fs::write(&config_path, "").expect("write");
        assert_eq!(load_config_file(&config_path).expect("load"), AppConfig::default());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::default();
        base.tui.theme = "light".to_string();

        let overrides = AppConfig::builder()
            .mode(FilterMode::Contains)
            .persist(false)
            .output_format(ReportFormat::Json)
            .origin("https://shop.test")
            .build();
        base.merge(&overrides);

        assert_eq!(base.filter.mode, FilterMode::Contains);
        assert!(!base.storage.persist);
        assert_eq!(base.output.format, ReportFormat::Json);
        assert_eq!(base.shell.manifest.origin, "https://shop.test");
        assert_eq!(base.tui.theme, "light");
    }

    #[test]
    fn test_example_configs_parse() {
        let example = generate_example_config();
        assert!(example.contains("storage:"));
        let parsed: AppConfig = serde_yaml::from_str(&example).expect("example parses");
        assert_eq!(parsed, AppConfig::default());

        let full: AppConfig =
            serde_yaml::from_str(&generate_full_example_config()).expect("full example parses");
        assert_eq!(full, AppConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().expect("temp dir");
        let config_path = tmp.path().join("custom-config.yaml");
        let mut file = std::fs::File::create(&config_path).expect("create");
        writeln!(file, "tui:\n  theme: light").expect("write");

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }
}
