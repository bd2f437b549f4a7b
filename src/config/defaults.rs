//! Default values for allergen-tools configuration.

use super::types::{ShellConfig, StorageConfig, TuiConfig};
use crate::shell::AssetManifest;

/// Default HTTP timeout for shell asset fetches, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Default TUI tick rate in milliseconds.
pub const DEFAULT_TICK_RATE_MS: u64 = 250;

/// Default lifetime of a TUI status message, in seconds.
pub const DEFAULT_STATUS_TIMEOUT_SECS: u64 = 6;

/// Themes the TUI knows.
pub const THEMES: &[&str] = &["dark", "light", "high-contrast"];

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            persist: true,
            max_bytes: None,
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            manifest: AssetManifest::default(),
            cache_dir: None,
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            offline: false,
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: THEMES[0].to_string(),
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            status_timeout_secs: DEFAULT_STATUS_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.storage.persist);
        assert_eq!(config.shell.manifest.version, "allergen-app-v1");
        assert_eq!(config.shell.timeout().as_secs(), 30);
        assert_eq!(config.tui.theme, "dark");
        assert_eq!(config.tui.tick_rate().as_millis(), 250);
    }
}
