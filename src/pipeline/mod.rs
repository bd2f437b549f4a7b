//! Shared orchestration for CLI command handlers.
//!
//! Opening the persistent store, loading a catalog into a session, building
//! the shell worker and writing reports all happen here so the handlers in
//! `cli` stay small.

mod output;
mod session;
mod shell;

pub use output::{OutputTarget, auto_detect_format, output_report, should_use_color, write_output};
pub use session::{CliSession, open_session, open_store};
pub use shell::{CliWorker, open_worker};

/// Exit codes for scripting
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// The filter or lookup matched nothing
    pub const NO_MATCHES: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 2;
}

/// Platform-specific data and cache directories
pub mod dirs {
    use std::path::PathBuf;

    const APP_DIR: &str = "allergen-tools";

    /// Default directory of the persistent catalog store
    #[must_use]
    pub fn storage_dir() -> PathBuf {
        ::dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(APP_DIR)
            .join("storage")
    }

    /// Default directory of the application shell cache
    #[must_use]
    pub fn shell_cache_dir() -> PathBuf {
        ::dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from(".cache"))
            .join(APP_DIR)
            .join("shell")
    }
}
