//! Unified error types for allergen-tools.
//!
//! This module provides the error hierarchy for the library,
//! with context chaining for debugging and user-facing messages.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for allergen-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AllergenError {
    /// Errors while parsing catalog input
    #[error("Failed to parse catalog: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Errors from the persisted key-value store
    #[error("Storage operation failed: {context}")]
    Storage {
        context: String,
        #[source]
        source: StorageErrorKind,
    },

    /// Errors from the asset cache or its network backend
    #[error("Asset cache operation failed: {context}")]
    Cache {
        context: String,
        #[source]
        source: CacheErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific parse error kinds
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// The text is not valid JSON. Carries the parser's message.
    #[error("{0}")]
    InvalidJson(String),
}

/// Specific storage error kinds
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    #[error("storage is disabled")]
    Unavailable,

    #[error("quota exceeded: {size} bytes exceeds limit of {limit} bytes")]
    QuotaExceeded { size: usize, limit: usize },

    #[error("write failed: {0}")]
    WriteFailed(String),

    #[error("read failed: {0}")]
    ReadFailed(String),
}

/// Specific asset cache error kinds
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CacheErrorKind {
    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),

    #[error("cache store error: {0}")]
    Store(String),

    #[error("corrupt cache entry: {0}")]
    CorruptEntry(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for allergen-tools operations
pub type Result<T> = std::result::Result<T, AllergenError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl AllergenError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error for malformed JSON
    pub fn invalid_json(message: impl Into<String>) -> Self {
        Self::parse("JSON", ParseErrorKind::InvalidJson(message.into()))
    }

    /// Create a storage error with context
    pub fn storage(context: impl Into<String>, source: StorageErrorKind) -> Self {
        Self::Storage {
            context: context.into(),
            source,
        }
    }

    /// Create an asset cache error with context
    pub fn cache(context: impl Into<String>, source: CacheErrorKind) -> Self {
        Self::Cache {
            context: context.into(),
            source,
        }
    }

    /// Create a network error for an asset cache request
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::cache(url, CacheErrorKind::Network(message.into()))
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// The parser message of a malformed-JSON error, if this is one.
    #[must_use]
    pub fn json_message(&self) -> Option<&str> {
        match self {
            Self::Parse {
                source: ParseErrorKind::InvalidJson(msg),
                ..
            } => Some(msg),
            _ => None,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for AllergenError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for AllergenError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_json(err.to_string())
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context,
/// creating a chain that shows the path through the code.
///
/// # Example
///
/// ```ignore
/// use allergen_tools::error::ErrorContext;
///
/// fn load(path: &Path) -> Result<ParsedCatalog> {
///     let content = std::fs::read_to_string(path).context("reading catalog file")?;
///     parse_catalog_str(&content).with_context(|| format!("parsing {}", path.display()))
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<AllergenError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: AllergenError, new_ctx: &str) -> AllergenError {
    match err {
        AllergenError::Parse {
            context: existing,
            source,
        } => AllergenError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        AllergenError::Storage {
            context: existing,
            source,
        } => AllergenError::Storage {
            context: chain_context(new_ctx, &existing),
            source,
        },
        AllergenError::Cache {
            context: existing,
            source,
        } => AllergenError::Cache {
            context: chain_context(new_ctx, &existing),
            source,
        },
        AllergenError::Io {
            path,
            message,
            source,
        } => AllergenError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        AllergenError::Config(msg) => AllergenError::Config(chain_context(new_ctx, &msg)),
        AllergenError::Validation(msg) => AllergenError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// Returns "`new_context`: `existing_context`", or just the new context when
/// nothing exists yet.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| AllergenError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| AllergenError::Validation(f().into()))
    }
}
