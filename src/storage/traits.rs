//! Key-value store abstraction and shared write limits.

use crate::error::{AllergenError, Result, StorageErrorKind};

/// Synchronous string key-value store scoped to one application.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Name of the backend, for log messages.
    fn backend_name(&self) -> &'static str;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}

/// Limits applied to every write, mirroring what a browser store enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreLimits {
    /// Reject all writes when false
    pub enabled: bool,
    /// Maximum size in bytes of a single value
    pub max_bytes: Option<usize>,
}

impl Default for StoreLimits {
    fn default() -> Self {
        Self {
            enabled: true,
            max_bytes: None,
        }
    }
}

impl StoreLimits {
    /// Limits of a store that rejects every write.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            max_bytes: None,
        }
    }

    /// Limits with a per-value quota.
    #[must_use]
    pub const fn with_quota(max_bytes: usize) -> Self {
        Self {
            enabled: true,
            max_bytes: Some(max_bytes),
        }
    }

    /// Check whether a value of `size` bytes may be written under `key`.
    pub fn check_write(&self, key: &str, size: usize) -> Result<()> {
        if !self.enabled {
            return Err(AllergenError::storage(
                format!("writing '{key}'"),
                StorageErrorKind::Unavailable,
            ));
        }
        if let Some(limit) = self.max_bytes
            && size > limit
        {
            return Err(AllergenError::storage(
                format!("writing '{key}'"),
                StorageErrorKind::QuotaExceeded { size, limit },
            ));
        }
        Ok(())
    }
}

/// Validate a storage key so it maps onto a single file name.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && !key.starts_with('.');
    if valid {
        Ok(())
    } else {
        Err(AllergenError::validation(format!(
            "invalid storage key '{key}': use ASCII letters, digits, '-', '_' or '.'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits_allow_writes() {
        assert!(StoreLimits::default().check_write("k", usize::MAX).is_ok());
    }

    #[test]
    fn test_disabled_rejects() {
        let err = StoreLimits::disabled().check_write("k", 1).expect_err("disabled");
        assert!(matches!(
            err,
            AllergenError::Storage {
                source: StorageErrorKind::Unavailable,
                ..
            }
        ));
    }

    #[test]
    fn test_quota() {
        let limits = StoreLimits::with_quota(4);
        assert!(limits.check_write("k", 4).is_ok());
        let err = limits.check_write("k", 5).expect_err("over quota");
        assert!(err.to_string().contains("writing 'k'"));
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("allergenAppData").is_ok());
        assert!(validate_key("a.b-c_d").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../escape").is_err());
        assert!(validate_key(".hidden").is_err());
    }
}
