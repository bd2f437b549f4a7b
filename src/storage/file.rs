//! Directory-backed key-value store.
//!
//! Each key is one `<key>.json` file inside the store directory. Writes go to
//! a temporary sibling first and are renamed into place, so a reader never
//! observes a half-written value.

use super::traits::{KeyValueStore, StoreLimits, validate_key};
use crate::error::{AllergenError, Result, StorageErrorKind};
use std::fs;
use std::path::{Path, PathBuf};

/// File-based key-value store scoped to one directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    limits: StoreLimits,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            limits: StoreLimits::default(),
        }
    }

    #[must_use]
    pub fn with_limits(mut self, limits: StoreLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AllergenError::storage(
                format!("reading {}", path.display()),
                StorageErrorKind::ReadFailed(e.to_string()),
            )),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        self.limits.check_write(key, value.len())?;

        let write_failed = |e: std::io::Error| {
            AllergenError::storage(
                format!("writing {}", path.display()),
                StorageErrorKind::WriteFailed(e.to_string()),
            )
        };

        fs::create_dir_all(&self.dir).map_err(write_failed)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(write_failed)?;
        fs::rename(&tmp, &path).map_err(write_failed)?;
        tracing::debug!("Stored {} bytes under '{}' in {:?}", value.len(), key, self.dir);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AllergenError::storage(
                format!("removing {}", path.display()),
                StorageErrorKind::WriteFailed(e.to_string()),
            )),
        }
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.get("allergenAppData").expect("get"), None);
        store.set("allergenAppData", "[1, 2]").expect("set");
        assert_eq!(
            store.get("allergenAppData").expect("get").as_deref(),
            Some("[1, 2]")
        );
        assert!(dir.path().join("nested/allergenAppData.json").exists());
        assert!(!dir.path().join("nested/allergenAppData.json.tmp").exists());

        store.remove("allergenAppData").expect("remove");
        assert_eq!(store.get("allergenAppData").expect("get"), None);
        store.remove("allergenAppData").expect("remove again");
    }

    #[test]
    fn test_quota_leaves_previous_value() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut store = FileStore::new(dir.path()).with_limits(StoreLimits::with_quota(8));
        store.set("k", "small").expect("set");
        assert!(store.set("k", "far too large").is_err());
        assert_eq!(store.get("k").expect("get").as_deref(), Some("small"));
    }

    #[test]
    fn test_rejects_path_keys() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut store = FileStore::new(dir.path());
        assert!(store.set("../outside", "x").is_err());
    }
}
