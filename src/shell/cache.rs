//! Named cache containers holding request/response pairs.
//!
//! A container is identified by the shell version string. Entries inside a
//! container are keyed by [`super::request_key`].

use super::request::Response;
use crate::error::{AllergenError, CacheErrorKind, Result};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};

/// Storage of versioned cache containers, shared between concurrent fetches.
pub trait CacheStorage: Send + Sync {
    /// Container names in creation order.
    fn keys(&self) -> Result<Vec<String>>;

    fn has(&self, name: &str) -> Result<bool> {
        Ok(self.keys()?.iter().any(|key| key == name))
    }

    /// Create the container if it does not exist yet.
    fn open(&self, name: &str) -> Result<()>;

    /// Delete a container and everything in it. Returns whether it existed.
    fn delete(&self, name: &str) -> Result<bool>;

    /// Store `response` under `key` in container `name`, creating the container.
    fn put(&self, name: &str, key: &str, response: &Response) -> Result<()>;

    /// Look up `key` in one container.
    fn match_in(&self, name: &str, key: &str) -> Result<Option<Response>>;

    /// Look up `key` across all containers, oldest first.
    fn match_any(&self, key: &str) -> Result<Option<Response>> {
        for name in self.keys()? {
            match self.match_in(&name, key) {
                Ok(Some(response)) => return Ok(Some(response)),
                Ok(None) => {}
                Err(e) => tracing::warn!("Skipping cache container '{}': {}", name, e),
            }
        }
        Ok(None)
    }

    fn stats(&self) -> Result<CacheStats>;
}

/// Cache statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub containers: usize,
    pub entries: usize,
    /// Sum of all body sizes in bytes
    pub total_bytes: u64,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} container(s), {} entries, {}",
            self.containers,
            self.entries,
            format_size(self.total_bytes)
        )
    }
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

fn store_error(context: impl Into<String>, e: impl std::fmt::Display) -> AllergenError {
    AllergenError::cache(context, CacheErrorKind::Store(e.to_string()))
}

// ============================================================================
// File-backed storage
// ============================================================================

const INDEX_FILE: &str = "containers.json";
const ENTRY_EXTENSION: &str = "entry";

/// Header line in front of each cached body.
#[derive(Debug, Serialize, Deserialize)]
struct EntryMeta {
    key: String,
    #[serde(flatten)]
    response: Response,
    body_len: usize,
    stored_at: DateTime<Utc>,
}

/// Cache containers stored as directories below a root directory.
///
/// Each entry is one `<sha256>.entry` file: a single-line JSON header, a
/// newline, then the body. The file is written under a temporary name and
/// renamed into place, so concurrent puts of the same key resolve to the
/// last writer.
pub struct FileCacheStorage {
    root: PathBuf,
    index_lock: Mutex<()>,
}

impl FileCacheStorage {
    /// Open a cache rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| AllergenError::io(&root, e))?;
        Ok(Self {
            root,
            index_lock: Mutex::new(()),
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn container_dir(&self, name: &str) -> Result<PathBuf> {
        let valid = !name.is_empty()
            && !name.starts_with('.')
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(AllergenError::cache(
                format!("container '{name}'"),
                CacheErrorKind::InvalidRequest("container names use ASCII letters, digits, '-', '_' or '.'".to_string()),
            ));
        }
        Ok(self.root.join(name))
    }

    fn entry_path(dir: &Path, key: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        dir.join(format!("{:x}.{ENTRY_EXTENSION}", hasher.finalize()))
    }

    fn read_index(&self) -> Result<Vec<String>> {
        let path = self.root.join(INDEX_FILE);
        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                AllergenError::cache(
                    path.display().to_string(),
                    CacheErrorKind::CorruptEntry(e.to_string()),
                )
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(store_error(path.display().to_string(), e)),
        }
    }

    fn write_index(&self, names: &[String]) -> Result<()> {
        let path = self.root.join(INDEX_FILE);
        let data = serde_json::to_vec_pretty(names)
            .map_err(|e| store_error("serializing container index", e))?;
        write_atomic(&path, &data).map_err(|e| store_error(path.display().to_string(), e))
    }

    fn lock_index(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.index_lock
            .lock()
            .map_err(|_| store_error("container index", "lock poisoned"))
    }
}

/// Write through a uniquely named temporary file and rename into place.
fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp = path.with_extension(format!("tmp.{}.{n}", std::process::id()));
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)
}

impl CacheStorage for FileCacheStorage {
    fn keys(&self) -> Result<Vec<String>> {
        let _guard = self.lock_index()?;
        self.read_index()
    }

    fn open(&self, name: &str) -> Result<()> {
        let dir = self.container_dir(name)?;
        let _guard = self.lock_index()?;
        let mut names = self.read_index()?;
        fs::create_dir_all(&dir).map_err(|e| store_error(dir.display().to_string(), e))?;
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
            self.write_index(&names)?;
            tracing::debug!("Created cache container '{}'", name);
        }
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<bool> {
        let dir = self.container_dir(name)?;
        let _guard = self.lock_index()?;
        let mut names = self.read_index()?;
        let before = names.len();
        names.retain(|n| n != name);
        let existed = names.len() != before;
        if existed {
            self.write_index(&names)?;
        }
        if dir.exists() {
            fs::remove_dir_all(&dir).map_err(|e| store_error(dir.display().to_string(), e))?;
        }
        Ok(existed)
    }

    fn put(&self, name: &str, key: &str, response: &Response) -> Result<()> {
        self.open(name)?;
        let dir = self.container_dir(name)?;

        let meta = EntryMeta {
            key: key.to_string(),
            response: response.clone(),
            body_len: response.body.len(),
            stored_at: Utc::now(),
        };
        let mut bytes = serde_json::to_vec(&meta).map_err(|e| store_error(key.to_string(), e))?;
        bytes.push(b'\n');
        bytes.extend_from_slice(&response.body);

        let path = Self::entry_path(&dir, key);
        write_atomic(&path, &bytes).map_err(|e| store_error(path.display().to_string(), e))
    }

    fn match_in(&self, name: &str, key: &str) -> Result<Option<Response>> {
        let dir = self.container_dir(name)?;
        let path = Self::entry_path(&dir, key);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(store_error(path.display().to_string(), e)),
        };
        let corrupt = |msg: String| {
            AllergenError::cache(path.display().to_string(), CacheErrorKind::CorruptEntry(msg))
        };

        let (meta, body) = split_entry(&bytes).map_err(corrupt)?;
        if meta.key != key {
            return Err(corrupt(format!("entry belongs to '{}'", meta.key)));
        }
        let mut response = meta.response;
        response.body = body.to_vec();
        Ok(Some(response))
    }

    fn stats(&self) -> Result<CacheStats> {
        let names = self.keys()?;
        let mut stats = CacheStats {
            containers: names.len(),
            ..CacheStats::default()
        };
        for name in &names {
            let Ok(entries) = fs::read_dir(self.container_dir(name)?) else {
                continue;
            };
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_none_or(|e| e != ENTRY_EXTENSION) {
                    continue;
                }
                stats.entries += 1;
                if let Ok(bytes) = fs::read(&path)
                    && let Ok((_, body)) = split_entry(&bytes)
                {
                    stats.total_bytes += body.len() as u64;
                }
            }
        }
        Ok(stats)
    }
}

/// Split an entry file into its header and body.
fn split_entry(bytes: &[u8]) -> std::result::Result<(EntryMeta, &[u8]), String> {
    let newline = bytes
        .iter()
        .position(|&b| b == b'\n')
        .ok_or_else(|| "missing entry header".to_string())?;
    let meta: EntryMeta =
        serde_json::from_slice(&bytes[..newline]).map_err(|e| e.to_string())?;
    let body = &bytes[newline + 1..];
    if body.len() != meta.body_len {
        return Err(format!(
            "body has {} bytes, expected {}",
            body.len(),
            meta.body_len
        ));
    }
    Ok((meta, body))
}

// ============================================================================
// In-memory storage
// ============================================================================

type Containers = IndexMap<String, IndexMap<String, Response>>;

/// Cache containers held in memory, in creation order.
#[derive(Debug, Default)]
pub struct MemoryCacheStorage {
    containers: RwLock<Containers>,
}

impl MemoryCacheStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Containers>> {
        self.containers
            .read()
            .map_err(|_| store_error("memory cache", "lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Containers>> {
        self.containers
            .write()
            .map_err(|_| store_error("memory cache", "lock poisoned"))
    }
}

impl CacheStorage for MemoryCacheStorage {
    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.read()?.keys().cloned().collect())
    }

    fn open(&self, name: &str) -> Result<()> {
        self.write()?.entry(name.to_string()).or_default();
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<bool> {
        Ok(self.write()?.shift_remove(name).is_some())
    }

    fn put(&self, name: &str, key: &str, response: &Response) -> Result<()> {
        self.write()?
            .entry(name.to_string())
            .or_default()
            .insert(key.to_string(), response.clone());
        Ok(())
    }

    fn match_in(&self, name: &str, key: &str) -> Result<Option<Response>> {
        Ok(self
            .read()?
            .get(name)
            .and_then(|container| container.get(key))
            .cloned())
    }

    fn stats(&self) -> Result<CacheStats> {
        let containers = self.read()?;
        Ok(CacheStats {
            containers: containers.len(),
            entries: containers.values().map(IndexMap::len).sum(),
            total_bytes: containers
                .values()
                .flat_map(IndexMap::values)
                .map(|r| r.body.len() as u64)
                .sum(),
        })
    }
}
