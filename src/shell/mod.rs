//! Offline availability of the application shell.
//!
//! [`AssetCacheWorker`] keeps a versioned copy of the shell assets in a
//! [`CacheStorage`] and answers intercepted requests from the network or the
//! cache. It knows nothing about catalogs.
//!
//! # Example
//!
//! ```no_run
//! use allergen_tools::shell::{AssetCacheWorker, AssetManifest, FileCacheStorage, HttpNetwork};
//!
//! let manifest = AssetManifest::for_origin("https://allergene.example");
//! let cache = FileCacheStorage::new("/tmp/allergen-shell")?;
//! let mut worker = AssetCacheWorker::new(manifest, cache, HttpNetwork::new()?)?;
//! let report = worker.install();
//! worker.activate()?;
//! println!("{} assets cached", report.cached.len());
//! # Ok::<(), allergen_tools::AllergenError>(())
//! ```

mod cache;
mod manifest;
mod network;
mod request;
mod worker;

pub use cache::{CacheStats, CacheStorage, FileCacheStorage, MemoryCacheStorage};
pub use manifest::{AssetManifest, DEFAULT_ASSETS, DEFAULT_ORIGIN, DEFAULT_VERSION, ROOT_DOCUMENT};
pub use network::{DEFAULT_TIMEOUT, HttpNetwork, Network, OfflineNetwork};
pub use request::{Request, RequestMode, Response, request_key};
pub use worker::{
    ActivationReport, AssetCacheWorker, FetchOutcome, InstallReport, WorkerState, WorkerStatus,
};
