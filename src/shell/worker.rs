//! Install/activate lifecycle and fetch interception.

use super::cache::{CacheStats, CacheStorage};
use super::manifest::AssetManifest;
use super::network::Network;
use super::request::{Request, Response, request_key};
use crate::error::Result;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;

/// Lifecycle state of the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkerState {
    /// Assets are being fetched into the version container
    Installing,
    /// Installed; waiting to take over from a previous version
    WaitingActivation,
    /// Controls its clients and intercepts their requests
    Active,
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Installing => "installing",
            Self::WaitingActivation => "waiting-activation",
            Self::Active => "active",
        };
        f.write_str(name)
    }
}

/// Result of an install run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    pub version: String,
    /// Asset URLs stored in the version container
    pub cached: Vec<String>,
    /// Asset URLs that could not be cached, with the reason
    pub failed: Vec<(String, String)>,
}

impl InstallReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Result of an activation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivationReport {
    /// Containers of older versions that were removed
    pub deleted: Vec<String>,
    /// Whether the worker took control of open clients
    pub claimed: bool,
}

/// Where the response to an intercepted request came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Live response from the network
    Network(Response),
    /// Previously cached response
    Cached(Response),
    /// Cached root document served for a navigation while offline
    Fallback(Response),
    /// Neither the network nor the cache could answer
    NoResponse,
}

impl FetchOutcome {
    #[must_use]
    pub const fn response(&self) -> Option<&Response> {
        match self {
            Self::Network(r) | Self::Cached(r) | Self::Fallback(r) => Some(r),
            Self::NoResponse => None,
        }
    }

    #[must_use]
    pub fn into_response(self) -> Option<Response> {
        match self {
            Self::Network(r) | Self::Cached(r) | Self::Fallback(r) => Some(r),
            Self::NoResponse => None,
        }
    }

    #[must_use]
    pub const fn source(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Cached(_) => "cache",
            Self::Fallback(_) => "fallback",
            Self::NoResponse => "none",
        }
    }
}

/// Snapshot of the worker for status output.
#[derive(Debug, Clone, Serialize)]
pub struct WorkerStatus {
    pub version: String,
    pub state: WorkerState,
    pub claimed: bool,
    pub containers: Vec<String>,
    pub stats: CacheStats,
}

/// Offline cache for the application shell.
///
/// Lifecycle calls take `&mut self`; [`Self::handle_fetch`] takes `&self`
/// and may run from many threads at once.
pub struct AssetCacheWorker<C, N> {
    manifest: AssetManifest,
    cache: C,
    network: N,
    state: WorkerState,
    claimed: bool,
}

impl<C: CacheStorage, N: Network> AssetCacheWorker<C, N> {
    /// Create a worker over existing cache storage.
    ///
    /// The worker resumes as active when the container for the manifest
    /// version already exists.
    pub fn new(manifest: AssetManifest, cache: C, network: N) -> Result<Self> {
        let installed = cache.has(&manifest.version)?;
        let state = if installed {
            WorkerState::Active
        } else {
            WorkerState::Installing
        };
        tracing::debug!("Worker for '{}' starts {}", manifest.version, state);
        Ok(Self {
            manifest,
            cache,
            network,
            state,
            claimed: installed,
        })
    }

    #[must_use]
    pub const fn state(&self) -> WorkerState {
        self.state
    }

    #[must_use]
    pub const fn manifest(&self) -> &AssetManifest {
        &self.manifest
    }

    #[must_use]
    pub const fn cache(&self) -> &C {
        &self.cache
    }

    #[must_use]
    pub const fn is_claimed(&self) -> bool {
        self.claimed
    }

    /// Fetch every manifest asset into the version container.
    ///
    /// Assets are fetched in parallel. An asset that fails or answers with a
    /// non-2xx status is skipped; install always completes.
    pub fn install(&mut self) -> InstallReport {
        let version = self.manifest.version.clone();
        if let Err(e) = self.cache.open(&version) {
            tracing::warn!("Could not create cache container '{}': {}", version, e);
        }

        let results: Vec<(String, std::result::Result<(), String>)> = self
            .manifest
            .asset_urls()
            .into_par_iter()
            .map(|url| {
                let outcome = self.cache_asset(&url);
                (url, outcome)
            })
            .collect();

        let mut report = InstallReport {
            version,
            ..InstallReport::default()
        };
        for (url, outcome) in results {
            match outcome {
                Ok(()) => report.cached.push(url),
                Err(reason) => {
                    tracing::warn!("Skipping asset {}: {}", url, reason);
                    report.failed.push((url, reason));
                }
            }
        }

        self.state = WorkerState::WaitingActivation;
        tracing::info!(
            "Installed '{}': {} cached, {} failed",
            report.version,
            report.cached.len(),
            report.failed.len()
        );
        report
    }

    fn cache_asset(&self, url: &str) -> std::result::Result<(), String> {
        let request = Request::get(url);
        let response = self.network.fetch(&request).map_err(|e| e.to_string())?;
        if !response.is_success() {
            return Err(format!("HTTP status {}", response.status));
        }
        self.cache
            .put(&self.manifest.version, &request.cache_key(), &response)
            .map_err(|e| e.to_string())
    }

    /// Remove containers of other versions and take control of clients.
    pub fn activate(&mut self) -> Result<ActivationReport> {
        let mut report = ActivationReport::default();
        for name in self.cache.keys()? {
            if name == self.manifest.version {
                continue;
            }
            match self.cache.delete(&name) {
                Ok(_) => {
                    tracing::info!("Deleted old cache container '{}'", name);
                    report.deleted.push(name);
                }
                Err(e) => tracing::warn!("Could not delete cache container '{}': {}", name, e),
            }
        }

        self.claimed = true;
        report.claimed = true;
        self.state = WorkerState::Active;
        Ok(report)
    }

    /// Answer an intercepted request.
    ///
    /// Never fails: cache errors count as misses and network errors fall
    /// back to the cache or to [`FetchOutcome::NoResponse`].
    pub fn handle_fetch(&self, request: &Request) -> FetchOutcome {
        if self.state != WorkerState::Active {
            return match self.network.fetch(request) {
                Ok(response) => FetchOutcome::Network(response),
                Err(e) => {
                    tracing::debug!("Uncontrolled fetch failed: {}", e);
                    FetchOutcome::NoResponse
                }
            };
        }

        if request.is_navigation() {
            self.handle_navigation(request)
        } else {
            self.handle_subresource(request)
        }
    }

    fn handle_navigation(&self, request: &Request) -> FetchOutcome {
        match self.network.fetch(request) {
            Ok(response) => {
                self.store(request, &response);
                FetchOutcome::Network(response)
            }
            Err(e) => {
                tracing::debug!("Navigation to {} failed, trying cache: {}", request.url, e);
                let key = request_key("GET", &self.manifest.root_document_url());
                match self.lookup(&key) {
                    Some(response) => FetchOutcome::Fallback(response),
                    None => FetchOutcome::NoResponse,
                }
            }
        }
    }

    fn handle_subresource(&self, request: &Request) -> FetchOutcome {
        if request.is_get()
            && let Some(response) = self.lookup(&request.cache_key())
        {
            tracing::debug!("Cache hit for {}", request.url);
            return FetchOutcome::Cached(response);
        }

        tracing::debug!("Cache miss for {}", request.url);
        match self.network.fetch(request) {
            Ok(response) => {
                if self.manifest.is_same_origin(&request.url) {
                    self.store(request, &response);
                }
                FetchOutcome::Network(response)
            }
            Err(e) => {
                tracing::debug!("Fetch of {} failed: {}", request.url, e);
                FetchOutcome::NoResponse
            }
        }
    }

    fn lookup(&self, key: &str) -> Option<Response> {
        match self.cache.match_any(key) {
            Ok(hit) => hit,
            Err(e) => {
                tracing::warn!("Cache lookup for '{}' failed: {}", key, e);
                None
            }
        }
    }

    fn store(&self, request: &Request, response: &Response) {
        if !request.is_get() {
            return;
        }
        if let Err(e) = self
            .cache
            .put(&self.manifest.version, &request.cache_key(), response)
        {
            tracing::warn!("Could not cache {}: {}", request.url, e);
        }
    }

    /// Current state plus cache contents.
    pub fn status(&self) -> Result<WorkerStatus> {
        Ok(WorkerStatus {
            version: self.manifest.version.clone(),
            state: self.state,
            claimed: self.claimed,
            containers: self.cache.keys()?,
            stats: self.cache.stats()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AllergenError;
    use crate::shell::MemoryCacheStorage;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Serves fixed bodies; unknown URLs get a 404, and the whole network
    /// can be switched off.
    #[derive(Default)]
    struct FakeNetwork {
        pages: HashMap<String, (u16, String)>,
        offline: AtomicBool,
    }

    impl FakeNetwork {
        fn serving(pages: &[(&str, u16, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, status, body)| ((*url).to_string(), (*status, (*body).to_string())))
                    .collect(),
                offline: AtomicBool::new(false),
            }
        }
    }

    impl Network for FakeNetwork {
        fn fetch(&self, request: &Request) -> Result<Response> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(AllergenError::network(&request.url, "offline"));
            }
            Ok(match self.pages.get(&request.url) {
                Some((status, body)) => Response::new(&request.url, *status, body.as_str()),
                None => Response::new(&request.url, 404, "not found"),
            })
        }
    }

    const ORIGIN: &str = "https://shop.test";

    fn shell_pages() -> FakeNetwork {
        FakeNetwork::serving(&[
            ("https://shop.test/", 200, "<html>root</html>"),
            ("https://shop.test/index.html", 200, "<html>index</html>"),
            ("https://shop.test/app.js", 200, "app()"),
            ("https://shop.test/manifest.json", 200, "{}"),
            ("https://shop.test/icons/icon-192.png", 200, "png192"),
            ("https://shop.test/icons/icon-512.png", 500, "boom"),
            ("https://cdn.test/lib.js", 200, "lib()"),
        ])
    }

    fn active_worker() -> AssetCacheWorker<MemoryCacheStorage, FakeNetwork> {
        let mut worker = AssetCacheWorker::new(
            AssetManifest::for_origin(ORIGIN),
            MemoryCacheStorage::new(),
            shell_pages(),
        )
        .expect("worker");
        worker.install();
        worker.activate().expect("activate");
        worker
    }

    #[test]
    fn test_install_is_best_effort() {
        let mut worker = AssetCacheWorker::new(
            AssetManifest::for_origin(ORIGIN),
            MemoryCacheStorage::new(),
            shell_pages(),
        )
        .expect("worker");
        assert_eq!(worker.state(), WorkerState::Installing);

        let report = worker.install();
        assert_eq!(report.cached.len(), 5);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "https://shop.test/icons/icon-512.png");
        assert!(!report.is_complete());
        assert_eq!(worker.state(), WorkerState::WaitingActivation);
    }

    #[test]
    fn test_activate_deletes_other_versions() {
        let cache = MemoryCacheStorage::new();
        cache.open("allergen-app-v0").expect("open");
        cache.open("allergen-app-v1").expect("open");

        let mut worker =
            AssetCacheWorker::new(AssetManifest::for_origin(ORIGIN), cache, shell_pages())
                .expect("worker");
        let report = worker.activate().expect("activate");

        assert_eq!(report.deleted, vec!["allergen-app-v0"]);
        assert!(report.claimed);
        assert_eq!(worker.cache().keys().expect("keys"), vec!["allergen-app-v1"]);
        assert_eq!(worker.state(), WorkerState::Active);
    }

    #[test]
    fn test_resume_existing_version() {
        let cache = MemoryCacheStorage::new();
        cache.open("allergen-app-v1").expect("open");
        let worker = AssetCacheWorker::new(AssetManifest::for_origin(ORIGIN), cache, shell_pages())
            .expect("worker");
        assert_eq!(worker.state(), WorkerState::Active);
    }

    #[test]
    fn test_subresource_cache_first() {
        let worker = active_worker();
        worker.network.offline.store(true, Ordering::SeqCst);

        let outcome = worker.handle_fetch(&Request::get("https://shop.test/app.js"));
        assert_eq!(outcome.source(), "cache");
        assert_eq!(outcome.response().map(|r| r.body.as_slice()), Some(&b"app()"[..]));
    }

    #[test]
    fn test_navigation_falls_back_to_root_document() {
        let worker = active_worker();
        worker.network.offline.store(true, Ordering::SeqCst);

        let outcome = worker.handle_fetch(&Request::navigate("https://shop.test/produkte"));
        match outcome {
            FetchOutcome::Fallback(response) => assert_eq!(response.body, b"<html>index</html>"),
            other => panic!("expected fallback, got {other:?}"),
        }
    }

    #[test]
    fn test_navigation_prefers_network_and_stores_copy() {
        let worker = active_worker();
        let outcome = worker.handle_fetch(&Request::navigate("https://shop.test/"));
        assert_eq!(outcome.source(), "network");
        assert!(
            worker
                .cache()
                .match_in("allergen-app-v1", "GET https://shop.test/")
                .expect("match")
                .is_some()
        );
    }

    #[test]
    fn test_cross_origin_not_cached() {
        let worker = active_worker();
        let outcome = worker.handle_fetch(&Request::get("https://cdn.test/lib.js"));
        assert_eq!(outcome.source(), "network");
        assert!(
            worker
                .cache()
                .match_any("GET https://cdn.test/lib.js")
                .expect("match")
                .is_none()
        );
    }

    #[test]
    fn test_non_get_never_cached() {
        let worker = active_worker();
        let request = Request::get("https://shop.test/api").with_method("POST");
        assert_eq!(worker.handle_fetch(&request).source(), "network");
        assert!(worker.cache().match_any(&request.cache_key()).expect("match").is_none());
    }

    #[test]
    fn test_no_response_when_everything_fails() {
        let worker = active_worker();
        worker.network.offline.store(true, Ordering::SeqCst);
        let outcome = worker.handle_fetch(&Request::get("https://shop.test/missing.css"));
        assert_eq!(outcome, FetchOutcome::NoResponse);
    }

    #[test]
    fn test_not_active_passes_through() {
        let worker = AssetCacheWorker::new(
            AssetManifest::for_origin(ORIGIN),
            MemoryCacheStorage::new(),
            shell_pages(),
        )
        .expect("worker");
        let outcome = worker.handle_fetch(&Request::get("https://shop.test/app.js"));
        assert_eq!(outcome.source(), "network");
        assert!(worker.cache().keys().expect("keys").is_empty());
    }
}
