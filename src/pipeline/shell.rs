//! Building the asset cache worker from configuration.

use crate::config::ShellConfig;
use crate::shell::{AssetCacheWorker, FileCacheStorage, HttpNetwork, Network, OfflineNetwork};
use anyhow::{Context, Result};

/// Worker over the on-disk shell cache.
pub type CliWorker = AssetCacheWorker<FileCacheStorage, Box<dyn Network>>;

/// Open the shell cache and create a worker for the configured manifest.
pub fn open_worker(config: &ShellConfig) -> Result<CliWorker> {
    let dir = config.resolved_cache_dir();
    let cache = FileCacheStorage::new(&dir)
        .with_context(|| format!("Failed to open shell cache at {}", dir.display()))?;

    let network: Box<dyn Network> = if config.offline {
        Box::new(OfflineNetwork)
    } else {
        Box::new(HttpNetwork::with_timeout(config.timeout())?)
    };

    tracing::debug!(
        "Shell cache {} for {} ({})",
        dir.display(),
        config.manifest.origin,
        config.manifest.version
    );
    Ok(AssetCacheWorker::new(config.manifest.clone(), cache, network)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::WorkerState;

    #[test]
    fn test_offline_worker_over_fresh_cache() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = ShellConfig {
            cache_dir: Some(dir.path().to_path_buf()),
            offline: true,
            ..ShellConfig::default()
        };

        let mut worker = open_worker(&config).expect("worker");
        assert_eq!(worker.state(), WorkerState::Installing);

        let report = worker.install();
        assert!(report.cached.is_empty());
        assert_eq!(report.failed.len(), 6);

        worker.activate().expect("activate");
        let reopened = open_worker(&config).expect("worker");
        assert_eq!(reopened.state(), WorkerState::Active);
    }
}
