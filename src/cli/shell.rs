//! Shell command handler.
//!
//! Drives the application shell cache from the command line: install and
//! activate the configured manifest, resolve a single request through the
//! worker, or print the cache status.

use crate::config::ShellConfig;
use crate::pipeline::{CliWorker, OutputTarget, exit_codes, open_worker};
use crate::shell::{Request, WorkerState};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;

/// What `shell` should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellAction {
    /// Install the manifest's assets and activate the new version
    Update,
    /// Resolve one request through the worker
    Fetch {
        /// Absolute URL, or a path resolved against the configured origin
        target: String,
        /// Treat the request as a page navigation
        navigate: bool,
        /// Write the body here instead of stdout
        output: Option<PathBuf>,
    },
    /// Print version, state and cache statistics
    Status { json: bool },
}

/// Run the shell command
pub fn run_shell(config: &ShellConfig, action: ShellAction, quiet: bool) -> Result<i32> {
    let mut worker = open_worker(config)?;
    match action {
        ShellAction::Update => update(&mut worker, quiet),
        ShellAction::Fetch {
            target,
            navigate,
            output,
        } => fetch(&worker, &target, navigate, output, quiet),
        ShellAction::Status { json } => status(&worker, json),
    }
}

fn update(worker: &mut CliWorker, quiet: bool) -> Result<i32> {
    let report = worker.install();
    for (url, reason) in &report.failed {
        tracing::warn!("Not cached: {} ({})", url, reason);
    }
    let activation = worker.activate()?;
    if !quiet {
        eprintln!(
            "{}: {} von {} Dateien zwischengespeichert",
            report.version,
            report.cached.len(),
            report.cached.len() + report.failed.len()
        );
        for name in &activation.deleted {
            eprintln!("Alter Cache entfernt: {name}");
        }
    }

    // Exit 2 when nothing was refreshed; earlier entries stay active
    if report.cached.is_empty() {
        tracing::warn!("No asset of '{}' could be refreshed", report.version);
        return Ok(exit_codes::ERROR);
    }
    Ok(exit_codes::SUCCESS)
}

fn fetch(
    worker: &CliWorker,
    target: &str,
    navigate: bool,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<i32> {
    if worker.state() != WorkerState::Active {
        tracing::warn!("Shell cache is not active; run `allergen-tools shell update` first");
    }

    let url = resolve_target(worker, target);
    let request = if navigate {
        Request::navigate(&url)
    } else {
        Request::get(&url)
    };

    let outcome = worker.handle_fetch(&request);
    if !quiet {
        eprintln!("{} ({})", request.cache_key(), outcome.source());
    }
    let source = outcome.source();
    let Some(response) = outcome.into_response() else {
        return Ok(exit_codes::ERROR);
    };
    if !quiet {
        eprintln!("{response}");
    }

    match OutputTarget::from_option(output) {
        OutputTarget::Stdout => {
            std::io::stdout()
                .write_all(&response.body)
                .context("Failed to write response body")?;
        }
        OutputTarget::File(path) => {
            std::fs::write(&path, &response.body)
                .with_context(|| format!("Failed to write response to {}", path.display()))?;
            tracing::info!("Response from {} written to {}", source, path.display());
        }
    }
    Ok(exit_codes::SUCCESS)
}

fn status(worker: &CliWorker, json: bool) -> Result<i32> {
    let status = worker.status()?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&status).context("Failed to serialize status")?
        );
        return Ok(exit_codes::SUCCESS);
    }

    println!("Version:     {}", status.version);
    println!("Zustand:     {}", status.state);
    println!("Übernommen:  {}", if status.claimed { "ja" } else { "nein" });
    println!("Ursprung:    {}", worker.manifest().origin);
    println!("Cache:       {}", status.stats);
    for name in &status.containers {
        let marker = if *name == status.version { "*" } else { " " };
        println!("  {marker} {name}");
    }
    Ok(exit_codes::SUCCESS)
}

/// An absolute URL as given, anything else as a path under the manifest origin.
fn resolve_target(worker: &CliWorker, target: &str) -> String {
    if target.contains("://") {
        target.to_string()
    } else {
        worker.manifest().resolve(target)
    }
}
