//! Opening the store and loading a catalog for CLI commands.

use crate::app::{Command, Outcome, Session};
use crate::config::AppConfig;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use anyhow::{Result, bail};
use std::path::Path;

/// Session over whichever store the configuration selects.
pub type CliSession = Session<Box<dyn KeyValueStore>>;

/// The persistent store, or an in-memory one when persistence is off.
#[must_use]
pub fn open_store(config: &AppConfig) -> Box<dyn KeyValueStore> {
    if config.storage.persist {
        let dir = config.storage.resolved_data_dir();
        tracing::debug!("Using catalog store in {}", dir.display());
        Box::new(FileStore::new(dir).with_limits(config.storage.limits()))
    } else {
        Box::new(MemoryStore::new())
    }
}

/// Open a session and load `file`, or restore the persisted catalog.
///
/// The configured filter mode and allergens are applied after loading.
/// Allergens are selected verbatim, including ones the catalog never
/// mentions. A file that cannot be read or parsed is an error; a broken
/// persisted catalog is not.
pub fn open_session(config: &AppConfig, file: Option<&Path>) -> Result<(CliSession, Outcome)> {
    let mut session = Session::new(open_store(config));

    let outcome = match file {
        Some(path) => session.handle(Command::LoadFile(path.to_path_buf())),
        None => session.handle(Command::RestorePersisted),
    };
    match &outcome {
        Outcome::ParseFailed(_) | Outcome::ReadFailed(_) => {
            let status = session.state().status.peek().unwrap_or_default().to_string();
            bail!("{status} ({})", file.map(|p| p.display().to_string()).unwrap_or_default());
        }
        Outcome::RestoreFailed(reason) => {
            tracing::warn!("Ignoring persisted catalog: {}", reason);
        }
        _ => {}
    }

    session.handle(Command::SetMode(config.filter.mode));
    for label in &config.filter.allergens {
        if !session.state().index().contains(label) {
            tracing::warn!("Allergen '{}' does not occur in the catalog", label);
        }
        session.state_mut().selection.insert(label.clone());
    }

    Ok((session, outcome))
}
