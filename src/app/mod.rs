//! Viewer state and the commands that change it.
//!
//! The host owns a [`Session`] and feeds it [`Command`]s; every command
//! returns an [`Outcome`] and may set a German status message on the state.

mod session;
mod state;
mod status;

pub use session::{Command, Outcome, Session};
pub use state::AppState;
pub use status::{StatusLevel, StatusMessage};

/// User-facing status texts.
pub mod messages {
    use std::fmt::Display;

    pub const RESTORED: &str = "Geladene lokale Daten gefunden.";
    pub const LOADED: &str = "JSON erfolgreich geladen und gespeichert.";
    pub const READ_FAILED: &str = "Fehler beim Lesen der Datei.";
    pub const CLEARED: &str = "Lokale Daten gelöscht.";
    pub const NO_ALLERGENS: &str = "Keine Allergene geladen";
    pub const NO_PRODUCTS: &str = "Keine Produkte gefunden.";
    pub const FOUND_ALLERGENS: &str = "Gefundene Allergene:";
    pub const NONE: &str = "Keine";
    pub const SEARCH_PLACEHOLDER: &str = "Produktname oder ID";

    #[must_use]
    pub fn parse_failed(message: &str) -> String {
        format!("Fehler beim Parsen der JSON: {message}")
    }

    #[must_use]
    pub fn not_persisted(error: &impl Display) -> String {
        format!("JSON geladen, aber nicht lokal gespeichert: {error}")
    }

    #[must_use]
    pub fn not_cleared(error: &impl Display) -> String {
        format!("Lokale Daten konnten nicht gelöscht werden: {error}")
    }
}
