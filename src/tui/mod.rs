//! Interactive terminal viewer using ratatui.
//!
//! The left panel lists the allergen index as checkboxes, the right panel the
//! products visible for the current selection and mode. Each product can be
//! expanded into its component and ingredient table.
//!
//! Terminal events are read on a background thread and forwarded over a
//! channel; all state changes happen on the UI thread through the session's
//! command handler.

mod app;
mod events;
pub mod state;
pub mod theme;
mod ui;
pub mod viewmodel;
pub(crate) mod widgets;

pub use app::{FocusPanel, ViewApp};
pub use events::{Event, EventHandler, handle_key_event};
pub use state::{ListNavigation, ListState};
pub use theme::{ColorScheme, FooterHints, Styles, Theme, colors, current_theme_name, set_theme, toggle_theme};
pub use ui::{render, run_view_tui};
pub use viewmodel::{CycleFilter, FilterState, LookupInput, OverlayKind, OverlayState};
