//! View state shared by the viewer panels.
//!
//! - [`FilterState`] - filter mode cycling via [`CycleFilter`]
//! - [`OverlayState`] - help and lookup overlays
//! - [`LookupInput`] - product lookup query editing

mod filter;
mod overlay;
mod search;

pub use filter::{CycleFilter, FilterState};
pub use overlay::{OverlayKind, OverlayState};
pub use search::LookupInput;
