//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand
//! and returns the process exit code.

mod catalog;
mod shell;
mod view;

pub use catalog::{run_allergens, run_clear, run_filter, run_load, run_lookup};
pub use shell::{ShellAction, run_shell};
pub use view::run_view;
