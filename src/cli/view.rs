//! View command handler.
//!
//! Implements the `view` subcommand: load or restore a catalog and show it
//! in the TUI or as a report.

use crate::config::AppConfig;
use crate::pipeline::{OutputTarget, auto_detect_format, exit_codes, open_session, output_report};
use crate::reports::{CatalogView, ReportFormat};
use crate::tui::{ViewApp, run_view_tui};
use anyhow::Result;
use std::path::Path;

/// Run the view command
pub fn run_view(config: &AppConfig, file: Option<&Path>, quiet: bool) -> Result<i32> {
    let (session, _) = open_session(config, file)?;

    let output_target = OutputTarget::from_option(config.output.file.clone());
    let effective_output = auto_detect_format(config.output.format, &output_target);

    if effective_output == ReportFormat::Tui {
        let mut app = ViewApp::new(session, file.map(Path::to_path_buf), &config.tui);
        run_view_tui(&mut app, config.tui.tick_rate())?;
    } else {
        let view = CatalogView::from_state(session.state());
        output_report(
            &view,
            effective_output,
            &output_target,
            config.output.no_color,
            quiet,
        )?;
    }

    Ok(exit_codes::SUCCESS)
}
