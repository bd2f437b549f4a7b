//! Output handling for reports.
//!
//! Provides utilities for auto-detecting output format and writing reports.

use crate::reports::{CatalogView, ReportFormat, create_reporter};
use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Target for output - either stdout or a file
#[derive(Debug, Clone)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }

    /// Check if output is to a terminal
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stdout) && std::io::stdout().is_terminal()
    }
}

/// Resolve `Auto` to TUI for interactive terminals and summary otherwise.
#[must_use]
pub fn auto_detect_format(format: ReportFormat, target: &OutputTarget) -> ReportFormat {
    match format {
        ReportFormat::Auto => {
            if target.is_terminal() {
                ReportFormat::Tui
            } else {
                ReportFormat::Summary
            }
        }
        other => other,
    }
}

/// Determine if color should be used based on flags and environment
#[must_use]
pub fn should_use_color(no_color_flag: bool) -> bool {
    !no_color_flag && std::env::var("NO_COLOR").is_err()
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            println!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            if !quiet {
                tracing::info!("Report written to {}", path.display());
            }
            Ok(())
        }
    }
}

/// Render a non-interactive report and write it to the target.
pub fn output_report(
    view: &CatalogView<'_>,
    format: ReportFormat,
    target: &OutputTarget,
    no_color: bool,
    quiet: bool,
) -> Result<()> {
    // Files never get ANSI escapes
    let colored = should_use_color(no_color) && matches!(target, OutputTarget::Stdout);
    let reporter = create_reporter(format, colored)?;
    let content = reporter.generate(view)?;
    write_output(&content, target, quiet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AllergenIndex, FilterMode, Selection};
    use crate::parsers::parse_catalog_str;

    #[test]
    fn test_output_target_from_option() {
        assert!(matches!(OutputTarget::from_option(None), OutputTarget::Stdout));
        let path = PathBuf::from("/tmp/report.json");
        match OutputTarget::from_option(Some(path.clone())) {
            OutputTarget::File(p) => assert_eq!(p, path),
            OutputTarget::Stdout => panic!("Expected File variant"),
        }
    }

    #[test]
    fn test_auto_detect_format() {
        let file = OutputTarget::File(PathBuf::from("/tmp/report.txt"));
        assert_eq!(auto_detect_format(ReportFormat::Auto, &file), ReportFormat::Summary);
        assert_eq!(
            auto_detect_format(ReportFormat::Json, &OutputTarget::Stdout),
            ReportFormat::Json
        );
    }

    #[test]
    fn test_should_use_color_with_flag() {
        assert!(!should_use_color(true));
    }

    #[test]
    fn test_output_report_to_file() {
        let catalog = parse_catalog_str(r#"[{"name": "Brot"}]"#).expect("parse").catalog;
        let index = AllergenIndex::build(&catalog);
        let selection = Selection::new();
        let view = CatalogView::new(&catalog, &index, &selection, FilterMode::Suitable);

        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("report.json");
        output_report(
            &view,
            ReportFormat::Json,
            &OutputTarget::File(path.clone()),
            false,
            true,
        )
        .expect("report");
        let content = std::fs::read_to_string(path).expect("read");
        assert!(content.contains("\"Brot\""));
    }
}
