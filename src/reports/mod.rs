//! Report generation for filtered catalogs.
//!
//! - Summary: one line per visible product
//! - Table: component and ingredient table per product
//! - JSON: structured data for scripting

mod json;
mod summary;
mod types;

pub use json::JsonReporter;
pub use summary::{EMPTY_CELL, SummaryReporter, TableReporter, detail_rows};
pub use types::{CatalogView, ReportFormat};
pub(crate) use types::product_allergens;

use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Unsupported report format: {0}")]
    UnsupportedFormat(ReportFormat),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render a filtered catalog view
    fn generate(&self, view: &CatalogView<'_>) -> Result<String, ReportError>;

    /// Write the rendered report to a writer
    fn write_to(&self, view: &CatalogView<'_>, writer: &mut dyn Write) -> Result<(), ReportError> {
        let report = self.generate(view)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a reporter for a concrete (non-interactive) format.
pub fn create_reporter(
    format: ReportFormat,
    colored: bool,
) -> Result<Box<dyn ReportGenerator>, ReportError> {
    match format {
        ReportFormat::Summary => Ok(Box::new(if colored {
            SummaryReporter::new()
        } else {
            SummaryReporter::new().no_color()
        })),
        ReportFormat::Table => Ok(Box::new(if colored {
            TableReporter::new()
        } else {
            TableReporter::new().no_color()
        })),
        ReportFormat::Json => Ok(Box::new(JsonReporter::new())),
        other @ (ReportFormat::Auto | ReportFormat::Tui) => {
            Err(ReportError::UnsupportedFormat(other))
        }
    }
}
