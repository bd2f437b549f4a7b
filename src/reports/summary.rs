//! Summary and table reporters for terminal output.

use super::types::product_allergens;
use super::{CatalogView, ReportError, ReportFormat, ReportGenerator};
use crate::app::messages;
use unicode_width::UnicodeWidthStr;

/// Placeholder for an empty cell.
pub const EMPTY_CELL: &str = "—";

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

fn header_lines(view: &CatalogView<'_>, color: impl Fn(&str, &str) -> String) -> Vec<String> {
    let selection = if view.selection.is_empty() {
        messages::NONE.to_string()
    } else {
        view.selection.iter().collect::<Vec<_>>().join(", ")
    };
    let allergens = if view.index.is_empty() {
        messages::NO_ALLERGENS.to_string()
    } else {
        view.index.iter().collect::<Vec<_>>().join(", ")
    };
    vec![
        format!("{}  {}", color("Modus:", "cyan"), view.mode.label()),
        format!("{}  {}", color("Auswahl:", "cyan"), selection),
        format!("{}  {}", color("Allergene:", "cyan"), allergens),
        format!(
            "{}  {} / {}",
            color("Produkte:", "cyan"),
            view.products.len(),
            view.total
        ),
    ]
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    colored: bool,
}

impl SummaryReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(&self, view: &CatalogView<'_>) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        lines.push(self.color("Allergen-Übersicht", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        lines.extend(header_lines(view, |t, c| self.color(t, c)));
        lines.push(String::new());

        if view.is_empty() {
            lines.push(self.color(messages::NO_PRODUCTS, "yellow"));
        }
        for product in &view.products {
            let allergens = product_allergens(product);
            let allergens = if allergens.is_empty() {
                self.color(EMPTY_CELL, "dim")
            } else {
                self.color(&allergens.join(", "), "red")
            };
            lines.push(format!(
                "{} ({}): {}",
                self.color(&product.name, "bold"),
                product.id,
                allergens
            ));
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

/// Table reporter: one table of components and ingredients per product
pub struct TableReporter {
    colored: bool,
    /// Maximum width of a single column
    max_column_width: usize,
}

impl TableReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            colored: true,
            max_column_width: 40,
        }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    #[must_use]
    pub const fn max_column_width(mut self, width: usize) -> Self {
        self.max_column_width = width;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn render_rows(&self, rows: &[[String; 3]]) -> Vec<String> {
        let headers = ["Komponente", "Zutat", "Allergene"];
        let mut widths = headers.map(UnicodeWidthStr::width);
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width().min(self.max_column_width));
            }
        }

        let render = |cells: [&str; 3]| -> String {
            cells
                .iter()
                .zip(widths)
                .map(|(cell, width)| pad(&truncate(cell, self.max_column_width), width))
                .collect::<Vec<_>>()
                .join(" │ ")
                .trim_end()
                .to_string()
        };

        let mut lines = vec![self.color(&render(headers), "bold")];
        lines.push(
            widths
                .iter()
                .map(|w| "─".repeat(*w))
                .collect::<Vec<_>>()
                .join("─┼─"),
        );
        for row in rows {
            lines.push(render([&row[0], &row[1], &row[2]]));
        }
        lines
    }
}

impl Default for TableReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Rows of the detail table of one product.
///
/// A component without ingredients yields one row with an empty ingredient.
#[must_use]
pub fn detail_rows(product: &crate::model::Product) -> Vec<[String; 3]> {
    let mut rows = Vec::new();
    for component in &product.components {
        if component.ingredients.is_empty() {
            rows.push([
                component.name.clone(),
                EMPTY_CELL.to_string(),
                EMPTY_CELL.to_string(),
            ]);
            continue;
        }
        for ingredient in &component.ingredients {
            let allergens = if ingredient.allergens.is_empty() {
                EMPTY_CELL.to_string()
            } else {
                ingredient.allergens.join(", ")
            };
            rows.push([component.name.clone(), ingredient.name.clone(), allergens]);
        }
    }
    rows
}

impl ReportGenerator for TableReporter {
    fn generate(&self, view: &CatalogView<'_>) -> Result<String, ReportError> {
        let mut lines = header_lines(view, |t, c| self.color(t, c));

        if view.is_empty() {
            lines.push(String::new());
            lines.push(self.color(messages::NO_PRODUCTS, "yellow"));
        }
        for product in &view.products {
            lines.push(String::new());
            lines.push(format!(
                "{} {}",
                self.color(&product.name, "bold"),
                self.color(&format!("({})", product.id), "dim")
            ));
            let rows = detail_rows(product);
            if rows.is_empty() {
                lines.push(self.color(EMPTY_CELL, "dim"));
            } else {
                lines.extend(self.render_rows(&rows));
            }
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }
}

/// Pad `s` with spaces to `width` display columns.
fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(fill))
}

/// Truncate to at most `max_width` display columns, marking the cut with `…`.
fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
