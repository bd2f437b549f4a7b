//! Catalog command handlers: load, clear, allergens, filter and lookup.

use crate::app::{Command, Outcome, Session, messages};
use crate::config::AppConfig;
use crate::filter::ProductLookup;
use crate::model::AllergenIndex;
use crate::pipeline::{
    OutputTarget, auto_detect_format, exit_codes, open_session, open_store, output_report,
    write_output,
};
use crate::reports::{CatalogView, ReportFormat};
use anyhow::{Context, Result};
use std::path::Path;

/// Load a catalog file and persist it.
pub fn run_load(config: &AppConfig, file: &Path, quiet: bool) -> Result<i32> {
    let (session, outcome) = open_session(config, Some(file))?;
    if !quiet {
        let state = session.state();
        if let Some(message) = state.status.peek() {
            eprintln!("{message}");
        }
        eprintln!("{}", load_summary(&outcome, state.index()));
    }
    Ok(exit_codes::SUCCESS)
}

/// Forget the persisted catalog.
pub fn run_clear(config: &AppConfig, quiet: bool) -> Result<i32> {
    let mut session = Session::new(open_store(config));
    session.handle(Command::ClearCatalog);
    if !quiet && let Some(message) = session.state().status.peek() {
        eprintln!("{message}");
    }
    Ok(exit_codes::SUCCESS)
}

/// Print the allergen index of the loaded catalog.
pub fn run_allergens(config: &AppConfig, file: Option<&Path>, json: bool) -> Result<i32> {
    let (session, _) = open_session(config, file)?;
    let index = session.state().index();

    if json {
        let content =
            serde_json::to_string_pretty(index.as_slice()).context("Failed to serialize index")?;
        println!("{content}");
    } else if index.is_empty() {
        eprintln!("{}", messages::NO_ALLERGENS);
    } else {
        for label in index.iter() {
            println!("{label}");
        }
    }
    Ok(exit_codes::SUCCESS)
}

/// Print the products visible for the configured selection and mode.
pub fn run_filter(config: &AppConfig, file: Option<&Path>, quiet: bool) -> Result<i32> {
    let (session, _) = open_session(config, file)?;
    let view = CatalogView::from_state(session.state());

    let output_target = OutputTarget::from_option(config.output.file.clone());
    let format = match auto_detect_format(config.output.format, &output_target) {
        ReportFormat::Tui => ReportFormat::Summary,
        other => other,
    };
    output_report(&view, format, &output_target, config.output.no_color, quiet)?;

    if view.is_empty() {
        Ok(exit_codes::NO_MATCHES)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

/// Print the allergens of the product whose name or id equals `query`.
pub fn run_lookup(config: &AppConfig, query: &str, file: Option<&Path>) -> Result<i32> {
    let (mut session, _) = open_session(config, file)?;
    session.handle(Command::SetSearch(query.trim().to_string()));

    let state = session.state();
    let result = state.lookup();
    let output_target = OutputTarget::from_option(config.output.file.clone());
    write_output(&format_lookup(&result), &output_target, true)?;

    if result.is_found() {
        Ok(exit_codes::SUCCESS)
    } else {
        Ok(exit_codes::NO_MATCHES)
    }
}

fn load_summary(outcome: &Outcome, index: &AllergenIndex) -> String {
    match outcome {
        Outcome::CatalogLoaded {
            shape,
            products,
            persisted,
        } => format!(
            "{products} Produkte, {} Allergene ({}, {})",
            index.len(),
            shape.name(),
            if *persisted { "gespeichert" } else { "nicht gespeichert" }
        ),
        _ => format!("{} Allergene", index.len()),
    }
}

/// Render a lookup result the way the viewer shows it.
fn format_lookup(result: &ProductLookup<'_>) -> String {
    match result {
        ProductLookup::Found { product, allergens } => {
            let found = if allergens.is_empty() {
                messages::NONE.to_string()
            } else {
                allergens.join(", ")
            };
            format!(
                "{} ({})\n{} {found}",
                product.name,
                product.id,
                messages::FOUND_ALLERGENS
            )
        }
        ProductLookup::NoQuery | ProductLookup::NotFound => messages::NO_PRODUCTS.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::lookup;
    use crate::parsers::parse_catalog_str;

    const BAKERY: &str = r#"{"products": [
        {"id": "b1", "name": "Brot", "components": [{"name": "Teig",
            "ingredients": [{"name": "Mehl", "allergens": ["Gluten"]}]}]},
        {"id": "o1", "name": "Obstsalat", "components": [{"name": "Obst",
            "ingredients": [{"name": "Apfel", "allergens": []}]}]}
    ]}"#;

    fn bakery_file(dir: &Path) -> std::path::PathBuf {
        let file = dir.join("katalog.json");
        std::fs::write(&file, BAKERY).expect("write");
        file
    }

    #[test]
    fn test_format_lookup() {
        let catalog = parse_catalog_str(BAKERY).expect("parse").catalog;

        let found = format_lookup(&lookup(&catalog, "brot"));
        assert_eq!(found, "Brot (b1)\nGefundene Allergene: Gluten");

        let none = format_lookup(&lookup(&catalog, "O1"));
        assert!(none.ends_with("Gefundene Allergene: Keine"));

        assert_eq!(
            format_lookup(&lookup(&catalog, "Kuchen")),
            "Keine Produkte gefunden."
        );
    }

    #[test]
    fn test_lookup_exit_codes() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = bakery_file(dir.path());
        let config = AppConfig::builder()
            .persist(false)
            .output_file(Some(dir.path().join("out.txt")))
            .build();

        assert_eq!(
            run_lookup(&config, "Brot", Some(&file)).expect("lookup"),
            exit_codes::SUCCESS
        );
        assert_eq!(
            run_lookup(&config, "Kuchen", Some(&file)).expect("lookup"),
            exit_codes::NO_MATCHES
        );
    }

    #[test]
    fn test_filter_exit_code_when_nothing_remains() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = bakery_file(dir.path());
        let out = dir.path().join("out.txt");

        let contains_gluten = AppConfig::builder()
            .persist(false)
            .mode(crate::model::FilterMode::Contains)
            .allergens(vec!["Gluten".to_string()])
            .output_file(Some(out.clone()))
            .build();
        assert_eq!(
            run_filter(&contains_gluten, Some(&file), true).expect("filter"),
            exit_codes::SUCCESS
        );
        let report = std::fs::read_to_string(&out).expect("read");
        assert!(report.contains("Brot (b1)"));
        assert!(!report.contains("Obstsalat"));

        let empty = dir.path().join("leer.json");
        std::fs::write(&empty, "[]").expect("write");
        let config = AppConfig::builder()
            .persist(false)
            .output_file(Some(out))
            .build();
        assert_eq!(
            run_filter(&config, Some(&empty), true).expect("filter"),
            exit_codes::NO_MATCHES
        );
    }

    #[test]
    fn test_load_then_clear() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = bakery_file(dir.path());
        let config = AppConfig::builder().data_dir(dir.path().join("store")).build();

        assert_eq!(run_load(&config, &file, true).expect("load"), exit_codes::SUCCESS);
        let (session, outcome) = open_session(&config, None).expect("restore");
        assert_eq!(outcome, Outcome::CatalogRestored { products: 2 });
        assert_eq!(session.state().index().as_slice(), ["Gluten"]);

        assert_eq!(run_clear(&config, true).expect("clear"), exit_codes::SUCCESS);
        let (_, outcome) = open_session(&config, None).expect("restore");
        assert_eq!(outcome, Outcome::NothingPersisted);
    }

    #[test]
    fn test_load_summary() {
        let catalog = parse_catalog_str(BAKERY).expect("parse").catalog;
        let index = AllergenIndex::build(&catalog);
        let outcome = Outcome::CatalogLoaded {
            shape: crate::parsers::CatalogShape::ProductsField,
            products: 2,
            persisted: false,
        };
        let summary = load_summary(&outcome, &index);
        assert!(summary.starts_with("2 Produkte, 1 Allergene"));
        assert!(summary.ends_with("nicht gespeichert)"));
    }
}
