#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz catalog parsing and normalization.
///
/// Any text that parses as JSON must normalize into a catalog whose names
/// are all non-empty, and building its allergen index must not panic.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data)
        && let Ok(parsed) = allergen_tools::parse_catalog_str(s)
    {
        for product in &parsed.catalog.products {
            assert!(!product.name.is_empty());
            assert!(!product.id.is_empty());
        }
        let _ = allergen_tools::AllergenIndex::build(&parsed.catalog);
    }
});
