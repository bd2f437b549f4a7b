//! Benchmarks for normalization, indexing and filtering of large catalogs.

use allergen_tools::filter::filter;
use allergen_tools::{AllergenIndex, FilterMode, Selection, normalize, parse_catalog_str};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use serde_json::{Value, json};
use std::hint::black_box;

const LABELS: &[&str] = &[
    "Ei", "Erdnüsse", "Fisch", "Gluten", "Krebstiere", "Lupinen", "Milch", "Schalenfrüchte",
    "Sellerie", "Senf", "Sesam", "Soja", "Sulfite", "Weichtiere",
];

fn synthetic_catalog(products: usize) -> Value {
    let products: Vec<Value> = (0..products)
        .map(|p| {
            let components: Vec<Value> = (0..3)
                .map(|c| {
                    let ingredients: Vec<Value> = (0..4)
                        .map(|i| {
                            let label = LABELS[(p * 7 + c * 3 + i) % LABELS.len()];
                            if (p + i) % 5 == 0 {
                                json!({"name": format!("Zutat {i}"), "allergens": []})
                            } else {
                                json!({"name": format!("Zutat {i}"), "allergens": [label]})
                            }
                        })
                        .collect();
                    json!({"name": format!("Komponente {c}"), "ingredients": ingredients})
                })
                .collect();
            json!({"id": format!("p{p}"), "name": format!("Produkt {p}"), "components": components})
        })
        .collect();
    json!({ "products": products })
}

fn benchmark_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    for size in [100, 1_000, 10_000] {
        let text = synthetic_catalog(size).to_string();
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse_catalog_str(black_box(text)));
        });
    }
    group.finish();
}

fn benchmark_index(c: &mut Criterion) {
    let catalog = normalize(&synthetic_catalog(10_000));
    c.bench_function("index_build_10000", |b| {
        b.iter(|| AllergenIndex::build(black_box(&catalog)));
    });
}

fn benchmark_filter(c: &mut Criterion) {
    let catalog = normalize(&synthetic_catalog(10_000));
    let selection: Selection = ["Gluten", "Milch", "Sesam"].into_iter().collect();

    let mut group = c.benchmark_group("filter_10000");
    for mode in [FilterMode::Suitable, FilterMode::Contains] {
        group.bench_with_input(BenchmarkId::from_parameter(mode), &mode, |b, mode| {
            b.iter(|| filter(black_box(&catalog), black_box(&selection), *mode).len());
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_normalize, benchmark_index, benchmark_filter);
criterion_main!(benches);
