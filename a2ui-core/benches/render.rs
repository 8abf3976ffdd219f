//! Benchmarks for rendering and validating widget output
//!
//! Run with: cargo bench -p a2ui-core --bench render

use a2ui_core::protocol::MessageValidator;
use a2ui_core::schema::{SchemaStore, BUNDLED_LOCATION, BUNDLED_SCHEMA};
use a2ui_core::TemplateRenderer;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;
use std::hint::black_box;
use std::sync::Arc;

fn restaurant_list_body(count: usize) -> String {
    let restaurants: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "name": format!("Restaurant {}", i),
                "rating": "★★★★☆",
                "detail": "Hand-pulled noodles",
                "imageUrl": "http://localhost:10002/static/noodles.jpeg",
                "address": "123 Main St",
                "infoLink": "[More Info](https://example.com)"
            })
        })
        .collect();
    json!({"widgets": [{"type": "restaurant_list", "data": {"restaurants": restaurants}}]}).to_string()
}

fn bench_render(c: &mut Criterion) {
    let renderer = TemplateRenderer::default();
    let mut group = c.benchmark_group("render_restaurant_list");

    for count in [1, 5, 20] {
        let body = restaurant_list_body(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &body, |b, body| {
            b.iter(|| renderer.render_json(black_box(body)).expect("render failed"));
        });
    }

    group.finish();
}

fn bench_render_and_validate(c: &mut Criterion) {
    let doc = serde_json::from_str(BUNDLED_SCHEMA).expect("bundled schema is JSON");
    let store = SchemaStore::from_document(BUNDLED_LOCATION, doc).expect("bundled schema compiles");
    let validator = MessageValidator::new(Arc::new(store));
    let renderer = TemplateRenderer::default();
    let body = restaurant_list_body(5);

    c.bench_function("render_and_validate_5", |b| {
        b.iter(|| {
            let messages = renderer.render_json(black_box(&body)).expect("render failed");
            validator.validate_typed(&messages).expect("validation failed");
        });
    });
}

criterion_group!(benches, bench_render, bench_render_and_validate);
criterion_main!(benches);
