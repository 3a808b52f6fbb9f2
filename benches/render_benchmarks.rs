#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::panic_in_result_fn)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use zmarkup::test_utils::*;

fn table(rows: usize) -> Document {
    let mut doc = Document::with_doctype().unwrap();
    doc.add_tag("table", None, Attributes::new().set("class", "data"))
        .unwrap()
        .scope(|doc| {
            for row in 0..rows {
                doc.add_tag("tr", None, Attributes::new())?.scope(|doc| {
                    doc.add_tag("td", Some(row.to_string().as_str()), Attributes::new())?;
                    doc.add_tag("td", Some("a & b"), Attributes::new().set("_data_x", "y"))?;
                    Ok(())
                })?;
            }
            Ok(())
        })
        .unwrap();
    doc
}

// Benchmark text rendering in both profiles
fn bench_render_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("Text Renderer");

    for rows in [10, 100, 1000] {
        let doc = table(rows);
        group.bench_with_input(BenchmarkId::new("dev", rows), &doc, |b, doc| {
            b.iter(|| black_box(doc).render(&TextFormat::dev()).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("prod", rows), &doc, |b, doc| {
            b.iter(|| black_box(doc).render(&TextFormat::prod()).unwrap());
        });
    }

    group.finish();
}

// Benchmark code rendering followed by replay
fn bench_code_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("Code Form");

    for rows in [10, 100, 1000] {
        let code = table(rows).render_code(&TextFormat::dev()).unwrap();
        group.bench_with_input(BenchmarkId::new("replay", rows), &code, |b, code| {
            b.iter(|| replay(black_box(code)).unwrap());
        });
    }

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("build example domain", |b| {
        b.iter(|| black_box(example_domain().unwrap()));
    });
}

criterion_group!(benches, bench_render_text, bench_code_round_trip, bench_build);
criterion_main!(benches);
