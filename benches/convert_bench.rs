//! Benchmarks for echo-vsc conversion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use echo_vsc::core::{
    render_plist, sanitize_json, FixedThemeType, Palette, ThemeDocument, ThemeResolver, ThemeType,
};
use std::path::Path;

/// Generate a theme file with `n` extra color entries, comments, and trailing commas.
fn generate_theme(n: usize) -> Vec<u8> {
    let mut buf = String::from("{\n  // generated\n  \"type\": \"dark\",\n  \"colors\": {\n");
    buf.push_str("    \"terminal.background\": \"#282a36\",\n");
    buf.push_str("    \"terminal.ansiRed\": \"#f55\", /* short */\n");
    for i in 0..n {
        buf.push_str(&format!(
            "    \"editor.generated{}.background\": \"#{:06x}\",\n",
            i,
            (i as u64).wrapping_mul(2_654_435_761) & 0xff_ffff
        ));
    }
    buf.push_str("  },\n  \"tokenColors\": [],\n}\n");
    buf.into_bytes()
}

fn bench_sanitize(c: &mut Criterion) {
    let mut group = c.benchmark_group("sanitize_json");

    for size in [10, 100, 1_000, 10_000] {
        let data = generate_theme(size);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| sanitize_json(black_box(data)));
        });
    }

    group.finish();
}

fn bench_resolve_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_render");
    let palette = Palette::builtin();

    for size in [10, 1_000] {
        let data = generate_theme(size);
        let document = ThemeDocument::parse(&data, Path::new("bench.json")).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &document, |b, doc| {
            let resolver = ThemeResolver::new(&palette);
            b.iter(|| {
                let colors = resolver
                    .resolve(black_box(&doc.colors), ThemeType::Dark)
                    .unwrap();
                render_plist(&colors)
            });
        });
    }

    group.finish();
}

fn bench_full_document(c: &mut Criterion) {
    let palette = Palette::builtin();
    let data = generate_theme(500);

    c.bench_function("parse_and_convert", |b| {
        b.iter(|| {
            let doc = ThemeDocument::parse(black_box(&data), Path::new("bench.json")).unwrap();
            echo_vsc::core::convert_document(&doc, "Bench", &palette, &mut FixedThemeType(None))
                .unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_sanitize,
    bench_resolve_and_render,
    bench_full_document,
);

criterion_main!(benches);
