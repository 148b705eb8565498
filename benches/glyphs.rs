use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qr_style::encoder::{EncodeOptions, encode_with};
use qr_style::glyphs::ShapeRenderer;
use qr_style::layout::{ModuleGrid, ProtectedZoneSet};
use qr_style::models::{ModuleShape, RenderedQrImage};
use qr_style::utils::grayscale::rgba_to_grayscale_parallel;

fn base_image(text: &str) -> (RenderedQrImage, ProtectedZoneSet) {
    let img = encode_with(text, &EncodeOptions::default()).unwrap();
    let grid =
        ModuleGrid::locate(img.width(), img.height(), img.module_count, img.quiet_zone_px).unwrap();
    (img, ProtectedZoneSet::new(grid))
}

fn bench_glyph_shapes(c: &mut Criterion) {
    let (img, zones) = base_image("https://example.com/benchmarks/glyphs");
    let renderer = ShapeRenderer::default();
    let mut group = c.benchmark_group("glyph_shapes");
    for shape in ModuleShape::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(shape), &shape, |b, &shape| {
            b.iter(|| {
                let mut styled = img.clone();
                renderer.render(&mut styled, black_box(&zones), shape).unwrap()
            })
        });
    }
    group.finish();
}

fn bench_glyph_large_symbol(c: &mut Criterion) {
    // Version 20+ takes the parallel path
    let (img, zones) = base_image(&"large symbol payload ".repeat(30));
    let renderer = ShapeRenderer::default();
    c.bench_function("glyph_fluid_large", |b| {
        b.iter(|| {
            let mut styled = img.clone();
            renderer
                .render(&mut styled, black_box(&zones), ModuleShape::Fluid)
                .unwrap()
        })
    });
}

fn bench_grayscale(c: &mut Criterion) {
    let image = vec![128u8; 1000 * 1000 * 4];
    c.bench_function("rgba_to_grayscale_parallel_1000x1000", |b| {
        b.iter(|| rgba_to_grayscale_parallel(black_box(&image), black_box(1000), black_box(1000)))
    });
}

criterion_group!(
    benches,
    bench_glyph_shapes,
    bench_glyph_large_symbol,
    bench_grayscale
);
criterion_main!(benches);
