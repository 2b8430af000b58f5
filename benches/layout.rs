//! Benchmarks for layout and page encoding.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use symbolic_cipher::config::{LayoutConfig, PageConfig};
use symbolic_cipher::glyph::{GlyphVocabulary, Keymap};
use symbolic_cipher::layout::LayoutDriver;
use symbolic_cipher::render::OutputFormat;

fn sample_lines() -> Vec<String> {
    (0..40)
        .map(|i| format!("linea {i} del mensaje secreto con acentos canción y pingüino"))
        .collect()
}

fn bench_layout(c: &mut Criterion) {
    let keymap = Keymap::builtin();
    let config = LayoutConfig::for_page(PageConfig::canvas(), 0);
    let driver = LayoutDriver::new(GlyphVocabulary::standard(), &keymap, config);
    let lines = sample_lines();

    c.bench_function("solution_40_lines", |bench| {
        bench.iter(|| black_box(driver.solution(black_box(&lines))))
    });
}

fn bench_encode(c: &mut Criterion) {
    let keymap = Keymap::builtin();
    let config = LayoutConfig::for_page(PageConfig::letter(), 5);
    let driver = LayoutDriver::new(GlyphVocabulary::standard(), &keymap, config);
    let page = driver.solution(&sample_lines());

    for format in [OutputFormat::Svg, OutputFormat::Pdf] {
        c.bench_function(&format!("encode_{format}"), |bench| {
            bench.iter(|| {
                let mut surface = format.surface(page.width, page.height);
                page.paint(surface.as_mut());
                black_box(surface.encode().unwrap())
            })
        });
    }
}

criterion_group!(benches, bench_layout, bench_encode);
criterion_main!(benches);
