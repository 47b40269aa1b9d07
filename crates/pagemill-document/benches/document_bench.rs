// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the pagemill-document crate: page assembly for the
// image and text pipelines, without touching the filesystem.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage};

use pagemill_core::PageSize;
use pagemill_document::{ImageProcessor, PageLayout, PdfWriter, TextBlock};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Place a 1600x1200 photo-sized image on a Letter page and serialise it.
/// The image is larger than the page, so the fit-to-page branch is taken.
fn bench_image_page(c: &mut Criterion) {
    let image = ImageProcessor::from_dynamic(DynamicImage::ImageRgb8(RgbImage::from_pixel(
        1600,
        1200,
        Rgb([90, 140, 200]),
    )));
    let layout = PageLayout::fit(image.width(), image.height(), PageSize::LETTER);

    c.bench_function("image_page (1600x1200)", |b| {
        b.iter(|| {
            let mut writer = PdfWriter::letter("bench");
            writer.add_image_page(black_box(&image), black_box(&layout));
            black_box(writer.finish());
        });
    });
}

/// Set a 60-line text file on one page and serialise it.
fn bench_text_page(c: &mut Criterion) {
    let text: String = (0..60)
        .map(|i| format!("{i:>4}  the quick brown fox jumps over the lazy dog   \n"))
        .collect();

    c.bench_function("text_page (60 lines)", |b| {
        b.iter(|| {
            let block = TextBlock::from_text(black_box(&text));
            let mut writer = PdfWriter::letter("bench");
            writer.add_text_page(&block);
            black_box(writer.finish());
        });
    });
}

criterion_group!(benches, bench_image_page, bench_text_page);
criterion_main!(benches);
