use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use hnsift_core::{Document, Page, SelectConfig, Sifter, extract_entries, select_entries};

fn bench_parse(c: &mut Criterion) {
    let front = std::fs::read_to_string("../../tests/fixtures/front_page.html").unwrap();
    let legacy = std::fs::read_to_string("../../tests/fixtures/legacy_page.html").unwrap();

    let mut group = c.benchmark_group("parse");

    group.bench_with_input(BenchmarkId::new("front_page", "7 stories"), &front, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.bench_with_input(BenchmarkId::new("legacy_page", "2 stories"), &legacy, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.finish();
}

fn bench_selection(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/front_page.html").unwrap();
    let doc = Document::parse(&html);
    let config = SelectConfig::default();

    c.bench_function("extract_entries", |b| b.iter(|| extract_entries(black_box(&doc), black_box(&config))));
    c.bench_function("select_entries", |b| b.iter(|| select_entries(black_box(&doc), black_box(&config))));
}

fn bench_multi_page(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/front_page.html").unwrap();
    let pages: Vec<Page> = (0..30)
        .map(|index| Page { index, url: format!("https://news.ycombinator.com/news?p={}", index), body: html.clone() })
        .collect();
    let sifter = Sifter::new();

    c.bench_function("sift_30_pages", |b| b.iter(|| sifter.sift_pages(black_box(&pages))));
}

criterion_group!(benches, bench_parse, bench_selection, bench_multi_page);
criterion_main!(benches);
