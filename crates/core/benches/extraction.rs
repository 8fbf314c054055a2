use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use homedigest_core::{Digest, DigestPage, Document, PatternLibrary, clean_text, preprocess_html, segment_page};

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("../../tests/fixtures/{}", name)).unwrap()
}

fn bench_segment(c: &mut Criterion) {
    let small = fixture("zillow.html");
    let medium = fixture("digest_page.html");
    let large = medium.repeat(50);

    let mut group = c.benchmark_group("segment");

    group.bench_with_input(BenchmarkId::new("small", "1 email"), &small, |b, html| {
        b.iter(|| segment_page(&Document::parse(black_box(html)).unwrap()))
    });

    group.bench_with_input(BenchmarkId::new("medium", "3 emails"), &medium, |b, html| {
        b.iter(|| segment_page(&Document::parse(black_box(html)).unwrap()))
    });

    group.bench_with_input(BenchmarkId::new("large", "150 emails"), &large, |b, html| {
        b.iter(|| segment_page(&Document::parse(black_box(html)).unwrap()))
    });

    group.finish();
}

fn bench_full_extraction(c: &mut Criterion) {
    let html = fixture("digest_page.html").repeat(20);
    let digest = Digest::new();

    c.bench_function("full_extraction", |b| {
        b.iter(|| digest.run([DigestPage::from_html("bench.html", black_box(html.as_str()))]))
    });
}

fn bench_preprocess(c: &mut Criterion) {
    let html = fixture("digest_page.html");
    let config = Default::default();

    c.bench_function("preprocess", |b| b.iter(|| preprocess_html(black_box(&html), &config)));
}

fn bench_recognizers(c: &mut Criterion) {
    let patterns = PatternLibrary::default();
    let text = clean_text(
        "$798,000 2 Beds · 2.5 Baths · 968 Sq. Ft. Price Cut 1234 Fake Street, Seattle, WA 98109 Open: Sat. 11am-1pm",
    );

    c.bench_function("address_recognizer", |b| b.iter(|| patterns.address(black_box(&text))));
}

criterion_group!(
    benches,
    bench_segment,
    bench_full_extraction,
    bench_preprocess,
    bench_recognizers
);
criterion_main!(benches);
