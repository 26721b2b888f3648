use catalog_core::{normalize, normalize_joined, NormalizerConfig};
use criterion::{criterion_group, criterion_main, Criterion};

const DESCRIPTION: &str = "Yorker trackpants made from 100% rich combed cotton giving it a rich look. \
Designed for comfort and performance, these pants are perfect for running, walking, or lounging! \
Pack of 2, machine washable; elastic waistband with drawstring closure.";

fn bench_normalize(c: &mut Criterion) {
    let config = NormalizerConfig::english();
    c.bench_function("normalize_description", |b| b.iter(|| normalize(DESCRIPTION, &config)));

    let fields = ["Solid Women Multicolor Track Pants", DESCRIPTION, "York", "Clothing and Accessories", "Bottomwear", "Shyam Enterprises"];
    c.bench_function("normalize_joined_fields", |b| b.iter(|| normalize_joined(&fields, &config)));
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
