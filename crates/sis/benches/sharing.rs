use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{thread_rng, Rng};
use sis::bmp::Bitmap;
use sis::sharing::{SecretSharer, ShamirImageSharing, SharingParametersBuilder};
use sis::stego::{extract_shadow, hide_shadow};
use std::hint::black_box;

pub fn sharing_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("sharing");
    group.sample_size(20);
    let mut rng = thread_rng();

    // A 240x240 secret: 57600 pixel bytes, divisible by every k below.
    let secret: Vec<u8> = (0..240 * 240).map(|_| rng.gen_range(0..=250)).collect();

    for (k, n) in [(2usize, 4usize), (3, 6), (4, 8), (8, 10)] {
        let params = SharingParametersBuilder::new()
            .set_threshold(k)
            .set_shadow_count(n)
            .build_arc()
            .unwrap();
        let sharer = ShamirImageSharing::new(params);
        let shadows = sharer.form_shadows(&secret).unwrap();

        group.bench_function(BenchmarkId::new("form_shadows", format!("{k}-{n}")), |b| {
            b.iter(|| sharer.form_shadows(black_box(&secret)).unwrap());
        });

        group.bench_function(BenchmarkId::new("reveal_secret", format!("{k}-{n}")), |b| {
            b.iter(|| sharer.reveal_secret(black_box(&shadows[n - k..])).unwrap());
        });
    }

    group.finish();
}

pub fn stego_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("stego");
    let mut rng = thread_rng();

    let secret: Vec<u8> = (0..240 * 240).map(|_| rng.gen_range(0..=250)).collect();
    let params = SharingParametersBuilder::new()
        .set_threshold(3)
        .set_shadow_count(3)
        .build_arc()
        .unwrap();
    let shadow = ShamirImageSharing::new(params)
        .form_shadows(&secret)
        .unwrap()
        .remove(0);
    let mut cover = Bitmap::new(480, 320, 0).unwrap();
    rng.fill(cover.pixels_mut());

    group.bench_function("hide_shadow", |b| {
        b.iter(|| hide_shadow(black_box(cover.clone()), &shadow).unwrap());
    });

    let stego = hide_shadow(cover.clone(), &shadow).unwrap();
    group.bench_function("extract_shadow", |b| {
        b.iter(|| extract_shadow(black_box(&stego), secret.len(), 3).unwrap());
    });

    group.finish();
}

criterion_group!(sharing, sharing_benchmark, stego_benchmark);
criterion_main!(sharing);
