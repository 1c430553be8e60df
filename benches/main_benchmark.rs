use criterion::{black_box, criterion_group, criterion_main, Criterion};

use extreal::utils::Rng;
use extreal::{ConversionSpec, Real, Style};

fn get_values() -> Vec<Real> {
    let mut rng = Rng::new();
    (0..1000)
        .map(|_| {
            let v = f64::from_bits(rng.next_u64());
            Real::from_f64(if v.is_finite() { v } else { 1.0 })
        })
        .collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let values = get_values();

    c.bench_function("add", |b| {
        b.iter(|| {
            let mut sum = Real::zero();
            for v in &values {
                sum = sum + *v;
            }
            black_box(sum)
        })
    });

    c.bench_function("mul", |b| {
        b.iter(|| {
            let mut prod = Real::one();
            for v in &values {
                prod = prod * *v;
            }
            black_box(prod)
        })
    });

    c.bench_function("div", |b| {
        b.iter(|| {
            for v in &values {
                black_box(Real::div(Real::one(), *v));
            }
        })
    });

    c.bench_function("to_decimal", |b| {
        b.iter(|| {
            for v in &values {
                black_box(v.to_decimal());
            }
        })
    });

    let spec = ConversionSpec::new(Style::G);
    c.bench_function("render_g", |b| {
        b.iter(|| {
            for v in &values {
                black_box(v.render(&spec));
            }
        })
    });

    let spec19 = ConversionSpec::new(Style::E).precision(18);
    let strings: Vec<String> =
        values.iter().map(|v| v.render(&spec19)).collect();
    c.bench_function("parse", |b| {
        b.iter(|| {
            for s in &strings {
                black_box(s.parse::<Real>().unwrap());
            }
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
