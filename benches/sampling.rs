use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use taylorscope::{render, FunctionKind, SampleDomain, Sampler, SeriesParameters};

fn criterion_benchmark(c: &mut Criterion) {
    //
    // Default domain, every function at the largest slider term count
    let mut group = c.benchmark_group("sample_vs_function");
    for kind in FunctionKind::ALL {
        let params = SeriesParameters::new(kind, 10, 1.0_f64);
        group.bench_with_input(BenchmarkId::from_parameter(kind), &params, |b, params| {
            b.iter(|| taylorscope::sample(black_box(params)));
        });
    }
    group.finish();

    //
    // Scaling with term count
    let mut group = c.benchmark_group("sample_vs_terms");
    for terms in [1, 10, 100, 1_000] {
        let params = SeriesParameters::new(FunctionKind::Exponential, terms, 0.0_f64);
        group.bench_with_input(BenchmarkId::from_parameter(terms), &params, |b, params| {
            b.iter(|| taylorscope::sample(black_box(params)));
        });
    }
    group.finish();

    //
    // Scaling with domain density
    let mut group = c.benchmark_group("sample_vs_step");
    for step in [0.1, 0.01, 0.001] {
        let domain = SampleDomain::new(-4.0..=4.0, step).expect("valid domain");
        let sampler = Sampler::new(domain);
        let params = SeriesParameters::new(FunctionKind::Sine, 10, 0.0_f64);
        group.bench_with_input(BenchmarkId::from_parameter(step), &params, |b, params| {
            b.iter(|| sampler.sample(black_box(params)));
        });
    }
    group.finish();

    c.bench_function("render", |b| {
        let params = SeriesParameters::new(FunctionKind::NaturalLogShifted, 10, -1.5_f64);
        b.iter(|| render(black_box(&params)).to_string());
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
