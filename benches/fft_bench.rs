//! Benchmarks for the butterfly FFT.

use butterfly_fft::fft::signal::white_noise;
use butterfly_fft::{
    transform_with, CpuFft, FftConfig, RayonExecutor, Sequential, TransformOptions, TwiddleTable,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rustfft::FftPlanner;

const SIZES: [usize; 4] = [256, 1024, 4096, 1 << 16];

fn bench_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sequential FFT");
    let table = TwiddleTable::<f32>::forward(1 << 16).unwrap();

    for size in SIZES {
        let input = white_noise::<f32>(size, 1.0, 42);

        group.throughput(Throughput::Elements(size as u64));
        for radix8 in [true, false] {
            let options = TransformOptions::forward().with_radix8(radix8);
            let name = if radix8 { "radix8" } else { "radix2" };
            group.bench_with_input(BenchmarkId::new(name, size), &input, |b, input| {
                let mut buffer = input.clone();
                b.iter(|| {
                    buffer.copy_from_slice(input);
                    transform_with(&mut buffer, &table, &options, &Sequential).unwrap();
                    black_box(&buffer);
                });
            });
        }
    }

    group.finish();
}

fn bench_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("Parallel FFT");
    let table = TwiddleTable::<f32>::forward(1 << 16).unwrap();
    let options = TransformOptions::forward();

    for workers in [2, 4] {
        let executor = RayonExecutor::new(workers, 1024).unwrap();
        let input = white_noise::<f32>(1 << 16, 1.0, 7);

        group.throughput(Throughput::Elements(input.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("workers", workers),
            &input,
            |b, input| {
                let mut buffer = input.clone();
                b.iter(|| {
                    buffer.copy_from_slice(input);
                    transform_with(&mut buffer, &table, &options, &executor).unwrap();
                    black_box(&buffer);
                });
            },
        );
    }

    group.finish();
}

fn bench_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("Height Field Round Trip");
    let engine = CpuFft::<f32>::new(FftConfig::with_max_size(512)).unwrap();
    let input = white_noise::<f32>(512, 1.0, 3);

    group.bench_function("forward_inverse_512", |b| {
        let mut buffer = input.clone();
        b.iter(|| {
            engine.forward(&mut buffer).unwrap();
            engine.inverse(&mut buffer).unwrap();
            black_box(&buffer);
        });
    });

    group.finish();
}

fn bench_rustfft_reference(c: &mut Criterion) {
    let mut group = c.benchmark_group("rustfft Reference");
    let mut planner = FftPlanner::<f32>::new();

    for size in SIZES {
        let fft = planner.plan_fft_forward(size);
        let input = white_noise::<f32>(size, 1.0, 42);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("forward", size), &input, |b, input| {
            let mut buffer = input.clone();
            b.iter(|| {
                buffer.copy_from_slice(input);
                fft.process(&mut buffer);
                black_box(&buffer);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_sequential,
    bench_parallel,
    bench_round_trip,
    bench_rustfft_reference
);
criterion_main!(benches);
