//! Example: Synthesize a wave height field from a random spectrum.
//!
//! Builds a conjugate-symmetric N x N spectrum of complex noise with a falloff
//! with wavenumber, then runs the inverse transform over every row and every
//! column. The symmetry makes the resulting heights real.
//! Uses the GPU when one is available and the CPU engine otherwise.
//!
//! Run with:
//!     cargo run --example height_field

use anyhow::Context;
use butterfly_fft::fft::signal::{conjugate_symmetric, white_noise};
use butterfly_fft::gpu::GpuContext;
use butterfly_fft::{Complex, DynamicFft, FftConfig, FftProcessor};
use std::time::Instant;

const SIZE: usize = 256;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Butterfly FFT - Height Field Example");
    println!("====================================\n");

    let ctx = GpuContext::new().await.ok();
    if let Some(ctx) = &ctx {
        println!("GPU adapter: {}", ctx.adapter_info().name);
    }

    let config = FftConfig::with_max_size(SIZE);
    let mut engine = DynamicFft::gpu_with_fallback(
        ctx.as_ref().map(|c| c.device.clone()),
        ctx.as_ref().map(|c| c.queue.clone()),
        config,
    )
    .context("Failed to create FFT engine")?;
    println!(
        "Engine: {} ({}x{} grid)\n",
        if engine.is_gpu() { "GPU" } else { "CPU" },
        SIZE,
        SIZE
    );

    let mut field = spectrum(SIZE);

    let start = Instant::now();
    for row in field.chunks_exact_mut(SIZE) {
        engine.inverse(row).context("Row transform failed")?;
    }
    transpose(&mut field, SIZE);
    for column in field.chunks_exact_mut(SIZE) {
        engine.inverse(column).context("Column transform failed")?;
    }
    transpose(&mut field, SIZE);
    let elapsed = start.elapsed();

    let residue = field.iter().map(|c| c.im.abs()).fold(0.0f32, f32::max);
    let heights: Vec<f32> = field.iter().map(|c| c.re).collect();
    let min = heights.iter().cloned().fold(f32::INFINITY, f32::min);
    let max = heights.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let mean = heights.iter().sum::<f32>() / heights.len() as f32;

    println!("Transformed {} rows and columns in {:.2?}", 2 * SIZE, elapsed);
    println!("  Height range: [{:.5}, {:.5}]", min, max);
    println!("  Mean height: {:.5}", mean);
    println!("  Largest imaginary residue: {:.2e}", residue);

    Ok(())
}

/// Complex noise scaled by `1 / (1 + |k|^2)`, made conjugate-symmetric.
fn spectrum(size: usize) -> Vec<Complex<f32>> {
    let noise = white_noise::<f32>(size * size, 1.0, 2024);
    let half = size as i64 / 2;

    let mut spectrum: Vec<Complex<f32>> = noise
        .into_iter()
        .enumerate()
        .map(|(i, phase)| {
            let kx = (i % size) as i64;
            let ky = (i / size) as i64;
            let kx = if kx > half { kx - size as i64 } else { kx };
            let ky = if ky > half { ky - size as i64 } else { ky };
            let k2 = (kx * kx + ky * ky) as f32;
            if k2 == 0.0 {
                Complex::new(0.0, 0.0)
            } else {
                phase / (1.0 + k2)
            }
        })
        .collect();
    conjugate_symmetric(&mut spectrum, size);
    spectrum
}

fn transpose(field: &mut [Complex<f32>], size: usize) {
    for y in 0..size {
        for x in (y + 1)..size {
            field.swap(y * size + x, x * size + y);
        }
    }
}
