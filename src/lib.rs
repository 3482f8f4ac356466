//! Butterfly FFT
//!
//! In-place power-of-two Fast Fourier Transform built from a radix-2
//! butterfly network, as used for ocean-wave and height-field synthesis.
//!
//! # Features
//!
//! - Twiddle tables built once and shared read-only across transforms
//! - Bit-reversal permutation followed by `log2(N)` butterfly passes
//! - Unrolled radix-8 kernel for the first three passes
//! - Parallel passes on a rayon pool with a join between passes
//! - Explicit scaling (`1/N`, `1/sqrt(N)`, custom) and output-order policy
//! - GPU implementation via wgpu compute shaders (Metal, Vulkan, GL)
//! - JSON-loadable engine configuration

pub mod fft;
pub mod gpu;

// Re-export commonly used types
pub use fft::{
    bit_reverse_permute, transform, transform_with, BitReversal, ButterflyNetwork, Complex,
    ComplexSample, CpuFft, Direction, DynamicFft, FftConfig, FftError, FftFloat, FftProcessor,
    Normalization, OutputOrder, RayonExecutor, Sequential, TransformOptions, TwiddleTable,
};
pub use gpu::{GpuContext, GpuFft, GpuFftError};
