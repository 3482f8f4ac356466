//! In-place power-of-two FFT built from a radix-2 butterfly network.
//!
//! This module provides:
//! - Twiddle tables shared read-only between transforms
//! - Bit-reversal permutation, on the fly or precomputed
//! - The butterfly network with a radix-8 fast path for the first three passes
//! - Sequential and rayon-backed pass executors
//! - A configurable CPU engine and a processor trait shared with the GPU backend

pub mod bit_reverse;
pub mod butterfly;
pub mod config;
pub mod engine;
pub mod error;
pub mod executor;
pub mod options;
pub mod processor;
pub mod radix8;
pub mod signal;
pub mod transform;
pub mod twiddle;

pub use rustfft::num_complex::Complex;

// Re-export commonly used types
pub use bit_reverse::{bit_reverse_permute, reverse_bits, BitReversal};
pub use butterfly::{passes, ButterflyNetwork, PassDescriptor, WorkItem};
pub use config::{ConfigError, FftConfig};
pub use engine::CpuFft;
pub use error::FftError;
pub use executor::{PassExecutor, RayonExecutor, Sequential};
pub use options::{Direction, Normalization, OutputOrder, TransformOptions};
pub use processor::{DynamicFft, FftProcessor, GpuFftWrapper};
pub use radix8::Butterfly8;
pub use transform::{mirror, transform, transform_with};
pub use twiddle::TwiddleTable;

/// One element of a transform buffer.
pub type ComplexSample<T> = Complex<T>;

/// Floating-point types the engine can run on (`f32`, `f64`).
pub trait FftFloat: rustfft::FftNum + rustfft::num_traits::Float {}

impl<T> FftFloat for T where T: rustfft::FftNum + rustfft::num_traits::Float {}

/// Convert an `f64` constant into the working precision.
#[inline]
pub(crate) fn cast<T: FftFloat>(value: f64) -> T {
    T::from_f64(value).unwrap_or_else(T::nan)
}
