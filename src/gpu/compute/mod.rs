//! GPU compute shader modules for the butterfly FFT.
//!
//! This module runs the same twiddle tables and pass structure as the CPU
//! engine, expressed as wgpu compute dispatches.

mod buffers;
mod params;
mod pipelines;

pub mod fft;

pub(crate) use buffers::COMPLEX_BYTES;
pub use fft::{GpuFft, GpuFftError};
pub use params::FftParams;
