//! GPU compute using wgpu.
//!
//! Provides headless device setup and the compute-shader implementation of
//! the butterfly FFT.

pub mod compute;
pub mod context;

pub use compute::{GpuFft, GpuFftError};
pub use context::{GpuContext, GpuError};
