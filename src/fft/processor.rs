//! Unified transform trait for CPU and GPU implementations.
//!
//! This module provides a common interface for in-place transforms that can be
//! implemented by both the CPU engine (rayon passes) and the GPU engine (wgpu
//! compute dispatches).

use rustfft::num_complex::Complex;
use std::sync::Arc;
use wgpu::{Device, Queue};

use super::config::FftConfig;
use super::engine::CpuFft;
use super::error::FftError;
use super::options::Direction;
use crate::gpu::compute::{GpuFft, GpuFftError};

/// Trait for engines that transform a complex buffer in place.
pub trait FftProcessor<T> {
    /// Largest transform size accepted.
    fn capacity(&self) -> usize;

    /// Transform `buffer` in place in `direction` under the engine's policy.
    fn process(&mut self, buffer: &mut [Complex<T>], direction: Direction) -> Result<(), FftError>;

    fn forward(&mut self, buffer: &mut [Complex<T>]) -> Result<(), FftError> {
        self.process(buffer, Direction::Forward)
    }

    fn inverse(&mut self, buffer: &mut [Complex<T>]) -> Result<(), FftError> {
        self.process(buffer, Direction::Inverse)
    }
}

impl<T: super::FftFloat> FftProcessor<T> for CpuFft<T> {
    fn capacity(&self) -> usize {
        CpuFft::capacity(self)
    }

    fn process(&mut self, buffer: &mut [Complex<T>], direction: Direction) -> Result<(), FftError> {
        CpuFft::process(self, buffer, direction)
    }
}

/// Wrapper around [`GpuFft`] applying an [`FftConfig`]'s normalization and
/// order policy, so it can be used interchangeably with [`CpuFft`].
pub struct GpuFftWrapper {
    inner: GpuFft,
    config: FftConfig,
}

impl GpuFftWrapper {
    pub fn new(device: Arc<Device>, queue: Arc<Queue>, config: FftConfig) -> Result<Self, FftError> {
        config.validate()?;
        let inner = GpuFft::new(device, queue, config.max_size).map_err(map_gpu_error)?;
        Ok(Self { inner, config })
    }

    /// Get a reference to the underlying GPU engine.
    pub fn inner(&self) -> &GpuFft {
        &self.inner
    }
}

impl FftProcessor<f32> for GpuFftWrapper {
    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    fn process(&mut self, buffer: &mut [Complex<f32>], direction: Direction) -> Result<(), FftError> {
        self.inner
            .process(buffer, &self.config.options(direction))
            .map_err(map_gpu_error)
    }
}

fn map_gpu_error(e: GpuFftError) -> FftError {
    match e {
        GpuFftError::Fft(inner) => inner,
        other => FftError::Gpu(other.to_string()),
    }
}

/// Enum to hold either CPU or GPU engine for runtime selection.
pub enum DynamicFft {
    Cpu(CpuFft<f32>),
    Gpu(Box<GpuFftWrapper>),
}

impl DynamicFft {
    /// Create a CPU-based engine.
    pub fn cpu(config: FftConfig) -> Result<Self, FftError> {
        Ok(DynamicFft::Cpu(CpuFft::new(config)?))
    }

    /// Create a GPU-based engine.
    pub fn gpu(device: Arc<Device>, queue: Arc<Queue>, config: FftConfig) -> Result<Self, FftError> {
        Ok(DynamicFft::Gpu(Box::new(GpuFftWrapper::new(
            device, queue, config,
        )?)))
    }

    /// Try to create a GPU engine, falling back to CPU if the GPU is unavailable.
    pub fn gpu_with_fallback(
        device: Option<Arc<Device>>,
        queue: Option<Arc<Queue>>,
        config: FftConfig,
    ) -> Result<Self, FftError> {
        if let (Some(device), Some(queue)) = (device, queue) {
            match GpuFftWrapper::new(device, queue, config.clone()) {
                Ok(gpu) => {
                    log::info!("Using GPU-accelerated FFT");
                    return Ok(DynamicFft::Gpu(Box::new(gpu)));
                }
                Err(e) => log::warn!("GPU FFT unavailable ({}), falling back to CPU", e),
            }
        }
        log::info!("Using CPU FFT");
        Self::cpu(config)
    }

    /// Check if this engine is using the GPU.
    pub fn is_gpu(&self) -> bool {
        matches!(self, DynamicFft::Gpu(_))
    }
}

impl FftProcessor<f32> for DynamicFft {
    fn capacity(&self) -> usize {
        match self {
            DynamicFft::Cpu(a) => FftProcessor::capacity(a),
            DynamicFft::Gpu(a) => a.capacity(),
        }
    }

    fn process(&mut self, buffer: &mut [Complex<f32>], direction: Direction) -> Result<(), FftError> {
        match self {
            DynamicFft::Cpu(a) => FftProcessor::process(a, buffer, direction),
            DynamicFft::Gpu(a) => a.process(buffer, direction),
        }
    }
}
