//! Headless wgpu device acquisition for FFT compute work.

use std::sync::Arc;
use wgpu::{Adapter, Device, Instance, Limits, Queue};

use super::compute::COMPLEX_BYTES;

/// Errors that can occur while acquiring a GPU.
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("No suitable GPU adapter found")]
    NoAdapter,
    #[error("Failed to request device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),
    #[error("Adapter storage buffers hold at most {supported} points, {requested} requested")]
    SizeUnsupported { requested: usize, supported: usize },
}

/// Device and queue shared by GPU FFT engines.
pub struct GpuContext {
    pub instance: Instance,
    pub adapter: Arc<Adapter>,
    pub device: Arc<Device>,
    pub queue: Arc<Queue>,
}

impl GpuContext {
    /// Acquire a device with default limits, enough for transforms whose
    /// buffers fit the default 128 MiB storage binding.
    pub async fn new() -> Result<Self, GpuError> {
        Self::acquire(|_| Ok(Limits::default())).await
    }

    /// Acquire a device whose limits admit transforms of `max_size` points,
    /// raising the storage limits past the defaults when the adapter allows it.
    pub async fn with_max_fft_size(max_size: usize) -> Result<Self, GpuError> {
        Self::acquire(|adapter| fft_limits(&adapter.limits(), max_size)).await
    }

    /// Blocking variant of [`GpuContext::new`] for synchronous callers.
    pub fn new_blocking() -> Result<Self, GpuError> {
        pollster::block_on(Self::new())
    }

    async fn acquire(
        limits_for: impl FnOnce(&Adapter) -> Result<Limits, GpuError>,
    ) -> Result<Self, GpuError> {
        let instance = Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::METAL | wgpu::Backends::VULKAN | wgpu::Backends::GL,
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                force_fallback_adapter: false,
                compatible_surface: None,
            })
            .await
            .map_err(|_| GpuError::NoAdapter)?;

        let required_limits = limits_for(&adapter)?;
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("butterfly-fft"),
                required_features: wgpu::Features::empty(),
                required_limits,
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
                experimental_features: wgpu::ExperimentalFeatures::default(),
            })
            .await?;

        log::info!(
            "Using GPU adapter: {} (storage binding up to {} points)",
            adapter.get_info().name,
            max_points(&device.limits())
        );

        Ok(Self {
            instance,
            adapter: Arc::new(adapter),
            device: Arc::new(device),
            queue: Arc::new(queue),
        })
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    /// Largest transform the acquired device can hold.
    pub fn max_fft_size(&self) -> usize {
        max_points(&self.device.limits())
    }
}

/// Largest power-of-two transform whose complex buffer fits `limits`.
pub fn max_points(limits: &Limits) -> usize {
    let bytes = (limits.max_storage_buffer_binding_size as u64).min(limits.max_buffer_size);
    let points = (bytes / COMPLEX_BYTES as u64) as usize;
    if points == 0 {
        0
    } else {
        1 << points.ilog2()
    }
}

/// Default limits with the storage binding and buffer size raised to hold
/// `max_size` complex points, checked against what the adapter supports.
pub fn fft_limits(adapter: &Limits, max_size: usize) -> Result<Limits, GpuError> {
    let supported = max_points(adapter);
    if max_size > supported {
        return Err(GpuError::SizeUnsupported {
            requested: max_size,
            supported,
        });
    }

    let bytes = (max_size * COMPLEX_BYTES) as u64;
    let defaults = Limits::default();
    Ok(Limits {
        max_storage_buffer_binding_size: defaults
            .max_storage_buffer_binding_size
            .max(bytes as u32),
        max_buffer_size: defaults.max_buffer_size.max(bytes),
        ..defaults
    })
}
