//! GPU buffer management for FFT operations.

use wgpu::{Buffer, BufferUsages, Device};

/// Bytes per complex sample on the GPU (`vec2<f32>`).
pub const COMPLEX_BYTES: usize = 2 * std::mem::size_of::<f32>();

/// Collection of GPU buffers used for FFT computation, sized to the engine's
/// capacity.
pub struct FftBuffers {
    pub complex_a: Buffer,
    pub complex_b: Buffer,
    pub forward_twiddles: Buffer,
    pub inverse_twiddles: Buffer,
    pub params: Buffer,
    pub staging: Buffer,
}

impl FftBuffers {
    /// Create all buffers needed for transforms of up to `capacity` points.
    pub fn new(device: &Device, capacity: usize) -> Self {
        let complex_size = (capacity * COMPLEX_BYTES) as u64;
        let complex_a = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("fft_complex_a"),
            size: complex_size,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_SRC | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let complex_b = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("fft_complex_b"),
            size: complex_size,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_SRC | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Twiddle tables hold capacity / 2 roots each
        let twiddle_size = (capacity / 2 * COMPLEX_BYTES) as u64;
        let forward_twiddles = Self::create_storage_buffer(device, "fft_forward_twiddles", twiddle_size);
        let inverse_twiddles = Self::create_storage_buffer(device, "fft_inverse_twiddles", twiddle_size);

        let params = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("fft_params"),
            size: std::mem::size_of::<super::params::FftParams>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let staging = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("fft_staging"),
            size: complex_size,
            usage: BufferUsages::MAP_READ | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            complex_a,
            complex_b,
            forward_twiddles,
            inverse_twiddles,
            params,
            staging,
        }
    }

    fn create_storage_buffer(device: &Device, label: &str, size: u64) -> Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }
}
