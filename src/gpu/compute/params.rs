//! Uniform parameter struct for the butterfly shader.
//!
//! Must match the WGSL `FftParams` definition exactly, including padding.

/// Per-dispatch FFT parameters (32 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FftParams {
    pub n: u32,
    /// 0-indexed butterfly stage; the stage combines groups of `2 << stage`.
    pub stage: u32,
    pub log2_n: u32,
    /// Capacity the uploaded twiddle table was built for.
    pub table_size: u32,
    pub scale: f32,
    pub mirror: u32,
    pub _pad0: u32,
    pub _pad1: u32,
}

impl FftParams {
    /// Parameters for the bit-reverse pass and butterfly stage `stage`.
    pub fn stage(fft_size: usize, stage: u32, table_size: usize) -> Self {
        Self {
            n: fft_size as u32,
            stage,
            log2_n: fft_size.trailing_zeros(),
            table_size: table_size as u32,
            scale: 1.0,
            mirror: 0,
            _pad0: 0,
            _pad1: 0,
        }
    }

    /// Parameters for the finalize pass (reorder, then scale).
    pub fn finalize(fft_size: usize, table_size: usize, scale: f32, mirror: bool) -> Self {
        Self {
            scale,
            mirror: if mirror { 1 } else { 0 },
            ..Self::stage(fft_size, 0, table_size)
        }
    }
}
