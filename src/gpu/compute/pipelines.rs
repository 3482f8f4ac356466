//! Compute pipeline creation for FFT operations.

use wgpu::{BindGroupLayout, ComputePipeline, Device, ShaderModule};

/// All compute pipelines needed for one transform.
pub struct FftPipelines {
    pub bit_reverse: ComputePipeline,
    pub butterfly: ComputePipeline,
    pub finalize: ComputePipeline,
}

/// Bind group layout shared by every FFT pipeline:
/// input storage, output storage, uniform params, twiddle storage.
pub struct FftLayouts {
    pub fft: BindGroupLayout,
}

impl FftLayouts {
    pub fn new(device: &Device) -> Self {
        Self {
            fft: Self::create_layout(device, "fft"),
        }
    }

    fn create_layout(device: &Device, name: &str) -> BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{}_layout", name)),
            entries: &[
                Self::storage_entry(0, true),
                Self::storage_entry(1, false),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                Self::storage_entry(3, true),
            ],
        })
    }

    fn storage_entry(binding: u32, read_only: bool) -> wgpu::BindGroupLayoutEntry {
        wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::COMPUTE,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Storage { read_only },
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }
    }
}

impl FftPipelines {
    /// Create all compute pipelines from the shader module.
    pub fn new(device: &Device, shader: &ShaderModule, layouts: &FftLayouts) -> Self {
        Self {
            bit_reverse: Self::create_pipeline(device, shader, &layouts.fft, "bit_reverse_permute"),
            butterfly: Self::create_pipeline(device, shader, &layouts.fft, "fft_butterfly"),
            finalize: Self::create_pipeline(device, shader, &layouts.fft, "finalize"),
        }
    }

    fn create_pipeline(
        device: &Device,
        shader: &ShaderModule,
        layout: &BindGroupLayout,
        entry_point: &str,
    ) -> ComputePipeline {
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{}_pipeline_layout", entry_point)),
            bind_group_layouts: &[layout],
            immediate_size: 0,
        });

        device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some(&format!("{}_pipeline", entry_point)),
            layout: Some(&pipeline_layout),
            module: shader,
            entry_point: Some(entry_point),
            compilation_options: Default::default(),
            cache: None,
        })
    }
}
