//! GPU-accelerated FFT using wgpu compute shaders.

use rustfft::num_complex::Complex;
use std::sync::Arc;
use wgpu::{Buffer, Device, Queue};

use super::buffers::{FftBuffers, COMPLEX_BYTES};
use super::params::FftParams;
use super::pipelines::{FftLayouts, FftPipelines};
use crate::fft::error::check_size;
use crate::fft::transform::validate;
use crate::fft::{Direction, FftError, OutputOrder, TransformOptions, TwiddleTable};
use crate::gpu::context::max_points;

/// Errors that can occur during GPU FFT operations.
#[derive(Debug, thiserror::Error)]
pub enum GpuFftError {
    #[error(transparent)]
    Fft(#[from] FftError),
    #[error("GPU buffer mapping failed: {0}")]
    BufferMapFailed(String),
    #[error("Device storage buffers hold at most {supported} points, {requested} requested")]
    SizeUnsupported { requested: usize, supported: usize },
}

const WORKGROUP_SIZE: u32 = 256;

/// The butterfly network as a sequence of compute dispatches.
///
/// Twiddles come from the same [`TwiddleTable`] the CPU engine uses and are
/// uploaded once at construction. The radix-8 option is ignored here; every
/// stage runs as a radix-2 dispatch.
pub struct GpuFft {
    device: Arc<Device>,
    queue: Arc<Queue>,
    forward: TwiddleTable<f32>,
    inverse: TwiddleTable<f32>,
    layouts: FftLayouts,
    pipelines: FftPipelines,
    buffers: FftBuffers,
}

impl GpuFft {
    /// Create a GPU FFT for transforms of up to `max_size` points.
    pub fn new(device: Arc<Device>, queue: Arc<Queue>, max_size: usize) -> Result<Self, GpuFftError> {
        check_size(max_size)?;
        let supported = max_points(&device.limits());
        if max_size > supported {
            return Err(GpuFftError::SizeUnsupported {
                requested: max_size,
                supported,
            });
        }

        let forward = TwiddleTable::forward(max_size)?;
        let inverse = TwiddleTable::inverse(max_size)?;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("butterfly_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/butterfly.wgsl").into()),
        });

        let layouts = FftLayouts::new(&device);
        let pipelines = FftPipelines::new(&device, &shader, &layouts);
        let buffers = FftBuffers::new(&device, max_size);

        queue.write_buffer(
            &buffers.forward_twiddles,
            0,
            bytemuck::cast_slice(&pack(forward.roots())),
        );
        queue.write_buffer(
            &buffers.inverse_twiddles,
            0,
            bytemuck::cast_slice(&pack(inverse.roots())),
        );

        log::debug!("GPU FFT ready for up to {} points", max_size);

        Ok(Self {
            device,
            queue,
            forward,
            inverse,
            layouts,
            pipelines,
            buffers,
        })
    }

    /// Largest transform this instance accepts.
    pub fn capacity(&self) -> usize {
        self.forward.capacity()
    }

    /// Transform `buffer` in place on the GPU.
    pub fn process(
        &self,
        buffer: &mut [Complex<f32>],
        options: &TransformOptions,
    ) -> Result<(), GpuFftError> {
        let len = buffer.len();
        let (table, twiddles) = match options.direction {
            Direction::Forward => (&self.forward, &self.buffers.forward_twiddles),
            Direction::Inverse => (&self.inverse, &self.buffers.inverse_twiddles),
        };
        validate(len, table, options.direction)?;

        self.queue
            .write_buffer(&self.buffers.complex_a, 0, bytemuck::cast_slice(&pack(buffer)));

        // Step 1: bit-reverse a -> b
        self.dispatch(
            "fft_bit_reverse",
            &self.pipelines.bit_reverse,
            FftParams::stage(len, 0, self.capacity()),
            (&self.buffers.complex_a, &self.buffers.complex_b),
            twiddles,
            len,
            None,
        );

        // Step 2: butterfly stages, ping-pong b -> a -> b ...
        let mut data_in_a = false;
        for stage in 0..len.trailing_zeros() {
            let (input, output) = self.ping_pong(data_in_a);
            self.dispatch(
                "fft_stage",
                &self.pipelines.butterfly,
                FftParams::stage(len, stage, self.capacity()),
                (input, output),
                twiddles,
                len / 2,
                None,
            );
            data_in_a = !data_in_a;
        }

        // Step 3: reorder and scale, then copy to staging
        let (input, output) = self.ping_pong(data_in_a);
        let scale = options.normalization.factor::<f32>(len);
        let mirror = options.order == OutputOrder::Mirrored;
        self.dispatch(
            "fft_finalize",
            &self.pipelines.finalize,
            FftParams::finalize(len, self.capacity(), scale, mirror),
            (input, output),
            twiddles,
            len,
            Some(output),
        );

        let result = self.read_staging(len)?;
        for (sample, [re, im]) in buffer.iter_mut().zip(result) {
            *sample = Complex::new(re, im);
        }
        Ok(())
    }

    // --- Private helpers ---

    /// Input and output buffers given where the current data lives.
    fn ping_pong(&self, data_in_a: bool) -> (&Buffer, &Buffer) {
        if data_in_a {
            (&self.buffers.complex_a, &self.buffers.complex_b)
        } else {
            (&self.buffers.complex_b, &self.buffers.complex_a)
        }
    }

    /// Record and submit one dispatch. Each dispatch gets its own submit so the
    /// uniform write that precedes it takes effect for it alone.
    #[allow(clippy::too_many_arguments)]
    fn dispatch(
        &self,
        label: &str,
        pipeline: &wgpu::ComputePipeline,
        params: FftParams,
        (input, output): (&Buffer, &Buffer),
        twiddles: &Buffer,
        invocations: usize,
        copy_to_staging: Option<&Buffer>,
    ) {
        self.queue
            .write_buffer(&self.buffers.params, 0, bytemuck::bytes_of(&params));

        let bind_group = self.create_bind_group(label, input, output, twiddles);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some(&format!("{}_encoder", label)),
            });

        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some(&format!("{}_pass", label)),
                timestamp_writes: None,
            });
            pass.set_pipeline(pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.dispatch_workgroups(workgroups(invocations), 1, 1);
        }

        if let Some(source) = copy_to_staging {
            encoder.copy_buffer_to_buffer(
                source,
                0,
                &self.buffers.staging,
                0,
                (params.n as usize * COMPLEX_BYTES) as u64,
            );
        }

        self.queue.submit(Some(encoder.finish()));
    }

    fn create_bind_group(
        &self,
        label: &str,
        input: &Buffer,
        output: &Buffer,
        twiddles: &Buffer,
    ) -> wgpu::BindGroup {
        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.layouts.fft,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: input.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: output.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: self.buffers.params.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: twiddles.as_entire_binding(),
                },
            ],
        })
    }

    fn read_staging(&self, count: usize) -> Result<Vec<[f32; 2]>, GpuFftError> {
        let size = (count * COMPLEX_BYTES) as u64;
        let slice = self.buffers.staging.slice(..size);

        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |r| {
            let _ = tx.send(r);
        });
        self.device
            .poll(wgpu::PollType::wait_indefinitely())
            .map_err(|e| GpuFftError::BufferMapFailed(format!("{:?}", e)))?;

        rx.recv()
            .map_err(|e| GpuFftError::BufferMapFailed(e.to_string()))?
            .map_err(|e| GpuFftError::BufferMapFailed(format!("{:?}", e)))?;

        let data = slice.get_mapped_range();
        let result: Vec<[f32; 2]> = bytemuck::cast_slice(&data).to_vec();
        drop(data);
        self.buffers.staging.unmap();

        Ok(result)
    }
}

fn pack(samples: &[Complex<f32>]) -> Vec<[f32; 2]> {
    samples.iter().map(|c| [c.re, c.im]).collect()
}

fn workgroups(invocations: usize) -> u32 {
    (invocations as u32).div_ceil(WORKGROUP_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_context() -> Option<(Arc<Device>, Arc<Queue>)> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter =
            pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions::default()))
                .ok()?;
        let (device, queue) =
            pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default())).ok()?;
        Some((Arc::new(device), Arc::new(queue)))
    }

    #[test]
    fn test_pack() {
        let packed = pack(&[Complex::new(1.0, 2.0), Complex::new(-3.0, 0.5)]);
        assert_eq!(packed, vec![[1.0, 2.0], [-3.0, 0.5]]);
        assert_eq!(workgroups(256), 1);
        assert_eq!(workgroups(257), 2);
    }

    #[test]
    fn test_creation() {
        if let Some((device, queue)) = create_test_context() {
            let fft = GpuFft::new(device, queue, 1024);
            assert!(fft.is_ok());
            assert_eq!(fft.unwrap().capacity(), 1024);
        }
    }

    #[test]
    fn test_invalid_size() {
        if let Some((device, queue)) = create_test_context() {
            let result = GpuFft::new(device, queue, 1000);
            assert!(matches!(
                result,
                Err(GpuFftError::Fft(FftError::InvalidSize(1000)))
            ));
        }
    }

    #[test]
    fn test_size_beyond_device_limits() {
        if let Some((device, queue)) = create_test_context() {
            let supported = max_points(&device.limits());
            let result = GpuFft::new(device, queue, supported * 2);
            assert!(matches!(
                result,
                Err(GpuFftError::SizeUnsupported { requested, .. }) if requested == supported * 2
            ));
        }
    }

    #[test]
    fn test_impulse_is_flat() {
        if let Some((device, queue)) = create_test_context() {
            let fft = GpuFft::new(device, queue, 64).unwrap();
            let mut buffer = crate::fft::signal::impulse::<f32>(64);
            fft.process(&mut buffer, &TransformOptions::forward()).unwrap();
            for bin in &buffer {
                assert!((bin.norm() - 1.0).abs() < 1e-5);
            }
        }
    }
}
