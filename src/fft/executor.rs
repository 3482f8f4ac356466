//! Pass executors: how the independent work of one pass is spread over workers.
//!
//! Every method returns only after all kernel invocations it started have
//! finished, which is the barrier the butterfly network needs between passes.

use rayon::prelude::*;
use rayon::ThreadPool;

use super::error::FftError;

/// Default minimum number of butterfly pairs handed to one task.
pub const DEFAULT_GRAIN: usize = 1024;

/// Runs the disjoint pieces of a pass and joins before returning.
pub trait PassExecutor: Sync {
    /// Minimum number of butterfly pairs worth scheduling as one task.
    fn grain(&self) -> usize;

    /// Call `kernel(block_index, block)` for every `block_len` chunk of `buffer`.
    fn for_each_block<T, F>(&self, buffer: &mut [T], block_len: usize, kernel: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Sync + Send;

    /// Call `kernel(span_index, lo_span, hi_span)` for matching `span`-sized
    /// chunks of the two halves of a group.
    fn for_each_span_pair<T, F>(&self, lo: &mut [T], hi: &mut [T], span: usize, kernel: F)
    where
        T: Send,
        F: Fn(usize, &mut [T], &mut [T]) + Sync + Send;
}

/// Runs every piece on the calling thread, in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl PassExecutor for Sequential {
    fn grain(&self) -> usize {
        usize::MAX
    }

    fn for_each_block<T, F>(&self, buffer: &mut [T], block_len: usize, kernel: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Sync + Send,
    {
        buffer
            .chunks_mut(block_len)
            .enumerate()
            .for_each(|(i, block)| kernel(i, block));
    }

    fn for_each_span_pair<T, F>(&self, lo: &mut [T], hi: &mut [T], span: usize, kernel: F)
    where
        T: Send,
        F: Fn(usize, &mut [T], &mut [T]) + Sync + Send,
    {
        lo.chunks_mut(span)
            .zip(hi.chunks_mut(span))
            .enumerate()
            .for_each(|(i, (l, h))| kernel(i, l, h));
    }
}

/// Spreads pieces over a dedicated rayon pool.
pub struct RayonExecutor {
    pool: ThreadPool,
    grain: usize,
}

impl RayonExecutor {
    /// Create a pool with `workers` threads (`0` lets rayon pick).
    pub fn new(workers: usize, grain: usize) -> Result<Self, FftError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("fft-worker-{}", i))
            .build()?;

        log::debug!(
            "Started FFT worker pool with {} threads, grain {}",
            pool.current_num_threads(),
            grain
        );

        Ok(Self {
            pool,
            grain: grain.max(1),
        })
    }

    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl PassExecutor for RayonExecutor {
    fn grain(&self) -> usize {
        self.grain
    }

    fn for_each_block<T, F>(&self, buffer: &mut [T], block_len: usize, kernel: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Sync + Send,
    {
        self.pool.install(|| {
            buffer
                .par_chunks_mut(block_len)
                .enumerate()
                .for_each(|(i, block)| kernel(i, block));
        });
    }

    fn for_each_span_pair<T, F>(&self, lo: &mut [T], hi: &mut [T], span: usize, kernel: F)
    where
        T: Send,
        F: Fn(usize, &mut [T], &mut [T]) + Sync + Send,
    {
        self.pool.install(|| {
            lo.par_chunks_mut(span)
                .zip(hi.par_chunks_mut(span))
                .enumerate()
                .for_each(|(i, (l, h))| kernel(i, l, h));
        });
    }
}
