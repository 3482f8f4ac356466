//! The radix-2 decimation-in-time butterfly network.
//!
//! Pass `p` (1-indexed) combines samples in groups of `2^p`. Inside a group,
//! the sample at offset `j` is paired with the one at `j + 2^(p-1)`, and the
//! pair is combined with the twiddle `W_{2^p}^j`. Pairs within a pass never
//! overlap, so any ordering or split across workers is valid; passes are
//! strictly ordered.

use rustfft::num_complex::Complex;

use super::error::{check_size, FftError};
use super::executor::PassExecutor;
use super::radix8::Butterfly8;
use super::twiddle::TwiddleTable;
use super::FftFloat;

/// Shape of one butterfly pass, derived from the pass index and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassDescriptor {
    pub pass: u32,
    pub group_size: usize,
    pub half_group: usize,
    pub num_groups: usize,
}

impl PassDescriptor {
    pub fn new(pass: u32, len: usize) -> Self {
        let group_size = 1usize << pass;
        Self {
            pass,
            group_size,
            half_group: group_size / 2,
            num_groups: len / group_size,
        }
    }

    /// Every butterfly pair of this pass, group by group.
    pub fn work_items(&self) -> impl Iterator<Item = WorkItem> + '_ {
        (0..self.num_groups).flat_map(move |g| {
            (0..self.half_group).map(move |j| {
                let left = g * self.group_size + j;
                WorkItem {
                    left,
                    right: left + self.half_group,
                    twiddle: j,
                }
            })
        })
    }
}

/// One butterfly pair: two buffer indices and the twiddle index combining them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkItem {
    pub left: usize,
    pub right: usize,
    pub twiddle: usize,
}

/// Descriptors for passes `1..=log2(len)`.
pub fn passes(len: usize) -> impl Iterator<Item = PassDescriptor> {
    let stages = if len > 1 { len.trailing_zeros() } else { 0 };
    (1..=stages).map(move |pass| PassDescriptor::new(pass, len))
}

/// Runs the passes over a bit-reversed buffer.
pub struct ButterflyNetwork<'t, T> {
    table: &'t TwiddleTable<T>,
    radix8: Option<Butterfly8<T>>,
}

impl<'t, T: FftFloat> ButterflyNetwork<'t, T> {
    /// Network using the radix-8 kernel for the first three passes when possible.
    pub fn new(table: &'t TwiddleTable<T>) -> Self {
        Self {
            table,
            radix8: Butterfly8::new(table),
        }
    }

    /// Network running only generic radix-2 passes.
    pub fn radix2(table: &'t TwiddleTable<T>) -> Self {
        Self {
            table,
            radix8: None,
        }
    }

    pub fn table(&self) -> &TwiddleTable<T> {
        self.table
    }

    /// Transform a bit-reversed `buffer` in place into natural order.
    ///
    /// Validation happens before the first write; on error the buffer is
    /// unchanged.
    pub fn run<E: PassExecutor>(
        &self,
        buffer: &mut [Complex<T>],
        executor: &E,
    ) -> Result<(), FftError> {
        let len = buffer.len();
        self.check_len(len)?;

        let mut first_pass = 1;
        if let Some(kernel) = self.radix8.filter(|_| len >= 8) {
            let block_len = 8 * (executor.grain() / 4).clamp(1, len / 8);
            executor.for_each_block(buffer, block_len, |_, block| kernel.process_blocks(block));
            log::trace!("radix-8 kernel covered passes 1..=3 of {}", len);
            first_pass = 4;
        }

        for pass in passes(len).skip(first_pass - 1) {
            self.execute_pass(buffer, pass, executor);
            log::trace!(
                "pass {} done: {} groups of {}",
                pass.pass,
                pass.num_groups,
                pass.group_size
            );
        }
        Ok(())
    }

    /// One full pass. Returns after every pair has been written.
    ///
    /// `pass` must be one of [`passes`]`(buffer.len())`. The buffer is left
    /// unchanged on error.
    pub fn run_pass<E: PassExecutor>(
        &self,
        buffer: &mut [Complex<T>],
        pass: PassDescriptor,
        executor: &E,
    ) -> Result<(), FftError> {
        let len = buffer.len();
        self.check_len(len)?;
        let valid = pass.pass >= 1
            && pass.pass <= len.trailing_zeros()
            && pass == PassDescriptor::new(pass.pass, len);
        if !valid {
            return Err(FftError::LengthMismatch {
                expected: pass.group_size.saturating_mul(pass.num_groups),
                actual: len,
            });
        }
        self.execute_pass(buffer, pass, executor);
        Ok(())
    }

    fn check_len(&self, len: usize) -> Result<(), FftError> {
        check_size(len)?;
        if len > self.table.capacity() {
            return Err(FftError::CapacityExceeded {
                requested: len,
                capacity: self.table.capacity(),
            });
        }
        Ok(())
    }

    fn execute_pass<E: PassExecutor>(
        &self,
        buffer: &mut [Complex<T>],
        pass: PassDescriptor,
        executor: &E,
    ) {
        let table = self.table;
        let grain = executor.grain().max(1);
        let group_size = pass.group_size;

        if pass.half_group > grain {
            // few wide groups: split the halves of each group across workers
            for group in buffer.chunks_exact_mut(group_size) {
                let (lo, hi) = group.split_at_mut(pass.half_group);
                executor.for_each_span_pair(lo, hi, grain, |i, lo, hi| {
                    butterfly_span(lo, hi, i * grain, group_size, table)
                });
            }
        } else {
            // many narrow groups: hand out whole groups
            let groups_per_block = (grain / pass.half_group).clamp(1, pass.num_groups);
            executor.for_each_block(buffer, group_size * groups_per_block, |_, block| {
                for group in block.chunks_exact_mut(group_size) {
                    let (lo, hi) = group.split_at_mut(group_size / 2);
                    butterfly_span(lo, hi, 0, group_size, table);
                }
            });
        }
    }
}

/// Combine `lo[j]` with `hi[j]` for the pairs starting at twiddle `offset`.
#[inline]
fn butterfly_span<T: FftFloat>(
    lo: &mut [Complex<T>],
    hi: &mut [Complex<T>],
    offset: usize,
    group_size: usize,
    table: &TwiddleTable<T>,
) {
    for (j, (left, right)) in lo.iter_mut().zip(hi.iter_mut()).enumerate() {
        let t = table.get(group_size, offset + j) * *right;
        let u = *left;
        *left = u + t;
        *right = u - t;
    }
}
