//! Unrolled 8-point kernel standing in for the first three radix-2 passes.

use rustfft::num_complex::Complex;

use super::twiddle::TwiddleTable;
use super::FftFloat;

/// Three radix-2 passes over one bit-reversed block of 8 samples, unrolled.
///
/// The roots of unity are captured from a [`TwiddleTable`] when the kernel is
/// built, so the fast path always agrees with the generic passes driven by
/// the same table.
#[derive(Debug, Clone, Copy)]
pub struct Butterfly8<T> {
    w1: Complex<T>,
    w2: Complex<T>,
    w3: Complex<T>,
}

impl<T: FftFloat> Butterfly8<T> {
    /// Returns `None` if the table is too small to hold 8th roots.
    pub fn new(table: &TwiddleTable<T>) -> Option<Self> {
        if table.capacity() < 8 {
            return None;
        }
        Some(Self {
            w1: table.get(8, 1),
            w2: table.get(8, 2),
            w3: table.get(8, 3),
        })
    }

    /// Transform one block of exactly 8 samples already in bit-reversed order.
    #[inline]
    pub fn process(&self, block: &mut [Complex<T>]) {
        debug_assert_eq!(block.len(), 8);

        // pass 1: pairs at distance 1
        let (a0, a1) = (block[0] + block[1], block[0] - block[1]);
        let (a2, a3) = (block[2] + block[3], block[2] - block[3]);
        let (a4, a5) = (block[4] + block[5], block[4] - block[5]);
        let (a6, a7) = (block[6] + block[7], block[6] - block[7]);

        // pass 2: pairs at distance 2, W4^1 == W8^2
        let t3 = self.w2 * a3;
        let t7 = self.w2 * a7;
        let (b0, b2) = (a0 + a2, a0 - a2);
        let (b1, b3) = (a1 + t3, a1 - t3);
        let (b4, b6) = (a4 + a6, a4 - a6);
        let (b5, b7) = (a5 + t7, a5 - t7);

        // pass 3: pairs at distance 4
        let t5 = self.w1 * b5;
        let t6 = self.w2 * b6;
        let t7 = self.w3 * b7;
        block[0] = b0 + b4;
        block[4] = b0 - b4;
        block[1] = b1 + t5;
        block[5] = b1 - t5;
        block[2] = b2 + t6;
        block[6] = b2 - t6;
        block[3] = b3 + t7;
        block[7] = b3 - t7;
    }

    /// Apply [`Self::process`] to every 8-sample block of `buffer`.
    pub fn process_blocks(&self, buffer: &mut [Complex<T>]) {
        for block in buffer.chunks_exact_mut(8) {
            self.process(block);
        }
    }
}
