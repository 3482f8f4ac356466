//! Bit-reversal reordering applied before the butterfly passes.

use super::error::FftError;

/// Reverse the low `bits` bits of `index`.
#[inline]
pub fn reverse_bits(index: usize, bits: u32) -> usize {
    if bits == 0 {
        return 0;
    }
    index.reverse_bits() >> (usize::BITS - bits)
}

/// Permute `buffer` into bit-reversed order in place.
///
/// Each pair `(i, reverse(i))` is swapped exactly once. Lengths that are not a
/// power of two are rejected before anything moves.
pub fn bit_reverse_permute<T>(buffer: &mut [T]) -> Result<(), FftError> {
    let len = buffer.len();
    if !len.is_power_of_two() {
        return Err(FftError::InvalidSize(len));
    }
    let bits = len.trailing_zeros();
    for i in 0..len {
        let j = reverse_bits(i, bits);
        if i < j {
            buffer.swap(i, j);
        }
    }
    Ok(())
}

/// A bit-reversal permutation with its swap list precomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitReversal {
    len: usize,
    swaps: Vec<(usize, usize)>,
}

#[allow(clippy::len_without_is_empty)]
impl BitReversal {
    pub fn new(len: usize) -> Result<Self, FftError> {
        if !len.is_power_of_two() {
            return Err(FftError::InvalidSize(len));
        }
        let bits = len.trailing_zeros();
        let swaps = (0..len)
            .map(|i| (i, reverse_bits(i, bits)))
            .filter(|&(i, j)| i < j)
            .collect();
        Ok(Self { len, swaps })
    }

    /// Accept a precomputed index map.
    ///
    /// The map must have power-of-two length and be its own inverse, which
    /// is what lets it be applied as a set of disjoint swaps.
    pub fn from_index_map(map: &[usize]) -> Result<Self, FftError> {
        let len = map.len();
        if !len.is_power_of_two() {
            return Err(FftError::InvalidSize(len));
        }
        let mut swaps = Vec::new();
        for (i, &j) in map.iter().enumerate() {
            if j >= len {
                return Err(FftError::InvalidIndexMap(format!(
                    "index {} maps to {}, outside 0..{}",
                    i, j, len
                )));
            }
            if map[j] != i {
                return Err(FftError::InvalidIndexMap(format!(
                    "index {} maps to {} but {} maps to {}",
                    i, j, j, map[j]
                )));
            }
            if i < j {
                swaps.push((i, j));
            }
        }
        Ok(Self { len, swaps })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no element moves, which holds for lengths 1 and 2.
    pub fn is_identity(&self) -> bool {
        self.swaps.is_empty()
    }

    /// The full index map: position `i` receives element `indices()[i]`.
    pub fn indices(&self) -> Vec<usize> {
        let mut map: Vec<usize> = (0..self.len).collect();
        for &(i, j) in &self.swaps {
            map.swap(i, j);
        }
        map
    }

    pub fn apply<T>(&self, buffer: &mut [T]) -> Result<(), FftError> {
        if buffer.len() != self.len {
            return Err(FftError::LengthMismatch {
                expected: self.len,
                actual: buffer.len(),
            });
        }
        for &(i, j) in &self.swaps {
            buffer.swap(i, j);
        }
        Ok(())
    }
}
