//! Error type shared by every FFT entry point.

use super::options::Direction;

/// Errors reported by table construction, permutation and transforms.
///
/// All of these are raised during validation, before the caller's buffer is
/// touched.
#[derive(Debug, thiserror::Error)]
pub enum FftError {
    #[error("FFT size must be a power of 2 greater than 1, got {0}")]
    InvalidSize(usize),
    #[error("FFT size {requested} exceeds twiddle table capacity {capacity}")]
    CapacityExceeded { requested: usize, capacity: usize },
    #[error("Twiddle table was built for a {table} transform, but a {requested} transform was requested")]
    DirectionMismatch {
        table: Direction,
        requested: Direction,
    },
    #[error("Forward table capacity {forward} does not match inverse table capacity {inverse}")]
    TableCapacityMismatch { forward: usize, inverse: usize },
    #[error("Buffer length {actual} does not match expected length {expected}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("Invalid bit-reversal index map: {0}")]
    InvalidIndexMap(String),
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("GPU error: {0}")]
    Gpu(String),
}

/// Checks that `len` is a transformable size: a power of two, at least 2.
pub(crate) fn check_size(len: usize) -> Result<(), FftError> {
    if len < 2 || !len.is_power_of_two() {
        return Err(FftError::InvalidSize(len));
    }
    Ok(())
}
