//! Precomputed roots of unity.

use rustfft::num_complex::Complex;

use super::error::{check_size, FftError};
use super::options::Direction;
use super::{cast, FftFloat};

/// Roots of unity for every power-of-two size up to `capacity`.
///
/// Only the first half-turn of the largest size is stored. Smaller sizes are
/// served by striding through it, and indices past the half turn by negation,
/// so `get(n, 0)` is exactly `1` and `get(n, n / 2)` is exactly `-1`.
///
/// The table is read-only after construction and can be shared between any
/// number of concurrent transforms.
#[derive(Debug, Clone)]
pub struct TwiddleTable<T> {
    capacity: usize,
    direction: Direction,
    roots: Vec<Complex<T>>,
}

impl<T: FftFloat> TwiddleTable<T> {
    /// Build a table for transforms of up to `max_size` points.
    pub fn new(max_size: usize, direction: Direction) -> Result<Self, FftError> {
        check_size(max_size)?;

        let quarter = max_size / 4;
        let roots = (0..max_size / 2)
            .map(|k| root_of_unity(k, max_size, quarter, direction))
            .collect();

        log::debug!("Built {} twiddle table for {} points", direction, max_size);

        Ok(Self {
            capacity: max_size,
            direction,
            roots,
        })
    }

    pub fn forward(max_size: usize) -> Result<Self, FftError> {
        Self::new(max_size, Direction::Forward)
    }

    pub fn inverse(max_size: usize) -> Result<Self, FftError> {
        Self::new(max_size, Direction::Inverse)
    }

    /// Largest transform size this table serves.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// `W_capacity^k` for `k in 0..capacity / 2`.
    pub fn roots(&self) -> &[Complex<T>] {
        &self.roots
    }

    /// `e^(∓2πik/n)` for a power-of-two `n <= capacity` and `k < n`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is not a power of two no larger than the capacity, or if
    /// `k >= n`.
    #[inline]
    pub fn get(&self, n: usize, k: usize) -> Complex<T> {
        assert!(
            n.is_power_of_two() && n <= self.capacity && k < n,
            "twiddle W_{}^{} outside a table of capacity {}",
            n,
            k,
            self.capacity
        );
        let stride = self.capacity / n;
        match k.checked_sub(n / 2) {
            Some(rest) if n > 1 => -self.roots[rest * stride],
            _ => self.roots[k * stride],
        }
    }
}

fn root_of_unity<T: FftFloat>(
    k: usize,
    n: usize,
    quarter: usize,
    direction: Direction,
) -> Complex<T> {
    if k == 0 {
        return Complex::new(T::one(), T::zero());
    }
    if k == quarter {
        return Complex::new(T::zero(), cast(direction.sign()));
    }
    let theta = direction.sign() * 2.0 * std::f64::consts::PI * k as f64 / n as f64;
    let (sin, cos) = theta.sin_cos();
    Complex::new(cast(cos), cast(sin))
}
