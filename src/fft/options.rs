//! Direction, scaling and output-order policy for a transform call.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{cast, FftFloat};

/// Transform direction. Fixes the sign of the twiddle exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Time to frequency, twiddles `e^(-2πik/n)`.
    #[default]
    Forward,
    /// Frequency to time, twiddles `e^(+2πik/n)`.
    Inverse,
}

impl Direction {
    pub fn from_inverse(inverse: bool) -> Self {
        if inverse {
            Direction::Inverse
        } else {
            Direction::Forward
        }
    }

    pub fn is_inverse(self) -> bool {
        self == Direction::Inverse
    }

    /// Sign of the twiddle angle: -1 forward, +1 inverse.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => -1.0,
            Direction::Inverse => 1.0,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Inverse,
            Direction::Inverse => Direction::Forward,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => f.write_str("forward"),
            Direction::Inverse => f.write_str("inverse"),
        }
    }
}

/// Scale applied to every sample after the last pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Leave the output unscaled.
    #[default]
    None,
    /// Divide by N. The usual inverse convention.
    ByLength,
    /// Divide by sqrt(N). Applied on both directions this makes the pair unitary.
    Unitary,
    /// Multiply by an arbitrary factor.
    Custom(f64),
}

impl Normalization {
    /// Factor the output is multiplied by for a transform of length `len`.
    pub fn factor<T: FftFloat>(self, len: usize) -> T {
        match self {
            Normalization::None => T::one(),
            Normalization::ByLength => cast(1.0 / len as f64),
            Normalization::Unitary => cast(1.0 / (len as f64).sqrt()),
            Normalization::Custom(factor) => cast(factor),
        }
    }
}

/// Ordering of the finished output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputOrder {
    /// Bin `k` at index `k`.
    #[default]
    Natural,
    /// Bin `(N - k) mod N` at index `k`. Index 0 stays in place.
    Mirrored,
}

/// Full policy for one transform call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformOptions {
    pub direction: Direction,
    pub normalization: Normalization,
    pub order: OutputOrder,
    /// Replace the first three radix-2 passes with the unrolled radix-8 kernel.
    pub radix8: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self::forward()
    }
}

impl TransformOptions {
    /// Unscaled forward transform in natural order.
    pub fn forward() -> Self {
        Self {
            direction: Direction::Forward,
            normalization: Normalization::None,
            order: OutputOrder::Natural,
            radix8: true,
        }
    }

    /// Inverse transform scaled by 1/N, natural order.
    pub fn inverse() -> Self {
        Self {
            direction: Direction::Inverse,
            normalization: Normalization::ByLength,
            order: OutputOrder::Natural,
            radix8: true,
        }
    }

    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    pub fn with_order(mut self, order: OutputOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_radix8(mut self, radix8: bool) -> Self {
        self.radix8 = radix8;
        self
    }
}
