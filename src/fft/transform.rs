//! Whole-transform entry points: validate, permute, run the passes, finalize.

use rustfft::num_complex::Complex;

use super::bit_reverse::bit_reverse_permute;
use super::butterfly::ButterflyNetwork;
use super::error::{check_size, FftError};
use super::executor::{PassExecutor, Sequential};
use super::options::{Direction, OutputOrder, TransformOptions};
use super::twiddle::TwiddleTable;
use super::FftFloat;

/// Transform `buffer` in place on the calling thread.
///
/// `inverse` must agree with the direction `table` was built for. Every output
/// sample is multiplied by `scale` (pass `1/N` on the inverse for a round trip
/// back to the input).
pub fn transform<T: FftFloat>(
    buffer: &mut [Complex<T>],
    table: &TwiddleTable<T>,
    inverse: bool,
    scale: T,
) -> Result<(), FftError> {
    validate(buffer.len(), table, Direction::from_inverse(inverse))?;
    bit_reverse_permute(buffer)?;
    ButterflyNetwork::new(table).run(buffer, &Sequential)?;
    apply_scale(buffer, scale);
    Ok(())
}

/// Transform `buffer` in place with explicit policy and executor.
pub fn transform_with<T, E>(
    buffer: &mut [Complex<T>],
    table: &TwiddleTable<T>,
    options: &TransformOptions,
    executor: &E,
) -> Result<(), FftError>
where
    T: FftFloat,
    E: PassExecutor,
{
    let len = buffer.len();
    validate(len, table, options.direction)?;
    bit_reverse_permute(buffer)?;

    let network = if options.radix8 {
        ButterflyNetwork::new(table)
    } else {
        ButterflyNetwork::radix2(table)
    };
    network.run(buffer, executor)?;

    if options.order == OutputOrder::Mirrored {
        mirror(buffer);
    }
    apply_scale(buffer, options.normalization.factor(len));
    Ok(())
}

/// Checks everything a transform needs before any sample moves.
pub(crate) fn validate<T: FftFloat>(
    len: usize,
    table: &TwiddleTable<T>,
    direction: Direction,
) -> Result<(), FftError> {
    check_size(len)?;
    if len > table.capacity() {
        return Err(FftError::CapacityExceeded {
            requested: len,
            capacity: table.capacity(),
        });
    }
    if table.direction() != direction {
        return Err(FftError::DirectionMismatch {
            table: table.direction(),
            requested: direction,
        });
    }
    Ok(())
}

/// Reorder so index `k` holds what was at `(N - k) mod N`.
pub fn mirror<T>(buffer: &mut [T]) {
    if buffer.len() > 2 {
        buffer[1..].reverse();
    }
}

fn apply_scale<T: FftFloat>(buffer: &mut [Complex<T>], scale: T) {
    if scale == T::one() {
        return;
    }
    for sample in buffer.iter_mut() {
        *sample = *sample * scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fft::options::Normalization;

    #[test]
    fn test_mirror() {
        let mut data = vec![0, 1, 2, 3, 4, 5, 6, 7];
        mirror(&mut data);
        assert_eq!(data, vec![0, 7, 6, 5, 4, 3, 2, 1]);

        let mut pair = vec![0, 1];
        mirror(&mut pair);
        assert_eq!(pair, vec![0, 1]);
    }

    #[test]
    fn test_direction_mismatch_leaves_buffer() {
        let table = TwiddleTable::<f32>::forward(16).unwrap();
        let mut buffer: Vec<Complex<f32>> =
            (0..16).map(|i| Complex::new(i as f32, 0.0)).collect();
        let before = buffer.clone();
        let result = transform(&mut buffer, &table, true, 1.0);
        assert!(matches!(
            result,
            Err(FftError::DirectionMismatch {
                table: Direction::Forward,
                requested: Direction::Inverse
            })
        ));
        assert_eq!(buffer, before);
    }

    fn check_all<T: FftFloat>(table: &TwiddleTable<T>) -> Vec<Result<(), FftError>> {
        [6, 64, 16]
            .iter()
            .map(|&len| validate(len, table, Direction::Forward))
            .collect()
    }

    #[test]
    fn test_validate_is_generic_over_precision() {
        for results in [
            check_all(&TwiddleTable::<f32>::forward(32).unwrap()),
            check_all(&TwiddleTable::<f64>::forward(32).unwrap()),
        ] {
            assert!(matches!(results[0], Err(FftError::InvalidSize(6))));
            assert!(matches!(
                results[1],
                Err(FftError::CapacityExceeded {
                    requested: 64,
                    capacity: 32
                })
            ));
            assert!(results[2].is_ok());
        }
        assert!(matches!(
            validate(16, &TwiddleTable::<f32>::inverse(32).unwrap(), Direction::Forward),
            Err(FftError::DirectionMismatch { .. })
        ));
    }

    #[test]
    fn test_smaller_than_capacity() {
        let table = TwiddleTable::<f64>::forward(1024).unwrap();
        let mut buffer = vec![Complex::new(1.0, 0.0); 4];
        transform(&mut buffer, &table, false, 1.0).unwrap();
        assert!((buffer[0] - Complex::new(4.0, 0.0)).norm() < 1e-12);
        for bin in &buffer[1..] {
            assert!(bin.norm() < 1e-12);
        }
    }

    #[test]
    fn test_mirrored_forward_is_scaled_inverse() {
        // DFT(DFT(x)) = N * x[(N - n) mod N], so mirroring a second forward
        // transform recovers x.
        let table = TwiddleTable::<f64>::forward(32).unwrap();
        let input: Vec<Complex<f64>> = (0..32)
            .map(|i| Complex::new(i as f64, -(i as f64) * 0.5))
            .collect();
        let mut buffer = input.clone();
        transform(&mut buffer, &table, false, 1.0).unwrap();
        let options = TransformOptions::forward()
            .with_order(OutputOrder::Mirrored)
            .with_normalization(Normalization::ByLength);
        transform_with(&mut buffer, &table, &options, &Sequential).unwrap();

        for (got, want) in buffer.iter().zip(&input) {
            assert!((got - want).norm() < 1e-9);
        }
    }
}
