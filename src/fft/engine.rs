//! CPU transform engine.

use rustfft::num_complex::Complex;
use std::sync::Arc;

use super::config::FftConfig;
use super::error::FftError;
use super::executor::{RayonExecutor, Sequential};
use super::options::{Direction, TransformOptions};
use super::transform::transform_with;
use super::twiddle::TwiddleTable;
use super::FftFloat;

/// Transform engine owning twiddle tables for both directions and an optional
/// worker pool.
///
/// Tables are held behind `Arc` so several engines (or threads) can share one
/// pair of tables.
pub struct CpuFft<T> {
    config: FftConfig,
    forward: Arc<TwiddleTable<T>>,
    inverse: Arc<TwiddleTable<T>>,
    pool: Option<RayonExecutor>,
}

impl<T: FftFloat> CpuFft<T> {
    /// Build tables of `config.max_size` and, unless `workers == 1`, a pool.
    pub fn new(config: FftConfig) -> Result<Self, FftError> {
        config.validate()?;
        let forward = Arc::new(TwiddleTable::forward(config.max_size)?);
        let inverse = Arc::new(TwiddleTable::inverse(config.max_size)?);
        Self::from_tables(config, forward, inverse)
    }

    /// Engine with default config for transforms of up to `max_size` points.
    pub fn with_max_size(max_size: usize) -> Result<Self, FftError> {
        Self::new(FftConfig::with_max_size(max_size))
    }

    /// Build an engine around existing tables. `config.max_size` is ignored in
    /// favour of the tables' capacity.
    pub fn from_tables(
        config: FftConfig,
        forward: Arc<TwiddleTable<T>>,
        inverse: Arc<TwiddleTable<T>>,
    ) -> Result<Self, FftError> {
        for (table, direction) in [(&forward, Direction::Forward), (&inverse, Direction::Inverse)] {
            if table.direction() != direction {
                return Err(FftError::DirectionMismatch {
                    table: table.direction(),
                    requested: direction,
                });
            }
        }
        if forward.capacity() != inverse.capacity() {
            return Err(FftError::TableCapacityMismatch {
                forward: forward.capacity(),
                inverse: inverse.capacity(),
            });
        }

        let pool = if config.workers == 1 {
            None
        } else {
            Some(RayonExecutor::new(config.workers, config.grain)?)
        };

        log::debug!(
            "CPU FFT engine ready: capacity {}, parallel from {} points",
            forward.capacity(),
            config.parallel_threshold
        );

        Ok(Self {
            config: FftConfig {
                max_size: forward.capacity(),
                ..config
            },
            forward,
            inverse,
            pool,
        })
    }

    pub fn config(&self) -> &FftConfig {
        &self.config
    }

    /// Largest transform this engine accepts.
    pub fn capacity(&self) -> usize {
        self.forward.capacity()
    }

    pub fn table(&self, direction: Direction) -> &Arc<TwiddleTable<T>> {
        match direction {
            Direction::Forward => &self.forward,
            Direction::Inverse => &self.inverse,
        }
    }

    /// Forward transform with the configured forward normalization.
    pub fn forward(&self, buffer: &mut [Complex<T>]) -> Result<(), FftError> {
        self.process(buffer, Direction::Forward)
    }

    /// Inverse transform with the configured inverse normalization and order.
    pub fn inverse(&self, buffer: &mut [Complex<T>]) -> Result<(), FftError> {
        self.process(buffer, Direction::Inverse)
    }

    pub fn process(&self, buffer: &mut [Complex<T>], direction: Direction) -> Result<(), FftError> {
        self.process_with(buffer, &self.config.options(direction))
    }

    /// Transform with explicit options, overriding the configured policy.
    pub fn process_with(
        &self,
        buffer: &mut [Complex<T>],
        options: &TransformOptions,
    ) -> Result<(), FftError> {
        let table = self.table(options.direction);
        match &self.pool {
            Some(pool) if self.config.is_parallel(buffer.len()) => {
                transform_with(buffer, table, options, pool)
            }
            _ => transform_with(buffer, table, options, &Sequential),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(len: usize) -> Vec<Complex<f64>> {
        (0..len)
            .map(|i| Complex::new((i as f64).sqrt(), (i % 3) as f64))
            .collect()
    }

    #[test]
    fn test_engine_creation() {
        let engine = CpuFft::<f32>::with_max_size(1024).unwrap();
        assert_eq!(engine.capacity(), 1024);
        assert!(matches!(
            CpuFft::<f32>::with_max_size(1000),
            Err(FftError::InvalidSize(1000))
        ));
    }

    #[test]
    fn test_round_trip() {
        let engine = CpuFft::<f64>::with_max_size(256).unwrap();
        let input = signal(256);
        let mut buffer = input.clone();
        engine.forward(&mut buffer).unwrap();
        engine.inverse(&mut buffer).unwrap();
        for (got, want) in buffer.iter().zip(&input) {
            assert!((got - want).norm() < 1e-10);
        }
    }

    #[test]
    fn test_parallel_path_matches_sequential() {
        let parallel = CpuFft::<f64>::new(FftConfig {
            max_size: 8192,
            workers: 3,
            parallel_threshold: 16,
            grain: 32,
            ..FftConfig::default()
        })
        .unwrap();
        let sequential = CpuFft::<f64>::new(FftConfig {
            max_size: 8192,
            workers: 1,
            ..FftConfig::default()
        })
        .unwrap();

        let mut a = signal(8192);
        let mut b = a.clone();
        parallel.forward(&mut a).unwrap();
        sequential.forward(&mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_shared_tables() {
        let forward = Arc::new(TwiddleTable::<f32>::forward(64).unwrap());
        let inverse = Arc::new(TwiddleTable::<f32>::inverse(64).unwrap());
        let a = CpuFft::from_tables(FftConfig::default(), forward.clone(), inverse.clone())
            .unwrap();
        let b = CpuFft::from_tables(FftConfig::default(), forward.clone(), inverse).unwrap();
        assert_eq!(a.capacity(), 64);
        assert!(Arc::ptr_eq(a.table(Direction::Forward), b.table(Direction::Forward)));

        let swapped = CpuFft::from_tables(FftConfig::default(), forward.clone(), forward);
        assert!(matches!(swapped, Err(FftError::DirectionMismatch { .. })));
    }

    #[test]
    fn test_tables_of_different_capacity() {
        let forward = Arc::new(TwiddleTable::<f32>::forward(64).unwrap());
        let inverse = Arc::new(TwiddleTable::<f32>::inverse(128).unwrap());
        let result = CpuFft::from_tables(FftConfig::default(), forward, inverse);
        match result {
            Err(err @ FftError::TableCapacityMismatch { .. }) => {
                assert!(matches!(
                    err,
                    FftError::TableCapacityMismatch {
                        forward: 64,
                        inverse: 128
                    }
                ));
                assert!(err.to_string().contains("128"));
            }
            _ => panic!("expected a table capacity mismatch"),
        }
    }
}
