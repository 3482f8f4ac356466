//! Synthetic complex signals for tests, benchmarks and demos.

use rustfft::num_complex::Complex;
use std::cmp::Ordering;

use super::{cast, FftFloat};

/// Unit impulse at index 0.
pub fn impulse<T: FftFloat>(len: usize) -> Vec<Complex<T>> {
    let mut samples = vec![Complex::new(T::zero(), T::zero()); len];
    if let Some(first) = samples.first_mut() {
        first.re = T::one();
    }
    samples
}

/// Every sample set to `value`.
pub fn constant<T: FftFloat>(len: usize, value: Complex<T>) -> Vec<Complex<T>> {
    vec![value; len]
}

/// Complex exponential completing `bin` cycles over `len` samples.
///
/// Its forward transform is `amplitude * len` at `bin` and zero elsewhere.
pub fn tone<T: FftFloat>(len: usize, bin: usize, amplitude: f64) -> Vec<Complex<T>> {
    (0..len)
        .map(|i| {
            let theta = 2.0 * std::f64::consts::PI * (bin * i % len) as f64 / len as f64;
            Complex::new(cast(amplitude * theta.cos()), cast(amplitude * theta.sin()))
        })
        .collect()
}

/// Complex white noise in `[-amplitude, amplitude]` on both parts.
///
/// Uses a simple linear congruential generator so runs are reproducible.
pub fn white_noise<T: FftFloat>(len: usize, amplitude: f64, seed: u64) -> Vec<Complex<T>> {
    let mut state = seed;
    let a: u64 = 6364136223846793005;
    let c: u64 = 1442695040888963407;
    let mut next = move || {
        state = state.wrapping_mul(a).wrapping_add(c);
        let normalized = (state >> 11) as f64 / (1u64 << 53) as f64 * 2.0 - 1.0;
        amplitude * normalized
    };

    (0..len)
        .map(|_| {
            let re = next();
            let im = next();
            Complex::new(cast(re), cast(im))
        })
        .collect()
}

/// Make a row-major grid `width` samples wide conjugate-symmetric, so its
/// inverse transform (along every axis) is real.
///
/// Bin `(x, y)` is paired with `((W - x) mod W, (H - y) mod H)`. The first bin
/// of each pair keeps its value and the second becomes its conjugate; bins
/// paired with themselves lose their imaginary part. Pass `width = len` for a
/// 1D signal. Trailing samples past the last full row are left alone.
pub fn conjugate_symmetric<T: FftFloat>(samples: &mut [Complex<T>], width: usize) {
    if width == 0 {
        return;
    }
    let height = samples.len() / width;
    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            let mirror = ((height - y) % height) * width + (width - x) % width;
            match i.cmp(&mirror) {
                Ordering::Less => samples[mirror] = samples[i].conj(),
                Ordering::Equal => samples[i].im = T::zero(),
                Ordering::Greater => {}
            }
        }
    }
}

/// Sum of squared magnitudes.
pub fn energy<T: FftFloat>(samples: &[Complex<T>]) -> T {
    samples
        .iter()
        .fold(T::zero(), |acc, sample| acc + sample.norm_sqr())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impulse() {
        let samples = impulse::<f32>(8);
        assert_eq!(samples[0], Complex::new(1.0, 0.0));
        assert!(samples[1..].iter().all(|s| *s == Complex::new(0.0, 0.0)));
        assert!(impulse::<f32>(0).is_empty());
    }

    #[test]
    fn test_tone_is_unit_circle() {
        let samples = tone::<f64>(64, 5, 1.0);
        for s in &samples {
            assert!((s.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_white_noise_reproducible() {
        let a = white_noise::<f64>(128, 0.5, 42);
        let b = white_noise::<f64>(128, 0.5, 42);
        let c = white_noise::<f64>(128, 0.5, 7);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a
            .iter()
            .all(|s| (-0.5..=0.5).contains(&s.re) && (-0.5..=0.5).contains(&s.im)));
    }

    #[test]
    fn test_conjugate_symmetric_inverse_is_real() {
        use crate::fft::{transform, TwiddleTable};

        let table = TwiddleTable::<f64>::inverse(64).unwrap();
        let mut spectrum = white_noise::<f64>(64, 1.0, 5);
        conjugate_symmetric(&mut spectrum, 64);
        assert_eq!(spectrum[0].im, 0.0);
        assert_eq!(spectrum[32].im, 0.0);
        assert_eq!(spectrum[3], spectrum[61].conj());

        transform(&mut spectrum, &table, true, 1.0 / 64.0).unwrap();
        assert!(spectrum.iter().all(|s| s.im.abs() < 1e-12));
        assert!(spectrum.iter().any(|s| s.re.abs() > 1e-3));
    }

    #[test]
    fn test_conjugate_symmetric_grid_pairs() {
        let mut grid = white_noise::<f64>(4 * 8, 1.0, 9);
        conjugate_symmetric(&mut grid, 8);
        // (x, y) = (1, 1) pairs with (7, 3)
        assert_eq!(grid[8 + 1], grid[3 * 8 + 7].conj());
        // (4, 2) pairs with itself
        assert_eq!(grid[2 * 8 + 4].im, 0.0);
    }

    #[test]
    fn test_energy() {
        let samples = constant::<f64>(16, Complex::new(1.0, 1.0));
        assert_eq!(energy(&samples), 32.0);
    }
}
