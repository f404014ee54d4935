//! Demo data used when no input file is given

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use std::f64::consts::PI;

/// `n` standard normal samples; a seed makes the draw repeatable
pub fn standard_normal(n: usize, seed: Option<u64>) -> Vec<f64> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    rng.sample_iter(StandardNormal).take(n).collect()
}

/// Sine trace `amplitude * sin(2π f t)` sampled every `step` over `[0, duration)`
pub fn sine_trace(amplitude: f64, frequency: f64, step: f64, duration: f64) -> (Vec<f64>, Vec<f64>) {
    let steps = duration / step;
    // Absorb float noise so that e.g. 1.0 / 1e-5 yields exactly 100000 samples
    let steps = if (steps - steps.round()).abs() < 1e-6 {
        steps.round()
    } else {
        steps.ceil()
    };
    let n = steps as usize;
    let t: Vec<f64> = (0..n).map(|i| i as f64 * step).collect();
    let y = t
        .iter()
        .map(|&t| amplitude * (2.0 * PI * frequency * t).sin())
        .collect();
    (t, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_normal_is_repeatable() {
        let a = standard_normal(101, Some(7));
        let b = standard_normal(101, Some(7));
        assert_eq!(a.len(), 101);
        assert_eq!(a, b);
    }

    #[test]
    fn test_standard_normal_moments() {
        let samples = standard_normal(20_000, Some(42));
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let var = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / samples.len() as f64;

        assert!(mean.abs() < 0.05, "mean {}", mean);
        assert!((var - 1.0).abs() < 0.05, "variance {}", var);
    }

    #[test]
    fn test_standard_normal_seeds_differ() {
        assert_ne!(standard_normal(8, Some(1)), standard_normal(8, Some(2)));
        assert!(standard_normal(0, Some(1)).is_empty());
    }

    #[test]
    fn test_sine_trace_shape() {
        let (t, y) = sine_trace(5.0, 5.0, 0.00001, 1.0);
        assert_eq!(t.len(), 100_000);
        assert_eq!(y.len(), 100_000);
        assert_eq!(y[0], 0.0);
        assert!(y.iter().all(|v| v.abs() <= 5.0));
    }
}
