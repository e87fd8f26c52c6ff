//! Per-read noise sampling.

use crate::NoiseDistribution;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Sample one noise draw for a single neighbor read.
///
/// Returns 0.0 when no distribution is configured. Callers draw once per
/// read, never sharing a draw across reads in the same step.
pub(crate) fn sample(
    distribution: Option<NoiseDistribution>,
    scale: f64,
    rng: &mut impl Rng,
) -> f64 {
    let Some(distribution) = distribution else {
        return 0.0;
    };
    if scale == 0.0 {
        return 0.0;
    }

    match distribution {
        NoiseDistribution::Uniform => rng.gen_range(-scale..=scale),
        NoiseDistribution::Gaussian => Normal::new(0.0, scale)
            .expect("scale validated before the run")
            .sample(rng),
        NoiseDistribution::Laplace => {
            // Inverse-CDF transform: u uniform on [-1/2, 1/2),
            // x = -scale * sign(u) * ln(1 - 2|u|).
            let u: f64 = rng.gen::<f64>() - 0.5;
            -scale * u.signum() * (1.0 - 2.0 * u.abs()).ln()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_no_distribution_is_silent() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..10 {
            assert_eq!(sample(None, 5.0, &mut rng), 0.0);
        }
    }

    #[test]
    fn test_zero_scale_is_silent() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for distribution in [
            NoiseDistribution::Uniform,
            NoiseDistribution::Gaussian,
            NoiseDistribution::Laplace,
        ] {
            assert_eq!(sample(Some(distribution), 0.0, &mut rng), 0.0);
        }
    }

    #[test]
    fn test_uniform_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..1000 {
            let draw = sample(Some(NoiseDistribution::Uniform), 3.0, &mut rng);
            assert!((-3.0..=3.0).contains(&draw));
        }
    }

    #[test]
    fn test_gaussian_and_laplace_center_near_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for distribution in [NoiseDistribution::Gaussian, NoiseDistribution::Laplace] {
            let n = 20_000;
            let mean: f64 = (0..n)
                .map(|_| sample(Some(distribution), 1.0, &mut rng))
                .sum::<f64>()
                / n as f64;
            // Standard error is ~1/sqrt(n) ≈ 0.007 for Gaussian,
            // ~sqrt(2)/sqrt(n) ≈ 0.01 for Laplace.
            assert!(
                mean.abs() < 0.05,
                "{distribution:?} sample mean {mean} too far from 0"
            );
        }
    }

    #[test]
    fn test_draws_are_independent_per_read() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let a = sample(Some(NoiseDistribution::Uniform), 1.0, &mut rng);
        let b = sample(Some(NoiseDistribution::Uniform), 1.0, &mut rng);
        assert_ne!(a, b);
    }
}
