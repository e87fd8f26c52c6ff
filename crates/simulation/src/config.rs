//! Configuration types for a simulation run.

use crate::SimulationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Consensus update rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Every node recomputes its value each round from a frozen snapshot
    /// of its neighbors' values.
    Synchronous,
    /// One randomly chosen neighbor pair exchanges and averages values
    /// per step.
    Asynchronous,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Synchronous => f.write_str("synchronous"),
            Algorithm::Asynchronous => f.write_str("asynchronous"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sync" | "synchronous" => Ok(Algorithm::Synchronous),
            "async" | "asynchronous" => Ok(Algorithm::Asynchronous),
            _ => Err(SimulationError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Distribution of the noise added to a value before a neighbor reads it.
///
/// Every read gets its own independent draw; the configured scale
/// parameterizes each variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseDistribution {
    /// Uniform on [-scale, scale].
    Uniform,
    /// Normal with mean 0 and standard deviation `scale`.
    Gaussian,
    /// Laplace with mean 0 and scale parameter `scale`.
    Laplace,
}

impl fmt::Display for NoiseDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoiseDistribution::Uniform => f.write_str("uniform"),
            NoiseDistribution::Gaussian => f.write_str("gaussian"),
            NoiseDistribution::Laplace => f.write_str("laplace"),
        }
    }
}

impl FromStr for NoiseDistribution {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uniform" => Ok(NoiseDistribution::Uniform),
            "gaussian" | "normal" => Ok(NoiseDistribution::Gaussian),
            "laplace" => Ok(NoiseDistribution::Laplace),
            _ => Err(SimulationError::UnknownNoiseDistribution(s.to_string())),
        }
    }
}

/// Configuration for a single simulation run. Immutable per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Update rule to apply each iteration.
    pub algorithm: Algorithm,

    /// Iteration cap. Hitting it without converging is a normal
    /// completion, detectable through the final error.
    pub max_iterations: usize,

    /// Convergence tolerance.
    pub epsilon: f64,

    /// Scale of the per-read noise. Ignored without a distribution.
    pub noise_scale: f64,

    /// Noise distribution, or `None` for exact exchanges.
    pub noise_distribution: Option<NoiseDistribution>,
}

impl SimulationConfig {
    /// Create a configuration for the given algorithm with defaults for
    /// everything else.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    /// Set the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence tolerance.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Enable per-read noise with the given distribution and scale.
    pub fn with_noise(mut self, distribution: NoiseDistribution, scale: f64) -> Self {
        self.noise_distribution = Some(distribution);
        self.noise_scale = scale;
        self
    }

    /// Reject malformed configuration before a run starts.
    pub(crate) fn validate(&self) -> Result<(), SimulationError> {
        if self.max_iterations == 0 {
            return Err(SimulationError::ZeroIterationCap);
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(SimulationError::InvalidEpsilon(self.epsilon));
        }
        if !self.noise_scale.is_finite() || self.noise_scale < 0.0 {
            return Err(SimulationError::InvalidNoiseScale(self.noise_scale));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Synchronous,
            max_iterations: 1000,
            epsilon: 1e-6,
            noise_scale: 0.0,
            noise_distribution: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.algorithm, Algorithm::Synchronous);
        assert_eq!(config.max_iterations, 1000);
        assert_eq!(config.epsilon, 1e-6);
        assert_eq!(config.noise_scale, 0.0);
        assert!(config.noise_distribution.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = SimulationConfig::new(Algorithm::Asynchronous)
            .with_max_iterations(50)
            .with_epsilon(1e-3)
            .with_noise(NoiseDistribution::Laplace, 0.5);
        assert_eq!(config.algorithm, Algorithm::Asynchronous);
        assert_eq!(config.max_iterations, 50);
        assert_eq!(config.epsilon, 1e-3);
        assert_eq!(config.noise_distribution, Some(NoiseDistribution::Laplace));
        assert_eq!(config.noise_scale, 0.5);
    }

    #[test]
    fn test_validate_rejects_zero_cap() {
        let config = SimulationConfig::default().with_max_iterations(0);
        assert_eq!(config.validate(), Err(SimulationError::ZeroIterationCap));
    }

    #[test]
    fn test_validate_rejects_bad_epsilon() {
        for epsilon in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = SimulationConfig::default().with_epsilon(epsilon);
            assert!(matches!(
                config.validate(),
                Err(SimulationError::InvalidEpsilon(_))
            ));
        }
    }

    #[test]
    fn test_validate_rejects_negative_noise_scale() {
        let config = SimulationConfig::default().with_noise(NoiseDistribution::Uniform, -0.1);
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidNoiseScale(_))
        ));
    }

    #[test]
    fn test_algorithm_parsing() {
        assert_eq!("sync".parse::<Algorithm>().unwrap(), Algorithm::Synchronous);
        assert_eq!(
            "ASYNCHRONOUS".parse::<Algorithm>().unwrap(),
            Algorithm::Asynchronous
        );
        assert!("quantum".parse::<Algorithm>().is_err());
    }
}
