//! Simulator configuration.

use serde::{Deserialize, Serialize};

/// Largest circuit the simulator accepts by default.
///
/// A statevector takes 16 · 2^n bytes, so 25 qubits is 512 MiB.
pub const DEFAULT_MAX_QUBITS: u32 = 25;

/// Probabilities below this are left out of reported distributions.
pub const PROBABILITY_EPSILON: f64 = 1e-10;

/// Shot count used when a request does not name one.
pub const DEFAULT_SHOTS: u32 = 1024;

/// Configuration for the statevector simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Qubit ceiling, checked before the amplitude array is allocated.
    ///
    /// Default: 25
    pub max_qubits: u32,

    /// Reporting threshold for outcome probabilities. Sampling always uses
    /// the unfiltered distribution.
    ///
    /// Default: 1e-10
    pub probability_epsilon: f64,

    /// Random number generator seed for reproducible shot sampling.
    ///
    /// Default: None (fresh randomness per call)
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_qubits: DEFAULT_MAX_QUBITS,
            probability_epsilon: PROBABILITY_EPSILON,
            seed: None,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the qubit ceiling.
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Set the reporting threshold for probabilities.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.probability_epsilon = epsilon;
        self
    }

    /// Set the sampling seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulatorConfig::default();
        assert_eq!(config.max_qubits, 25);
        assert_eq!(config.probability_epsilon, 1e-10);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_builders() {
        let config = SimulatorConfig::new()
            .with_max_qubits(10)
            .with_epsilon(1e-6)
            .with_seed(42);
        assert_eq!(config.max_qubits, 10);
        assert_eq!(config.probability_epsilon, 1e-6);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_partial_json() {
        let config: SimulatorConfig = serde_json::from_str(r#"{"seed": 7}"#).unwrap();
        assert_eq!(config.max_qubits, DEFAULT_MAX_QUBITS);
        assert_eq!(config.seed, Some(7));
    }
}
