//! Error types for the sim crate.

use thiserror::Error;

/// Errors produced by the statevector engine and the sampler.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Shot count must be positive.
    #[error("Shot count must be at least 1, got {0}")]
    InvalidShots(i64),

    /// Circuit is wider than this simulator accepts.
    #[error("Circuit has {num_qubits} qubits but the simulator supports at most {max_qubits}")]
    TooManyQubits {
        /// Qubits in the rejected circuit.
        num_qubits: usize,
        /// Configured ceiling.
        max_qubits: u32,
    },

    /// The amplitude array could not be allocated.
    #[error("Cannot allocate a statevector for {num_qubits} qubits ({bytes} bytes)")]
    AllocationFailed {
        /// Qubits requested.
        num_qubits: usize,
        /// Bytes requested, saturating at `usize::MAX`.
        bytes: usize,
    },

    /// Probabilities cannot be sampled (all zero, negative or non-finite).
    #[error("Invalid probability distribution: {0}")]
    InvalidDistribution(String),
}

impl SimError {
    /// Whether the input was well-formed but too large for this deployment,
    /// as opposed to invalid.
    pub fn is_resource_exhausted(&self) -> bool {
        matches!(
            self,
            SimError::TooManyQubits { .. } | SimError::AllocationFailed { .. }
        )
    }
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
