//! qlab Statevector Simulator
//!
//! Dense statevector simulation of circuits built with [`qlab_ir`], plus exact
//! probability reporting and multinomial shot sampling.
//!
//! # Modes
//!
//! - **Exact**: [`simulate_exact`] evolves |0…0⟩ through every gate, ignoring
//!   measurements, and returns the final [`StateVector`] together with its
//!   [`ProbabilityDistribution`] (outcomes below 1e-10 omitted).
//! - **Shots**: [`simulate_shots`] evolves the same way, treats the circuit as
//!   measuring every qubit at the end, and draws that many outcomes into
//!   [`ShotCounts`].
//! - **Combined**: [`Simulator::run`] does both from one evolution and adds
//!   circuit metrics.
//!
//! Bitstrings are written with qubit 0 as the rightmost character.
//!
//! # Example
//!
//! ```rust
//! use qlab_ir::{GateDescriptor, build};
//! use qlab_sim::{simulate_exact, simulate_shots};
//!
//! let gates = vec![
//!     GateDescriptor::new("h", 0),
//!     GateDescriptor::new("cx", 0).with_target(1),
//! ];
//! let circuit = build(2, &gates).unwrap().circuit;
//!
//! let exact = simulate_exact(&circuit).unwrap();
//! assert!((exact.probabilities.get("00") - 0.5).abs() < 1e-10);
//! assert!((exact.probabilities.get("11") - 0.5).abs() < 1e-10);
//!
//! let counts = simulate_shots(&circuit, 100).unwrap();
//! assert_eq!(counts.total(), 100);
//! ```
//!
//! # Resource limits
//!
//! A statevector for n qubits takes 16 · 2^n bytes. Circuits wider than
//! [`SimulatorConfig::max_qubits`] (25 by default) are rejected before any
//! allocation, and the allocation itself is fallible.

pub mod config;
pub mod error;
pub mod sampler;
pub mod simulator;
pub mod statevector;

pub use config::{DEFAULT_MAX_QUBITS, DEFAULT_SHOTS, PROBABILITY_EPSILON, SimulatorConfig};
pub use error::{SimError, SimResult};
pub use sampler::{ProbabilityDistribution, ShotCounts, bitstring, sample_counts, validate_shots};
pub use simulator::{ExactResult, SimulationResult, Simulator};
pub use statevector::{StateVector, StateVectorParts};

use qlab_ir::Circuit;

/// Exact mode with the default configuration.
pub fn simulate_exact(circuit: &Circuit) -> SimResult<ExactResult> {
    Simulator::new().simulate_exact(circuit)
}

/// Shot mode with the default configuration.
pub fn simulate_shots(circuit: &Circuit, shots: u32) -> SimResult<ShotCounts> {
    Simulator::new().simulate_shots(circuit, shots)
}
