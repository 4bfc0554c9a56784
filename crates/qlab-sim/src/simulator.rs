//! Simulator facade: exact evolution, shot sampling and combined runs.

use std::collections::BTreeMap;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use qlab_ir::Circuit;

use crate::config::SimulatorConfig;
use crate::error::{SimError, SimResult};
use crate::sampler::{ProbabilityDistribution, ShotCounts, sample_counts};
use crate::statevector::{StateVector, StateVectorParts};

/// Output of exact mode.
#[derive(Debug, Clone)]
pub struct ExactResult {
    /// Final state, measurements ignored.
    pub statevector: StateVector,
    /// Filtered outcome probabilities.
    pub probabilities: ProbabilityDistribution,
}

/// Output of a combined run, in the shape of the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    /// Number of qubits simulated.
    pub num_qubits: usize,
    /// Final amplitudes.
    pub statevector: StateVectorParts,
    /// Filtered exact probabilities.
    pub probabilities: ProbabilityDistribution,
    /// Observed frequency of each sampled outcome (`count / shots`).
    pub measurements: BTreeMap<String, f64>,
    /// Sampled counts.
    pub counts: ShotCounts,
    /// Shots drawn.
    pub shots: u32,
    /// Circuit depth.
    pub circuit_depth: usize,
    /// Number of operations in the circuit.
    pub gate_count: usize,
}

/// Statevector simulator.
///
/// Holds only configuration; every call allocates its own state, so one
/// simulator can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Create a new simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a simulator with a custom configuration.
    pub fn with_config(config: SimulatorConfig) -> Self {
        Self { config }
    }

    /// Current configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Run the circuit without measurements and return the exact final state
    /// and its filtered distribution.
    #[instrument(skip(self, circuit), fields(num_qubits = circuit.num_qubits()))]
    pub fn simulate_exact(&self, circuit: &Circuit) -> SimResult<ExactResult> {
        let statevector = self.evolve(circuit)?;
        let probabilities = ProbabilityDistribution::from_statevector(
            &statevector,
            self.config.probability_epsilon,
        );
        Ok(ExactResult {
            statevector,
            probabilities,
        })
    }

    /// Run the circuit, measure every qubit at the end and return `shots`
    /// sampled outcomes.
    #[instrument(skip(self, circuit), fields(num_qubits = circuit.num_qubits()))]
    pub fn simulate_shots(&self, circuit: &Circuit, shots: u32) -> SimResult<ShotCounts> {
        if shots == 0 {
            return Err(SimError::InvalidShots(0));
        }
        let statevector = self.evolve(circuit)?;
        self.sample(&statevector, shots)
    }

    /// Evolve once and report the state, the exact distribution and sampled
    /// counts together.
    #[instrument(skip(self, circuit), fields(num_qubits = circuit.num_qubits()))]
    pub fn run(&self, circuit: &Circuit, shots: u32) -> SimResult<SimulationResult> {
        if shots == 0 {
            return Err(SimError::InvalidShots(0));
        }
        let statevector = self.evolve(circuit)?;
        let counts = self.sample(&statevector, shots)?;
        let probabilities = ProbabilityDistribution::from_statevector(
            &statevector,
            self.config.probability_epsilon,
        );

        Ok(SimulationResult {
            num_qubits: circuit.num_qubits(),
            statevector: statevector.to_parts(),
            probabilities,
            measurements: counts.frequencies(),
            counts,
            shots,
            circuit_depth: circuit.depth(),
            gate_count: circuit.gate_count(),
        })
    }

    /// Check a circuit against the configured qubit ceiling without
    /// allocating anything.
    pub fn check_capacity(&self, circuit: &Circuit) -> SimResult<()> {
        let num_qubits = circuit.num_qubits();
        if num_qubits > self.config.max_qubits as usize {
            warn!(
                num_qubits,
                max_qubits = self.config.max_qubits,
                "circuit exceeds qubit limit"
            );
            return Err(SimError::TooManyQubits {
                num_qubits,
                max_qubits: self.config.max_qubits,
            });
        }
        Ok(())
    }

    /// Apply every unitary operation to a fresh |0…0⟩ state.
    fn evolve(&self, circuit: &Circuit) -> SimResult<StateVector> {
        self.check_capacity(circuit)?;

        let start = Instant::now();
        let mut state = StateVector::new(circuit.num_qubits())?;
        let mut applied = 0usize;
        for op in circuit.unitary_operations() {
            state.apply(op);
            applied += 1;
        }
        debug!(applied, elapsed = ?start.elapsed(), "statevector evolved");
        Ok(state)
    }

    fn sample(&self, state: &StateVector, shots: u32) -> SimResult<ShotCounts> {
        let weights = state.probabilities();
        let n = state.num_qubits();
        let counts = match self.config.seed {
            Some(seed) => sample_counts(&weights, n, shots, &mut StdRng::seed_from_u64(seed)),
            None => sample_counts(&weights, n, shots, &mut rand::thread_rng()),
        }?;
        debug!(shots, outcomes = counts.len(), "shots sampled");
        Ok(counts)
    }
}
