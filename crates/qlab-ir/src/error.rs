//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Circuit qubit count is zero, negative or too large to address.
    #[error("Qubit count must be a positive integer, got {0}")]
    InvalidQubitCount(i64),

    /// Qubit index is not below the circuit's qubit count.
    #[error(
        "Qubit {qubit} out of range for a {num_qubits}-qubit circuit{}",
        format_gate_context(.gate_name)
    )]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Number of qubits in the circuit.
        num_qubits: usize,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: usize,
        /// Actual number of qubits provided.
        got: usize,
    },

    /// Rotation gate without an angle.
    #[error("Gate '{0}' requires an angle")]
    MissingAngle(String),

    /// Fixed gate carrying an angle.
    #[error("Gate '{0}' does not take an angle")]
    UnexpectedAngle(String),

    /// Angle is NaN or infinite.
    #[error("Gate '{gate_name}' has non-finite angle {angle}")]
    NonFiniteAngle {
        /// Name of the gate.
        gate_name: String,
        /// The rejected angle.
        angle: f64,
    },

    /// Gate name not present in the gate library.
    #[error("Unknown gate: {0}")]
    UnknownGate(String),
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
