//! qlab Circuit Model
//!
//! This crate provides the data model shared by every part of qlab: the gate
//! library, the immutable [`Circuit`], and the permissive [`build`] entry point
//! that turns raw gate descriptors into a validated circuit.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] for addressing qubits (qubit 0 is the least
//!   significant bit of a basis-state index)
//! - **Gates**: [`GateKind`] with arity, angle requirement and the local
//!   [`GateRule`] the simulator applies
//! - **Operations**: [`Operation`] combining a gate with its operands
//! - **Circuit**: [`Circuit`], an ordered, validated, immutable operation list
//! - **Builder**: [`build`] with per-gate [`Diagnostic`]s instead of failures
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qlab_ir::{GateDescriptor, build};
//!
//! let gates = vec![
//!     GateDescriptor::new("h", 0),
//!     GateDescriptor::new("cnot", 0).with_target(1),
//! ];
//!
//! let output = build(2, &gates).unwrap();
//! assert_eq!(output.circuit.num_qubits(), 2);
//! assert_eq!(output.circuit.gate_count(), 2);
//! assert!(output.diagnostics.is_empty());
//! ```
//!
//! # Example: Skipping a Bad Gate
//!
//! ```rust
//! use qlab_ir::{DiagnosticKind, GateDescriptor, build};
//!
//! let gates = vec![
//!     GateDescriptor::new("h", 0),
//!     GateDescriptor::new("frobnicate", 0),
//!     GateDescriptor::new("x", 1),
//! ];
//!
//! let output = build(2, &gates).unwrap();
//! assert_eq!(output.circuit.gate_count(), 2);
//! assert_eq!(output.diagnostics.len(), 1);
//! assert!(matches!(output.diagnostics[0].kind, DiagnosticKind::UnknownGate));
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg` | 1 | S and S-dagger gates |
//! | `T`, `Tdg` | 1 | T and T-dagger gates |
//! | `Rx`, `Ry`, `Rz` | 1 | Rotation gates (one angle) |
//! | `CX` | 2 | Controlled-NOT (alias `cnot`) |
//! | `CY`, `CZ` | 2 | Controlled-Y and Controlled-Z |
//! | `Swap` | 2 | SWAP gate |
//! | `CCX` | 3 | Toffoli gate (alias `toffoli`) |
//! | `CSwap` | 3 | Fredkin gate (alias `fredkin`) |
//! | `Measure` | 1 | Computational-basis measurement |

pub mod builder;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod operation;
pub mod qubit;

pub use builder::{
    BuildOutput, DEFAULT_ROTATION_ANGLE, Diagnostic, DiagnosticKind, GateDescriptor, build,
};
pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{GateKind, GateRule, Matrix2, TargetRule};
pub use operation::Operation;
pub use qubit::QubitId;
