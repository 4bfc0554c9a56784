//! `OpenQASM` reader and writer for qlab circuits
//!
//! This crate is the text interchange format of qlab. [`emit`] writes a
//! [`Circuit`](qlab_ir::Circuit) as `OpenQASM` 2.0 and [`parse`] reads
//! `OpenQASM` 2.x or 3.x text back into a validated circuit.
//!
//! Unlike the permissive circuit builder, the reader is strict: a syntax error,
//! an unknown gate or an out-of-range operand fails the whole parse with a
//! [`ParseError`] that names the offending line.
//!
//! # Supported Features
//!
//! | Feature | Example |
//! |---------|---------|
//! | Version declaration | `OPENQASM 2.0;`, `OPENQASM 3.0;` |
//! | Includes (ignored) | `include "qelib1.inc";` |
//! | Quantum registers | `qreg q[5];`, `qubit[5] q;`, `qubit q;` |
//! | Classical registers | `creg c[5];`, `bit[5] c;` |
//! | Gates | `h q[0];`, `cx q[0], q[1];` |
//! | Parameterized gates | `rx(pi/4) q[0];`, `rz(2*sin(0.3)) q[1];` |
//! | Register broadcast | `h q;`, `cx a, b;` |
//! | Measurements | `measure q -> c;`, `c[0] = measure q[0];` |
//! | Barriers (no-op) | `barrier q;` |
//! | Comments | `// line`, `/* block */` |
//!
//! Multiple quantum registers are laid out one after another in declaration
//! order, so `qreg a[2]; qreg b[2];` maps `b[0]` to qubit 2. The total size
//! of each kind of register is capped at [`MAX_REGISTER_SIZE`].
//!
//! # Example: Parsing QASM
//!
//! ```rust
//! use qlab_qasm::parse;
//!
//! let qasm = r#"
//!     OPENQASM 2.0;
//!     include "qelib1.inc";
//!     qreg q[2];
//!     creg c[2];
//!     h q[0];
//!     cx q[0], q[1];
//!     measure q -> c;
//! "#;
//!
//! let circuit = parse(qasm).unwrap();
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.gate_count(), 4);
//! ```
//!
//! # Example: Round-Trip
//!
//! ```rust
//! use qlab_ir::{GateDescriptor, build};
//! use qlab_qasm::{emit, parse};
//!
//! let gates = vec![
//!     GateDescriptor::new("h", 0),
//!     GateDescriptor::new("rz", 1).with_params(vec![0.123]),
//!     GateDescriptor::new("cx", 0).with_target(1),
//! ];
//! let circuit = build(2, &gates).unwrap().circuit;
//!
//! let qasm = emit(&circuit);
//! assert!(qasm.contains("rz(0.123) q[1];"));
//! assert_eq!(parse(&qasm).unwrap(), circuit);
//! ```

mod ast;
mod emitter;
mod error;
mod lexer;
mod parser;

pub use emitter::emit;
pub use error::{ParseError, ParseResult};
pub use parser::{MAX_REGISTER_SIZE, parse, parse_ast};

// Re-export AST types for advanced users
pub mod syntax {
    pub use crate::ast::*;
}
