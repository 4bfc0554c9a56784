//! OpenQASM 2.0 emitter.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use qlab_ir::{Circuit, Operation, QubitId};

/// Emit a Circuit as `OpenQASM` 2.0.
///
/// Every qubit gets a same-index classical bit, and each measurement writes
/// `q[i]` into `c[i]`. Angles are printed so that [`parse`](crate::parse)
/// recovers the exact same `f64`.
pub fn emit(circuit: &Circuit) -> String {
    let mut emitter = Qasm2Emitter::new();
    emitter.emit_circuit(circuit);
    emitter.output
}

/// QASM 2.0 emitter.
struct Qasm2Emitter {
    output: String,
}

impl Qasm2Emitter {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn emit_circuit(&mut self, circuit: &Circuit) {
        let num_qubits = circuit.num_qubits();

        self.writeln("OPENQASM 2.0;");
        self.writeln("include \"qelib1.inc\";");
        self.writeln(&format!("qreg q[{num_qubits}];"));
        self.writeln(&format!("creg c[{num_qubits}];"));

        for op in circuit.operations() {
            self.emit_operation(op);
        }
    }

    fn emit_operation(&mut self, op: &Operation) {
        if op.is_measure() {
            let q = op.qubits[0].0;
            self.writeln(&format!("measure q[{q}] -> c[{q}];"));
            return;
        }

        let name = op.name();
        let qubits = emit_qubits(&op.qubits);
        match op.angle {
            Some(angle) => self.writeln(&format!("{name}({}) {qubits};", emit_angle(angle))),
            None => self.writeln(&format!("{name} {qubits};")),
        }
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

/// Format an angle losslessly.
///
/// The exact values π, π/2 and π/4 (and their negations) print symbolically;
/// everything else uses the shortest representation that reads back to the
/// same bits.
#[allow(clippy::float_cmp)]
fn emit_angle(v: f64) -> String {
    let named = [(PI, "pi"), (FRAC_PI_2, "pi/2"), (FRAC_PI_4, "pi/4")];
    for (value, text) in named {
        if v == value {
            return text.into();
        }
        if v == -value {
            return format!("-{text}");
        }
    }
    format!("{v:?}")
}

fn emit_qubits(qubits: &[QubitId]) -> String {
    qubits
        .iter()
        .map(|q| format!("q[{}]", q.0))
        .collect::<Vec<_>>()
        .join(", ")
}
