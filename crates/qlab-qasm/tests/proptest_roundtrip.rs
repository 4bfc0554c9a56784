//! Property-based tests for QASM roundtrip conversion.
//!
//! Tests that circuit → QASM → circuit reproduces the circuit exactly,
//! angles included.

use proptest::prelude::*;
use qlab_ir::{Circuit, GateDescriptor, GateKind, Operation, QubitId, build};
use qlab_qasm::{emit, parse};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// Finite angles: pi fractions, ordinary values and arbitrary bit patterns.
fn arb_angle() -> impl Strategy<Value = f64> {
    use prop::num::f64::{NEGATIVE, NORMAL, POSITIVE, SUBNORMAL, ZERO};
    prop_oneof![
        prop::sample::select(vec![PI, -PI, FRAC_PI_2, -FRAC_PI_2, FRAC_PI_4, -FRAC_PI_4]),
        -10.0_f64..10.0,
        POSITIVE | NEGATIVE | NORMAL | SUBNORMAL | ZERO,
    ]
}

/// One operation of any kind on distinct qubits of an `n`-qubit circuit.
fn arb_operation(num_qubits: u32) -> impl Strategy<Value = Operation> {
    (
        prop::sample::select(GateKind::ALL.to_vec()),
        Just((0..num_qubits).collect::<Vec<_>>()).prop_shuffle(),
        arb_angle(),
    )
        .prop_map(|(kind, order, angle)| {
            let qubits = order[..kind.num_qubits()].iter().map(|&q| QubitId(q));
            let angle = kind.takes_angle().then_some(angle);
            Operation::new(kind, qubits, angle)
        })
}

/// Generate a random circuit with 3-6 qubits and up to 30 operations.
fn arb_circuit() -> impl Strategy<Value = Circuit> {
    (3_u32..=6).prop_flat_map(|num_qubits| {
        prop::collection::vec(arb_operation(num_qubits), 0..=30)
            .prop_map(move |ops| Circuit::new(num_qubits, ops).unwrap())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// decode(encode(c)) == c, exactly.
    #[test]
    fn roundtrip_preserves_circuit(circuit in arb_circuit()) {
        let qasm = emit(&circuit);
        let parsed = parse(&qasm)
            .map_err(|e| TestCaseError::fail(format!("Parse failed: {e}\nQASM:\n{qasm}")))?;
        prop_assert_eq!(parsed, circuit);
    }

    /// Re-encoding a decoded circuit reproduces the same text.
    #[test]
    fn reemit_is_fixed_point(circuit in arb_circuit()) {
        let first = emit(&circuit);
        let second = emit(&parse(&first).unwrap());
        prop_assert_eq!(first, second);
    }

    /// Circuits produced by the builder survive the roundtrip too.
    #[test]
    fn roundtrip_builder_circuits(
        n in 1_i64..5,
        gates in prop::collection::vec(
            (
                prop::sample::select(vec![
                    "h", "x", "sdg", "rx", "ry", "rz", "cx", "cz", "swap", "ccx", "cswap",
                    "measure",
                ]),
                0_i64..4,
                prop::option::of(0_i64..4),
                prop::collection::vec(-4.0_f64..4.0, 0..2),
            ),
            0..15,
        ),
    ) {
        let descriptors: Vec<_> = gates
            .into_iter()
            .map(|(gate, qubit, target, params)| {
                let mut d = GateDescriptor::new(gate, qubit).with_params(params);
                d.target_qubit = target;
                d
            })
            .collect();
        let circuit = build(n, &descriptors).unwrap().circuit;
        prop_assert_eq!(parse(&emit(&circuit)).unwrap(), circuit);
    }
}

#[test]
fn test_normalized_reencoding() {
    // Broadcasts, aliases, expressions and QASM 3 syntax all normalize away.
    let source = r"
        OPENQASM 3.0;
        qubit[2] a;
        qubit b;
        bit[3] c;
        h a;
        CNOT a[1], b;
        rz(tau / 8) b;
        barrier a, b;
        c[0] = measure b;
    ";
    let normalized = "OPENQASM 2.0;\n\
                      include \"qelib1.inc\";\n\
                      qreg q[3];\n\
                      creg c[3];\n\
                      h q[0];\n\
                      h q[1];\n\
                      cx q[1], q[2];\n\
                      rz(pi/4) q[2];\n\
                      measure q[2] -> c[2];\n";
    assert_eq!(emit(&parse(source).unwrap()), normalized);
}
