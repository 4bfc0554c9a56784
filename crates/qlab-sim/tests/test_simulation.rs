//! End-to-end simulation tests: builder → engine → sampler.

use num_complex::Complex64;
use proptest::prelude::*;
use qlab_ir::{Circuit, GateDescriptor, GateKind, Operation, QubitId, build};
use qlab_sim::{
    ProbabilityDistribution, SimError, Simulator, SimulatorConfig, StateVector, sample_counts,
    simulate_exact, simulate_shots,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::f64::consts::PI;

fn circuit(num_qubits: i64, gates: &[GateDescriptor]) -> Circuit {
    build(num_qubits, gates).unwrap().circuit
}

fn assert_distribution(dist: &ProbabilityDistribution, expected: &[(&str, f64)]) {
    assert_eq!(dist.len(), expected.len(), "{dist:?}");
    for &(bits, p) in expected {
        assert!((dist.get(bits) - p).abs() < 1e-9, "P({bits}) = {}, expected {p}", dist.get(bits));
    }
}

#[test]
fn single_qubit_gates_match_their_matrices() {
    for kind in GateKind::ALL {
        if kind.num_qubits() != 1 || kind.is_measure() {
            continue;
        }
        let angle = 0.7;
        let mut gate = GateDescriptor::new(kind.name(), 0);
        if kind.takes_angle() {
            gate = gate.with_params(vec![angle]);
        }
        let result = simulate_exact(&circuit(1, &[gate])).unwrap();

        // Column 0 of the matrix is the image of |0⟩.
        let m = kind.matrix(angle).unwrap();
        let (p0, p1) = (m[0][0].norm_sqr(), m[1][0].norm_sqr());
        for (bits, p) in [("0", p0), ("1", p1)] {
            assert!((result.probabilities.get(bits) - p).abs() < 1e-9, "{kind} {bits}");
        }
        assert!((result.statevector.amplitudes()[0] - m[0][0]).norm() < 1e-12, "{kind}");
        assert!((result.statevector.amplitudes()[1] - m[1][0]).norm() < 1e-12, "{kind}");
    }
}

#[test]
fn hadamard_gives_even_split() {
    let result = simulate_exact(&circuit(1, &[GateDescriptor::new("H", 0)])).unwrap();
    assert_distribution(&result.probabilities, &[("0", 0.5), ("1", 0.5)]);
}

#[test]
fn bell_state_end_to_end() {
    let gates = [
        GateDescriptor::new("h", 0),
        GateDescriptor::new("cx", 0).with_target(1),
    ];
    let result = simulate_exact(&circuit(2, &gates)).unwrap();
    assert_distribution(&result.probabilities, &[("00", 0.5), ("11", 0.5)]);
    assert_eq!(result.probabilities.get("01"), 0.0);
    assert_eq!(result.probabilities.get("10"), 0.0);
}

#[test]
fn x_gate_end_to_end() {
    let result = simulate_exact(&circuit(1, &[GateDescriptor::new("x", 0)])).unwrap();
    assert_distribution(&result.probabilities, &[("1", 1.0)]);
}

#[test]
fn qubit_zero_is_rightmost() {
    let result = simulate_exact(&circuit(3, &[GateDescriptor::new("x", 0)])).unwrap();
    assert_distribution(&result.probabilities, &[("001", 1.0)]);
}

#[test]
fn empty_circuit_stays_in_ground_state() {
    for n in 1..=5 {
        let empty = Circuit::empty(n).unwrap();
        let result = simulate_exact(&empty).unwrap();
        assert_eq!(result.statevector.amplitudes()[0], Complex64::new(1.0, 0.0));
        assert!(result.statevector.amplitudes()[1..].iter().all(|a| a.norm() == 0.0));

        let zeros = "0".repeat(n as usize);
        for shots in [1, 100, 10_000] {
            let counts = simulate_shots(&empty, shots).unwrap();
            assert_eq!(counts.get(&zeros), u64::from(shots));
            assert_eq!(counts.len(), 1);
        }
    }
}

#[test]
fn ghz_shots_only_hit_extremes() {
    let gates = [
        GateDescriptor::new("h", 0),
        GateDescriptor::new("cx", 0).with_target(1),
        GateDescriptor::new("cx", 1).with_target(2),
        GateDescriptor::new("measure", 0),
        GateDescriptor::new("measure", 1),
        GateDescriptor::new("measure", 2),
    ];
    let sim = Simulator::with_config(SimulatorConfig::new().with_seed(2024));
    let counts = sim.simulate_shots(&circuit(3, &gates), 10_000).unwrap();
    assert_eq!(counts.total(), 10_000);
    assert_eq!(counts.get("000") + counts.get("111"), 10_000);
    let p000 = counts.get("000") as f64 / 10_000.0;
    assert!((p000 - 0.5).abs() < 0.03, "p000 = {p000}");
}

#[test]
fn unknown_gate_is_skipped_not_fatal() {
    let gates = [
        GateDescriptor::new("h", 0),
        GateDescriptor::new("warp_drive", 1),
        GateDescriptor::new("cnot", 0).with_target(1),
    ];
    let output = build(2, &gates).unwrap();
    assert_eq!(output.circuit.gate_count(), 2);
    assert_eq!(output.diagnostics.len(), 1);

    let result = simulate_exact(&output.circuit).unwrap();
    assert_distribution(&result.probabilities, &[("00", 0.5), ("11", 0.5)]);
}

#[test]
fn non_positive_qubit_count_rejected() {
    assert!(build(0, &[]).is_err());
    assert!(build(-1, &[GateDescriptor::new("h", 0)]).is_err());
}

#[test]
fn qubit_ceiling_enforced_before_allocation() {
    let wide = Circuit::empty(26).unwrap();
    let err = simulate_exact(&wide).unwrap_err();
    assert!(matches!(err, SimError::TooManyQubits { num_qubits: 26, max_qubits: 25 }));
    assert!(err.is_resource_exhausted());
}

#[test]
fn rotation_default_angle_is_half_pi() {
    let defaulted = simulate_exact(&circuit(1, &[GateDescriptor::new("ry", 0)])).unwrap();
    let explicit = simulate_exact(&circuit(
        1,
        &[GateDescriptor::new("ry", 0).with_params(vec![PI / 2.0])],
    ))
    .unwrap();
    assert_eq!(defaulted.statevector, explicit.statevector);
    assert_distribution(&defaulted.probabilities, &[("0", 0.5), ("1", 0.5)]);
}

#[test]
fn measurements_do_not_change_exact_state() {
    let with = circuit(1, &[GateDescriptor::new("h", 0), GateDescriptor::new("measure", 0)]);
    let without = circuit(1, &[GateDescriptor::new("h", 0)]);
    assert_eq!(
        simulate_exact(&with).unwrap().statevector,
        simulate_exact(&without).unwrap().statevector
    );
}

#[test]
fn sampling_uses_unfiltered_distribution() {
    // A 1e-12 outcome is hidden from the report but stays sampleable.
    let weights = [1.0 - 1e-12, 1e-12];
    let mut rng = StdRng::seed_from_u64(3);
    let counts = sample_counts(&weights, 1, 100, &mut rng).unwrap();
    assert_eq!(counts.total(), 100);

    let mut state = StateVector::new(1).unwrap();
    state.apply(&Operation::rotation(GateKind::Ry, QubitId(0), 2e-6));
    let dist = ProbabilityDistribution::from_statevector(&state, 1e-10);
    assert_eq!(dist.len(), 1);
    assert!(state.probabilities()[1] > 0.0);
}

/// Any supported operation on distinct qubits of an `n`-qubit register.
fn arb_operation(num_qubits: u32) -> impl Strategy<Value = Operation> {
    (
        prop::sample::select(GateKind::ALL.to_vec()),
        Just((0..num_qubits).collect::<Vec<_>>()).prop_shuffle(),
        -2.0 * PI..2.0 * PI,
    )
        .prop_map(|(kind, order, angle)| {
            let qubits = order[..kind.num_qubits()].iter().map(|&q| QubitId(q));
            Operation::new(kind, qubits, kind.takes_angle().then_some(angle))
        })
}

fn arb_circuit() -> impl Strategy<Value = Circuit> {
    (3_u32..=7).prop_flat_map(|n| {
        prop::collection::vec(arb_operation(n), 0..40)
            .prop_map(move |ops| Circuit::new(n, ops).unwrap())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Evolution is unitary: the norm stays 1.
    #[test]
    fn norm_is_preserved(circuit in arb_circuit()) {
        let result = simulate_exact(&circuit).unwrap();
        prop_assert!((result.statevector.norm_squared() - 1.0).abs() < 1e-9);
        prop_assert!(result.probabilities.total() <= 1.0 + 1e-9);
    }

    /// Shot counts always sum to the requested number of shots.
    #[test]
    fn counts_sum_to_shots(
        circuit in arb_circuit(),
        shots in prop::sample::select(vec![1_u32, 100, 10_000]),
        seed in any::<u64>(),
    ) {
        let sim = Simulator::with_config(SimulatorConfig::new().with_seed(seed));
        let counts = sim.simulate_shots(&circuit, shots).unwrap();
        prop_assert_eq!(counts.total(), u64::from(shots));
        for (bits, _) in counts.iter() {
            prop_assert_eq!(bits.len(), circuit.num_qubits());
        }
    }
}
