//! Benchmarks for statevector evolution and sampling
//!
//! Run with: cargo bench -p qlab-sim

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qlab_ir::{Circuit, GateKind, Operation, QubitId};
use qlab_sim::{Simulator, SimulatorConfig, StateVector};
use std::f64::consts::PI;

/// GHZ preparation: H on qubit 0, then a CX chain.
fn ghz(n: u32) -> Circuit {
    let mut ops = vec![Operation::gate(GateKind::H, [QubitId(0)])];
    ops.extend((0..n - 1).map(|i| Operation::gate(GateKind::CX, [QubitId(i), QubitId(i + 1)])));
    Circuit::new(n, ops).unwrap()
}

/// Layered circuit with rotations and entanglers on every qubit.
fn layered(n: u32, layers: usize) -> Circuit {
    let mut ops = Vec::new();
    for layer in 0..layers {
        for q in 0..n {
            ops.push(Operation::rotation(GateKind::Ry, QubitId(q), PI / (layer + 2) as f64));
        }
        for q in 0..n - 1 {
            ops.push(Operation::gate(GateKind::CZ, [QubitId(q), QubitId(q + 1)]));
        }
    }
    Circuit::new(n, ops).unwrap()
}

/// Benchmark single gate kernels on a wide register
fn bench_gate_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate_kernels");

    for num_qubits in [10_usize, 16, 20] {
        let mut state = StateVector::new(num_qubits).unwrap();
        let top = QubitId(num_qubits as u32 - 1);

        group.bench_with_input(BenchmarkId::new("h", num_qubits), &num_qubits, |b, _| {
            let op = Operation::gate(GateKind::H, [top]);
            b.iter(|| state.apply(black_box(&op)));
        });

        group.bench_with_input(BenchmarkId::new("cx", num_qubits), &num_qubits, |b, _| {
            let op = Operation::gate(GateKind::CX, [QubitId(0), top]);
            b.iter(|| state.apply(black_box(&op)));
        });

        group.bench_with_input(BenchmarkId::new("ccx", num_qubits), &num_qubits, |b, _| {
            let op = Operation::gate(GateKind::CCX, [QubitId(0), QubitId(1), top]);
            b.iter(|| state.apply(black_box(&op)));
        });
    }

    group.finish();
}

/// Benchmark full exact evolution
fn bench_evolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("evolution");
    let sim = Simulator::new();

    for num_qubits in [10_u32, 15, 20] {
        let circuit = ghz(num_qubits);
        group.bench_with_input(BenchmarkId::new("ghz", num_qubits), &circuit, |b, circuit| {
            b.iter(|| sim.simulate_exact(black_box(circuit)).unwrap());
        });

        let circuit = layered(num_qubits, 4);
        group.bench_with_input(BenchmarkId::new("layered", num_qubits), &circuit, |b, circuit| {
            b.iter(|| sim.simulate_exact(black_box(circuit)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark shot sampling
fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");
    let sim = Simulator::with_config(SimulatorConfig::new().with_seed(7));
    let circuit = layered(12, 2);

    for shots in [100_u32, 1024, 10_000] {
        group.bench_with_input(BenchmarkId::new("shots", shots), &shots, |b, &shots| {
            b.iter(|| sim.simulate_shots(black_box(&circuit), shots).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_gate_kernels, bench_evolution, bench_sampling);
criterion_main!(benches);
