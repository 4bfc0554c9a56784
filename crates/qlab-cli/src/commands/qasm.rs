//! QASM command implementation.

use anyhow::Result;
use console::style;

use qlab_sim::{Simulator, validate_shots};

use super::common::{load_circuit, print_results};

/// Execute the qasm command.
pub fn execute(simulator: &Simulator, input: &str, shots: i64, format: &str) -> Result<()> {
    let shots = validate_shots(shots)?;
    let circuit = load_circuit(input)?;
    simulator.check_capacity(&circuit)?;

    if !format.eq_ignore_ascii_case("json") {
        println!(
            "{} Simulating {} ({} shots)",
            style("→").cyan().bold(),
            style(input).green(),
            shots
        );
        println!(
            "  Loaded: {} qubits, depth {}",
            circuit.num_qubits(),
            circuit.depth()
        );
    }

    let result = simulator.run(&circuit, shots)?;
    print_results(&result, &circuit, &[], format)
}
