//! Run command implementation.

use anyhow::{Context, Result};
use console::style;
use tracing::info;

use qlab_ir::build;
use qlab_sim::{Simulator, validate_shots};

use super::common::{load_request, print_diagnostics, print_results};

/// Execute the run command.
pub fn execute(
    simulator: &Simulator,
    input: &str,
    shots: Option<i64>,
    format: &str,
) -> Result<()> {
    let request = load_request(input)?;
    let shots = validate_shots(shots.unwrap_or(request.shots))?;

    let (circuit, diagnostics) = build(request.num_qubits, &request.gates)
        .with_context(|| format!("Invalid run request: {input}"))?
        .into_parts();
    info!(
        gates = circuit.gate_count(),
        diagnostics = diagnostics.len(),
        "circuit built"
    );
    simulator.check_capacity(&circuit)?;

    if !format.eq_ignore_ascii_case("json") {
        println!(
            "{} Running {} ({} qubits, {} shots)",
            style("→").cyan().bold(),
            style(input).green(),
            circuit.num_qubits(),
            shots
        );
    }
    print_diagnostics(&diagnostics);

    let result = simulator.run(&circuit, shots)?;
    print_results(&result, &circuit, &diagnostics, format)
}
