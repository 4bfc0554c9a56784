//! Export command implementation.

use std::fs;

use anyhow::{Context, Result};
use console::style;

use qlab_ir::build;
use qlab_qasm::emit;

use super::common::{load_request, print_diagnostics};

/// Execute the export command.
pub fn execute(input: &str, output: Option<&str>) -> Result<()> {
    let request = load_request(input)?;
    let (circuit, diagnostics) = build(request.num_qubits, &request.gates)
        .with_context(|| format!("Invalid run request: {input}"))?
        .into_parts();
    print_diagnostics(&diagnostics);

    let text = emit(&circuit);
    match output {
        Some(path) => {
            fs::write(path, &text).with_context(|| format!("Failed to write file: {path}"))?;
            eprintln!(
                "{} Wrote {} operations to {}",
                style("✓").green().bold(),
                circuit.gate_count(),
                style(path).green()
            );
        }
        None => print!("{text}"),
    }
    Ok(())
}
