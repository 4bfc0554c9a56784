//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use serde::{Deserialize, Serialize};

use qlab_ir::{Circuit, Diagnostic, GateDescriptor};
use qlab_qasm::{emit, parse};
use qlab_sim::{DEFAULT_SHOTS, SimulationResult};

/// Outcomes shown in the table before the rest are summarized.
const MAX_TABLE_ROWS: usize = 16;

/// A gate list with its register size and shot count, as submitted by a
/// front end.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    #[serde(default = "default_num_qubits")]
    pub num_qubits: i64,
    #[serde(default)]
    pub gates: Vec<GateDescriptor>,
    #[serde(default = "default_shots")]
    pub shots: i64,
}

fn default_num_qubits() -> i64 {
    2
}

fn default_shots() -> i64 {
    i64::from(DEFAULT_SHOTS)
}

/// JSON report: the simulation result, the circuit as OpenQASM text and any
/// builder diagnostics.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    #[serde(flatten)]
    pub result: &'a SimulationResult,
    pub qasm: String,
    pub diagnostics: &'a [Diagnostic],
}

impl<'a> RunReport<'a> {
    pub fn new(
        result: &'a SimulationResult,
        circuit: &Circuit,
        diagnostics: &'a [Diagnostic],
    ) -> Self {
        Self {
            result,
            qasm: emit(circuit),
            diagnostics,
        }
    }
}

fn read_source(path: &str) -> Result<String> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
}

/// Load a run request from a JSON file.
pub fn load_request(path: &str) -> Result<RunRequest> {
    let source = read_source(path)?;
    serde_json::from_str(&source).with_context(|| format!("Invalid run request: {path}"))
}

/// Load a circuit from an OpenQASM file.
pub fn load_circuit(path: &str) -> Result<Circuit> {
    let source = read_source(path)?;
    parse(&source).with_context(|| format!("Parse error in {path}"))
}

/// Print builder diagnostics to stderr so they never mix with data output.
pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diag in diagnostics {
        let marker = if diag.is_skip() {
            style("!").yellow().bold()
        } else {
            style("·").dim()
        };
        eprintln!("  {marker} {diag}");
    }
}

/// Print a simulation result in the requested format.
pub fn print_results(
    result: &SimulationResult,
    circuit: &Circuit,
    diagnostics: &[Diagnostic],
    format: &str,
) -> Result<()> {
    match format.to_lowercase().as_str() {
        "json" => {
            let report = RunReport::new(result, circuit, diagnostics);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "table" => print_table(result),
        other => anyhow::bail!("Unknown output format: '{other}'. Available: table, json"),
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn print_table(result: &SimulationResult) {
    println!(
        "\n{} Results ({} qubits, {} shots):",
        style("✓").green().bold(),
        result.num_qubits,
        result.shots
    );
    println!("  Gates: {}, depth {}", result.gate_count, result.circuit_depth);

    let mut sorted: Vec<(&str, u64)> = result.counts.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let total = result.shots.max(1) as f64;

    println!("\n  {}", style("Counts").bold());
    for (bitstring, count) in sorted.iter().take(MAX_TABLE_ROWS) {
        let pct = *count as f64 / total * 100.0;
        let bar_len = (pct / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            pct,
            style(bar).green()
        );
    }
    if sorted.len() > MAX_TABLE_ROWS {
        println!("  ... and {} more outcomes", sorted.len() - MAX_TABLE_ROWS);
    }

    println!("\n  {}", style("Probabilities").bold());
    let shown = result.probabilities.len();
    for (bitstring, p) in result.probabilities.iter().take(MAX_TABLE_ROWS) {
        println!("  {}: {:.6}", style(bitstring).cyan(), p);
    }
    if shown > MAX_TABLE_ROWS {
        println!("  ... and {} more outcomes", shown - MAX_TABLE_ROWS);
    }
}
