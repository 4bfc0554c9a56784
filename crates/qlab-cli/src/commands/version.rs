//! Version command implementation.

use console::style;

use qlab_ir::GateKind;
use qlab_sim::SimulatorConfig;

/// Execute the version command.
pub fn execute(config: &SimulatorConfig) {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - statevector simulation of small quantum circuits",
        style("qlab").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Simulator:");
    println!("  Max qubits:   {}", style(config.max_qubits).yellow());
    match config.seed {
        Some(seed) => println!("  Seed:         {seed}"),
        None => println!("  Seed:         {}", style("random").dim()),
    }
    let gates: Vec<&str> = GateKind::ALL.iter().map(|g| g.name()).collect();
    println!("  Gates:        {}", gates.join(", "));
    println!();
    println!("Features:");
    println!("  exact         statevector and outcome probabilities");
    println!("  shots         multinomial sampling of the final state");
    println!("  qasm          OpenQASM 2.0/3.0 import, OpenQASM 2.0 export");
    println!();
    println!(
        "Repository: {}",
        style(env!("CARGO_PKG_REPOSITORY")).underlined()
    );
    println!("License:    {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
