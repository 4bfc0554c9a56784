//! qlab Command-Line Interface
//!
//! Runs gate lists and OpenQASM files through the statevector simulator and
//! converts gate lists to OpenQASM text.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use qlab_sim::{DEFAULT_MAX_QUBITS, Simulator, SimulatorConfig};

mod commands;

use commands::{export, qasm, run, version};

/// qlab - statevector simulation of small quantum circuits
#[derive(Parser)]
#[command(name = "qlab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Largest register the simulator will allocate
    #[arg(long, env = "QLAB_MAX_QUBITS", default_value_t = DEFAULT_MAX_QUBITS, global = true)]
    max_qubits: u32,

    /// Seed for reproducible shot sampling
    #[arg(long, env = "QLAB_SEED", global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a JSON run request
    Run {
        /// Input file (JSON run request)
        #[arg(short, long)]
        input: String,

        /// Number of shots (overrides the request)
        #[arg(short, long)]
        shots: Option<i64>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Simulate an OpenQASM 2.0 or 3.0 file
    Qasm {
        /// Input file (OpenQASM)
        #[arg(short, long)]
        input: String,

        /// Number of shots
        #[arg(short, long, default_value = "1024")]
        shots: i64,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Convert a JSON run request to OpenQASM 2.0
    Export {
        /// Input file (JSON run request)
        #[arg(short, long)]
        input: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = SimulatorConfig::new().with_max_qubits(cli.max_qubits);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    let simulator = Simulator::with_config(config);

    // Execute command
    let result = match cli.command {
        Commands::Run {
            input,
            shots,
            format,
        } => run::execute(&simulator, &input, shots, &format),

        Commands::Qasm {
            input,
            shots,
            format,
        } => qasm::execute(&simulator, &input, shots, &format),

        Commands::Export { input, output } => export::execute(&input, output.as_deref()),

        Commands::Version => {
            version::execute(simulator.config());
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
