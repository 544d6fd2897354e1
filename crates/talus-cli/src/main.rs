//! Talus CLI — benchmark scenarios, config validation and law listing.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "talus")]
#[command(version, about = "Talus — DEM particle contact engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run benchmark scenarios.
    Benchmark {
        /// Which scenario to run (head_on, periodic_chain, adhesive_pair, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Contact model config (TOML) replacing each scenario's default.
        #[arg(short, long)]
        config: Option<String>,

        /// Evaluate forces on the rayon pool.
        #[arg(long)]
        parallel: bool,

        /// Forward step telemetry to tracing.
        #[arg(long)]
        telemetry: bool,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate a contact model config.
    Validate {
        /// Path to config file (TOML).
        path: String,
    },

    /// List the supported normal and rolling-resistance laws.
    Laws,

    /// List the preset materials.
    Materials,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Benchmark {
            scenario,
            config,
            parallel,
            telemetry,
            output,
        } => commands::benchmark(
            &scenario,
            config.as_deref(),
            parallel,
            telemetry,
            output.as_deref(),
        ),
        Commands::Validate { path } => commands::validate(&path),
        Commands::Laws => commands::laws(),
        Commands::Materials => commands::materials(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
