//! Spume CLI — benchmarking, worker sweeps, and snapshot tooling.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "spume")]
#[command(version, about = "Spume — parallel 2D circle-collision core")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one or all benchmark scenarios.
    Bench {
        /// Which scenario to run (drift_field, dense_cluster, obstacle_gauntlet, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Override the scenario's tick count.
        #[arg(short, long)]
        ticks: Option<u32>,

        /// Override the worker thread count.
        #[arg(short, long)]
        workers: Option<usize>,

        /// Output file path (.csv or .json).
        #[arg(short, long)]
        output: Option<String>,

        /// Emit per-tick telemetry through tracing.
        #[arg(long)]
        trace: bool,
    },

    /// Run one scenario across several worker counts and compare pair totals.
    Sweep {
        /// Which scenario to sweep.
        #[arg(short, long, default_value = "drift_field")]
        scenario: String,

        /// Override the scenario's tick count.
        #[arg(short, long)]
        ticks: Option<u32>,

        /// Worker counts to test.
        #[arg(short, long, value_delimiter = ',', default_values_t = vec![1, 2, 4, 8])]
        workers: Vec<usize>,
    },

    /// Print the contents of a world snapshot file.
    Inspect {
        /// Snapshot file to read.
        path: String,
    },

    /// Validate a pipeline config or world snapshot.
    Validate {
        /// Path to config (.toml) or snapshot file.
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Bench {
            scenario,
            ticks,
            workers,
            output,
            trace,
        } => commands::bench(&scenario, ticks, workers, output.as_deref(), trace),
        Commands::Sweep {
            scenario,
            ticks,
            workers,
        } => commands::sweep(&scenario, ticks, &workers),
        Commands::Inspect { path } => commands::inspect(&path),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
