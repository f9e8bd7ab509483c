//! CLI frontend for Karmic Dice.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "karmic",
    about = "Karmic Dice — roll tracking and karma adjustment for narrative dice",
    version,
    propagate_version = true
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll a dice pool through the karma pipeline and show the ledger
    Roll {
        /// Pool items such as 2b (two boost), 1s (one setback), p
        #[arg(required = true)]
        pool: Vec<String>,

        /// How many times to roll the pool
        #[arg(short, long, default_value = "1")]
        times: u32,

        /// RNG seed for deterministic rolls
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Ruleset identifier the simulated host reports
        #[arg(long)]
        system: Option<String>,

        /// JSON file with pipeline configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// JSON file with result tables (default: standard tables)
        #[arg(long)]
        tables: Option<PathBuf>,

        /// Print the ledger as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the result table of one or all denominations
    Tables {
        /// Denomination tag (a, b, p, d, c, s, f)
        denomination: Option<String>,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Roll {
            pool,
            times,
            seed,
            system,
            config,
            tables,
            json,
        } => commands::roll::run(&commands::roll::RollArgs {
            pool,
            times,
            seed,
            system,
            config,
            tables,
            json,
        }),
        Commands::Tables { denomination } => commands::tables::run(denomination.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
