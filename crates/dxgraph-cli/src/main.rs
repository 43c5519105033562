//! dxgraph CLI - Symptom to disease lookup from the command line.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dxgraph::prelude::Policy;
use std::path::PathBuf;
use tracing::Level;

use crate::config::{Backend, Config, StoreOverrides};

#[derive(Parser)]
#[command(name = "dxgraph")]
#[command(author, version, about = "dxgraph - Find diseases and medicines from symptoms", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Graph to query (snapshot JSON or SQLite database)
    #[arg(short, long, global = true)]
    graph: Option<PathBuf>,

    /// Store backend (default: from config, or guessed from the graph extension)
    #[arg(short, long, global = true, value_enum)]
    backend: Option<Backend>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new dxgraph project
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Find diseases for comma-separated symptoms
    Find {
        /// Symptoms, e.g. "fever, cough"
        symptoms: Vec<String>,

        /// Matching policy: any or exact
        #[arg(short, long)]
        policy: Option<Policy>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the graph pattern and parameters a lookup would run
    Explain {
        /// Symptoms, e.g. "fever, cough"
        symptoms: Vec<String>,

        /// Matching policy: any or exact
        #[arg(short, long)]
        policy: Option<Policy>,
    },

    /// List every symptom in the graph
    Symptoms,

    /// Show graph statistics
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    init_logging(cli.verbose, &config.log_level);

    let overrides = StoreOverrides {
        graph: cli.graph,
        backend: cli.backend,
    };

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Find { symptoms, policy, json } => {
            let policy = policy.unwrap_or(config.query.policy);
            let input = commands::find::symptom_input(&symptoms);
            commands::find::run(&config, &overrides, &input, policy, json)
        }
        Commands::Explain { symptoms, policy } => {
            let policy = policy.unwrap_or(config.query.policy);
            commands::explain::run(&commands::find::symptom_input(&symptoms), policy)
        }
        Commands::Symptoms => commands::symptoms::run(&config, &overrides),
        Commands::Stats => commands::stats::run(&config, &overrides),
    }
}

/// Log to stderr so stdout stays clean for `--json`.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose {
        Level::DEBUG
    } else {
        level.parse().unwrap_or(Level::WARN)
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
