//! Show graph statistics.

use anyhow::{Context, Result};
use colored::Colorize;

use super::open_engine;
use crate::config::{Config, StoreOverrides};

pub fn run(config: &Config, overrides: &StoreOverrides) -> Result<()> {
    let settings = config.store_settings(overrides);
    let engine = open_engine(config, overrides)?;
    let counts = engine.graph_counts().context("Failed to count graph")?;

    println!("{}", "dxgraph Statistics".white().bold());
    println!("{}", "═".repeat(40).dimmed());
    println!();

    println!("{}", "Store".blue().bold());
    println!("  Backend:           {:?}", settings.backend);
    println!("  Path:              {}", settings.path.display());
    println!();

    println!("{}", "Nodes".blue().bold());
    println!("  Symptoms:          {}", counts.symptoms.to_string().cyan());
    println!("  Diseases:          {}", counts.diseases.to_string().cyan());
    println!("  Medicines:         {}", counts.medicines.to_string().cyan());
    println!("  Total:             {}", counts.nodes().to_string().cyan());
    println!();

    println!("{}", "Relations".blue().bold());
    println!("  INDICATES:         {}", counts.indicates.to_string().cyan());
    println!("  TREATED_BY:        {}", counts.treated_by.to_string().cyan());
    println!("  Total:             {}", counts.relations().to_string().cyan());
    println!();

    println!("{}", "═".repeat(40).dimmed());

    Ok(())
}
