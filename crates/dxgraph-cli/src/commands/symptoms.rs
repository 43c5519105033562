//! List the symptoms a graph knows about.

use anyhow::{Context, Result};
use colored::Colorize;

use super::open_engine;
use crate::config::{Config, StoreOverrides};

pub fn run(config: &Config, overrides: &StoreOverrides) -> Result<()> {
    let engine = open_engine(config, overrides)?;
    let names = engine.symptom_names().context("Failed to list symptoms")?;

    if names.is_empty() {
        println!("{} The graph has no symptoms.", "•".yellow());
        return Ok(());
    }

    println!("{} Known symptoms:", "→".blue());
    println!();
    for name in &names {
        println!("  {}", name);
    }
    println!();
    println!("{} {} symptoms", "✓".green(), names.len().to_string().cyan());

    Ok(())
}
