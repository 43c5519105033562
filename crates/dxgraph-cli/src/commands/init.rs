//! Initialize a new dxgraph project.

use anyhow::{Context, Result};
use colored::Colorize;
use dxgraph::prelude::GraphSnapshot;
use std::path::{Path, PathBuf};

use crate::config::{Config, CONFIG_FILE};

pub fn run(path: Option<String>) -> Result<()> {
    let base_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    println!("{} Initializing dxgraph project...", "→".blue());
    scaffold(&base_path)?;

    println!();
    println!("{} dxgraph project initialized!", "✓".green().bold());
    println!();
    println!("Next steps:");
    println!("  {} dxgraph symptoms", "1.".blue());
    println!("  {} dxgraph find \"fever, cough\"", "2.".blue());
    println!("  {} dxgraph stats", "3.".blue());

    Ok(())
}

/// Write a default config and the sample graph, keeping existing files.
fn scaffold(base_path: &Path) -> Result<()> {
    std::fs::create_dir_all(base_path)
        .with_context(|| format!("Failed to create {}", base_path.display()))?;

    let config = Config::default();
    let config_path = base_path.join(CONFIG_FILE);
    if !config_path.exists() {
        config.save(&config_path)?;
        println!("  {} Created {}", "✓".green(), config_path.display());
    } else {
        println!("  {} {} already exists", "•".yellow(), config_path.display());
    }

    let graph_path = base_path.join(&config.store.path);
    if !graph_path.exists() {
        let json = GraphSnapshot::sample().to_json_pretty()?;
        std::fs::write(&graph_path, json)
            .with_context(|| format!("Failed to write {}", graph_path.display()))?;
        println!("  {} Created {}", "✓".green(), graph_path.display());
    } else {
        println!("  {} {} already exists", "•".yellow(), graph_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreOverrides;
    use dxgraph::prelude::*;

    #[test]
    fn scaffold_writes_a_usable_project() {
        let dir = tempfile::tempdir().unwrap();
        scaffold(dir.path()).unwrap();

        let config = Config::load_from(&dir.path().join(CONFIG_FILE)).unwrap();
        let settings = config.store_settings(&StoreOverrides::default());
        let store = crate::commands::open_store(&settings).unwrap();
        let engine = MatchingEngine::new(store);

        let outcome = engine.find_diseases("fever").unwrap();
        let diseases: Vec<_> = outcome.matches().iter().map(|m| m.disease.as_str()).collect();
        assert_eq!(diseases, vec!["Flu", "Malaria"]);
    }

    #[test]
    fn scaffold_keeps_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let graph = dir.path().join("graph.json");
        std::fs::write(&graph, "{\"nodes\": []}").unwrap();

        scaffold(dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(&graph).unwrap(), "{\"nodes\": []}");
        assert!(dir.path().join(CONFIG_FILE).exists());
    }
}
