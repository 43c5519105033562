//! Show the graph pattern a lookup runs.

use anyhow::Result;
use colored::Colorize;
use dxgraph::prelude::*;

pub fn run(input: &str, policy: Policy) -> Result<()> {
    let Some(symptoms) = symptom_set(input) else {
        println!("{} Please enter a symptom.", "•".yellow());
        return Ok(());
    };

    let query = PatternQuery::diseases(policy);
    let params = QueryParams::for_symptoms(&symptoms);

    println!(
        "{} Pattern for {} (policy={}):",
        "→".blue(),
        symptoms.to_string().cyan().bold(),
        policy
    );
    println!();
    for line in query.to_cypher().lines() {
        println!("  {}", line);
    }
    println!();
    println!("{}", "Parameters".blue().bold());
    println!("  {}", serde_json::to_string(&params.to_json())?);

    Ok(())
}
