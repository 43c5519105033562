//! Find diseases for a set of symptoms.

use anyhow::{Context, Result};
use colored::Colorize;
use dxgraph::prelude::*;

use super::open_engine;
use crate::config::{Config, StoreOverrides};

pub fn run(
    config: &Config,
    overrides: &StoreOverrides,
    input: &str,
    policy: Policy,
    json: bool,
) -> Result<()> {
    let outcome = lookup(input, policy, || open_engine(config, overrides))?;

    if json {
        println!("{}", to_json(&outcome)?);
    } else {
        print!("{}", render(input, &outcome));
    }
    Ok(())
}

/// Join positional arguments into one comma-separated input, so
/// `find fever cough` and `find "fever, cough"` mean the same thing.
pub fn symptom_input(args: &[String]) -> String {
    args.join(",")
}

/// Run a lookup, opening the store only when the input names a symptom.
fn lookup<S, F>(input: &str, policy: Policy, open: F) -> Result<LookupOutcome>
where
    S: GraphStore,
    F: FnOnce() -> Result<MatchingEngine<S>>,
{
    if normalize(input).is_empty() {
        return Ok(LookupOutcome::NoInput);
    }
    let outcome = open()?
        .with_policy(policy)
        .find_diseases(input)
        .context("Lookup failed")?;
    Ok(outcome)
}

fn to_json(outcome: &LookupOutcome) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

/// Human-readable rendering of a lookup outcome.
fn render(input: &str, outcome: &LookupOutcome) -> String {
    match outcome {
        LookupOutcome::NoInput => format!("{} Please enter a symptom.\n", "•".yellow()),
        LookupOutcome::NoMatch => {
            format!("{} No disease found for the given symptoms.\n", "•".yellow())
        }
        LookupOutcome::Matches(matches) => {
            let mut out = format!(
                "{} Diseases related to '{}':\n",
                "→".blue(),
                input.trim().cyan().bold()
            );
            for m in matches {
                out.push('\n');
                out.push_str(&format!("  Disease: {}\n", m.disease.white().bold()));
                if m.has_medicines() {
                    out.push_str(&format!("  Medicines: {}\n", m.medicines.join(", ")));
                } else {
                    out.push_str(&format!("  {}\n", "No medicines available".dimmed()));
                }
            }
            out
        }
    }
}
