//! Headless scenario runner for the catan-economy rules.
//!
//! Usage: `catan-script <scenario.json>` or `CATAN_SCENARIO=<path> catan-script`.
//! `CATAN_SEED` overrides the seed in the scenario file.

use anyhow::Context;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod scenario;

use scenario::Scenario;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Scenario path from the first argument or env
    let path: PathBuf = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CATAN_SCENARIO").ok())
        .context("no scenario given (pass a path or set CATAN_SCENARIO)")?
        .into();

    let mut scenario = Scenario::load(&path)?;
    if let Ok(seed) = std::env::var("CATAN_SEED") {
        let seed = seed
            .parse()
            .with_context(|| format!("CATAN_SEED is not a number: {seed}"))?;
        scenario.config.seed = Some(seed);
    }

    info!(path = %path.display(), steps = scenario.steps.len(), "running scenario");
    let report = scenario.run()?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
