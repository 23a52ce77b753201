//! symbolmap batch run.
//!
//! Run from the scripts directory with: cargo run -p symbolmap-cli
//! Paths come from ./symbolmap.toml when present, otherwise the defaults
//! (../data inputs, outputs in the working directory).

use anyhow::Context;
use symbolmap_config::{Config, CONFIG_FILE};
use symbolmap_resolver::AliasResolver;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("symbolmap=info,warn")),
        )
        .init();

    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = Config::load().with_context(|| format!("Could not load {CONFIG_FILE}"))?;
    info!(
        "Inputs: {:?}, {:?}",
        config.inputs.nomenclature, config.inputs.exome
    );

    let summary = match AliasResolver::new(config).run() {
        Ok(summary) => summary,
        Err(e) if e.is_input_error() => {
            return Err(anyhow::Error::new(e).context("Bad input table; fix it and rerun"));
        }
        Err(e) => return Err(anyhow::Error::new(e).context("Alias map generation failed")),
    };

    info!(
        "{} rows, {} exome symbols, {} groups ({} resolved, {} unresolved), {} alias conflicts",
        summary.records,
        summary.exome_symbols,
        summary.groups,
        summary.groups_resolved,
        summary.groups_unresolved,
        summary.conflicts
    );
    for path in &summary.outputs {
        info!("✅ {}", path.display());
    }
    Ok(())
}
