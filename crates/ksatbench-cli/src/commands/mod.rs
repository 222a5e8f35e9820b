//! Subcommand implementations.

pub mod export;
pub mod init;
pub mod leaderboard;
pub mod model;
pub mod summary;
pub mod validate;

use anyhow::Result;

use ksatbench_core::config::{load_config_from, KsatConfig};
use ksatbench_core::store::{load_store, LoadReport};

use crate::GlobalArgs;

/// Resolve the config file and apply command-line overrides.
pub fn resolve_config(global: &GlobalArgs) -> Result<KsatConfig> {
    let mut config = load_config_from(global.config.as_deref())?;
    if let Some(dir) = &global.results_dir {
        config.results_dir = dir.clone();
    }
    if let Some(dir) = &global.exams_dir {
        config.exams_dir = dir.clone();
    }
    tracing::debug!(?config, "resolved config");
    Ok(config)
}

/// Load config and store in one go.
pub fn load(global: &GlobalArgs) -> Result<(KsatConfig, LoadReport)> {
    let config = resolve_config(global)?;
    let report = load_store(&config)?;
    if !report.rejected.is_empty() {
        eprintln!(
            "{} record(s) rejected; run `ksatbench validate` for details.",
            report.rejected.len()
        );
    }
    Ok((config, report))
}
