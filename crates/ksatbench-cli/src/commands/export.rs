//! The `ksatbench export` command.

use std::path::PathBuf;

use anyhow::Result;

use ksatbench_core::report::EvaluationData;

use super::load;
use crate::GlobalArgs;

pub fn execute(global: &GlobalArgs, output: Option<PathBuf>, strict: bool) -> Result<()> {
    let (config, report) = load(global)?;
    let store = if strict {
        report.into_strict()?
    } else {
        report.store
    };

    let options = config.leaderboard_options(store.registry());
    let data = EvaluationData::build(&store, &options);

    let path = output.unwrap_or(config.output);
    data.save_json(&path)?;

    println!("Exported to {}", path.display());
    println!("  leaderboard entries: {}", data.leaderboard.len());
    println!("  evaluations: {}", data.stats.total_evaluations);
    println!("  exams: {}", data.stats.total_exams);

    Ok(())
}
