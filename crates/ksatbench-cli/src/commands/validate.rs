//! The `ksatbench validate` command.

use anyhow::Result;

use ksatbench_core::store::load_store;

use super::resolve_config;
use crate::GlobalArgs;

pub fn execute(global: &GlobalArgs) -> Result<()> {
    let config = resolve_config(global)?;
    let report = load_store(&config)?;
    let store = &report.store;

    println!(
        "Loaded {} exam(s), {} evaluation(s) from {} and {}",
        store.exams().len(),
        store.results().len(),
        config.exams_dir.display(),
        config.results_dir.display()
    );

    for rejected in &report.rejected {
        println!("  REJECTED {rejected}");
    }
    for finding in &report.audit {
        println!("  WARNING {finding}");
    }

    if !report.is_clean() {
        anyhow::bail!("{} record(s) failed integrity checks", report.rejected.len());
    }

    if report.audit.is_empty() {
        println!("All records valid.");
    } else {
        println!("\n{} audit finding(s).", report.audit.len());
    }

    Ok(())
}
