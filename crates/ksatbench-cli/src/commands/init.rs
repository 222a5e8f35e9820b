//! The `ksatbench init` command.

use std::path::Path;

use anyhow::Result;

use ksatbench_core::config::KsatConfig;

pub fn execute() -> Result<()> {
    let config = KsatConfig::default();

    if Path::new("ksatbench.toml").exists() {
        println!("ksatbench.toml already exists, skipping.");
    } else {
        let body = format!("# ksatbench configuration\n\n{}", config.to_toml()?);
        std::fs::write("ksatbench.toml", body)?;
        println!("Created ksatbench.toml");
    }

    for dir in [&config.exams_dir, &config.results_dir] {
        if dir.exists() {
            println!("{} already exists, skipping.", dir.display());
        } else {
            std::fs::create_dir_all(dir)?;
            println!("Created {}/", dir.display());
        }
    }

    println!("\nNext steps:");
    println!(
        "  1. Put exam files in {} and results in {}/<exam_id>/",
        config.exams_dir.display(),
        config.results_dir.display()
    );
    println!("  2. Run: ksatbench validate");
    println!("  3. Run: ksatbench export");

    Ok(())
}
