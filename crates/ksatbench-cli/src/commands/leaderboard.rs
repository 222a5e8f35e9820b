//! The `ksatbench leaderboard` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use ksatbench_core::leaderboard::{build_leaderboard, build_subject_leaderboard, LeaderboardEntry};
use ksatbench_core::model::Subject;
use ksatbench_core::report::leaderboard_markdown;

use super::load;
use crate::GlobalArgs;

pub fn execute(global: &GlobalArgs, subject: Option<Subject>, format: String) -> Result<()> {
    let (config, report) = load(global)?;
    let store = report.store;
    let options = config.leaderboard_options(store.registry());

    let (title, entries) = match subject {
        Some(subject) => (
            format!("{} Leaderboard", subject.label()),
            build_subject_leaderboard(store.results(), subject, &options),
        ),
        None => (
            "Overall Leaderboard".to_string(),
            build_leaderboard(store.results(), &options),
        ),
    };

    match format.as_str() {
        "markdown" | "md" => {
            print!("{}", leaderboard_markdown(&title, &entries));
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        "text" => {
            if entries.is_empty() {
                println!("No evaluations found.");
            } else {
                println!("{title}");
                print_table(&entries);
            }
        }
        other => anyhow::bail!("unknown format: {other} (expected text, markdown, or json)"),
    }

    Ok(())
}

fn print_table(entries: &[LeaderboardEntry]) {
    let mut table = Table::new();
    table.set_header(vec![
        "#",
        "Model",
        "Accuracy",
        "Score Rate",
        "Score",
        "Avg Time",
        "Exams",
        "Skipped",
        "Parse Failed",
    ]);

    for (i, e) in entries.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&e.model_name),
            Cell::new(format!("{:.2}%", e.accuracy)),
            Cell::new(format!("{:.2}%", e.score_rate)),
            Cell::new(format!("{}/{}", e.total_score, e.max_score)),
            Cell::new(format!("{:.1}s", e.avg_time)),
            Cell::new(e.exams_count),
            Cell::new(e.skipped_count),
            Cell::new(e.parsing_failed_count),
        ]);
    }

    println!("{table}");
}
