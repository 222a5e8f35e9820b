//! The `ksatbench model` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use ksatbench_core::catalog::model_website;
use ksatbench_core::leaderboard::{build_leaderboard, LeaderboardOptions};
use ksatbench_core::subject_stats::build_subject_stats;

use super::load;
use crate::GlobalArgs;

pub fn execute(global: &GlobalArgs, name: &str) -> Result<()> {
    let (_, report) = load(global)?;
    let store = report.store;
    let results = match store.results_for_model(name) {
        Ok(results) => results,
        Err(e) => {
            let known: Vec<&str> = store.model_names().into_iter().collect();
            if known.is_empty() {
                return Err(e.into());
            }
            anyhow::bail!("{e} (known models: {})", known.join(", "));
        }
    };

    println!("Model: {name}");
    println!("Website: {}", model_website(name));

    // Unfiltered: a disabled model still gets its own page.
    let overall = build_leaderboard(results.iter().copied(), &LeaderboardOptions::default());
    let Some(entry) = overall.first() else {
        println!("No evaluations for {name}.");
        return Ok(());
    };

    println!(
        "Overall: {:.2}% accuracy, {:.2}% score rate ({}/{} points) over {} exam(s)",
        entry.accuracy, entry.score_rate, entry.total_score, entry.max_score, entry.exams_count
    );
    println!(
        "Questions: {} ({} correct, {} skipped, {} parse failures), avg {:.1}s",
        entry.total_questions,
        entry.correct_answers,
        entry.skipped_count,
        entry.parsing_failed_count,
        entry.avg_time
    );

    let mut subjects = Table::new();
    subjects.set_header(vec!["Subject", "Correct", "Accuracy", "Score", "Score Rate"]);
    for stats in build_subject_stats(results.iter().copied()) {
        subjects.add_row(vec![
            Cell::new(stats.subject.label()),
            Cell::new(format!("{}/{}", stats.correct_count, stats.questions_count)),
            Cell::new(format!("{:.2}%", stats.accuracy)),
            Cell::new(format!("{}/{}", stats.total_score, stats.max_score)),
            Cell::new(format!("{:.2}%", stats.score_rate)),
        ]);
    }
    println!("\n{subjects}");

    let mut exams = Table::new();
    exams.set_header(vec!["Exam", "Subject", "Accuracy", "Score", "Evaluated"]);
    for result in &results {
        exams.add_row(vec![
            Cell::new(&result.exam_title),
            Cell::new(result.subject.label()),
            Cell::new(format!("{:.2}%", result.summary.accuracy)),
            Cell::new(format!(
                "{}/{}",
                result.summary.total_score, result.summary.max_score
            )),
            Cell::new(result.evaluated_at.format("%Y-%m-%d %H:%M")),
        ]);
    }
    println!("{exams}");

    Ok(())
}
