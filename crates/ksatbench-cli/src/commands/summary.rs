//! The `ksatbench summary` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use ksatbench_core::report::{exam_summaries, ExamSummary};

use super::load;
use crate::GlobalArgs;

pub fn execute(global: &GlobalArgs, exam: Option<String>) -> Result<()> {
    let (_, report) = load(global)?;
    let store = report.store;

    if let Some(exam_id) = &exam {
        store.exam(exam_id)?;
    }

    let summaries: Vec<ExamSummary> = exam_summaries(&store)
        .into_iter()
        .filter(|s| exam.as_deref().map_or(true, |id| s.exam_id == id))
        .collect();

    if summaries.is_empty() {
        println!("No evaluations found.");
        return Ok(());
    }

    for summary in &summaries {
        print_exam(summary);
    }

    Ok(())
}

fn print_exam(summary: &ExamSummary) {
    println!(
        "\n{} [{}] ({} model(s), {} points)",
        summary.title,
        summary.subject.label(),
        summary.rows.len(),
        summary.max_score
    );

    let mut table = Table::new();
    table.set_header(vec![
        "Model",
        "Correct",
        "Accuracy",
        "Score",
        "Score Rate",
        "Time",
    ]);

    for row in &summary.rows {
        let s = &row.summary;
        table.add_row(vec![
            Cell::new(&row.model_name),
            Cell::new(format!("{}/{}", s.correct_answers, s.total_questions)),
            Cell::new(format!("{:.1}%", s.accuracy)),
            Cell::new(format!("{}/{}", s.total_score, s.max_score)),
            Cell::new(format!("{:.1}%", s.score_rate)),
            Cell::new(format!("{:.1}s", row.total_time)),
        ]);
    }

    println!("{table}");
}
