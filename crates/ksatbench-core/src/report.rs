//! The evaluation bundle consumed by the web front end, with JSON
//! persistence and markdown rendering.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::leaderboard::{
    build_leaderboard, build_leaderboards_by_subject, LeaderboardEntry, LeaderboardOptions,
};
use crate::model::{EvaluationResult, Exam, ResultSummary, Subject};
use crate::store::RecordStore;

/// Dataset-wide counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStats {
    /// Distinct exams with at least one evaluation.
    pub total_exams: u32,
    pub total_evaluations: u32,
    /// Questions across every loaded exam.
    pub total_questions: u32,
}

/// Everything the presentation layer reads, in one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationData {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub leaderboard_by_subject: BTreeMap<Subject, Vec<LeaderboardEntry>>,
    pub stats: DatasetStats,
    pub results: Vec<EvaluationResult>,
    pub exams: BTreeMap<String, Exam>,
    pub generated_at: DateTime<Utc>,
}

impl EvaluationData {
    /// Aggregate a store into the bundle.
    ///
    /// Leaderboards honour `options`; `results` and `exams` always carry the
    /// whole store.
    pub fn build(store: &RecordStore, options: &LeaderboardOptions) -> Self {
        let results = store.results();
        let evaluated: BTreeSet<&str> = results.iter().map(|r| r.exam_id.as_str()).collect();

        Self {
            leaderboard: build_leaderboard(results, options),
            leaderboard_by_subject: build_leaderboards_by_subject(results, options),
            stats: DatasetStats {
                total_exams: evaluated.len() as u32,
                total_evaluations: results.len() as u32,
                total_questions: store
                    .exams()
                    .values()
                    .map(|e| e.questions.len() as u32)
                    .sum(),
            },
            results: results.to_vec(),
            exams: store.exams().clone(),
            generated_at: Utc::now(),
        }
    }

    /// Save the bundle as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize evaluation data")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write evaluation data to {}", path.display()))?;
        Ok(())
    }

    /// Load a bundle from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read evaluation data from {}", path.display()))?;
        let data: EvaluationData =
            serde_json::from_str(&content).context("failed to parse evaluation data JSON")?;
        Ok(data)
    }
}

/// One exam's evaluations, best first.
#[derive(Debug, Clone, Serialize)]
pub struct ExamSummary {
    pub exam_id: String,
    pub title: String,
    pub subject: Subject,
    /// Points available on the full exam.
    pub max_score: u64,
    pub rows: Vec<ExamSummaryRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExamSummaryRow {
    pub model_name: String,
    pub summary: ResultSummary,
    /// Seconds spent across all questions.
    pub total_time: f64,
}

/// Per-exam listings for every exam that has at least one evaluation.
///
/// Rows follow the leaderboard order: accuracy, then score rate, then name.
pub fn exam_summaries(store: &RecordStore) -> Vec<ExamSummary> {
    store
        .exams()
        .values()
        .filter_map(|exam| {
            let mut rows: Vec<ExamSummaryRow> = store
                .results()
                .iter()
                .filter(|r| r.exam_id == exam.exam_id)
                .map(|r| ExamSummaryRow {
                    model_name: r.model_name.clone(),
                    summary: r.summary,
                    total_time: r.total_time(),
                })
                .collect();
            if rows.is_empty() {
                return None;
            }
            rows.sort_by(|a, b| {
                b.summary
                    .accuracy
                    .total_cmp(&a.summary.accuracy)
                    .then_with(|| b.summary.score_rate.total_cmp(&a.summary.score_rate))
                    .then_with(|| a.model_name.cmp(&b.model_name))
            });
            Some(ExamSummary {
                exam_id: exam.exam_id.clone(),
                title: exam.title.clone(),
                subject: exam.subject,
                max_score: exam.max_score(),
                rows,
            })
        })
        .collect()
}

/// Format a leaderboard as a markdown table.
pub fn leaderboard_markdown(title: &str, entries: &[LeaderboardEntry]) -> String {
    let mut md = String::new();

    md.push_str(&format!("### {title}\n\n"));
    if entries.is_empty() {
        md.push_str("_No evaluations._\n");
        return md;
    }

    md.push_str("| Rank | Model | Accuracy | Score Rate | Score | Avg Time | Exams |\n");
    md.push_str("|------|-------|----------|------------|-------|----------|-------|\n");
    for (i, e) in entries.iter().enumerate() {
        md.push_str(&format!(
            "| {} | {} | {:.2}% | {:.2}% | {}/{} | {:.1}s | {} |\n",
            i + 1,
            e.model_name,
            e.accuracy,
            e.score_rate,
            e.total_score,
            e.max_score,
            e.avg_time,
            e.exams_count
        ));
    }

    md
}
