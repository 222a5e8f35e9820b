//! Cross-exam leaderboards, overall and per subject.
//!
//! Results are folded into one accumulator per model in a single pass, then
//! finalised into entries and ranked. Iteration happens over a `BTreeMap` and
//! the ranking tie-break ends on the unique model name, so the output is
//! identical for identical input.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::classification::AnswerTally;
use crate::model::{EvaluationResult, QuestionResult, ResultSummary, Subject};
use crate::summary::percentage;

/// One ranked row per model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub model_name: String,
    pub accuracy: f64,
    pub score_rate: f64,
    pub total_score: u64,
    pub max_score: u64,
    pub total_questions: u64,
    pub correct_answers: u64,
    /// Mean seconds per question.
    pub avg_time: f64,
    /// Distinct exams contributing to this row.
    pub exams_count: u32,
    pub skipped_count: u32,
    pub parsing_failed_count: u32,
}

/// Knobs for leaderboard construction.
#[derive(Debug, Clone, Default)]
pub struct LeaderboardOptions {
    /// When set, only these model names contribute.
    pub model_filter: Option<BTreeSet<String>>,
    /// English subject board only: drop questions numbered at or below this
    /// (the listening section).
    pub listening_cutoff: Option<u32>,
}

impl LeaderboardOptions {
    fn admits(&self, model_name: &str) -> bool {
        self.model_filter
            .as_ref()
            .map_or(true, |models| models.contains(model_name))
    }
}

#[derive(Debug, Default)]
struct ModelAccumulator {
    total_questions: u64,
    correct_answers: u64,
    total_score: u64,
    max_score: u64,
    total_time: f64,
    exams: BTreeSet<String>,
    tally: AnswerTally,
}

impl ModelAccumulator {
    fn add(&mut self, exam_id: &str, summary: &ResultSummary, questions: &[&QuestionResult]) {
        self.total_questions += u64::from(summary.total_questions);
        self.correct_answers += u64::from(summary.correct_answers);
        self.total_score += u64::from(summary.total_score);
        self.max_score += u64::from(summary.max_score);
        for q in questions {
            self.total_time += q.time_taken;
            self.tally.add(q);
        }
        self.exams.insert(exam_id.to_string());
    }

    fn finish(self, model_name: String) -> LeaderboardEntry {
        let avg_time = if self.total_questions == 0 {
            0.0
        } else {
            self.total_time / self.total_questions as f64
        };
        LeaderboardEntry {
            model_name,
            accuracy: percentage(self.correct_answers, self.total_questions),
            score_rate: percentage(self.total_score, self.max_score),
            total_score: self.total_score,
            max_score: self.max_score,
            total_questions: self.total_questions,
            correct_answers: self.correct_answers,
            avg_time,
            exams_count: self.exams.len() as u32,
            skipped_count: self.tally.skipped,
            parsing_failed_count: self.tally.parsing_failed,
        }
    }
}

/// Ranking order: accuracy desc, then score rate desc, then model name asc.
pub fn compare_entries(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.accuracy
        .total_cmp(&a.accuracy)
        .then_with(|| b.score_rate.total_cmp(&a.score_rate))
        .then_with(|| a.model_name.cmp(&b.model_name))
}

/// Sort entries into ranking order.
pub fn rank(entries: &mut [LeaderboardEntry]) {
    entries.sort_by(compare_entries);
}

fn fold<'a>(
    results: impl IntoIterator<Item = &'a EvaluationResult>,
    options: &LeaderboardOptions,
    question_floor: Option<u32>,
) -> Vec<LeaderboardEntry> {
    let mut models: BTreeMap<&str, ModelAccumulator> = BTreeMap::new();

    for result in results {
        if !options.admits(&result.model_name) {
            continue;
        }

        let questions: Vec<&QuestionResult> = match question_floor {
            Some(floor) => result
                .results
                .iter()
                .filter(|q| q.question_number.is_some_and(|n| n > floor))
                .collect(),
            None => result.results.iter().collect(),
        };

        let summary = match question_floor {
            // The stored summary covers every question; rebuild from the
            // restricted set instead.
            Some(_) => {
                if questions.is_empty() {
                    continue;
                }
                ResultSummary::from_results(questions.iter().copied())
            }
            None => result.summary,
        };

        models
            .entry(result.model_name.as_str())
            .or_default()
            .add(&result.exam_id, &summary, &questions);
    }

    let mut entries: Vec<LeaderboardEntry> = models
        .into_iter()
        .map(|(model, acc)| acc.finish(model.to_string()))
        .collect();
    rank(&mut entries);
    entries
}

/// Rank every model across all given evaluations.
pub fn build_leaderboard<'a>(
    results: impl IntoIterator<Item = &'a EvaluationResult>,
    options: &LeaderboardOptions,
) -> Vec<LeaderboardEntry> {
    fold(results, options, None)
}

/// Rank models on one subject only. Models without results in the subject
/// are absent, not zero-filled.
pub fn build_subject_leaderboard<'a>(
    results: impl IntoIterator<Item = &'a EvaluationResult>,
    subject: Subject,
    options: &LeaderboardOptions,
) -> Vec<LeaderboardEntry> {
    let floor = match subject {
        Subject::English => options.listening_cutoff,
        _ => None,
    };
    fold(
        results.into_iter().filter(|r| r.subject == subject),
        options,
        floor,
    )
}

/// One ranked board per subject that has at least one entry.
pub fn build_leaderboards_by_subject(
    results: &[EvaluationResult],
    options: &LeaderboardOptions,
) -> BTreeMap<Subject, Vec<LeaderboardEntry>> {
    Subject::ALL
        .iter()
        .filter_map(|&subject| {
            let board = build_subject_leaderboard(results, subject, options);
            (!board.is_empty()).then_some((subject, board))
        })
        .collect()
}
