//! Per-model, per-subject breakdowns for model detail views.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{EvaluationResult, Subject};
use crate::summary::percentage;

/// One model's totals within one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectStats {
    pub subject: Subject,
    pub accuracy: f64,
    pub score_rate: f64,
    pub total_score: u64,
    pub max_score: u64,
    pub questions_count: u64,
    pub correct_count: u64,
}

#[derive(Default)]
struct SubjectAccumulator {
    questions_count: u64,
    correct_count: u64,
    total_score: u64,
    max_score: u64,
}

/// Group one model's evaluations by subject and total each group.
///
/// Subjects the model has no results for are omitted. Callers pass a single
/// model's evaluations; nothing here checks `model_name`.
pub fn build_subject_stats<'a>(
    results: impl IntoIterator<Item = &'a EvaluationResult>,
) -> Vec<SubjectStats> {
    let mut groups: BTreeMap<Subject, SubjectAccumulator> = BTreeMap::new();

    for result in results {
        let acc = groups.entry(result.subject).or_default();
        acc.questions_count += u64::from(result.summary.total_questions);
        acc.correct_count += u64::from(result.summary.correct_answers);
        acc.total_score += u64::from(result.summary.total_score);
        acc.max_score += u64::from(result.summary.max_score);
    }

    groups
        .into_iter()
        .map(|(subject, acc)| SubjectStats {
            subject,
            accuracy: percentage(acc.correct_count, acc.questions_count),
            score_rate: percentage(acc.total_score, acc.max_score),
            total_score: acc.total_score,
            max_score: acc.max_score,
            questions_count: acc.questions_count,
            correct_count: acc.correct_count,
        })
        .collect()
}
