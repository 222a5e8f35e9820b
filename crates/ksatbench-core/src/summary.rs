//! Per-(exam, model) summaries.

use crate::error::IntegrityError;
use crate::model::{Question, QuestionResult, ResultSummary};
use crate::validate::check_question_results;

/// `100 * numerator / denominator`, or `0` when the denominator is zero.
pub fn percentage(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 * 100.0 / denominator as f64
    }
}

impl ResultSummary {
    /// Summarise already-validated results. Validation bounds the points
    /// total, so the sums here cannot overflow.
    ///
    /// Totals cover the result entries only, not the full exam, so a partial
    /// evaluation reports what was actually evaluated.
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a QuestionResult>) -> Self {
        let mut total_questions = 0u32;
        let mut correct_answers = 0u32;
        let mut total_score = 0u32;
        let mut max_score = 0u32;

        for r in results {
            total_questions += 1;
            if r.is_correct {
                correct_answers += 1;
            }
            total_score += r.earned_points;
            max_score += r.points;
        }

        Self::from_totals(total_questions, correct_answers, total_score, max_score)
    }

    /// Build a summary from raw counts, deriving both percentages.
    pub fn from_totals(
        total_questions: u32,
        correct_answers: u32,
        total_score: u32,
        max_score: u32,
    ) -> Self {
        Self {
            total_questions,
            correct_answers,
            accuracy: percentage(correct_answers.into(), total_questions.into()),
            total_score,
            max_score,
            score_rate: percentage(total_score.into(), max_score.into()),
        }
    }
}

/// Validate a model's results against an exam's questions and summarise them.
pub fn build_summary(
    questions: &[Question],
    results: &[QuestionResult],
) -> Result<ResultSummary, IntegrityError> {
    check_question_results(questions, results)?;
    Ok(ResultSummary::from_results(results))
}
