//! Integrity checks for exams and evaluation records.
//!
//! Hard failures come back as [`IntegrityError`] and exclude the record.
//! Suspicious-but-usable data is reported as an [`AuditFinding`] and the
//! record is kept; the result's own answer key snapshot stays authoritative.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classification::{is_correct, AnswerKind};
use crate::error::IntegrityError;
use crate::model::{Exam, Question, QuestionResult, ResultSummary};

/// A non-fatal observation about a loaded record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditFinding {
    pub exam_id: String,
    /// `None` for findings about the exam itself.
    pub model_name: Option<String>,
    pub kind: AuditKind,
}

/// What an audit finding is about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditKind {
    /// The exam's answer key differs from the snapshot in the result.
    AnswerKeyMismatch {
        question_id: String,
        exam_answer: i32,
        recorded_answer: i32,
    },
    /// The exam's point value differs from the snapshot in the result.
    PointsMismatch {
        question_id: String,
        exam_points: u32,
        recorded_points: u32,
    },
    /// Fewer results than exam questions.
    PartialEvaluation { evaluated: u32, exam_questions: u32 },
    /// A parse failure without an explanatory error.
    MissingFailureReason { question_id: String },
    /// The summary stored in the file disagrees with the recomputed one.
    StaleSummary {
        stored: ResultSummary,
        recomputed: ResultSummary,
    },
}

impl fmt::Display for AuditFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.model_name {
            Some(model) => write!(f, "[{} / {}] ", self.exam_id, model)?,
            None => write!(f, "[{}] ", self.exam_id)?,
        }
        match &self.kind {
            AuditKind::AnswerKeyMismatch {
                question_id,
                exam_answer,
                recorded_answer,
            } => write!(
                f,
                "{question_id}: exam answer key is {exam_answer}, result recorded {recorded_answer}"
            ),
            AuditKind::PointsMismatch {
                question_id,
                exam_points,
                recorded_points,
            } => write!(
                f,
                "{question_id}: exam awards {exam_points} points, result recorded {recorded_points}"
            ),
            AuditKind::PartialEvaluation {
                evaluated,
                exam_questions,
            } => write!(
                f,
                "partial evaluation: {evaluated} of {exam_questions} questions"
            ),
            AuditKind::MissingFailureReason { question_id } => {
                write!(f, "{question_id}: parse failure without an error message")
            }
            AuditKind::StaleSummary { stored, recomputed } => write!(
                f,
                "stored summary ({}/{} correct, {}/{} points) disagrees with recomputed \
                 ({}/{} correct, {}/{} points)",
                stored.correct_answers,
                stored.total_questions,
                stored.total_score,
                stored.max_score,
                recomputed.correct_answers,
                recomputed.total_questions,
                recomputed.total_score,
                recomputed.max_score
            ),
        }
    }
}

/// Check an exam definition on its own.
pub fn validate_exam(exam: &Exam) -> Result<(), IntegrityError> {
    let mut seen = HashSet::new();
    let mut numbers = HashSet::new();
    let mut max_score = 0u32;
    for q in &exam.questions {
        if !seen.insert(q.question_id.as_str()) {
            return Err(IntegrityError::DuplicateQuestion {
                exam_id: exam.exam_id.clone(),
                question_id: q.question_id.clone(),
            });
        }
        if q.points == 0 {
            return Err(IntegrityError::NonPositivePoints {
                exam_id: exam.exam_id.clone(),
                question_id: q.question_id.clone(),
            });
        }
        if q.question_number == 0 {
            return Err(IntegrityError::ZeroQuestionNumber {
                exam_id: exam.exam_id.clone(),
                question_id: q.question_id.clone(),
            });
        }
        if !numbers.insert(q.question_number) {
            return Err(IntegrityError::DuplicateQuestionNumber {
                exam_id: exam.exam_id.clone(),
                question_number: q.question_number,
            });
        }
        max_score = max_score
            .checked_add(q.points)
            .ok_or_else(|| IntegrityError::PointsOverflow(q.question_id.clone()))?;
    }
    Ok(())
}

/// Check one model's results against the questions they answer.
///
/// Returns the audit kinds for anything suspicious but usable.
pub fn check_question_results(
    questions: &[Question],
    results: &[QuestionResult],
) -> Result<Vec<AuditKind>, IntegrityError> {
    let by_id: HashMap<&str, &Question> = questions
        .iter()
        .map(|q| (q.question_id.as_str(), q))
        .collect();

    let mut answered = HashSet::new();
    let mut audit = Vec::new();
    // Summaries hold totals as u32; earned never exceeds points, so bounding
    // the points total bounds both.
    let mut max_score = 0u32;

    for r in results {
        let question = by_id
            .get(r.question_id.as_str())
            .ok_or_else(|| IntegrityError::UnknownQuestion(r.question_id.clone()))?;

        if !answered.insert(r.question_id.as_str()) {
            return Err(IntegrityError::DuplicateAnswer(r.question_id.clone()));
        }

        let kind = r.kind().ok_or_else(|| IntegrityError::InvalidAnswerCode {
            question_id: r.question_id.clone(),
            answer: r.answer,
        })?;

        if r.is_correct != is_correct(r.answer, r.correct_answer) {
            return Err(IntegrityError::InconsistentCorrectness {
                question_id: r.question_id.clone(),
                answer: r.answer,
                correct_answer: r.correct_answer,
                is_correct: r.is_correct,
            });
        }

        if r.earned_points > r.points {
            return Err(IntegrityError::EarnedExceedsPoints {
                question_id: r.question_id.clone(),
                earned: r.earned_points,
                points: r.points,
            });
        }

        max_score = max_score
            .checked_add(r.points)
            .ok_or_else(|| IntegrityError::PointsOverflow(r.question_id.clone()))?;

        if !r.time_taken.is_finite() || r.time_taken < 0.0 {
            return Err(IntegrityError::InvalidTime {
                question_id: r.question_id.clone(),
                time_taken: r.time_taken,
            });
        }

        if question.correct_answer != r.correct_answer {
            audit.push(AuditKind::AnswerKeyMismatch {
                question_id: r.question_id.clone(),
                exam_answer: question.correct_answer,
                recorded_answer: r.correct_answer,
            });
        }

        if question.points != r.points {
            audit.push(AuditKind::PointsMismatch {
                question_id: r.question_id.clone(),
                exam_points: question.points,
                recorded_points: r.points,
            });
        }

        let has_reason = r.error.as_deref().is_some_and(|e| !e.trim().is_empty());
        if kind == AnswerKind::ParseFailed && !has_reason {
            audit.push(AuditKind::MissingFailureReason {
                question_id: r.question_id.clone(),
            });
        }
    }

    if results.len() < questions.len() {
        audit.push(AuditKind::PartialEvaluation {
            evaluated: results.len() as u32,
            exam_questions: questions.len() as u32,
        });
    }

    Ok(audit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Subject;

    fn question(id: &str, correct_answer: i32, points: u32) -> Question {
        Question {
            question_id: id.into(),
            question_number: id[1..].parse().unwrap(),
            question_text: String::new(),
            passage: None,
            choices: vec![],
            correct_answer,
            points,
        }
    }

    fn result(id: &str, answer: i32, correct_answer: i32, points: u32) -> QuestionResult {
        let hit = answer >= 1 && answer == correct_answer;
        QuestionResult {
            question_id: id.into(),
            question_number: None,
            answer,
            correct_answer,
            is_correct: hit,
            reasoning: String::new(),
            time_taken: 1.5,
            points,
            earned_points: if hit { points } else { 0 },
            success: true,
            error: None,
        }
    }

    #[test]
    fn exam_with_duplicate_question_ids() {
        let exam = Exam {
            exam_id: "e".into(),
            title: "E".into(),
            subject: Subject::Korean,
            year: 2025,
            questions: vec![question("q1", 1, 2), question("q1", 2, 2)],
        };
        assert!(matches!(
            validate_exam(&exam),
            Err(IntegrityError::DuplicateQuestion { .. })
        ));
    }

    #[test]
    fn exam_with_zero_points() {
        let exam = Exam {
            exam_id: "e".into(),
            title: "E".into(),
            subject: Subject::Korean,
            year: 2025,
            questions: vec![question("q1", 1, 0)],
        };
        assert!(matches!(
            validate_exam(&exam),
            Err(IntegrityError::NonPositivePoints { .. })
        ));
    }

    fn exam(questions: Vec<Question>) -> Exam {
        Exam {
            exam_id: "e".into(),
            title: "E".into(),
            subject: Subject::English,
            year: 2025,
            questions,
        }
    }

    #[test]
    fn exam_question_numbers_are_one_based_and_unique() {
        let mut zero = question("q1", 1, 2);
        zero.question_number = 0;
        assert!(matches!(
            validate_exam(&exam(vec![zero])),
            Err(IntegrityError::ZeroQuestionNumber { .. })
        ));

        let mut clash = question("q2", 1, 2);
        clash.question_number = 1;
        assert_eq!(
            validate_exam(&exam(vec![question("q1", 1, 2), clash])),
            Err(IntegrityError::DuplicateQuestionNumber {
                exam_id: "e".into(),
                question_number: 1,
            })
        );

        assert!(validate_exam(&exam(vec![question("q1", 1, 2), question("q18", 3, 2)])).is_ok());
    }

    #[test]
    fn exam_points_total_must_fit() {
        let questions = vec![question("q1", 1, 3_000_000_000), question("q2", 1, 3_000_000_000)];
        assert_eq!(
            validate_exam(&exam(questions)),
            Err(IntegrityError::PointsOverflow("q2".into()))
        );
    }

    #[test]
    fn result_points_total_must_fit() {
        // Snapshot points drifted far above the exam's.
        let questions = vec![question("q1", 1, 2), question("q2", 1, 2)];
        let results = vec![
            result("q1", 1, 1, 3_000_000_000),
            result("q2", 1, 1, 3_000_000_000),
        ];
        assert_eq!(
            check_question_results(&questions, &results),
            Err(IntegrityError::PointsOverflow("q2".into()))
        );
    }

    #[test]
    fn earned_more_than_points() {
        let questions = vec![question("q1", 1, 2)];
        let mut r = result("q1", 1, 1, 2);
        r.earned_points = 3;
        assert!(matches!(
            check_question_results(&questions, &[r]),
            Err(IntegrityError::EarnedExceedsPoints { earned: 3, points: 2, .. })
        ));
    }

    #[test]
    fn correct_flag_on_a_skip() {
        let questions = vec![question("q1", 0, 2)];
        let mut r = result("q1", 0, 0, 2);
        r.is_correct = true;
        assert!(matches!(
            check_question_results(&questions, &[r]),
            Err(IntegrityError::InconsistentCorrectness { .. })
        ));
    }

    #[test]
    fn invalid_answer_code_and_time() {
        let questions = vec![question("q1", 1, 2)];
        assert!(matches!(
            check_question_results(&questions, &[result("q1", -3, 1, 2)]),
            Err(IntegrityError::InvalidAnswerCode { answer: -3, .. })
        ));

        let mut r = result("q1", 1, 1, 2);
        r.time_taken = -0.1;
        assert!(matches!(
            check_question_results(&questions, &[r]),
            Err(IntegrityError::InvalidTime { .. })
        ));
    }

    #[test]
    fn duplicate_answer() {
        let questions = vec![question("q1", 1, 2)];
        let results = vec![result("q1", 1, 1, 2), result("q1", 2, 1, 2)];
        assert_eq!(
            check_question_results(&questions, &results),
            Err(IntegrityError::DuplicateAnswer("q1".into()))
        );
    }

    #[test]
    fn answer_key_drift_is_flagged_not_resolved() {
        // The exam was re-keyed after evaluation; the snapshot still scores.
        let questions = vec![question("q1", 4, 2), question("q2", 1, 2)];
        let mut failed = result("q2", -1, 1, 2);
        failed.error = None;
        let results = vec![result("q1", 3, 3, 2), failed];

        let audit = check_question_results(&questions, &results).unwrap();
        assert_eq!(audit.len(), 2);
        assert!(matches!(
            &audit[0],
            AuditKind::AnswerKeyMismatch { exam_answer: 4, recorded_answer: 3, .. }
        ));
        assert!(matches!(&audit[1], AuditKind::MissingFailureReason { .. }));
    }

    #[test]
    fn partial_evaluation_is_flagged() {
        let questions = vec![question("q1", 1, 2), question("q2", 1, 2)];
        let audit = check_question_results(&questions, &[result("q1", 1, 1, 2)]).unwrap();
        assert_eq!(
            audit,
            vec![AuditKind::PartialEvaluation {
                evaluated: 1,
                exam_questions: 2
            }]
        );
    }

    #[test]
    fn finding_display() {
        let finding = AuditFinding {
            exam_id: "2025-korean".into(),
            model_name: Some("gpt-5".into()),
            kind: AuditKind::PartialEvaluation {
                evaluated: 40,
                exam_questions: 45,
            },
        };
        assert_eq!(
            finding.to_string(),
            "[2025-korean / gpt-5] partial evaluation: 40 of 45 questions"
        );
    }
}
