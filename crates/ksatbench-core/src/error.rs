//! Error taxonomy for the aggregation engine.
//!
//! Data-integrity failures and lookup misses are distinct types so callers can
//! tell "this record is broken" apart from "there is nothing here" without
//! string matching. Empty inputs are not errors at all; they produce
//! zero-valued summaries.

use thiserror::Error;

use crate::model::Subject;

/// A record that cannot be aggregated without producing misleading numbers.
///
/// Raising one of these excludes the offending exam or (exam, model) pair from
/// every derived view; it never aborts aggregation for other pairs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrityError {
    /// The document could not be parsed, or a required field is missing or
    /// has the wrong type.
    #[error("malformed record: {0}")]
    Malformed(String),

    /// Two exam definitions share the same id.
    #[error("duplicate exam id: {0}")]
    DuplicateExam(String),

    /// Two questions within one exam share the same id.
    #[error("exam {exam_id}: duplicate question id {question_id}")]
    DuplicateQuestion {
        exam_id: String,
        question_id: String,
    },

    /// A question is worth zero points.
    #[error("exam {exam_id}: question {question_id} has non-positive points")]
    NonPositivePoints {
        exam_id: String,
        question_id: String,
    },

    /// A question number is zero; numbers are 1-based.
    #[error("exam {exam_id}: question {question_id} has question_number 0")]
    ZeroQuestionNumber {
        exam_id: String,
        question_id: String,
    },

    /// Two questions within one exam share the same display number.
    #[error("exam {exam_id}: question_number {question_number} used more than once")]
    DuplicateQuestionNumber { exam_id: String, question_number: u32 },

    /// Summed point values do not fit the score type.
    #[error("point total overflows at question {0}")]
    PointsOverflow(String),

    /// An evaluation references an exam that was never loaded.
    #[error("evaluation references unknown exam: {0}")]
    UnknownExam(String),

    /// The evaluation's subject disagrees with its exam's subject.
    #[error("exam {exam_id} is {expected}, but the evaluation claims {found}")]
    SubjectMismatch {
        exam_id: String,
        expected: Subject,
        found: Subject,
    },

    /// The same (exam, model) pair was loaded more than once.
    #[error("duplicate evaluation of exam {exam_id} by {model_name}")]
    DuplicateEvaluation { exam_id: String, model_name: String },

    /// A question result references a question id absent from the exam.
    #[error("result references unknown question: {0}")]
    UnknownQuestion(String),

    /// A question was answered more than once in one evaluation.
    #[error("question {0} answered more than once")]
    DuplicateAnswer(String),

    /// The answer code is below the parse-failure code.
    #[error("question {question_id}: invalid answer code {answer}")]
    InvalidAnswerCode { question_id: String, answer: i32 },

    /// The stored correctness flag contradicts the answer and answer key.
    #[error(
        "question {question_id}: is_correct={is_correct} contradicts answer {answer} \
         (correct answer {correct_answer})"
    )]
    InconsistentCorrectness {
        question_id: String,
        answer: i32,
        correct_answer: i32,
        is_correct: bool,
    },

    /// More points were awarded than the question is worth.
    #[error("question {question_id}: earned {earned} of {points} points")]
    EarnedExceedsPoints {
        question_id: String,
        earned: u32,
        points: u32,
    },

    /// Time taken is negative or not a finite number.
    #[error("question {question_id}: invalid time_taken {time_taken}")]
    InvalidTime { question_id: String, time_taken: f64 },
}

/// A lookup for something the store does not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("exam not found: {0}")]
    ExamNotFound(String),

    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// Both exist, but the model was never evaluated on the exam.
    #[error("no evaluation of exam {exam_id} by {model_name}")]
    EvaluationNotFound { exam_id: String, model_name: String },
}
