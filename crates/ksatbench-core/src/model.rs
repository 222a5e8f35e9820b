//! Core data model types for ksatbench.
//!
//! Exams and question results are produced by an external evaluation run and
//! are immutable inputs here. Summaries are derived on load and never trusted
//! from the input files.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::classification::AnswerKind;

/// KSAT subject areas covered by the benchmark.
///
/// Declaration order is the presentation order (korean, math, english).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Korean,
    Math,
    English,
}

impl Subject {
    /// All subjects, in presentation order.
    pub const ALL: [Subject; 3] = [Subject::Korean, Subject::Math, Subject::English];

    /// The lowercase key used in files and output maps.
    pub fn key(self) -> &'static str {
        match self {
            Subject::Korean => "korean",
            Subject::Math => "math",
            Subject::English => "english",
        }
    }

    /// Korean display label.
    pub fn label(self) -> &'static str {
        match self {
            Subject::Korean => "국어",
            Subject::Math => "수학",
            Subject::English => "영어",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "korean" | "국어" => Ok(Subject::Korean),
            "math" | "수학" => Ok(Subject::Math),
            "english" | "영어" => Ok(Subject::English),
            other => Err(format!("unknown subject: {other}")),
        }
    }
}

/// A single exam question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique within the exam.
    pub question_id: String,
    /// 1-based display order.
    pub question_number: u32,
    pub question_text: String,
    /// Shared reading passage, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passage: Option<String>,
    /// Ordered choices; empty for free-response questions.
    #[serde(default)]
    pub choices: Vec<String>,
    /// 1-based choice index, or the numeric answer for free-response.
    pub correct_answer: i32,
    /// Positive weight.
    pub points: u32,
}

impl Question {
    /// Returns true if the question has no choices to pick from.
    pub fn is_free_response(&self) -> bool {
        self.choices.is_empty()
    }
}

/// A parsed exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub exam_id: String,
    pub title: String,
    pub subject: Subject,
    pub year: u32,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Exam {
    /// Sum of points over every question.
    pub fn max_score(&self) -> u64 {
        self.questions.iter().map(|q| u64::from(q.points)).sum()
    }

    /// Look up a question by id.
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.question_id == question_id)
    }
}

/// One model's answer to one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question_id: String,
    /// Filled from the exam on load when the record omits it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_number: Option<u32>,
    /// 1..N = selected choice, 0 = skipped, -1 = parse/response failure.
    pub answer: i32,
    /// Answer key snapshot taken at evaluation time. Authoritative for scoring.
    pub correct_answer: i32,
    pub is_correct: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub reasoning: String,
    /// Seconds.
    pub time_taken: f64,
    pub points: u32,
    pub earned_points: u32,
    /// Whether the upstream call itself succeeded.
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl QuestionResult {
    /// Classify the answer code. `None` for codes below the parse-failure code.
    pub fn kind(&self) -> Option<AnswerKind> {
        AnswerKind::classify(self.answer)
    }
}

fn default_true() -> bool {
    true
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Derived per-(exam, model) summary.
///
/// Percentages keep full precision; rounding is left to presentation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultSummary {
    pub total_questions: u32,
    pub correct_answers: u32,
    pub accuracy: f64,
    pub total_score: u32,
    pub max_score: u32,
    pub score_rate: f64,
}

/// A validated evaluation of one exam by one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub exam_id: String,
    pub exam_title: String,
    pub subject: Subject,
    pub model_name: String,
    #[serde(with = "timestamp")]
    pub evaluated_at: DateTime<Utc>,
    pub summary: ResultSummary,
    pub results: Vec<QuestionResult>,
}

impl EvaluationResult {
    /// Total seconds spent across all question results.
    pub fn total_time(&self) -> f64 {
        self.results.iter().map(|r| r.time_taken).sum()
    }
}

/// Timestamps written by the evaluator are either RFC 3339 or naive local
/// ISO-8601 (`2025-11-14T09:12:03.123456`). Naive values are taken as UTC.
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}")))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
            .map(|naive| naive.and_utc())
    }
}
