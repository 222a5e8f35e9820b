//! Answer-code interpretation shared by every aggregator.
//!
//! | code  | meaning                                   |
//! |-------|-------------------------------------------|
//! | `>=1` | a normal attempt (choice index or value)  |
//! | `0`   | intentional skip, e.g. no listening audio |
//! | `-1`  | parse or upstream failure                 |
//!
//! Skip and failure counts are taken strictly from the code, never from
//! `is_correct`.

use serde::{Deserialize, Serialize};

use crate::model::QuestionResult;

/// Answer code for a question that was intentionally not attempted.
pub const SKIP_CODE: i32 = 0;

/// Answer code for an evaluation-pipeline failure.
pub const PARSE_FAILURE_CODE: i32 = -1;

/// How an answer code is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    Attempted,
    Skipped,
    ParseFailed,
}

impl AnswerKind {
    /// Classify a raw answer code. Codes below `-1` have no meaning.
    pub fn classify(answer: i32) -> Option<Self> {
        match answer {
            a if a >= 1 => Some(AnswerKind::Attempted),
            SKIP_CODE => Some(AnswerKind::Skipped),
            PARSE_FAILURE_CODE => Some(AnswerKind::ParseFailed),
            _ => None,
        }
    }
}

/// Correctness as derived from the answer code and the answer key snapshot.
pub fn is_correct(answer: i32, correct_answer: i32) -> bool {
    answer >= 1 && answer == correct_answer
}

/// Running counts of answer kinds over a set of question results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnswerTally {
    pub attempted: u32,
    pub correct: u32,
    pub skipped: u32,
    pub parsing_failed: u32,
}

impl AnswerTally {
    /// Count one result.
    pub fn add(&mut self, result: &QuestionResult) {
        match result.kind() {
            Some(AnswerKind::Attempted) => self.attempted += 1,
            Some(AnswerKind::Skipped) => self.skipped += 1,
            Some(AnswerKind::ParseFailed) => self.parsing_failed += 1,
            None => {}
        }
        if result.is_correct {
            self.correct += 1;
        }
    }

    /// Tally a slice of results.
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a QuestionResult>) -> Self {
        let mut tally = Self::default();
        for r in results {
            tally.add(r);
        }
        tally
    }

    /// Fold another tally into this one.
    pub fn merge(&mut self, other: &AnswerTally) {
        self.attempted += other.attempted;
        self.correct += other.correct;
        self.skipped += other.skipped;
        self.parsing_failed += other.parsing_failed;
    }
}
