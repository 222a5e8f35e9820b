//! Record store: loads exam definitions and evaluation records, validates
//! them, and answers lookups.
//!
//! Exams live in one YAML or JSON file each. Evaluation records live under
//! `results/<exam_id>/<model>.yaml` (any nesting and either format is
//! accepted). Every record that fails validation is rejected individually and
//! reported on the [`LoadReport`]; the rest of the load proceeds.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::catalog::ModelRegistry;
use crate::config::KsatConfig;
use crate::error::{IntegrityError, LookupError};
use crate::model::{timestamp, EvaluationResult, Exam, QuestionResult, ResultSummary, Subject};
use crate::validate::{check_question_results, validate_exam, AuditFinding, AuditKind};

/// An evaluation record as written by the evaluator, before validation.
///
/// The stored summary is optional and only used to detect drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub exam_id: String,
    pub exam_title: String,
    pub subject: Subject,
    pub model_name: String,
    #[serde(with = "timestamp")]
    pub evaluated_at: DateTime<Utc>,
    #[serde(default)]
    pub summary: Option<ResultSummary>,
    pub results: Vec<QuestionResult>,
}

/// A record excluded from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    /// File path, or `<exam_id>/<model>` for in-memory records.
    pub source: String,
    pub exam_id: Option<String>,
    pub model_name: Option<String>,
    pub error: IntegrityError,
}

impl fmt::Display for RejectedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.error)
    }
}

/// Outcome of a load: the usable store plus everything that was left out or
/// looked suspicious.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub store: RecordStore,
    pub rejected: Vec<RejectedRecord>,
    pub audit: Vec<AuditFinding>,
}

impl LoadReport {
    /// True when nothing was rejected. Audit findings do not count.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Fail if any record was rejected.
    pub fn into_strict(self) -> Result<RecordStore> {
        if let Some(first) = self.rejected.first() {
            anyhow::bail!(
                "{} record(s) failed integrity checks, first: {}",
                self.rejected.len(),
                first
            );
        }
        Ok(self.store)
    }
}

/// Read-only snapshot of validated exams and evaluations.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    exams: BTreeMap<String, Exam>,
    results: Vec<EvaluationResult>,
    registry: ModelRegistry,
}

impl RecordStore {
    /// Validate in-memory exams and records.
    pub fn from_records(exams: Vec<Exam>, records: Vec<EvaluationRecord>) -> LoadReport {
        let mut loader = Loader::default();
        for exam in exams {
            let source = exam.exam_id.clone();
            loader.add_exam(&source, exam);
        }
        for record in records {
            let source = format!("{}/{}", record.exam_id, record.model_name);
            loader.add_record(&source, record);
        }
        loader.finish()
    }

    /// Load every exam file under `exams_dir` and every record under
    /// `results_dir`.
    pub fn load(exams_dir: &Path, results_dir: &Path) -> Result<LoadReport> {
        let mut loader = Loader::default();

        for path in collect_documents(exams_dir)? {
            let source = path.display().to_string();
            match parse_document::<Exam>(&path)? {
                Ok(exam) => loader.add_exam(&source, exam),
                Err(e) => loader.reject(&source, None, None, e),
            }
        }

        for path in collect_documents(results_dir)? {
            let source = path.display().to_string();
            match parse_document::<EvaluationRecord>(&path)? {
                Ok(record) => loader.add_record(&source, record),
                Err(e) => loader.reject(&source, None, None, e),
            }
        }

        let report = loader.finish();
        tracing::info!(
            "loaded {} exams and {} evaluations ({} rejected, {} audit findings)",
            report.store.exams.len(),
            report.store.results.len(),
            report.rejected.len(),
            report.audit.len()
        );
        Ok(report)
    }

    /// Attach a model registry, used to tell unknown models from registered
    /// ones that have no results yet.
    pub fn with_registry(mut self, registry: ModelRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// All exams keyed by id.
    pub fn exams(&self) -> &BTreeMap<String, Exam> {
        &self.exams
    }

    /// All accepted evaluations, in load order.
    pub fn results(&self) -> &[EvaluationResult] {
        &self.results
    }

    /// Distinct model names with at least one evaluation.
    pub fn model_names(&self) -> BTreeSet<&str> {
        self.results.iter().map(|r| r.model_name.as_str()).collect()
    }

    pub fn exam(&self, exam_id: &str) -> Result<&Exam, LookupError> {
        self.exams
            .get(exam_id)
            .ok_or_else(|| LookupError::ExamNotFound(exam_id.to_string()))
    }

    /// Every evaluation of an exam. Empty when the exam exists but nobody
    /// has been evaluated on it.
    pub fn results_for_exam(&self, exam_id: &str) -> Result<Vec<&EvaluationResult>, LookupError> {
        self.exam(exam_id)?;
        Ok(self
            .results
            .iter()
            .filter(|r| r.exam_id == exam_id)
            .collect())
    }

    /// Every evaluation by a model across all exams.
    ///
    /// A model registered in the registry but without results yields an
    /// empty list; a name neither evaluated nor registered is not found.
    pub fn results_for_model(&self, model_name: &str) -> Result<Vec<&EvaluationResult>, LookupError> {
        let results: Vec<&EvaluationResult> = self
            .results
            .iter()
            .filter(|r| r.model_name == model_name)
            .collect();
        if results.is_empty() && !self.registry.contains(model_name) {
            return Err(LookupError::ModelNotFound(model_name.to_string()));
        }
        Ok(results)
    }

    /// One model's evaluation of one exam.
    ///
    /// An unknown exam or model is reported as such; when both are known but
    /// the pair was never evaluated the miss is `EvaluationNotFound`.
    pub fn result(&self, exam_id: &str, model_name: &str) -> Result<&EvaluationResult, LookupError> {
        self.exam(exam_id)?;
        if let Some(result) = self
            .results
            .iter()
            .find(|r| r.exam_id == exam_id && r.model_name == model_name)
        {
            return Ok(result);
        }
        self.results_for_model(model_name)?;
        Err(LookupError::EvaluationNotFound {
            exam_id: exam_id.to_string(),
            model_name: model_name.to_string(),
        })
    }
}

/// Load the store described by a configuration, registry included.
pub fn load_store(config: &KsatConfig) -> Result<LoadReport> {
    let mut report = RecordStore::load(&config.exams_dir, &config.results_dir)?;

    if let Some(path) = &config.models_file {
        if path.exists() {
            let registry = ModelRegistry::load(path)?;
            report.store = report.store.with_registry(registry);
        } else {
            tracing::debug!("no model registry at {}", path.display());
        }
    }

    Ok(report)
}

#[derive(Default)]
struct Loader {
    exams: BTreeMap<String, Exam>,
    results: Vec<EvaluationResult>,
    pairs: HashSet<(String, String)>,
    rejected: Vec<RejectedRecord>,
    audit: Vec<AuditFinding>,
}

impl Loader {
    fn reject(
        &mut self,
        source: &str,
        exam_id: Option<&str>,
        model_name: Option<&str>,
        error: IntegrityError,
    ) {
        tracing::warn!("rejecting {source}: {error}");
        self.rejected.push(RejectedRecord {
            source: source.to_string(),
            exam_id: exam_id.map(str::to_string),
            model_name: model_name.map(str::to_string),
            error,
        });
    }

    fn add_exam(&mut self, source: &str, exam: Exam) {
        if let Err(e) = validate_exam(&exam) {
            self.reject(source, Some(&exam.exam_id), None, e);
            return;
        }
        if self.exams.contains_key(&exam.exam_id) {
            let e = IntegrityError::DuplicateExam(exam.exam_id.clone());
            self.reject(source, Some(&exam.exam_id), None, e);
            return;
        }
        tracing::debug!("loaded exam {} ({} questions)", exam.exam_id, exam.questions.len());
        self.exams.insert(exam.exam_id.clone(), exam);
    }

    fn add_record(&mut self, source: &str, record: EvaluationRecord) {
        let exam_id = record.exam_id.clone();
        let model_name = record.model_name.clone();
        match self.accept(record) {
            Ok((result, findings)) => {
                for kind in findings {
                    let finding = AuditFinding {
                        exam_id: exam_id.clone(),
                        model_name: Some(model_name.clone()),
                        kind,
                    };
                    tracing::warn!("{finding}");
                    self.audit.push(finding);
                }
                tracing::debug!("loaded evaluation {exam_id}/{model_name}");
                self.pairs.insert((exam_id, model_name));
                self.results.push(result);
            }
            Err(e) => self.reject(source, Some(&exam_id), Some(&model_name), e),
        }
    }

    fn accept(
        &self,
        record: EvaluationRecord,
    ) -> Result<(EvaluationResult, Vec<AuditKind>), IntegrityError> {
        let exam = self
            .exams
            .get(&record.exam_id)
            .ok_or_else(|| IntegrityError::UnknownExam(record.exam_id.clone()))?;

        if exam.subject != record.subject {
            return Err(IntegrityError::SubjectMismatch {
                exam_id: record.exam_id,
                expected: exam.subject,
                found: record.subject,
            });
        }

        if self
            .pairs
            .contains(&(record.exam_id.clone(), record.model_name.clone()))
        {
            return Err(IntegrityError::DuplicateEvaluation {
                exam_id: record.exam_id,
                model_name: record.model_name,
            });
        }

        let mut findings = check_question_results(&exam.questions, &record.results)?;
        let summary = ResultSummary::from_results(&record.results);

        if let Some(stored) = record.summary {
            if !same_counts(&stored, &summary) {
                findings.push(AuditKind::StaleSummary {
                    stored,
                    recomputed: summary,
                });
            }
        }

        let results = record
            .results
            .into_iter()
            .map(|mut r| {
                if r.question_number.is_none() {
                    r.question_number = exam.question(&r.question_id).map(|q| q.question_number);
                }
                r
            })
            .collect();

        Ok((
            EvaluationResult {
                exam_id: record.exam_id,
                exam_title: record.exam_title,
                subject: record.subject,
                model_name: record.model_name,
                evaluated_at: record.evaluated_at,
                summary,
                results,
            },
            findings,
        ))
    }

    fn finish(self) -> LoadReport {
        LoadReport {
            store: RecordStore {
                exams: self.exams,
                results: self.results,
                registry: ModelRegistry::default(),
            },
            rejected: self.rejected,
            audit: self.audit,
        }
    }
}

/// Stored percentages are rounded by the evaluator, so only counts are
/// compared.
fn same_counts(a: &ResultSummary, b: &ResultSummary) -> bool {
    a.total_questions == b.total_questions
        && a.correct_answers == b.correct_answers
        && a.total_score == b.total_score
        && a.max_score == b.max_score
}

fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext, "yaml" | "yml" | "json"))
}

/// Recursively list YAML/JSON files under `dir`, sorted for a stable load
/// order.
fn collect_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_dir() {
            files.extend(collect_documents(&path)?);
        } else if is_document(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Read and parse one document. IO failures are environment errors and
/// propagate; undecodable or unparsable content is an integrity error on that
/// record.
fn parse_document<T: DeserializeOwned>(path: &Path) -> Result<Result<T, IntegrityError>> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(e) => return Ok(Err(IntegrityError::Malformed(format!("not valid UTF-8: {e}")))),
    };

    let parsed = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content).map_err(|e| IntegrityError::Malformed(e.to_string()))
    } else {
        serde_yaml::from_str(&content).map_err(|e| IntegrityError::Malformed(e.to_string()))
    };
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Question;

    fn exam(id: &str, subject: Subject, points: &[u32]) -> Exam {
        Exam {
            exam_id: id.into(),
            title: format!("{id} title"),
            subject,
            year: 2025,
            questions: points
                .iter()
                .enumerate()
                .map(|(i, &p)| Question {
                    question_id: format!("q{}", i + 1),
                    question_number: i as u32 + 1,
                    question_text: format!("question {}", i + 1),
                    passage: None,
                    choices: vec!["1".into(), "2".into(), "3".into(), "4".into(), "5".into()],
                    correct_answer: 1,
                    points: p,
                })
                .collect(),
        }
    }

    fn answer(n: usize, answer: i32, points: u32) -> QuestionResult {
        let hit = answer == 1;
        QuestionResult {
            question_id: format!("q{n}"),
            question_number: None,
            answer,
            correct_answer: 1,
            is_correct: hit,
            reasoning: "because".into(),
            time_taken: 3.0,
            points,
            earned_points: if hit { points } else { 0 },
            success: true,
            error: None,
        }
    }

    fn record(exam_id: &str, subject: Subject, model: &str, results: Vec<QuestionResult>) -> EvaluationRecord {
        EvaluationRecord {
            exam_id: exam_id.into(),
            exam_title: format!("{exam_id} title"),
            subject,
            model_name: model.into(),
            evaluated_at: Utc::now(),
            summary: None,
            results,
        }
    }

    #[test]
    fn accepts_valid_records_and_fills_question_numbers() {
        let report = RecordStore::from_records(
            vec![exam("k1", Subject::Korean, &[2, 3, 2])],
            vec![record(
                "k1",
                Subject::Korean,
                "gpt-5",
                vec![answer(1, 1, 2), answer(2, 4, 3), answer(3, 0, 2)],
            )],
        );
        assert!(report.is_clean());
        let result = report.store.result("k1", "gpt-5").unwrap();
        assert_eq!(result.summary.total_score, 2);
        assert_eq!(result.summary.max_score, 7);
        assert_eq!(result.results[2].question_number, Some(3));
    }

    #[test]
    fn bad_pair_is_excluded_others_survive() {
        let mut inflated = answer(1, 1, 2);
        inflated.earned_points = 5;
        let report = RecordStore::from_records(
            vec![exam("k1", Subject::Korean, &[2])],
            vec![
                record("k1", Subject::Korean, "broken", vec![inflated]),
                record("k1", Subject::Korean, "fine", vec![answer(1, 1, 2)]),
                record("nope", Subject::Korean, "fine", vec![]),
            ],
        );
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(report.rejected[0].model_name.as_deref(), Some("broken"));
        assert!(matches!(
            report.rejected[1].error,
            IntegrityError::UnknownExam(_)
        ));
        assert_eq!(report.store.results().len(), 1);
        assert_eq!(report.store.results()[0].model_name, "fine");
        assert!(report.into_strict().is_err());
    }

    #[test]
    fn duplicate_pair_and_subject_mismatch() {
        let report = RecordStore::from_records(
            vec![exam("m1", Subject::Math, &[4])],
            vec![
                record("m1", Subject::Math, "a", vec![answer(1, 1, 4)]),
                record("m1", Subject::Math, "a", vec![answer(1, 2, 4)]),
                record("m1", Subject::Korean, "b", vec![answer(1, 1, 4)]),
            ],
        );
        assert!(matches!(
            report.rejected[0].error,
            IntegrityError::DuplicateEvaluation { .. }
        ));
        assert!(matches!(
            report.rejected[1].error,
            IntegrityError::SubjectMismatch { .. }
        ));
        // The first copy wins.
        assert_eq!(report.store.result("m1", "a").unwrap().summary.correct_answers, 1);
    }

    #[test]
    fn stale_stored_summary_is_audited_and_ignored() {
        let mut rec = record("m1", Subject::Math, "a", vec![answer(1, 2, 4)]);
        rec.summary = Some(ResultSummary::from_totals(1, 1, 4, 4));
        let report = RecordStore::from_records(vec![exam("m1", Subject::Math, &[4])], vec![rec]);

        assert!(report.is_clean());
        assert!(report
            .audit
            .iter()
            .any(|f| matches!(f.kind, AuditKind::StaleSummary { .. })));
        assert_eq!(report.store.results()[0].summary.correct_answers, 0);
    }

    #[test]
    fn lookups_distinguish_missing_from_empty() {
        let report = RecordStore::from_records(
            vec![
                exam("k1", Subject::Korean, &[2]),
                exam("e1", Subject::English, &[2]),
            ],
            vec![record("k1", Subject::Korean, "gpt-5", vec![answer(1, 1, 2)])],
        );
        let registry = ModelRegistry::from_json_str(
            r#"{"models": [{"name": "solar-pro", "provider": "upstage", "enabled": true}]}"#,
        )
        .unwrap();
        let store = report.store.with_registry(registry);

        assert_eq!(store.results_for_exam("e1").unwrap().len(), 0);
        assert_eq!(
            store.results_for_exam("x1"),
            Err(LookupError::ExamNotFound("x1".into()))
        );
        assert_eq!(store.results_for_model("gpt-5").unwrap().len(), 1);
        assert!(store.results_for_model("solar-pro").unwrap().is_empty());
        assert_eq!(
            store.results_for_model("gpt-2"),
            Err(LookupError::ModelNotFound("gpt-2".into()))
        );
        assert!(store.exam("k1").is_ok());
        assert_eq!(
            store.result("e1", "gpt-5"),
            Err(LookupError::EvaluationNotFound {
                exam_id: "e1".into(),
                model_name: "gpt-5".into(),
            })
        );
        assert_eq!(
            store.result("e1", "gpt-2"),
            Err(LookupError::ModelNotFound("gpt-2".into()))
        );
        assert_eq!(
            store.result("x1", "gpt-5"),
            Err(LookupError::ExamNotFound("x1".into()))
        );
        assert_eq!(store.model_names().into_iter().collect::<Vec<_>>(), vec!["gpt-5"]);
    }

    #[test]
    fn oversized_points_are_rejected_not_summed() {
        let mut huge = exam("k1", Subject::Korean, &[2, 2]);
        huge.exam_id = "k2".into();
        huge.questions[0].points = 3_000_000_000;
        huge.questions[1].points = 3_000_000_000;
        let report = RecordStore::from_records(
            vec![exam("k1", Subject::Korean, &[2, 2]), huge],
            vec![
                record(
                    "k1",
                    Subject::Korean,
                    "drifted",
                    vec![answer(1, 1, 3_000_000_000), answer(2, 1, 3_000_000_000)],
                ),
                record("k1", Subject::Korean, "fine", vec![answer(1, 1, 2), answer(2, 1, 2)]),
            ],
        );

        assert_eq!(report.rejected.len(), 2);
        assert_eq!(
            report.rejected[0].error,
            IntegrityError::PointsOverflow("q2".into())
        );
        assert_eq!(report.rejected[1].model_name.as_deref(), Some("drifted"));
        assert_eq!(report.store.exams().len(), 1);
        assert_eq!(report.store.results().len(), 1);
        assert_eq!(report.store.results()[0].summary.total_score, 4);
    }

    #[test]
    fn rejected_exam_takes_its_records_with_it() {
        let mut broken = exam("k1", Subject::Korean, &[2, 2]);
        broken.questions[1].question_id = "q1".into();
        let report = RecordStore::from_records(
            vec![broken],
            vec![record("k1", Subject::Korean, "a", vec![answer(1, 1, 2)])],
        );
        assert_eq!(report.rejected.len(), 2);
        assert!(report.store.exams().is_empty());
        assert!(report.store.results().is_empty());
    }

    const EXAM_YAML: &str = r#"
exam_id: 2025-korean
title: 2025학년도 수능 국어
subject: korean
year: 2025
questions:
  - question_id: q1
    question_number: 1
    question_text: 윗글의 내용과 일치하지 않는 것은?
    choices: ["가", "나", "다", "라", "마"]
    correct_answer: 3
    points: 2
  - question_id: q2
    question_number: 2
    question_text: 다음 중 적절한 것은?
    choices: ["가", "나", "다", "라", "마"]
    correct_answer: 1
    points: 3
"#;

    const RESULT_YAML: &str = r#"
exam_id: 2025-korean
exam_title: 2025학년도 수능 국어
subject: korean
model_name: gpt-5
evaluated_at: '2025-11-14T09:12:03.123456'
summary:
  total_questions: 2
  correct_answers: 1
  accuracy: 50.0
  total_score: 2
  max_score: 5
  score_rate: 40.0
results:
  - question_id: q1
    question_number: 1
    answer: 3
    correct_answer: 3
    is_correct: true
    reasoning: 세 번째 선택지가 답이다.
    time_taken: 12.5
    points: 2
    earned_points: 2
    success: true
    error: null
  - question_id: q2
    question_number: 2
    answer: -1
    correct_answer: 1
    is_correct: false
    reasoning: ''
    time_taken: 30.0
    points: 3
    earned_points: 0
    success: false
    error: empty response
"#;

    #[test]
    fn load_directories() {
        let root = tempfile::tempdir().unwrap();
        let exams_dir = root.path().join("exams");
        let results_dir = root.path().join("results").join("2025-korean");
        std::fs::create_dir_all(&exams_dir).unwrap();
        std::fs::create_dir_all(&results_dir).unwrap();
        std::fs::write(exams_dir.join("2025-korean.yaml"), EXAM_YAML).unwrap();
        std::fs::write(results_dir.join("gpt-5.yaml"), RESULT_YAML).unwrap();
        std::fs::write(results_dir.join("broken.yaml"), "exam_id: [").unwrap();
        std::fs::write(results_dir.join("notes.txt"), "ignored").unwrap();

        let report = RecordStore::load(&exams_dir, &root.path().join("results")).unwrap();
        assert_eq!(report.store.exams().len(), 1);
        assert_eq!(report.store.results().len(), 1);
        assert_eq!(report.rejected.len(), 1);
        assert!(matches!(
            report.rejected[0].error,
            IntegrityError::Malformed(_)
        ));
        assert!(report.audit.is_empty());

        let result = &report.store.results()[0];
        assert_eq!(result.summary.correct_answers, 1);
        assert_eq!(result.summary.score_rate, 40.0);
    }

    #[test]
    fn undecodable_file_is_rejected_alone() {
        let root = tempfile::tempdir().unwrap();
        let exams_dir = root.path().join("exams");
        let results_dir = root.path().join("results").join("2025-korean");
        std::fs::create_dir_all(&exams_dir).unwrap();
        std::fs::create_dir_all(&results_dir).unwrap();
        std::fs::write(exams_dir.join("2025-korean.yaml"), EXAM_YAML).unwrap();
        std::fs::write(results_dir.join("gpt-5.yaml"), RESULT_YAML).unwrap();
        std::fs::write(results_dir.join("zz-broken.yaml"), [0xff, 0xfe, 0x00, b'a']).unwrap();

        let report = RecordStore::load(&exams_dir, &root.path().join("results")).unwrap();
        assert_eq!(report.store.results().len(), 1);
        assert_eq!(report.rejected.len(), 1);
        assert!(report.rejected[0].source.ends_with("zz-broken.yaml"));
        assert!(matches!(
            &report.rejected[0].error,
            IntegrityError::Malformed(msg) if msg.contains("UTF-8")
        ));
    }

    #[test]
    fn missing_required_field_is_malformed() {
        let root = tempfile::tempdir().unwrap();
        let exams_dir = root.path().join("exams");
        let results_dir = root.path().join("results");
        std::fs::create_dir_all(&exams_dir).unwrap();
        std::fs::create_dir_all(&results_dir).unwrap();
        std::fs::write(exams_dir.join("e.yaml"), EXAM_YAML).unwrap();
        std::fs::write(
            results_dir.join("r.yaml"),
            RESULT_YAML.replace("    earned_points: 2\n", ""),
        )
        .unwrap();

        let report = RecordStore::load(&exams_dir, &results_dir).unwrap();
        assert!(report.store.results().is_empty());
        assert_eq!(report.rejected.len(), 1);
    }

    #[test]
    fn load_missing_directory() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("nope");
        assert!(RecordStore::load(&missing, root.path()).is_err());
    }
}
