//! Static lookup tables and the model registry.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::Subject;

/// Returned by lookups for keys the tables do not know.
pub const UNKNOWN_WEBSITE: &str = "#";

/// Returned by [`subject_label`] for keys outside the three subjects.
pub const UNKNOWN_SUBJECT_LABEL: &str = "기타";

const MODEL_WEBSITES: &[(&str, &str)] = &[
    ("gpt-5", "https://openai.com/ko-KR/index/introducing-gpt-5/"),
    ("gpt-4o", "https://openai.com/ko-KR/index/gpt-4o/"),
    (
        "claude-opus-4-1",
        "https://www.anthropic.com/products/claude-opus",
    ),
    (
        "claude-sonnet-4-5",
        "https://www.anthropic.com/products/claude-sonnet",
    ),
    ("solar-pro", "https://upstage.ai/kr/solar/"),
    ("sonar-pro", "https://www.perplexity.ai/enterprise/sonar"),
];

/// Product page for a model, or [`UNKNOWN_WEBSITE`].
pub fn model_website(model_name: &str) -> &'static str {
    MODEL_WEBSITES
        .iter()
        .find(|(name, _)| *name == model_name)
        .map(|(_, url)| *url)
        .unwrap_or(UNKNOWN_WEBSITE)
}

/// Korean display label for a subject key, or [`UNKNOWN_SUBJECT_LABEL`].
pub fn subject_label(key: &str) -> &'static str {
    key.parse::<Subject>()
        .map(Subject::label)
        .unwrap_or(UNKNOWN_SUBJECT_LABEL)
}

/// The `models.json` registry maintained next to the evaluator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelRegistry {
    #[serde(default)]
    pub models: Vec<RegisteredModel>,
}

/// One model entry in the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredModel {
    /// Display name; usually what result files use as `model_name`.
    pub name: String,
    /// Provider-side identifier, sometimes used as `model_name` instead.
    #[serde(default)]
    pub model_id: Option<String>,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub enabled: bool,
}

impl RegisteredModel {
    fn answers_to(&self, model_name: &str) -> bool {
        self.name == model_name || self.model_id.as_deref() == Some(model_name)
    }
}

impl ModelRegistry {
    /// Load a registry from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read model registry: {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("failed to parse model registry: {}", path.display()))
    }

    /// Parse a registry from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Whether `model_name` is registered, enabled or not.
    pub fn contains(&self, model_name: &str) -> bool {
        self.models.iter().any(|m| m.answers_to(model_name))
    }

    /// Whether `model_name` matches an enabled entry's name or model id.
    pub fn is_enabled(&self, model_name: &str) -> bool {
        self.models
            .iter()
            .any(|m| m.enabled && m.answers_to(model_name))
    }

    /// Every name and model id an enabled model may appear under.
    pub fn enabled_names(&self) -> BTreeSet<String> {
        self.models
            .iter()
            .filter(|m| m.enabled)
            .flat_map(|m| std::iter::once(m.name.clone()).chain(m.model_id.clone()))
            .collect()
    }
}
