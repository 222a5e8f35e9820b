//! `ksatbench.toml` configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::ModelRegistry;
use crate::leaderboard::LeaderboardOptions;

/// Top-level ksatbench configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KsatConfig {
    /// Directory of exam definition files.
    #[serde(default = "default_exams_dir")]
    pub exams_dir: PathBuf,
    /// Directory of evaluation records, `results/<exam_id>/<model>.yaml`.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    /// Model registry. A missing file is treated as no registry.
    #[serde(default = "default_models_file")]
    pub models_file: Option<PathBuf>,
    /// Where `export` writes the evaluation bundle.
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
}

/// `[leaderboard]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    /// Drop English questions numbered at or below this from the English
    /// board. Off by default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listening_cutoff: Option<u32>,
    /// Restrict leaderboards to models enabled in the registry.
    #[serde(default = "default_true")]
    pub enabled_models_only: bool,
}

fn default_exams_dir() -> PathBuf {
    PathBuf::from("exams/parsed")
}
fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}
fn default_models_file() -> Option<PathBuf> {
    Some(PathBuf::from("models/models.json"))
}
fn default_output() -> PathBuf {
    PathBuf::from("web/public/data/evaluation-data.json")
}
fn default_true() -> bool {
    true
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            listening_cutoff: None,
            enabled_models_only: true,
        }
    }
}

impl Default for KsatConfig {
    fn default() -> Self {
        Self {
            exams_dir: default_exams_dir(),
            results_dir: default_results_dir(),
            models_file: default_models_file(),
            output: default_output(),
            leaderboard: LeaderboardConfig::default(),
        }
    }
}

impl KsatConfig {
    /// Leaderboard options implied by this config and a loaded registry.
    ///
    /// The enabled-model filter only applies when the registry has entries.
    pub fn leaderboard_options(&self, registry: &ModelRegistry) -> LeaderboardOptions {
        let model_filter = (self.leaderboard.enabled_models_only && !registry.is_empty())
            .then(|| registry.enabled_names());
        LeaderboardOptions {
            model_filter,
            listening_cutoff: self.leaderboard.listening_cutoff,
        }
    }

    /// Render as TOML, for `ksatbench init`.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize config")
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
/// Unset variables resolve to the empty string.
pub fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `ksatbench.toml` in the current directory
/// 2. `~/.config/ksatbench/config.toml`
///
/// Environment variable overrides: `KSATBENCH_RESULTS_DIR`, `KSATBENCH_EXAMS_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<KsatConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("ksatbench.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            tracing::debug!("using config {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<KsatConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => KsatConfig::default(),
    };

    Ok(resolve(apply_env_overrides(config, |key| std::env::var(key).ok())))
}

fn apply_env_overrides(
    mut config: KsatConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> KsatConfig {
    if let Some(dir) = lookup("KSATBENCH_RESULTS_DIR") {
        config.results_dir = PathBuf::from(dir);
    }
    if let Some(dir) = lookup("KSATBENCH_EXAMS_DIR") {
        config.exams_dir = PathBuf::from(dir);
    }
    config
}

fn resolve(mut config: KsatConfig) -> KsatConfig {
    config.exams_dir = resolve_path(&config.exams_dir);
    config.results_dir = resolve_path(&config.results_dir);
    config.models_file = config.models_file.as_deref().map(resolve_path);
    config.output = resolve_path(&config.output);
    config
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("ksatbench"))
}
