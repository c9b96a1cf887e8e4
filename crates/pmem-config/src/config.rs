use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config_merge::merge_toml_values;
use crate::paths::{PROJECT_DIR_NAME, project_config_path, user_config_path};

/// Default stop words removed before word-set similarity. Only words that
/// survive the length filter need listing.
const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "from", "into", "onto", "that", "this", "then", "than", "was",
    "are", "its", "via",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    pub matcher: MatcherConfig,
    pub context: ContextConfig,
    pub files: FilesConfig,
}

/// Tuning for approach similarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Jaccard score an approach must exceed (strictly) to count as a repeat.
    pub similarity_threshold: f64,
    /// Words shorter than this many characters are ignored.
    pub min_word_len: usize,
    /// Words ignored regardless of length. Defaults to a short list of
    /// articles and prepositions; an empty list gives plain Jaccard over the
    /// length-filtered words.
    pub stop_words: Vec<String>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.7,
            min_word_len: 3,
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| (*w).to_string()).collect(),
        }
    }
}

impl MatcherConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            bail!(
                "matcher.similarity_threshold must be within [0, 1], got {}",
                self.similarity_threshold
            );
        }
        if self.min_word_len == 0 {
            bail!("matcher.min_word_len must be at least 1");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Number of most recent attempts kept in the aggregate.
    pub recent_attempts_limit: usize,
    /// Number of most recent devlog entries whose file changes are surfaced.
    pub recent_devlog_entries: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            recent_attempts_limit: 10,
            recent_devlog_entries: 5,
        }
    }
}

/// Locations of the memory files, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub dir: String,
    pub decisions: String,
    pub devlog: String,
    pub attempts: String,
    pub blockers: String,
    pub state: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            dir: PROJECT_DIR_NAME.to_string(),
            decisions: "DECISIONS.md".to_string(),
            devlog: "DEVLOG.md".to_string(),
            attempts: "ATTEMPTS.md".to_string(),
            blockers: "BLOCKERS.md".to_string(),
            state: "state.json".to_string(),
        }
    }
}

impl FilesConfig {
    pub fn memory_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.dir)
    }

    pub fn decisions_path(&self, project_root: &Path) -> PathBuf {
        self.memory_dir(project_root).join(&self.decisions)
    }

    pub fn devlog_path(&self, project_root: &Path) -> PathBuf {
        self.memory_dir(project_root).join(&self.devlog)
    }

    pub fn attempts_path(&self, project_root: &Path) -> PathBuf {
        self.memory_dir(project_root).join(&self.attempts)
    }

    pub fn blockers_path(&self, project_root: &Path) -> PathBuf {
        self.memory_dir(project_root).join(&self.blockers)
    }

    pub fn state_path(&self, project_root: &Path) -> PathBuf {
        self.memory_dir(project_root).join(&self.state)
    }
}

impl MemoryConfig {
    /// Load configuration with fallback chain:
    ///
    /// 1. If both `.pmem/config.toml` (project) and
    ///    `~/.config/project-memory/config.toml` (user) exist, deep-merge them
    ///    with project settings overriding user settings.
    /// 2. If only one exists, use it directly.
    /// 3. If neither exists, use defaults.
    pub fn load(project_root: &Path) -> Result<Self> {
        let user_path = user_config_path();
        Self::load_with_paths(user_path.as_deref(), &project_config_path(project_root))
    }

    /// Load config from explicit paths. Testable without global filesystem state.
    pub fn load_with_paths(user_path: Option<&Path>, project_path: &Path) -> Result<Self> {
        let user_path = user_path.filter(|p| p.exists());
        let project_exists = project_path.exists();

        let merged = match (user_path, project_exists) {
            (None, false) => {
                tracing::debug!("No memory config found; using defaults");
                return Ok(Self::default());
            }
            (Some(user), false) => read_toml(user)?,
            (None, true) => read_toml(project_path)?,
            (Some(user), true) => merge_toml_values(read_toml(user)?, read_toml(project_path)?),
        };

        // Roundtrip through string for reliable deserialization
        let merged_str = toml::to_string(&merged).context("Failed to serialize merged config")?;
        let config: Self =
            toml::from_str(&merged_str).context("Failed to deserialize memory config")?;
        config.matcher.validate()?;
        Ok(config)
    }
}

fn read_toml(path: &Path) -> Result<toml::Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse config: {}", path.display()))
}
