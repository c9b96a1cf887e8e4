use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::derive::should_not_retry;
use crate::hash::{IssueHash, stable_id};

/// Defines a kebab-case label enum with `as_str`, `from_label`, and `Display`.
///
/// `from_label` accepts the canonical label case-insensitively, with spaces or
/// underscores standing in for hyphens.
macro_rules! label_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            pub fn from_label(raw: &str) -> Option<Self> {
                let normalized = raw.trim().to_ascii_lowercase().replace([' ', '_'], "-");
                Self::ALL.iter().copied().find(|v| v.as_str() == normalized)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

label_enum! {
    /// Area a recorded decision applies to.
    pub enum DecisionCategory {
        Architecture => "architecture",
        TechStack => "tech-stack",
        Patterns => "patterns",
        Security => "security",
        DataModel => "data-model",
        ApiDesign => "api-design",
        UiDesign => "ui-design",
        Integration => "integration",
        Deployment => "deployment",
        BusinessLogic => "business-logic",
    }
}

label_enum! {
    pub enum Impact {
        Low => "low",
        Medium => "medium",
        High => "high",
        Critical => "critical",
    }
}

label_enum! {
    pub enum MadeBy {
        User => "user",
        Ai => "ai",
        System => "system",
    }
}

label_enum! {
    /// Outcome of one attempt. Serialized labels match the heading parenthetical
    /// only for `success`; the dialect writes failures as `(Failed)`.
    pub enum AttemptResult {
        Success => "success",
        Failure => "failure",
        Partial => "partial",
    }
}

label_enum! {
    pub enum BlockerCategory {
        Error => "error",
        MissingInfo => "missing-info",
        WaitingExternal => "waiting-external",
        NeedsDecision => "needs-decision",
    }
}

label_enum! {
    pub enum BlockerStatus {
        Active => "active",
        Resolved => "resolved",
    }
}

label_enum! {
    /// Rough size of the work covered by one devlog session.
    pub enum TaskSize {
        Trivial => "trivial",
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
}

label_enum! {
    pub enum SessionStatus {
        Completed => "completed",
        InProgress => "in-progress",
        Blocked => "blocked",
        Abandoned => "abandoned",
    }
}

impl Impact {
    /// Critical and high impact decisions are rendered as "must follow".
    pub fn is_binding(&self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

/// A recorded architectural or product choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub decision: String,
    pub category: DecisionCategory,
    pub reasoning: String,
    pub alternatives_considered: Vec<String>,
    pub made_by: MadeBy,
    pub user_approved: bool,
    pub reversible: bool,
    pub impact: Impact,
    pub related_files: Vec<String>,
    /// Reserved for cross-linking; always empty today.
    pub related_decisions: Vec<String>,
}

/// One recorded try at resolving an issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub id: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub issue: String,
    pub issue_hash: IssueHash,
    pub approach: String,
    pub code_or_command: Option<String>,
    pub result: AttemptResult,
    pub error_message: Option<String>,
    pub lessons_learned: Option<String>,
    pub should_not_retry: bool,
}

impl Attempt {
    /// Build an attempt with derived fields filled in. `number` is the 1-based
    /// position of the attempt within its issue. The id hashes
    /// `issue_hash|number`, so spellings of one issue share ids.
    pub fn new(
        issue: impl Into<String>,
        number: u32,
        approach: impl Into<String>,
        result: AttemptResult,
    ) -> Self {
        let issue = issue.into();
        let issue_hash = IssueHash::of(&issue);
        let id = stable_id(&[issue_hash.as_str(), &number.to_string()]);
        let mut attempt = Self {
            id,
            timestamp: None,
            issue,
            issue_hash,
            approach: approach.into(),
            code_or_command: None,
            result,
            error_message: None,
            lessons_learned: None,
            should_not_retry: false,
        };
        attempt.reevaluate();
        attempt
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error_message = Some(error.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code_or_command = Some(code.into());
        self
    }

    pub fn with_lessons(mut self, lessons: impl Into<String>) -> Self {
        self.lessons_learned = Some(lessons.into());
        self.reevaluate();
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Recompute `should_not_retry` from the current result and lessons.
    pub fn reevaluate(&mut self) {
        self.should_not_retry = should_not_retry(self);
    }
}

/// An unresolved (or since-resolved) obstacle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blocker {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub description: String,
    pub category: BlockerCategory,
    pub error_message: Option<String>,
    pub attempts_made: Vec<String>,
    pub status: BlockerStatus,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolution: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,
    pub change: String,
}

/// A session-level work-log record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevlogEntry {
    pub date: DateTime<Utc>,
    pub title: String,
    pub session_id: Option<String>,
    pub task_size: TaskSize,
    pub status: SessionStatus,
    pub what_was_done: Vec<String>,
    pub files_changed: Vec<FileChange>,
    /// Decisions referenced during the session.
    pub decisions_made: Vec<String>,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechStack {
    pub framework: String,
    pub database: String,
    pub orm: String,
    pub auth: String,
    pub ui: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payments: Option<String>,
}

impl Default for TechStack {
    fn default() -> Self {
        Self {
            framework: "nextjs".to_string(),
            database: "postgresql".to_string(),
            orm: "prisma".to_string(),
            auth: "nextauth".to_string(),
            ui: "tailwind".to_string(),
            payments: None,
        }
    }
}

/// Aggregate snapshot of a project's memory, used to prime an LLM prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContext {
    pub version: String,
    pub project_name: String,
    pub project_type: String,
    pub current_phase: String,
    pub last_updated: Option<String>,
    pub stack: TechStack,
    pub built_features: Vec<String>,
    pub pending_features: Vec<String>,
    /// Reserved; always empty.
    pub recent_commits: Vec<String>,
    pub recent_changes: Vec<FileChange>,
    pub decisions: Vec<Decision>,
    pub recent_attempts: Vec<Attempt>,
    /// Active blockers only.
    pub blockers: Vec<Blocker>,
}

/// Output format for CLI commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_roundtrip_for_every_category() {
        for category in DecisionCategory::ALL {
            assert_eq!(DecisionCategory::from_label(category.as_str()), Some(*category));
        }
    }

    #[test]
    fn test_from_label_accepts_spaces_and_case() {
        assert_eq!(
            DecisionCategory::from_label("  Tech Stack "),
            Some(DecisionCategory::TechStack)
        );
        assert_eq!(
            BlockerCategory::from_label("waiting_external"),
            Some(BlockerCategory::WaitingExternal)
        );
        assert_eq!(Impact::from_label("enormous"), None);
    }

    #[test]
    fn test_serde_uses_kebab_case_labels() {
        let json = serde_json::to_string(&DecisionCategory::ApiDesign).unwrap();
        assert_eq!(json, "\"api-design\"");
        let status: SessionStatus = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(status, SessionStatus::InProgress);
    }

    #[test]
    fn test_attempt_new_derives_hash_and_retry_flag() {
        let attempt = Attempt::new("Port 3000 in use", 1, "kill it", AttemptResult::Failure);
        assert_eq!(attempt.issue_hash, IssueHash::of("port 3000 in use"));
        assert!(attempt.should_not_retry);

        let softened = attempt.with_lessons("a different signal might work");
        assert!(!softened.should_not_retry);
    }

    #[test]
    fn test_attempt_ids_differ_by_number() {
        let a = Attempt::new("issue", 1, "x", AttemptResult::Partial);
        let b = Attempt::new("issue", 2, "x", AttemptResult::Partial);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_attempt_id_follows_issue_hash() {
        let a = Attempt::new("Port 3000 in use", 1, "x", AttemptResult::Partial);
        let b = Attempt::new("  port 3000 IN USE", 1, "y", AttemptResult::Failure);
        assert_eq!(a.id, b.id);
        assert_eq!(a.id, stable_id(&[a.issue_hash.as_str(), "1"]));
    }

    #[test]
    fn test_project_context_serializes_camel_case() {
        let ctx = ProjectContext {
            version: "1.0.0".into(),
            project_name: "demo".into(),
            project_type: "saas".into(),
            current_phase: "mvp".into(),
            last_updated: None,
            stack: TechStack::default(),
            built_features: vec![],
            pending_features: vec![],
            recent_commits: vec![],
            recent_changes: vec![],
            decisions: vec![],
            recent_attempts: vec![],
            blockers: vec![],
        };
        let value = serde_json::to_value(&ctx).unwrap();
        assert_eq!(value["projectName"], "demo");
        assert_eq!(value["stack"]["framework"], "nextjs");
        assert!(value["stack"].get("payments").is_none());
    }
}
