//! Heuristic derivation of record fields.
//!
//! Each rule is a pure function over the record (or its source text) so the
//! keyword triggers can be tested one by one.

use crate::types::{Attempt, AttemptResult, BlockerCategory, Decision, DecisionCategory, Impact};

/// Phrase in `lessons_learned` that keeps a failed approach open for retry.
const RETRY_HINT: &str = "might work";

/// Keyword table for category inference, checked in order; first hit wins.
///
/// Keywords of three characters or fewer must match a whole word, longer ones
/// match as a word prefix ("deploy" matches "deployment").
const CATEGORY_KEYWORDS: &[(DecisionCategory, &[&str])] = &[
    (
        DecisionCategory::Security,
        &["security", "auth", "authentication", "encrypt", "permission", "password", "secret", "csrf", "xss"],
    ),
    (
        DecisionCategory::Architecture,
        &["architecture", "monolith", "microservice", "layer", "module", "structure", "monorepo"],
    ),
    (
        DecisionCategory::TechStack,
        &["framework", "library", "stack", "dependency", "package", "database", "language"],
    ),
    (
        DecisionCategory::DataModel,
        &["schema", "model", "table", "migration", "entity", "relation", "column"],
    ),
    (
        DecisionCategory::ApiDesign,
        &["api", "endpoint", "rest", "graphql", "route", "rpc", "webhook"],
    ),
    (
        DecisionCategory::UiDesign,
        &["ui", "ux", "component", "layout", "style", "css", "theme", "design"],
    ),
    (
        DecisionCategory::Integration,
        &["integration", "integrate", "third-party", "sdk", "stripe", "oauth", "provider"],
    ),
    (
        DecisionCategory::Deployment,
        &["deploy", "hosting", "vercel", "docker", "ci", "pipeline", "infrastructure", "kubernetes"],
    ),
    (
        DecisionCategory::Patterns,
        &["pattern", "convention", "naming", "idiom", "hook"],
    ),
];

/// Keyword table for blocker classification, checked in order.
const BLOCKER_KEYWORDS: &[(BlockerCategory, &[&str])] = &[
    (
        BlockerCategory::Error,
        &["error", "exception", "crash", "fails", "failing", "broken", "stack trace"],
    ),
    (
        BlockerCategory::WaitingExternal,
        &["waiting", "pending approval", "third party", "third-party", "vendor", "support ticket"],
    ),
    (
        BlockerCategory::MissingInfo,
        &["missing", "unknown", "unclear", "need info", "no docs", "credentials"],
    ),
];

/// A failed attempt is closed for retry unless its lessons say another try
/// "might work". Successes and partial results are never closed.
pub fn should_not_retry(attempt: &Attempt) -> bool {
    if attempt.result != AttemptResult::Failure {
        return false;
    }
    match &attempt.lessons_learned {
        Some(lessons) => !lessons.contains(RETRY_HINT),
        None => true,
    }
}

/// Infer a category from the decision's title, reasoning, and alternatives.
/// Falls back to `business-logic` when no keyword matches.
pub fn infer_category(decision: &Decision) -> DecisionCategory {
    let mut text = decision.decision.to_lowercase();
    text.push(' ');
    text.push_str(&decision.reasoning.to_lowercase());
    for alternative in &decision.alternatives_considered {
        text.push(' ');
        text.push_str(&alternative.to_lowercase());
    }

    let words: Vec<&str> = text
        .split(|c: char| !c.is_alphanumeric() && c != '-')
        .filter(|w| !w.is_empty())
        .collect();

    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|kw| words.iter().any(|w| keyword_matches(w, kw))) {
            return *category;
        }
    }
    DecisionCategory::BusinessLogic
}

/// Scan unlabeled text for an `impact: <level>` phrase. Absent or unknown
/// levels are `low`.
pub fn infer_impact(text: &str) -> Impact {
    let lower = text.to_lowercase().replace('*', "");
    let Some(idx) = lower.find("impact:") else {
        return Impact::Low;
    };
    let rest = &lower[idx + "impact:".len()..];
    rest.split_whitespace()
        .next()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .and_then(Impact::from_label)
        .unwrap_or(Impact::Low)
}

/// Classify a blocker: an error message means `error`, otherwise the first
/// keyword table hit, otherwise `needs-decision`.
pub fn infer_blocker_category(description: &str, error_message: Option<&str>) -> BlockerCategory {
    if error_message.is_some_and(|m| !m.trim().is_empty()) {
        return BlockerCategory::Error;
    }
    let lower = description.to_lowercase();
    BLOCKER_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(BlockerCategory::NeedsDecision)
}

fn keyword_matches(word: &str, keyword: &str) -> bool {
    if keyword.len() <= 3 {
        word == keyword
    } else {
        word.starts_with(keyword)
    }
}
