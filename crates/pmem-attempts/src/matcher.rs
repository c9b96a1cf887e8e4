//! Word-set similarity between a proposed approach and recorded attempts.

use pmem_config::MatcherConfig;
use pmem_core::{Attempt, AttemptResult, IssueHash};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// Outcome of [`has_been_tried`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriedCheck {
    pub already_tried: bool,
    pub previous_attempt: Option<Attempt>,
    /// Empty when there is nothing to say.
    pub recommendation: String,
}

impl TriedCheck {
    fn not_tried(recommendation: String) -> Self {
        Self {
            already_tried: false,
            previous_attempt: None,
            recommendation,
        }
    }
}

/// Lowercased words of `text` that pass the length and stop-word filters.
/// Punctuation around a word is not part of it.
pub fn word_set(text: &str, config: &MatcherConfig) -> BTreeSet<String> {
    text.split_whitespace()
        .map(|raw| {
            raw.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|word| word.chars().count() >= config.min_word_len)
        .filter(|word| !config.stop_words.iter().any(|stop| stop == word))
        .collect()
}

/// Jaccard index of two sets. Two empty sets score 0.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Check whether `proposed` repeats an attempt already recorded for `issue`.
///
/// Only attempts in the same issue group are compared. The first candidate
/// scoring strictly above the threshold decides: a closed failure means
/// "don't", a success means "reuse". Otherwise any lessons learned in the
/// group come back as advice.
pub fn has_been_tried(
    issue: &str,
    proposed: &str,
    attempts: &[Attempt],
    config: &MatcherConfig,
) -> TriedCheck {
    let hash = IssueHash::of(issue);
    let group: Vec<&Attempt> = attempts.iter().filter(|a| a.issue_hash == hash).collect();
    let proposed_words = word_set(proposed, config);

    for candidate in &group {
        let score = jaccard(&proposed_words, &word_set(&candidate.approach, config));
        if score <= config.similarity_threshold {
            continue;
        }
        debug!(issue = %hash, attempt = %candidate.id, score, "Approach matches recorded attempt");
        match candidate.result {
            AttemptResult::Failure if candidate.should_not_retry => {
                return TriedCheck {
                    already_tried: true,
                    previous_attempt: Some((*candidate).clone()),
                    recommendation: failure_recommendation(candidate),
                };
            }
            AttemptResult::Success => {
                return TriedCheck {
                    already_tried: true,
                    previous_attempt: Some((*candidate).clone()),
                    recommendation: format!(
                        "This approach already worked: \"{}\". Reuse it.",
                        candidate.approach
                    ),
                };
            }
            _ => {}
        }
    }

    let lessons: Vec<&str> = group
        .iter()
        .filter_map(|a| a.lessons_learned.as_deref())
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lessons.is_empty() {
        TriedCheck::not_tried(String::new())
    } else {
        TriedCheck::not_tried(format!("Lessons from previous attempts: {}", lessons.join("; ")))
    }
}

fn failure_recommendation(attempt: &Attempt) -> String {
    let mut text = format!("This approach already failed: \"{}\".", attempt.approach);
    if let Some(error) = &attempt.error_message {
        text.push_str(&format!(" Error: {error}."));
    }
    text.push_str(" Try something different.");
    text
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
