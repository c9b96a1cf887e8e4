//! Deterministic grouping keys and record ids.
//!
//! Neither value is security relevant: collisions only merge two attempt
//! groups, so short SHA-256 prefixes are used.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Hex characters kept from the digest for an issue hash.
pub const ISSUE_HASH_LEN: usize = 8;

/// Hex characters kept from the digest for a record id.
pub const RECORD_ID_LEN: usize = 12;

/// Grouping key for free-text issue descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueHash(String);

impl IssueHash {
    /// Hash an issue after lowercasing and trimming surrounding whitespace.
    pub fn of(issue: &str) -> Self {
        let normalized = normalize_issue(issue);
        Self(hex_prefix(normalized.as_bytes(), ISSUE_HASH_LEN))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IssueHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn normalize_issue(issue: &str) -> String {
    issue.trim().to_lowercase()
}

/// Stable id over an ordered list of parts, joined with `|`.
pub fn stable_id(parts: &[&str]) -> String {
    hex_prefix(parts.join("|").as_bytes(), RECORD_ID_LEN)
}

fn hex_prefix(input: &[u8], len: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    let digest = format!("{:x}", hasher.finalize());
    digest[..len].to_string()
}
