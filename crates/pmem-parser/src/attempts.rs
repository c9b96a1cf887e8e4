//! Attempts dialect.
//!
//! ~~~text
//! ## Issue: Port 3000 already in use
//!
//! ### Attempt 1 (Failed)
//! **Approach:** kill process on port 3000
//! ```bash
//! kill -9 $(lsof -t -i:3000)
//! ```
//! Error: permission denied
//! **Lessons Learned:** needs sudo
//! ~~~
//!
//! Issues are split first, then each issue body is split at `### Attempt <n>`
//! headers. Any other heading inside an issue ends the previous attempt
//! without starting a new one.

use pmem_core::{Attempt, AttemptResult};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::dates::parse_record_date;
use crate::fields::{Fields, strip_code_span};
use crate::sections::{Section, lines_of, split_sections};

static ISSUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i:issue):\s*(.+?)\s*$").expect("valid regex"));

/// `Attempt <n>`, an optional `(<result>)`, and an optional `: <approach>`.
static ATTEMPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:attempt)\s+#?(\d+)\s*(?:\(([^)]*)\))?\s*(?:[:\-–]\s*(.*?))?\s*$")
        .expect("valid regex")
});

/// An `## Issue:` section with its issue text.
pub(crate) struct IssueSection<'a> {
    pub issue: &'a str,
    pub section: Section<'a>,
}

/// Level-2 sections whose heading is `Issue: <text>`.
pub(crate) fn issue_sections<'a>(lines: &'a [&'a str]) -> Vec<IssueSection<'a>> {
    split_sections(lines, 2)
        .into_iter()
        .filter_map(|section| {
            let issue = ISSUE_RE.captures(section.heading)?.get(1)?.as_str();
            Some(IssueSection { issue, section })
        })
        .collect()
}

/// Highest attempt number under one issue section, 0 when none.
pub(crate) fn max_attempt_number(body: &[&str]) -> u32 {
    split_sections(body, 3)
        .iter()
        .filter(|s| s.level == 3)
        .filter_map(|s| parse_attempt_heading(s.heading))
        .map(|h| h.number)
        .max()
        .unwrap_or(0)
}

struct AttemptHeading<'a> {
    number: u32,
    outcome: Option<&'a str>,
    trailing: Option<&'a str>,
}

fn parse_attempt_heading(heading: &str) -> Option<AttemptHeading<'_>> {
    let caps = ATTEMPT_RE.captures(heading)?;
    let number = caps.get(1)?.as_str().parse().ok()?;
    Some(AttemptHeading {
        number,
        outcome: caps.get(2).map(|m| m.as_str().trim()),
        trailing: caps
            .get(3)
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty()),
    })
}

/// Map a result phrase onto an outcome. Unrecognized phrases are partial.
fn classify_outcome(raw: &str) -> AttemptResult {
    let lower = raw.to_lowercase();
    if lower.contains("fail") || lower.contains("unsuccess") {
        AttemptResult::Failure
    } else if lower.contains("partial") {
        AttemptResult::Partial
    } else if lower.contains("success") || lower.contains("succeeded") || lower.contains("worked") {
        AttemptResult::Success
    } else {
        AttemptResult::Partial
    }
}

/// Parse an Attempts log into attempts grouped by issue, in document order.
pub fn parse_attempts(text: &str) -> Vec<Attempt> {
    let lines = lines_of(text);
    let mut attempts = Vec::new();

    for IssueSection { issue, section } in issue_sections(&lines) {
        for sub in split_sections(section.body, 3) {
            if sub.level != 3 {
                continue;
            }
            let Some(heading) = parse_attempt_heading(sub.heading) else {
                debug!(issue, heading = %sub.heading, "Dropping non-attempt subsection");
                continue;
            };
            attempts.push(build_attempt(issue, &heading, sub.body));
        }
    }

    debug!(count = attempts.len(), "Parsed attempts");
    attempts
}

fn build_attempt(issue: &str, heading: &AttemptHeading<'_>, body: &[&str]) -> Attempt {
    let fields = Fields::parse(body);

    let result = match heading.outcome {
        Some(outcome) => classify_outcome(outcome),
        None => fields
            .value(&["result", "outcome"])
            .map_or(AttemptResult::Partial, |v| classify_outcome(&v)),
    };
    let approach = fields
        .value(&["approach", "tried"])
        .or_else(|| heading.trailing.map(str::to_string))
        .unwrap_or_default();

    let mut attempt = Attempt::new(issue, heading.number, approach, result);
    attempt.timestamp = fields
        .value(&["date", "timestamp"])
        .and_then(|v| parse_record_date(&v));
    attempt.code_or_command = fields
        .code_blocks
        .first()
        .cloned()
        .or_else(|| fields.value(&["command", "code"]).map(|v| strip_code_span(&v)));
    attempt.error_message = fields
        .error_line
        .clone()
        .or_else(|| fields.value(&["error", "error message"]));
    attempt.lessons_learned = fields.value(&["lessons learned", "lessons", "lesson"]);
    attempt.reevaluate();
    attempt
}

#[cfg(test)]
#[path = "attempts_tests.rs"]
mod tests;
