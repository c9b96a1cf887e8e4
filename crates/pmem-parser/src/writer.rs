//! Rendering records back into the markdown dialects the parsers read.

use pmem_core::{Attempt, AttemptResult, Decision, IssueHash, MemoryError};
use std::fmt::Write as _;
use tracing::debug;

use crate::attempts::{issue_sections, max_attempt_number};
use crate::dates::format_record_date;
use crate::sections::lines_of;

const ATTEMPTS_TITLE: &str = "# Attempts";

fn outcome_label(result: AttemptResult) -> &'static str {
    match result {
        AttemptResult::Success => "Success",
        AttemptResult::Failure => "Failed",
        AttemptResult::Partial => "Partial",
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Collapse a value onto one line.
fn one_line(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Render one `### Attempt <n>` block, ending with a newline.
pub fn render_attempt(number: u32, attempt: &Attempt) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "### Attempt {number} ({})", outcome_label(attempt.result));
    if let Some(ts) = &attempt.timestamp {
        let _ = writeln!(out, "**Date:** {}", format_record_date(ts));
    }
    let _ = writeln!(out, "**Approach:** {}", one_line(&attempt.approach));
    if let Some(code) = &attempt.code_or_command {
        let _ = writeln!(out, "```\n{}\n```", code.trim_end());
    }
    if let Some(error) = &attempt.error_message {
        let _ = writeln!(out, "Error: {}", one_line(error));
    }
    if let Some(lessons) = &attempt.lessons_learned {
        let _ = writeln!(out, "**Lessons Learned:** {}", one_line(lessons));
    }
    out
}

fn validate_attempt(attempt: &Attempt) -> Result<(), MemoryError> {
    let invalid = |reason: &str| MemoryError::InvalidRecord {
        kind: "attempt",
        reason: reason.to_string(),
    };
    if attempt.issue.trim().is_empty() {
        return Err(invalid("issue is empty"));
    }
    if attempt.issue.contains(['\n', '\r']) {
        return Err(invalid("issue spans more than one line"));
    }
    if attempt.approach.trim().is_empty() {
        return Err(invalid("approach is empty"));
    }
    if attempt
        .code_or_command
        .as_deref()
        .is_some_and(|code| code.lines().any(|l| l.trim_start().starts_with("```")))
    {
        return Err(invalid("code contains a fence line"));
    }
    Ok(())
}

/// Append `attempt` to an Attempts document.
///
/// The attempt goes under the existing `## Issue:` section with the same
/// issue hash, numbered after the highest attempt there. Without a match a
/// new issue section is added at the end.
pub fn append_attempt(existing: &str, attempt: &Attempt) -> Result<String, MemoryError> {
    validate_attempt(attempt)?;

    let target = IssueHash::of(&attempt.issue);
    let lines = lines_of(existing);
    let issues = issue_sections(&lines);

    if let Some(found) = issues
        .iter()
        .find(|s| IssueHash::of(s.issue) == target)
    {
        let number = max_attempt_number(found.section.body)
            .checked_add(1)
            .ok_or_else(|| MemoryError::InvalidRecord {
                kind: "attempt",
                reason: "attempt number overflows".to_string(),
            })?;
        debug!(issue = %target, number, "Appending attempt to existing issue");

        let mut head_end = found.section.end;
        while head_end > found.section.start + 1 && lines[head_end - 1].trim().is_empty() {
            head_end -= 1;
        }

        let mut out = String::new();
        for line in &lines[..head_end] {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&render_attempt(number, attempt));
        if found.section.end < lines.len() {
            out.push('\n');
            for line in &lines[found.section.end..] {
                out.push_str(line);
                out.push('\n');
            }
        }
        return Ok(out);
    }

    debug!(issue = %target, "Appending new issue section");
    let mut out = existing.trim_end().to_string();
    if out.is_empty() {
        out.push_str(ATTEMPTS_TITLE);
    }
    let _ = write!(
        out,
        "\n\n## Issue: {}\n\n{}",
        attempt.issue.trim(),
        render_attempt(1, attempt)
    );
    Ok(out)
}

/// Render one `## <date> - <title>` decision section, ending with a newline.
pub fn render_decision(decision: &Decision) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "## {} - {}\n",
        format_record_date(&decision.timestamp),
        one_line(&decision.decision)
    );
    let _ = writeln!(out, "**Category:** {}", decision.category);
    let _ = writeln!(out, "**Impact:** {}", decision.impact);
    let _ = writeln!(out, "**Made By:** {}", decision.made_by);
    let _ = writeln!(out, "**User Approved:** {}", yes_no(decision.user_approved));
    let _ = writeln!(out, "**Reversible:** {}", yes_no(decision.reversible));
    if !decision.reasoning.trim().is_empty() {
        let _ = writeln!(out, "**Reasoning:** {}", one_line(&decision.reasoning));
    }
    if !decision.alternatives_considered.is_empty() {
        out.push_str("\n**Alternatives Considered:**\n");
        for alt in &decision.alternatives_considered {
            let _ = writeln!(out, "- {}", one_line(alt));
        }
    }
    if !decision.related_files.is_empty() {
        out.push_str("\n**Related Files:**\n");
        for file in &decision.related_files {
            let _ = writeln!(out, "- `{file}`");
        }
    }
    out
}
