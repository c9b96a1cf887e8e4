use pmem_core::Attempt;
use std::fmt::Write as _;

use crate::lookup::get_failed_attempts;

/// Render the failed attempts for one issue as a prompt block. Empty when
/// nothing has failed for that issue.
pub fn format_for_prompt(issue: &str, attempts: &[Attempt]) -> String {
    let failed = get_failed_attempts(issue, attempts);
    if failed.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let _ = writeln!(out, "## Previous failed attempts for: {}", issue.trim());
    for (idx, attempt) in failed.iter().enumerate() {
        let _ = writeln!(out, "\n{}. {}", idx + 1, attempt.approach);
        if let Some(code) = &attempt.code_or_command {
            for line in code.lines() {
                let _ = writeln!(out, "   > {line}");
            }
        }
        if let Some(error) = &attempt.error_message {
            let _ = writeln!(out, "   Error: {error}");
        }
        if let Some(lessons) = &attempt.lessons_learned {
            let _ = writeln!(out, "   Lesson: {lessons}");
        }
        if attempt.should_not_retry {
            out.push_str("   Do not retry this approach.\n");
        }
    }
    out
}
