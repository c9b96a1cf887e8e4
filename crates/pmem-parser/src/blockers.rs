use pmem_core::{Blocker, BlockerCategory, BlockerStatus, infer_blocker_category, stable_id};
use tracing::debug;

use crate::dates::{parse_record_date, split_dated_heading};
use crate::fields::Fields;
use crate::sections::{lines_of, split_sections};

const RESOLVED_MARKER: &str = "status: resolved";

/// Parse a Blockers log: one `## [<date>] - <title>` section per blocker.
pub fn parse_blockers(text: &str) -> Vec<Blocker> {
    let lines = lines_of(text);
    let mut blockers = Vec::new();

    for section in split_sections(&lines, 2) {
        let Some((raw_date, created_at, title)) = split_dated_heading(section.heading) else {
            debug!(section = %section.heading, "Dropping blocker section without date-title heading");
            continue;
        };
        let fields = Fields::parse(section.body);

        let description = fields
            .value(&["description", "details"])
            .unwrap_or_else(|| title.to_string());
        let error_message = fields
            .error_line
            .clone()
            .or_else(|| fields.value(&["error", "error message"]));
        let category = fields
            .value(&["category", "type"])
            .and_then(|v| BlockerCategory::from_label(&v))
            .unwrap_or_else(|| {
                infer_blocker_category(&format!("{title} {description}"), error_message.as_deref())
            });
        let status = if is_resolved(section.body) {
            BlockerStatus::Resolved
        } else {
            BlockerStatus::Active
        };

        blockers.push(Blocker {
            id: stable_id(&[raw_date, title]),
            created_at,
            description,
            category,
            error_message,
            attempts_made: fields.list(&["attempts made", "attempts", "tried"]),
            status,
            resolved_at: fields
                .value(&["resolved at", "resolved on", "resolved"])
                .and_then(|v| parse_record_date(&v)),
            resolution: fields.value(&["resolution"]),
        });
    }

    debug!(count = blockers.len(), "Parsed blockers");
    blockers
}

/// Case-insensitive `status: resolved` anywhere in the body. Bold markers are
/// stripped first, which extends the literal match to the `**Status:** Resolved`
/// field the writer-side dialect uses.
fn is_resolved(body: &[&str]) -> bool {
    body.iter()
        .any(|line| line.to_lowercase().replace("**", "").contains(RESOLVED_MARKER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const LOG: &str = "\
# Blockers

## [2024-01-18] - Stripe webhook signature fails

**Status:** Resolved
**Resolved At:** 2024-01-19
**Resolution:** Used the raw request body
Error: No signatures found matching the expected signature

**Attempts Made:**
- Parsed JSON before verifying
- Rotated the webhook secret

## [2024-01-20] - Waiting on app store review

**Description:** iOS build submitted, review pending

## 2024-01-21 - Pricing tiers

**Category:** needs-decision
";

    #[test]
    fn parses_resolved_blocker() {
        let blockers = parse_blockers(LOG);
        assert_eq!(blockers.len(), 3);

        let b = &blockers[0];
        assert_eq!(b.description, "Stripe webhook signature fails");
        assert_eq!(b.created_at, Utc.with_ymd_and_hms(2024, 1, 18, 0, 0, 0).unwrap());
        assert_eq!(b.status, BlockerStatus::Resolved);
        assert_eq!(b.category, BlockerCategory::Error);
        assert_eq!(
            b.error_message.as_deref(),
            Some("No signatures found matching the expected signature")
        );
        assert_eq!(b.attempts_made.len(), 2);
        assert_eq!(b.resolved_at, Some(Utc.with_ymd_and_hms(2024, 1, 19, 0, 0, 0).unwrap()));
        assert_eq!(b.resolution.as_deref(), Some("Used the raw request body"));
    }

    #[test]
    fn active_by_default_with_inferred_category() {
        let blockers = parse_blockers(LOG);
        let b = &blockers[1];
        assert_eq!(b.status, BlockerStatus::Active);
        assert_eq!(b.description, "iOS build submitted, review pending");
        assert_eq!(b.category, BlockerCategory::WaitingExternal);
        assert!(b.resolved_at.is_none());
    }

    #[test]
    fn explicit_category_label_wins() {
        let blockers = parse_blockers(LOG);
        assert_eq!(blockers[2].category, BlockerCategory::NeedsDecision);
        assert_eq!(blockers[2].status, BlockerStatus::Active);
    }

    #[test]
    fn resolved_marker_is_case_insensitive_plain_text() {
        let text = "## [2024-02-01] - Flaky test\nSTATUS: RESOLVED after retry\n";
        assert_eq!(parse_blockers(text)[0].status, BlockerStatus::Resolved);

        let text = "## [2024-02-01] - Flaky test\n**Status:** still resolving\n";
        assert_eq!(parse_blockers(text)[0].status, BlockerStatus::Active);
    }

    #[test]
    fn undated_heading_is_dropped() {
        let text = "## Flaky test\n**Status:** active\n## [2024-02-02] - Real one\n";
        let blockers = parse_blockers(text);
        assert_eq!(blockers.len(), 1);
        assert_eq!(blockers[0].description, "Real one");
    }
}
