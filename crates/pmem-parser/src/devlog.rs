use pmem_core::{DevlogEntry, FileChange, SessionStatus, TaskSize};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::dates::split_dated_heading;
use crate::fields::{Fields, strip_code_span};
use crate::sections::{lines_of, split_sections};

/// `` `path` - what changed ``
static FILE_CHANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^`([^`]+)`\s*[-–:]\s*(.*)$").expect("valid regex"));

/// Parse a Devlog: one `## [<date>] - <title>` section per session.
pub fn parse_devlog(text: &str) -> Vec<DevlogEntry> {
    let lines = lines_of(text);
    let mut entries = Vec::new();

    for section in split_sections(&lines, 2) {
        let Some((_, date, title)) = split_dated_heading(section.heading) else {
            debug!(section = %section.heading, "Dropping devlog section without date-title heading");
            continue;
        };
        let fields = Fields::parse(section.body);

        entries.push(DevlogEntry {
            date,
            title: title.to_string(),
            session_id: fields
                .value(&["session id", "session"])
                .map(|v| strip_code_span(&v)),
            task_size: fields
                .value(&["task size", "size"])
                .and_then(|v| TaskSize::from_label(&v))
                .unwrap_or(TaskSize::Medium),
            status: fields
                .value(&["status"])
                .and_then(|v| SessionStatus::from_label(&v))
                .unwrap_or(SessionStatus::Completed),
            what_was_done: fields.list(&["what was done", "done", "completed"]),
            files_changed: fields
                .list(&["files changed", "files"])
                .iter()
                .filter_map(|item| parse_file_change(item))
                .collect(),
            decisions_made: fields.list(&["decisions made", "decisions"]),
            next_steps: fields.list(&["next steps", "next"]),
        });
    }

    debug!(count = entries.len(), "Parsed devlog entries");
    entries
}

/// A bare backticked path with no description is kept with an empty change.
fn parse_file_change(item: &str) -> Option<FileChange> {
    let item = item.trim();
    if let Some(caps) = FILE_CHANGE_RE.captures(item) {
        return Some(FileChange {
            path: caps.get(1)?.as_str().trim().to_string(),
            change: caps.get(2).map_or("", |m| m.as_str()).trim().to_string(),
        });
    }
    if item.starts_with('`') && item.ends_with('`') && item.len() > 2 {
        return Some(FileChange {
            path: strip_code_span(item),
            change: String::new(),
        });
    }
    debug!(item, "Skipping file change without backticked path");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const LOG: &str = "\
# Devlog

## [2024-01-15 14:00] - Auth flow

**Session:** `sess-42`
**Task Size:** large
**Status:** in-progress

**What Was Done:**
- Added credentials provider
- Wired session callback

**Files Changed:**
- `src/auth.ts` - new NextAuth config
- `prisma/schema.prisma` - added Account model
- not a path entry

**Decisions Made:**
- Use JWT sessions

**Next Steps:**
- Add OAuth providers

## [2024-01-16] - Billing page

**What Was Done:** scaffolded page
";

    #[test]
    fn parses_full_entry() {
        let entries = parse_devlog(LOG);
        assert_eq!(entries.len(), 2);

        let e = &entries[0];
        assert_eq!(e.title, "Auth flow");
        assert_eq!(e.date, Utc.with_ymd_and_hms(2024, 1, 15, 14, 0, 0).unwrap());
        assert_eq!(e.session_id.as_deref(), Some("sess-42"));
        assert_eq!(e.task_size, TaskSize::Large);
        assert_eq!(e.status, SessionStatus::InProgress);
        assert_eq!(e.what_was_done, vec!["Added credentials provider", "Wired session callback"]);
        assert_eq!(
            e.files_changed,
            vec![
                FileChange {
                    path: "src/auth.ts".into(),
                    change: "new NextAuth config".into()
                },
                FileChange {
                    path: "prisma/schema.prisma".into(),
                    change: "added Account model".into()
                },
            ]
        );
        assert_eq!(e.decisions_made, vec!["Use JWT sessions"]);
        assert_eq!(e.next_steps, vec!["Add OAuth providers"]);
    }

    #[test]
    fn sparse_entry_gets_defaults() {
        let entries = parse_devlog(LOG);
        let e = &entries[1];
        assert_eq!(e.task_size, TaskSize::Medium);
        assert_eq!(e.status, SessionStatus::Completed);
        assert!(e.session_id.is_none());
        assert_eq!(e.what_was_done, vec!["scaffolded page"]);
        assert!(e.files_changed.is_empty());
    }

    #[test]
    fn bare_path_keeps_empty_change() {
        assert_eq!(
            parse_file_change("`README.md`"),
            Some(FileChange {
                path: "README.md".into(),
                change: String::new()
            })
        );
        assert_eq!(parse_file_change("README.md - docs"), None);
    }

    #[test]
    fn undated_sections_are_dropped() {
        assert!(parse_devlog("## Session notes\n**Status:** completed\n").is_empty());
    }
}
