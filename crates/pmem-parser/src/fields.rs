//! Labeled-field extraction from a section body.
//!
//! Lines are classified one at a time and fed through a small state machine:
//! a `**Label:**` line opens a field, bullets and plain text attach to the
//! open field, fenced code is captured separately, and an `Error:` line is
//! recorded wherever it appears.

use regex::Regex;
use std::sync::LazyLock;

use crate::sections::is_fence;

/// `**Label:** value` or `**Label**: value`, optionally bulleted.
static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[-*+]\s+)?\*\*([^*]+?)(?::\*\*|\*\*:)\s*(.*)$").expect("valid regex")
});

static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*+]|\d+[.)])\s+(.*)$").expect("valid regex"));

/// One labeled field and whatever followed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Field {
    /// Lowercased label with inner whitespace collapsed.
    pub label: String,
    /// Text on the label line after the colon.
    pub inline: String,
    /// Bullet items following the label.
    pub items: Vec<String>,
    /// Non-bullet lines following the label.
    pub text: Vec<String>,
}

impl Field {
    /// Inline value plus continuation lines, trimmed. None when empty.
    pub fn value(&self) -> Option<String> {
        let mut parts: Vec<&str> = Vec::new();
        if !self.inline.trim().is_empty() {
            parts.push(self.inline.trim());
        }
        parts.extend(self.text.iter().map(|t| t.trim()).filter(|t| !t.is_empty()));
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n"))
        }
    }

    /// Bullet items, or the inline value split on commas when no bullets
    /// were given.
    pub fn list(&self) -> Vec<String> {
        if !self.items.is_empty() {
            return self.items.clone();
        }
        self.inline
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// All fields of one section body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    fields: Vec<Field>,
    /// Contents of fenced code blocks, in order.
    pub code_blocks: Vec<String>,
    /// Text after the first line beginning with `Error:`.
    pub error_line: Option<String>,
}

#[derive(Debug)]
enum LineKind<'a> {
    Fence,
    Label { label: &'a str, value: &'a str },
    Error(&'a str),
    Bullet(&'a str),
    Blank,
    Text(&'a str),
}

fn classify_line(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if is_fence(trimmed) {
        return LineKind::Fence;
    }
    if let Some(rest) = trimmed.strip_prefix("Error:") {
        return LineKind::Error(rest.trim());
    }
    if let Some(caps) = LABEL_RE.captures(trimmed) {
        if let (Some(label), Some(value)) = (caps.get(1), caps.get(2)) {
            return LineKind::Label {
                label: label.as_str(),
                value: value.as_str(),
            };
        }
    }
    if let Some(caps) = BULLET_RE.captures(trimmed) {
        if let Some(item) = caps.get(1) {
            return LineKind::Bullet(item.as_str());
        }
    }
    LineKind::Text(trimmed)
}

impl Fields {
    pub fn parse(lines: &[&str]) -> Self {
        let mut out = Self::default();
        let mut current: Option<Field> = None;
        let mut code: Option<Vec<&str>> = None;

        for &line in lines {
            if let Some(buf) = code.as_mut() {
                if is_fence(line) {
                    out.code_blocks.push(buf.join("\n"));
                    code = None;
                } else {
                    buf.push(line);
                }
                continue;
            }

            match classify_line(line) {
                LineKind::Fence => code = Some(Vec::new()),
                LineKind::Label { label, value } => {
                    if let Some(done) = current.take() {
                        out.fields.push(done);
                    }
                    current = Some(Field {
                        label: normalize_label(label),
                        inline: value.trim().to_string(),
                        ..Field::default()
                    });
                }
                LineKind::Error(message) => {
                    if out.error_line.is_none() && !message.is_empty() {
                        out.error_line = Some(message.to_string());
                    }
                }
                LineKind::Bullet(item) => {
                    if let Some(field) = current.as_mut() {
                        field.items.push(item.trim().to_string());
                    }
                }
                LineKind::Text(text) => {
                    if let Some(field) = current.as_mut() {
                        match field.items.last_mut() {
                            Some(last) => {
                                last.push(' ');
                                last.push_str(text);
                            }
                            None => field.text.push(text.to_string()),
                        }
                    }
                }
                LineKind::Blank => {}
            }
        }

        // An unclosed fence still yields its contents.
        if let Some(buf) = code {
            out.code_blocks.push(buf.join("\n"));
        }
        if let Some(done) = current {
            out.fields.push(done);
        }
        out
    }

    /// First field whose label is any of `labels` (already lowercase).
    pub fn get(&self, labels: &[&str]) -> Option<&Field> {
        labels
            .iter()
            .find_map(|wanted| self.fields.iter().find(|f| f.label == *wanted))
    }

    pub fn value(&self, labels: &[&str]) -> Option<String> {
        self.get(labels).and_then(Field::value)
    }

    pub fn list(&self, labels: &[&str]) -> Vec<String> {
        self.get(labels).map(Field::list).unwrap_or_default()
    }
}

fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Interpret yes/no style values. None when the value is neither.
pub fn parse_flag(value: &str) -> Option<bool> {
    let lower = value.trim().to_lowercase();
    let word = lower
        .split(|c: char| c.is_whitespace() || c == ',' || c == '.' || c == '(')
        .next()
        .unwrap_or("");
    match word {
        "yes" | "y" | "true" | "approved" | "✓" | "✅" => Some(true),
        "no" | "n" | "false" | "rejected" | "✗" | "❌" => Some(false),
        _ => None,
    }
}

/// Remove surrounding backticks and whitespace from a path-like value.
pub fn strip_code_span(value: &str) -> String {
    value.trim().trim_matches('`').trim().to_string()
}
