//! Heading-delimited section splitting.

/// A heading and the lines up to the next heading of the same or higher rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    /// Number of leading `#` characters.
    pub level: usize,
    /// Heading text with the `#` marker and surrounding whitespace removed.
    pub heading: &'a str,
    /// Index of the heading line within the input lines.
    pub start: usize,
    /// Index one past the last body line.
    pub end: usize,
    pub body: &'a [&'a str],
}

/// Split `text` at headings of level `1..=max_level`.
///
/// Text before the first qualifying heading is discarded. Deeper headings
/// stay in the body. Lines inside fenced code blocks are never headings.
pub fn split_sections<'a>(lines: &'a [&'a str], max_level: usize) -> Vec<Section<'a>> {
    let mut sections = Vec::new();
    let mut current: Option<(usize, &'a str, usize)> = None;
    let mut in_fence = false;

    for (idx, line) in lines.iter().enumerate() {
        if is_fence(line) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        let Some((level, heading)) = heading_of(line) else {
            continue;
        };
        if level > max_level {
            continue;
        }
        if let Some((lvl, head, start)) = current.take() {
            sections.push(make_section(lines, lvl, head, start, idx));
        }
        current = Some((level, heading, idx));
    }

    if let Some((lvl, head, start)) = current {
        sections.push(make_section(lines, lvl, head, start, lines.len()));
    }
    sections
}

/// Collect the lines of a document with line endings stripped.
pub fn lines_of(text: &str) -> Vec<&str> {
    text.lines().collect()
}

/// Return `(level, text)` when `line` is an ATX heading: 1-6 `#` followed by
/// whitespace.
pub fn heading_of(line: &str) -> Option<(usize, &str)> {
    let trimmed = line.trim_start();
    let level = trimmed.chars().take_while(|&c| c == '#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &trimmed[level..];
    if !(rest.starts_with(' ') || rest.starts_with('\t')) {
        return None;
    }
    Some((level, rest.trim()))
}

pub fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with("```")
}

fn make_section<'a>(
    lines: &'a [&'a str],
    level: usize,
    heading: &'a str,
    start: usize,
    end: usize,
) -> Section<'a> {
    Section {
        level,
        heading,
        start,
        end,
        body: &lines[start + 1..end],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_level_two_and_drops_preamble() {
        let text = "intro line\n## First\na\n### Sub\nb\n## Second\nc\n";
        let lines = lines_of(text);
        let sections = split_sections(&lines, 2);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading, "First");
        assert_eq!(sections[0].body, &["a", "### Sub", "b"]);
        assert_eq!(sections[1].heading, "Second");
        assert_eq!(sections[1].start, 5);
        assert_eq!(sections[1].end, 7);
    }

    #[test]
    fn headings_inside_fences_are_ignored() {
        let text = "## Real\n```bash\n## not a heading\n```\nafter\n";
        let lines = lines_of(text);
        let sections = split_sections(&lines, 2);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].body.len(), 4);
    }

    #[test]
    fn heading_requires_space_after_hashes() {
        assert_eq!(heading_of("##NoSpace"), None);
        assert_eq!(heading_of("  ## Indented  "), Some((2, "Indented")));
        assert_eq!(heading_of("####### too deep"), None);
    }

    #[test]
    fn empty_input_yields_no_sections() {
        let lines = lines_of("");
        assert!(split_sections(&lines, 2).is_empty());
    }
}
