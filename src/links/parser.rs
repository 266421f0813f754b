//! Parsing and formatting of single metadata references.
//!
//! A reference in `contents` or `part_of` is either a Markdown link
//! (`[Label](target.md)`, optionally `[Label](<target with spaces.md>)`) or a
//! bare target (`target.md`, `<target with spaces.md>`). Parsing never fails;
//! input that does not look like a link is taken as a bare target.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

use crate::note::MetadataValue;

/// A parsed metadata reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentLink {
    /// The original string as written in the frontmatter.
    pub raw: String,
    /// Display text. Defaults to the target when the link has no label.
    pub label: String,
    /// Lookup string with surrounding angle brackets removed.
    pub target: String,
}

fn markdown_link_regex() -> Option<&'static Regex> {
    static LINK: OnceLock<Option<Regex>> = OnceLock::new();
    LINK.get_or_init(|| {
        // Single line only: `[label](target)` or `[label](<target>)`. Labels may
        // escape `]` and `\`; bare targets may hold one level of balanced parens.
        Regex::new(r"^\[((?:[^\]\\\n]|\\.)*)\]\((<[^>\n]*>|(?:[^()\n]|\([^()\n]*\))*)\)$").ok()
    })
    .as_ref()
}

/// Strip one pair of wrapping angle brackets, then trim.
pub(crate) fn strip_angle_brackets(value: &str) -> &str {
    let trimmed = value.trim();
    trimmed
        .strip_prefix('<')
        .and_then(|inner| inner.strip_suffix('>'))
        .map_or(trimmed, str::trim)
}

fn unescape_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut chars = label.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next @ ('\\' | '[' | ']')) => out.push(next),
                Some(next) => {
                    out.push(c);
                    out.push(next);
                }
                None => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn escape_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for c in label.chars() {
        if matches!(c, '\\' | '[' | ']') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Parse one raw reference into a [`ContentLink`].
///
/// # Examples
///
/// ```rust
/// use diaryx_tree::links::parse_link;
///
/// let link = parse_link("[Intro](<notes/intro page.md>)");
/// assert_eq!(link.label, "Intro");
/// assert_eq!(link.target, "notes/intro page.md");
///
/// let bare = parse_link("  child.md ");
/// assert_eq!(bare.label, "child.md");
/// assert_eq!(bare.target, "child.md");
/// ```
#[must_use]
pub fn parse_link(raw: &str) -> ContentLink {
    let trimmed = raw.trim();

    let (label, target) = match markdown_link_regex().and_then(|regex| regex.captures(trimmed)) {
        Some(caps) => {
            let label = unescape_label(caps.get(1).map_or("", |m| m.as_str()).trim());
            let target = strip_angle_brackets(caps.get(2).map_or("", |m| m.as_str()));
            (label, target)
        }
        None => {
            let target = strip_angle_brackets(trimmed);
            (target.to_string(), target)
        }
    };

    let label = if label.is_empty() { target.to_string() } else { label };

    ContentLink {
        raw: raw.to_string(),
        label,
        target: target.to_string(),
    }
}

/// Build a reference string from a label and a target.
///
/// The target is wrapped in angle brackets when it contains whitespace, or
/// when the plain form would not parse back (nested parentheses). A blank
/// label is replaced by the target. `[`, `]` and `\`
/// in the label are backslash-escaped so [`parse_link`] reads it back.
///
/// ```rust
/// use diaryx_tree::links::format_link;
///
/// assert_eq!(format_link("Intro", "intro.md"), "[Intro](intro.md)");
/// assert_eq!(format_link("", "has space.md"), "[has space.md](<has space.md>)");
/// assert_eq!(format_link("[draft] Notes", "notes(1).md"), r"[\[draft\] Notes](notes(1).md)");
/// ```
#[must_use]
pub fn format_link(label: &str, target: &str) -> String {
    let target = target.trim();
    let label = escape_label(if label.trim().is_empty() { target } else { label.trim() });

    let plain = format!("[{label}]({target})");
    let round_trips = || parse_link(&plain).target == target;
    if target.chars().any(char::is_whitespace) || !round_trips() {
        format!("[{label}](<{target}>)")
    } else {
        plain
    }
}

/// Flatten a metadata value into an ordered list of raw entries.
///
/// Strings are split on newlines; list elements are each split and the
/// pieces flattened. Entries are trimmed and empty entries dropped.
#[must_use]
pub fn normalize_list(value: Option<&MetadataValue>) -> Vec<String> {
    let split = |text: &str| -> Vec<String> {
        text.lines().map(str::trim).filter(|line| !line.is_empty()).map(str::to_string).collect()
    };

    match value {
        None => Vec::new(),
        Some(MetadataValue::Single(text)) => split(text),
        Some(MetadataValue::Many(items)) => items.iter().flat_map(|item| split(item)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_markdown_link() {
        let link = parse_link("[Intro](intro.md)");
        assert_eq!(link.raw, "[Intro](intro.md)");
        assert_eq!(link.label, "Intro");
        assert_eq!(link.target, "intro.md");
    }

    #[test]
    fn test_parse_link_with_empty_label() {
        let link = parse_link("[](notes/a.md)");
        assert_eq!(link.label, "notes/a.md");
        assert_eq!(link.target, "notes/a.md");
    }

    #[test]
    fn test_parse_link_with_angle_target() {
        let link = parse_link("[Side](<side projects (old).md>)");
        assert_eq!(link.label, "Side");
        assert_eq!(link.target, "side projects (old).md");
    }

    #[test]
    fn test_parse_bare_targets() {
        let link = parse_link("  plain-target.md  ");
        assert_eq!(link.raw, "  plain-target.md  ");
        assert_eq!(link.target, "plain-target.md");
        assert_eq!(link.label, "plain-target.md");

        let link = parse_link("<has space.md>");
        assert_eq!(link.target, "has space.md");
        assert_eq!(link.label, "has space.md");
    }

    #[test]
    fn test_malformed_link_degrades_to_bare_target() {
        let link = parse_link("[Broken](missing-paren.md");
        assert_eq!(link.target, "[Broken](missing-paren.md");

        let link = parse_link("[a](b.md) trailing");
        assert_eq!(link.target, "[a](b.md) trailing");
    }

    #[test]
    fn test_parse_link_with_parenthesized_target() {
        let link = parse_link("[Notes](notes(1).md)");
        assert_eq!(link.label, "Notes");
        assert_eq!(link.target, "notes(1).md");

        let link = parse_link("[Deep](a(b(c)).md)");
        assert_eq!(link.target, "[Deep](a(b(c)).md)");
    }

    #[test]
    fn test_parse_link_with_escaped_label() {
        let link = parse_link(r"[\[draft\] Notes](draft.md)");
        assert_eq!(link.label, "[draft] Notes");
        assert_eq!(link.target, "draft.md");

        let link = parse_link(r"[C:\Users](c.md)");
        assert_eq!(link.label, r"C:\Users");
    }

    #[test]
    fn test_format_link() {
        assert_eq!(format_link("Intro", "intro.md"), "[Intro](intro.md)");
        assert_eq!(format_link("  ", "intro.md"), "[intro.md](intro.md)");
        assert_eq!(format_link("Has", "has space.md"), "[Has](<has space.md>)");
        assert_eq!(format_link("N", "notes(1).md"), "[N](notes(1).md)");
        assert_eq!(format_link("Deep", "a(b(c)).md"), "[Deep](<a(b(c)).md>)");
    }

    #[test]
    fn test_format_then_parse_keeps_target() {
        for raw in [
            "[Intro](intro.md)",
            "plain-target.md",
            "<has space.md>",
            "notes(1).md",
            "[Notes](notes(1).md)",
            r"[\[draft\] Notes](draft.md)",
            r"[back\\slash](b.md)",
            "<a(b(c)).md>",
        ] {
            let parsed = parse_link(raw);
            let reparsed = parse_link(&format_link(&parsed.label, &parsed.target));
            assert_eq!(reparsed.target, parsed.target, "target changed for {raw}");
            assert_eq!(reparsed.label, parsed.label, "label changed for {raw}");
        }
    }

    #[test]
    fn test_normalize_list_single_string() {
        let value = MetadataValue::Single("a.md\n\n  b.md  \n".to_string());
        assert_eq!(normalize_list(Some(&value)), vec!["a.md", "b.md"]);
    }

    #[test]
    fn test_normalize_list_flattens_list_entries() {
        let value = MetadataValue::Many(vec![
            "a.md\nb.md".to_string(),
            "   ".to_string(),
            "c.md".to_string(),
        ]);
        assert_eq!(normalize_list(Some(&value)), vec!["a.md", "b.md", "c.md"]);
        assert!(normalize_list(None).is_empty());
    }
}
