//! Lookup-key generation for link targets.
//!
//! Targets are written inconsistently: with or without the `.md` extension,
//! with percent-encoded spaces, in any letter case. Both sides of a lookup
//! (indexed file names and searched targets) go through
//! [`normalize_variants`], so a match only needs one shared variant.

use percent_encoding::percent_decode_str;

use super::parser::strip_angle_brackets;

/// Every plausible lookup key for one raw target.
///
/// 1. angle brackets stripped, trimmed, lower-cased
/// 2. the percent-decoded form, lower-cased (skipped if decoding fails)
/// 3. for each of the above ending in `.md`, the form without the suffix
///
/// The result is a set in generation order: no duplicates, most literal key
/// first. An input that trims to empty yields no variants.
///
/// ```rust
/// use diaryx_tree::links::normalize_variants;
///
/// let variants = normalize_variants("Notes/Intro.MD");
/// assert!(variants.contains(&"notes/intro.md".to_string()));
/// assert!(variants.contains(&"notes/intro".to_string()));
/// ```
#[must_use]
pub fn normalize_variants(target: &str) -> Vec<String> {
    let cleaned = strip_angle_brackets(target);
    if cleaned.is_empty() {
        return Vec::new();
    }

    let mut variants: Vec<String> = Vec::with_capacity(4);
    let mut push = |value: String| {
        if !value.is_empty() && !variants.contains(&value) {
            variants.push(value);
        }
    };

    let lowered = cleaned.to_lowercase();
    let decoded = percent_decode_str(cleaned).decode_utf8().ok().map(|d| d.to_lowercase());

    push(lowered.clone());
    if let Some(decoded) = &decoded {
        push(decoded.clone());
    }

    for base in std::iter::once(&lowered).chain(decoded.as_ref()) {
        if let Some(stem) = base.strip_suffix(".md") {
            push(stem.to_string());
        }
    }

    variants
}

/// Lower-cased, trimmed form used for titles and aliases.
#[must_use]
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_strip_extension_case_insensitively() {
        let variants = normalize_variants("Notes/Intro.MD");
        assert_eq!(variants, vec!["notes/intro.md", "notes/intro"]);
    }

    #[test]
    fn test_variants_include_percent_decoded_form() {
        let variants = normalize_variants("My%20Note.md");
        assert_eq!(variants, vec!["my%20note.md", "my note.md", "my%20note", "my note"]);
    }

    #[test]
    fn test_invalid_utf8_escape_is_skipped() {
        let variants = normalize_variants("bad%FF.md");
        assert_eq!(variants, vec!["bad%ff.md", "bad%ff"]);
    }

    #[test]
    fn test_angle_brackets_and_whitespace() {
        let variants = normalize_variants("  <Side Projects.md>  ");
        assert_eq!(variants, vec!["side projects.md", "side projects"]);
    }

    #[test]
    fn test_empty_target_has_no_variants() {
        assert!(normalize_variants("   ").is_empty());
        assert!(normalize_variants("<>").is_empty());
    }

    #[test]
    fn test_target_without_extension() {
        assert_eq!(normalize_variants("Garden"), vec!["garden"]);
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("  Project Ideas "), "project ideas");
    }
}
