//! Workspace-relative path handling for batch import.
//!
//! Import matches references against the relative paths of the uploaded
//! files, so both sides are reduced to one normalized form: forward slashes,
//! no `.` segments, `..` collapsed against the preceding segment, lower-case.

use percent_encoding::percent_decode_str;
use std::path::Path;

use crate::constants::REFERENCE_EXTENSIONS;
use crate::links::parser::strip_angle_brackets;

/// Normalize a relative path for comparison.
///
/// A `..` with nothing left to pop is dropped, so a reference cannot climb out
/// of the workspace.
///
/// ```rust
/// use diaryx_tree::import::paths::normalize_path;
///
/// assert_eq!(normalize_path(".\\Notes\\Day 1.md"), "notes/day 1.md");
/// assert_eq!(normalize_path("a/./b/../c.md"), "a/c.md");
/// assert_eq!(normalize_path("../outside.md"), "outside.md");
/// ```
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let unified = path.trim().replace('\\', "/");
    let mut segments: Vec<&str> = Vec::new();

    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    segments.join("/").to_lowercase()
}

/// Directory part of a normalized path, empty for top-level files.
#[must_use]
pub fn parent_dir(normalized: &str) -> &str {
    normalized.rfind('/').map_or("", |slash| &normalized[..slash])
}

/// Whether the file name already ends in a Markdown reference extension.
///
/// Other dotted names (`2024.01.05`, `dr. who`) still get the extension
/// candidates.
fn has_markdown_extension(normalized: &str) -> bool {
    let file_name = normalized.rsplit('/').next().unwrap_or(normalized);
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| REFERENCE_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)))
}

/// Candidate normalized paths for a reference target, in lookup order.
///
/// `referencing_path` is the normalized path of the file holding the
/// reference. For each spelling of the target (as written, then
/// percent-decoded) the path relative to the referencing file's directory
/// is tried before the path as given. A leading `/` anchors the target at the
/// workspace root. Targets without a Markdown extension expand to the bare
/// path, then `.md`, then `.markdown`.
#[must_use]
pub fn reference_candidates(target: &str, referencing_path: &str) -> Vec<String> {
    let cleaned = strip_angle_brackets(target);
    if cleaned.is_empty() {
        return Vec::new();
    }

    let mut spellings = vec![cleaned.to_string()];
    if let Ok(decoded) = percent_decode_str(cleaned).decode_utf8() {
        if decoded != cleaned {
            spellings.push(decoded.into_owned());
        }
    }

    let dir = parent_dir(referencing_path);
    let mut candidates: Vec<String> = Vec::new();
    let mut push = |candidate: String| {
        if !candidate.is_empty() && !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    };

    for spelling in &spellings {
        let unified = spelling.replace('\\', "/");
        let bases: Vec<String> = if let Some(rooted) = unified.strip_prefix('/') {
            vec![normalize_path(rooted)]
        } else if dir.is_empty() {
            vec![normalize_path(&unified)]
        } else {
            vec![normalize_path(&format!("{dir}/{unified}")), normalize_path(&unified)]
        };

        for base in bases {
            if base.is_empty() {
                continue;
            }
            let expand = !has_markdown_extension(&base);
            push(base.clone());
            if expand {
                for ext in REFERENCE_EXTENSIONS {
                    push(format!("{base}.{ext}"));
                }
            }
        }
    }

    candidates
}
