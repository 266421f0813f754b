//! Markdown note parsing.
//!
//! Diaryx notes are plain Markdown files with an optional YAML frontmatter
//! block delimited by `---` lines:
//!
//! ```markdown
//! ---
//! title: "Garden Journal"
//! author: Sam
//! contents:
//!   - "[Spring](<garden/spring planting.md>)"
//!   - garden/summer.md
//! part_of: "[Home](index.md)"
//! ---
//!
//! # Garden Journal
//!
//! Notes from the allotment.
//! ```
//!
//! The tree builder and importer only need the decoded metadata, the body
//! and the name the note was loaded from. Producing those from raw text is
//! the job of a [`NoteParser`]; [`FrontmatterParser`] is the default
//! implementation used by the importer and the CLI.
//!
//! # Error Handling
//!
//! - Frontmatter that is not valid YAML yields
//!   [`DiaryxError::FrontmatterParseError`].
//! - Valid YAML that is not a mapping, or a mapping whose keys cannot be
//!   decoded, yields [`DiaryxError::InvalidFrontmatter`].
//! - A file without frontmatter is not an error: it parses to a note with
//!   empty metadata whose body is the whole text.

pub mod frontmatter;

pub use frontmatter::FrontmatterParser;

use std::path::Path;

use crate::core::DiaryxError;
use crate::note::Note;

/// Turns raw file text into a [`Note`].
///
/// Implementations must be independent per call: the importer invokes
/// `parse_note` concurrently for different files.
pub trait NoteParser: Send + Sync {
    /// Parse `text` loaded from `source_name` (a workspace-relative path).
    fn parse_note(&self, text: &str, source_name: &str) -> Result<Note, DiaryxError>;
}

/// Whether `path` has one of the given extensions (case-insensitive, no dot).
pub fn has_markdown_extension<S: AsRef<str>>(path: &str, extensions: &[S]) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| ext.eq_ignore_ascii_case(allowed.as_ref())))
}
