//! diaryx-tree - note hierarchy resolution for Diaryx workspaces
//!
//! Diaryx notes are Markdown files whose YAML frontmatter links them into a
//! hierarchy: a note lists its children in `contents` and may name its
//! container in `part_of`, either as Markdown links (`[Label](path.md)`) or as
//! bare targets. These references are written loosely: with or without the
//! extension, percent-encoded, in any letter case, by title or alias instead
//! of by file name. This crate turns such a flat, loosely linked collection
//! into a consistent forest.
//!
//! # Architecture Overview
//!
//! ```text
//! files ──► markdown::NoteParser ──► Vec<Note> ──► tree::build_tree ──► NoteTree
//!   │                                   ▲
//!   └────────► import::BatchImporter ───┘  (ordered notes + diagnostics)
//! ```
//!
//! - Resolution is pure: [`tree::build_tree`] borrows the notes, never fails
//!   and returns the same tree for the same input.
//! - Every note gets at most one parent. The first note to claim a child in
//!   its `contents` wins, `part_of` only fills in where no claim exists, and
//!   an edge that would close a cycle is dropped.
//! - The batch importer isolates per-file failures and reports them next to
//!   the result instead of aborting.
//!
//! # Core Modules
//!
//! - [`note`] - The note and metadata data model
//! - [`links`] - Reference parsing, formatting and lookup-key normalization
//! - [`tree`] - Reference index and tree builder
//! - [`import`] - Batch import with directory-relative resolution
//! - [`markdown`] - Frontmatter parsing collaborator
//!
//! ## Supporting Modules
//! - [`cli`] - Command-line interface for the `diaryx-tree` binary
//! - [`config`] - User configuration (`~/.diaryx/config.toml`)
//! - [`core`] - Error types and user-facing error reporting
//! - [`utils`] - Workspace discovery on disk
//!
//! # Example
//!
//! ```rust
//! use diaryx_tree::markdown::{FrontmatterParser, NoteParser};
//! use diaryx_tree::tree::build_tree;
//!
//! let parser = FrontmatterParser::new();
//! let notes = vec![
//!     parser.parse_note("---\ntitle: Home\ncontents:\n  - \"[Garden](garden.md)\"\n---\n", "index.md").unwrap(),
//!     parser.parse_note("---\ntitle: Garden\n---\nTomatoes.\n", "garden.md").unwrap(),
//! ];
//!
//! let tree = build_tree(&notes);
//! assert_eq!(tree.roots, vec!["index.md"]);
//! assert_eq!(tree.parent("garden.md"), Some("index.md"));
//! print!("{}", tree.format_tree(None));
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! diaryx-tree tree ~/journal --depth 3
//! diaryx-tree import ~/journal --format json
//! ```

// Resolution core
pub mod links;
pub mod note;
pub mod tree;

// Collaborators
pub mod import;
pub mod markdown;

// Supporting modules
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
