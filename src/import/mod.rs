//! Batch import of a folder of Markdown files.
//!
//! The importer takes an ordered list of files with their workspace-relative
//! paths (for example a bulk folder upload) and produces the parsed notes in
//! structural order, root containers first and their contents following,
//! together with itemized diagnostics. Nothing here fails the whole batch: a
//! file that cannot be read or parsed is reported in
//! [`ImportResult::errors`] and left out.
//!
//! # Pipeline
//!
//! 1. **Classify**: files whose extension is not a configured Markdown
//!    extension are skipped ([`SkipReason::NotMarkdown`]).
//! 2. **Deduplicate**: the first file with a given normalized path wins;
//!    later ones are skipped ([`SkipReason::DuplicatePath`]).
//! 3. **Read and parse**: files are read and handed to a [`NoteParser`],
//!    up to [`DiaryxConfig::parallelism`] at a time. Results are merged in
//!    input order.
//! 4. **Resolve**: each `contents` entry is matched against the known paths
//!    using [`paths::reference_candidates`]. Misses are recorded in
//!    [`ImportResult::unresolved`]. `part_of` entries are resolved the same
//!    way but only decide which notes are roots.
//! 5. **Order**: depth-first from every root candidate (a note with
//!    `contents` and no resolvable `part_of`) in discovery order, then every
//!    note not yet reached, in input order.
//!
//! # Example
//!
//! ```rust,no_run
//! use diaryx_tree::config::DiaryxConfig;
//! use diaryx_tree::import::{BatchImporter, ImportInput, MemoryFile};
//!
//! # async fn example() {
//! let inputs = vec![
//!     ImportInput::new(MemoryFile::new("---\ntitle: Day\n---\n"), "journal/day.md"),
//!     ImportInput::new(MemoryFile::new("---\ncontents: day.md\n---\n"), "journal/index.md"),
//! ];
//!
//! let result = BatchImporter::new(DiaryxConfig::default()).import(inputs).await;
//! assert_eq!(result.roots, vec!["journal/index.md"]);
//! assert_eq!(result.notes[0].id, "journal/index.md");
//! # }
//! ```

pub mod paths;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::config::DiaryxConfig;
use crate::core::DiaryxError;
use crate::links::{format_link, parse_link};
use crate::markdown::{FrontmatterParser, NoteParser, has_markdown_extension};
use crate::note::{MetadataValue, Note};
use paths::{normalize_path, reference_candidates};

/// Source of one file's text.
pub trait ImportFile: Send + Sync {
    /// Read the whole file as UTF-8 text.
    fn read_text(&self) -> impl Future<Output = Result<String, DiaryxError>> + Send;
}

/// A file on the local filesystem.
#[derive(Debug, Clone)]
pub struct DiskFile {
    path: PathBuf,
}

impl DiskFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }
}

impl ImportFile for DiskFile {
    async fn read_text(&self) -> Result<String, DiaryxError> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| DiaryxError::FileReadError {
            file: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// A file whose content is already in memory, such as an uploaded blob.
#[derive(Debug, Clone)]
pub struct MemoryFile {
    content: Result<String, String>,
}

impl MemoryFile {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            content: Ok(text.into()),
        }
    }

    /// A file that fails to read with the given reason.
    pub fn unreadable(reason: impl Into<String>) -> Self {
        Self {
            content: Err(reason.into()),
        }
    }
}

impl ImportFile for MemoryFile {
    async fn read_text(&self) -> Result<String, DiaryxError> {
        self.content.clone().map_err(|reason| DiaryxError::FileReadError {
            file: "in-memory file".to_string(),
            reason,
        })
    }
}

/// One file handed to the importer.
#[derive(Debug, Clone)]
pub struct ImportInput<F> {
    pub file: F,
    /// Path relative to the workspace root, as supplied by the caller.
    pub relative_path: String,
}

impl<F> ImportInput<F> {
    pub fn new(file: F, relative_path: impl Into<String>) -> Self {
        Self {
            file,
            relative_path: relative_path.into(),
        }
    }
}

/// Why a file was left out without being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Extension is not a Markdown extension.
    NotMarkdown,
    /// Another file with the same normalized path came first.
    DuplicatePath,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub relative_path: String,
    pub reason: SkipReason,
}

/// A file that could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileError {
    pub relative_path: String,
    pub message: String,
}

/// A `contents` entry that matched no imported file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedReference {
    /// Relative path of the note holding the reference.
    pub parent: String,
    /// The reference target as written.
    pub target: String,
}

/// Required frontmatter keys absent from one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingFields {
    pub relative_path: String,
    pub fields: Vec<String>,
}

/// Outcome of one batch import.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportResult {
    /// Parsed notes in traversal order.
    pub notes: Vec<Note>,
    /// Relative paths of the root candidates, as supplied.
    pub roots: Vec<String>,
    pub errors: Vec<FileError>,
    pub unresolved: Vec<UnresolvedReference>,
    pub skipped: Vec<SkippedFile>,
    /// Warnings only; these notes are still imported.
    pub missing_fields: Vec<MissingFields>,
}

/// A parsed note and the paths it is known by.
struct ImportedNote {
    normalized: String,
    relative_path: String,
    note: Note,
}

/// Runs the import pipeline with a given parser and configuration.
#[derive(Debug, Clone)]
pub struct BatchImporter<P = FrontmatterParser> {
    parser: P,
    config: DiaryxConfig,
}

impl BatchImporter<FrontmatterParser> {
    /// Importer using the YAML frontmatter parser.
    pub fn new(config: DiaryxConfig) -> Self {
        Self::with_parser(FrontmatterParser::new(), config)
    }
}

impl<P: NoteParser> BatchImporter<P> {
    pub fn with_parser(parser: P, config: DiaryxConfig) -> Self {
        Self {
            parser,
            config,
        }
    }

    /// Import an ordered batch of files.
    pub async fn import<F: ImportFile>(&self, inputs: Vec<ImportInput<F>>) -> ImportResult {
        let mut result = ImportResult::default();
        let extensions = self.config.extensions();

        // Classification and duplicate detection stay in input order.
        let mut seen: HashSet<String> = HashSet::new();
        let mut accepted: Vec<(String, ImportInput<F>)> = Vec::new();
        for input in inputs {
            if !has_markdown_extension(&input.relative_path, &extensions) {
                debug!("Skipping non-Markdown file '{}'", input.relative_path);
                result.skipped.push(SkippedFile {
                    relative_path: input.relative_path,
                    reason: SkipReason::NotMarkdown,
                });
                continue;
            }

            let normalized = normalize_path(&input.relative_path);
            if seen.insert(normalized.clone()) {
                accepted.push((normalized, input));
            } else {
                debug!("Skipping duplicate path '{}'", input.relative_path);
                result.skipped.push(SkippedFile {
                    relative_path: input.relative_path,
                    reason: SkipReason::DuplicatePath,
                });
            }
        }

        // `buffered` yields in input order regardless of completion order.
        let parser = &self.parser;
        let outcomes: Vec<(String, String, Result<Note, DiaryxError>)> =
            stream::iter(accepted.into_iter().map(|(normalized, input)| async move {
                let outcome = match input.file.read_text().await {
                    Ok(text) => parser.parse_note(&text, &input.relative_path),
                    Err(e) => Err(e),
                };
                (normalized, input.relative_path, outcome)
            }))
            .buffered(self.config.parallelism())
            .collect()
            .await;

        let mut imported: Vec<ImportedNote> = Vec::with_capacity(outcomes.len());
        for (normalized, relative_path, outcome) in outcomes {
            match outcome {
                Ok(note) => {
                    let missing = note.metadata.missing_fields(&self.config.required_fields);
                    if !missing.is_empty() {
                        result.missing_fields.push(MissingFields {
                            relative_path: relative_path.clone(),
                            fields: missing,
                        });
                    }
                    imported.push(ImportedNote {
                        normalized,
                        relative_path,
                        note,
                    });
                }
                Err(e) => {
                    warn!("Failed to import '{}': {}", relative_path, e);
                    result.errors.push(FileError {
                        relative_path,
                        message: e.to_string(),
                    });
                }
            }
        }

        let (children, root_candidates) = resolve_references(&imported, &mut result.unresolved);

        let order = traversal_order(&root_candidates, &children);

        result.roots =
            root_candidates.iter().map(|&i| imported[i].relative_path.clone()).collect();

        let mut slots: Vec<Option<Note>> = imported.into_iter().map(|entry| Some(entry.note)).collect();
        result.notes = order.into_iter().filter_map(|i| slots[i].take()).collect();

        info!(
            "Imported {} notes ({} roots, {} errors, {} unresolved, {} skipped)",
            result.notes.len(),
            result.roots.len(),
            result.errors.len(),
            result.unresolved.len(),
            result.skipped.len()
        );

        result
    }
}

/// Resolve `contents` edges and pick root candidates.
fn resolve_references(
    imported: &[ImportedNote],
    unresolved: &mut Vec<UnresolvedReference>,
) -> (Vec<Vec<usize>>, Vec<usize>) {
    let path_index: HashMap<&str, usize> = imported
        .iter()
        .enumerate()
        .map(|(i, entry)| (entry.normalized.as_str(), i))
        .collect();
    let lookup = |target: &str, from: &str| -> Option<usize> {
        reference_candidates(target, from)
            .iter()
            .find_map(|candidate| path_index.get(candidate.as_str()).copied())
    };

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); imported.len()];
    let mut root_candidates: Vec<usize> = Vec::new();

    for (i, entry) in imported.iter().enumerate() {
        let contents = entry.note.metadata.contents_entries();

        for raw in &contents {
            let link = parse_link(raw);
            match lookup(&link.target, &entry.normalized) {
                Some(child) => {
                    if child != i && !children[i].contains(&child) {
                        children[i].push(child);
                    }
                }
                None => {
                    debug!("Unresolved contents entry '{}' in '{}'", raw, entry.relative_path);
                    unresolved.push(UnresolvedReference {
                        parent: entry.relative_path.clone(),
                        target: link.target,
                    });
                }
            }
        }

        let contained = entry.note.metadata.part_of_entries().iter().any(|raw| {
            lookup(&parse_link(raw).target, &entry.normalized).is_some_and(|parent| parent != i)
        });

        if !contents.is_empty() && !contained {
            root_candidates.push(i);
        }
    }

    (children, root_candidates)
}

/// Pre-order walk from each root, then every unvisited index in order.
fn traversal_order(roots: &[usize], children: &[Vec<usize>]) -> Vec<usize> {
    let mut visited = vec![false; children.len()];
    let mut order = Vec::with_capacity(children.len());

    for &root in roots {
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            if visited[current] {
                continue;
            }
            visited[current] = true;
            order.push(current);
            stack.extend(children[current].iter().rev().filter(|&&child| !visited[child]));
        }
    }

    for (i, seen) in visited.iter().enumerate() {
        if !seen {
            order.push(i);
        }
    }

    order
}

/// Rewrite `contents` and `part_of` targets to the source name of the note
/// they resolve to under the import rules.
///
/// The tree builder matches targets against whole source names, so a
/// directory-relative reference such as `day.md` inside `journal/index.md`
/// only resolves once it is anchored to `journal/day.md`. Entries that match
/// no file are kept as written, so a title or alias match is still possible.
#[must_use]
pub fn anchor_references(notes: &[Note]) -> Vec<Note> {
    let mut known: HashMap<String, &str> = HashMap::new();
    for source in notes.iter().filter_map(|note| note.source_name.as_deref()) {
        known.entry(normalize_path(source)).or_insert(source);
    }

    notes
        .iter()
        .map(|note| {
            let Some(source) = note.source_name.as_deref() else {
                return note.clone();
            };
            let from = normalize_path(source);

            let anchor = |value: Option<&MetadataValue>| -> Option<MetadataValue> {
                let entries = value?.entries();
                let rewritten = entries
                    .into_iter()
                    .map(|raw| {
                        let link = parse_link(&raw);
                        reference_candidates(&link.target, &from)
                            .iter()
                            .find_map(|candidate| known.get(candidate.as_str()))
                            .map_or(raw, |path| format_link(&link.label, path))
                    })
                    .collect();
                Some(MetadataValue::Many(rewritten))
            };

            let mut anchored = note.clone();
            anchored.metadata.contents = anchor(note.metadata.contents.as_ref());
            anchored.metadata.part_of = anchor(note.metadata.part_of.as_ref());
            anchored
        })
        .collect()
}

/// Import with the default parser and configuration.
pub async fn import_batch<F: ImportFile>(inputs: Vec<ImportInput<F>>) -> ImportResult {
    BatchImporter::new(DiaryxConfig::default()).import(inputs).await
}
