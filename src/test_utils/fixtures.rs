//! Test fixtures for creating sample notes and workspaces
//!
//! [`NoteFixture`] builds [`Note`] values directly for tree tests;
//! [`MarkdownFixture`] renders a Markdown file with frontmatter that can be
//! written into a temporary workspace for import and CLI tests.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::note::{MetadataValue, Note, NoteMetadata};

fn to_values(entries: &[&str]) -> MetadataValue {
    MetadataValue::Many(entries.iter().map(|entry| (*entry).to_string()).collect())
}

/// Builder for in-memory notes
#[derive(Clone, Debug, Default)]
pub struct NoteFixture {
    id: String,
    source_name: Option<String>,
    metadata: NoteMetadata,
    body: String,
}

impl NoteFixture {
    /// Start a note with the given id and empty metadata
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }

    pub fn source(mut self, source_name: &str) -> Self {
        self.source_name = Some(source_name.to_string());
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.metadata.title = Some(title.to_string());
        self
    }

    pub fn aliases(mut self, aliases: &[&str]) -> Self {
        self.metadata.aliases = Some(to_values(aliases));
        self
    }

    pub fn contents(mut self, entries: &[&str]) -> Self {
        self.metadata.contents = Some(to_values(entries));
        self
    }

    /// `contents` written as one newline-separated string
    pub fn contents_text(mut self, text: &str) -> Self {
        self.metadata.contents = Some(MetadataValue::Single(text.to_string()));
        self
    }

    pub fn part_of(mut self, entries: &[&str]) -> Self {
        self.metadata.part_of = Some(to_values(entries));
        self
    }

    pub fn body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    pub fn build(self) -> Note {
        let mut note = Note::new(self.id).with_metadata(self.metadata).with_body(self.body);
        note.source_name = self.source_name;
        note
    }
}

/// Test fixture for creating sample Markdown files
#[derive(Clone, Debug)]
pub struct MarkdownFixture {
    pub path: String,
    pub content: String,
}

impl MarkdownFixture {
    /// A file with the given raw content, frontmatter included if any
    pub fn raw(path: &str, content: &str) -> Self {
        Self {
            path: path.to_string(),
            content: content.to_string(),
        }
    }

    /// A note with a title and optional hierarchy fields
    pub fn note(path: &str, title: &str, contents: &[&str], part_of: &[&str]) -> Self {
        let mut frontmatter = format!("---\ntitle: {}\n", quote(title));
        push_list(&mut frontmatter, "contents", contents);
        push_list(&mut frontmatter, "part_of", part_of);
        frontmatter.push_str("---\n");

        Self {
            path: path.to_string(),
            content: format!("{frontmatter}\n# {title}\n\nSome notes about {title}.\n"),
        }
    }

    /// A note carrying every required metadata field
    pub fn complete(path: &str, title: &str, contents: &[&str]) -> Self {
        let mut frontmatter = format!(
            "---\ntitle: {}\nauthor: Test Author\ncreated: 2024-01-01T00:00:00Z\n\
             updated: 2024-01-02T00:00:00Z\nvisibility: public\nformat: markdown\nreachable: yes\n",
            quote(title)
        );
        push_list(&mut frontmatter, "contents", contents);
        frontmatter.push_str("---\n");

        Self {
            path: path.to_string(),
            content: format!("{frontmatter}\nBody of {title}.\n"),
        }
    }

    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let file_path = dir.join(&self.path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file_path, &self.content)?;
        Ok(file_path)
    }
}

// JSON strings are valid double-quoted YAML scalars.
fn quote(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{value}\""))
}

fn push_list(frontmatter: &mut String, key: &str, entries: &[&str]) {
    if entries.is_empty() {
        return;
    }
    frontmatter.push_str(key);
    frontmatter.push_str(":\n");
    for entry in entries {
        frontmatter.push_str("  - ");
        frontmatter.push_str(&quote(entry));
        frontmatter.push('\n');
    }
}
