//! Note data model consumed by the resolution core.
//!
//! A [`Note`] is one Diaryx document: an identity, its decoded frontmatter
//! ([`NoteMetadata`]), the Markdown body and the file name it was loaded
//! from. The resolution core only ever reads notes; trees and import
//! results refer to them instead of copying or mutating them.
//!
//! # Frontmatter Format
//!
//! ```markdown
//! ---
//! title: Project Ideas
//! author: Ada
//! created: 2024-05-01T09:00:00Z
//! updated: 2024-05-02T10:30:00Z
//! visibility: private
//! format: "[CommonMark (Markdown)](https://spec.commonmark.org/0.31.2/)"
//! reachable: "[Project Ideas](./ideas.md)"
//! part_of: "[Home](../index.md)"
//! contents:
//!   - "[Garden](garden.md)"
//!   - "<side projects.md>"
//! aliases: [ideas, someday]
//! ---
//! ```
//!
//! Linking fields (`contents`, `part_of`, `aliases`) may be written as a
//! single string or a list. Both shapes are kept as a [`MetadataValue`] at
//! the boundary and flattened by [`crate::links::normalize_list`] before any
//! resolution step looks at them.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::links::normalize_list;

/// Frontmatter keys every Diaryx note is expected to carry.
pub const REQUIRED_FIELDS: &[&str] =
    &["title", "author", "created", "updated", "visibility", "format", "reachable"];

/// A loosely-typed metadata value: one string or an ordered list of strings.
///
/// Deserialization is permissive. Numbers and booleans become their string
/// form, nulls inside lists are dropped and nested mappings are kept as their
/// YAML rendering, so that malformed frontmatter degrades instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataValue {
    /// A single string value (may still contain several newline-separated entries)
    Single(String),
    /// A list of values in declaration order
    Many(Vec<String>),
}

impl MetadataValue {
    /// Convert an arbitrary YAML value into a metadata value.
    #[must_use]
    pub fn from_yaml(value: &serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Sequence(items) => {
                Self::Many(items.iter().filter_map(yaml_to_text).collect())
            }
            serde_yaml::Value::Tagged(tagged) => Self::from_yaml(&tagged.value),
            other => match yaml_to_text(other) {
                Some(text) => Self::Single(text),
                None => Self::Many(Vec::new()),
            },
        }
    }

    /// The canonical "ordered list of raw entries" view of this value.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        normalize_list(Some(self))
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<Vec<String>> for MetadataValue {
    fn from(value: Vec<String>) -> Self {
        Self::Many(value)
    }
}

impl<'de> Deserialize<'de> for MetadataValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_yaml::Value::deserialize(deserializer)?;
        Ok(Self::from_yaml(&value))
    }
}

impl Serialize for MetadataValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Single(value) => serializer.serialize_str(value),
            Self::Many(values) => values.serialize(serializer),
        }
    }
}

/// Render a scalar YAML value as text. Nulls yield `None`.
fn yaml_to_text(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Null => None,
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Tagged(tagged) => yaml_to_text(&tagged.value),
        other => serde_yaml::to_string(other).ok().map(|s| s.trim().to_string()),
    }
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(yaml_to_text))
}

/// Decoded Diaryx frontmatter.
///
/// The required Diaryx keys and the three linking keys are typed fields;
/// everything else lands in [`extra`](Self::extra) unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteMetadata {
    /// Human-readable title, also used as a lookup key for title-style links.
    #[serde(default, deserialize_with = "deserialize_text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Author name(s).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<MetadataValue>,

    /// Creation timestamp, kept as written.
    #[serde(default, deserialize_with = "deserialize_text", skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,

    /// Last-update timestamp, kept as written.
    #[serde(default, deserialize_with = "deserialize_text", skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,

    /// Audience(s) the note is visible to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<MetadataValue>,

    /// Content format reference.
    #[serde(default, deserialize_with = "deserialize_text", skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Location the note can be reached at.
    #[serde(default, deserialize_with = "deserialize_text", skip_serializing_if = "Option::is_none")]
    pub reachable: Option<String>,

    /// Children of this note, in declaration order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<MetadataValue>,

    /// Candidate parents of this note; the first resolvable one wins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of: Option<MetadataValue>,

    /// Alternate titles usable as link targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<MetadataValue>,

    /// Any other frontmatter keys.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl NoteMetadata {
    /// Raw `contents` entries in declaration order.
    #[must_use]
    pub fn contents_entries(&self) -> Vec<String> {
        normalize_list(self.contents.as_ref())
    }

    /// Raw `part_of` entries in declaration order.
    #[must_use]
    pub fn part_of_entries(&self) -> Vec<String> {
        normalize_list(self.part_of.as_ref())
    }

    /// Alias entries in declaration order.
    #[must_use]
    pub fn alias_entries(&self) -> Vec<String> {
        normalize_list(self.aliases.as_ref())
    }

    /// Whether a frontmatter key is present (typed or extra).
    #[must_use]
    pub fn has_field(&self, key: &str) -> bool {
        match key {
            "title" => self.title.is_some(),
            "author" => self.author.is_some(),
            "created" => self.created.is_some(),
            "updated" => self.updated.is_some(),
            "visibility" => self.visibility.is_some(),
            "format" => self.format.is_some(),
            "reachable" => self.reachable.is_some(),
            "contents" => self.contents.is_some(),
            "part_of" => self.part_of.is_some(),
            "aliases" => self.aliases.is_some(),
            other => self.extra.contains_key(other),
        }
    }

    /// Required keys that are absent, in the order given.
    #[must_use]
    pub fn missing_fields<S: AsRef<str>>(&self, required: &[S]) -> Vec<String> {
        required
            .iter()
            .map(AsRef::as_ref)
            .filter(|key| !self.has_field(key))
            .map(str::to_string)
            .collect()
    }
}

/// One Diaryx document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Note {
    /// Opaque identifier, unique within one resolution pass.
    pub id: String,
    /// Decoded frontmatter.
    pub metadata: NoteMetadata,
    /// Markdown body without the frontmatter block.
    pub body: String,
    /// File path or name the note was loaded from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
}

impl Note {
    /// Create an empty note with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set the source file name.
    #[must_use]
    pub fn with_source_name(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = Some(source_name.into());
        self
    }

    /// Replace the metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: NoteMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Replace the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Title if present, then the body's first `# ` heading, then the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.metadata
            .title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .or_else(|| self.first_heading())
            .unwrap_or(&self.id)
    }

    /// Text of the first level-one ATX heading in the body.
    #[must_use]
    pub fn first_heading(&self) -> Option<&str> {
        self.body
            .lines()
            .find_map(|line| line.trim_start().strip_prefix("# "))
            .map(str::trim)
            .filter(|heading| !heading.is_empty())
    }
}
