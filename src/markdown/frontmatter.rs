//! YAML frontmatter parser.

use gray_matter::{Matter, Pod, engine::Engine};
use std::fmt::Debug;
use tracing::debug;

use super::NoteParser;
use crate::core::DiaryxError;
use crate::note::{Note, NoteMetadata};

/// gray_matter engine that hands back the frontmatter text unparsed.
///
/// Decoding is done with serde_yaml afterwards so that malformed YAML can be
/// reported with the file name instead of being swallowed by the splitter.
struct RawFrontmatter;

impl Engine for RawFrontmatter {
    fn parse(content: &str) -> Result<Pod, gray_matter::Error> {
        Ok(Pod::String(content.to_string()))
    }
}

/// Default [`NoteParser`]: `---` delimited YAML frontmatter plus Markdown body.
///
/// The note's `id` and `source_name` are both the given source name, so ids
/// are unique whenever source paths are.
///
/// ```rust
/// use diaryx_tree::markdown::{FrontmatterParser, NoteParser};
///
/// let parser = FrontmatterParser::new();
/// let note = parser
///     .parse_note("---\ntitle: Home\ncontents: day.md\n---\n\nWelcome\n", "index.md")
///     .unwrap();
///
/// assert_eq!(note.id, "index.md");
/// assert_eq!(note.metadata.title.as_deref(), Some("Home"));
/// assert_eq!(note.metadata.contents_entries(), vec!["day.md"]);
/// ```
pub struct FrontmatterParser {
    raw_matter: Matter<RawFrontmatter>,
}

impl Debug for FrontmatterParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrontmatterParser").finish()
    }
}

impl Clone for FrontmatterParser {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl Default for FrontmatterParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrontmatterParser {
    /// Create a new frontmatter parser.
    pub fn new() -> Self {
        Self {
            raw_matter: Matter::new(),
        }
    }

    /// Split text into raw frontmatter (if any) and body.
    fn split(&self, text: &str) -> (Option<String>, String) {
        match self.raw_matter.parse::<String>(text) {
            Ok(parsed) => (parsed.data.filter(|raw| !raw.trim().is_empty()), parsed.content),
            Err(_) => (None, text.to_string()),
        }
    }

    /// Decode raw frontmatter text into typed metadata.
    fn decode(raw: &str, source_name: &str) -> Result<NoteMetadata, DiaryxError> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(raw).map_err(|e| DiaryxError::FrontmatterParseError {
                file: source_name.to_string(),
                reason: e.to_string(),
            })?;

        match value {
            serde_yaml::Value::Null => Ok(NoteMetadata::default()),
            serde_yaml::Value::Mapping(_) => {
                serde_yaml::from_value(value).map_err(|e| DiaryxError::InvalidFrontmatter {
                    file: source_name.to_string(),
                    reason: e.to_string(),
                })
            }
            other => Err(DiaryxError::InvalidFrontmatter {
                file: source_name.to_string(),
                reason: format!("expected a mapping, found {}", yaml_kind(&other)),
            }),
        }
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a list",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}

impl NoteParser for FrontmatterParser {
    fn parse_note(&self, text: &str, source_name: &str) -> Result<Note, DiaryxError> {
        let (raw, body) = self.split(text);

        let metadata = match raw {
            Some(raw) => Self::decode(&raw, source_name)?,
            None => {
                debug!("No frontmatter in '{}'", source_name);
                NoteMetadata::default()
            }
        };

        Ok(Note::new(source_name)
            .with_source_name(source_name)
            .with_metadata(metadata)
            .with_body(body))
    }
}
