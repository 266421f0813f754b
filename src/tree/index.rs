//! Reference index used to resolve links to note ids.
//!
//! The index is built once per resolution pass and dropped with it; nothing
//! is cached between passes. Both maps apply the same tie-break: the first
//! note (in input order) to claim a key keeps it, later claims are ignored.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::links::{ContentLink, normalize_title, normalize_variants};
use crate::note::Note;

/// Lookup tables from normalized keys to note ids.
#[derive(Debug, Default)]
pub struct ReferenceIndex<'a> {
    /// Normalized `source_name` variant → note id
    href_index: HashMap<String, &'a str>,
    /// Normalized title or alias → note id
    title_index: HashMap<String, &'a str>,
}

impl<'a> ReferenceIndex<'a> {
    /// Index every note's source name, title and aliases in one pass.
    ///
    /// Within one note the title is inserted before its aliases, so a title
    /// wins over an alias of the same spelling on that note.
    #[must_use]
    pub fn build(notes: &'a [Note]) -> Self {
        let mut index = Self::default();

        for note in notes {
            let id = note.id.as_str();

            if let Some(source_name) = note.source_name.as_deref() {
                for variant in normalize_variants(source_name) {
                    claim(&mut index.href_index, variant, id);
                }
            }

            if let Some(title) = note.metadata.title.as_deref() {
                claim(&mut index.title_index, normalize_title(title), id);
            }

            for alias in note.metadata.alias_entries() {
                claim(&mut index.title_index, normalize_title(&alias), id);
            }
        }

        index
    }

    /// Resolve a parsed link to a note id.
    ///
    /// Every variant of the link target is tried against the file-name index
    /// first; only if none matches is the label tried against titles and
    /// aliases. `None` means the reference is unresolved.
    #[must_use]
    pub fn resolve(&self, link: &ContentLink) -> Option<&'a str> {
        self.resolve_href(&link.target).or_else(|| self.resolve_title(&link.label))
    }

    /// Look up a target against indexed file names only.
    #[must_use]
    pub fn resolve_href(&self, target: &str) -> Option<&'a str> {
        normalize_variants(target).iter().find_map(|variant| self.href_index.get(variant).copied())
    }

    /// Look up a label against indexed titles and aliases only.
    #[must_use]
    pub fn resolve_title(&self, label: &str) -> Option<&'a str> {
        let key = normalize_title(label);
        if key.is_empty() {
            return None;
        }
        self.title_index.get(&key).copied()
    }
}

fn claim<'a>(map: &mut HashMap<String, &'a str>, key: String, id: &'a str) {
    if key.is_empty() {
        return;
    }
    if let Entry::Vacant(slot) = map.entry(key) {
        slot.insert(id);
    }
}
