//! Note tree construction.
//!
//! [`build_tree`] turns an ordered, flat list of notes into a forest using
//! the notes' own linking metadata:
//!
//! 1. Build a [`ReferenceIndex`] and remember each note's input position.
//! 2. Resolve every `contents` entry into (parent, child) candidates in
//!    discovery order, remembering each child's declaration position under
//!    that parent. Self references and unresolved entries are dropped.
//! 3. Assign parents from the candidates: the first claim on a child wins.
//! 4. Notes still without a parent take the first `part_of` entry that
//!    resolves to another note. This never overrides step 3.
//! 5. Materialize `children` from the final assignments.
//! 6. Order children by declaration position under their parent, then by
//!    input position; order roots by input position.
//!
//! An edge whose parent is already a descendant of the child is refused in
//! steps 3 and 4, so the result is always a forest: for `A → B → A` the
//! edge discovered first survives and the later one is dropped.
//!
//! The builder only borrows the notes; the tree is a disposable view that is
//! rebuilt from scratch on every call.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, info, warn};

use super::index::ReferenceIndex;
use crate::links::{ContentLink, parse_link};
use crate::note::Note;

/// One note in the tree together with its resolved structure.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode<'a> {
    /// The wrapped note.
    pub note: &'a Note,
    /// Child ids in display order.
    pub children: Vec<&'a str>,
    /// Parsed `contents` entries, including unresolved ones.
    pub content_links: Vec<ContentLink>,
    /// Assigned parent, `None` for roots.
    pub parent_id: Option<&'a str>,
}

/// The resolved forest of notes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteTree<'a> {
    /// Ids of notes with no resolvable parent, in input order.
    pub roots: Vec<&'a str>,
    /// Every note's node, keyed by id.
    pub nodes_by_id: HashMap<&'a str, TreeNode<'a>>,
    /// Child id → parent id. At most one entry per child.
    pub parent_by_id: HashMap<&'a str, &'a str>,
}

/// Build a [`NoteTree`] from an ordered note collection.
///
/// This never fails: references that resolve to nothing, to the note itself
/// or to a note that already has a parent are silently dropped. Notes with a
/// duplicate id are ignored after the first occurrence.
///
/// # Examples
///
/// ```rust
/// use diaryx_tree::note::{MetadataValue, Note, NoteMetadata};
/// use diaryx_tree::tree::build_tree;
///
/// let root = Note::new("root").with_metadata(NoteMetadata {
///     contents: Some(MetadataValue::Many(vec!["[Child](child.md)".to_string()])),
///     ..Default::default()
/// });
/// let child = Note::new("c1").with_source_name("child.md");
///
/// let notes = vec![root, child];
/// let tree = build_tree(&notes);
///
/// assert_eq!(tree.roots, vec!["root"]);
/// assert_eq!(tree.nodes_by_id["root"].children, vec!["c1"]);
/// ```
#[must_use]
pub fn build_tree(notes: &[Note]) -> NoteTree<'_> {
    let index = ReferenceIndex::build(notes);

    let mut order_index: HashMap<&str, usize> = HashMap::new();
    let mut unique: Vec<&Note> = Vec::with_capacity(notes.len());
    for note in notes {
        match order_index.entry(note.id.as_str()) {
            Entry::Occupied(_) => {
                warn!("Ignoring note with duplicate id '{}'", note.id);
            }
            Entry::Vacant(slot) => {
                slot.insert(unique.len());
                unique.push(note);
            }
        }
    }

    // Step 2: contents candidates
    let mut content_links: HashMap<&str, Vec<ContentLink>> = HashMap::new();
    let mut candidates: Vec<(&str, &str)> = Vec::new();
    let mut declared: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut declared_position: HashMap<(&str, &str), usize> = HashMap::new();

    for note in &unique {
        let parent = note.id.as_str();
        let links: Vec<ContentLink> =
            note.metadata.contents_entries().iter().map(|entry| parse_link(entry)).collect();

        for (position, link) in links.iter().enumerate() {
            let Some(child) = index.resolve(link) else {
                debug!("Unresolved contents entry '{}' in '{}'", link.raw, parent);
                continue;
            };
            if child == parent {
                continue;
            }
            if let Entry::Vacant(slot) = declared_position.entry((parent, child)) {
                slot.insert(position);
                declared.entry(parent).or_default().push(child);
                candidates.push((parent, child));
            }
        }

        content_links.insert(parent, links);
    }

    // Step 3: first declaring parent wins
    let mut parent_by_id: HashMap<&str, &str> = HashMap::new();
    for &(parent, child) in &candidates {
        if parent_by_id.contains_key(child) {
            debug!("'{}' already has a parent, dropping claim from '{}'", child, parent);
            continue;
        }
        if creates_cycle(&parent_by_id, parent, child) {
            debug!("Dropping contents edge '{}' → '{}': it would close a cycle", parent, child);
            continue;
        }
        parent_by_id.insert(child, parent);
    }

    // Step 4: part_of fallback
    let mut fallback: Vec<(&str, &str)> = Vec::new();
    for note in &unique {
        let child = note.id.as_str();
        if parent_by_id.contains_key(child) {
            continue;
        }

        for entry in note.metadata.part_of_entries() {
            let link = parse_link(&entry);
            let Some(parent) = index.resolve(&link) else {
                debug!("Unresolved part_of entry '{}' in '{}'", link.raw, child);
                continue;
            };
            if parent == child {
                continue;
            }
            if creates_cycle(&parent_by_id, parent, child) {
                debug!("Skipping part_of '{}' of '{}': it would close a cycle", parent, child);
                continue;
            }
            parent_by_id.insert(child, parent);
            fallback.push((parent, child));
            break;
        }
    }

    // Step 5: materialize children from the final assignment
    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    for note in &unique {
        let parent = note.id.as_str();
        if let Some(kids) = declared.get(parent) {
            let kept: Vec<&str> = kids
                .iter()
                .copied()
                .filter(|kid| parent_by_id.get(kid).is_some_and(|assigned| *assigned == parent))
                .collect();
            if !kept.is_empty() {
                children.insert(parent, kept);
            }
        }
    }
    for (parent, child) in fallback {
        let list = children.entry(parent).or_default();
        if !list.contains(&child) {
            list.push(child);
        }
    }

    // Step 6: ordering
    for (parent, list) in &mut children {
        if list.len() > 1 {
            list.sort_by_key(|child| {
                (
                    declared_position.get(&(*parent, *child)).copied().unwrap_or(usize::MAX),
                    order_index.get(child).copied().unwrap_or(usize::MAX),
                )
            });
        }
    }

    // Step 7: roots in input order
    let roots: Vec<&str> = unique
        .iter()
        .map(|note| note.id.as_str())
        .filter(|id| !parent_by_id.contains_key(id))
        .collect();

    let mut nodes_by_id = HashMap::with_capacity(unique.len());
    for note in &unique {
        let id = note.id.as_str();
        nodes_by_id.insert(
            id,
            TreeNode {
                note,
                children: children.remove(id).unwrap_or_default(),
                content_links: content_links.remove(id).unwrap_or_default(),
                parent_id: parent_by_id.get(id).copied(),
            },
        );
    }

    info!("Built note tree: {} notes, {} roots", nodes_by_id.len(), roots.len());

    NoteTree {
        roots,
        nodes_by_id,
        parent_by_id,
    }
}

/// Whether adding `parent → child` would make `child` its own ancestor.
fn creates_cycle(parent_by_id: &HashMap<&str, &str>, parent: &str, child: &str) -> bool {
    let mut current = Some(parent);
    // The existing assignment is acyclic, so this walk terminates.
    while let Some(id) = current {
        if id == child {
            return true;
        }
        current = parent_by_id.get(id).copied();
    }
    false
}

impl<'a> NoteTree<'a> {
    /// Number of notes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes_by_id.len()
    }

    /// Whether the tree has no notes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes_by_id.is_empty()
    }

    /// The node for a note id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&TreeNode<'a>> {
        self.nodes_by_id.get(id)
    }

    /// Root nodes in order.
    pub fn root_nodes(&self) -> impl Iterator<Item = &TreeNode<'a>> {
        self.roots.iter().filter_map(|id| self.nodes_by_id.get(id))
    }

    /// Child nodes of a note in order. Empty for unknown ids.
    pub fn children(&self, id: &str) -> impl Iterator<Item = &TreeNode<'a>> {
        self.nodes_by_id
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|child| self.nodes_by_id.get(child))
    }

    /// The assigned parent of a note.
    #[must_use]
    pub fn parent(&self, id: &str) -> Option<&'a str> {
        self.parent_by_id.get(id).copied()
    }

    /// Parent chain of a note, nearest first, ending at its root.
    #[must_use]
    pub fn ancestors(&self, id: &str) -> Vec<&'a str> {
        let mut chain = Vec::new();
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if chain.len() > self.parent_by_id.len() {
                break;
            }
            chain.push(parent);
            current = self.parent(parent);
        }
        chain
    }

    /// All nodes in pre-order: each root followed by its subtree.
    #[must_use]
    pub fn depth_first(&self) -> Vec<&TreeNode<'a>> {
        let mut visited = Vec::with_capacity(self.len());
        let mut stack: Vec<&str> = self.roots.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes_by_id.get(id) else {
                continue;
            };
            visited.push(node);
            stack.extend(node.children.iter().rev().copied());
        }

        visited
    }

    /// Render the forest with box-drawing connectors, one note per line.
    ///
    /// `max_depth` limits how many levels are shown (1 = roots only).
    #[must_use]
    pub fn format_tree(&self, max_depth: Option<usize>) -> String {
        self.format_tree_with(max_depth, |node, _| node.note.display_name().to_string())
    }

    /// Like [`Self::format_tree`], with each line's text produced by `label`.
    ///
    /// `label` receives the node and its depth, 0 for roots.
    pub fn format_tree_with<F>(&self, max_depth: Option<usize>, label: F) -> String
    where
        F: Fn(&TreeNode<'a>, usize) -> String,
    {
        let mut out = String::new();

        for root in self.root_nodes() {
            out.push_str(&label(root, 0));
            out.push('\n');
            self.format_children(root, "", 1, max_depth, &label, &mut out);
        }

        out
    }

    fn format_children<F>(
        &self,
        node: &TreeNode<'a>,
        prefix: &str,
        depth: usize,
        max_depth: Option<usize>,
        label: &F,
        out: &mut String,
    ) where
        F: Fn(&TreeNode<'a>, usize) -> String,
    {
        if max_depth.is_some_and(|max| depth >= max) {
            return;
        }

        let count = node.children.len();
        for (i, child) in self.children(node.note.id.as_str()).enumerate() {
            let is_last = i + 1 == count;
            let connector = if is_last { "└── " } else { "├── " };
            out.push_str(prefix);
            out.push_str(connector);
            out.push_str(&label(child, depth));
            out.push('\n');

            let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
            self.format_children(child, &child_prefix, depth + 1, max_depth, label, out);
        }
    }
}
