//! Hierarchy resolution over a flat note collection.
//!
//! [`index::ReferenceIndex`] maps file names, titles and aliases to note ids;
//! [`builder::build_tree`] uses it to assign parents and order children.

pub mod builder;
pub mod index;

pub use builder::{NoteTree, TreeNode, build_tree};
pub use index::ReferenceIndex;
