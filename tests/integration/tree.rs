//! Tree building over parsed Markdown notes

use diaryx_tree::import::{anchor_references, import_batch};
use diaryx_tree::markdown::{FrontmatterParser, NoteParser};
use diaryx_tree::note::Note;
use diaryx_tree::test_utils::{MarkdownFixture, NoteFixture};
use diaryx_tree::tree::{NoteTree, build_tree};
use diaryx_tree::utils::collect_workspace_files;

use crate::common::journal_workspace;

fn parse_all(files: &[MarkdownFixture]) -> Vec<Note> {
    let parser = FrontmatterParser::new();
    files.iter().map(|file| parser.parse_note(&file.content, &file.path).unwrap()).collect()
}

/// Every note appears exactly once, either as a root or as somebody's child.
fn assert_forest(tree: &NoteTree<'_>, notes: &[Note]) {
    let child_count: usize = tree.nodes_by_id.values().map(|node| node.children.len()).sum();
    assert_eq!(tree.roots.len() + child_count, notes.len());

    for note in notes {
        let id = note.id.as_str();
        assert_ne!(tree.parent(id), Some(id), "{id} is its own parent");

        let ancestors = tree.ancestors(id);
        assert!(ancestors.len() < notes.len(), "{id} has a parent cycle");
        let top = ancestors.last().copied().unwrap_or(id);
        assert!(tree.roots.contains(&top), "{id} does not end at a root");
    }

    assert_eq!(tree.depth_first().len(), notes.len());
}

#[test]
fn test_tree_from_frontmatter() {
    let files = [
        MarkdownFixture::note("index.md", "Garden", &["[Vegetables](vegetables.md)", "Flowers"], &[]),
        MarkdownFixture::note("vegetables.md", "Vegetables", &["tomatoes", "<runner beans.md>"], &[]),
        MarkdownFixture::note("tomatoes.md", "Tomatoes", &[], &[]),
        MarkdownFixture::note("runner beans.md", "Runner Beans", &[], &[]),
        MarkdownFixture::note("flowers.md", "Flowers", &[], &[]),
        MarkdownFixture::raw("loose.md", "# Loose Thoughts\n\nNo frontmatter at all.\n"),
    ];
    let notes = parse_all(&files);
    let tree = build_tree(&notes);

    assert_eq!(tree.roots, vec!["index.md", "loose.md"]);
    assert_eq!(
        tree.format_tree(None),
        "Garden\n\
         ├── Vegetables\n\
         │   ├── Tomatoes\n\
         │   └── Runner Beans\n\
         └── Flowers\n\
         Loose Thoughts\n"
    );
    assert_eq!(tree.format_tree(Some(1)), "Garden\nLoose Thoughts\n");
    assert_forest(&tree, &notes);
}

#[test]
fn test_part_of_only_hierarchy() {
    let files = [
        MarkdownFixture::note("projects.md", "Projects", &[], &[]),
        MarkdownFixture::note("roof.md", "Fix the roof", &[], &["[Projects](projects.md)"]),
        MarkdownFixture::note("shed.md", "Build a shed", &[], &["Projects"]),
        MarkdownFixture::note("shed-plans.md", "Shed plans", &[], &["shed.md"]),
    ];
    let notes = parse_all(&files);
    let tree = build_tree(&notes);

    assert_eq!(tree.roots, vec!["projects.md"]);
    assert_eq!(tree.ancestors("shed-plans.md"), vec!["shed.md", "projects.md"]);
    assert_forest(&tree, &notes);
}

#[test]
fn test_generated_collections_form_a_forest() {
    // Every note points at a few others by index, including itself and
    // earlier notes, so cycles of every length show up.
    for size in [1usize, 2, 3, 7, 16, 31] {
        let notes: Vec<Note> = (0..size)
            .map(|i| {
                let contents: Vec<String> = [i, (i * 7 + 3) % size, (i + size - 1) % size]
                    .iter()
                    .map(|target| format!("n{target}.md"))
                    .collect();
                let parent = format!("n{}.md", (i * 5 + 1) % size);
                let refs: Vec<&str> = contents.iter().map(String::as_str).collect();
                NoteFixture::new(&format!("note-{i}"))
                    .source(&format!("n{i}.md"))
                    .contents(&refs)
                    .part_of(&[parent.as_str()])
                    .build()
            })
            .collect();

        let tree = build_tree(&notes);
        assert_forest(&tree, &notes);
        assert_eq!(build_tree(&notes), tree, "size {size} is not idempotent");
    }
}

#[tokio::test]
async fn test_workspace_tree_from_disk() {
    let workspace = journal_workspace().unwrap();
    let inputs = collect_workspace_files(workspace.path()).unwrap();
    let result = import_batch(inputs).await;
    assert!(result.errors.is_empty());

    let notes = anchor_references(&result.notes);
    let tree = build_tree(&notes);

    assert_eq!(tree.roots, vec!["index.md"]);
    assert_eq!(
        tree.format_tree(None),
        "Journal\n\
         ├── January\n\
         │   └── First Day\n\
         └── February\n"
    );
    assert_forest(&tree, &notes);
}

#[tokio::test]
async fn test_unanchored_directory_references_do_not_resolve() {
    let workspace = journal_workspace().unwrap();
    let inputs = collect_workspace_files(workspace.path()).unwrap();
    let result = import_batch(inputs).await;

    // `days/first day.md` is only meaningful relative to `journal/`.
    let tree = build_tree(&result.notes);
    assert_eq!(tree.parent("journal/days/first day.md"), None);
    assert!(tree.roots.contains(&"journal/days/first day.md"));
}
