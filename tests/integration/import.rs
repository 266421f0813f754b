//! Batch import of workspace folders on disk

use diaryx_tree::config::DiaryxConfig;
use diaryx_tree::import::{BatchImporter, SkipReason, UnresolvedReference, import_batch};
use diaryx_tree::test_utils::MarkdownFixture;
use diaryx_tree::utils::collect_workspace_files;

use crate::common::{TestWorkspace, journal_workspace};

fn ids(result: &diaryx_tree::import::ImportResult) -> Vec<&str> {
    result.notes.iter().map(|note| note.id.as_str()).collect()
}

#[tokio::test]
async fn test_journal_imports_in_structural_order() {
    let workspace = journal_workspace().unwrap();
    let inputs = collect_workspace_files(workspace.path()).unwrap();
    let result = import_batch(inputs).await;

    assert_eq!(
        ids(&result),
        vec![
            "index.md",
            "journal/january.md",
            "journal/days/first day.md",
            "journal/february.md"
        ]
    );
    assert_eq!(result.roots, vec!["index.md"]);
    assert!(result.errors.is_empty());
    assert!(result.unresolved.is_empty());
    assert!(result.skipped.is_empty());
}

#[tokio::test]
async fn test_mixed_folder_diagnostics() {
    diaryx_tree::test_utils::init_test_logging(None);
    let workspace = TestWorkspace::with_files(&[
        MarkdownFixture::note("index.md", "Home", &["recipes/index.md", "travel.md"], &[]),
        MarkdownFixture::note("recipes/index.md", "Recipes", &["soup.md", "Bread%20Rolls.md"], &["../index.md"]),
        MarkdownFixture::note("recipes/soup.md", "Soup", &[], &[]),
        MarkdownFixture::note("recipes/bread rolls.md", "Bread Rolls", &[], &[]),
        MarkdownFixture::raw("recipes/broken.md", "---\ntitle: [unclosed\n---\n"),
        MarkdownFixture::raw("photos/beach.jpg", "not really a jpeg"),
    ])
    .unwrap();

    let inputs = collect_workspace_files(workspace.path()).unwrap();
    let result = import_batch(inputs).await;

    assert_eq!(
        ids(&result),
        vec!["index.md", "recipes/index.md", "recipes/soup.md", "recipes/bread rolls.md"]
    );
    assert_eq!(result.roots, vec!["index.md"]);

    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].relative_path, "recipes/broken.md");

    assert_eq!(
        result.unresolved,
        vec![UnresolvedReference {
            parent: "index.md".to_string(),
            target: "travel.md".to_string(),
        }]
    );

    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].relative_path, "photos/beach.jpg");
    assert_eq!(result.skipped[0].reason, SkipReason::NotMarkdown);
}

#[tokio::test]
async fn test_configured_extensions_and_required_fields() {
    let workspace = TestWorkspace::with_files(&[
        MarkdownFixture::complete("index.md", "Index", &["draft.txt"]),
        MarkdownFixture::raw("draft.txt", "---\ntitle: Draft\n---\nPlain text note.\n"),
    ])
    .unwrap();

    let config = DiaryxConfig {
        markdown_extensions: vec!["md".to_string(), ".txt".to_string()],
        ..Default::default()
    };
    let inputs = collect_workspace_files(workspace.path()).unwrap();
    let result = BatchImporter::new(config).import(inputs).await;

    assert_eq!(ids(&result), vec!["index.md", "draft.txt"]);
    assert!(result.skipped.is_empty());

    // Only the draft lacks the required metadata.
    assert_eq!(result.missing_fields.len(), 1);
    assert_eq!(result.missing_fields[0].relative_path, "draft.txt");
    assert!(result.missing_fields[0].fields.contains(&"author".to_string()));
    assert!(!result.missing_fields[0].fields.contains(&"title".to_string()));
}

#[tokio::test]
async fn test_reimporting_is_stable() {
    let workspace = journal_workspace().unwrap();

    let first = import_batch(collect_workspace_files(workspace.path()).unwrap()).await;
    let second = import_batch(collect_workspace_files(workspace.path()).unwrap()).await;

    assert_eq!(ids(&first), ids(&second));
    assert_eq!(first.roots, second.roots);
}
