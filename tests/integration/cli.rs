//! End-to-end tests of the `diaryx-tree` binary

use predicates::prelude::*;

use crate::common::{TestWorkspace, journal_workspace};

#[test]
fn test_tree_command_prints_hierarchy() {
    let workspace = journal_workspace().unwrap();

    workspace
        .command()
        .arg("tree")
        .arg(workspace.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Journal\n"))
        .stdout(predicate::str::contains("├── January (journal/january.md)"))
        .stdout(predicate::str::contains("│   └── First Day (journal/days/first day.md)"))
        .stdout(predicate::str::contains("└── February (journal/february.md)"));
}

#[test]
fn test_tree_command_depth_limit() {
    let workspace = journal_workspace().unwrap();

    workspace
        .command()
        .args(["tree", "--depth", "2"])
        .arg(workspace.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("January"))
        .stdout(predicate::str::contains("First Day").not());
}

#[test]
fn test_tree_command_json_output() {
    let workspace = journal_workspace().unwrap();

    let output = workspace
        .command()
        .args(["tree", "--format", "json"])
        .arg(workspace.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let roots = json["roots"].as_array().unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0]["id"], "index.md");
    assert_eq!(roots[0]["title"], "Journal");
    assert_eq!(roots[0]["children"][0]["children"][0]["title"], "First Day");
    assert_eq!(roots[0]["children"][1]["id"], "journal/february.md");
}

#[test]
fn test_tree_command_text_output() {
    let workspace = journal_workspace().unwrap();

    workspace
        .command()
        .args(["tree", "-f", "text"])
        .arg(workspace.path())
        .assert()
        .success()
        .stdout(
            "Journal (index.md)\n  January (journal/january.md)\n    First Day (journal/days/first day.md)\n  \
             February (journal/february.md)\n",
        );
}

#[test]
fn test_tree_command_empty_folder() {
    let workspace = TestWorkspace::new().unwrap();

    workspace
        .command()
        .arg("tree")
        .arg(workspace.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes found."));
}

#[test]
fn test_tree_command_reports_broken_files() {
    let workspace = journal_workspace().unwrap();
    workspace.write_raw("broken.md", "---\ntitle: [unclosed\n---\n").unwrap();

    workspace
        .command()
        .arg("tree")
        .arg(workspace.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("warning:"))
        .stdout(predicate::str::contains("Journal"));
}

#[test]
fn test_invalid_arguments_fail() {
    let workspace = journal_workspace().unwrap();

    workspace
        .command()
        .args(["tree", "--depth", "0"])
        .arg(workspace.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Depth must be at least 1"));

    workspace
        .command()
        .args(["tree", "--format", "yaml"])
        .arg(workspace.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format 'yaml'"));
}

#[test]
fn test_missing_folder_fails() {
    let workspace = TestWorkspace::new().unwrap();

    workspace
        .command()
        .arg("tree")
        .arg(workspace.path().join("does-not-exist"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a directory"));
}

#[test]
fn test_import_command_text_report() {
    let workspace = journal_workspace().unwrap();
    workspace
        .add(&diaryx_tree::test_utils::MarkdownFixture::note("orphan.md", "Orphan", &["gone.md"], &[]))
        .unwrap();
    workspace.write_raw("notes.txt", "not a note").unwrap();

    workspace
        .command()
        .arg("import")
        .arg(workspace.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Import order:"))
        .stdout(predicate::str::contains("1. index.md (root)"))
        .stdout(predicate::str::contains("orphan.md (root)"))
        .stdout(predicate::str::contains("Unresolved references:"))
        .stdout(predicate::str::contains("orphan.md → gone.md"))
        .stdout(predicate::str::contains("notes.txt (not markdown)"));
}

#[test]
fn test_import_command_json_report() {
    let workspace = journal_workspace().unwrap();

    let output = workspace
        .command()
        .args(["import", "--format", "json"])
        .arg(workspace.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json["notes"],
        serde_json::json!([
            "index.md",
            "journal/january.md",
            "journal/days/first day.md",
            "journal/february.md"
        ])
    );
    assert_eq!(json["roots"], serde_json::json!(["index.md"]));
    assert_eq!(json["errors"], serde_json::json!([]));
}

#[test]
fn test_config_file_changes_extensions() {
    let workspace = journal_workspace().unwrap();
    workspace.write_raw("extra.txt", "---\ntitle: Extra\n---\n").unwrap();
    let config = workspace.write_raw(".settings/config.toml", "markdown_extensions = [\"md\", \"txt\"]\n").unwrap();

    workspace
        .command()
        .arg("--config")
        .arg(&config)
        .arg("import")
        .arg(workspace.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("extra.txt"))
        .stdout(predicate::str::contains("not markdown").not());
}

#[test]
fn test_invalid_config_fails() {
    let workspace = journal_workspace().unwrap();
    let config = workspace.write_raw(".config.toml", "max_parallel_reads = 0\n").unwrap();

    workspace
        .command()
        .arg("--config")
        .arg(&config)
        .arg("tree")
        .arg(workspace.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_parallel_reads must be greater than 0"));

    workspace
        .command()
        .args(["tree", "--config"])
        .arg(workspace.path().join("missing.toml"))
        .arg(workspace.path())
        .assert()
        .failure();
}
