//! Display the note hierarchy of a folder.
//!
//! The `tree` command imports every file under a directory, anchors their
//! references to workspace-relative paths and prints the resolved forest,
//! similar to the Unix `tree` tool.
//!
//! # Examples
//!
//! ```bash
//! diaryx-tree tree ~/journal
//! diaryx-tree tree ~/journal --depth 2
//! diaryx-tree tree ~/journal --format json
//! ```
//!
//! # Output Formats
//!
//! - `tree` (default): box-drawing connectors, colored titles
//! - `text`: plain two-space indentation, one note per line
//! - `json`: nested objects with `id`, `title` and `children`
//!
//! Files that fail to import are reported as warnings on stderr and left out
//! of the tree.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::config::DiaryxConfig;
use crate::core::DiaryxError;
use crate::import::{BatchImporter, ImportResult, anchor_references};
use crate::tree::{NoteTree, TreeNode, build_tree};
use crate::utils::collect_workspace_files;

/// Command to display the note tree of a workspace folder.
#[derive(Args, Debug)]
pub struct TreeCommand {
    /// Workspace folder to read
    pub path: PathBuf,

    /// Maximum depth to display (unlimited if not specified)
    ///
    /// `--depth 1` shows only the roots.
    #[arg(short = 'd', long)]
    pub depth: Option<usize>,

    /// Output format (tree, json, text)
    #[arg(short = 'f', long, default_value = "tree")]
    pub format: String,
}

impl TreeCommand {
    /// Execute the tree command.
    pub async fn execute(self, config: &DiaryxConfig) -> Result<()> {
        self.validate_arguments()?;

        let inputs = collect_workspace_files(&self.path)?;
        let result = BatchImporter::new(config.clone()).import(inputs).await;
        report_errors(&result);

        let notes = anchor_references(&result.notes);
        let tree = build_tree(&notes);

        match self.format.as_str() {
            "json" => self.output_json(&tree)?,
            "text" => self.output_text(&tree),
            _ => self.output_tree(&tree),
        }

        Ok(())
    }

    fn validate_arguments(&self) -> Result<()> {
        match self.format.as_str() {
            "tree" | "json" | "text" => {}
            _ => {
                return Err(DiaryxError::InvalidArgument {
                    message: format!(
                        "Invalid format '{}'. Valid formats are: tree, json, text",
                        self.format
                    ),
                }
                .into());
            }
        }

        if self.depth == Some(0) {
            return Err(DiaryxError::InvalidArgument {
                message: "Depth must be at least 1".to_string(),
            }
            .into());
        }

        Ok(())
    }

    fn output_tree(&self, tree: &NoteTree<'_>) {
        if tree.is_empty() {
            println!("No notes found.");
            return;
        }

        let rendered = tree.format_tree_with(self.depth, |node, depth| {
            if depth == 0 {
                node.note.display_name().cyan().bold().to_string()
            } else {
                format!("{} {}", node.note.display_name(), format!("({})", node.note.id).bright_black())
            }
        });
        print!("{rendered}");
    }

    fn output_json(&self, tree: &NoteTree<'_>) -> Result<()> {
        let json = serde_json::json!({
            "roots": tree.root_nodes().map(|n| self.node_to_json(n, tree, 1)).collect::<Vec<_>>(),
        });

        println!("{}", serde_json::to_string_pretty(&json)?);
        Ok(())
    }

    fn node_to_json(&self, node: &TreeNode<'_>, tree: &NoteTree<'_>, depth: usize) -> serde_json::Value {
        let children: Vec<serde_json::Value> = if self.depth.is_some_and(|max| depth >= max) {
            Vec::new()
        } else {
            tree.children(node.note.id.as_str())
                .map(|child| self.node_to_json(child, tree, depth + 1))
                .collect()
        };

        serde_json::json!({
            "id": node.note.id,
            "title": node.note.display_name(),
            "children": children,
        })
    }

    fn output_text(&self, tree: &NoteTree<'_>) {
        for node in tree.root_nodes() {
            self.print_text_node(node, tree, 0);
        }
    }

    fn print_text_node(&self, node: &TreeNode<'_>, tree: &NoteTree<'_>, indent: usize) {
        println!("{}{} ({})", "  ".repeat(indent), node.note.display_name(), node.note.id);

        if self.depth.is_some_and(|max| indent + 1 >= max) {
            return;
        }
        for child in tree.children(node.note.id.as_str()) {
            self.print_text_node(child, tree, indent + 1);
        }
    }
}

/// Print per-file import failures to stderr.
fn report_errors(result: &ImportResult) {
    for error in &result.errors {
        eprintln!("{} {}", "warning:".yellow().bold(), error.message);
    }
}
