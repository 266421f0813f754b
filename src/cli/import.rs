//! Report what a bulk import of a folder would produce.
//!
//! ```bash
//! diaryx-tree import ~/journal
//! diaryx-tree import ~/journal --format json
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::config::DiaryxConfig;
use crate::core::DiaryxError;
use crate::import::{BatchImporter, ImportResult, SkipReason};
use crate::utils::collect_workspace_files;

/// Command to print the import order and diagnostics of a folder.
#[derive(Args, Debug)]
pub struct ImportCommand {
    /// Workspace folder to read
    pub path: PathBuf,

    /// Output format (text, json)
    #[arg(short = 'f', long, default_value = "text")]
    pub format: String,
}

impl ImportCommand {
    pub async fn execute(self, config: &DiaryxConfig) -> Result<()> {
        self.validate_arguments()?;

        let inputs = collect_workspace_files(&self.path)?;
        let result = BatchImporter::new(config.clone()).import(inputs).await;

        match self.format.as_str() {
            "json" => output_json(&result)?,
            _ => output_text(&result),
        }

        Ok(())
    }

    fn validate_arguments(&self) -> Result<()> {
        match self.format.as_str() {
            "text" | "json" => Ok(()),
            _ => Err(DiaryxError::InvalidArgument {
                message: format!("Invalid format '{}'. Valid formats are: text, json", self.format),
            }
            .into()),
        }
    }
}

fn output_json(result: &ImportResult) -> Result<()> {
    let json = serde_json::json!({
        "notes": result.notes.iter().map(|note| &note.id).collect::<Vec<_>>(),
        "roots": result.roots,
        "errors": result.errors,
        "unresolved": result.unresolved,
        "skipped": result.skipped,
        "missing_fields": result.missing_fields,
    });

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn output_text(result: &ImportResult) {
    println!("{}", "Import order:".bold());
    if result.notes.is_empty() {
        println!("  (no notes)");
    }
    for (i, note) in result.notes.iter().enumerate() {
        let marker = if result.roots.contains(&note.id) {
            " (root)".green().to_string()
        } else {
            String::new()
        };
        println!("  {:>3}. {}{}", i + 1, note.id, marker);
    }

    if !result.errors.is_empty() {
        println!();
        println!("{}", "Errors:".red().bold());
        for error in &result.errors {
            println!("  {}: {}", error.relative_path, error.message);
        }
    }

    if !result.unresolved.is_empty() {
        println!();
        println!("{}", "Unresolved references:".yellow().bold());
        for reference in &result.unresolved {
            println!("  {} → {}", reference.parent, reference.target);
        }
    }

    if !result.skipped.is_empty() {
        println!();
        println!("{}", "Skipped:".bright_black().bold());
        for skipped in &result.skipped {
            let reason = match skipped.reason {
                SkipReason::NotMarkdown => "not markdown",
                SkipReason::DuplicatePath => "duplicate path",
            };
            println!("  {} ({})", skipped.relative_path, reason);
        }
    }

    if !result.missing_fields.is_empty() {
        println!();
        println!("{}", "Missing fields:".yellow().bold());
        for missing in &result.missing_fields {
            println!("  {}: {}", missing.relative_path, missing.fields.join(", "));
        }
    }
}
