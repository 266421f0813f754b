//! Common test utilities for diaryx-tree integration tests

// Not every helper is used by every test file
#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use diaryx_tree::test_utils::MarkdownFixture;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary workspace folder populated with Markdown files
pub struct TestWorkspace {
    temp: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp: TempDir::new()?,
        })
    }

    /// Workspace with the given files already written
    pub fn with_files(files: &[MarkdownFixture]) -> Result<Self> {
        let workspace = Self::new()?;
        for file in files {
            workspace.add(file)?;
        }
        Ok(workspace)
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn add(&self, file: &MarkdownFixture) -> Result<PathBuf> {
        file.write_to(self.path())
    }

    pub fn write_raw(&self, relative: &str, content: &str) -> Result<PathBuf> {
        MarkdownFixture::raw(relative, content).write_to(self.path())
    }

    /// The binary, isolated from any user configuration
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("diaryx-tree").unwrap();
        cmd.env("DIARYX_CONFIG", self.path().join(".diaryx-test-config.toml"))
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}

/// A small journal: an index with two months, one of them with a day entry
pub fn journal_workspace() -> Result<TestWorkspace> {
    TestWorkspace::with_files(&[
        MarkdownFixture::note(
            "index.md",
            "Journal",
            &["journal/january.md", "[February](journal/february.md)"],
            &[],
        ),
        MarkdownFixture::note("journal/january.md", "January", &["<days/first day.md>"], &["../index.md"]),
        MarkdownFixture::note("journal/february.md", "February", &[], &["[Journal](../index.md)"]),
        MarkdownFixture::note("journal/days/first day.md", "First Day", &[], &["../january.md"]),
    ])
}
