//! Integration test suite for diaryx-tree
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: The `diaryx-tree` binary end to end
//! - **import**: Batch import of on-disk workspaces
//! - **tree**: Tree resolution over parsed notes

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod cli;
mod import;
mod tree;
