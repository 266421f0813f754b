//! Test utilities for diaryx-tree
//!
//! Helpers shared by unit tests and the integration test suite: note
//! fixtures for building in-memory collections, Markdown fixtures for
//! writing workspaces to a temporary directory, and one-time logging setup.
//!
//! # Example
//!
//! ```rust,no_run
//! use diaryx_tree::test_utils::NoteFixture;
//! use diaryx_tree::tree::build_tree;
//!
//! let notes = vec![
//!     NoteFixture::new("index").contents(&["day.md"]).build(),
//!     NoteFixture::new("day").source("day.md").build(),
//! ];
//! let tree = build_tree(&notes);
//! assert_eq!(tree.roots, vec!["index"]);
//! ```

pub mod fixtures;

pub use fixtures::{MarkdownFixture, NoteFixture};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. With `level` set that level is used,
/// otherwise `RUST_LOG` is honored if present and logging stays off if not.
///
/// ```bash
/// RUST_LOG=diaryx_tree=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
