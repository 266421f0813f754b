//! Core types shared across diaryx-tree.
//!
//! Currently this is the error layer: the typed [`DiaryxError`] enum and the
//! [`ErrorContext`] wrapper the CLI uses to print actionable messages.

pub mod error;

pub use error::{DiaryxError, ErrorContext, user_friendly_error};
