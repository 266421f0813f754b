//! Error handling for diaryx-tree
//!
//! This module provides the typed error enum and the user-facing error
//! reporting used by the CLI. The error system follows two rules:
//! 1. **Strongly-typed errors** for the collaborators that can fail
//!    (frontmatter parsing, file reads, configuration)
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! The resolution core ([`crate::links`], [`crate::tree`]) never fails: an
//! unresolvable reference is data, not an error. The batch importer collects
//! per-file failures into its result instead of returning early, so the types
//! here only surface at the edges of the crate.
//!
//! # Error Conversion
//!
//! Common library errors are converted automatically:
//! - [`std::io::Error`] → [`DiaryxError::IoError`]
//! - [`toml::de::Error`] → [`DiaryxError::TomlError`]
//!
//! Use [`user_friendly_error`] to turn any [`anyhow::Error`] into an
//! [`ErrorContext`] carrying details and a suggestion.
//!
//! # Examples
//!
//! ```rust,no_run
//! use diaryx_tree::core::{DiaryxError, ErrorContext, user_friendly_error};
//!
//! let error = DiaryxError::FrontmatterParseError {
//!     file: "notes/intro.md".to_string(),
//!     reason: "mapping values are not allowed here".to_string(),
//! };
//!
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for diaryx-tree operations.
///
/// Each variant carries enough context for a message that names the file or
/// setting involved. Variants are grouped by the collaborator that raises them:
///
/// - **Parsing**: [`FrontmatterParseError`], [`InvalidFrontmatter`]
/// - **File access**: [`FileReadError`], [`IoError`]
/// - **Configuration**: [`ConfigError`], [`TomlError`]
/// - **Command line**: [`InvalidArgument`]
///
/// [`FrontmatterParseError`]: DiaryxError::FrontmatterParseError
/// [`InvalidFrontmatter`]: DiaryxError::InvalidFrontmatter
/// [`FileReadError`]: DiaryxError::FileReadError
/// [`IoError`]: DiaryxError::IoError
/// [`ConfigError`]: DiaryxError::ConfigError
/// [`TomlError`]: DiaryxError::TomlError
/// [`InvalidArgument`]: DiaryxError::InvalidArgument
#[derive(Error, Debug)]
pub enum DiaryxError {
    /// The YAML frontmatter block could not be decoded.
    ///
    /// Raised by the frontmatter parser when the text between the `---`
    /// delimiters is not valid YAML, or its fields have the wrong shape.
    #[error("Invalid frontmatter in {file}: {reason}")]
    FrontmatterParseError {
        /// Relative path of the file being parsed
        file: String,
        /// Parser error message
        reason: String,
    },

    /// The frontmatter is valid YAML but not a mapping of note fields.
    #[error("Unexpected frontmatter structure in {file}: {reason}")]
    InvalidFrontmatter {
        /// Relative path of the file being parsed
        file: String,
        /// What was found instead
        reason: String,
    },

    /// A file selected for import could not be read.
    #[error("Failed to read {file}: {reason}")]
    FileReadError {
        /// Relative path of the file
        file: String,
        /// Underlying I/O error message
        reason: String,
    },

    /// Configuration file content is invalid.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// A command-line argument has an unsupported value.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for DiaryxError {
    fn clone(&self) -> Self {
        match self {
            Self::FrontmatterParseError {
                file,
                reason,
            } => Self::FrontmatterParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::InvalidFrontmatter {
                file,
                reason,
            } => Self::InvalidFrontmatter {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::FileReadError {
                file,
                reason,
            } => Self::FileReadError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            Self::InvalidArgument {
                message,
            } => Self::InvalidArgument {
                message: message.clone(),
            },
            // For errors that don't implement Clone, convert to Other
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information.
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context about the error in yellow (optional)
/// 3. **Suggestion**: Actionable steps to resolve the issue in green (optional)
///
/// # Examples
///
/// ```rust,no_run
/// use diaryx_tree::core::{DiaryxError, ErrorContext};
///
/// let context = ErrorContext::new(DiaryxError::InvalidArgument {
///     message: "Depth must be at least 1".to_string(),
/// })
/// .with_suggestion("Pass --depth 1 or higher, or omit the flag");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: DiaryxError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`DiaryxError`]
    #[must_use]
    pub const fn new(error: DiaryxError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`DiaryxError`] variants, [`std::io::Error`] kinds and
/// [`toml::de::Error`]; anything else is wrapped with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(diaryx_error) = error.downcast_ref::<DiaryxError>() {
        return create_error_context(diaryx_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(DiaryxError::Other {
                    message: format!("Permission denied: {io_error}"),
                })
                .with_suggestion("Check the ownership and permissions of the workspace directory");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(DiaryxError::Other {
                    message: format!("File or directory not found: {io_error}"),
                })
                .with_suggestion("Check that the workspace path exists and is spelled correctly");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(DiaryxError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax in your config.toml file")
        .with_details("Configuration is read from $DIARYX_CONFIG or ~/.diaryx/config.toml");
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();
    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(DiaryxError::Other {
        message,
    })
}

fn create_error_context(error: DiaryxError) -> ErrorContext {
    match &error {
        DiaryxError::FrontmatterParseError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the YAML between the leading '---' lines for indentation and quoting")
            .with_details("Diaryx notes carry their metadata in a YAML frontmatter block"),
        DiaryxError::InvalidFrontmatter {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Frontmatter must be a list of 'key: value' pairs"),
        DiaryxError::FileReadError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Make sure the file exists, is readable and is UTF-8 encoded"),
        DiaryxError::ConfigError {
            ..
        }
        | DiaryxError::TomlError(_) => ErrorContext::new(error)
            .with_suggestion("Check the TOML syntax in your config.toml file")
            .with_details("Configuration is read from $DIARYX_CONFIG or ~/.diaryx/config.toml"),
        DiaryxError::InvalidArgument {
            ..
        } => ErrorContext::new(error).with_suggestion("Run with --help to see the accepted values"),
        DiaryxError::IoError(_)
        | DiaryxError::Other {
            ..
        } => ErrorContext::new(error),
    }
}
