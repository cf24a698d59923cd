//! Typed errors for prompts, answer validation and configuration resolution.

use thiserror::Error;

/// A single answer failed its field rule. The question is asked again with
/// this message shown.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("The subject must have at least {min} characters")]
    SubjectTooShort { min: usize },

    #[error("The subject must have at most {max} characters")]
    SubjectTooLong { max: usize },

    #[error("'{0}' is not a valid issue key (expected something like STO-123)")]
    InvalidIssueKey(String),

    #[error("'{0}' is not a known commit type")]
    UnknownType(String),

    #[error("Breaking changes need a description")]
    MissingBreakingDescription,
}

/// Configuration that cannot be used to drive the questions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("The commit type catalog is empty")]
    EmptyTypes,

    #[error("Commit type '{0}' is defined more than once")]
    DuplicateType(String),

    #[error("min_header_width ({min}) is larger than max_header_width ({max})")]
    HeaderWidths { min: usize, max: usize },

    #[error("max_line_width must be at least 1")]
    ZeroLineWidth,

    #[error("default_type '{0}' is not one of the configured types")]
    UnknownDefaultType(String),
}

/// A prompt did not produce an answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    /// Esc or Ctrl-C.
    #[error("Commit aborted")]
    Cancelled,
}
