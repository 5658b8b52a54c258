//! Error types for the worksheet generator

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the worksheet generator
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The content source failed or returned an unusable response
    #[error("content source error: {0}")]
    ContentSource(String),

    /// Supplied content does not match the expected section shape
    #[error("invalid {section} content: {reason}")]
    ContentShape {
        section: &'static str,
        reason: String,
    },

    /// Two items share the same correct-answer string
    #[error("duplicate answer value: {0:?}")]
    DuplicateAnswer(String),

    /// A matching task has no pairs to shuffle
    #[error("matching task needs at least one pair")]
    EmptyPairs,

    /// More pairs than the answer key can label (a-z)
    #[error("matching task has {0} pairs, maximum is 26")]
    TooManyItems(usize),

    /// File not found
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Every fragment was unreadable at merge time
    #[error("no readable fragments to merge")]
    NoReadableFragments,

    /// General error
    #[error("{0}")]
    General(String),
}
