use thiserror::Error;

/// Errors that can occur when configuring how posts are rendered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PostError {
    #[error("Unknown date locale: {0}")]
    InvalidLocale(String),
    #[error("Invalid fallback mode: {0} (expected true, false or blocking)")]
    InvalidFallbackMode(String),
}
