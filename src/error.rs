use thiserror::Error;

/// Unified error type for tag-bump operations
#[derive(Error, Debug)]
pub enum TagBumpError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed version: {0}")]
    MalformedVersion(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Output error: {0}")]
    Output(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in tag-bump
pub type Result<T> = std::result::Result<T, TagBumpError>;

impl TagBumpError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        TagBumpError::Config(msg.into())
    }

    /// Create a malformed version error with context
    pub fn malformed_version(msg: impl Into<String>) -> Self {
        TagBumpError::MalformedVersion(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        TagBumpError::Tag(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        TagBumpError::Remote(msg.into())
    }

    /// Create an output error with context
    pub fn output(msg: impl Into<String>) -> Self {
        TagBumpError::Output(msg.into())
    }
}
