//! Error types for UserFS Core

use std::io;

/// Core namespace error type
#[derive(thiserror::Error, Debug)]
pub enum FsError {
    #[error("unknown user: {0}")]
    UnknownUser(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("not a directory: {0}")]
    NotADirectory(String),
    #[error("is a directory: {0}")]
    IsADirectory(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    #[error("invalid path: {0}")]
    InvalidPath(String),
    #[error("name not allowed: {0:?}")]
    InvalidName(String),
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl FsError {
    /// Create a permission error with a short reason.
    pub fn denied<S: Into<String>>(reason: S) -> Self {
        Self::PermissionDenied(reason.into())
    }

    /// Create an invalid-operation error with a short reason.
    pub fn invalid_op<S: Into<String>>(reason: S) -> Self {
        Self::InvalidOperation(reason.into())
    }
}

pub type FsResult<T> = Result<T, FsError>;
