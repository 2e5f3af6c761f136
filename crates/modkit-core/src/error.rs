//! Unified error handling for modkit core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{self, DomainError};

/// Root error type for modkit core operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModkitError {
    /// Validation failures detected before any I/O.
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Orchestration and I/O failures.
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl ModkitError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in modkit".into(),
                "Run again with -vvv and include the log when reporting it".into(),
            ],
        }
    }

    /// The user-facing kind of failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(e) => match e.category() {
                domain::ErrorCategory::Validation => ErrorKind::Validation,
                domain::ErrorCategory::NotFound => ErrorKind::NotFound,
                domain::ErrorCategory::Configuration => ErrorKind::Configuration,
            },
            Self::Application(e) => e.kind(),
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }
}

/// Kinds of failure a caller distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing request fields.
    Validation,
    /// Something named by the user does not exist.
    NotFound,
    /// Target collision or I/O failure while creating the module tree.
    DirectoryCreation,
    /// Manifest missing, unreadable or unwritable.
    ManifestUpdate,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type ModkitResult<T> = Result<T, ModkitError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn kinds_follow_layers() {
        assert_eq!(
            ModkitError::from(DomainError::EmptyNamespace).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            ModkitError::from(DomainError::UnknownLayout("x".into())).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            ModkitError::from(ApplicationError::AlreadyExists {
                path: PathBuf::from("/a")
            })
            .kind(),
            ErrorKind::DirectoryCreation
        );
        assert_eq!(
            ModkitError::from(ApplicationError::ManifestUpdate {
                path: PathBuf::from("/a/settings.gradle.kts"),
                reason: "missing".into(),
            })
            .kind(),
            ErrorKind::ManifestUpdate
        );
    }
}
