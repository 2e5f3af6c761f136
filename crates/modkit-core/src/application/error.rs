//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not validation.
//! Validation errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorKind;

/// Errors that occur while executing a scaffold or touching a port.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// Low-level filesystem failure reported by a `Filesystem` adapter.
    #[error("Filesystem error at {path}: {reason}")]
    Filesystem { path: PathBuf, reason: String },

    /// A directory or file that must be new already exists.
    #[error("Already exists: {path}")]
    AlreadyExists { path: PathBuf },

    /// Creating the module tree failed part way through.
    #[error("Could not create {path}: {reason}")]
    DirectoryCreation { path: PathBuf, reason: String },

    /// The settings manifest could not be read or written.
    #[error("Could not update manifest {path}: {reason}")]
    ManifestUpdate { path: PathBuf, reason: String },

    /// The parent directory is missing or not a directory.
    #[error("Invalid parent directory {path}: {reason}")]
    InvalidParent { path: PathBuf, reason: String },

    /// The preference store could not be read or written.
    #[error("Preference store error: {reason}")]
    PreferenceStore { reason: String },

    /// An in-memory adapter's lock was poisoned.
    #[error("Store lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::AlreadyExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different directory name".into(),
                "Or remove the existing directory first".into(),
            ],
            Self::DirectoryCreation { path, .. } => vec![
                format!("Creation stopped at: {}", path.display()),
                "Directories created before the failure were left in place".into(),
                "Remove them and run the command again".into(),
            ],
            Self::ManifestUpdate { path, .. } => vec![
                format!("Add the include(\"...\") lines to {} by hand", path.display()),
                "Use --project-root to point at the directory holding the manifest".into(),
            ],
            Self::InvalidParent { .. } => vec![
                "Pass an existing directory with --parent".into(),
            ],
            Self::PreferenceStore { .. } => vec![
                "Check the preferences file is valid TOML".into(),
                "Reset it with: modkit prefs clear".into(),
            ],
            Self::StoreLockError => vec!["Try again in a moment".into()],
        }
    }

    /// Get error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AlreadyExists { .. } | Self::DirectoryCreation { .. } => {
                ErrorKind::DirectoryCreation
            }
            Self::ManifestUpdate { .. } => ErrorKind::ManifestUpdate,
            Self::InvalidParent { .. } => ErrorKind::Validation,
            Self::PreferenceStore { .. } => ErrorKind::Configuration,
            Self::Filesystem { .. } | Self::StoreLockError => ErrorKind::Internal,
        }
    }
}
