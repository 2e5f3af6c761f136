//! Driven (output) ports - implemented by infrastructure.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::error::ModkitResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `modkit_adapters::filesystem::LocalFilesystem` (production)
/// - `modkit_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Creation primitives never overwrite: a path that already exists is
/// reported as `ApplicationError::AlreadyExists`.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Create a single directory. The parent must already exist.
    fn create_dir(&self, path: &Path) -> ModkitResult<()>;

    /// Create a file that must not exist yet.
    fn write_new_file(&self, path: &Path, content: &str) -> ModkitResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> ModkitResult<String>;

    /// Replace the contents of a file, creating it if needed.
    fn write_file(&self, path: &Path, content: &str) -> ModkitResult<()>;
}

/// Port for the remembered key-value settings.
///
/// Implemented by:
/// - `modkit_adapters::preferences::FilePreferenceStore` (production)
/// - `modkit_adapters::preferences::MemoryPreferenceStore` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> ModkitResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> ModkitResult<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> ModkitResult<()>;

    /// Every stored pair, sorted by key.
    fn entries(&self) -> ModkitResult<BTreeMap<String, String>>;
}

/// How prominently a notification should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// Port for user-visible outcome messages.
///
/// Implemented by:
/// - `modkit_adapters::notifier::TracingNotifier`
/// - `modkit_adapters::notifier::RecordingNotifier` (testing)
/// - the CLI's console notifier
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}
