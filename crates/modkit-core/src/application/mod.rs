//! Application layer for modkit.
//!
//! This layer contains:
//! - **Services**: use case orchestration (`ScaffoldService`, `PreferenceService`)
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    CreationReport, DEFAULT_PACKAGE, ManifestStatus, PreferenceService, ScaffoldService,
};

pub use ports::{Filesystem, Notifier, PreferenceStore, Severity};

pub use error::ApplicationError;
