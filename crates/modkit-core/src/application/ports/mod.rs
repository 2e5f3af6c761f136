//! Application ports (traits) for external dependencies.
//!
//! Adapters in `modkit-adapters` implement these; the CLI wires them into
//! the services.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: called by the application, implemented by
//!   infrastructure
//!   - `Filesystem`: directory and file primitives
//!   - `PreferenceStore`: remembered key-value settings
//!   - `Notifier`: user-visible outcome messages

pub mod output;

pub use output::{Filesystem, Notifier, PreferenceStore, Severity};

#[cfg(test)]
pub use output::{MockFilesystem, MockNotifier, MockPreferenceStore};
