//! Infrastructure adapters for modkit.
//!
//! This crate implements the ports defined in `modkit-core::application::ports`
//! and loads custom layouts. It contains all external dependencies and I/O
//! operations.

pub mod filesystem;
pub mod layout_loader;
pub mod notifier;
pub mod preferences;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use layout_loader::{LayoutLoadError, LayoutLoader, LayoutRegistry};
pub use notifier::{RecordingNotifier, TracingNotifier};
pub use preferences::{FilePreferenceStore, MemoryPreferenceStore};
