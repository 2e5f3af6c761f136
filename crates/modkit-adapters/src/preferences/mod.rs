//! Preference store adapters.

mod file;
mod memory;

pub use file::{FilePreferenceStore, PREFERENCES_FILE};
pub use memory::MemoryPreferenceStore;
