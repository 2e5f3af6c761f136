//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a module tree" or "remember the last
//! package".

pub mod preference_service;
pub mod scaffold_service;

pub use preference_service::{DEFAULT_PACKAGE, PreferenceService};
pub use scaffold_service::{CreationReport, ManifestStatus, ScaffoldService};
