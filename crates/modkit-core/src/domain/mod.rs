// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for modkit.
//!
//! Pure logic only: module kinds, validated requests, layouts, template
//! resolution, planning and the settings-manifest merge.
//!
//! - **No I/O**: filesystem, preferences and notifications are ports
//!   defined in the application layer
//! - **No logging**: observability belongs to the application and CLI layers
//! - **Immutable values**: everything is `Clone + PartialEq`
pub mod error;
pub mod layout;
pub mod manifest;
pub mod module_path;
pub mod plan;
pub mod request;
pub mod template;
pub mod value_objects;

pub use error::{DomainError, ErrorCategory};
pub use layout::{DEFAULT_LAYOUT, LayoutTemplates, ModuleLayout};
pub use manifest::{merge_entries, parse_entries};
pub use module_path::{ModulePath, ProjectPath};
pub use plan::{FsEntry, ScaffoldPlan};
pub use request::{ModuleCreationRequest, ModuleCreationRequestBuilder};
pub use template::{TemplateContext, TemplateResolver, derive_namespace};
pub use value_objects::{DirectoryName, ModuleKind, ModuleKinds, Namespace};
