//! modkit core - hexagonal architecture implementation
//!
//! This crate provides the domain and application layers for the modkit
//! multi-module scaffolding tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           modkit-cli (CLI)              │
//! │     (builds requests, prints reports)   │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ScaffoldService, PreferenceService)   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, PreferenceStore, Notifier) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     modkit-adapters (Infrastructure)    │
//! │ (LocalFilesystem, FilePreferenceStore)  │
//! └─────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (ModuleCreationRequest, ModuleLayout,  │
//! │   TemplateResolver, manifest merge)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use modkit_core::prelude::*;
//!
//! let request = ModuleCreationRequest::builder()
//!     .project_root("/work/shop")
//!     .parent("/work/shop/feature")
//!     .directory_name("payments")
//!     .namespace("com.shop.payments")
//!     .kinds([ModuleKind::Public, ModuleKind::Impl])
//!     .build()?;
//!
//! let service = ScaffoldService::new(filesystem, notifier);
//! let report = service.create_modules(request)?;
//! ```

pub mod application;
pub mod domain;
pub mod error;

/// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CreationReport, ManifestStatus, PreferenceService, ScaffoldService,
        ports::{Filesystem, Notifier, PreferenceStore, Severity},
    };
    pub use crate::domain::{
        DirectoryName, ModuleCreationRequest, ModuleKind, ModuleKinds, ModuleLayout, ModulePath,
        Namespace, ScaffoldPlan, derive_namespace,
    };
    pub use crate::error::{ErrorKind, ModkitError, ModkitResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
