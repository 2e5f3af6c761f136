// ============================================================================
// domain/error.rs - VALIDATION ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Every variant is detected before any I/O happens, so a `DomainError` is
/// never partially applied. All errors are:
/// - Cloneable (reports carry them around)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Request Validation
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Namespace cannot be empty")]
    EmptyNamespace,

    #[error("Invalid namespace '{namespace}': {reason}")]
    InvalidNamespace { namespace: String, reason: String },

    #[error("Invalid directory name '{name}': {reason}")]
    InvalidDirectoryName { name: String, reason: String },

    #[error("At least one module kind must be selected")]
    NoModuleKinds,

    #[error("Unknown module kind '{0}'")]
    UnknownModuleKind(String),

    // ========================================================================
    // Layout Validation
    // ========================================================================
    #[error("Invalid layout '{name}': {reason}")]
    InvalidLayout { name: String, reason: String },

    #[error("Unknown layout '{0}'")]
    UnknownLayout(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingRequiredField { field } => vec![
                format!("Provide a value for '{field}'"),
                "Use --help for usage information".into(),
            ],
            Self::EmptyNamespace => vec![
                "Pass a package with --package (e.g. com.example)".into(),
                "Or set the namespace explicitly with --namespace".into(),
            ],
            Self::InvalidNamespace { .. } => vec![
                "Namespaces are dot-delimited identifiers, e.g. com.example.feature".into(),
                "Segments cannot be empty or contain path separators".into(),
            ],
            Self::InvalidDirectoryName { .. } => vec![
                "Use a single directory name such as 'payments'".into(),
                "Directory names cannot contain '/' or '\\'".into(),
            ],
            Self::NoModuleKinds => vec![
                "Select at least one of: public, impl, testing".into(),
                "Example: --modules public,impl".into(),
            ],
            Self::UnknownModuleKind(kind) => vec![
                format!("'{kind}' is not a module kind"),
                "Supported kinds: public, impl, testing".into(),
            ],
            Self::InvalidLayout { name, .. } => vec![
                format!("Fix the definition of layout '{name}'"),
                "Source roots must be relative and file names cannot contain separators".into(),
            ],
            Self::UnknownLayout(name) => vec![
                format!("No layout named '{name}'"),
                "Try: modkit layouts".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownLayout(_) => ErrorCategory::NotFound,
            Self::InvalidLayout { .. } => ErrorCategory::Configuration,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_has_suggestions() {
        let errors = [
            DomainError::MissingRequiredField { field: "namespace" },
            DomainError::EmptyNamespace,
            DomainError::NoModuleKinds,
            DomainError::UnknownModuleKind("api2".into()),
            DomainError::UnknownLayout("ios".into()),
        ];
        for err in errors {
            assert!(!err.suggestions().is_empty(), "no suggestions for {err}");
        }
    }

    #[test]
    fn unknown_layout_is_not_found() {
        assert_eq!(
            DomainError::UnknownLayout("x".into()).category(),
            ErrorCategory::NotFound
        );
        assert_eq!(DomainError::NoModuleKinds.category(), ErrorCategory::Validation);
    }
}
