//! Error handling for the modkit CLI.
//!
//! Every failure carries a user-facing message, actionable suggestions and
//! an exit code.

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use modkit_adapters::LayoutLoadError;
use modkit_core::application::ApplicationError;
use modkit_core::error::{ErrorKind, ModkitError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input that clap could not catch.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// A template file passed on the command line does not exist.
    #[error("Template file not found: {}", path.display())]
    TemplateNotFound { path: PathBuf },

    /// Modules exist on disk but the settings manifest was not updated.
    #[error("Created {} module(s) but the manifest was not updated: {source}", created.len())]
    PartialSuccess {
        created: Vec<String>,
        #[source]
        source: ApplicationError,
    },

    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    /// Custom layouts could not be loaded.
    #[error("Could not load layouts: {0}")]
    Layouts(#[from] LayoutLoadError),

    /// An error propagated from `modkit-core`.
    #[error("{0}")]
    Core(#[from] ModkitError),

    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The user declined the confirmation prompt.
    #[error("Operation cancelled")]
    Cancelled,
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message } => vec![
                format!("Check your input: {message}"),
                "Use --help for usage information".into(),
            ],

            Self::TemplateNotFound { path } => vec![
                format!("No file at {}", path.display()),
                "Print a starting point with: modkit template <KIND>".into(),
            ],

            Self::PartialSuccess { created, .. } => {
                let mut suggestions = vec!["Add these lines to the settings manifest:".to_string()];
                suggestions.extend(
                    created
                        .iter()
                        .map(|module| format!("  include(\"{module}\")")),
                );
                suggestions
            }

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                "Show the config file location with: modkit config path".into(),
                "Create a default config with: modkit init".into(),
            ],

            Self::Layouts(err) => vec![
                format!("Layout definition problem: {err}"),
                "Custom layouts are *.toml files in the layouts directory".into(),
            ],

            Self::Core(core) => core.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
            ],

            Self::Cancelled => vec!["No changes were made".into()],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::Cancelled => ErrorCategory::UserError,
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::PartialSuccess { .. } => ErrorCategory::PartialSuccess,
            Self::ConfigError { .. } | Self::Layouts(_) => ErrorCategory::Configuration,
            Self::Core(core) => match core.kind() {
                ErrorKind::Validation | ErrorKind::DirectoryCreation => ErrorCategory::UserError,
                ErrorKind::NotFound => ErrorCategory::NotFound,
                ErrorKind::ManifestUpdate => ErrorCategory::PartialSuccess,
                ErrorKind::Configuration => ErrorCategory::Configuration,
                ErrorKind::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category        | Code |
    /// |-----------------|------|
    /// | User error      |  2   |
    /// | Not found       |  3   |
    /// | Configuration   |  4   |
    /// | Partial success |  5   |
    /// | Internal        |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::PartialSuccess => 5,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "\u{2717}".red().bold(),
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "\u{2192}".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`].
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = format!("\nError: {self}\n");

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::PartialSuccess => tracing::warn!("Partial success: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::ConfigError {
            message: format!("{err:#}"),
            source: None,
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments, collisions).
    UserError,
    /// Something named by the user does not exist.
    NotFound,
    Configuration,
    /// Modules created, manifest untouched.
    PartialSuccess,
    /// Internal/system error.
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use modkit_core::domain::DomainError;
    use std::io;

    fn partial() -> CliError {
        CliError::PartialSuccess {
            created: vec![":payments:public".into()],
            source: ApplicationError::ManifestUpdate {
                path: PathBuf::from("/shop/settings.gradle.kts"),
                reason: "manifest file not found".into(),
            },
        }
    }

    #[test]
    fn partial_success_suggests_include_lines() {
        let suggestions = partial().suggestions();
        assert!(
            suggestions
                .iter()
                .any(|s| s.contains("include(\":payments:public\")"))
        );
    }

    #[test]
    fn exit_codes_follow_categories() {
        assert_eq!(
            CliError::InvalidInput {
                message: "x".into()
            }
            .exit_code(),
            2
        );
        assert_eq!(
            CliError::TemplateNotFound {
                path: PathBuf::from("t.kts")
            }
            .exit_code(),
            3
        );
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
        assert_eq!(partial().exit_code(), 5);
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn core_errors_map_by_kind() {
        let collision = CliError::Core(
            ApplicationError::AlreadyExists {
                path: PathBuf::from("/shop/payments"),
            }
            .into(),
        );
        assert_eq!(collision.exit_code(), 2);

        let unknown_layout = CliError::Core(DomainError::UnknownLayout("ios".into()).into());
        assert_eq!(unknown_layout.exit_code(), 3);

        let validation = CliError::Core(DomainError::EmptyNamespace.into());
        assert_eq!(validation.exit_code(), 2);
    }

    #[test]
    fn format_plain_contains_error_header() {
        let s = partial().format_plain(false);
        assert!(s.contains("Error:"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_shows_cause() {
        let s = partial().format_plain(true);
        assert!(s.contains("Caused by: Could not update manifest"));
        assert!(!s.contains("--verbose"));
    }
}
