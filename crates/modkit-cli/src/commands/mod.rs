//! Command handlers, one module per subcommand.

use modkit_adapters::{FilePreferenceStore, LayoutRegistry};
use modkit_core::application::PreferenceService;

use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
};

pub mod completions;
pub mod config;
pub mod init;
pub mod layouts;
pub mod new;
pub mod prefs;
pub mod template;

/// Built-in layouts plus the custom ones from the configured directory.
pub(crate) fn layout_registry(config: &AppConfig) -> CliResult<LayoutRegistry> {
    match config.layouts_dir() {
        Some(dir) => Ok(LayoutRegistry::load(&dir)?),
        None => Ok(LayoutRegistry::builtin()),
    }
}

/// Preference service backed by the configured preferences file.
pub(crate) fn preference_service(config: &AppConfig) -> CliResult<PreferenceService> {
    let path = config
        .preferences_file()
        .ok_or_else(|| CliError::ConfigError {
            message: "no location for the preferences file; set paths.preferences_file".into(),
            source: None,
        })?;
    Ok(PreferenceService::new(Box::new(FilePreferenceStore::new(
        path,
    ))))
}
