//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `MODKIT_<SECTION>__<KEY>`, e.g.
//!    `MODKIT_DEFAULTS__LAYOUT=jvm`
//! 3. Config file (`--config FILE`, or `config.toml` in the user config dir)
//! 4. Built-in defaults

use std::path::PathBuf;

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use modkit_adapters::FilePreferenceStore;
use modkit_core::domain::{DEFAULT_LAYOUT, DomainError, ModuleKinds};

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "MODKIT";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Values used when `modkit new` flags are omitted.
    pub defaults: Defaults,
    /// Locations of user data.
    pub paths: PathsConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Package used when none was given and none is remembered.
    pub package: Option<String>,
    /// Comma-separated module kinds.
    pub modules: String,
    pub layout: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            package: None,
            modules: "public,impl".into(),
            layout: DEFAULT_LAYOUT.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory scanned for custom `*.toml` layouts.
    pub layouts_dir: Option<PathBuf>,
    /// File holding remembered values.
    pub preferences_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path.clone()).required(true),
            None => File::from(Self::config_path()).required(false),
        };

        let settings = Config::builder()
            .add_source(
                Config::try_from(&Self::default()).context("Failed to encode built-in defaults")?,
            )
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("Failed to read configuration")?;

        settings
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.modkit.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "modkit", "modkit")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".modkit.toml"))
    }

    /// The file in effect: `--config` when given, else the default path.
    pub fn active_path(explicit: Option<&PathBuf>) -> PathBuf {
        explicit.cloned().unwrap_or_else(Self::config_path)
    }

    /// Directory searched for custom layouts.
    pub fn layouts_dir(&self) -> Option<PathBuf> {
        self.paths.layouts_dir.clone().or_else(|| {
            directories::ProjectDirs::from("com", "modkit", "modkit")
                .map(|d| d.config_dir().join("layouts"))
        })
    }

    /// File backing the preference store.
    pub fn preferences_file(&self) -> Option<PathBuf> {
        self.paths
            .preferences_file
            .clone()
            .or_else(FilePreferenceStore::default_path)
    }

    /// Module kinds created when `--modules` is omitted.
    pub fn default_kinds(&self) -> Result<ModuleKinds, DomainError> {
        ModuleKinds::parse_list(&self.defaults.modules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modkit_core::domain::ModuleKind;
    use tempfile::TempDir;

    #[test]
    fn defaults_create_public_and_impl() {
        let kinds = AppConfig::default().default_kinds().unwrap();
        let kinds: Vec<_> = kinds.iter().collect();
        assert_eq!(kinds, vec![ModuleKind::Public, ModuleKind::Impl]);
    }

    #[test]
    fn default_layout_is_kmp() {
        assert_eq!(AppConfig::default().defaults.layout, "kmp");
        assert!(AppConfig::default().defaults.package.is_none());
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("modkit.toml");
        std::fs::write(
            &path,
            "[defaults]\npackage = \"com.shop\"\nlayout = \"jvm\"\n\n[paths]\nlayouts_dir = \"/opt/layouts\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.defaults.package.as_deref(), Some("com.shop"));
        assert_eq!(cfg.defaults.layout, "jvm");
        assert_eq!(cfg.defaults.modules, "public,impl");
        assert_eq!(cfg.layouts_dir(), Some(PathBuf::from("/opt/layouts")));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn default_file_round_trips_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.defaults.modules, "public,impl");
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
