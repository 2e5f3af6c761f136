//! TOML-file preference store.
//!
//! The whole store is one flat table:
//!
//! ```toml
//! "modkit.packageName" = "com.shop"
//! "modkit.implTemplate" = """
//! plugins { kotlin("jvm") }
//! """
//! ```
//!
//! The file is read on first access and rewritten on every `set`/`remove`.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use tracing::{debug, instrument};

use modkit_core::{
    application::{ApplicationError, ports::PreferenceStore},
    error::{ModkitError, ModkitResult},
};

/// File name inside the data directory.
pub const PREFERENCES_FILE: &str = "preferences.toml";

/// Preference store persisted as a TOML table.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    cache: RwLock<Option<BTreeMap<String, String>>>,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    /// `<data dir>/preferences.toml`, if the platform has a data directory.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "modkit", "modkit")
            .map(|d| d.data_dir().join(PREFERENCES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> ModkitResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| store_error(&self.path, e))?;
        toml::from_str(&raw).map_err(|e| store_error(&self.path, e))
    }

    fn write_file(&self, values: &BTreeMap<String, String>) -> ModkitResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| store_error(parent, e))?;
        }
        let raw = toml::to_string(values).map_err(|e| store_error(&self.path, e))?;
        fs::write(&self.path, raw).map_err(|e| store_error(&self.path, e))?;
        debug!(path = %self.path.display(), entries = values.len(), "Preferences saved");
        Ok(())
    }

    /// Run `f` on the loaded table, loading it first if needed.
    fn with_values<T>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, String>) -> ModkitResult<T>,
    ) -> ModkitResult<T> {
        let mut cache = self
            .cache
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        if cache.is_none() {
            *cache = Some(self.read_file()?);
        }
        f(cache.get_or_insert_with(BTreeMap::new))
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> ModkitResult<Option<String>> {
        self.with_values(|values| Ok(values.get(key).cloned()))
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    fn set(&self, key: &str, value: &str) -> ModkitResult<()> {
        self.with_values(|values| {
            values.insert(key.to_string(), value.to_string());
            self.write_file(values)
        })
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn remove(&self, key: &str) -> ModkitResult<()> {
        self.with_values(|values| {
            if values.remove(key).is_some() {
                self.write_file(values)?;
            }
            Ok(())
        })
    }

    fn entries(&self) -> ModkitResult<BTreeMap<String, String>> {
        self.with_values(|values| Ok(values.clone()))
    }
}

fn store_error(path: &Path, e: impl std::fmt::Display) -> ModkitError {
    ApplicationError::PreferenceStore {
        reason: format!("{}: {e}", path.display()),
    }
    .into()
}
