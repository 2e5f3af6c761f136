//! In-memory preference store for testing.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use modkit_core::{
    application::{ApplicationError, ports::PreferenceStore},
    error::ModkitResult,
};

/// Key-value store that lives for the process. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value.
    pub fn with(self, key: &str, value: &str) -> Self {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.to_string(), value.to_string());
        }
        self
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> ModkitResult<Option<String>> {
        let values = self
            .values
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ModkitResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ModkitResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        values.remove(key);
        Ok(())
    }

    fn entries(&self) -> ModkitResult<BTreeMap<String, String>> {
        let values = self
            .values
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(values.clone())
    }
}
