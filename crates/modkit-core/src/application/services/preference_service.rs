//! Remembered values across invocations.
//!
//! Wraps a [`PreferenceStore`] with the well-known keys: the last package
//! name and the last template used for each module kind.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    application::ports::PreferenceStore, domain::ModuleKind, error::ModkitResult,
};

/// Package used when nothing has been remembered or configured.
pub const DEFAULT_PACKAGE: &str = "com.example";

pub const PACKAGE_NAME_KEY: &str = "modkit.packageName";

/// Store key of the remembered template for `kind`.
pub fn template_key(kind: ModuleKind) -> &'static str {
    match kind {
        ModuleKind::Public => "modkit.publicTemplate",
        ModuleKind::Impl => "modkit.implTemplate",
        ModuleKind::Testing => "modkit.testingTemplate",
    }
}

pub struct PreferenceService {
    store: Box<dyn PreferenceStore>,
}

impl PreferenceService {
    pub fn new(store: Box<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Value for `key`, or `default` when absent.
    pub fn get_or(&self, key: &str, default: &str) -> ModkitResult<String> {
        Ok(self.store.get(key)?.unwrap_or_else(|| default.to_string()))
    }

    pub fn last_package(&self) -> ModkitResult<Option<String>> {
        self.store.get(PACKAGE_NAME_KEY)
    }

    pub fn remember_package(&self, package: &str) -> ModkitResult<()> {
        debug!(package, "Remembering package name");
        self.store.set(PACKAGE_NAME_KEY, package)
    }

    pub fn template(&self, kind: ModuleKind) -> ModkitResult<Option<String>> {
        self.store.get(template_key(kind))
    }

    pub fn remember_template(&self, kind: ModuleKind, template: &str) -> ModkitResult<()> {
        debug!(%kind, "Remembering template");
        self.store.set(template_key(kind), template)
    }

    pub fn entries(&self) -> ModkitResult<BTreeMap<String, String>> {
        self.store.entries()
    }

    /// Remove every stored value. Returns how many were removed.
    pub fn clear(&self) -> ModkitResult<usize> {
        let keys: Vec<_> = self.store.entries()?.into_keys().collect();
        for key in &keys {
            self.store.remove(key)?;
        }
        Ok(keys.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ApplicationError, ports::MockPreferenceStore};
    use mockall::predicate::*;

    #[test]
    fn get_or_falls_back() {
        let mut store = MockPreferenceStore::new();
        store
            .expect_get()
            .with(eq(PACKAGE_NAME_KEY))
            .returning(|_| Ok(None));

        let prefs = PreferenceService::new(Box::new(store));
        assert_eq!(
            prefs.get_or(PACKAGE_NAME_KEY, DEFAULT_PACKAGE).unwrap(),
            DEFAULT_PACKAGE
        );
    }

    #[test]
    fn templates_use_per_kind_keys() {
        let mut store = MockPreferenceStore::new();
        store
            .expect_set()
            .with(eq("modkit.testingTemplate"), eq("// t"))
            .times(1)
            .returning(|_, _| Ok(()));

        let prefs = PreferenceService::new(Box::new(store));
        prefs.remember_template(ModuleKind::Testing, "// t").unwrap();
    }

    #[test]
    fn clear_removes_every_key() {
        let mut store = MockPreferenceStore::new();
        store.expect_entries().returning(|| {
            Ok(BTreeMap::from([
                (PACKAGE_NAME_KEY.to_string(), "com.app".to_string()),
                ("modkit.implTemplate".to_string(), "x".to_string()),
            ]))
        });
        store.expect_remove().times(2).returning(|_| Ok(()));

        let prefs = PreferenceService::new(Box::new(store));
        assert_eq!(prefs.clear().unwrap(), 2);
    }

    #[test]
    fn store_errors_propagate() {
        let mut store = MockPreferenceStore::new();
        store.expect_get().returning(|_| {
            Err(ApplicationError::PreferenceStore {
                reason: "corrupt".into(),
            }
            .into())
        });

        let prefs = PreferenceService::new(Box::new(store));
        assert!(prefs.last_package().is_err());
    }
}
