//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Check the parent directory and the target
//! 2. Plan the module tree (templates resolved, namespace expanded)
//! 3. Create directories and build files in order
//! 4. Merge the new module paths into the settings manifest
//!
//! Failures in steps 1-3 are hard errors. Already-created directories are
//! left in place. A failure in step 4 is reported inside the
//! [`CreationReport`] instead, because the modules already exist on disk.

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, Notifier, Severity},
    },
    domain::{FsEntry, ModuleCreationRequest, ModulePath, ScaffoldPlan, merge_entries, parse_entries},
    error::{ModkitError, ModkitResult},
};

/// Outcome of the manifest step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestStatus {
    /// The manifest now includes every created module. `added` lists the
    /// paths that were not already present.
    Updated { path: PathBuf, added: Vec<ModulePath> },
    /// Modules exist on disk but the manifest could not be updated.
    Failed(ApplicationError),
}

/// Result of a successful (possibly partially successful) scaffold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationReport {
    pub root: PathBuf,
    pub created: Vec<ModulePath>,
    pub manifest: ManifestStatus,
}

impl CreationReport {
    /// `true` when the manifest step succeeded as well.
    pub fn is_complete(&self) -> bool {
        matches!(self.manifest, ManifestStatus::Updated { .. })
    }
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    notifier: Box<dyn Notifier>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use modkit_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     filesystem, // impl Filesystem
    ///     notifier,   // impl Notifier
    /// );
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>, notifier: Box<dyn Notifier>) -> Self {
        Self {
            filesystem,
            notifier,
        }
    }

    /// Plan a request without touching the filesystem.
    ///
    /// The parent must exist and be a directory, and the target must not
    /// exist yet.
    pub fn plan(&self, request: &ModuleCreationRequest) -> ModkitResult<ScaffoldPlan> {
        let parent = request.parent();
        if !self.filesystem.exists(parent) {
            return Err(ApplicationError::InvalidParent {
                path: parent.to_path_buf(),
                reason: "does not exist".into(),
            }
            .into());
        }
        if !self.filesystem.is_dir(parent) {
            return Err(ApplicationError::InvalidParent {
                path: parent.to_path_buf(),
                reason: "not a directory".into(),
            }
            .into());
        }

        let target = request.target_dir();
        if self.filesystem.exists(&target) {
            return Err(ApplicationError::AlreadyExists { path: target }.into());
        }

        Ok(ScaffoldPlan::for_request(request))
    }

    /// Create every requested module and register it in the manifest.
    ///
    /// Sends exactly one notification per call.
    #[instrument(
        skip_all,
        fields(
            directory = %request.directory_name(),
            namespace = %request.namespace(),
            kinds = %request.kinds(),
            layout = request.layout().name()
        )
    )]
    pub fn create_modules(&self, request: ModuleCreationRequest) -> ModkitResult<CreationReport> {
        info!(parent = %request.parent().display(), "Creating modules");

        let plan = match self.plan(&request).and_then(|plan| {
            self.execute(&plan)?;
            Ok(plan)
        }) {
            Ok(plan) => plan,
            Err(e) => {
                warn!(error = %e, "Module creation failed");
                self.notifier
                    .notify(&format!("Module creation failed: {e}"), Severity::Error);
                return Err(e);
            }
        };

        let manifest = self.register(&plan);
        let report = CreationReport {
            root: plan.root().to_path_buf(),
            created: plan.modules().to_vec(),
            manifest,
        };

        let names = report
            .created
            .iter()
            .map(ModulePath::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        match &report.manifest {
            ManifestStatus::Updated { path, added } => {
                info!(added = added.len(), manifest = %path.display(), "Scaffold completed successfully");
                self.notifier.notify(
                    &format!("Created {names} under {}", report.root.display()),
                    Severity::Info,
                );
            }
            ManifestStatus::Failed(e) => {
                warn!(error = %e, "Modules created but manifest not updated");
                self.notifier.notify(
                    &format!("Created {names}, but the manifest was not updated: {e}"),
                    Severity::Warning,
                );
            }
        }

        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Create every planned entry in order. Stops at the first failure.
    fn execute(&self, plan: &ScaffoldPlan) -> ModkitResult<()> {
        for entry in plan.entries() {
            let result = match entry {
                FsEntry::Directory { path } => self.filesystem.create_dir(path),
                FsEntry::File { path, content } => self.filesystem.write_new_file(path, content),
            };
            result.map_err(|e| creation_error(entry.path(), e))?;
            debug!(path = %entry.path().display(), "Created");
        }
        Ok(())
    }

    fn register(&self, plan: &ScaffoldPlan) -> ManifestStatus {
        match self.merge_manifest(plan.manifest(), plan.modules()) {
            Ok(added) => ManifestStatus::Updated {
                path: plan.manifest().to_path_buf(),
                added,
            },
            Err(e) => ManifestStatus::Failed(e),
        }
    }

    fn merge_manifest(
        &self,
        path: &Path,
        modules: &[ModulePath],
    ) -> Result<Vec<ModulePath>, ApplicationError> {
        let failed = |reason: String| ApplicationError::ManifestUpdate {
            path: path.to_path_buf(),
            reason,
        };

        if !self.filesystem.exists(path) {
            return Err(failed("manifest file not found".into()));
        }

        let text = self
            .filesystem
            .read_to_string(path)
            .map_err(|e| failed(e.to_string()))?;

        let existing = parse_entries(&text);
        let added = modules
            .iter()
            .filter(|m| !existing.contains(m.as_str()))
            .cloned()
            .collect();

        let merged = merge_entries(&text, modules);
        if merged != text {
            self.filesystem
                .write_file(path, &merged)
                .map_err(|e| failed(e.to_string()))?;
        }

        Ok(added)
    }
}

fn creation_error(path: &Path, err: ModkitError) -> ModkitError {
    match err {
        ModkitError::Application(ApplicationError::AlreadyExists { .. }) => err,
        other => ApplicationError::DirectoryCreation {
            path: path.to_path_buf(),
            reason: other.to_string(),
        }
        .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockFilesystem, MockNotifier};
    use crate::domain::{DomainError, ModuleKind};
    use mockall::predicate::*;

    fn request(kinds: &[ModuleKind]) -> ModuleCreationRequest {
        ModuleCreationRequest::builder()
            .parent("/repo")
            .directory_name("payments")
            .namespace("com.app")
            .kinds(kinds.iter().copied())
            .build()
            .unwrap()
    }

    fn notifier_expecting(severity: Severity) -> MockNotifier {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(move |_, s| *s == severity)
            .times(1)
            .return_const(());
        notifier
    }

    /// Parent exists, target does not, every creation succeeds.
    fn happy_filesystem() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .with(eq(Path::new("/repo")))
            .return_const(true);
        fs.expect_is_dir()
            .with(eq(Path::new("/repo")))
            .return_const(true);
        fs.expect_exists()
            .with(eq(Path::new("/repo/payments")))
            .return_const(false);
        fs.expect_create_dir().returning(|_| Ok(()));
        fs.expect_write_new_file().returning(|_, _| Ok(()));
        fs
    }

    #[test]
    fn public_only_updates_manifest() {
        let mut fs = happy_filesystem();
        let manifest = Path::new("/repo/settings.gradle.kts");
        fs.expect_exists().with(eq(manifest)).return_const(true);
        fs.expect_read_to_string()
            .with(eq(manifest))
            .returning(|_| Ok("rootProject.name = \"shop\"\n".into()));
        fs.expect_write_file()
            .withf(|p, c| {
                p == Path::new("/repo/settings.gradle.kts")
                    && c == "rootProject.name = \"shop\"\n\ninclude(\":payments:public\")\n"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = ScaffoldService::new(Box::new(fs), Box::new(notifier_expecting(Severity::Info)));
        let report = service.create_modules(request(&[ModuleKind::Public])).unwrap();

        assert!(report.is_complete());
        assert_eq!(report.created.len(), 1);
        assert_eq!(report.created[0].as_str(), ":payments:public");
    }

    #[test]
    fn unchanged_manifest_is_not_rewritten() {
        let mut fs = happy_filesystem();
        fs.expect_exists()
            .with(eq(Path::new("/repo/settings.gradle.kts")))
            .return_const(true);
        fs.expect_read_to_string()
            .returning(|_| Ok("include(\":payments:public\")\n".into()));
        fs.expect_write_file().never();

        let service = ScaffoldService::new(Box::new(fs), Box::new(notifier_expecting(Severity::Info)));
        let report = service.create_modules(request(&[ModuleKind::Public])).unwrap();

        match report.manifest {
            ManifestStatus::Updated { added, .. } => assert!(added.is_empty()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn collision_stops_before_any_mutation() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_is_dir().return_const(true);
        fs.expect_create_dir().never();
        fs.expect_write_new_file().never();
        fs.expect_read_to_string().never();
        fs.expect_write_file().never();

        let service = ScaffoldService::new(Box::new(fs), Box::new(notifier_expecting(Severity::Error)));
        let err = service.create_modules(request(&ModuleKind::ALL)).unwrap_err();

        assert!(matches!(
            err,
            ModkitError::Application(ApplicationError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn missing_parent_is_invalid() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);

        let service = ScaffoldService::new(Box::new(fs), Box::new(notifier_expecting(Severity::Error)));
        let err = service.create_modules(request(&[ModuleKind::Public])).unwrap_err();

        assert_eq!(err.kind(), crate::error::ErrorKind::Validation);
    }

    #[test]
    fn missing_manifest_is_partial_success() {
        let mut fs = happy_filesystem();
        fs.expect_exists()
            .with(eq(Path::new("/repo/settings.gradle.kts")))
            .return_const(false);
        fs.expect_read_to_string().never();
        fs.expect_write_file().never();

        let service =
            ScaffoldService::new(Box::new(fs), Box::new(notifier_expecting(Severity::Warning)));
        let report = service.create_modules(request(&ModuleKind::ALL)).unwrap();

        assert!(!report.is_complete());
        assert_eq!(report.created.len(), 3);
        assert!(matches!(
            report.manifest,
            ManifestStatus::Failed(ApplicationError::ManifestUpdate { .. })
        ));
    }

    #[test]
    fn io_failure_midway_is_directory_creation_error() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|p| p == Path::new("/repo"));
        fs.expect_is_dir().return_const(true);
        fs.expect_create_dir().returning(|p| {
            if p.ends_with("impl") {
                Err(ApplicationError::Filesystem {
                    path: p.to_path_buf(),
                    reason: "permission denied".into(),
                }
                .into())
            } else {
                Ok(())
            }
        });
        fs.expect_write_new_file().returning(|_, _| Ok(()));
        fs.expect_write_file().never();

        let service = ScaffoldService::new(Box::new(fs), Box::new(notifier_expecting(Severity::Error)));
        let err = service.create_modules(request(&ModuleKind::ALL)).unwrap_err();

        match err {
            ModkitError::Application(ApplicationError::DirectoryCreation { path, reason }) => {
                assert_eq!(path, Path::new("/repo/payments/impl"));
                assert!(reason.contains("permission denied"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn plan_does_not_mutate() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|p| p == Path::new("/repo"));
        fs.expect_is_dir().return_const(true);
        fs.expect_create_dir().never();
        fs.expect_write_new_file().never();

        let service = ScaffoldService::new(Box::new(fs), Box::new(MockNotifier::new()));
        let plan = service.plan(&request(&[ModuleKind::Public, ModuleKind::Impl])).unwrap();
        assert_eq!(plan.files().count(), 2);
    }

    #[test]
    fn validation_happens_before_io() {
        let err = ModuleCreationRequest::builder()
            .parent("/repo")
            .directory_name("payments")
            .namespace("")
            .kind(ModuleKind::Public)
            .build()
            .unwrap_err();
        assert_eq!(err, DomainError::EmptyNamespace);
    }
}
