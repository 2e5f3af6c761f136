//! End-to-end scaffolding through the real adapters.

use std::fs;
use std::path::Path;

use modkit_adapters::{
    FilePreferenceStore, LayoutRegistry, LocalFilesystem, MemoryFilesystem, RecordingNotifier,
};
use modkit_core::application::ApplicationError;
use modkit_core::prelude::*;
use tempfile::TempDir;

fn memory_service(fs: &MemoryFilesystem, notifier: &RecordingNotifier) -> ScaffoldService {
    ScaffoldService::new(Box::new(fs.clone()), Box::new(notifier.clone()))
}

fn payments(kinds: impl IntoIterator<Item = ModuleKind>) -> ModuleCreationRequest {
    ModuleCreationRequest::builder()
        .parent("/shop")
        .directory_name("payments")
        .namespace("com.app")
        .kinds(kinds)
        .build()
        .unwrap()
}

#[test]
fn public_only_scenario() {
    let fs = MemoryFilesystem::new().with_file("/shop/settings.gradle.kts", "rootProject.name = \"shop\"\n");
    let notifier = RecordingNotifier::new();

    let report = memory_service(&fs, &notifier)
        .create_modules(payments([ModuleKind::Public]))
        .unwrap();

    assert!(report.is_complete());
    assert!(fs.exists(Path::new("/shop/payments/public/src/commonMain/kotlin/com/app")));
    assert!(!fs.exists(Path::new("/shop/payments/impl")));
    assert_eq!(
        fs.list_files()
            .iter()
            .filter(|p| p.starts_with("/shop/payments"))
            .count(),
        1
    );
    assert_eq!(
        fs.read_file("/shop/settings.gradle.kts").unwrap(),
        "rootProject.name = \"shop\"\n\ninclude(\":payments:public\")\n"
    );
    assert_eq!(notifier.severities(), vec![Severity::Info]);
}

#[test]
fn all_kinds_scenario() {
    let fs = MemoryFilesystem::new().with_file("/shop/settings.gradle.kts", "include(\":app\")\n");
    let notifier = RecordingNotifier::new();

    let report = memory_service(&fs, &notifier)
        .create_modules(payments(ModuleKind::ALL))
        .unwrap();

    let created: Vec<_> = report.created.iter().map(|m| m.as_str()).collect();
    assert_eq!(created, vec![":payments:public", ":payments:impl", ":payments:testing"]);
    assert_eq!(
        fs.read_file("/shop/settings.gradle.kts").unwrap(),
        "include(\":app\")\n\
         include(\":payments:impl\")\n\
         include(\":payments:public\")\n\
         include(\":payments:testing\")\n"
    );

    let testing = fs.read_file("/shop/payments/testing/build.gradle.kts").unwrap();
    assert!(testing.contains(r#"project(":payments:public")"#));
    assert!(testing.contains(r#"project(":payments:impl")"#));
}

#[test]
fn collision_scenario() {
    let fs = MemoryFilesystem::new()
        .with_dir("/shop/payments")
        .with_file("/shop/settings.gradle.kts", "");
    let notifier = RecordingNotifier::new();
    let before = fs.list_dirs();

    let err = memory_service(&fs, &notifier)
        .create_modules(payments([ModuleKind::Public]))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DirectoryCreation);
    assert_eq!(fs.list_dirs(), before);
    assert_eq!(fs.read_file("/shop/settings.gradle.kts").unwrap(), "");
    assert_eq!(notifier.severities(), vec![Severity::Error]);
}

#[test]
fn missing_manifest_scenario() {
    let fs = MemoryFilesystem::new().with_dir("/shop");
    let notifier = RecordingNotifier::new();

    let report = memory_service(&fs, &notifier)
        .create_modules(payments([ModuleKind::Public, ModuleKind::Impl]))
        .unwrap();

    assert!(!report.is_complete());
    assert!(fs.exists(Path::new("/shop/payments/impl/build.gradle.kts")));
    assert!(!fs.exists(Path::new("/shop/settings.gradle.kts")));
    assert_eq!(notifier.severities(), vec![Severity::Warning]);
}

#[test]
fn read_only_manifest_is_partial_success() {
    let fs = MemoryFilesystem::new().with_file("/shop/settings.gradle.kts", "");
    fs.set_read_only("/shop/settings.gradle.kts");
    let notifier = RecordingNotifier::new();

    let report = memory_service(&fs, &notifier)
        .create_modules(payments([ModuleKind::Public]))
        .unwrap();

    assert!(matches!(
        report.manifest,
        ManifestStatus::Failed(ApplicationError::ManifestUpdate { .. })
    ));
}

#[test]
fn failure_midway_leaves_created_directories() {
    let fs = MemoryFilesystem::new().with_file("/shop/settings.gradle.kts", "");
    fs.set_read_only("/shop/payments/impl");
    let notifier = RecordingNotifier::new();

    let err = memory_service(&fs, &notifier)
        .create_modules(payments(ModuleKind::ALL))
        .unwrap_err();

    assert!(matches!(
        err,
        ModkitError::Application(ApplicationError::DirectoryCreation { .. })
    ));
    assert!(fs.exists(Path::new("/shop/payments/public/build.gradle.kts")));
    assert_eq!(fs.read_file("/shop/settings.gradle.kts").unwrap(), "");
}

#[test]
fn plan_leaves_filesystem_untouched() {
    let fs = MemoryFilesystem::new().with_file("/shop/settings.gradle.kts", "");
    let dirs = fs.list_dirs();
    let files = fs.list_files();

    let plan = memory_service(&fs, &RecordingNotifier::new())
        .plan(&payments(ModuleKind::ALL))
        .unwrap();

    assert_eq!(plan.modules().len(), 3);
    assert_eq!(fs.list_dirs(), dirs);
    assert_eq!(fs.list_files(), files);
}

#[test]
fn local_filesystem_with_custom_layout() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("shop");
    let layouts = temp.path().join("layouts");
    fs::create_dir_all(root.join("libs")).unwrap();
    fs::create_dir_all(&layouts).unwrap();
    fs::write(root.join("settings.gradle"), "rootProject.name = 'shop'\r\n").unwrap();
    fs::write(
        layouts.join("java.toml"),
        r#"
name = "java"
extends = "jvm"
source_root = "src/main/java"
build_file = "build.gradle"
manifest_file = "settings.gradle"

[templates]
public = "// $projectDirectory:$directoryName ($namespace)\n"
"#,
    )
    .unwrap();

    let registry = LayoutRegistry::load(&layouts).unwrap();
    let request = ModuleCreationRequest::builder()
        .project_root(&root)
        .parent(root.join("libs"))
        .directory_name("audit")
        .namespace("com.shop.audit")
        .kind(ModuleKind::Public)
        .layout(registry.get("java").unwrap().clone())
        .build()
        .unwrap();

    let service = ScaffoldService::new(Box::new(LocalFilesystem::new()), Box::new(RecordingNotifier::new()));
    let report = service.create_modules(request).unwrap();
    assert!(report.is_complete());

    let module = root.join("libs/audit/public");
    assert!(module.join("src/main/java/com/shop/audit").is_dir());
    assert_eq!(
        fs::read_to_string(module.join("build.gradle")).unwrap(),
        "// :libs:audit (com.shop.audit)\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("settings.gradle")).unwrap(),
        "rootProject.name = 'shop'\r\n\r\ninclude(\":libs:audit:public\")\r\n"
    );
}

#[test]
fn preferences_round_trip_across_instances() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("preferences.toml");

    PreferenceService::new(Box::new(FilePreferenceStore::new(&path)))
        .remember_package("com.shop")
        .unwrap();

    let prefs = PreferenceService::new(Box::new(FilePreferenceStore::new(&path)));
    assert_eq!(prefs.last_package().unwrap().as_deref(), Some("com.shop"));
    assert_eq!(prefs.clear().unwrap(), 1);
    assert!(prefs.last_package().unwrap().is_none());
}
