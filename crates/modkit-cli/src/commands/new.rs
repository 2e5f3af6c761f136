//! Implementation of the `modkit new` command.
//!
//! Responsibility: turn CLI arguments, config and remembered values into a
//! `ModuleCreationRequest`, call the core scaffold service, and display the
//! report. No scaffolding logic lives here.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, instrument, warn};

use modkit_adapters::LocalFilesystem;
use modkit_core::{
    application::{CreationReport, DEFAULT_PACKAGE, ManifestStatus, PreferenceService, ScaffoldService},
    domain::{ModuleCreationRequest, ModuleKind, ModuleKinds, ModulePath, ScaffoldPlan, derive_namespace},
    error::ModkitError,
};

use crate::{
    cli::{GlobalArgs, NewArgs},
    commands::{layout_registry, preference_service},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt,
};

/// Execute the `modkit new` command.
///
/// 1. Resolve the layout, parent directory and project root
/// 2. Resolve package, namespace and module kinds (flags, then remembered
///    values, then config, prompting when interactive)
/// 3. Load template overrides
/// 4. Print the plan and stop on `--dry-run`
/// 5. Create the modules, remember the inputs, print the report
#[instrument(skip_all, fields(name = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Layout and locations
    let registry = layout_registry(&config)?;
    let layout_name = args.layout.as_deref().unwrap_or(&config.defaults.layout);
    let layout = registry
        .get(layout_name)
        .map_err(ModkitError::from)?
        .clone();

    let parent = absolute(&args.parent);
    let project_root = match &args.project_root {
        Some(root) => absolute(root),
        None => discover_project_root(&parent, layout.manifest_file()),
    };
    debug!(
        parent = %parent.display(),
        project_root = %project_root.display(),
        layout = layout.name(),
        "Locations resolved"
    );

    // 2. Package, namespace, kinds
    let prefs = preference_service(&config)?;
    let interactive = !args.yes && !global.quiet && !output.is_json() && prompt::available();

    let package = resolve_package(&args, &config, &prefs, interactive)?;
    let namespace = args
        .namespace
        .clone()
        .unwrap_or_else(|| derive_namespace(&package, &args.name));
    let kinds = resolve_kinds(&args, &config, interactive)?;

    // 3. Templates
    let templates = resolve_templates(&args, &prefs, &kinds)?;

    let mut builder = ModuleCreationRequest::builder()
        .project_root(&project_root)
        .parent(&parent)
        .directory_name(args.name.as_str())
        .namespace(namespace)
        .kinds(kinds.iter())
        .layout(layout);
    for (kind, choice) in &templates {
        builder = builder.template(*kind, choice.content.as_str());
    }
    let request = builder.build().map_err(ModkitError::from)?;

    let service = ScaffoldService::new(Box::new(LocalFilesystem::new()), output.notifier());

    // 4. Dry run: plan only.
    if args.dry_run {
        let plan = service.plan(&request)?;
        return show_plan(&plan, &output);
    }

    if interactive {
        show_summary(&request, &output)?;
        if !prompt::confirm("Create these modules?")? {
            return Err(CliError::Cancelled);
        }
    }

    // 5. Create
    let report = service.create_modules(request)?;
    remember(&prefs, &package, &templates, args.remember_templates, &output);
    show_report(&report, &output)?;

    match report.manifest {
        ManifestStatus::Updated { .. } => Ok(()),
        ManifestStatus::Failed(source) => Err(CliError::PartialSuccess {
            created: report.created.into_iter().map(ModulePath::into_string).collect(),
            source,
        }),
    }
}

// ── Locations ─────────────────────────────────────────────────────────────────

fn absolute(path: &Path) -> PathBuf {
    path.canonicalize()
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Nearest directory at or above `parent` that holds the manifest file,
/// else `parent` itself.
pub fn discover_project_root(parent: &Path, manifest_file: &str) -> PathBuf {
    parent
        .ancestors()
        .find(|dir| dir.join(manifest_file).is_file())
        .unwrap_or(parent)
        .to_path_buf()
}

// ── Inputs ────────────────────────────────────────────────────────────────────

/// `--package`, then the remembered package, then config, then the built-in
/// default. Interactive runs confirm the fallback.
fn resolve_package(
    args: &NewArgs,
    config: &AppConfig,
    prefs: &PreferenceService,
    interactive: bool,
) -> CliResult<String> {
    if let Some(package) = &args.package {
        return Ok(package.clone());
    }

    let fallback = match prefs.last_package()? {
        Some(last) => last,
        None => config
            .defaults
            .package
            .clone()
            .unwrap_or_else(|| DEFAULT_PACKAGE.to_string()),
    };

    if interactive && args.namespace.is_none() {
        prompt::package(&fallback)
    } else {
        Ok(fallback)
    }
}

fn resolve_kinds(args: &NewArgs, config: &AppConfig, interactive: bool) -> CliResult<ModuleKinds> {
    if !args.modules.is_empty() {
        let kinds = ModuleKinds::new(args.modules.iter().map(|k| ModuleKind::from(*k)))
            .map_err(ModkitError::from)?;
        return Ok(kinds);
    }

    let defaults = config.default_kinds().map_err(|e| CliError::ConfigError {
        message: format!("invalid defaults.modules '{}': {e}", config.defaults.modules),
        source: Some(Box::new(e)),
    })?;

    if interactive {
        prompt::modules(&defaults)
    } else {
        Ok(defaults)
    }
}

struct TemplateChoice {
    content: String,
    /// Read from a file given on this run, as opposed to remembered.
    from_file: bool,
}

/// Template files given as flags, else remembered templates.
fn resolve_templates(
    args: &NewArgs,
    prefs: &PreferenceService,
    kinds: &ModuleKinds,
) -> CliResult<BTreeMap<ModuleKind, TemplateChoice>> {
    let mut templates = BTreeMap::new();

    for kind in kinds.iter() {
        let choice = match args.template_file(kind) {
            Some(path) => Some(TemplateChoice {
                content: read_template(path)?,
                from_file: true,
            }),
            None => prefs.template(kind)?.map(|content| TemplateChoice {
                content,
                from_file: false,
            }),
        };
        if let Some(choice) = choice {
            debug!(%kind, from_file = choice.from_file, "Template override");
            templates.insert(kind, choice);
        }
    }

    Ok(templates)
}

fn read_template(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CliError::TemplateNotFound {
            path: path.to_path_buf(),
        },
        _ => CliError::IoError {
            message: format!("Failed to read template '{}'", path.display()),
            source: e,
        },
    })
}

/// Persist the inputs of a run that created modules. Failures only warn;
/// the modules already exist.
fn remember(
    prefs: &PreferenceService,
    package: &str,
    templates: &BTreeMap<ModuleKind, TemplateChoice>,
    remember_templates: bool,
    output: &OutputManager,
) {
    let mut results = vec![prefs.remember_package(package)];
    if remember_templates {
        results.extend(
            templates
                .iter()
                .filter(|(_, choice)| choice.from_file)
                .map(|(kind, choice)| prefs.remember_template(*kind, &choice.content)),
        );
    }

    for err in results.into_iter().filter_map(Result::err) {
        warn!(error = %err, "Could not remember values");
        // Nothing useful to do if the terminal write fails as well.
        let _ = output.warning(&format!("Could not remember values: {err}"));
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

fn show_summary(request: &ModuleCreationRequest, out: &OutputManager) -> CliResult<()> {
    out.header("Configuration")?;
    out.print(&format!("  Directory:    {}", request.target_dir().display()))?;
    out.print(&format!("  Namespace:    {}", request.namespace()))?;
    out.print(&format!("  Modules:      {}", request.kinds()))?;
    out.print(&format!("  Layout:       {}", request.layout().name()))?;
    out.print(&format!("  Manifest:     {}", request.manifest_path().display()))?;
    out.print("")?;
    Ok(())
}

fn show_plan(plan: &ScaffoldPlan, out: &OutputManager) -> CliResult<()> {
    if out.is_json() {
        out.json(plan)?;
        return Ok(());
    }

    out.info(&format!("Dry run: would create {}", plan.root().display()))?;
    for dir in plan.directories() {
        out.print(&format!("  dir   {}", dir.display()))?;
    }
    for (file, _) in plan.files() {
        out.print(&format!("  file  {}", file.display()))?;
    }
    out.print(&format!("  register in {}:", plan.manifest().display()))?;
    for module in plan.modules() {
        out.print(&format!("    include(\"{module}\")"))?;
    }
    Ok(())
}

/// JSON shape of a [`CreationReport`].
#[derive(Serialize)]
struct ReportJson<'a> {
    root: &'a Path,
    created: &'a [ModulePath],
    manifest: ManifestJson<'a>,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum ManifestJson<'a> {
    Updated {
        path: &'a Path,
        added: &'a [ModulePath],
    },
    Failed {
        reason: String,
    },
}

impl<'a> From<&'a CreationReport> for ReportJson<'a> {
    fn from(report: &'a CreationReport) -> Self {
        let manifest = match &report.manifest {
            ManifestStatus::Updated { path, added } => ManifestJson::Updated { path, added },
            ManifestStatus::Failed(e) => ManifestJson::Failed {
                reason: e.to_string(),
            },
        };
        Self {
            root: &report.root,
            created: &report.created,
            manifest,
        }
    }
}

fn show_report(report: &CreationReport, out: &OutputManager) -> CliResult<()> {
    if out.is_json() {
        out.json(&ReportJson::from(report))?;
        return Ok(());
    }

    if let ManifestStatus::Updated { path, added } = &report.manifest {
        let file = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        if added.is_empty() {
            out.print(&format!("  {file} already includes every module"))?;
        } else {
            out.print(&format!("  Registered {} module(s) in {file}", added.len()))?;
        }
        out.print("")?;
        out.print("Next steps:")?;
        out.print("  Sync your Gradle build to pick up the new modules")?;
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn project_root_is_nearest_ancestor_with_manifest() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("shop");
        let parent = root.join("feature").join("checkout");
        fs::create_dir_all(&parent).unwrap();
        fs::write(root.join("settings.gradle.kts"), "").unwrap();

        assert_eq!(discover_project_root(&parent, "settings.gradle.kts"), root);
    }

    #[test]
    fn project_root_falls_back_to_parent() {
        let temp = TempDir::new().unwrap();
        let parent = temp.path().join("loose");
        fs::create_dir_all(&parent).unwrap();

        assert_eq!(discover_project_root(&parent, "no-such-manifest.kts"), parent);
    }

    #[test]
    fn missing_template_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = read_template(&temp.path().join("absent.kts")).unwrap_err();
        assert!(matches!(err, CliError::TemplateNotFound { .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn report_json_marks_failed_manifest() {
        use modkit_core::application::ApplicationError;

        let report = CreationReport {
            root: PathBuf::from("/shop/payments"),
            created: Vec::new(),
            manifest: ManifestStatus::Failed(ApplicationError::ManifestUpdate {
                path: PathBuf::from("/shop/settings.gradle.kts"),
                reason: "manifest file not found".into(),
            }),
        };
        let json = serde_json::to_value(ReportJson::from(&report)).unwrap();
        assert_eq!(json["manifest"]["status"], "failed");
        assert_eq!(json["root"], "/shop/payments");
    }
}
