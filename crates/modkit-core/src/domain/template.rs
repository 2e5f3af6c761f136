//! Build-file template resolution.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  TemplateResolver                                            │
//! │  ├── override template (user supplied)   ──┐                 │
//! │  └── layout default for the module kind  ──┴─► substitution  │
//! │                                                   │          │
//! │  TemplateContext                                  ▼          │
//! │  ├── $directoryName    -> "payments"        final build file │
//! │  ├── $projectDirectory -> ":feature"                         │
//! │  └── $namespace        -> "com.app.payments"                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Substitution is literal (no regex, no escaping). Placeholders are applied
//! in the order listed above and every occurrence is replaced. Anything that
//! looks like a placeholder but is not one of the three is left verbatim.

use crate::domain::{
    layout::ModuleLayout,
    module_path::ProjectPath,
    value_objects::{DirectoryName, ModuleKind, Namespace},
};

/// Placeholder replaced by the target directory name.
pub const DIRECTORY_NAME: &str = "$directoryName";
/// Placeholder replaced by the parent's build-graph path expression.
pub const PROJECT_DIRECTORY: &str = "$projectDirectory";
/// Placeholder replaced by the namespace.
pub const NAMESPACE: &str = "$namespace";

/// Values substituted into a build-file template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateContext {
    directory_name: String,
    project_directory: String,
    namespace: String,
}

impl TemplateContext {
    pub fn new(directory: &DirectoryName, namespace: &Namespace, project: &ProjectPath) -> Self {
        Self {
            directory_name: directory.as_str().to_string(),
            project_directory: project.as_str().to_string(),
            namespace: namespace.as_str().to_string(),
        }
    }

    pub fn directory_name(&self) -> &str {
        &self.directory_name
    }

    pub fn project_directory(&self) -> &str {
        &self.project_directory
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Substitute every recognised placeholder in `template`.
    pub fn render(&self, template: &str) -> String {
        template
            .replace(DIRECTORY_NAME, &self.directory_name)
            .replace(PROJECT_DIRECTORY, &self.project_directory)
            .replace(NAMESPACE, &self.namespace)
    }
}

/// Produces final build-file text for a module kind.
///
/// Pure: no I/O, deterministic for identical inputs.
#[derive(Debug, Clone, Copy)]
pub struct TemplateResolver<'a> {
    layout: &'a ModuleLayout,
}

impl<'a> TemplateResolver<'a> {
    pub fn new(layout: &'a ModuleLayout) -> Self {
        Self { layout }
    }

    /// Resolve the build file for `kind`.
    ///
    /// `override_template` replaces the layout's default for that kind; both
    /// go through the same substitution.
    pub fn resolve(
        &self,
        kind: ModuleKind,
        override_template: Option<&str>,
        ctx: &TemplateContext,
    ) -> String {
        let template = override_template.unwrap_or_else(|| self.layout.template(kind));
        ctx.render(template)
    }
}

/// Namespace suggested for a package and directory name.
///
/// `com.app` + `payments` gives `com.app.payments`; an empty directory name
/// gives the package alone.
pub fn derive_namespace(package_name: &str, directory_name: &str) -> String {
    let package = package_name.trim();
    let directory = directory_name.trim();

    if package.is_empty() {
        String::new()
    } else if directory.is_empty() {
        package.to_string()
    } else {
        format!("{package}.{directory}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn ctx() -> TemplateContext {
        let root = Path::new("/repo");
        TemplateContext::new(
            &DirectoryName::parse("payments").unwrap(),
            &Namespace::parse("com.app.payments").unwrap(),
            &ProjectPath::from_dirs(root, &root.join("feature")),
        )
    }

    #[test]
    fn all_placeholders_substitute_every_occurrence() {
        let out = ctx().render(
            "$directoryName $directoryName | $projectDirectory $projectDirectory | $namespace $namespace",
        );
        assert_eq!(
            out,
            "payments payments | :feature :feature | com.app.payments com.app.payments"
        );
    }

    #[test]
    fn unknown_placeholders_are_left_verbatim() {
        assert_eq!(ctx().render("$version ${directoryName}"), "$version ${directoryName}");
    }

    #[test]
    fn override_wins_over_default() {
        let layout = ModuleLayout::kotlin_multiplatform();
        let resolver = TemplateResolver::new(&layout);
        let out = resolver.resolve(ModuleKind::Impl, Some("// $namespace"), &ctx());
        assert_eq!(out, "// com.app.payments");
    }

    #[test]
    fn resolution_is_deterministic() {
        let layout = ModuleLayout::kotlin_multiplatform();
        let resolver = TemplateResolver::new(&layout);
        let first = resolver.resolve(ModuleKind::Testing, None, &ctx());
        let second = resolver.resolve(ModuleKind::Testing, None, &ctx());
        assert_eq!(first, second);
    }

    #[test]
    fn default_templates_encode_dependency_direction() {
        let layout = ModuleLayout::kotlin_multiplatform();
        let resolver = TemplateResolver::new(&layout);
        let public_dep = r#"project(":feature:payments:public")"#;
        let impl_dep = r#"project(":feature:payments:impl")"#;

        let public = resolver.resolve(ModuleKind::Public, None, &ctx());
        assert!(!public.contains(public_dep));
        assert!(!public.contains(impl_dep));

        let implementation = resolver.resolve(ModuleKind::Impl, None, &ctx());
        assert!(implementation.contains(public_dep));
        assert!(!implementation.contains(impl_dep));

        let testing = resolver.resolve(ModuleKind::Testing, None, &ctx());
        assert!(testing.contains(public_dep));
        assert!(testing.contains(impl_dep));
    }

    #[test]
    fn root_parent_renders_single_leading_colon() {
        let ctx = TemplateContext::new(
            &DirectoryName::parse("payments").unwrap(),
            &Namespace::parse("com.app").unwrap(),
            &ProjectPath::root(),
        );
        let layout = ModuleLayout::kotlin_multiplatform();
        let out = TemplateResolver::new(&layout).resolve(ModuleKind::Impl, None, &ctx);
        assert!(out.contains(r#"project(":payments:public")"#));
    }

    #[test]
    fn derive_namespace_rules() {
        assert_eq!(derive_namespace("com.app", "payments"), "com.app.payments");
        assert_eq!(derive_namespace(" com.app ", "  "), "com.app");
        assert_eq!(derive_namespace("", "payments"), "");
    }
}
