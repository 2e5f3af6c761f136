//! The `ModuleCreationRequest` value and its builder.
//!
//! A request is built once per user action, validated in `build()`, and then
//! consumed by the scaffold service. Nothing in here touches the filesystem;
//! existence checks on the parent belong to the application layer.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::{
    error::DomainError,
    layout::ModuleLayout,
    module_path::ProjectPath,
    value_objects::{DirectoryName, ModuleKind, ModuleKinds, Namespace},
};

/// A fully validated request to scaffold one module tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleCreationRequest {
    project_root: PathBuf,
    parent: PathBuf,
    directory_name: DirectoryName,
    namespace: Namespace,
    kinds: ModuleKinds,
    layout: ModuleLayout,
    template_overrides: BTreeMap<ModuleKind, String>,
}

impl ModuleCreationRequest {
    pub fn builder() -> ModuleCreationRequestBuilder {
        ModuleCreationRequestBuilder::default()
    }

    /// Directory holding the settings manifest.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Directory the target is created in.
    pub fn parent(&self) -> &Path {
        &self.parent
    }

    pub fn directory_name(&self) -> &DirectoryName {
        &self.directory_name
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn kinds(&self) -> &ModuleKinds {
        &self.kinds
    }

    pub fn layout(&self) -> &ModuleLayout {
        &self.layout
    }

    pub fn template_override(&self, kind: ModuleKind) -> Option<&str> {
        self.template_overrides.get(&kind).map(String::as_str)
    }

    pub fn template_overrides(&self) -> &BTreeMap<ModuleKind, String> {
        &self.template_overrides
    }

    /// `{parent}/{directory_name}`.
    pub fn target_dir(&self) -> PathBuf {
        self.parent.join(self.directory_name.as_str())
    }

    /// Build-graph path of the parent directory.
    pub fn project_path(&self) -> ProjectPath {
        ProjectPath::from_dirs(&self.project_root, &self.parent)
    }

    /// `{project_root}/{manifest_file}`.
    pub fn manifest_path(&self) -> PathBuf {
        self.project_root.join(self.layout.manifest_file())
    }
}

/// Builder for [`ModuleCreationRequest`].
///
/// Raw strings are accepted and validated together in [`build`](Self::build),
/// so a caller sees the first problem in field order: parent, directory name,
/// namespace, module kinds.
#[derive(Debug, Default, Clone)]
pub struct ModuleCreationRequestBuilder {
    project_root: Option<PathBuf>,
    parent: Option<PathBuf>,
    directory_name: Option<String>,
    namespace: Option<String>,
    kinds: Option<Vec<ModuleKind>>,
    layout: Option<ModuleLayout>,
    template_overrides: BTreeMap<ModuleKind, String>,
}

impl ModuleCreationRequestBuilder {
    /// Project root. Defaults to the parent directory.
    pub fn project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = Some(root.into());
        self
    }

    pub fn parent(mut self, parent: impl Into<PathBuf>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn directory_name(mut self, name: impl Into<String>) -> Self {
        self.directory_name = Some(name.into());
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn kinds(mut self, kinds: impl IntoIterator<Item = ModuleKind>) -> Self {
        self.kinds = Some(kinds.into_iter().collect());
        self
    }

    pub fn kind(mut self, kind: ModuleKind) -> Self {
        self.kinds.get_or_insert_with(Vec::new).push(kind);
        self
    }

    /// Layout. Defaults to [`ModuleLayout::kotlin_multiplatform`].
    pub fn layout(mut self, layout: ModuleLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Replace the layout's default template for `kind`.
    pub fn template(mut self, kind: ModuleKind, template: impl Into<String>) -> Self {
        self.template_overrides.insert(kind, template.into());
        self
    }

    pub fn build(self) -> Result<ModuleCreationRequest, DomainError> {
        let parent = self.parent.ok_or(DomainError::MissingRequiredField {
            field: "parent directory",
        })?;

        let directory_name = DirectoryName::parse(
            self.directory_name
                .as_deref()
                .ok_or(DomainError::MissingRequiredField {
                    field: "directory name",
                })?,
        )?;

        let namespace = Namespace::parse(
            self.namespace
                .as_deref()
                .ok_or(DomainError::MissingRequiredField { field: "namespace" })?,
        )?;

        let kinds = ModuleKinds::new(self.kinds.unwrap_or_default())?;

        let layout = self.layout.unwrap_or_default();
        layout.validate()?;

        Ok(ModuleCreationRequest {
            project_root: self.project_root.unwrap_or_else(|| parent.clone()),
            parent,
            directory_name,
            namespace,
            kinds,
            layout,
            template_overrides: self.template_overrides,
        })
    }
}
