use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{
    module_path::ModulePath,
    request::ModuleCreationRequest,
    template::{TemplateContext, TemplateResolver},
};

/// Every filesystem action a request produces, in execution order.
///
/// This is the output of planning. It contains no behaviour beyond
/// inspection; the scaffold service executes it and dry-runs print it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldPlan {
    root: PathBuf,
    manifest: PathBuf,
    entries: Vec<FsEntry>,
    modules: Vec<ModulePath>,
}

impl ScaffoldPlan {
    /// Resolve templates and expand the directory tree for `request`.
    ///
    /// Per module kind, in creation order: the module directory, each
    /// source-root segment, each namespace segment, then the build file
    /// inside the module directory.
    pub fn for_request(request: &ModuleCreationRequest) -> Self {
        let root = request.target_dir();
        let layout = request.layout();
        let project = request.project_path();
        let ctx = TemplateContext::new(request.directory_name(), request.namespace(), &project);
        let resolver = TemplateResolver::new(layout);

        let mut plan = Self {
            root: root.clone(),
            manifest: request.manifest_path(),
            entries: vec![FsEntry::Directory { path: root.clone() }],
            modules: Vec::with_capacity(request.kinds().len()),
        };

        for kind in request.kinds().iter() {
            let module_dir = root.join(kind.segment());
            plan.entries.push(FsEntry::Directory {
                path: module_dir.clone(),
            });

            let mut dir = module_dir.clone();
            let segments = layout
                .source_root()
                .iter()
                .map(String::as_str)
                .chain(request.namespace().segments());
            for segment in segments {
                dir.push(segment);
                plan.entries.push(FsEntry::Directory { path: dir.clone() });
            }

            plan.entries.push(FsEntry::File {
                path: module_dir.join(layout.build_file()),
                content: resolver.resolve(kind, request.template_override(kind), &ctx),
            });

            plan.modules
                .push(ModulePath::new(&project, request.directory_name(), kind));
        }

        plan
    }

    /// Target directory (`{parent}/{directory_name}`).
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Manifest the module paths are merged into.
    pub fn manifest(&self) -> &Path {
        &self.manifest
    }

    pub fn entries(&self) -> &[FsEntry] {
        &self.entries
    }

    /// Module paths, in creation order.
    pub fn modules(&self) -> &[ModulePath] {
        &self.modules
    }

    pub fn directories(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::Directory { path } => Some(path.as_path()),
            FsEntry::File { .. } => None,
        })
    }

    pub fn files(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::File { path, content } => Some((path.as_path(), content.as_str())),
            FsEntry::Directory { .. } => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FsEntry {
    Directory { path: PathBuf },
    File { path: PathBuf, content: String },
}

impl FsEntry {
    pub fn path(&self) -> &Path {
        match self {
            Self::Directory { path } | Self::File { path, .. } => path,
        }
    }
}
