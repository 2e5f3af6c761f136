//! Filesystem-based layout loader.
//!
//! Discovers custom [`ModuleLayout`] definitions: every `*.toml` file directly
//! inside a layouts directory is one layout.
//!
//! # Directory layout expected
//!
//! ```text
//! layouts/
//! ├── java-lib.toml            ← one layout per file
//! ├── java-lib/
//! │   └── impl.gradle          ← template referenced by file
//! └── notes.md                 ← ignored
//! ```
//!
//! # Layout file format
//!
//! ```toml
//! name          = "java-lib"
//! description   = "Plain Java libraries"     # optional
//! extends       = "jvm"                      # optional, default "kmp"
//! source_root   = "src/main/java"            # optional, inherited
//! build_file    = "build.gradle"             # optional, inherited
//! manifest_file = "settings.gradle"          # optional, inherited
//!
//! [templates]
//! public  = "plugins { id 'java-library' }\n"  # inline text
//! impl    = { file = "java-lib/impl.gradle" }  # relative to this file
//! # testing omitted: taken from the base layout
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use modkit_core::domain::{DEFAULT_LAYOUT, DomainError, LayoutTemplates, ModuleLayout};

// ── Errors ────────────────────────────────────────────────────────────────────

/// Why a single layout file could not be loaded.
#[derive(Debug, Error)]
pub enum LayoutLoadError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

// ── Layout file types ────────────────────────────────────────────────────────

/// Deserialised representation of one layout file.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct LayoutFile {
    pub name: String,
    pub description: Option<String>,
    /// Built-in layout supplying every omitted field.
    pub extends: Option<String>,
    pub source_root: Option<String>,
    pub build_file: Option<String>,
    pub manifest_file: Option<String>,
    #[serde(default)]
    pub templates: TemplatesSection,
}

/// `[templates]` section. Omitted kinds come from the base layout.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct TemplatesSection {
    pub public: Option<TemplateSource>,
    #[serde(rename = "impl")]
    pub implementation: Option<TemplateSource>,
    pub testing: Option<TemplateSource>,
}

/// A template given inline or as a path relative to the layout file.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum TemplateSource {
    Inline(String),
    File { file: PathBuf },
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads [`ModuleLayout`]s from a directory of layout files.
///
/// Files that fail to load emit a `WARN` log and are skipped; they do not
/// prevent other layouts from loading.
pub struct LayoutLoader {
    layouts_dir: PathBuf,
}

impl LayoutLoader {
    pub fn new(layouts_dir: impl Into<PathBuf>) -> Self {
        Self {
            layouts_dir: layouts_dir.into(),
        }
    }

    /// Load every valid layout in the directory.
    ///
    /// A missing directory yields no layouts.
    #[instrument(skip(self), fields(dir = %self.layouts_dir.display()))]
    pub fn load_all(&self) -> Result<Vec<ModuleLayout>, LayoutLoadError> {
        if !self.layouts_dir.is_dir() {
            debug!("layouts directory not present");
            return Ok(Vec::new());
        }

        let mut layouts = Vec::new();
        for entry in WalkDir::new(&self.layouts_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "toml") {
                continue;
            }

            match load_layout_file(path) {
                Ok(layout) => {
                    debug!(name = layout.name(), "loaded layout");
                    layouts.push(layout);
                }
                Err(e) => {
                    warn!(
                        file  = %path.display(),
                        error = %e,
                        "skipping layout file due to load error"
                    );
                }
            }
        }

        debug!(count = layouts.len(), "finished loading layouts");
        Ok(layouts)
    }
}

/// Load a single layout file.
pub fn load_layout_file(path: &Path) -> Result<ModuleLayout, LayoutLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LayoutLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file: LayoutFile = toml::from_str(&raw).map_err(|source| LayoutLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let base = ModuleLayout::builtin_named(file.extends.as_deref().unwrap_or(DEFAULT_LAYOUT))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let read = |source: Option<&TemplateSource>, fallback: &str| -> Result<String, LayoutLoadError> {
        match source {
            None => Ok(fallback.to_string()),
            Some(TemplateSource::Inline(text)) => Ok(text.clone()),
            Some(TemplateSource::File { file }) => {
                let template_path = base_dir.join(file);
                fs::read_to_string(&template_path).map_err(|source| LayoutLoadError::Read {
                    path: template_path,
                    source,
                })
            }
        }
    };

    let base_templates = base.templates();
    let templates = LayoutTemplates {
        public: read(file.templates.public.as_ref(), &base_templates.public)?,
        implementation: read(
            file.templates.implementation.as_ref(),
            &base_templates.implementation,
        )?,
        testing: read(file.templates.testing.as_ref(), &base_templates.testing)?,
    };

    let source_root = file
        .source_root
        .unwrap_or_else(|| base.source_root_display());

    ModuleLayout::new(
        file.name,
        file.description.unwrap_or_default(),
        &source_root,
        file.build_file.unwrap_or_else(|| base.build_file().to_string()),
        file.manifest_file
            .unwrap_or_else(|| base.manifest_file().to_string()),
        templates,
    )
    .map_err(LayoutLoadError::from)
}

// ── Registry ──────────────────────────────────────────────────────────────────

/// Built-in layouts plus any loaded custom ones.
///
/// A custom layout whose name matches a built-in replaces it in place.
#[derive(Debug, Clone)]
pub struct LayoutRegistry {
    layouts: Vec<RegisteredLayout>,
}

#[derive(Debug, Clone)]
struct RegisteredLayout {
    layout: ModuleLayout,
    builtin: bool,
}

impl LayoutRegistry {
    /// Only the built-in presets.
    pub fn builtin() -> Self {
        Self {
            layouts: ModuleLayout::builtin()
                .into_iter()
                .map(|layout| RegisteredLayout {
                    layout,
                    builtin: true,
                })
                .collect(),
        }
    }

    /// Built-ins plus every layout found in `dir`.
    pub fn load(dir: &Path) -> Result<Self, LayoutLoadError> {
        let custom = LayoutLoader::new(dir).load_all()?;
        Ok(Self::builtin().with_custom(custom))
    }

    pub fn with_custom(mut self, custom: impl IntoIterator<Item = ModuleLayout>) -> Self {
        for layout in custom {
            let entry = RegisteredLayout {
                layout,
                builtin: false,
            };
            match self
                .layouts
                .iter_mut()
                .find(|r| r.layout.name().eq_ignore_ascii_case(entry.layout.name()))
            {
                Some(existing) => {
                    debug!(name = entry.layout.name(), "custom layout replaces existing one");
                    *existing = entry;
                }
                None => self.layouts.push(entry),
            }
        }
        self
    }

    /// Look up a layout by name (case-insensitive).
    pub fn get(&self, name: &str) -> Result<&ModuleLayout, DomainError> {
        self.layouts
            .iter()
            .map(|r| &r.layout)
            .find(|l| l.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| DomainError::UnknownLayout(name.to_string()))
    }

    /// Every layout with a flag telling whether it is a built-in.
    pub fn iter(&self) -> impl Iterator<Item = (&ModuleLayout, bool)> {
        self.layouts.iter().map(|r| (&r.layout, r.builtin))
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

impl Default for LayoutRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
