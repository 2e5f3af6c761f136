//! Colon-delimited build-graph paths.
//!
//! A [`ProjectPath`] addresses a directory relative to the project root
//! (`:feature:account`, or the empty expression for the root itself). A
//! [`ModulePath`] is one manifest entry: `{project}:{directory}:{kind}`.

use std::fmt;
use std::path::{Component, Path};

use serde::{Serialize, Serializer};

use crate::domain::value_objects::{DirectoryName, ModuleKind};

/// Build-graph path expression of a directory relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ProjectPath(String);

impl ProjectPath {
    /// The project root (empty expression).
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Compute the path expression of `dir` relative to `project_root`.
    ///
    /// Separators become colons behind a leading colon. A directory outside
    /// the project root falls back to `:{dir-name}`.
    pub fn from_dirs(project_root: &Path, dir: &Path) -> Self {
        match dir.strip_prefix(project_root) {
            Ok(relative) => Self::from_segments(relative.components().filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })),
            Err(_) => {
                let name = dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Self::from_segments([name].into_iter().filter(|n| !n.is_empty()))
            }
        }
    }

    fn from_segments(segments: impl IntoIterator<Item = String>) -> Self {
        let mut expr = String::new();
        for segment in segments {
            expr.push(':');
            expr.push_str(&segment);
        }
        Self(expr)
    }

    /// `true` for the project root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single manifest entry, e.g. `:feature:payments:public`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModulePath(String);

impl ModulePath {
    pub fn new(project: &ProjectPath, directory: &DirectoryName, kind: ModuleKind) -> Self {
        Self(format!("{project}:{directory}:{}", kind.segment()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModulePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for ModulePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn root_is_empty_expression() {
        let root = PathBuf::from("/work/app");
        let path = ProjectPath::from_dirs(&root, &root);
        assert!(path.is_root());
        assert_eq!(path.as_str(), "");
    }

    #[test]
    fn nested_directories_become_colon_segments() {
        let root = PathBuf::from("/work/app");
        let path = ProjectPath::from_dirs(&root, &root.join("feature").join("account"));
        assert_eq!(path.as_str(), ":feature:account");
    }

    #[test]
    fn outside_root_falls_back_to_dir_name() {
        let path = ProjectPath::from_dirs(Path::new("/work/app"), Path::new("/elsewhere/shared"));
        assert_eq!(path.as_str(), ":shared");
    }

    #[test]
    fn module_path_format() {
        let dir = DirectoryName::parse("payments").unwrap();
        assert_eq!(
            ModulePath::new(&ProjectPath::root(), &dir, ModuleKind::Public).as_str(),
            ":payments:public"
        );

        let root = PathBuf::from("/p");
        let project = ProjectPath::from_dirs(&root, &root.join("feature"));
        assert_eq!(
            ModulePath::new(&project, &dir, ModuleKind::Testing).to_string(),
            ":feature:payments:testing"
        );
    }
}
