//! Domain value objects: ModuleKind, ModuleKinds, Namespace, DirectoryName.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. Each
//! one is validated at construction, so once a value exists it can be used
//! to build paths without further checks.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// ── ModuleKind ───────────────────────────────────────────────────────────────

/// The role a generated module plays in the dependency graph.
///
/// The declaration order is the creation order: `Public < Impl < Testing`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    Public,
    Impl,
    Testing,
}

impl ModuleKind {
    /// All kinds, in creation order.
    pub const ALL: [ModuleKind; 3] = [Self::Public, Self::Impl, Self::Testing];

    /// Canonical path segment, used both as directory name and as the last
    /// component of the module path.
    pub const fn segment(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Impl => "impl",
            Self::Testing => "testing",
        }
    }

    /// Sibling modules this kind depends on by default.
    ///
    /// Public depends on nothing, Impl on Public, Testing on Public and Impl.
    /// Only the default templates encode this; custom templates may differ.
    pub const fn dependencies(&self) -> &'static [ModuleKind] {
        match self {
            Self::Public => &[],
            Self::Impl => &[Self::Public],
            Self::Testing => &[Self::Public, Self::Impl],
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for ModuleKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" | "api" => Ok(Self::Public),
            "impl" | "implementation" => Ok(Self::Impl),
            "testing" | "test" => Ok(Self::Testing),
            other => Err(DomainError::UnknownModuleKind(other.to_string())),
        }
    }
}

// ── ModuleKinds ──────────────────────────────────────────────────────────────

/// A non-empty set of module kinds, iterated in creation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleKinds(BTreeSet<ModuleKind>);

impl ModuleKinds {
    /// Build a set from any collection of kinds. Duplicates collapse.
    pub fn new(kinds: impl IntoIterator<Item = ModuleKind>) -> Result<Self, DomainError> {
        let set: BTreeSet<_> = kinds.into_iter().collect();
        if set.is_empty() {
            return Err(DomainError::NoModuleKinds);
        }
        Ok(Self(set))
    }

    /// Every kind.
    pub fn all() -> Self {
        Self(ModuleKind::ALL.into_iter().collect())
    }

    /// Parse a comma-separated list such as `public,impl`.
    pub fn parse_list(list: &str) -> Result<Self, DomainError> {
        let kinds = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ModuleKind::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(kinds)
    }

    pub fn contains(&self, kind: ModuleKind) -> bool {
        self.0.contains(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = ModuleKind> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ModuleKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.iter().map(|k| k.segment()).collect();
        f.write_str(&names.join(","))
    }
}

// ── Namespace ────────────────────────────────────────────────────────────────

/// A dot-delimited identifier such as `com.example.feature`.
///
/// Invariant: at least one segment, no empty segments, no path separators,
/// quotes or whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(String);

impl Namespace {
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyNamespace);
        }

        for segment in trimmed.split('.') {
            let invalid = |reason: &str| DomainError::InvalidNamespace {
                namespace: trimmed.to_string(),
                reason: reason.to_string(),
            };
            if segment.is_empty() {
                return Err(invalid("contains an empty segment"));
            }
            if segment.contains(['/', '\\']) {
                return Err(invalid("segments cannot contain path separators"));
            }
            if segment.chars().any(char::is_whitespace) {
                return Err(invalid("segments cannot contain whitespace"));
            }
            if segment.chars().any(|c| c == '"' || c.is_control()) {
                return Err(invalid("segments cannot contain quotes or control characters"));
            }
        }

        Ok(Self(trimmed.to_string()))
    }

    /// One directory name per segment, in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Namespace {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ── DirectoryName ────────────────────────────────────────────────────────────

/// Name of the top-level directory created under the parent directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirectoryName(String);

impl DirectoryName {
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        let invalid = |reason: &str| DomainError::InvalidDirectoryName {
            name: input.to_string(),
            reason: reason.to_string(),
        };

        if trimmed.is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if trimmed == "." || trimmed == ".." {
            return Err(invalid("name cannot be '.' or '..'"));
        }
        if trimmed.contains(['/', '\\']) {
            return Err(invalid("name cannot contain path separators"));
        }
        if trimmed.contains(':') {
            return Err(invalid("name cannot contain ':'"));
        }
        // The name ends up inside a quoted include("...") literal.
        if trimmed.chars().any(|c| c.is_whitespace() || c.is_control() || c == '"') {
            return Err(invalid("name cannot contain quotes, whitespace or control characters"));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DirectoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DirectoryName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
