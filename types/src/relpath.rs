//! Vault-relative paths.
//!
//! A [`RelPath`] addresses an entry inside the drop folder without ever
//! touching the filesystem. Components are joined with `/` regardless of
//! platform; the empty path is the vault root. Mapping to a real path (and
//! enforcing the jail) is the vault's job, not this type's.

use std::fmt;

use thiserror::Error;

/// A normalized path relative to the vault root.
///
/// Invariants: no leading or trailing separator, no empty components, no
/// `.` or `..` components. [`RelPath::join`] is the only way to extend a
/// path and rejects anything that would break them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RelPath(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelPathError {
    #[error("empty path component")]
    Empty,
    #[error("path component {0:?} contains a separator")]
    Separator(String),
    #[error("path component {0:?} is reserved")]
    Reserved(String),
}

impl RelPath {
    #[must_use]
    pub fn root() -> Self {
        Self(String::new())
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Append one component. The component must be a bare name: non-empty,
    /// no `/` or `\`, and not `.` or `..`.
    pub fn join(&self, name: &str) -> Result<Self, RelPathError> {
        if name.is_empty() {
            return Err(RelPathError::Empty);
        }
        if name.contains('/') || name.contains('\\') {
            return Err(RelPathError::Separator(name.to_string()));
        }
        if name == "." || name == ".." {
            return Err(RelPathError::Reserved(name.to_string()));
        }
        if self.0.is_empty() {
            Ok(Self(name.to_string()))
        } else {
            Ok(Self(format!("{}/{name}", self.0)))
        }
    }

    /// The containing path, or `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        match self.0.rsplit_once('/') {
            Some((rest, _)) => Some(Self(rest.to_string())),
            None => Some(Self::root()),
        }
    }

    /// The final component, or `None` at the root.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        if self.is_root() {
            return None;
        }
        Some(self.0.rsplit('/').next().unwrap_or(&self.0))
    }

    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|part| !part.is_empty())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelPath {
    /// Renders with a leading slash: `/` for the root, `/sub/dir` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("/")
        } else {
            write!(f, "/{}", self.0)
        }
    }
}
