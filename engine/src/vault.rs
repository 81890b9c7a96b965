//! The drop-folder jail.
//!
//! A [`Vault`] owns the canonical root of the browsed folder and is the
//! only place vault-relative paths become real filesystem paths. Every
//! resolved path is canonicalized and checked against the root, so symlinks
//! pointing out of the folder cannot be followed out of it.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::{debug, warn};

use slurp_types::{FileEntry, FileKind, RelPath, format_size};

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("vault root {path:?} is not a directory")]
    RootNotDirectory { path: PathBuf },
    #[error("path {path} leaves the vault")]
    Escape { path: RelPath },
    #[error("{path}: {source}")]
    Io { path: RelPath, source: io::Error },
}

impl VaultError {
    fn io(path: &RelPath, source: io::Error) -> Self {
        Self::Io {
            path: path.clone(),
            source,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
}

impl Vault {
    /// Open the drop folder, creating it if absent. The stored root is
    /// canonical so later escape checks hold under symlinks.
    pub fn open(root: &Path) -> Result<Self, VaultError> {
        let rel_root = RelPath::root();
        if !root.exists() {
            fs::create_dir_all(root).map_err(|source| VaultError::io(&rel_root, source))?;
            debug!(root = %root.display(), "created drop folder");
        }
        let canonical =
            fs::canonicalize(root).map_err(|source| VaultError::io(&rel_root, source))?;
        if !canonical.is_dir() {
            return Err(VaultError::RootNotDirectory { path: canonical });
        }
        Ok(Self { root: canonical })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a vault path to a real path, refusing anything that resolves
    /// outside the root.
    pub fn resolve(&self, path: &RelPath) -> Result<PathBuf, VaultError> {
        let mut real = self.root.clone();
        for component in path.components() {
            real.push(component);
        }
        let canonical = fs::canonicalize(&real).map_err(|source| VaultError::io(path, source))?;
        if !canonical.starts_with(&self.root) {
            warn!(path = %path, "refused path outside the vault");
            return Err(VaultError::Escape { path: path.clone() });
        }
        Ok(canonical)
    }

    /// One directory level as sorted listing rows.
    pub fn list(&self, path: &RelPath) -> Result<Vec<FileEntry>, VaultError> {
        let dir = self.resolve(path)?;
        let mut entries = Vec::new();
        for dent in fs::read_dir(&dir).map_err(|source| VaultError::io(path, source))? {
            let dent = dent.map_err(|source| VaultError::io(path, source))?;
            let raw_name = dent.file_name();
            let Some(name) = raw_name.to_str() else {
                debug!(name = ?raw_name, "skipping non-UTF-8 entry name");
                continue;
            };
            let Ok(child) = path.join(name) else {
                debug!(name, "skipping unrepresentable entry name");
                continue;
            };
            let meta = match dent.metadata() {
                Ok(meta) => meta,
                Err(err) => {
                    debug!(name, error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            entries.push(build_entry(name, child, &meta));
        }
        entries.sort_by(FileEntry::listing_cmp);
        Ok(entries)
    }

    /// Current size of a file, for preview info cards.
    pub fn file_size(&self, path: &RelPath) -> Result<u64, VaultError> {
        let real = self.resolve(path)?;
        let meta = fs::metadata(&real).map_err(|source| VaultError::io(path, source))?;
        Ok(meta.len())
    }

    /// Head of a text file, capped at `max_bytes`. Returns the decoded
    /// content and whether the file was cut off.
    pub fn read_text_head(
        &self,
        path: &RelPath,
        max_bytes: usize,
    ) -> Result<(String, bool), VaultError> {
        let real = self.resolve(path)?;
        let file = fs::File::open(&real).map_err(|source| VaultError::io(path, source))?;
        let mut buf = Vec::with_capacity(max_bytes.min(64 * 1024));
        let mut limited = file.take((max_bytes as u64).saturating_add(1));
        limited
            .read_to_end(&mut buf)
            .map_err(|source| VaultError::io(path, source))?;
        let truncated = buf.len() > max_bytes;
        buf.truncate(max_bytes);
        Ok((String::from_utf8_lossy(&buf).into_owned(), truncated))
    }

    /// Delete an entry: directories recursively, files unlinked.
    pub fn delete(&self, path: &RelPath) -> Result<(), VaultError> {
        if path.is_root() {
            return Err(VaultError::Escape { path: path.clone() });
        }
        let real = self.resolve(path)?;
        let meta = fs::metadata(&real).map_err(|source| VaultError::io(path, source))?;
        if meta.is_dir() {
            fs::remove_dir_all(&real).map_err(|source| VaultError::io(path, source))?;
        } else {
            fs::remove_file(&real).map_err(|source| VaultError::io(path, source))?;
        }
        debug!(path = %path, "deleted entry");
        Ok(())
    }
}

fn build_entry(name: &str, path: RelPath, meta: &fs::Metadata) -> FileEntry {
    let is_dir = meta.is_dir();
    let size = if is_dir { 0 } else { meta.len() };
    FileEntry {
        name: name.to_string(),
        path,
        is_dir,
        kind: if is_dir {
            FileKind::Other
        } else {
            FileKind::from_name(name)
        },
        size,
        size_display: if is_dir {
            String::new()
        } else {
            format_size(size)
        },
        modified_display: modified_column(meta),
    }
}

fn modified_column(meta: &fs::Metadata) -> String {
    meta.modified()
        .ok()
        .map(|time| {
            DateTime::<Local>::from(time)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_default()
}
