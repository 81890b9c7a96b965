//! Listing rows.

use std::cmp::Ordering;

use crate::filekind::FileKind;
use crate::relpath::RelPath;

/// One row of a directory listing, with display columns preformatted at
/// load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub path: RelPath,
    pub is_dir: bool,
    pub kind: FileKind,
    /// Raw size in bytes; zero for directories.
    pub size: u64,
    /// Humanized size column; empty for directories.
    pub size_display: String,
    /// Modified-timestamp column, `YYYY-MM-DD HH:MM:SS`.
    pub modified_display: String,
}

impl FileEntry {
    #[must_use]
    pub fn previewable(&self) -> bool {
        !self.is_dir && self.kind.previewable()
    }

    /// Listing order: directories first, then case-insensitive by name.
    #[must_use]
    pub fn listing_cmp(&self, other: &Self) -> Ordering {
        other
            .is_dir
            .cmp(&self.is_dir)
            .then_with(|| self.name.to_lowercase().cmp(&other.name.to_lowercase()))
            .then_with(|| self.name.cmp(&other.name))
    }
}

#[cfg(test)]
mod tests {
    use super::{FileEntry, FileKind, RelPath};

    fn entry(name: &str, is_dir: bool) -> FileEntry {
        FileEntry {
            name: name.to_string(),
            path: RelPath::root().join(name).unwrap(),
            is_dir,
            kind: if is_dir {
                FileKind::Other
            } else {
                FileKind::from_name(name)
            },
            size: 0,
            size_display: String::new(),
            modified_display: String::new(),
        }
    }

    #[test]
    fn directories_sort_before_files() {
        let mut entries = vec![
            entry("notes.txt", false),
            entry("Archive", true),
            entry("beta", true),
            entry("alpha.png", false),
        ];
        entries.sort_by(|a, b| a.listing_cmp(b));
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Archive", "beta", "alpha.png", "notes.txt"]);
    }

    #[test]
    fn name_order_ignores_case() {
        let mut entries = vec![
            entry("zebra.txt", false),
            entry("Apple.txt", false),
            entry("mango.txt", false),
        ];
        entries.sort_by(|a, b| a.listing_cmp(b));
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Apple.txt", "mango.txt", "zebra.txt"]);
    }

    #[test]
    fn directories_are_never_previewable() {
        let dir = entry("photos.png", true);
        assert!(!dir.previewable());
        let file = entry("photos.png", false);
        assert!(file.previewable());
    }
}
