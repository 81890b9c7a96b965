//! Page model for directory listings.

use slurp_types::{FileEntry, RelPath};

/// One selectable row.
#[derive(Debug, Clone)]
pub enum Row {
    /// Navigates to the containing directory. Present on every page except
    /// the vault root.
    Parent(RelPath),
    Entry(FileEntry),
}

/// A loaded directory listing plus its cursor. Cloned wholesale into the
/// history stack on navigation.
#[derive(Debug, Clone)]
pub struct ListingPage {
    path: RelPath,
    rows: Vec<Row>,
    selected: usize,
}

impl ListingPage {
    #[must_use]
    pub fn new(path: RelPath, entries: Vec<FileEntry>) -> Self {
        let mut rows = Vec::with_capacity(entries.len() + 1);
        if let Some(parent) = path.parent() {
            rows.push(Row::Parent(parent));
        }
        rows.extend(entries.into_iter().map(Row::Entry));
        Self {
            path,
            rows,
            selected: 0,
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(RelPath::root(), Vec::new())
    }

    #[must_use]
    pub fn path(&self) -> &RelPath {
        &self.path
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected_row(&self) -> Option<&Row> {
        self.rows.get(self.selected)
    }

    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_down(&mut self) {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
    }

    pub fn select_top(&mut self) {
        self.selected = 0;
    }

    pub fn select_bottom(&mut self) {
        self.selected = self.rows.len().saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{ListingPage, Row};
    use slurp_types::{FileEntry, FileKind, RelPath};

    fn entry(name: &str, parent: &RelPath) -> FileEntry {
        FileEntry {
            name: name.to_string(),
            path: parent.join(name).unwrap(),
            is_dir: false,
            kind: FileKind::from_name(name),
            size: 0,
            size_display: "0 B".to_string(),
            modified_display: String::new(),
        }
    }

    #[test]
    fn root_page_has_no_parent_row() {
        let page = ListingPage::new(RelPath::root(), vec![entry("a.txt", &RelPath::root())]);
        assert_eq!(page.len(), 1);
        assert!(matches!(page.rows()[0], Row::Entry(_)));
    }

    #[test]
    fn nested_page_starts_with_parent_row() {
        let path = RelPath::root().join("inbox").unwrap();
        let page = ListingPage::new(path.clone(), vec![entry("a.txt", &path)]);
        assert_eq!(page.len(), 2);
        match &page.rows()[0] {
            Row::Parent(target) => assert!(target.is_root()),
            Row::Entry(_) => panic!("expected parent row first"),
        }
    }

    #[test]
    fn selection_clamps_to_bounds() {
        let root = RelPath::root();
        let mut page = ListingPage::new(
            root.clone(),
            vec![entry("a", &root), entry("b", &root), entry("c", &root)],
        );

        page.select_up();
        assert_eq!(page.selected(), 0);

        page.select_down();
        page.select_down();
        page.select_down();
        assert_eq!(page.selected(), 2);

        page.select_top();
        assert_eq!(page.selected(), 0);
        page.select_bottom();
        assert_eq!(page.selected(), 2);
    }

    #[test]
    fn empty_page_has_no_selection_target() {
        let mut page = ListingPage::empty();
        assert!(page.selected_row().is_none());
        page.select_down();
        page.select_bottom();
        assert_eq!(page.selected(), 0);
    }
}
