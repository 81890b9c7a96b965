//! Cached page history.
//!
//! A bounded back-stack of listing snapshots. Restoring from it is the
//! `history-restore` path: no fresh operation runs, and the busy indicator
//! is torn down rather than hidden.

use crate::listing::ListingPage;

pub const MAX_HISTORY: usize = 50;

#[derive(Debug, Default)]
pub struct PageHistory {
    stack: Vec<ListingPage>,
}

impl PageHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push the page being left. Beyond the cap the oldest snapshot drops.
    pub fn push(&mut self, page: ListingPage) {
        if self.stack.len() == MAX_HISTORY {
            self.stack.remove(0);
        }
        self.stack.push(page);
    }

    pub fn pop(&mut self) -> Option<ListingPage> {
        self.stack.pop()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{MAX_HISTORY, PageHistory};
    use crate::listing::ListingPage;
    use slurp_types::RelPath;

    fn page(name: &str) -> ListingPage {
        ListingPage::new(RelPath::root().join(name).unwrap(), Vec::new())
    }

    #[test]
    fn pops_in_reverse_push_order() {
        let mut history = PageHistory::new();
        history.push(page("first"));
        history.push(page("second"));

        assert_eq!(history.pop().unwrap().path().as_str(), "second");
        assert_eq!(history.pop().unwrap().path().as_str(), "first");
        assert!(history.pop().is_none());
    }

    #[test]
    fn cap_drops_the_oldest_snapshot() {
        let mut history = PageHistory::new();
        for i in 0..=MAX_HISTORY {
            history.push(page(&format!("dir{i}")));
        }
        assert_eq!(history.len(), MAX_HISTORY);

        let mut last = None;
        while let Some(snapshot) = history.pop() {
            last = Some(snapshot);
        }
        // dir0 was evicted; the oldest survivor is dir1.
        assert_eq!(last.unwrap().path().as_str(), "dir1");
    }
}
