//! Preview pane model.

use slurp_types::{FileKind, format_size};

#[derive(Debug, Clone)]
pub enum PreviewBody {
    /// File contents rendered directly.
    Text { content: String, truncated: bool },
    /// Metadata card for media that cannot render in a terminal.
    InfoCard {
        kind: FileKind,
        size_display: String,
    },
}

#[derive(Debug, Clone)]
pub struct PreviewPane {
    title: String,
    body: PreviewBody,
    scroll: usize,
}

impl PreviewPane {
    #[must_use]
    pub fn text(title: impl Into<String>, content: String, truncated: bool) -> Self {
        Self {
            title: title.into(),
            body: PreviewBody::Text { content, truncated },
            scroll: 0,
        }
    }

    #[must_use]
    pub fn info_card(title: impl Into<String>, kind: FileKind, size: u64) -> Self {
        Self {
            title: title.into(),
            body: PreviewBody::InfoCard {
                kind,
                size_display: format_size(size),
            },
            scroll: 0,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn body(&self) -> &PreviewBody {
        &self.body
    }

    #[must_use]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = (self.scroll + lines).min(self.max_scroll());
    }

    fn max_scroll(&self) -> usize {
        match &self.body {
            PreviewBody::Text { content, .. } => content.lines().count().saturating_sub(1),
            PreviewBody::InfoCard { .. } => 0,
        }
    }
}
