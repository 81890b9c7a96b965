//! Page-lifecycle signals.

/// Lifecycle signal kinds emitted by the page layer and observed by the
/// busy-indicator coordinator.
///
/// `RequestSettled` fires for success and failure alike. `HistoryRestored`
/// fires when a cached page is restored without a fresh operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSignal {
    RequestStarted,
    RequestSettled,
    HistoryRestored,
}

impl PageSignal {
    /// Stable name used in log lines.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::RequestStarted => "request-started",
            Self::RequestSettled => "request-settled",
            Self::HistoryRestored => "history-restore",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PageSignal;

    #[test]
    fn names_are_distinct() {
        let names = [
            PageSignal::RequestStarted.name(),
            PageSignal::RequestSettled.name(),
            PageSignal::HistoryRestored.name(),
        ];
        assert_eq!(names.len(), 3);
        assert_ne!(names[0], names[1]);
        assert_ne!(names[1], names[2]);
        assert_ne!(names[0], names[2]);
    }
}
