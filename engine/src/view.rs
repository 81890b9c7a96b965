//! View-facing state: the indicator mount, preview pane, confirm prompt,
//! and status line. The TUI reads this; it never reaches into the engine's
//! internals.

use std::time::{Duration, Instant};

use slurp_types::RelPath;

use crate::busy::BusyIndicator;
use crate::preview::PreviewPane;

/// Spinner cadence while the overlay is visible.
const SPINNER_INTERVAL: Duration = Duration::from_millis(100);
/// How long a status notice stays on the bar.
const STATUS_TTL: Duration = Duration::from_secs(4);

/// The busy overlay once it is mounted on the page.
#[derive(Debug, Clone)]
pub struct BusyOverlay {
    visible: bool,
    frame: usize,
    last_frame_at: Option<Instant>,
}

impl BusyOverlay {
    fn hidden() -> Self {
        Self {
            visible: false,
            frame: 0,
            last_frame_at: None,
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Monotonic spinner frame counter; the renderer applies the modulo.
    #[must_use]
    pub fn frame(&self) -> usize {
        self.frame
    }
}

/// The slot in the page that houses the busy overlay.
///
/// `remove` empties the slot; the next fresh listing load reinstalls a
/// hidden overlay, the way a full page render re-adds a layout element.
#[derive(Debug)]
pub struct IndicatorMount {
    slot: Option<BusyOverlay>,
}

impl IndicatorMount {
    #[must_use]
    pub fn installed() -> Self {
        Self {
            slot: Some(BusyOverlay::hidden()),
        }
    }

    /// Reinstall after a removal. Keeps the existing overlay, visible or
    /// not, when one is already mounted.
    pub fn install(&mut self) {
        if self.slot.is_none() {
            self.slot = Some(BusyOverlay::hidden());
        }
    }

    #[must_use]
    pub fn is_present(&self) -> bool {
        self.slot.is_some()
    }

    #[must_use]
    pub fn overlay(&self) -> Option<&BusyOverlay> {
        self.slot.as_ref()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.slot.as_ref().is_some_and(BusyOverlay::is_visible)
    }

    /// Advance the spinner at its cadence while visible.
    pub fn advance_frame(&mut self, now: Instant) {
        let Some(overlay) = &mut self.slot else {
            return;
        };
        if !overlay.visible {
            return;
        }
        match overlay.last_frame_at {
            Some(last) if now.duration_since(last) < SPINNER_INTERVAL => {}
            _ => {
                overlay.frame = overlay.frame.wrapping_add(1);
                overlay.last_frame_at = Some(now);
            }
        }
    }
}

impl BusyIndicator for IndicatorMount {
    fn show(&mut self) {
        if let Some(overlay) = &mut self.slot {
            overlay.visible = true;
        }
    }

    fn hide(&mut self) {
        if let Some(overlay) = &mut self.slot {
            overlay.visible = false;
        }
    }

    fn remove(&mut self) {
        self.slot = None;
    }
}

/// Pending delete confirmation.
#[derive(Debug, Clone)]
pub struct ConfirmPrompt {
    pub name: String,
    pub path: RelPath,
    pub is_dir: bool,
}

#[derive(Debug, Clone)]
struct StatusLine {
    text: String,
    is_error: bool,
    posted_at: Instant,
}

#[derive(Debug)]
pub struct ViewState {
    pub indicator: IndicatorMount,
    pub preview: Option<PreviewPane>,
    pub confirm: Option<ConfirmPrompt>,
    status: Option<StatusLine>,
}

impl ViewState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            indicator: IndicatorMount::installed(),
            preview: None,
            confirm: None,
            status: None,
        }
    }

    pub fn post_status(&mut self, text: impl Into<String>, now: Instant) {
        self.status = Some(StatusLine {
            text: text.into(),
            is_error: false,
            posted_at: now,
        });
    }

    pub fn post_error(&mut self, text: impl Into<String>, now: Instant) {
        self.status = Some(StatusLine {
            text: text.into(),
            is_error: true,
            posted_at: now,
        });
    }

    /// Current notice, if any: text and whether it is an error.
    #[must_use]
    pub fn status(&self) -> Option<(&str, bool)> {
        self.status
            .as_ref()
            .map(|line| (line.text.as_str(), line.is_error))
    }

    pub fn expire_status(&mut self, now: Instant) {
        if let Some(line) = &self.status
            && now.duration_since(line.posted_at) >= STATUS_TTL
        {
            self.status = None;
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{IndicatorMount, SPINNER_INTERVAL, STATUS_TTL, ViewState};
    use crate::busy::BusyIndicator;
    use std::time::Instant;

    #[test]
    fn mount_survives_show_hide_cycles() {
        let mut mount = IndicatorMount::installed();
        assert!(mount.is_present());
        assert!(!mount.is_visible());

        mount.show();
        assert!(mount.is_visible());
        mount.hide();
        assert!(!mount.is_visible());
        assert!(mount.is_present());
    }

    #[test]
    fn remove_empties_the_slot_and_show_becomes_inert() {
        let mut mount = IndicatorMount::installed();
        mount.remove();
        assert!(!mount.is_present());

        mount.show();
        assert!(!mount.is_visible());

        mount.install();
        assert!(mount.is_present());
        assert!(!mount.is_visible());
    }

    #[test]
    fn install_does_not_clobber_a_visible_overlay() {
        let mut mount = IndicatorMount::installed();
        mount.show();
        mount.install();
        assert!(mount.is_visible());
    }

    #[test]
    fn spinner_advances_only_while_visible() {
        let mut mount = IndicatorMount::installed();
        let t0 = Instant::now();

        mount.advance_frame(t0);
        assert_eq!(mount.overlay().unwrap().frame(), 0);

        mount.show();
        mount.advance_frame(t0);
        assert_eq!(mount.overlay().unwrap().frame(), 1);

        // Within the cadence window nothing moves.
        mount.advance_frame(t0 + SPINNER_INTERVAL / 2);
        assert_eq!(mount.overlay().unwrap().frame(), 1);

        mount.advance_frame(t0 + SPINNER_INTERVAL);
        assert_eq!(mount.overlay().unwrap().frame(), 2);
    }

    #[test]
    fn status_expires_after_its_ttl() {
        let mut view = ViewState::new();
        let t0 = Instant::now();

        view.post_status("Deleted notes.txt", t0);
        assert_eq!(view.status(), Some(("Deleted notes.txt", false)));

        view.expire_status(t0 + STATUS_TTL / 2);
        assert!(view.status().is_some());

        view.expire_status(t0 + STATUS_TTL);
        assert!(view.status().is_none());
    }

    #[test]
    fn errors_are_flagged() {
        let mut view = ViewState::new();
        view.post_error("Could not load preview: gone", Instant::now());
        assert_eq!(view.status().map(|(_, err)| err), Some(true));
    }
}
