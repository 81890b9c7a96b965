//! Busy-indicator coordination.
//!
//! Watches page-lifecycle signals and decides when the busy overlay
//! appears. Activation is deferred so fast operations never flash the
//! indicator; overlapping operations count as one busy period; restoring a
//! cached page tears the indicator down entirely instead of hiding it.

use std::time::{Duration, Instant};

use slurp_types::PageSignal;
use tracing::trace;

use crate::timer::{ActivationTimer, ActivationToken};

/// Default delay between a request starting and the overlay appearing.
pub const DEFAULT_ACTIVATION_DELAY: Duration = Duration::from_millis(800);

/// The visual surface the coordinator drives.
///
/// `hide` must be a no-op when nothing is shown, and every operation must
/// tolerate being called after `remove`.
pub trait BusyIndicator {
    fn show(&mut self);
    fn hide(&mut self);
    /// Tear down the backing element outright. Used on history restores,
    /// where a restored page may hold the indicator in a state `hide`
    /// cannot be trusted to fix.
    fn remove(&mut self);
}

/// Tracks in-flight page operations and schedules the deferred show.
///
/// One instance lives in the application state. Requests are reference
/// counted: the activation is scheduled when the count leaves zero and the
/// hide is issued when it returns to zero, so an early settle of one
/// overlapping request cannot strand or orphan the indicator.
#[derive(Debug)]
pub struct BusyCoordinator {
    delay: Duration,
    in_flight: u32,
    pending: Option<ActivationToken>,
    timer: ActivationTimer,
}

impl BusyCoordinator {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            in_flight: 0,
            pending: None,
            timer: ActivationTimer::new(),
        }
    }

    /// Feed one lifecycle signal through the coordinator.
    pub fn observe(
        &mut self,
        signal: PageSignal,
        now: Instant,
        indicator: &mut impl BusyIndicator,
    ) {
        trace!(signal = signal.name(), in_flight = self.in_flight, "observe");
        match signal {
            PageSignal::RequestStarted => self.request_started(now),
            PageSignal::RequestSettled => self.request_settled(indicator),
            PageSignal::HistoryRestored => self.history_restored(indicator),
        }
    }

    /// Drive the deferred activation. Call once per frame.
    pub fn poll(&mut self, now: Instant, indicator: &mut impl BusyIndicator) {
        if let Some(fired) = self.timer.poll(now)
            && self.pending == Some(fired)
        {
            self.pending = None;
            indicator.show();
        }
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    fn request_started(&mut self, now: Instant) {
        self.in_flight = self.in_flight.saturating_add(1);
        if self.in_flight == 1 {
            self.pending = Some(self.timer.schedule(now + self.delay));
        }
    }

    /// Fires for success and failure alike. Cancellation is best-effort
    /// forget; the unconditional hide is what guarantees the indicator is
    /// not left visible once the busy period closes.
    fn request_settled(&mut self, indicator: &mut impl BusyIndicator) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.in_flight == 0 {
            self.cancel_pending();
            indicator.hide();
        }
    }

    /// A cached page replaced the current one; whatever was in flight
    /// belongs to the page that is gone.
    fn history_restored(&mut self, indicator: &mut impl BusyIndicator) {
        self.in_flight = 0;
        self.cancel_pending();
        indicator.remove();
    }

    fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            self.timer.cancel(token);
        }
    }
}

impl Default for BusyCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVATION_DELAY)
    }
}
