//! Cancelable deferred activation.

use std::time::Instant;

/// Opaque token identifying one scheduled activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationToken(u64);

/// A single-slot deadline timer polled from the frame loop.
///
/// `schedule` arms the slot and returns a token; a later `schedule`
/// supersedes an earlier pending one. `cancel` disarms the slot only while
/// the token still matches, so canceling after the deadline fired, or after
/// a reschedule, is a no-op. `poll` reports each armed deadline at most
/// once.
#[derive(Debug, Default)]
pub struct ActivationTimer {
    armed: Option<(ActivationToken, Instant)>,
    next_token: u64,
}

impl ActivationTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, deadline: Instant) -> ActivationToken {
        let token = ActivationToken(self.next_token);
        self.next_token += 1;
        self.armed = Some((token, deadline));
        token
    }

    pub fn cancel(&mut self, token: ActivationToken) {
        if let Some((armed, _)) = self.armed
            && armed == token
        {
            self.armed = None;
        }
    }

    pub fn poll(&mut self, now: Instant) -> Option<ActivationToken> {
        match self.armed {
            Some((token, deadline)) if now >= deadline => {
                self.armed = None;
                Some(token)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}
