//! Cancellable single-slot tick scheduling.
//!
//! Playback is single-threaded and cooperative: while the controller is in
//! the Playing state there is exactly one pending tick, and the host drives
//! it by polling with the current time. [`TickScheduler`] owns that one slot.
//!
//! Cancellation uses a generation token instead of timer-handle bookkeeping:
//! every `schedule` bumps the generation and replaces the slot, `cancel`
//! empties it, and `poll` only ever fires the currently scheduled generation.
//! A tick belonging to a cancelled or replaced schedule can therefore never
//! fire late and mutate state out of order.

use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// TickToken
// ---------------------------------------------------------------------------

/// Identifies one scheduled tick. Tokens are never reused within a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickToken(u64);

// ---------------------------------------------------------------------------
// TickScheduler
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct PendingTick {
    token: TickToken,
    deadline: Instant,
}

/// At most one pending tick, with generation-token cancellation.
#[derive(Debug, Default)]
pub struct TickScheduler {
    pending: Option<PendingTick>,
    next_generation: u64,
}

impl TickScheduler {
    /// Create a scheduler with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a tick `delay` from `now`, replacing any pending tick.
    /// The replaced tick's token is dead: it can never fire.
    pub fn schedule(&mut self, delay: Duration, now: Instant) -> TickToken {
        let token = TickToken(self.next_generation);
        self.next_generation += 1;
        self.pending = Some(PendingTick {
            token,
            deadline: now + delay,
        });
        token
    }

    /// Cancel the pending tick, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a tick is currently pending.
    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// The pending tick's deadline, if any. Hosts sleep until this.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.deadline)
    }

    /// Fire the pending tick if its deadline has passed.
    ///
    /// Returns the fired token at most once: the slot is emptied before the
    /// token is handed out, so polling twice with the same `now` cannot
    /// double-fire.
    pub fn poll(&mut self, now: Instant) -> Option<TickToken> {
        match self.pending {
            Some(p) if p.deadline <= now => {
                self.pending = None;
                Some(p.token)
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
