//! The playback controller state machine.
//!
//! A [`PlaybackController`] owns everything one playback session needs: the
//! immutable [`EventStore`], the externally recorded initial snapshot, the
//! current snapshot, the [`HistoryStack`], the [`TickScheduler`], and the
//! [`SideEffects`] dispatcher. It is an explicit instance owned by its
//! caller; independent sessions coexist without shared state.
//!
//! # State machine
//!
//! ```text
//!            play()                stepForward() at last index
//!   Idle ------------> Playing -------------------------------> Ended
//!    ^                 |    ^                                     |
//!    | reset()  pause()|    | play()                      play()  |
//!    +---------------- Paused <------- (implicit reset + play) ---+
//! ```
//!
//! Every transition that leaves `Playing` cancels the pending scheduler tick
//! *before* mutating index or snapshot state, so a stale tick can never
//! double-apply an event.
//!
//! # Dispatch discipline
//!
//! A genuine forward step dispatches, in order: one log line, one animation
//! trigger (for variants that have one), one render. Backward steps, resets,
//! and seek replays dispatch log lines and renders only -- one-shot
//! animations are never re-triggered.

use std::time::{Duration, Instant};

use skald_log::event::CombatEvent;
use skald_log::store::EventStore;
use skald_model::reconcile;
use skald_model::snapshot::BattleSnapshot;
use tracing::debug;

use crate::effects::{AnimationTrigger, SideEffects};
use crate::history::HistoryStack;
use crate::scheduler::TickScheduler;
use crate::PlaybackError;

// ---------------------------------------------------------------------------
// PlaybackState
// ---------------------------------------------------------------------------

/// The controller's lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Before the first event; never started or freshly reset.
    Idle,
    /// The scheduler is driving forward steps.
    Playing,
    /// Stopped mid-log; manual stepping allowed.
    Paused,
    /// At the last event; no further forward steps possible.
    Ended,
}

// ---------------------------------------------------------------------------
// PlaybackConfig
// ---------------------------------------------------------------------------

/// Timing configuration for scheduled playback.
#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    /// Delay between scheduled forward steps at speed 1.0.
    pub base_interval: Duration,
    /// Initial speed multiplier. Must be positive and finite.
    pub speed: f64,
}

impl Default for PlaybackConfig {
    /// 400 ms between steps at speed 1.0, matching the recorded cadence.
    fn default() -> Self {
        Self {
            base_interval: Duration::from_millis(400),
            speed: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// PlaybackController
// ---------------------------------------------------------------------------

/// Event-sourced playback over one battle session.
///
/// See the [module documentation](self) for the state machine and the
/// dispatch discipline.
#[derive(Debug)]
pub struct PlaybackController<E: SideEffects> {
    store: EventStore,
    /// Snapshot for the position before the first event. Restored when
    /// navigation crosses below index 0.
    initial: BattleSnapshot,
    /// Snapshot at the current index; exclusively owned.
    current: BattleSnapshot,
    history: HistoryStack,
    /// Last applied event index; `None` means before the first event.
    index: Option<usize>,
    state: PlaybackState,
    base_interval: Duration,
    speed: f64,
    scheduler: TickScheduler,
    effects: E,
}

impl<E: SideEffects> PlaybackController<E> {
    /// Create a controller for `store`, deriving the initial snapshot from
    /// the store's first checkpoint, and render the starting state once.
    ///
    /// # Errors
    ///
    /// - [`PlaybackError::MissingInitialSnapshot`] if no event in the store
    ///   carries a full snapshot. This is the only fatal condition; it is
    ///   reported here, never mid-playback.
    /// - [`PlaybackError::InvalidSpeed`] if the configured speed is not
    ///   positive and finite.
    pub fn new(store: EventStore, config: PlaybackConfig, mut effects: E) -> Result<Self, PlaybackError> {
        if !(config.speed.is_finite() && config.speed > 0.0) {
            return Err(PlaybackError::InvalidSpeed { speed: config.speed });
        }
        let initial = store
            .initial_snapshot()
            .ok_or(PlaybackError::MissingInitialSnapshot)?;

        let current = initial.clone();
        effects.render(&current);

        Ok(Self {
            store,
            initial,
            current,
            history: HistoryStack::new(),
            index: None,
            state: PlaybackState::Idle,
            base_interval: config.base_interval,
            speed: config.speed,
            scheduler: TickScheduler::new(),
            effects,
        })
    }

    // -- transport ----------------------------------------------------------

    /// Start scheduled playback. No-op when already `Playing`. From `Ended`
    /// this performs an implicit [`reset`](Self::reset) first, guaranteeing a
    /// fresh full replay instead of a stall.
    pub fn play(&mut self) {
        match self.state {
            PlaybackState::Playing => return,
            PlaybackState::Ended => self.reset(),
            PlaybackState::Idle | PlaybackState::Paused => {}
        }
        debug!(position = ?self.index, "playback started");
        self.state = PlaybackState::Playing;
        self.scheduler.schedule(self.tick_interval(), Instant::now());
    }

    /// Stop scheduled playback, cancelling the pending tick. No-op unless
    /// `Playing`.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.scheduler.cancel();
            self.state = PlaybackState::Paused;
            debug!(position = ?self.index, "playback paused");
        }
    }

    /// [`pause`](Self::pause) when `Playing`, otherwise [`play`](Self::play)
    /// (with the `Ended`-implies-reset rule).
    pub fn toggle(&mut self) {
        if self.state == PlaybackState::Playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Return to the position before the first event: cancel the scheduler,
    /// clear the history stack, restore the initial snapshot, and re-render
    /// without animation.
    pub fn reset(&mut self) {
        self.scheduler.cancel();
        self.state = PlaybackState::Idle;
        self.index = None;
        self.history.clear();
        self.current = self.initial.clone();
        self.rebuild_view();
    }

    // -- stepping -----------------------------------------------------------

    /// Apply the next event with full side effects. No-op at the last index.
    pub fn step_forward(&mut self) {
        self.forward_step(true);
    }

    /// Undo the last applied event. Cancels any pending tick and forces
    /// `Playing` to `Paused` before touching state; dispatches log and
    /// render only, never animations. No-op before the first event.
    pub fn step_back(&mut self) {
        let Some(i) = self.index else { return };

        // Cancel before mutating: a tick scheduled for the old position must
        // not land on the new one.
        self.scheduler.cancel();
        if matches!(self.state, PlaybackState::Playing | PlaybackState::Ended) {
            self.state = PlaybackState::Paused;
        }

        let new_index = i.checked_sub(1);
        self.current = match self.history.pop() {
            Some(snapshot) => snapshot,
            // History cannot cover the distance: resynchronize from the
            // nearest checkpoint (or the initial snapshot).
            None => self.reconstruct_at(new_index),
        };
        self.index = new_index;
        self.rebuild_view();
    }

    /// Move directly to `target` (`None` = before the first event; indices
    /// past the end clamp to the last event).
    ///
    /// Backward movement pops history entries quietly and rebuilds the view
    /// once. Forward movement replays events with animations suppressed for
    /// every intermediate event; only the event at `target` receives the full
    /// dispatch, and only because it is reached by a genuine forward step.
    /// Leaves the controller `Paused` (`Idle` at `None`, `Ended` at the last
    /// index), never `Playing`.
    pub fn seek(&mut self, target: Option<usize>) {
        let target = match (target, self.store.len()) {
            (_, 0) => None,
            (Some(t), len) => Some(t.min(len - 1)),
            (None, _) => None,
        };

        self.scheduler.cancel();
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
        if target == self.index {
            return;
        }

        if target < self.index {
            while self.index != target {
                let Some(i) = self.index else { break };
                let new_index = i.checked_sub(1);
                self.current = match self.history.pop() {
                    Some(snapshot) => snapshot,
                    None => self.reconstruct_at(new_index),
                };
                self.index = new_index;
            }
            self.rebuild_view();
        } else {
            while self.index < target {
                let next = self.index.map_or(0, |i| i + 1);
                let is_target = Some(next) == target;
                if !self.forward_step(is_target) {
                    break;
                }
            }
        }

        self.state = match self.index {
            None => PlaybackState::Idle,
            Some(i) if i + 1 == self.store.len() => PlaybackState::Ended,
            Some(_) => PlaybackState::Paused,
        };
        debug!(position = ?self.index, "seek complete");
    }

    /// Change the speed multiplier. When `Playing`, the pending tick is
    /// replaced atomically with one at the new cadence -- the generation
    /// token guarantees the old tick neither fires late nor is skipped.
    ///
    /// # Errors
    ///
    /// [`PlaybackError::InvalidSpeed`] if `multiplier` is not positive and
    /// finite; the current speed is left unchanged.
    pub fn set_speed(&mut self, multiplier: f64) -> Result<(), PlaybackError> {
        if !(multiplier.is_finite() && multiplier > 0.0) {
            return Err(PlaybackError::InvalidSpeed { speed: multiplier });
        }
        self.speed = multiplier;
        if self.state == PlaybackState::Playing {
            self.scheduler.schedule(self.tick_interval(), Instant::now());
        }
        Ok(())
    }

    // -- scheduler drive ----------------------------------------------------

    /// Cooperative drive point: fire the pending tick if it is due at `now`.
    /// A fired tick performs exactly one forward step and reschedules unless
    /// the step left the `Playing` state.
    pub fn pump(&mut self, now: Instant) {
        if self.scheduler.poll(now).is_some() {
            self.forward_step(true);
            if self.state == PlaybackState::Playing {
                self.scheduler.schedule(self.tick_interval(), now);
            }
        }
    }

    /// Block the current thread, sleeping between ticks, until playback
    /// leaves the `Playing` state. Convenience loop for headless hosts.
    pub fn run_to_end(&mut self) {
        while let Some(deadline) = self.scheduler.next_deadline() {
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }
            self.pump(Instant::now());
        }
    }

    // -- reconstruction -----------------------------------------------------

    /// Reconstruct the snapshot for an arbitrary position without touching
    /// playback state: resynchronize at the nearest checkpoint at or before
    /// the position, then apply the cumulative deltas after it. The fallback
    /// when no checkpoint exists is the initial snapshot (replay from the
    /// start).
    pub fn reconstruct_at(&self, index: Option<usize>) -> BattleSnapshot {
        let Some(i) = index else {
            return self.initial.clone();
        };
        let (resume_from, mut snapshot) = match self.store.checkpoint_at_or_before(i) {
            Some((k, snapshot)) => (k + 1, snapshot),
            None => (0, self.initial.clone()),
        };
        for k in resume_from..=i {
            if let Some(delta) = self.store.get(k).and_then(CombatEvent::delta) {
                let (next, _skipped) = reconcile::apply_delta(&snapshot, delta);
                snapshot = next;
            }
        }
        snapshot
    }

    // -- accessors ----------------------------------------------------------

    /// The current lifecycle state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// The last applied event index; `None` before the first event.
    pub fn position(&self) -> Option<usize> {
        self.index
    }

    /// An independent copy of the current snapshot. Consumers may mutate it
    /// freely without affecting playback state.
    pub fn current_snapshot(&self) -> BattleSnapshot {
        self.current.clone()
    }

    /// Number of snapshots on the history stack.
    pub fn history_depth(&self) -> usize {
        self.history.depth()
    }

    /// The current speed multiplier.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Number of events in the session.
    pub fn event_count(&self) -> usize {
        self.store.len()
    }

    /// Whether a scheduler tick is pending.
    pub fn tick_pending(&self) -> bool {
        self.scheduler.is_scheduled()
    }

    /// Read access to the side-effect dispatcher.
    pub fn effects(&self) -> &E {
        &self.effects
    }

    /// Mutable access to the side-effect dispatcher.
    pub fn effects_mut(&mut self) -> &mut E {
        &mut self.effects
    }

    // -- internals ----------------------------------------------------------

    fn tick_interval(&self) -> Duration {
        self.base_interval.div_f64(self.speed)
    }

    /// Apply the event after the current index. Returns whether a step was
    /// taken. `animate` selects the full dispatch (forward step) or the
    /// log+render dispatch (seek replay).
    fn forward_step(&mut self, animate: bool) -> bool {
        let next = self.index.map_or(0, |i| i + 1);
        let Some(event) = self.store.get(next) else {
            return false;
        };

        let next_snapshot = if let Some(checkpoint) = event.checkpoint() {
            reconcile::apply_checkpoint(checkpoint)
        } else if let Some(delta) = event.delta() {
            let (snapshot, _skipped) = reconcile::apply_delta(&self.current, delta);
            snapshot
        } else {
            // Events carrying neither checkpoint nor delta leave state as is.
            self.current.clone()
        };

        // The pre-step snapshot moves onto the history stack; nothing ever
        // holds a reference into it afterwards.
        self.history
            .push(std::mem::replace(&mut self.current, next_snapshot));
        self.index = Some(next);

        self.effects.log_event(event, &self.current);
        if animate {
            if let Some(trigger) = AnimationTrigger::for_event(event) {
                self.effects.animate(&trigger);
            }
        }
        self.effects.render(&self.current);

        if next + 1 == self.store.len() {
            self.scheduler.cancel();
            self.state = PlaybackState::Ended;
            debug!("playback reached the last event");
        } else if self.state == PlaybackState::Idle {
            self.state = PlaybackState::Paused;
        }

        debug_assert!(self.history.depth() <= next + 1);
        true
    }

    /// Re-emit the log view for the current position and refresh displays.
    /// Used by backward navigation, reset, and backward seeks.
    fn rebuild_view(&mut self) {
        self.effects.clear_log();
        if let Some(upto) = self.index {
            for k in 0..=upto {
                if let Some(event) = self.store.get(k) {
                    self.effects.log_event(event, &self.current);
                }
            }
        }
        self.effects.render(&self.current);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
