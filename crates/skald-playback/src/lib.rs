//! Skald Playback -- event-sourced battle playback with reversible stepping.
//!
//! This crate builds on [`skald_log`] and [`skald_model`] to provide the
//! playback driver: a [`PlaybackController`](controller::PlaybackController)
//! that steps through a recorded combat log in either direction, a
//! [`HistoryStack`](history::HistoryStack) for O(1) backward navigation, a
//! cancellable [`TickScheduler`](scheduler::TickScheduler) for timed
//! auto-advance, and a [`SideEffects`](effects::SideEffects) contract through
//! which hosts receive log lines, animation triggers, and render requests.
//!
//! # Quick Start
//!
//! ```
//! use skald_playback::prelude::*;
//! use skald_log::prelude::*;
//!
//! let json = r#"[
//!   {"type": "playground.engine_v1.CombatEvent.TurnStart", "turn": 1,
//!    "snapshot": {"actors": [
//!      {"name": "Alice", "actorClass": "Fighter", "team": 0, "hp": 100, "maxHp": 100},
//!      {"name": "Bob", "actorClass": "Mage", "team": 1, "hp": 100, "maxHp": 100}]}},
//!   {"type": "playground.engine_v1.CombatEvent.DamageDealt",
//!    "source": "Alice", "target": "Bob", "amount": 30, "targetHp": 70,
//!    "delta": {"Bob": {"hp": 70}}}
//! ]"#;
//!
//! let store = EventStore::from_json_str(json)?;
//! let mut controller =
//!     PlaybackController::new(store, PlaybackConfig::default(), TextEffects::new())?;
//!
//! controller.step_forward();
//! controller.step_forward();
//! assert_eq!(controller.position(), Some(1));
//! assert_eq!(controller.current_snapshot().actor("Bob").unwrap().hp, 70);
//!
//! controller.step_back();
//! assert_eq!(controller.current_snapshot().actor("Bob").unwrap().hp, 100);
//! # Ok::<(), anyhow::Error>(())
//! ```

#![deny(unsafe_code)]

pub mod controller;
pub mod effects;
pub mod history;
pub mod scheduler;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

/// Re-export the combat log crate for convenience.
pub use skald_log;

/// Re-export the model crate for convenience.
pub use skald_model;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal playback conditions.
///
/// Non-fatal conditions (delta entries for unknown actors, unrecognized event
/// tags) are handled inline with a `tracing` warning and never surface here.
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    /// No event in the store carries a full snapshot, so there is no state
    /// to resynchronize from.
    #[error("combat log contains no snapshot to initialize playback from")]
    MissingInitialSnapshot,

    /// A speed multiplier was not positive and finite.
    #[error("invalid speed multiplier {speed}; must be positive and finite")]
    InvalidSpeed {
        /// The rejected multiplier.
        speed: f64,
    },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common playback usage.
pub mod prelude {
    // Model types come along for snapshot inspection.
    pub use skald_model::prelude::*;

    pub use crate::controller::{PlaybackConfig, PlaybackController, PlaybackState};
    pub use crate::effects::{AnimationTrigger, NullEffects, SideEffects, TextEffects};
    pub use crate::history::HistoryStack;
    pub use crate::scheduler::{TickScheduler, TickToken};
    pub use crate::PlaybackError;
}
