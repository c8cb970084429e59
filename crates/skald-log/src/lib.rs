//! Skald Log -- the combat event schema, the immutable event store, and the
//! log-line formatter.
//!
//! A battle session is a single, totally ordered sequence of
//! [`CombatEvent`]s. Events are ingested once (from JSON produced by the
//! recording engine), resolved into an explicit typed schema at that point,
//! and never mutated or reordered afterwards. The [`EventStore`] is the sole
//! owner of that sequence; playback reads from it by index.
//!
//! # Quick Start
//!
//! ```
//! use skald_log::prelude::*;
//! use skald_model::prelude::*;
//!
//! let snapshot = BattleSnapshot::new(vec![
//!     ActorState::new("Alice", ActorClass::Fighter, 0, 100, 100),
//! ]);
//! let store = EventStore::from_events(vec![
//!     CombatEvent::TurnStart { turn: 1, snapshot: snapshot.clone() },
//! ]);
//!
//! assert_eq!(store.len(), 1);
//! let initial = store.initial_snapshot().unwrap();
//! assert_eq!(format_event(store.get(0).unwrap(), &initial), "--- Turn 1 ---");
//! ```

#![deny(unsafe_code)]

pub mod event;
pub mod format;
pub mod store;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::event::CombatEvent;
    pub use crate::format::format_event;
    pub use crate::store::EventStore;
}
