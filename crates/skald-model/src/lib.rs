//! Skald Model -- battle state containers and the pure snapshot reconciler.
//!
//! This crate holds the leaf data types of the Skald playback engine: actors,
//! complete battle snapshots, and partial deltas, plus the pure functions that
//! derive a new snapshot from a prior one. Nothing here knows about events,
//! scheduling, or presentation; higher layers (`skald-log`, `skald-playback`)
//! build on these containers.
//!
//! All types are plain owned values: `Clone` produces a structurally
//! independent deep copy, which is what the playback history stack relies on
//! for aliasing-freedom.
//!
//! # Quick Start
//!
//! ```
//! use skald_model::prelude::*;
//!
//! let snapshot = BattleSnapshot::new(vec![
//!     ActorState::new("Alice", ActorClass::Fighter, 0, 100, 100),
//!     ActorState::new("Bob", ActorClass::Mage, 1, 80, 80),
//! ]);
//!
//! let mut delta = SnapshotDelta::default();
//! delta.changes.insert("Bob".to_owned(), ActorPatch { hp: Some(50), ..Default::default() });
//!
//! let (next, skipped) = reconcile::apply_delta(&snapshot, &delta);
//! assert!(skipped.is_empty());
//! assert_eq!(next.actor("Bob").unwrap().hp, 50);
//! // The input snapshot is untouched.
//! assert_eq!(snapshot.actor("Bob").unwrap().hp, 80);
//! ```

#![deny(unsafe_code)]

pub mod actor;
pub mod delta;
pub mod reconcile;
pub mod snapshot;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Recoverable reconciliation failures, reported alongside the result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A delta named an actor that is not present in the snapshot.
    #[error("actor '{name}' not found in snapshot")]
    ActorNotFound { name: String },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::actor::{ActorClass, ActorState, ResourceTick, StatBuff};
    pub use crate::delta::{ActorPatch, SnapshotDelta};
    pub use crate::reconcile;
    pub use crate::snapshot::BattleSnapshot;
    pub use crate::ModelError;
}
