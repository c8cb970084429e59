//! Complete battle snapshots with BLAKE3 content hashing.
//!
//! A [`BattleSnapshot`] is the full, ordered state of every actor at one
//! point in the event log. Snapshots are plain owned values: cloning one
//! yields a structurally independent copy, which is the isolation guarantee
//! the playback history stack depends on.
//!
//! [`BattleSnapshot::state_hash`] produces a BLAKE3 hex digest over the
//! canonical JSON serialization, used by the replay-idempotence tests the
//! same way engine determinism is usually verified: two reconstruction paths
//! must land on the same digest.

use serde::{Deserialize, Serialize};

use crate::actor::ActorState;

// ---------------------------------------------------------------------------
// BattleSnapshot
// ---------------------------------------------------------------------------

/// Complete point-in-time state of every combatant, in log order.
///
/// Actor order is meaningful (it is the display order recorded in the log)
/// and is preserved through reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BattleSnapshot {
    /// All actors, in the order the log recorded them.
    pub actors: Vec<ActorState>,
}

impl BattleSnapshot {
    /// Create a snapshot from a list of actors.
    pub fn new(actors: Vec<ActorState>) -> Self {
        Self { actors }
    }

    /// Look up an actor by name.
    pub fn actor(&self, name: &str) -> Option<&ActorState> {
        self.actors.iter().find(|a| a.name == name)
    }

    /// Look up an actor by name, mutably.
    pub fn actor_mut(&mut self, name: &str) -> Option<&mut ActorState> {
        self.actors.iter_mut().find(|a| a.name == name)
    }

    /// Whether the snapshot contains an actor with the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.actor(name).is_some()
    }

    /// Convenience lookup of an actor's maximum hit points, used by log-line
    /// formatting (`HP 70/100`).
    pub fn max_hp_of(&self, name: &str) -> Option<i32> {
        self.actor(name).map(|a| a.max_hp)
    }

    /// Number of actors in the snapshot.
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// Compute the BLAKE3 hex digest (64 lowercase hex chars) of the
    /// canonical JSON serialization of this snapshot.
    ///
    /// Actor order and `BTreeMap`-backed fields make the serialization
    /// deterministic, so equal snapshots always hash equal.
    pub fn state_hash(&self) -> String {
        let bytes = serde_json::to_vec(self)
            .unwrap_or_else(|e| unreachable!("BattleSnapshot serialization cannot fail: {e}"));
        blake3::hash(&bytes).to_hex().to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
