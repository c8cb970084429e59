//! Partial snapshot updates: per-actor field patches keyed by actor name.
//!
//! A [`SnapshotDelta`] names only the actors that changed; every field of an
//! [`ActorPatch`] is optional, and `None` means "leave as is". Actors not
//! named by a delta are untouched during reconciliation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::actor::{ActorState, ResourceTick, StatBuff};

// ---------------------------------------------------------------------------
// ActorPatch
// ---------------------------------------------------------------------------

/// A field-wise partial update for a single actor.
///
/// Collection fields replace wholesale when present: a patch carrying
/// `stat_buffs: Some(vec![])` clears the actor's buffs, while `None` keeps
/// them. This mirrors how the log records delta payloads.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActorPatch {
    /// New current hit points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<i32>,
    /// New maximum hit points (rare; boss phase transitions).
    #[serde(default, rename = "maxHp", skip_serializing_if = "Option::is_none")]
    pub max_hp: Option<i32>,
    /// Full replacement of the stats table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<BTreeMap<String, i32>>,
    /// Full replacement of active stat buffs.
    #[serde(default, rename = "statBuffs", skip_serializing_if = "Option::is_none")]
    pub stat_buffs: Option<Vec<StatBuff>>,
    /// Full replacement of active resource ticks.
    #[serde(default, rename = "resourceTicks", skip_serializing_if = "Option::is_none")]
    pub resource_ticks: Option<Vec<ResourceTick>>,
    /// Full replacement of the cooldown table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooldowns: Option<BTreeMap<String, u32>>,
}

impl ActorPatch {
    /// Apply every present field onto `actor`, overwriting the previous value.
    pub fn apply_to(&self, actor: &mut ActorState) {
        if let Some(hp) = self.hp {
            actor.hp = hp;
        }
        if let Some(max_hp) = self.max_hp {
            actor.max_hp = max_hp;
        }
        if let Some(stats) = &self.stats {
            actor.stats = stats.clone();
        }
        if let Some(stat_buffs) = &self.stat_buffs {
            actor.stat_buffs = stat_buffs.clone();
        }
        if let Some(resource_ticks) = &self.resource_ticks {
            actor.resource_ticks = resource_ticks.clone();
        }
        if let Some(cooldowns) = &self.cooldowns {
            actor.cooldowns = cooldowns.clone();
        }
    }

    /// Whether the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.hp.is_none()
            && self.max_hp.is_none()
            && self.stats.is_none()
            && self.stat_buffs.is_none()
            && self.resource_ticks.is_none()
            && self.cooldowns.is_none()
    }
}

// ---------------------------------------------------------------------------
// SnapshotDelta
// ---------------------------------------------------------------------------

/// A partial snapshot update: actor name -> field patch.
///
/// `BTreeMap` keeps application order deterministic (alphabetical by actor
/// name), so reconciliation is reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotDelta {
    /// Patches keyed by actor name.
    pub changes: BTreeMap<String, ActorPatch>,
}

impl SnapshotDelta {
    /// A delta patching a single actor's hit points; the common case.
    pub fn hp_change(name: impl Into<String>, hp: i32) -> Self {
        let mut changes = BTreeMap::new();
        changes.insert(
            name.into(),
            ActorPatch {
                hp: Some(hp),
                ..Default::default()
            },
        );
        Self { changes }
    }

    /// Whether the delta names no actors.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
