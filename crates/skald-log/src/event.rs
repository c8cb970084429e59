//! The combat event schema.
//!
//! [`CombatEvent`] is an explicit tagged enum resolved once at ingestion --
//! there is no per-render field probing. Every event is immutable and has a
//! fixed position in the session's log.
//!
//! Two payload conventions from the recording engine:
//!
//! - Any event may embed a full [`BattleSnapshot`], which makes it a
//!   **checkpoint**: playback can resynchronize there without replaying the
//!   deltas before it. `TurnStart` always carries one.
//! - Any event except `TurnStart` may instead carry a [`SnapshotDelta`],
//!   a partial update for the actors it changed.
//!
//! Unrecognized tags survive ingestion as [`CombatEvent::Unknown`]; they
//! format as the raw tag and never animate, so one unknown record cannot
//! halt playback.

use serde::{Deserialize, Serialize};
use skald_model::delta::SnapshotDelta;
use skald_model::snapshot::BattleSnapshot;

// ---------------------------------------------------------------------------
// CombatEvent
// ---------------------------------------------------------------------------

/// One immutable record in the battle log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// A new turn begins. Always a checkpoint.
    TurnStart {
        /// 1-based turn number.
        turn: u32,
        /// Full battle state at the start of the turn.
        snapshot: BattleSnapshot,
    },

    /// An actor used a skill on one or more targets.
    SkillUsed {
        actor: String,
        skill: String,
        #[serde(default)]
        targets: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        snapshot: Option<BattleSnapshot>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delta: Option<SnapshotDelta>,
    },

    /// A target lost hit points.
    #[serde(rename_all = "camelCase")]
    DamageDealt {
        source: String,
        target: String,
        /// Damage amount. Older recordings used `damage` / `value` /
        /// `deltaHp` / `hpChange` for this field; all resolve here.
        #[serde(alias = "damage", alias = "value", alias = "deltaHp", alias = "hpChange")]
        amount: i32,
        /// The target's hit points after the damage.
        target_hp: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        snapshot: Option<BattleSnapshot>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delta: Option<SnapshotDelta>,
    },

    /// A target regained hit points.
    #[serde(rename_all = "camelCase")]
    Healed {
        source: String,
        target: String,
        #[serde(alias = "heal", alias = "healed", alias = "value", alias = "deltaHp")]
        amount: i32,
        /// The target's hit points after the heal.
        target_hp: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        snapshot: Option<BattleSnapshot>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delta: Option<SnapshotDelta>,
    },

    /// A buff was applied to a target.
    #[serde(rename_all = "camelCase")]
    BuffApplied {
        source: String,
        target: String,
        buff_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        snapshot: Option<BattleSnapshot>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delta: Option<SnapshotDelta>,
    },

    /// A buff ran out on a target.
    #[serde(rename_all = "camelCase")]
    BuffExpired {
        target: String,
        buff_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        snapshot: Option<BattleSnapshot>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delta: Option<SnapshotDelta>,
    },

    /// A periodic effect drained (or restored) a resource on a target.
    /// Negative `amount` is a drain, positive a gain.
    #[serde(rename_all = "camelCase")]
    ResourceDrained {
        target: String,
        buff_id: String,
        /// Which resource changed (currently `"hp"`). Older recordings omit it.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        resource: Option<String>,
        #[serde(alias = "value", alias = "deltaHp", alias = "hpChange")]
        amount: i32,
        /// The resource's value after the tick.
        target_resource_value: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        snapshot: Option<BattleSnapshot>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delta: Option<SnapshotDelta>,
    },

    /// The battle is over.
    BattleEnd {
        winner: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        snapshot: Option<BattleSnapshot>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delta: Option<SnapshotDelta>,
    },

    /// An event whose tag was not recognized at ingestion. Kept in the log so
    /// positions stay stable; formats as the raw tag, never animates, and
    /// carries no state change.
    Unknown {
        /// The unresolved tag exactly as it appeared on the wire.
        tag: String,
    },
}

impl CombatEvent {
    /// The short tag of this event (for `Unknown`, the raw wire tag).
    pub fn tag(&self) -> &str {
        match self {
            Self::TurnStart { .. } => "TurnStart",
            Self::SkillUsed { .. } => "SkillUsed",
            Self::DamageDealt { .. } => "DamageDealt",
            Self::Healed { .. } => "Healed",
            Self::BuffApplied { .. } => "BuffApplied",
            Self::BuffExpired { .. } => "BuffExpired",
            Self::ResourceDrained { .. } => "ResourceDrained",
            Self::BattleEnd { .. } => "BattleEnd",
            Self::Unknown { tag } => tag,
        }
    }

    /// The full snapshot embedded in this event, if it is a checkpoint.
    pub fn checkpoint(&self) -> Option<&BattleSnapshot> {
        match self {
            Self::TurnStart { snapshot, .. } => Some(snapshot),
            Self::SkillUsed { snapshot, .. }
            | Self::DamageDealt { snapshot, .. }
            | Self::Healed { snapshot, .. }
            | Self::BuffApplied { snapshot, .. }
            | Self::BuffExpired { snapshot, .. }
            | Self::ResourceDrained { snapshot, .. }
            | Self::BattleEnd { snapshot, .. } => snapshot.as_ref(),
            Self::Unknown { .. } => None,
        }
    }

    /// The partial update carried by this event, if any.
    pub fn delta(&self) -> Option<&SnapshotDelta> {
        match self {
            Self::TurnStart { .. } | Self::Unknown { .. } => None,
            Self::SkillUsed { delta, .. }
            | Self::DamageDealt { delta, .. }
            | Self::Healed { delta, .. }
            | Self::BuffApplied { delta, .. }
            | Self::BuffExpired { delta, .. }
            | Self::ResourceDrained { delta, .. }
            | Self::BattleEnd { delta, .. } => delta.as_ref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
