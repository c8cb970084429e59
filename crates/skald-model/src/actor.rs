//! Actor state: the per-combatant record inside a [`BattleSnapshot`].
//!
//! An actor is keyed by its unique `name`. Stats, cooldowns, and buff
//! collections use `BTreeMap`/sorted-friendly containers so serialization is
//! deterministic and snapshot hashes are stable across runs.
//!
//! [`BattleSnapshot`]: crate::snapshot::BattleSnapshot

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ActorClass
// ---------------------------------------------------------------------------

/// The combat class of an actor. Classes are presentation hints (portrait,
/// color) for downstream consumers; the playback core never branches on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorClass {
    Fighter,
    Mage,
    Cleric,
    Rogue,
    Hunter,
    Paladin,
    AbyssalDragon,
    Bard,
    Fishman,
}

// ---------------------------------------------------------------------------
// StatBuff / ResourceTick
// ---------------------------------------------------------------------------

/// A temporary stat modifier attached to an actor (e.g. an attack buff).
///
/// `stat_changes` maps stat names to additive adjustments. `duration` counts
/// remaining turns as recorded in the log; playback never decrements it --
/// the log's snapshots and deltas are the sole source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatBuff {
    /// Identifier of the buff (e.g. `"Battle Shout"`).
    pub id: String,
    /// Remaining duration in turns at the time of the snapshot.
    pub duration: u32,
    /// Stat name -> additive change.
    #[serde(default, rename = "statChanges")]
    pub stat_changes: BTreeMap<String, i32>,
}

/// A periodic resource effect attached to an actor (e.g. poison, regen).
///
/// `resource_changes` maps resource names (currently `"hp"`) to the signed
/// per-turn change.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceTick {
    /// Identifier of the effect (e.g. `"Poison"`, `"Regen"`).
    pub id: String,
    /// Remaining duration in turns at the time of the snapshot.
    pub duration: u32,
    /// Resource name -> signed per-turn change.
    #[serde(default, rename = "resourceChanges")]
    pub resource_changes: BTreeMap<String, i32>,
}

// ---------------------------------------------------------------------------
// ActorState
// ---------------------------------------------------------------------------

/// Complete point-in-time state of a single combatant.
///
/// The `name` is the unique key by which events and deltas reference the
/// actor. Two `ActorState` values compare equal iff every field matches,
/// which the reversibility tests lean on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorState {
    /// Unique actor name; the key used by events and deltas.
    pub name: String,
    /// Combat class (presentation hint).
    #[serde(rename = "actorClass")]
    pub class: ActorClass,
    /// Team index (0-based).
    pub team: u8,
    /// Current hit points. May be zero (downed actors stay in the snapshot).
    pub hp: i32,
    /// Maximum hit points.
    #[serde(rename = "maxHp")]
    pub max_hp: i32,
    /// Base stats (e.g. `"attack"`, `"defense"`), name -> value.
    #[serde(default)]
    pub stats: BTreeMap<String, i32>,
    /// Active stat modifiers.
    #[serde(default, rename = "statBuffs")]
    pub stat_buffs: Vec<StatBuff>,
    /// Active periodic resource effects.
    #[serde(default, rename = "resourceTicks")]
    pub resource_ticks: Vec<ResourceTick>,
    /// Skill name -> remaining cooldown in turns.
    #[serde(default)]
    pub cooldowns: BTreeMap<String, u32>,
}

impl ActorState {
    /// Create an actor with the given identity and hit points, and no stats,
    /// buffs, ticks, or cooldowns.
    pub fn new(name: impl Into<String>, class: ActorClass, team: u8, hp: i32, max_hp: i32) -> Self {
        Self {
            name: name.into(),
            class,
            team,
            hp,
            max_hp,
            stats: BTreeMap::new(),
            stat_buffs: Vec::new(),
            resource_ticks: Vec::new(),
            cooldowns: BTreeMap::new(),
        }
    }

    /// Whether the actor is still standing.
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_actor_has_empty_collections() {
        let actor = ActorState::new("Alice", ActorClass::Fighter, 0, 100, 100);
        assert_eq!(actor.name, "Alice");
        assert!(actor.stats.is_empty());
        assert!(actor.stat_buffs.is_empty());
        assert!(actor.resource_ticks.is_empty());
        assert!(actor.cooldowns.is_empty());
        assert!(actor.is_alive());
    }

    #[test]
    fn zero_hp_actor_is_not_alive() {
        let actor = ActorState::new("Ghost", ActorClass::Rogue, 1, 0, 50);
        assert!(!actor.is_alive());
    }

    #[test]
    fn actor_round_trips_through_json_with_original_field_names() {
        let mut actor = ActorState::new("Mira", ActorClass::Cleric, 1, 60, 80);
        actor.stats.insert("attack".to_owned(), 12);
        actor.stat_buffs.push(StatBuff {
            id: "Battle Shout".to_owned(),
            duration: 2,
            stat_changes: BTreeMap::from([("attack".to_owned(), 5)]),
        });
        actor.cooldowns.insert("Flash Heal".to_owned(), 1);

        let json = serde_json::to_value(&actor).unwrap();
        // The wire format keeps the log's camelCase field names.
        assert!(json.get("maxHp").is_some());
        assert!(json.get("actorClass").is_some());
        assert!(json["statBuffs"][0].get("statChanges").is_some());

        let back: ActorState = serde_json::from_value(json).unwrap();
        assert_eq!(back, actor);
    }

    #[test]
    fn missing_optional_collections_default_to_empty() {
        let json = serde_json::json!({
            "name": "Barebones",
            "actorClass": "Fishman",
            "team": 0,
            "hp": 10,
            "maxHp": 10
        });
        let actor: ActorState = serde_json::from_value(json).unwrap();
        assert!(actor.stats.is_empty());
        assert!(actor.cooldowns.is_empty());
    }
}
