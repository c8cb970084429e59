//! Log-line formatting: one human-readable line per combat event.
//!
//! [`format_event`] is pure -- no lookup tables, no side effects. The
//! snapshot argument provides max-HP context for the `(HP 70/100)` suffix;
//! when the target is missing from it the suffix is simply omitted, never an
//! error.

use skald_model::snapshot::BattleSnapshot;

use crate::event::CombatEvent;

/// Format one event as a log line.
pub fn format_event(event: &CombatEvent, snapshot: &BattleSnapshot) -> String {
    match event {
        CombatEvent::TurnStart { turn, .. } => format!("--- Turn {turn} ---"),

        CombatEvent::SkillUsed { actor, skill, targets, .. } => {
            format!("{actor} uses {skill} on {}", targets.join(", "))
        }

        CombatEvent::DamageDealt { source, target, amount, target_hp, .. } => {
            // unsigned_abs: i32::MIN has no i32 negation.
            let mut line = format!("{source} hits {target} for {} dmg", amount.unsigned_abs());
            if let Some(max_hp) = snapshot.max_hp_of(target) {
                line.push_str(&format!(" (HP {target_hp}/{max_hp})"));
            }
            line
        }

        CombatEvent::Healed { source, target, amount, target_hp, .. } => {
            let mut line = format!("{source} heals {target} for {}", amount.unsigned_abs());
            if let Some(max_hp) = snapshot.max_hp_of(target) {
                line.push_str(&format!(" (HP {target_hp}/{max_hp})"));
            }
            line
        }

        CombatEvent::BuffApplied { source, target, buff_id, .. } => {
            format!("{source} applies {buff_id} to {target}")
        }

        CombatEvent::BuffExpired { target, buff_id, .. } => {
            format!("{buff_id} fades from {target}")
        }

        CombatEvent::ResourceDrained {
            target,
            buff_id,
            amount,
            target_resource_value,
            ..
        } => {
            let mut line = match amount.signum() {
                -1 => format!("{target} takes {} from {buff_id}", amount.unsigned_abs()),
                1 => format!("{target} gains {amount} from {buff_id}"),
                _ => format!("{target} affected by {buff_id}"),
            };
            if let Some(max_hp) = snapshot.max_hp_of(target) {
                line.push_str(&format!(" (HP {target_resource_value}/{max_hp})"));
            }
            line
        }

        CombatEvent::BattleEnd { winner, .. } => format!("=== {winner} wins! ==="),

        // Unrecognized tags surface verbatim.
        CombatEvent::Unknown { tag } => tag.clone(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use skald_model::actor::{ActorClass, ActorState};

    fn snapshot() -> BattleSnapshot {
        BattleSnapshot::new(vec![
            ActorState::new("Alice", ActorClass::Fighter, 0, 100, 100),
            ActorState::new("Bob", ActorClass::Mage, 1, 70, 100),
        ])
    }

    #[test]
    fn turn_start_line() {
        let event = CombatEvent::TurnStart { turn: 4, snapshot: snapshot() };
        assert_eq!(format_event(&event, &snapshot()), "--- Turn 4 ---");
    }

    #[test]
    fn skill_used_joins_targets() {
        let event = CombatEvent::SkillUsed {
            actor: "Alice".to_owned(),
            skill: "Whirlwind".to_owned(),
            targets: vec!["Bob".to_owned(), "Carol".to_owned()],
            snapshot: None,
            delta: None,
        };
        assert_eq!(
            format_event(&event, &snapshot()),
            "Alice uses Whirlwind on Bob, Carol"
        );
    }

    #[test]
    fn damage_line_includes_hp_context() {
        let event = CombatEvent::DamageDealt {
            source: "Alice".to_owned(),
            target: "Bob".to_owned(),
            amount: 30,
            target_hp: 70,
            snapshot: None,
            delta: None,
        };
        assert_eq!(
            format_event(&event, &snapshot()),
            "Alice hits Bob for 30 dmg (HP 70/100)"
        );
    }

    #[test]
    fn damage_amount_is_shown_unsigned() {
        let event = CombatEvent::DamageDealt {
            source: "Alice".to_owned(),
            target: "Bob".to_owned(),
            amount: -30,
            target_hp: 70,
            snapshot: None,
            delta: None,
        };
        assert!(format_event(&event, &snapshot()).contains("for 30 dmg"));
    }

    #[test]
    fn extreme_amounts_format_without_overflow() {
        let damage = CombatEvent::DamageDealt {
            source: "Alice".to_owned(),
            target: "Bob".to_owned(),
            amount: i32::MIN,
            target_hp: 0,
            snapshot: None,
            delta: None,
        };
        assert_eq!(
            format_event(&damage, &snapshot()),
            "Alice hits Bob for 2147483648 dmg (HP 0/100)"
        );

        let drain = CombatEvent::ResourceDrained {
            target: "Bob".to_owned(),
            buff_id: "Void".to_owned(),
            resource: Some("hp".to_owned()),
            amount: i32::MIN,
            target_resource_value: 0,
            snapshot: None,
            delta: None,
        };
        assert_eq!(
            format_event(&drain, &snapshot()),
            "Bob takes 2147483648 from Void (HP 0/100)"
        );
    }

    #[test]
    fn hp_suffix_omitted_for_unknown_target() {
        let event = CombatEvent::DamageDealt {
            source: "Alice".to_owned(),
            target: "Nobody".to_owned(),
            amount: 30,
            target_hp: 70,
            snapshot: None,
            delta: None,
        };
        assert_eq!(format_event(&event, &snapshot()), "Alice hits Nobody for 30 dmg");
    }

    #[test]
    fn drain_lines_are_signed() {
        let drain = CombatEvent::ResourceDrained {
            target: "Bob".to_owned(),
            buff_id: "Poison".to_owned(),
            resource: Some("hp".to_owned()),
            amount: -5,
            target_resource_value: 65,
            snapshot: None,
            delta: None,
        };
        assert_eq!(
            format_event(&drain, &snapshot()),
            "Bob takes 5 from Poison (HP 65/100)"
        );

        let gain = CombatEvent::ResourceDrained {
            target: "Bob".to_owned(),
            buff_id: "Regen".to_owned(),
            resource: Some("hp".to_owned()),
            amount: 8,
            target_resource_value: 78,
            snapshot: None,
            delta: None,
        };
        assert_eq!(
            format_event(&gain, &snapshot()),
            "Bob gains 8 from Regen (HP 78/100)"
        );

        let neutral = CombatEvent::ResourceDrained {
            target: "Bob".to_owned(),
            buff_id: "Curse".to_owned(),
            resource: None,
            amount: 0,
            target_resource_value: 70,
            snapshot: None,
            delta: None,
        };
        assert_eq!(
            format_event(&neutral, &snapshot()),
            "Bob affected by Curse (HP 70/100)"
        );
    }

    #[test]
    fn buff_and_battle_end_lines() {
        let applied = CombatEvent::BuffApplied {
            source: "Mira".to_owned(),
            target: "Bob".to_owned(),
            buff_id: "Regen".to_owned(),
            snapshot: None,
            delta: None,
        };
        assert_eq!(format_event(&applied, &snapshot()), "Mira applies Regen to Bob");

        let expired = CombatEvent::BuffExpired {
            target: "Bob".to_owned(),
            buff_id: "Regen".to_owned(),
            snapshot: None,
            delta: None,
        };
        assert_eq!(format_event(&expired, &snapshot()), "Regen fades from Bob");

        let end = CombatEvent::BattleEnd {
            winner: "Team 1".to_owned(),
            snapshot: None,
            delta: None,
        };
        assert_eq!(format_event(&end, &snapshot()), "=== Team 1 wins! ===");
    }

    #[test]
    fn unknown_event_formats_as_raw_tag() {
        let event = CombatEvent::Unknown {
            tag: "playground.engine_v2.CombatEvent.ShieldBroken".to_owned(),
        };
        assert_eq!(
            format_event(&event, &snapshot()),
            "playground.engine_v2.CombatEvent.ShieldBroken"
        );
    }
}
