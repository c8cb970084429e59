//! Headless replay of a recorded combat log.
//!
//! Ingests a small wire-format log, plays it to the end at 8x speed with the
//! text dispatcher, then walks two steps back to show the rebuilt view.
//!
//! Run with: `cargo run --example headless_replay`
//! Set `RUST_LOG=debug` to see the controller's transition log.

use skald_log::prelude::*;
use skald_playback::prelude::*;

const LOG: &str = r#"[
  {"type": "playground.engine_v1.CombatEvent.TurnStart", "turn": 1,
   "snapshot": {"actors": [
     {"name": "Sigrun", "actorClass": "Paladin", "team": 0, "hp": 120, "maxHp": 120},
     {"name": "Wyrm", "actorClass": "AbyssalDragon", "team": 1, "hp": 200, "maxHp": 200}]}},
  {"type": "playground.engine_v1.CombatEvent.SkillUsed",
   "actor": "Sigrun", "skill": "Radiant Smite", "targets": ["Wyrm"]},
  {"type": "playground.engine_v1.CombatEvent.DamageDealt",
   "source": "Sigrun", "target": "Wyrm", "amount": 45, "targetHp": 155,
   "delta": {"Wyrm": {"hp": 155}}},
  {"type": "playground.engine_v1.CombatEvent.DamageDealt",
   "source": "Wyrm", "target": "Sigrun", "amount": 60, "targetHp": 60,
   "delta": {"Sigrun": {"hp": 60}}},
  {"type": "playground.engine_v1.CombatEvent.Healed",
   "source": "Sigrun", "target": "Sigrun", "amount": 30, "targetHp": 90,
   "delta": {"Sigrun": {"hp": 90}}},
  {"type": "playground.engine_v1.CombatEvent.BattleEnd", "winner": "Sigrun"}
]"#;

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let store = EventStore::from_json_str(LOG)?;
    let mut controller =
        PlaybackController::new(store, PlaybackConfig::default(), TextEffects::new())?;

    controller.set_speed(8.0)?;
    controller.play();
    controller.run_to_end();

    println!("== full playback ==");
    for line in &controller.effects().lines {
        println!("{line}");
    }
    println!(
        "animations fired: {}",
        controller.effects().animations.len()
    );

    controller.step_back();
    controller.step_back();
    println!("\n== after two steps back (position {:?}) ==", controller.position());
    for line in &controller.effects().lines {
        println!("{line}");
    }
    let view = controller.current_snapshot();
    for actor in &view.actors {
        println!("{}: {}/{} hp", actor.name, actor.hp, actor.max_hp);
    }

    Ok(())
}
