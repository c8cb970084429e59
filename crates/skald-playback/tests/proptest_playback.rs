//! Property tests for playback navigation.
//!
//! These tests generate random combat logs (checkpoints interleaved with
//! delta events) and random navigation sequences, then verify the structural
//! invariants: reversibility, history-stack depth, and agreement between
//! stepped state and checkpoint-based reconstruction.

use proptest::prelude::*;
use skald_log::prelude::*;
use skald_model::prelude::*;
use skald_playback::prelude::*;

// ---------------------------------------------------------------------------
// Log generation
// ---------------------------------------------------------------------------

const NAMES: [&str; 3] = ["Ash", "Brynn", "Cole"];

/// One generated log entry, before materialization.
#[derive(Debug, Clone)]
enum LogStep {
    /// A TurnStart checkpoint capturing the full tracked state.
    Checkpoint,
    /// A DamageDealt delta against one actor.
    Damage { actor: usize, amount: i32 },
    /// A Healed delta for one actor.
    Heal { actor: usize, amount: i32 },
    /// An event with no state payload.
    Expire { actor: usize },
}

fn log_step_strategy() -> impl Strategy<Value = LogStep> {
    prop_oneof![
        1 => Just(LogStep::Checkpoint),
        4 => (0..NAMES.len(), 1..30i32).prop_map(|(actor, amount)| LogStep::Damage { actor, amount }),
        2 => (0..NAMES.len(), 1..20i32).prop_map(|(actor, amount)| LogStep::Heal { actor, amount }),
        1 => (0..NAMES.len()).prop_map(|actor| LogStep::Expire { actor }),
    ]
}

fn full_snapshot(hp: &[i32; 3]) -> BattleSnapshot {
    BattleSnapshot::new(
        NAMES
            .iter()
            .zip(hp)
            .enumerate()
            .map(|(i, (name, hp))| {
                ActorState::new(*name, ActorClass::Fighter, (i % 2) as u8, *hp, 100)
            })
            .collect(),
    )
}

/// Materialize a step list into events plus the reference hp trace: entry
/// `k` of the trace is the expected hp vector after applying event `k`.
fn materialize(steps: Vec<LogStep>) -> (Vec<CombatEvent>, Vec<[i32; 3]>) {
    let mut hp = [100, 100, 100];
    let mut events = Vec::with_capacity(steps.len() + 1);
    let mut trace = Vec::with_capacity(steps.len() + 1);

    // The log always opens with a checkpoint.
    events.push(CombatEvent::TurnStart { turn: 1, snapshot: full_snapshot(&hp) });
    trace.push(hp);

    for step in steps {
        let event = match step {
            LogStep::Checkpoint => {
                CombatEvent::TurnStart { turn: (trace.len() + 1) as u32, snapshot: full_snapshot(&hp) }
            }
            LogStep::Damage { actor, amount } => {
                hp[actor] = (hp[actor] - amount).max(0);
                CombatEvent::DamageDealt {
                    source: "Ash".to_owned(),
                    target: NAMES[actor].to_owned(),
                    amount,
                    target_hp: hp[actor],
                    snapshot: None,
                    delta: Some(SnapshotDelta::hp_change(NAMES[actor], hp[actor])),
                }
            }
            LogStep::Heal { actor, amount } => {
                hp[actor] = (hp[actor] + amount).min(100);
                CombatEvent::Healed {
                    source: NAMES[actor].to_owned(),
                    target: NAMES[actor].to_owned(),
                    amount,
                    target_hp: hp[actor],
                    snapshot: None,
                    delta: Some(SnapshotDelta::hp_change(NAMES[actor], hp[actor])),
                }
            }
            LogStep::Expire { actor } => CombatEvent::BuffExpired {
                target: NAMES[actor].to_owned(),
                buff_id: "shroud".to_owned(),
                snapshot: None,
                delta: None,
            },
        };
        events.push(event);
        trace.push(hp);
    }

    (events, trace)
}

fn controller(events: Vec<CombatEvent>) -> PlaybackController<NullEffects> {
    PlaybackController::new(EventStore::from_events(events), PlaybackConfig::default(), NullEffects)
        .unwrap()
}

// ---------------------------------------------------------------------------
// Navigation operations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum NavOp {
    StepForward,
    StepBack,
    Seek(usize),
    SeekStart,
    Reset,
}

fn nav_op_strategy() -> impl Strategy<Value = NavOp> {
    prop_oneof![
        5 => Just(NavOp::StepForward),
        3 => Just(NavOp::StepBack),
        2 => (0..64usize).prop_map(NavOp::Seek),
        1 => Just(NavOp::SeekStart),
        1 => Just(NavOp::Reset),
    ]
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Any number of forward steps followed by the same number of backward
    /// steps restores the exact snapshot at every intermediate position.
    #[test]
    fn forward_then_backward_is_lossless(steps in prop::collection::vec(log_step_strategy(), 0..40)) {
        let (events, trace) = materialize(steps);
        let mut ctl = controller(events);

        let mut hashes = vec![ctl.current_snapshot().state_hash()];
        for (k, expected_hp) in trace.iter().enumerate() {
            ctl.step_forward();
            prop_assert_eq!(ctl.position(), Some(k));
            let view = ctl.current_snapshot();
            for (name, hp) in NAMES.iter().zip(expected_hp) {
                prop_assert_eq!(view.actor(name).map(|a| a.hp), Some(*hp));
            }
            hashes.push(view.state_hash());
        }

        for expected in hashes.iter().rev().skip(1) {
            ctl.step_back();
            prop_assert_eq!(&ctl.current_snapshot().state_hash(), expected);
        }
        prop_assert_eq!(ctl.position(), None);
        prop_assert_eq!(ctl.history_depth(), 0);
    }

    /// Under arbitrary navigation, the history stack depth always mirrors the
    /// position, and the current snapshot always equals checkpoint-based
    /// reconstruction at that position.
    #[test]
    fn navigation_preserves_structural_invariants(
        steps in prop::collection::vec(log_step_strategy(), 0..25),
        ops in prop::collection::vec(nav_op_strategy(), 1..40),
    ) {
        let (events, _trace) = materialize(steps);
        let event_count = events.len();
        let mut ctl = controller(events);

        for op in ops {
            match op {
                NavOp::StepForward => ctl.step_forward(),
                NavOp::StepBack => ctl.step_back(),
                NavOp::Seek(target) => ctl.seek(Some(target)),
                NavOp::SeekStart => ctl.seek(None),
                NavOp::Reset => ctl.reset(),
            }

            match ctl.position() {
                Some(i) => {
                    prop_assert!(i < event_count);
                    prop_assert_eq!(ctl.history_depth(), i + 1);
                }
                None => prop_assert_eq!(ctl.history_depth(), 0),
            }
            prop_assert_eq!(
                ctl.current_snapshot().state_hash(),
                ctl.reconstruct_at(ctl.position()).state_hash()
            );
        }
    }

    /// Mutating a snapshot handed out by the controller never leaks back
    /// into playback state.
    #[test]
    fn handed_out_snapshots_are_isolated(
        steps in prop::collection::vec(log_step_strategy(), 1..20),
        advance in 1..10usize,
    ) {
        let (events, _trace) = materialize(steps);
        let mut ctl = controller(events);
        ctl.seek(Some(advance));

        let before = ctl.current_snapshot().state_hash();
        let mut leaked = ctl.current_snapshot();
        for name in NAMES {
            if let Some(actor) = leaked.actor_mut(name) {
                actor.hp = -999;
            }
        }
        prop_assert_eq!(ctl.current_snapshot().state_hash(), before.clone());

        ctl.step_back();
        ctl.step_forward();
        prop_assert_eq!(ctl.current_snapshot().state_hash(), before);
    }

    /// Two independent full runs over the same log produce identical line
    /// sequences; playback is deterministic.
    #[test]
    fn full_replay_is_deterministic(steps in prop::collection::vec(log_step_strategy(), 0..30)) {
        let (events, _trace) = materialize(steps);
        let store = EventStore::from_events(events);

        let mut runs = Vec::new();
        for _ in 0..2 {
            let mut ctl = PlaybackController::new(
                store.clone(),
                PlaybackConfig::default(),
                TextEffects::new(),
            ).unwrap();
            while ctl.state() != PlaybackState::Ended {
                ctl.step_forward();
            }
            runs.push(ctl.effects().lines.clone());
        }
        prop_assert_eq!(&runs[0], &runs[1]);
    }
}
