//! The side-effect dispatcher contract between playback and presentation.
//!
//! The controller never draws anything itself; it informs an external
//! collaborator about each transition through the [`SideEffects`] trait:
//!
//! - [`log_event`](SideEffects::log_event) -- append one formatted log line;
//! - [`animate`](SideEffects::animate) -- fire a one-shot visual trigger
//!   (forward steps only, exactly once per genuine step);
//! - [`render`](SideEffects::render) -- idempotent full display refresh;
//! - [`clear_log`](SideEffects::clear_log) -- reset the log view before a
//!   backward/seek rebuild re-emits the lines up to the current index.
//!
//! Animations are not idempotent -- replaying one duplicates floating damage
//! numbers and flicker outlines -- which is why backward navigation, resets,
//! and seek replays only ever see `log_event`/`render`/`clear_log`.
//!
//! Consumers receive snapshot references for the duration of the call and
//! must copy what they keep; they never get to alias controller state.

use skald_log::event::CombatEvent;
use skald_log::format::format_event;
use skald_model::snapshot::BattleSnapshot;

// ---------------------------------------------------------------------------
// AnimationTrigger
// ---------------------------------------------------------------------------

/// A one-shot visual trigger derived from an event variant.
///
/// Variants map one-to-one onto the animation set of the reference frontend:
/// skill projectile flight, hit flicker with a floating damage number, heal
/// glow, buff sparkle, and the periodic drain pulse. `TurnStart`,
/// `BuffExpired`, `BattleEnd`, and unknown events have no trigger.
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationTrigger {
    /// Skill icon flies from the actor to each target.
    SkillFlight {
        actor: String,
        skill: String,
        targets: Vec<String>,
    },
    /// Target flickers and shows a floating damage number (magnitude).
    HitFlicker { target: String, amount: u32 },
    /// Target glows and shows a floating heal number (magnitude).
    HealGlow { target: String, amount: u32 },
    /// Buff sparkle on the target.
    BuffSparkle {
        source: String,
        target: String,
        buff_id: String,
    },
    /// Periodic effect pulse; the sign of `amount` selects damage or heal
    /// styling downstream.
    DrainPulse {
        target: String,
        buff_id: String,
        amount: i32,
    },
}

impl AnimationTrigger {
    /// The trigger for `event`, or `None` for variants with no animation.
    pub fn for_event(event: &CombatEvent) -> Option<Self> {
        match event {
            CombatEvent::SkillUsed { actor, skill, targets, .. } => Some(Self::SkillFlight {
                actor: actor.clone(),
                skill: skill.clone(),
                targets: targets.clone(),
            }),
            CombatEvent::DamageDealt { target, amount, .. } => Some(Self::HitFlicker {
                target: target.clone(),
                // unsigned_abs: i32::MIN has no i32 negation.
                amount: amount.unsigned_abs(),
            }),
            CombatEvent::Healed { target, amount, .. } => Some(Self::HealGlow {
                target: target.clone(),
                amount: amount.unsigned_abs(),
            }),
            CombatEvent::BuffApplied { source, target, buff_id, .. } => Some(Self::BuffSparkle {
                source: source.clone(),
                target: target.clone(),
                buff_id: buff_id.clone(),
            }),
            CombatEvent::ResourceDrained { target, buff_id, amount, .. } => {
                Some(Self::DrainPulse {
                    target: target.clone(),
                    buff_id: buff_id.clone(),
                    amount: *amount,
                })
            }
            CombatEvent::TurnStart { .. }
            | CombatEvent::BuffExpired { .. }
            | CombatEvent::BattleEnd { .. }
            | CombatEvent::Unknown { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// SideEffects
// ---------------------------------------------------------------------------

/// The outbound contract from the playback controller to presentation.
pub trait SideEffects {
    /// Append one log line for `event`. `snapshot` is the state after the
    /// event applied; implementations typically delegate to
    /// [`format_event`].
    fn log_event(&mut self, event: &CombatEvent, snapshot: &BattleSnapshot);

    /// Fire a one-shot animation. Called at most once per genuine forward
    /// step, never for backward navigation or seek replays.
    fn animate(&mut self, trigger: &AnimationTrigger);

    /// Refresh every actor display from `snapshot`. Idempotent.
    fn render(&mut self, snapshot: &BattleSnapshot);

    /// Reset the log view. Precedes the re-emitted lines of a backward step,
    /// reset, or seek rebuild.
    fn clear_log(&mut self);
}

// ---------------------------------------------------------------------------
// NullEffects
// ---------------------------------------------------------------------------

/// A dispatcher that does nothing. Useful for headless seeking and benches.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEffects;

impl SideEffects for NullEffects {
    fn log_event(&mut self, _event: &CombatEvent, _snapshot: &BattleSnapshot) {}
    fn animate(&mut self, _trigger: &AnimationTrigger) {}
    fn render(&mut self, _snapshot: &BattleSnapshot) {}
    fn clear_log(&mut self) {}
}

// ---------------------------------------------------------------------------
// TextEffects
// ---------------------------------------------------------------------------

/// A headless text presentation: collects formatted log lines and counts
/// animation and render calls. The example binary prints from it, and the
/// exactly-once tests assert on it.
#[derive(Debug, Clone, Default)]
pub struct TextEffects {
    /// The current log view, oldest line first.
    pub lines: Vec<String>,
    /// Every animation trigger fired, in order.
    pub animations: Vec<AnimationTrigger>,
    /// Number of full display refreshes.
    pub renders: usize,
}

impl TextEffects {
    /// Create an empty text presentation.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent log line, if any.
    pub fn last_line(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }
}

impl SideEffects for TextEffects {
    fn log_event(&mut self, event: &CombatEvent, snapshot: &BattleSnapshot) {
        self.lines.push(format_event(event, snapshot));
    }

    fn animate(&mut self, trigger: &AnimationTrigger) {
        self.animations.push(trigger.clone());
    }

    fn render(&mut self, _snapshot: &BattleSnapshot) {
        self.renders += 1;
    }

    fn clear_log(&mut self) {
        self.lines.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
