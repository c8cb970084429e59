//! The immutable event store for one battle session.
//!
//! The store is populated once at session start -- either from typed events
//! or from the JSON array the recording engine writes -- and never mutated or
//! reordered afterwards. Playback addresses events by index; the store also
//! answers the two resynchronization queries the controller needs: the
//! session's initial snapshot and the nearest checkpoint at or before an
//! index.
//!
//! # Ingestion
//!
//! Recorded logs tag events with namespaced strings such as
//! `playground.engine_v1.CombatEvent.TurnStart`. Ingestion resolves each tag
//! to the explicit [`CombatEvent`] schema exactly once: the namespace is
//! stripped, legacy amount field names are normalized by the schema's serde
//! aliases, and unrecognized tags become [`CombatEvent::Unknown`] entries
//! (reported via `tracing::warn!`) so log positions stay stable.

use anyhow::{anyhow, Context};
use skald_model::snapshot::BattleSnapshot;
use tracing::warn;

use crate::event::CombatEvent;

/// Tags the explicit schema recognizes, in wire form.
const KNOWN_TAGS: [&str; 8] = [
    "TurnStart",
    "SkillUsed",
    "DamageDealt",
    "Healed",
    "BuffApplied",
    "BuffExpired",
    "ResourceDrained",
    "BattleEnd",
];

// ---------------------------------------------------------------------------
// EventStore
// ---------------------------------------------------------------------------

/// The immutable, totally ordered sequence of events for one session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventStore {
    events: Vec<CombatEvent>,
}

impl EventStore {
    /// Build a store from already-typed events.
    pub fn from_events(events: Vec<CombatEvent>) -> Self {
        Self { events }
    }

    /// Ingest a JSON array of recorded events.
    ///
    /// Tag resolution and field normalization happen here, once. Entries with
    /// a recognized tag that fail to match the schema are hard errors (the
    /// log is corrupt); entries with an unrecognized tag are kept as
    /// [`CombatEvent::Unknown`].
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending index if the value is not an
    /// array, an entry has no string `type` field, or a recognized entry does
    /// not match the schema.
    pub fn from_json_value(value: serde_json::Value) -> anyhow::Result<Self> {
        let entries = match value {
            serde_json::Value::Array(entries) => entries,
            other => return Err(anyhow!("event log must be a JSON array, got {other}")),
        };

        let mut events = Vec::with_capacity(entries.len());
        for (index, mut entry) in entries.into_iter().enumerate() {
            let raw_tag = entry
                .get("type")
                .and_then(serde_json::Value::as_str)
                .ok_or_else(|| anyhow!("event {index} has no string 'type' field"))?
                .to_owned();

            // Namespaced tags keep only their last segment.
            let short_tag = raw_tag.rsplit('.').next().unwrap_or(&raw_tag).to_owned();

            if !KNOWN_TAGS.contains(&short_tag.as_str()) {
                warn!(index, tag = %raw_tag, "unrecognized event tag; keeping as Unknown");
                events.push(CombatEvent::Unknown { tag: raw_tag });
                continue;
            }

            entry["type"] = serde_json::Value::String(short_tag.clone());
            let event: CombatEvent = serde_json::from_value(entry)
                .with_context(|| format!("event {index} ({short_tag}) does not match the schema"))?;
            events.push(event);
        }

        Ok(Self { events })
    }

    /// Ingest a JSON string (see [`from_json_value`](Self::from_json_value)).
    pub fn from_json_str(text: &str) -> anyhow::Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(text).context("event log is not valid JSON")?;
        Self::from_json_value(value)
    }

    /// The event at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&CombatEvent> {
        self.events.get(index)
    }

    /// Number of events in the session.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the session holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterate over the events in log order.
    pub fn iter(&self) -> impl Iterator<Item = &CombatEvent> {
        self.events.iter()
    }

    /// The session's initial snapshot: an independent copy of the first
    /// checkpoint's embedded snapshot. `None` if no event is a checkpoint,
    /// in which case playback cannot start.
    pub fn initial_snapshot(&self) -> Option<BattleSnapshot> {
        self.events.iter().find_map(CombatEvent::checkpoint).cloned()
    }

    /// The nearest checkpoint at or before `index`: its position and an
    /// independent copy of its snapshot. Playback resynchronizes from here
    /// instead of replaying every delta from the start.
    pub fn checkpoint_at_or_before(&self, index: usize) -> Option<(usize, BattleSnapshot)> {
        self.events
            .iter()
            .enumerate()
            .take(index.saturating_add(1))
            .rev()
            .find_map(|(k, event)| event.checkpoint().map(|snap| (k, snap.clone())))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
