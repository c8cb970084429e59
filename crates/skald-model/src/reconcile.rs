//! The pure snapshot reconciler.
//!
//! Two functions derive the next battle state during a forward step:
//!
//! - [`apply_checkpoint`] replaces the state with an independent copy of a
//!   full snapshot embedded in the log.
//! - [`apply_delta`] merges a partial update onto a prior snapshot.
//!
//! Both are pure: inputs are never mutated, and the returned snapshot shares
//! no storage with them. A delta naming an unknown actor is a recoverable
//! lookup failure -- the entry is skipped, reported via `tracing::warn!`, and
//! reconciliation continues for the remaining actors, so one malformed event
//! can never halt playback.

use tracing::warn;

use crate::delta::SnapshotDelta;
use crate::snapshot::BattleSnapshot;
use crate::ModelError;

/// Return an independent copy of a checkpoint's embedded snapshot.
///
/// The embedded original must stay intact -- the event log is reused on every
/// rebuild -- so the caller always receives a fresh copy, never a reference
/// into the log.
pub fn apply_checkpoint(embedded: &BattleSnapshot) -> BattleSnapshot {
    embedded.clone()
}

/// Produce a new snapshot equal to `base` except for the actors named in
/// `delta`, whose fields are overridden patch-wise.
///
/// Returns the new snapshot together with an [`ModelError::ActorNotFound`]
/// for each name the delta mentioned but `base` does not contain. Skipped
/// entries have already been reported via `tracing::warn!`; callers only
/// need the list when they surface the condition further (tests,
/// diagnostics).
pub fn apply_delta(
    base: &BattleSnapshot,
    delta: &SnapshotDelta,
) -> (BattleSnapshot, Vec<ModelError>) {
    let mut next = base.clone();
    let mut skipped = Vec::new();

    for (name, patch) in &delta.changes {
        match next.actor_mut(name) {
            Some(actor) => patch.apply_to(actor),
            None => {
                warn!(actor = %name, "delta names an actor absent from the snapshot; skipping");
                skipped.push(ModelError::ActorNotFound { name: name.clone() });
            }
        }
    }

    (next, skipped)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
