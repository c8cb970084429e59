//! The snapshot history stack for backward navigation.
//!
//! Each forward step pushes a copy of the pre-step snapshot; each backward
//! step pops one. Depth therefore mirrors the number of forward steps since
//! the last reset, so memory is bounded by the event count.
//!
//! The stack only ever transfers owned snapshots -- push takes a value, pop
//! returns one -- so no entry can alias the controller's current snapshot or
//! another entry.

use skald_model::snapshot::BattleSnapshot;

/// Stack of previously current snapshots, newest on top.
#[derive(Debug, Clone, Default)]
pub struct HistoryStack {
    entries: Vec<BattleSnapshot>,
}

impl HistoryStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Push a snapshot. The caller hands over ownership; clone at the call
    /// site when the snapshot must also stay current.
    pub fn push(&mut self, snapshot: BattleSnapshot) {
        self.entries.push(snapshot);
    }

    /// Pop the most recent snapshot, if any.
    pub fn pop(&mut self) -> Option<BattleSnapshot> {
        self.entries.pop()
    }

    /// Drop every entry. Called on reset.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// How many snapshots are stored.
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Whether the stack holds no snapshots.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
