//! Per-record edit-mode state machine.
//!
//! A record is `Viewing` until an explicit start-edit intent snapshots its
//! editable fields into a buffer, and `Editing` until that buffer is either
//! committed (only ever after a successful remote update, driven by the
//! synchronizer) or cancelled (buffer dropped, no network).
//!
//! Two surfaces exist:
//!
//! - [`EditSlot`]: at most one record in `Editing` at a time. Starting an
//!   edit while another is active silently discards the previous
//!   uncommitted buffer.
//! - [`EditTable`]: independent per-record buffers, any number concurrent,
//!   with keyboard-driven commit/cancel intents ([`EditIntent`]).
//!
//! The displayed record is never mutated while `Editing`; cancel therefore
//! needs no restore step — the last refreshed values are still in place.

use std::collections::HashMap;

use tracing::debug;

use crate::records::RecordKind;

/// Whether a record is currently being edited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditMode {
    /// No edit buffer exists for the record.
    Viewing,
    /// An edit buffer holds provisional field values for the record.
    Editing,
}

/// User intent derived from a keyboard event on an editing row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditIntent {
    /// Save the buffer (round-trips through the remote store first).
    Commit,
    /// Drop the buffer, no network call.
    Cancel,
}

impl EditIntent {
    /// Map a literal key identifier to an intent. Unbound keys are ignored.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" => Some(Self::Commit),
            "Escape" => Some(Self::Cancel),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EditSlot — single-occupancy surface
// ─────────────────────────────────────────────────────────────────────────────

/// Single-occupancy edit state: at most one record in `Editing`.
#[derive(Debug)]
pub struct EditSlot<K: RecordKind> {
    active: Option<(i64, K::Draft)>,
}

impl<K: RecordKind> Default for EditSlot<K> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<K: RecordKind> EditSlot<K> {
    /// Empty slot; everything is `Viewing`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `Editing` for `record`, snapshotting its editable fields.
    ///
    /// Any previously active buffer is discarded. The discarded values were
    /// never persisted, so no record data is lost.
    pub fn begin(&mut self, record: &K::Record) {
        let id = K::record_id(record);
        if let Some((previous, _)) = &self.active {
            if *previous != id {
                debug!(kind = K::NAME, previous, id, "discarding in-progress edit buffer");
            }
        }
        self.active = Some((id, K::draft_of(record)));
    }

    /// Drop the buffer unconditionally. No network call is made.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Clear the slot after a confirmed commit.
    pub fn clear(&mut self) {
        self.active = None;
    }

    /// The id and buffer of the record being edited, if any.
    pub fn active(&self) -> Option<(i64, &K::Draft)> {
        self.active.as_ref().map(|(id, draft)| (*id, draft))
    }

    /// Mutable access to the buffer for typing.
    pub fn draft_mut(&mut self) -> Option<&mut K::Draft> {
        self.active.as_mut().map(|(_, draft)| draft)
    }

    /// Edit mode of a given record id.
    pub fn mode(&self, id: i64) -> EditMode {
        match &self.active {
            Some((active_id, _)) if *active_id == id => EditMode::Editing,
            _ => EditMode::Viewing,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EditTable — independent per-record buffers
// ─────────────────────────────────────────────────────────────────────────────

/// Per-record edit state: each record's buffer is independent.
#[derive(Debug)]
pub struct EditTable<K: RecordKind> {
    buffers: HashMap<i64, K::Draft>,
}

impl<K: RecordKind> Default for EditTable<K> {
    fn default() -> Self {
        Self {
            buffers: HashMap::new(),
        }
    }
}

impl<K: RecordKind> EditTable<K> {
    /// Empty table; everything is `Viewing`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `Editing` for `record`, snapshotting its editable fields.
    /// Other records' buffers are untouched.
    pub fn begin(&mut self, record: &K::Record) {
        let _ = self
            .buffers
            .insert(K::record_id(record), K::draft_of(record));
    }

    /// Drop the buffer for `id` unconditionally. No network call is made.
    pub fn cancel(&mut self, id: i64) {
        let _ = self.buffers.remove(&id);
    }

    /// Clear the buffer for `id` after a confirmed commit.
    pub fn clear(&mut self, id: i64) {
        let _ = self.buffers.remove(&id);
    }

    /// The buffer for `id`, if it is being edited.
    pub fn buffer(&self, id: i64) -> Option<&K::Draft> {
        self.buffers.get(&id)
    }

    /// Mutable access to the buffer for typing.
    pub fn buffer_mut(&mut self, id: i64) -> Option<&mut K::Draft> {
        self.buffers.get_mut(&id)
    }

    /// Edit mode of a given record id.
    pub fn mode(&self, id: i64) -> EditMode {
        if self.buffers.contains_key(&id) {
            EditMode::Editing
        } else {
            EditMode::Viewing
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
