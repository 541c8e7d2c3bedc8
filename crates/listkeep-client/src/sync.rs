//! List synchronizer: local collection reconciled against server truth.
//!
//! [`ListSync`] owns the in-memory collection for one record kind. After
//! every successful mutation it unconditionally re-fetches the full list,
//! so the client never diverges from server-assigned fields (ids,
//! timestamps, server-side normalization) at the cost of one extra round
//! trip and a latency window showing pre-mutation state.
//!
//! Failure policy, uniform across operations:
//! - a failed refresh leaves the collection untouched (never silently
//!   empty a populated list)
//! - a failed create leaves the caller's draft untouched for retry
//! - a rejected update leaves the edit buffer active; an accepted update
//!   ends edit mode even when the follow-up refresh fails
//! - a failed remove leaves the record visible
//!
//! All operations run on one logical task; calls serialize through
//! `&mut self`, so the last-completed list fetch is authoritative by
//! construction. In-flight requests are not cancellable; views observe
//! state through a `watch` channel, and a torn-down view (dropped
//! receiver) makes notification a no-op.

use tokio::sync::watch;
use tracing::{debug, warn};

use listkeep_core::edit::{EditIntent, EditMode, EditSlot, EditTable};
use listkeep_core::errors::{Result, StoreError};
use listkeep_core::records::{RecordKind, TaskKind, TodoKind};

use crate::remote::RemoteStore;

/// Task surface: single-occupancy edit slot.
pub type TaskSync<S> = SingleEditSync<TaskKind, S>;
/// Todo surface: independent per-item edit buffers, keyboard-driven.
pub type TodoSync<S> = MultiEditSync<TodoKind, S>;

// ─────────────────────────────────────────────────────────────────────────────
// ListSync — collection ownership and refresh-after-write
// ─────────────────────────────────────────────────────────────────────────────

/// Owns the local collection for one record kind and keeps it consistent
/// with the remote store via fetch-after-write reconciliation.
pub struct ListSync<K: RecordKind, S: RemoteStore<K>> {
    store: S,
    records: Vec<K::Record>,
    snapshots: watch::Sender<Vec<K::Record>>,
}

impl<K: RecordKind, S: RemoteStore<K>> ListSync<K, S> {
    /// Synchronizer starting from an empty collection. Call
    /// [`ListSync::refresh`] to populate it.
    pub fn new(store: S) -> Self {
        let (snapshots, _) = watch::channel(Vec::new());
        Self {
            store,
            records: Vec::new(),
            snapshots,
        }
    }

    /// The current collection, in server-returned order.
    pub fn records(&self) -> &[K::Record] {
        &self.records
    }

    /// Look up a record by id.
    pub fn get(&self, id: i64) -> Option<&K::Record> {
        self.records.iter().find(|r| K::record_id(r) == id)
    }

    /// Subscribe to collection snapshots. Each successful refresh
    /// publishes the full replacement list.
    pub fn subscribe(&self) -> watch::Receiver<Vec<K::Record>> {
        self.snapshots.subscribe()
    }

    /// Wholesale-replace the collection with the server's list.
    ///
    /// On transport failure the collection is left untouched and the
    /// error is returned; the caller may retry.
    pub async fn refresh(&mut self) -> Result<()> {
        let fresh = self.store.list().await.inspect_err(|e| {
            warn!(kind = K::NAME, error = %e, "refresh failed, keeping current collection");
        })?;
        self.records = fresh;
        self.publish();
        Ok(())
    }

    /// Validate and create a record from a draft, then refresh.
    ///
    /// The draft is borrowed: on any failure the caller still holds the
    /// typed input and can retry unchanged. The new record (and its
    /// server-assigned id) appears only once the refresh lands.
    pub async fn create(&mut self, draft: &K::Draft) -> Result<()> {
        K::validate(draft)?;
        let normalized = K::normalize(draft.clone());
        self.store.create(&normalized).await.inspect_err(|e| {
            warn!(kind = K::NAME, error = %e, "create failed, draft preserved");
        })?;
        self.refresh().await
    }

    /// Overwrite the mutable fields of `id`, then refresh.
    pub async fn update(&mut self, id: i64, draft: &K::Draft) -> Result<()> {
        self.send_update(id, draft).await?;
        self.refresh().await
    }

    /// Validate and send an update without the follow-up refresh.
    ///
    /// Callers that must act on server acceptance before reconciling
    /// (the edit surfaces clear their buffers at that point) use this
    /// and refresh themselves.
    async fn send_update(&mut self, id: i64, draft: &K::Draft) -> Result<()> {
        K::validate(draft)?;
        let normalized = K::normalize(draft.clone());
        self.store.update(id, &normalized).await.inspect_err(|e| {
            warn!(kind = K::NAME, id, error = %e, "update failed");
        })
    }

    /// Delete `id`, then refresh. Confirmation prompts are the
    /// presentation layer's job; once called, deletion is unconditional.
    ///
    /// On failure the record stays in the collection, since server state
    /// is unchanged.
    pub async fn remove(&mut self, id: i64) -> Result<()> {
        self.store.remove(id).await.inspect_err(|e| {
            warn!(kind = K::NAME, id, error = %e, "remove failed, record kept");
        })?;
        self.refresh().await
    }

    fn publish(&self) {
        debug!(kind = K::NAME, count = self.records.len(), "publishing snapshot");
        // send_replace keeps the stored snapshot current even when no
        // view is subscribed (or a view was torn down mid-request).
        let _ = self.snapshots.send_replace(self.records.clone());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SingleEditSync — task surface
// ─────────────────────────────────────────────────────────────────────────────

/// Synchronizer plus a single-occupancy edit slot: at most one record is
/// in `Editing` at a time on this surface.
pub struct SingleEditSync<K: RecordKind, S: RemoteStore<K>> {
    sync: ListSync<K, S>,
    slot: EditSlot<K>,
}

impl<K: RecordKind, S: RemoteStore<K>> SingleEditSync<K, S> {
    /// Surface over a remote store, starting empty.
    pub fn new(store: S) -> Self {
        Self {
            sync: ListSync::new(store),
            slot: EditSlot::new(),
        }
    }

    /// The current collection, in server-returned order.
    pub fn records(&self) -> &[K::Record] {
        self.sync.records()
    }

    /// Subscribe to collection snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Vec<K::Record>> {
        self.sync.subscribe()
    }

    /// See [`ListSync::refresh`].
    pub async fn refresh(&mut self) -> Result<()> {
        self.sync.refresh().await
    }

    /// See [`ListSync::create`].
    pub async fn create(&mut self, draft: &K::Draft) -> Result<()> {
        self.sync.create(draft).await
    }

    /// See [`ListSync::remove`].
    pub async fn remove(&mut self, id: i64) -> Result<()> {
        self.sync.remove(id).await
    }

    /// Enter edit mode for `id`, snapshotting its current fields into the
    /// buffer. Returns `false` if the id is not in the collection. Any
    /// previous in-progress buffer is discarded.
    pub fn begin_edit(&mut self, id: i64) -> bool {
        match self.sync.get(id) {
            Some(record) => {
                self.slot.begin(record);
                true
            }
            None => false,
        }
    }

    /// Drop the edit buffer. No network call; displayed values are
    /// whatever the last refresh produced.
    pub fn cancel_edit(&mut self) {
        self.slot.cancel();
    }

    /// The id currently being edited, if any.
    pub fn editing(&self) -> Option<i64> {
        self.slot.active().map(|(id, _)| id)
    }

    /// Mutable access to the edit buffer for typing.
    pub fn draft_mut(&mut self) -> Option<&mut K::Draft> {
        self.slot.draft_mut()
    }

    /// Edit mode of a given record id.
    pub fn mode(&self, id: i64) -> EditMode {
        self.slot.mode(id)
    }

    /// Commit the active edit buffer: round-trip through the remote
    /// store, then leave edit mode and refresh.
    ///
    /// Post-commit displayed values come from the refresh, not the local
    /// buffer. If the server rejects the update, the buffer stays active
    /// so typed changes are not lost. Once the server has accepted, edit
    /// mode ends even if the follow-up refresh fails — re-sending a
    /// committed update would not make the list any fresher.
    pub async fn commit(&mut self) -> Result<()> {
        let (id, draft) = self
            .slot
            .active()
            .map(|(id, draft)| (id, draft.clone()))
            .ok_or(StoreError::NoActiveEdit)?;
        self.sync.send_update(id, &draft).await?;
        self.slot.clear();
        self.sync.refresh().await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// MultiEditSync — todo surface
// ─────────────────────────────────────────────────────────────────────────────

/// Synchronizer plus independent per-record edit buffers, with
/// keyboard-driven commit/cancel.
pub struct MultiEditSync<K: RecordKind, S: RemoteStore<K>> {
    sync: ListSync<K, S>,
    table: EditTable<K>,
}

impl<K: RecordKind, S: RemoteStore<K>> MultiEditSync<K, S> {
    /// Surface over a remote store, starting empty.
    pub fn new(store: S) -> Self {
        Self {
            sync: ListSync::new(store),
            table: EditTable::new(),
        }
    }

    /// The current collection, in server-returned order.
    pub fn records(&self) -> &[K::Record] {
        self.sync.records()
    }

    /// Subscribe to collection snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Vec<K::Record>> {
        self.sync.subscribe()
    }

    /// See [`ListSync::refresh`].
    pub async fn refresh(&mut self) -> Result<()> {
        self.sync.refresh().await
    }

    /// See [`ListSync::create`].
    pub async fn create(&mut self, draft: &K::Draft) -> Result<()> {
        self.sync.create(draft).await
    }

    /// See [`ListSync::remove`].
    pub async fn remove(&mut self, id: i64) -> Result<()> {
        self.sync.remove(id).await
    }

    /// Enter edit mode for `id`. Other records' buffers are untouched.
    /// Returns `false` if the id is not in the collection.
    pub fn begin_edit(&mut self, id: i64) -> bool {
        match self.sync.get(id) {
            Some(record) => {
                self.table.begin(record);
                true
            }
            None => false,
        }
    }

    /// Drop the buffer for `id`. No network call.
    pub fn cancel_edit(&mut self, id: i64) {
        self.table.cancel(id);
    }

    /// Mutable access to the buffer for typing.
    pub fn buffer_mut(&mut self, id: i64) -> Option<&mut K::Draft> {
        self.table.buffer_mut(id)
    }

    /// Edit mode of a given record id.
    pub fn mode(&self, id: i64) -> EditMode {
        self.table.mode(id)
    }

    /// Commit the buffer for `id`: round-trip through the remote store,
    /// then leave edit mode and refresh. If the server rejects the
    /// update, the buffer stays; once accepted, edit mode ends even if
    /// the follow-up refresh fails.
    pub async fn commit(&mut self, id: i64) -> Result<()> {
        let draft = self
            .table
            .buffer(id)
            .cloned()
            .ok_or(StoreError::NoActiveEdit)?;
        self.sync.send_update(id, &draft).await?;
        self.table.clear(id);
        self.sync.refresh().await
    }

    /// Dispatch a literal key identifier on an editing row: the commit
    /// key saves, the cancel key drops the buffer, anything else is
    /// ignored.
    pub async fn handle_key(&mut self, id: i64, key: &str) -> Result<()> {
        match EditIntent::from_key(key) {
            Some(EditIntent::Commit) => self.commit(id).await,
            Some(EditIntent::Cancel) => {
                self.cancel_edit(id);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
