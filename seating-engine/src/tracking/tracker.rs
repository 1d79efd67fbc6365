//! Dirty-set tracker

use parking_lot::Mutex;
use shared::models::{Guest, TableNode};
use shared::sync::{ChangeAction, ChangeKind};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{Notify, watch};

use crate::store::{SeatingStore, StoreError};

/// Entity snapshot recorded for a change
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    Node(TableNode),
    Guest(Guest),
}

impl Snapshot {
    pub fn kind(&self) -> ChangeKind {
        match self {
            Snapshot::Node(_) => ChangeKind::Node,
            Snapshot::Guest(_) => ChangeKind::Guest,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Snapshot::Node(node) => &node.id,
            Snapshot::Guest(guest) => &guest.id,
        }
    }
}

/// Modified entities awaiting persistence, one entry per id
#[derive(Debug, Clone, Default)]
pub struct DirtySet {
    pub nodes: HashMap<String, TableNode>,
    pub guests: HashMap<String, Guest>,
    /// Table deletions the backend has not confirmed yet
    pub deleted_nodes: HashSet<String>,
    /// Guest deletions the backend has not confirmed yet
    pub deleted_guests: HashSet<String>,
}

impl DirtySet {
    pub fn len(&self) -> usize {
        self.nodes.len()
            + self.guests.len()
            + self.deleted_nodes.len()
            + self.deleted_guests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of one flush
#[derive(Debug, Clone, Default)]
pub struct FlushReport {
    /// Node snapshots the store accepted
    pub nodes_saved: usize,
    /// Guest snapshots the store accepted
    pub guests_saved: usize,
    /// Pending table deletions the store confirmed
    pub nodes_deleted: usize,
    /// Pending guest deletions the store confirmed
    pub guests_deleted: usize,
    pub node_error: Option<StoreError>,
    pub guest_error: Option<StoreError>,
    /// Entries still pending after the flush
    pub remaining: usize,
    pub flushed_at: i64,
}

impl FlushReport {
    pub fn is_ok(&self) -> bool {
        self.node_error.is_none() && self.guest_error.is_none()
    }

    /// Nothing was pending, nothing was sent
    pub fn is_noop(&self) -> bool {
        self.is_ok()
            && self.nodes_saved == 0
            && self.guests_saved == 0
            && self.nodes_deleted == 0
            && self.guests_deleted == 0
    }

    /// First error, node half first
    pub fn error(&self) -> Option<&StoreError> {
        self.node_error.as_ref().or(self.guest_error.as_ref())
    }
}

struct TrackerInner {
    dirty: Mutex<DirtySet>,
    pending_tx: watch::Sender<usize>,
    activity: Notify,
}

/// Shared handle to the dirty set
///
/// Cloning is cheap; every clone sees the same dirty set.
#[derive(Clone)]
pub struct ChangeTracker {
    inner: Arc<TrackerInner>,
}

impl std::fmt::Debug for ChangeTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeTracker")
            .field("pending", &self.total_pending_changes())
            .finish()
    }
}

impl Default for ChangeTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeTracker {
    pub fn new() -> Self {
        let (pending_tx, _) = watch::channel(0);
        Self {
            inner: Arc::new(TrackerInner {
                dirty: Mutex::new(DirtySet::default()),
                pending_tx,
                activity: Notify::new(),
            }),
        }
    }

    /// Record a change
    ///
    /// `Created`/`Updated` insert or replace the snapshot for its id.
    /// `Deleted` drops any pending snapshot so a deleted entity is never
    /// written back.
    pub fn track_change(&self, action: ChangeAction, snapshot: Snapshot) {
        let kind = snapshot.kind();
        let id = snapshot.id().to_string();
        {
            let mut dirty = self.inner.dirty.lock();
            match (action, snapshot) {
                (ChangeAction::Deleted, Snapshot::Node(_)) => {
                    dirty.nodes.remove(&id);
                }
                (ChangeAction::Deleted, Snapshot::Guest(_)) => {
                    dirty.guests.remove(&id);
                }
                (_, Snapshot::Node(node)) => {
                    dirty.deleted_nodes.remove(&id);
                    dirty.nodes.insert(id.clone(), node);
                }
                (_, Snapshot::Guest(guest)) => {
                    dirty.deleted_guests.remove(&id);
                    dirty.guests.insert(id.clone(), guest);
                }
            }
        }
        tracing::trace!(%kind, %action, id = %id, "Change tracked");
        self.publish_pending();
        self.inner.activity.notify_one();
    }

    /// Queue a backend deletion that failed so the next flush retries it
    pub fn track_pending_delete(&self, kind: ChangeKind, id: &str) {
        {
            let mut dirty = self.inner.dirty.lock();
            match kind {
                ChangeKind::Node => {
                    dirty.nodes.remove(id);
                    dirty.deleted_nodes.insert(id.to_string());
                }
                ChangeKind::Guest => {
                    dirty.guests.remove(id);
                    dirty.deleted_guests.insert(id.to_string());
                }
            }
        }
        tracing::debug!(%kind, id, "Deletion queued for retry");
        self.publish_pending();
        self.inner.activity.notify_one();
    }

    pub fn track_node(&self, action: ChangeAction, node: &TableNode) {
        self.track_change(action, Snapshot::Node(node.clone()));
    }

    pub fn track_guest(&self, action: ChangeAction, guest: &Guest) {
        self.track_change(action, Snapshot::Guest(guest.clone()));
    }

    /// Node and guest entries plus queued deletions
    pub fn total_pending_changes(&self) -> usize {
        self.inner.dirty.lock().len()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.total_pending_changes() > 0
    }

    /// Copy of the current dirty set
    pub fn snapshot(&self) -> DirtySet {
        self.inner.dirty.lock().clone()
    }

    /// Observe the pending-change count
    pub fn subscribe_pending(&self) -> watch::Receiver<usize> {
        self.inner.pending_tx.subscribe()
    }

    /// Resolves on the next tracked change
    pub async fn changed(&self) {
        self.inner.activity.notified().await;
    }

    /// Send the dirty set to `store`
    ///
    /// Each half is cleared only when its collaborator call succeeds, and
    /// only of entries that were not re-modified while the call was in flight.
    /// Queued deletions are retried afterwards; one the store reports as
    /// already absent counts as done.
    pub async fn flush(&self, store: &dyn SeatingStore) -> FlushReport {
        let (nodes, guests, deleted_nodes, deleted_guests) = {
            let dirty = self.inner.dirty.lock();
            (
                dirty.nodes.values().cloned().collect::<Vec<TableNode>>(),
                dirty.guests.values().cloned().collect::<Vec<Guest>>(),
                dirty.deleted_nodes.iter().cloned().collect::<Vec<String>>(),
                dirty.deleted_guests.iter().cloned().collect::<Vec<String>>(),
            )
        };

        let mut report = FlushReport::default();

        if !nodes.is_empty() {
            match store.update_table_nodes(&nodes).await {
                Ok(()) => {
                    let mut dirty = self.inner.dirty.lock();
                    for node in &nodes {
                        if dirty.nodes.get(&node.id) == Some(node) {
                            dirty.nodes.remove(&node.id);
                        }
                    }
                    report.nodes_saved = nodes.len();
                }
                Err(e) => {
                    tracing::error!(error = %e, nodes = nodes.len(), "Failed to save table nodes");
                    report.node_error = Some(e);
                }
            }
        }

        if !guests.is_empty() {
            match store.update_guests(&guests).await {
                Ok(()) => {
                    let mut dirty = self.inner.dirty.lock();
                    for guest in &guests {
                        if dirty.guests.get(&guest.id) == Some(guest) {
                            dirty.guests.remove(&guest.id);
                        }
                    }
                    report.guests_saved = guests.len();
                }
                Err(e) => {
                    tracing::error!(error = %e, guests = guests.len(), "Failed to save guests");
                    report.guest_error = Some(e);
                }
            }
        }

        for id in &deleted_nodes {
            match store.delete_table_node(id).await {
                Ok(()) | Err(StoreError::NotFound(_)) => {
                    self.inner.dirty.lock().deleted_nodes.remove(id);
                    report.nodes_deleted += 1;
                }
                Err(e) => {
                    tracing::error!(error = %e, table_id = %id, "Failed to delete table node");
                    report.node_error.get_or_insert(e);
                }
            }
        }

        for id in &deleted_guests {
            match store.delete_guest(id).await {
                Ok(()) | Err(StoreError::NotFound(_)) => {
                    self.inner.dirty.lock().deleted_guests.remove(id);
                    report.guests_deleted += 1;
                }
                Err(e) => {
                    tracing::error!(error = %e, guest_id = %id, "Failed to delete guest");
                    report.guest_error.get_or_insert(e);
                }
            }
        }

        report.remaining = self.total_pending_changes();
        report.flushed_at = shared::util::now_millis();
        self.publish_pending();

        if !report.is_noop() {
            tracing::info!(
                nodes = report.nodes_saved,
                guests = report.guests_saved,
                nodes_deleted = report.nodes_deleted,
                guests_deleted = report.guests_deleted,
                remaining = report.remaining,
                ok = report.is_ok(),
                "Flushed seating changes"
            );
        }

        report
    }

    fn publish_pending(&self) {
        let count = self.total_pending_changes();
        self.inner.pending_tx.send_replace(count);
    }
}
