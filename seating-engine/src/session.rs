//! Editing session for one event
//!
//! [`SeatingSession`] wires the chart, the change tracker, the persistence
//! collaborator and the idle flush worker together. Chart operations are
//! synchronous and never touch the network; only table creation, table and
//! guest deletion, and flushes await the store.

use parking_lot::Mutex;
use shared::error::{AppError, AppResult};
use shared::models::{Guest, Position, TableNode, TableNodeCreate};
use shared::sync::ChangeKind;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::chart::{
    ChartResult, DeletedTable, RemovedGuest, SeatChange, SeatingChart, TableEdit, Transfer,
};
use crate::core::EngineConfig;
use crate::layout::{SeatOffset, new_table_node};
use crate::notice::{Notifier, SeatingNotice};
use crate::store::{SeatingStore, StoreError};
use crate::tracking::{ChangeTracker, FlushReport, IdleFlushWorker};

pub struct SeatingSession {
    event_id: String,
    chart: Mutex<SeatingChart>,
    tracker: ChangeTracker,
    store: Arc<dyn SeatingStore>,
    notifier: Notifier,
    shutdown: CancellationToken,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl SeatingSession {
    /// Load the event's tables and guests and start the idle flush worker
    ///
    /// Must be called inside a tokio runtime.
    pub async fn open(
        event_id: impl Into<String>,
        store: Arc<dyn SeatingStore>,
        config: &EngineConfig,
    ) -> AppResult<Self> {
        let event_id = event_id.into();

        let (nodes, guests) = futures::try_join!(
            store.load_table_nodes(&event_id),
            store.load_guests(&event_id)
        )
        .map_err(|e| {
            tracing::error!(event_id = %event_id, error = %e, "Failed to load seating data");
            AppError::from(e)
        })?;

        tracing::info!(
            event_id = %event_id,
            tables = nodes.len(),
            guests = guests.len(),
            "Seating session opened"
        );

        let tracker = ChangeTracker::new();
        let chart = SeatingChart::new(event_id.clone(), nodes, guests, tracker.clone());
        let notifier = Notifier::new(config.notice_capacity);
        let shutdown = CancellationToken::new();

        let worker = IdleFlushWorker::new(
            tracker.clone(),
            store.clone(),
            notifier.clone(),
            config.idle_timeout(),
            shutdown.clone(),
        );
        let handle = tokio::spawn(worker.run());

        Ok(Self {
            event_id,
            chart: Mutex::new(chart),
            tracker,
            store,
            notifier,
            shutdown,
            worker: Mutex::new(Some(handle)),
        })
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    // ========== Chart operations ==========

    pub fn assign(
        &self,
        table_id: &str,
        seat_id: &str,
        guest_id: &str,
        guest_name: &str,
    ) -> AppResult<SeatChange> {
        self.apply(|chart| chart.assign(table_id, seat_id, guest_id, guest_name))
    }

    pub fn unassign(&self, table_id: &str, seat_id: &str, guest_id: &str) -> AppResult<SeatChange> {
        self.apply(|chart| chart.unassign(table_id, seat_id, guest_id))
    }

    pub fn transfer(
        &self,
        from_table: &str,
        from_seat: &str,
        to_table: &str,
        to_seat: &str,
        guest_id: &str,
    ) -> AppResult<Transfer> {
        self.apply(|chart| chart.transfer(from_table, from_seat, to_table, to_seat, guest_id))
    }

    pub fn edit_table(&self, table_id: &str, label: &str, seat_count: i32) -> AppResult<TableEdit> {
        self.apply(|chart| chart.edit_table(table_id, label, seat_count))
    }

    pub fn move_table(&self, table_id: &str, position: Position) -> AppResult<TableNode> {
        self.apply(|chart| chart.move_table(table_id, position))
    }

    /// Create a table on the backend, then add it to the chart
    ///
    /// The table only joins the working set once the store accepted it.
    pub async fn add_table(&self, create: TableNodeCreate) -> AppResult<TableNode> {
        let node = new_table_node(
            self.event_id.clone(),
            create.label,
            create.table_type,
            create.position,
            create.num_seats,
        );

        if let Err(e) = self.store.create_table_node(&node).await {
            tracing::error!(table_id = %node.id, error = %e, "Failed to create table");
            let err = AppError::from(e);
            self.notifier.publish(SeatingNotice::SaveFailed(err.clone()));
            return Err(err);
        }

        self.chart.lock().insert_table(node.clone());
        tracing::info!(
            table_id = %node.id,
            table_type = %node.table_type,
            seats = node.num_seats,
            "Table created"
        );
        Ok(node)
    }

    /// Release the table's guests, drop it from the chart and delete it on
    /// the backend
    ///
    /// A backend failure is reported as a notice and the deletion is queued
    /// for the next flush; the local deletion stands.
    pub async fn delete_table(&self, table_id: &str) -> AppResult<DeletedTable> {
        let deleted = self.apply(|chart| chart.delete_table(table_id))?;
        let result = self.store.delete_table_node(table_id).await;
        self.report_delete(ChangeKind::Node, table_id, result);
        Ok(deleted)
    }

    /// Vacate the guest's seat, drop them from the chart and delete them on
    /// the backend
    pub async fn remove_guest(&self, guest_id: &str) -> AppResult<RemovedGuest> {
        let removed = self.apply(|chart| chart.remove_guest(guest_id))?;
        let result = self.store.delete_guest(guest_id).await;
        self.report_delete(ChangeKind::Guest, guest_id, result);
        Ok(removed)
    }

    // ========== Persistence ==========

    /// Flush the dirty set now (the manual "Save" action)
    pub async fn save(&self) -> FlushReport {
        let report = self.tracker.flush(self.store.as_ref()).await;
        self.notifier.flush_report(&report);
        report
    }

    /// Stop the idle worker, which flushes whatever is pending
    ///
    /// Returns the number of changes still unsaved afterwards.
    pub async fn close(&self) -> usize {
        self.shutdown.cancel();
        let handle = self.worker.lock().take();
        if let Some(handle) = handle
            && let Err(e) = handle.await
        {
            tracing::error!(error = %e, "Idle flush worker failed");
        }

        let remaining = self.tracker.total_pending_changes();
        if remaining > 0 {
            tracing::warn!(
                event_id = %self.event_id,
                remaining,
                "Session closed with unsaved changes"
            );
        } else {
            tracing::info!(event_id = %self.event_id, "Seating session closed");
        }
        remaining
    }

    pub fn pending_changes(&self) -> usize {
        self.tracker.total_pending_changes()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.tracker.has_unsaved_changes()
    }

    // ========== Observation ==========

    pub fn subscribe_notices(&self) -> broadcast::Receiver<SeatingNotice> {
        self.notifier.subscribe()
    }

    pub fn subscribe_pending(&self) -> watch::Receiver<usize> {
        self.tracker.subscribe_pending()
    }

    /// Read the chart under its lock
    pub fn with_chart<R>(&self, f: impl FnOnce(&SeatingChart) -> R) -> R {
        f(&self.chart.lock())
    }

    pub fn tables(&self) -> Vec<TableNode> {
        self.with_chart(|chart| chart.tables().to_vec())
    }

    pub fn table(&self, table_id: &str) -> Option<TableNode> {
        self.with_chart(|chart| chart.table(table_id).cloned())
    }

    pub fn guests(&self) -> Vec<Guest> {
        self.with_chart(|chart| chart.guests().to_vec())
    }

    pub fn guest(&self, guest_id: &str) -> Option<Guest> {
        self.with_chart(|chart| chart.guest(guest_id).cloned())
    }

    pub fn unassigned_guests(&self) -> Vec<Guest> {
        self.with_chart(|chart| chart.unassigned_guests().cloned().collect())
    }

    pub fn seat_layout(&self, table_id: &str) -> AppResult<Vec<(String, SeatOffset)>> {
        self.with_chart(|chart| chart.seat_layout(table_id))
            .map_err(AppError::from)
    }

    // ========== Internals ==========

    fn apply<T>(&self, op: impl FnOnce(&mut SeatingChart) -> ChartResult<T>) -> AppResult<T> {
        let result = op(&mut self.chart.lock());
        result.map_err(|e| {
            tracing::debug!(error = %e, "Seating operation rejected");
            let err = AppError::from(e);
            self.notifier.rejected(&err);
            err
        })
    }

    fn report_delete(&self, kind: ChangeKind, id: &str, result: Result<(), StoreError>) {
        match result {
            Ok(()) => tracing::info!(%kind, id, "Deleted on backend"),
            Err(StoreError::NotFound(_)) => {
                tracing::debug!(%kind, id, "Already absent on backend");
            }
            Err(e) => {
                tracing::error!(%kind, id, error = %e, "Failed to delete on backend");
                self.tracker.track_pending_delete(kind, id);
                self.notifier.publish(SeatingNotice::SaveFailed(e.into()));
            }
        }
    }
}

impl Drop for SeatingSession {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
