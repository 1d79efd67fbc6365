//! Change tracking and reconciliation
//!
//! [`ChangeTracker`] accumulates the latest snapshot of every modified table
//! node and guest, keyed by id (last write wins), and flushes them to the
//! [`SeatingStore`](crate::store::SeatingStore). [`IdleFlushWorker`] flushes
//! automatically once edits stop for the configured idle timeout.
//!
//! # Flush Flow
//!
//! ```text
//! flush(store)
//!     ├─ 1. Copy both halves of the dirty set (lock released)
//!     ├─ 2. update_table_nodes(nodes)   (skipped when empty)
//!     │     └─ Ok  → drop entries still equal to what was sent
//!     │     └─ Err → keep the node half for the next trigger
//!     ├─ 3. update_guests(guests)       (skipped when empty)
//!     │     └─ same rule for the guest half
//!     ├─ 4. Retry queued deletions one by one
//!     │     └─ Ok or NotFound → drop from the queue
//!     └─ 5. Publish the new pending count
//! ```

mod idle;
mod tracker;

pub use idle::{IdleFlushWorker, IdleTimer};
pub use tracker::{ChangeTracker, DirtySet, FlushReport, Snapshot};
