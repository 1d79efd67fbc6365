//! Idle-triggered flushing
//!
//! Every tracked change pushes the idle deadline back; once edits stop for
//! the full timeout the dirty set is flushed.

use std::sync::Arc;
use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use super::tracker::{ChangeTracker, FlushReport};
use crate::notice::Notifier;
use crate::store::SeatingStore;

/// Park interval while the timer is disarmed
const DISARMED_PARK_SECS: u64 = 3600;

/// Cancellable debounce deadline
#[derive(Debug, Clone)]
pub struct IdleTimer {
    timeout: Duration,
    deadline: Option<Instant>,
}

impl IdleTimer {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            deadline: None,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Arm the timer for a full timeout from now
    pub fn start(&mut self) {
        self.deadline = Some(Instant::now() + self.timeout);
    }

    /// Push the deadline back to a full timeout from now (arms if disarmed)
    pub fn reset(&mut self) {
        self.start();
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Disarm and report `true` if the deadline has passed
    pub fn fire(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= Instant::now() => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Background worker that flushes the tracker after a quiet period
pub struct IdleFlushWorker {
    tracker: ChangeTracker,
    store: Arc<dyn SeatingStore>,
    notifier: Notifier,
    timer: IdleTimer,
    shutdown: CancellationToken,
}

impl IdleFlushWorker {
    pub fn new(
        tracker: ChangeTracker,
        store: Arc<dyn SeatingStore>,
        notifier: Notifier,
        idle_timeout: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            tracker,
            store,
            notifier,
            timer: IdleTimer::new(idle_timeout),
            shutdown,
        }
    }

    /// Run until the shutdown token is cancelled
    ///
    /// Pending changes are flushed once more on shutdown.
    pub async fn run(mut self) {
        tracing::info!(
            idle_timeout_ms = self.timer.timeout().as_millis() as u64,
            "IdleFlushWorker started"
        );

        loop {
            let deadline = self.timer.deadline();
            let sleep_until = deadline
                .unwrap_or_else(|| Instant::now() + Duration::from_secs(DISARMED_PARK_SECS));

            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    tracing::info!("IdleFlushWorker shutting down");
                    if self.tracker.has_unsaved_changes() {
                        self.flush().await;
                    }
                    break;
                }

                _ = tokio::time::sleep_until(sleep_until), if deadline.is_some() => {
                    if self.timer.fire() {
                        self.flush().await;
                    }
                }

                _ = self.tracker.changed() => {
                    self.timer.reset();
                }
            }
        }

        tracing::info!("IdleFlushWorker stopped");
    }

    async fn flush(&self) -> FlushReport {
        tracing::debug!("Idle timeout reached, flushing");
        let report = self.tracker.flush(self.store.as_ref()).await;
        self.notifier.flush_report(&report);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use shared::models::Guest;
    use shared::sync::ChangeAction;

    #[tokio::test(start_paused = true)]
    async fn test_timer_start_reset_fire() {
        let mut timer = IdleTimer::new(Duration::from_millis(500));
        assert!(!timer.is_armed());
        assert!(!timer.fire());

        timer.start();
        assert!(timer.is_armed());
        tokio::time::advance(Duration::from_millis(300)).await;
        assert!(!timer.fire());

        timer.reset();
        tokio::time::advance(Duration::from_millis(300)).await;
        assert!(!timer.fire(), "reset pushed the deadline back");

        tokio::time::advance(Duration::from_millis(250)).await;
        assert!(timer.fire());
        assert!(!timer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_cancel() {
        let mut timer = IdleTimer::new(Duration::from_millis(100));
        timer.start();
        timer.cancel();
        tokio::time::advance(Duration::from_millis(200)).await;
        assert!(!timer.fire());
    }

    fn setup() -> (Arc<MemoryStore>, ChangeTracker, CancellationToken) {
        let store = Arc::new(MemoryStore::new().with_guests("e1", [Guest::new("g1", "Alice")]));
        (store, ChangeTracker::new(), CancellationToken::new())
    }

    #[tokio::test(start_paused = true)]
    async fn test_worker_flushes_after_idle_timeout() {
        let (store, tracker, shutdown) = setup();
        let worker = IdleFlushWorker::new(
            tracker.clone(),
            store.clone(),
            Notifier::new(8),
            Duration::from_secs(5),
            shutdown.clone(),
        );
        let handle = tokio::spawn(worker.run());

        let mut guest = Guest::new("g1", "Alice");
        guest.is_assigned = true;
        tracker.track_guest(ChangeAction::Updated, &guest);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(store.guest_writes(), 0, "flushed before the idle timeout");

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(store.guest_writes(), 1);
        assert!(!tracker.has_unsaved_changes());

        shutdown.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_worker_debounces_bursts() {
        let (store, tracker, shutdown) = setup();
        let worker = IdleFlushWorker::new(
            tracker.clone(),
            store.clone(),
            Notifier::new(8),
            Duration::from_secs(5),
            shutdown.clone(),
        );
        let handle = tokio::spawn(worker.run());

        for i in 0..4 {
            let mut guest = Guest::new("g1", "Alice");
            guest.phone = format!("555-000{i}");
            tracker.track_guest(ChangeAction::Updated, &guest);
            tokio::time::sleep(Duration::from_secs(2)).await;
        }
        assert_eq!(store.guest_writes(), 0);

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(store.guest_writes(), 1);
        assert_eq!(store.guest("g1").unwrap().phone, "555-0003");

        shutdown.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_worker_flushes_on_shutdown() {
        let (store, tracker, shutdown) = setup();
        let worker = IdleFlushWorker::new(
            tracker.clone(),
            store.clone(),
            Notifier::new(8),
            Duration::from_secs(60),
            shutdown.clone(),
        );
        let handle = tokio::spawn(worker.run());

        tracker.track_guest(ChangeAction::Updated, &Guest::new("g1", "Alice"));
        tokio::task::yield_now().await;

        shutdown.cancel();
        handle.await.unwrap();
        assert_eq!(store.guest_writes(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_idle_flush_does_not_rearm() {
        let (store, tracker, shutdown) = setup();
        store.set_failing(true);
        let notifier = Notifier::new(8);
        let mut notices = notifier.subscribe();
        let worker = IdleFlushWorker::new(
            tracker.clone(),
            store.clone(),
            notifier,
            Duration::from_secs(5),
            shutdown.clone(),
        );
        let handle = tokio::spawn(worker.run());

        tracker.track_guest(ChangeAction::Updated, &Guest::new("g1", "Alice"));
        tokio::time::sleep(Duration::from_secs(6)).await;

        assert!(matches!(
            notices.try_recv(),
            Ok(crate::notice::SeatingNotice::SaveFailed(_))
        ));
        assert_eq!(tracker.total_pending_changes(), 1);

        // no retry loop: nothing else happens without a new trigger
        store.set_failing(false);
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(store.guest_writes(), 0);

        shutdown.cancel();
        handle.await.unwrap();
        // the shutdown flush picks the retained change up
        assert_eq!(store.guest_writes(), 1);
    }
}
