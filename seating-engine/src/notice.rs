//! User-facing notifications
//!
//! Rejections and save results are broadcast so the presentation layer can
//! show transient toasts without the engine knowing about any UI.

use shared::error::AppError;
use tokio::sync::broadcast;

use crate::tracking::FlushReport;

#[derive(Debug, Clone)]
pub enum SeatingNotice {
    /// An operation was refused; state is unchanged
    Rejected(AppError),
    /// A flush reached the backend
    Saved { nodes: usize, guests: usize },
    /// A flush failed; the affected changes stay pending
    SaveFailed(AppError),
}

#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<SeatingNotice>,
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SeatingNotice> {
        self.tx.subscribe()
    }

    pub fn publish(&self, notice: SeatingNotice) {
        // no subscribers is fine
        let _ = self.tx.send(notice);
    }

    pub fn rejected(&self, err: &AppError) {
        self.publish(SeatingNotice::Rejected(err.clone()));
    }

    /// Translate a flush outcome; no-op flushes stay silent
    pub fn flush_report(&self, report: &FlushReport) {
        if let Some(err) = report.error() {
            self.publish(SeatingNotice::SaveFailed(err.clone().into()));
        } else if !report.is_noop() {
            self.publish(SeatingNotice::Saved {
                nodes: report.nodes_saved + report.nodes_deleted,
                guests: report.guests_saved + report.guests_deleted,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;
    use shared::error::ErrorCode;

    #[test]
    fn test_flush_report_translation() {
        let notifier = Notifier::new(4);
        let mut rx = notifier.subscribe();

        notifier.flush_report(&FlushReport::default());
        assert!(rx.try_recv().is_err(), "no-op flush is silent");

        notifier.flush_report(&FlushReport {
            nodes_saved: 2,
            ..Default::default()
        });
        assert!(matches!(
            rx.try_recv(),
            Ok(SeatingNotice::Saved { nodes: 2, guests: 0 })
        ));

        notifier.flush_report(&FlushReport {
            guest_error: Some(StoreError::Network("reset".into())),
            ..Default::default()
        });
        match rx.try_recv() {
            Ok(SeatingNotice::SaveFailed(err)) => assert_eq!(err.code, ErrorCode::NetworkError),
            other => panic!("unexpected notice: {other:?}"),
        }
    }

    #[test]
    fn test_publish_without_subscribers() {
        let notifier = Notifier::new(1);
        notifier.rejected(&AppError::new(ErrorCode::SeatOccupied));
    }
}
