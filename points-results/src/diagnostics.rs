use chrono::Utc;
use tokio::sync::broadcast;
use tracing::{error, info, warn};
use uuid::Uuid;
use points_shared::models::events::{
    DiagnosticEvent, FetchFailedEvent, RecordRejectedEvent, StaleResponseEvent,
};

/// Diagnostics channel. Every event is logged; subscribers (the SSE stream,
/// tests) additionally receive it. Sending with no subscribers is not an error.
#[derive(Clone)]
pub struct Diagnostics {
    tx: broadcast::Sender<DiagnosticEvent>,
}

impl Diagnostics {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DiagnosticEvent> {
        self.tx.subscribe()
    }

    pub fn report(&self, event: DiagnosticEvent) {
        match &event {
            DiagnosticEvent::FetchFailed(e) => {
                error!("Search for view {} failed ({}): {}", e.view_id, e.query, e.error)
            }
            DiagnosticEvent::RecordRejected(e) => {
                warn!("View {} dropped record #{}: {}", e.view_id, e.index, e.reason)
            }
            DiagnosticEvent::StaleResponseDiscarded(e) => {
                info!("View {} discarded stale response (generation {})", e.view_id, e.generation)
            }
        }
        let _ = self.tx.send(event);
    }

    pub fn fetch_failed(&self, view_id: Uuid, query: String, error: String) {
        self.report(DiagnosticEvent::FetchFailed(FetchFailedEvent {
            view_id,
            query,
            error,
            timestamp: Utc::now().timestamp(),
        }));
    }

    pub fn record_rejected(&self, view_id: Uuid, index: usize, reason: String) {
        self.report(DiagnosticEvent::RecordRejected(RecordRejectedEvent {
            view_id,
            index,
            reason,
            timestamp: Utc::now().timestamp(),
        }));
    }

    pub fn stale_response(&self, view_id: Uuid, generation: u64) {
        self.report(DiagnosticEvent::StaleResponseDiscarded(StaleResponseEvent {
            view_id,
            generation,
            timestamp: Utc::now().timestamp(),
        }));
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(100)
    }
}
