use std::sync::{Arc, Weak};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;
use points_core::repository::FlightSearchClient;

use crate::diagnostics::Diagnostics;
use crate::fetcher::FetchTicket;
use crate::view::ResultsView;

/// Performs the request for `ticket` and hands the outcome back to the view.
///
/// The lock is not held across the network call. The view is reached through a
/// weak handle; if it was unmounted in the meantime the outcome is dropped.
/// A stale settlement may release a deferred request, which is run in turn.
pub async fn run_fetch(
    view_id: Uuid,
    view: Weak<Mutex<ResultsView>>,
    mut ticket: FetchTicket,
    client: Arc<dyn FlightSearchClient>,
    diagnostics: Diagnostics,
) {
    loop {
        let outcome = client.search_flights(&ticket.request).await;

        let Some(shared) = view.upgrade() else {
            debug!("View {} unmounted before its search settled", view_id);
            return;
        };

        let (report, query) = {
            let mut guard = shared.lock().await;
            let report = guard.settle(&ticket, outcome);
            (report, guard.encoded_query())
        };

        if let Some(generation) = report.stale_generation {
            diagnostics.stale_response(view_id, generation);
        }
        if let Some(error) = report.error {
            diagnostics.fetch_failed(view_id, query, error);
        }
        for rejection in report.rejected {
            diagnostics.record_rejected(view_id, rejection.index, rejection.reason);
        }
        if report.applied {
            debug!("View {} loaded {} flight(s)", view_id, report.accepted);
        }

        match report.follow_up {
            Some(next) => ticket = next,
            None => return,
        }
    }
}

pub fn spawn_fetch(
    view_id: Uuid,
    view: &Arc<Mutex<ResultsView>>,
    ticket: FetchTicket,
    client: Arc<dyn FlightSearchClient>,
    diagnostics: Diagnostics,
) -> JoinHandle<()> {
    tokio::spawn(run_fetch(view_id, Arc::downgrade(view), ticket, client, diagnostics))
}
