use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use points_core::repository::{AirportDirectory, FlightSearchClient};
use points_results::{Diagnostics, ViewRegistry};

#[derive(Clone)]
pub struct AppState {
    pub views: Arc<RwLock<ViewRegistry>>,
    pub search_client: Arc<dyn FlightSearchClient>,
    pub airports: Arc<dyn AirportDirectory>,
    pub diagnostics: Diagnostics,
}

impl AppState {
    pub fn new(
        search_client: Arc<dyn FlightSearchClient>,
        airports: Arc<dyn AirportDirectory>,
        diagnostics: Diagnostics,
    ) -> Self {
        Self::with_registry(ViewRegistry::new(), search_client, airports, diagnostics)
    }

    pub fn with_registry(
        registry: ViewRegistry,
        search_client: Arc<dyn FlightSearchClient>,
        airports: Arc<dyn AirportDirectory>,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            views: Arc::new(RwLock::new(registry)),
            search_client,
            airports,
            diagnostics,
        }
    }
}

/// Periodically evicts idle views so an idle server does not hold them until
/// the next mount.
pub fn spawn_view_sweeper(views: Arc<RwLock<ViewRegistry>>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let evicted = views.write().await.evict_idle();
            if evicted > 0 {
                tracing::debug!("Swept {} idle view(s)", evicted);
            }
        }
    })
}
