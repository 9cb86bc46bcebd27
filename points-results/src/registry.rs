use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;
use crate::view::ResultsView;

pub type SharedView = Arc<Mutex<ResultsView>>;

/// Views untouched for this long are dropped on the next sweep.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(15 * 60);

struct Entry {
    view: SharedView,
    last_touched: Instant,
}

/// Owns every mounted results view. Removing a view here is what makes any
/// request still in flight for it land on nothing. A client that never
/// unmounts is covered by idle eviction.
pub struct ViewRegistry {
    views: HashMap<Uuid, Entry>,
    idle_ttl: Duration,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::with_idle_ttl(DEFAULT_IDLE_TTL)
    }

    pub fn with_idle_ttl(idle_ttl: Duration) -> Self {
        Self {
            views: HashMap::new(),
            idle_ttl,
        }
    }

    pub fn idle_ttl(&self) -> Duration {
        self.idle_ttl
    }

    /// Sweeps idle views before inserting the new one.
    pub fn mount(&mut self, view: ResultsView) -> SharedView {
        let now = Instant::now();
        self.evict_idle_at(now);

        let id = view.id();
        let shared = Arc::new(Mutex::new(view));
        self.views.insert(
            id,
            Entry {
                view: shared.clone(),
                last_touched: now,
            },
        );
        shared
    }

    /// Looks a view up and marks it as in use.
    pub fn get(&mut self, id: &Uuid) -> Option<SharedView> {
        self.views.get_mut(id).map(|entry| {
            entry.last_touched = Instant::now();
            entry.view.clone()
        })
    }

    pub fn unmount(&mut self, id: &Uuid) -> bool {
        self.views.remove(id).is_some()
    }

    pub fn evict_idle(&mut self) -> usize {
        self.evict_idle_at(Instant::now())
    }

    /// Drops every view last touched more than `idle_ttl` before `now`.
    pub fn evict_idle_at(&mut self, now: Instant) -> usize {
        let ttl = self.idle_ttl;
        let before = self.views.len();
        self.views.retain(|id, entry| {
            let keep = now.saturating_duration_since(entry.last_touched) <= ttl;
            if !keep {
                info!("Evicting idle view {}", id);
            }
            keep
        });
        before - self.views.len()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::new()
    }
}
