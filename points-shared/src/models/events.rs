use uuid::Uuid;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct FetchFailedEvent {
    pub view_id: Uuid,
    pub query: String,
    pub error: String,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct RecordRejectedEvent {
    pub view_id: Uuid,
    pub index: usize,
    pub reason: String,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct StaleResponseEvent {
    pub view_id: Uuid,
    pub generation: u64,
    pub timestamp: i64,
}

/// Everything reported on the diagnostics channel. Never shown to the end user.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticEvent {
    FetchFailed(FetchFailedEvent),
    RecordRejected(RecordRejectedEvent),
    StaleResponseDiscarded(StaleResponseEvent),
}

impl DiagnosticEvent {
    pub fn view_id(&self) -> Uuid {
        match self {
            DiagnosticEvent::FetchFailed(e) => e.view_id,
            DiagnosticEvent::RecordRejected(e) => e.view_id,
            DiagnosticEvent::StaleResponseDiscarded(e) => e.view_id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DiagnosticEvent::FetchFailed(_) => "fetch_failed",
            DiagnosticEvent::RecordRejected(_) => "record_rejected",
            DiagnosticEvent::StaleResponseDiscarded(_) => "stale_response_discarded",
        }
    }
}
