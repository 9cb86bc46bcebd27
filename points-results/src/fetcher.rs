use serde::Serialize;
use points_core::search::FlightSearchRequest;
use points_shared::SearchQuery;

/// Per-view fetch latch.
///
/// `Idle → Fetching → Settled`. Re-triggering with the query that was already
/// fetched is a no-op in every state but `Idle`. A different query starts a new
/// generation; if a request is still outstanding the new one is deferred until
/// that request settles, so a view never has more than one request in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchState {
    Idle,
    Fetching,
    Settled,
}

/// Handed to whoever performs the network call and returned with the outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub generation: u64,
    pub request: FlightSearchRequest,
}

/// Result of handing a ticket back to the latch.
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    /// The outcome belongs to the current query and may be applied.
    Current,
    /// The query changed while the request was out. Discard the outcome and,
    /// if present, launch the deferred request.
    Stale { follow_up: Option<FetchTicket> },
}

#[derive(Debug)]
pub struct ResultsFetcher {
    state: FetchState,
    generation: u64,
    query: Option<SearchQuery>,
    in_flight: Option<u64>,
}

impl ResultsFetcher {
    pub fn new() -> Self {
        Self {
            state: FetchState::Idle,
            generation: 0,
            query: None,
            in_flight: None,
        }
    }

    pub fn state(&self) -> FetchState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn loading(&self) -> bool {
        self.state == FetchState::Fetching
    }

    /// Returns a ticket only when a request must actually be sent now.
    pub fn trigger(&mut self, query: &SearchQuery) -> Option<FetchTicket> {
        if self.state != FetchState::Idle && self.query.as_ref() == Some(query) {
            return None;
        }

        self.generation += 1;
        self.query = Some(query.clone());
        self.state = FetchState::Fetching;

        if self.in_flight.is_some() {
            tracing::debug!(generation = self.generation, "query changed mid-flight, deferring request");
            return None;
        }
        Some(self.issue())
    }

    pub fn settle(&mut self, ticket: &FetchTicket) -> Settlement {
        if self.in_flight == Some(ticket.generation) {
            self.in_flight = None;
        }

        if ticket.generation != self.generation {
            let follow_up = (self.state == FetchState::Fetching && self.in_flight.is_none())
                .then(|| self.issue());
            return Settlement::Stale { follow_up };
        }

        self.state = FetchState::Settled;
        Settlement::Current
    }

    fn issue(&mut self) -> FetchTicket {
        self.in_flight = Some(self.generation);
        let request = self
            .query
            .as_ref()
            .map(FlightSearchRequest::from)
            .unwrap_or_else(|| FlightSearchRequest::from(&SearchQuery::default()));
        FetchTicket {
            generation: self.generation,
            request,
        }
    }
}

impl Default for ResultsFetcher {
    fn default() -> Self {
        Self::new()
    }
}
