use serde::Serialize;
use uuid::Uuid;
use points_core::integrity::decode_flight;
use points_core::{codec, CoreResult};
use points_shared::{Flight, SearchQuery};

use crate::facets::Facets;
use crate::fetcher::{FetchState, FetchTicket, ResultsFetcher, Settlement};
use crate::filter::{matching_indices, FilterCriteria};
use crate::paginate::Paginator;
use crate::sort::{sort_indices, SortKey};

/// Discrete inputs to a results view. Every derived value is recomputed from
/// these and nothing else.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    QueryDecoded(SearchQuery),
    FiltersChanged(FilterCriteria),
    SortChanged(SortKey),
    PageRequested(usize),
}

/// A response element that failed to decode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub index: usize,
    pub reason: String,
}

/// What happened when a fetch outcome was handed back to the view.
#[derive(Debug, Default)]
pub struct SettleReport {
    pub applied: bool,
    pub stale_generation: Option<u64>,
    pub follow_up: Option<FetchTicket>,
    pub error: Option<String>,
    pub accepted: usize,
    pub rejected: Vec<Rejection>,
}

/// State of one mounted results page: the raw collection from its single
/// fetch plus the transient facet, sort and page selections.
#[derive(Debug)]
pub struct ResultsView {
    id: Uuid,
    query: SearchQuery,
    fetcher: ResultsFetcher,
    raw: Vec<Flight>,
    facets: Facets,
    criteria: FilterCriteria,
    sort: SortKey,
    visible: Vec<usize>,
    page: usize,
    paginator: Paginator,
}

impl ResultsView {
    pub fn new() -> Self {
        Self::with_paginator(Paginator::default())
    }

    pub fn with_paginator(paginator: Paginator) -> Self {
        Self {
            id: Uuid::new_v4(),
            query: SearchQuery::default(),
            fetcher: ResultsFetcher::new(),
            raw: Vec::new(),
            facets: Facets::default(),
            criteria: FilterCriteria::default(),
            sort: SortKey::default(),
            visible: Vec::new(),
            page: 1,
            paginator,
        }
    }

    /// Builds a view from the results-page query string.
    pub fn from_query_string(raw: &str) -> (Self, Option<FetchTicket>) {
        let mut view = Self::new();
        let ticket = view.dispatch(ViewEvent::QueryDecoded(codec::decode(raw)));
        (view, ticket)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn encoded_query(&self) -> String {
        codec::encode(&self.query)
    }

    pub fn loading(&self) -> bool {
        self.fetcher.loading()
    }

    pub fn fetch_state(&self) -> FetchState {
        self.fetcher.state()
    }

    pub fn raw(&self) -> &[Flight] {
        &self.raw
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn paginator(&self) -> Paginator {
        self.paginator
    }

    /// Flights passing the active filters, in display order.
    pub fn filtered(&self) -> Vec<&Flight> {
        self.visible.iter().map(|&i| &self.raw[i]).collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.visible.len()
    }

    pub fn page_count(&self) -> usize {
        self.paginator.page_count(self.visible.len())
    }

    pub fn current_page(&self) -> Vec<&Flight> {
        self.paginator
            .slice(&self.visible, self.page)
            .iter()
            .map(|&i| &self.raw[i])
            .collect()
    }

    /// True when there is nothing to show on the current page and no request
    /// is outstanding.
    pub fn is_empty_state(&self) -> bool {
        !self.loading() && self.paginator.slice(&self.visible, self.page).is_empty()
    }

    /// Applies a UI event. Returns a ticket when the event requires a request.
    pub fn dispatch(&mut self, event: ViewEvent) -> Option<FetchTicket> {
        match event {
            ViewEvent::QueryDecoded(query) => {
                let ticket = self.fetcher.trigger(&query);
                if query != self.query {
                    self.query = query;
                    self.replace_raw(Vec::new());
                }
                ticket
            }
            ViewEvent::FiltersChanged(criteria) => {
                if criteria != self.criteria {
                    self.criteria = criteria;
                    self.recompute();
                }
                None
            }
            ViewEvent::SortChanged(sort) => {
                if sort != self.sort {
                    self.sort = sort;
                    self.recompute();
                }
                None
            }
            ViewEvent::PageRequested(page) => {
                self.page = page;
                None
            }
        }
    }

    /// Hands a finished request back. Failures leave the raw collection as it
    /// was; stale outcomes are dropped untouched.
    pub fn settle(
        &mut self,
        ticket: &FetchTicket,
        outcome: CoreResult<Vec<serde_json::Value>>,
    ) -> SettleReport {
        match self.fetcher.settle(ticket) {
            Settlement::Stale { follow_up } => SettleReport {
                stale_generation: Some(ticket.generation),
                follow_up,
                ..Default::default()
            },
            Settlement::Current => match outcome {
                Ok(records) => {
                    let mut flights = Vec::with_capacity(records.len());
                    let mut rejected = Vec::new();
                    for (index, record) in records.into_iter().enumerate() {
                        match decode_flight(record) {
                            Ok(flight) => flights.push(flight),
                            Err(e) => rejected.push(Rejection {
                                index,
                                reason: e.to_string(),
                            }),
                        }
                    }
                    let accepted = flights.len();
                    self.replace_raw(flights);
                    SettleReport {
                        applied: true,
                        accepted,
                        rejected,
                        ..Default::default()
                    }
                }
                Err(e) => SettleReport {
                    error: Some(e.to_string()),
                    ..Default::default()
                },
            },
        }
    }

    /// Facet selections refer to the old collection's values, so they go too.
    fn replace_raw(&mut self, flights: Vec<Flight>) {
        self.raw = flights;
        self.facets = Facets::index(&self.raw);
        self.criteria = FilterCriteria::default();
        self.recompute();
    }

    fn recompute(&mut self) {
        let mut visible = matching_indices(&self.raw, &self.criteria);
        sort_indices(&self.raw, &mut visible, self.sort);
        self.visible = visible;
        self.page = 1;
    }
}

impl Default for ResultsView {
    fn default() -> Self {
        Self::new()
    }
}
