use async_trait::async_trait;
use points_shared::Airport;
use crate::search::FlightSearchRequest;
use crate::CoreResult;

/// Remote search endpoint. Returns the raw records so that a single malformed
/// element can be rejected without losing the rest of the response.
#[async_trait]
pub trait FlightSearchClient: Send + Sync {
    async fn search_flights(
        &self,
        request: &FlightSearchRequest,
    ) -> CoreResult<Vec<serde_json::Value>>;
}

/// Remote airport lookup used by the search form.
#[async_trait]
pub trait AirportDirectory: Send + Sync {
    async fn default_origin(&self) -> CoreResult<Airport>;

    /// Callers only invoke this for prefixes of at least three characters.
    async fn predictive_cities(&self, prefix: &str) -> CoreResult<Vec<Airport>>;
}
