use serde::{Deserialize, Serialize};
use points_shared::SearchQuery;
use crate::codec::format_date;

/// Body of `POST {API_BASE}/flight/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightSearchRequest {
    pub origin_code: String,
    pub destination_code: String,
    #[serde(rename = "departureDate")]
    pub departure_date: String,
    #[serde(rename = "returnDate")]
    pub return_date: Option<String>, // null for one-way
}

impl From<&SearchQuery> for FlightSearchRequest {
    fn from(query: &SearchQuery) -> Self {
        Self {
            origin_code: query.origin_code.clone(),
            destination_code: query.destination_code.clone(),
            departure_date: query.departure_date.map(format_date).unwrap_or_default(),
            return_date: query.return_date.map(format_date),
        }
    }
}
