use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A decoded results-page search. Fields are left empty rather than rejected;
/// completeness is checked by the search form before a query is ever encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchQuery {
    pub origin_code: String,
    pub destination_code: String,
    #[serde(rename = "departureDate")]
    pub departure_date: Option<NaiveDate>,
    /// `None` for one-way trips.
    #[serde(rename = "returnDate")]
    pub return_date: Option<NaiveDate>,
}

impl SearchQuery {
    pub fn one_way(origin: &str, destination: &str, departure: NaiveDate) -> Self {
        Self {
            origin_code: origin.to_string(),
            destination_code: destination.to_string(),
            departure_date: Some(departure),
            return_date: None,
        }
    }

    pub fn round_trip(origin: &str, destination: &str, departure: NaiveDate, ret: NaiveDate) -> Self {
        Self {
            return_date: Some(ret),
            ..Self::one_way(origin, destination, departure)
        }
    }

    pub fn is_one_way(&self) -> bool {
        self.return_date.is_none()
    }
}
