use serde::{Deserialize, Serialize};

/// Display record returned by the airport lookup endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub airport_code: String,
    pub city_name: String,
    pub region: String,
}

impl Airport {
    pub fn new(code: &str, city: &str, region: &str) -> Self {
        Self {
            airport_code: code.to_string(),
            city_name: city.to_string(),
            region: region.to_string(),
        }
    }

    /// "New York, NY (JFK)"
    pub fn label(&self) -> String {
        format!("{}, {} ({})", self.city_name, self.region, self.airport_code)
    }
}
