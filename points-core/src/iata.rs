use points_shared::Airport;

/// Lookups below this length go to the static list only.
pub const MIN_REMOTE_PREFIX: usize = 3;

const MAX_SUGGESTIONS: usize = 5;

// Busiest US gateways plus the common long-haul destinations.
const STATIC_AIRPORTS: &[(&str, &str, &str)] = &[
    ("ATL", "Atlanta", "GA"),
    ("BOS", "Boston", "MA"),
    ("CDG", "Paris", "France"),
    ("DEN", "Denver", "CO"),
    ("DFW", "Dallas", "TX"),
    ("EWR", "Newark", "NJ"),
    ("HNL", "Honolulu", "HI"),
    ("IAH", "Houston", "TX"),
    ("JFK", "New York", "NY"),
    ("LAS", "Las Vegas", "NV"),
    ("LAX", "Los Angeles", "CA"),
    ("LGA", "New York", "NY"),
    ("LHR", "London", "United Kingdom"),
    ("MCO", "Orlando", "FL"),
    ("MIA", "Miami", "FL"),
    ("NRT", "Tokyo", "Japan"),
    ("ORD", "Chicago", "IL"),
    ("PHX", "Phoenix", "AZ"),
    ("SEA", "Seattle", "WA"),
    ("SFO", "San Francisco", "CA"),
];

/// Trims and upper-cases a three-letter code. Anything else is rejected.
pub fn normalize_code(raw: &str) -> Option<String> {
    let code = raw.trim();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(code.to_ascii_uppercase())
    } else {
        None
    }
}

/// Matches the prefix against airport codes first, then city names.
pub fn lookup_static(prefix: &str) -> Vec<Airport> {
    let needle = prefix.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let by_code = STATIC_AIRPORTS
        .iter()
        .filter(|(code, _, _)| code.to_lowercase().starts_with(&needle));
    let by_city = STATIC_AIRPORTS.iter().filter(|(code, city, _)| {
        city.to_lowercase().starts_with(&needle) && !code.to_lowercase().starts_with(&needle)
    });

    by_code
        .chain(by_city)
        .take(MAX_SUGGESTIONS)
        .map(|(code, city, region)| Airport::new(code, city, region))
        .collect()
}
