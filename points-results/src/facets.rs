use std::collections::BTreeSet;
use serde::Serialize;
use points_shared::Flight;

/// Distinct values of one field across the collection, sorted, duplicates removed.
pub fn distinct_values<F>(flights: &[Flight], selector: F) -> BTreeSet<String>
where
    F: Fn(&Flight) -> &str,
{
    flights
        .iter()
        .map(|f| selector(f))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Filter options offered for the current raw collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub carriers: Vec<String>,
    pub cabin_classes: Vec<String>,
}

impl Facets {
    pub fn index(flights: &[Flight]) -> Self {
        Self {
            carriers: distinct_values(flights, |f| f.carrier.as_str()).into_iter().collect(),
            cabin_classes: distinct_values(flights, |f| f.cabin_class.as_str()).into_iter().collect(),
        }
    }
}
