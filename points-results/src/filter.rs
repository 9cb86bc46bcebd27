use serde::{Deserialize, Serialize};
use points_shared::Flight;

/// Active facet selections. Empty lists and `None` mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub carriers: Vec<String>,
    #[serde(default)]
    pub cabin_classes: Vec<String>,
    /// Inclusive upper bound: `Some(1)` keeps nonstop and one-stop itineraries.
    #[serde(default)]
    pub max_stops: Option<u32>,
}

impl FilterCriteria {
    pub fn carrier(carrier: &str) -> Self {
        Self {
            carriers: vec![carrier.to_string()],
            ..Default::default()
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.predicates().is_empty()
    }

    fn predicates(&self) -> Vec<Predicate<'_>> {
        let mut predicates = Vec::new();
        let carriers = non_empty(&self.carriers);
        if !carriers.is_empty() {
            predicates.push(Predicate::Carrier(carriers));
        }
        let cabins = non_empty(&self.cabin_classes);
        if !cabins.is_empty() {
            predicates.push(Predicate::CabinClass(cabins));
        }
        if let Some(max) = self.max_stops {
            predicates.push(Predicate::MaxStops(max));
        }
        predicates
    }
}

fn non_empty(values: &[String]) -> Vec<&str> {
    values.iter().map(String::as_str).filter(|v| !v.is_empty()).collect()
}

#[derive(Debug)]
enum Predicate<'a> {
    /// Substring match; carrier codes from the endpoint may be partial or joined.
    Carrier(Vec<&'a str>),
    CabinClass(Vec<&'a str>),
    MaxStops(u32),
}

impl Predicate<'_> {
    fn matches(&self, flight: &Flight) -> bool {
        match self {
            Predicate::Carrier(any) => any.iter().any(|c| flight.carrier.contains(c)),
            Predicate::CabinClass(any) => any.iter().any(|c| flight.cabin_class.contains(c)),
            Predicate::MaxStops(max) => flight.stop_count <= *max,
        }
    }
}

/// Indices of the flights passing every active predicate, in collection order.
pub fn matching_indices(flights: &[Flight], criteria: &FilterCriteria) -> Vec<usize> {
    let predicates = criteria.predicates();
    flights
        .iter()
        .enumerate()
        .filter(|(_, f)| predicates.iter().all(|p| p.matches(f)))
        .map(|(i, _)| i)
        .collect()
}

pub fn apply<'a>(flights: &'a [Flight], criteria: &FilterCriteria) -> Vec<&'a Flight> {
    matching_indices(flights, criteria)
        .into_iter()
        .map(|i| &flights[i])
        .collect()
}
