use serde::{Deserialize, Serialize};
use points_shared::Flight;

/// Ordering applied after filtering. `Recommended` keeps the order the search
/// endpoint ranked the offers in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Recommended,
    FewestPoints,
    LowestCash,
    Shortest,
    EarliestDeparture,
}

/// Stable: ties keep their ranked order.
pub fn sort_indices(flights: &[Flight], indices: &mut [usize], key: SortKey) {
    match key {
        SortKey::Recommended => indices.sort(),
        SortKey::FewestPoints => indices.sort_by_key(|&i| flights[i].point_cost),
        // total_cmp keeps the order total even for a NaN that slipped past decoding
        SortKey::LowestCash => {
            indices.sort_by(|&a, &b| flights[a].dollar_cost.total_cmp(&flights[b].dollar_cost))
        }
        SortKey::Shortest => indices.sort_by_key(|&i| flights[i].duration.total_minutes()),
        SortKey::EarliestDeparture => indices.sort_by_key(|&i| flights[i].departure_time),
    }
}
