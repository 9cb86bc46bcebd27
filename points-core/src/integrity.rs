use points_shared::{Duration, Flight};
use crate::{CoreError, CoreResult};

/// Decodes one element of the search response and checks the structural
/// invariants the rest of the pipeline relies on.
pub fn decode_flight(record: serde_json::Value) -> CoreResult<Flight> {
    let flight: Flight = serde_json::from_value(record)
        .map_err(|e| CoreError::MalformedRecord(e.to_string()))?;
    check_flight(&flight)?;
    Ok(flight)
}

pub fn check_flight(flight: &Flight) -> CoreResult<()> {
    for (name, amount) in [("dollar_cost", flight.dollar_cost), ("taxes", flight.taxes)] {
        if !amount.is_finite() {
            return Err(CoreError::MalformedRecord(format!("{} is not a finite amount", name)));
        }
    }

    if flight.segments.is_empty() {
        return Err(CoreError::MalformedRecord("flight has no segments".into()));
    }

    let expected_stops = flight.segments.len() - 1;
    if flight.stop_count as usize != expected_stops {
        return Err(CoreError::MalformedRecord(format!(
            "stop_count {} does not match {} segment(s)",
            flight.stop_count,
            flight.segments.len()
        )));
    }

    for (i, pair) in flight.segments.windows(2).enumerate() {
        let layover = pair[0].layover.as_ref().ok_or_else(|| {
            CoreError::MalformedRecord(format!("segment {} is missing its layover", i))
        })?;
        if layover.layover_airport != pair[1].origin {
            return Err(CoreError::MalformedRecord(format!(
                "layover airport {} does not match next origin {}",
                layover.layover_airport, pair[1].origin
            )));
        }
    }

    if flight.segments.last().is_some_and(|s| s.layover.is_some()) {
        return Err(CoreError::MalformedRecord("final segment carries a layover".into()));
    }

    for (i, segment) in flight.segments.iter().enumerate() {
        let elapsed = Duration::between(segment.departure_time, segment.arrival_time)
            .ok_or_else(|| {
                CoreError::MalformedRecord(format!("segment {} arrives before it departs", i))
            })?;
        if elapsed.total_minutes() != segment.flight_time.total_minutes() {
            return Err(CoreError::MalformedRecord(format!(
                "segment {} flight_time is {} min but its schedule spans {} min",
                i,
                segment.flight_time.total_minutes(),
                elapsed.total_minutes()
            )));
        }
    }

    Ok(())
}
