use points_shared::Flight;
use crate::time::format_duration;
use crate::PresentError;

pub fn format_stop_summary(stop_count: u32) -> String {
    match stop_count {
        0 => "Nonstop".to_string(),
        1 => "1 Stop".to_string(),
        n => format!("{} Stops", n),
    }
}

/// Each intermediate layover as `"{duration} in {airport}"`, comma separated,
/// in itinerary order. `None` for nonstop flights.
pub fn format_layover_summary(flight: &Flight) -> Result<Option<String>, PresentError> {
    if flight.stop_count == 0 {
        return Ok(None);
    }

    let parts: Vec<String> = flight
        .layovers()
        .map(|l| format!("{} in {}", format_duration(&l.duration), l.layover_airport))
        .collect();

    if parts.len() != flight.stop_count as usize {
        return Err(PresentError::Inconsistent(format!(
            "{} stop(s) but {} layover(s)",
            flight.stop_count,
            parts.len()
        )));
    }

    Ok(Some(parts.join(", ")))
}
