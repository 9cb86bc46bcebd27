use serde::Serialize;
use points_shared::{Flight, Segment};

use crate::money::{format_money, format_points, format_value_per_point};
use crate::summary::{format_layover_summary, format_stop_summary};
use crate::time::{format_clock_time, format_day_offset, format_duration};
use crate::PresentError;

/// Display strings for one result row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightCard {
    pub carrier: String,
    pub route: String,
    pub cabin_class: String,
    pub departs: String,
    pub arrives: String,
    pub day_offset: Option<String>,
    pub duration: String,
    pub stops: String,
    pub layovers: Option<String>,
    pub points: String,
    pub cash: String,
    pub value_per_point: Option<String>,
    pub segments: Vec<SegmentLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentLine {
    pub flight_num: String,
    pub route: String,
    pub departs: String,
    pub arrives: String,
    pub aircraft_type: String,
    pub flight_time: String,
    pub layover: Option<String>,
}

/// One entry of a rendered page. A flight that cannot be formatted becomes an
/// `Unavailable` entry instead of failing the whole page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderedItem {
    Flight(FlightCard),
    Unavailable { position: usize, reason: String },
}

pub fn render(flight: &Flight) -> Result<FlightCard, PresentError> {
    require("carrier", &flight.carrier)?;
    require("origin", &flight.origin)?;
    require("destination", &flight.destination)?;
    if flight.segments.is_empty() {
        return Err(PresentError::MissingField("segments".into()));
    }

    Ok(FlightCard {
        carrier: flight.carrier.clone(),
        route: format!("{} – {}", flight.origin, flight.destination),
        cabin_class: flight.cabin_class.clone(),
        departs: format_clock_time(flight.departure_time),
        arrives: format_clock_time(flight.arrival_time),
        day_offset: format_day_offset(flight.days_difference),
        duration: format_duration(&flight.duration),
        stops: format_stop_summary(flight.stop_count),
        layovers: format_layover_summary(flight)?,
        points: format_points(flight.point_cost),
        cash: format_money(flight.dollar_cost)?,
        value_per_point: flight.value_per_point.and_then(format_value_per_point),
        segments: flight.segments.iter().map(segment_line).collect(),
    })
}

pub fn render_all<'a, I>(flights: I) -> Vec<RenderedItem>
where
    I: IntoIterator<Item = &'a Flight>,
{
    flights
        .into_iter()
        .enumerate()
        .map(|(position, flight)| match render(flight) {
            Ok(card) => RenderedItem::Flight(card),
            Err(e) => RenderedItem::Unavailable {
                position,
                reason: e.to_string(),
            },
        })
        .collect()
}

fn segment_line(segment: &Segment) -> SegmentLine {
    SegmentLine {
        flight_num: segment.flight_num.clone(),
        route: format!("{} – {}", segment.origin, segment.destination),
        departs: format_clock_time(segment.departure_time),
        arrives: format_clock_time(segment.arrival_time),
        aircraft_type: segment.aircraft_type.clone(),
        flight_time: format_duration(&segment.flight_time),
        layover: segment.layover.as_ref().map(|l| {
            format!("{} layover in {}", format_duration(&l.duration), l.layover_airport)
        }),
    }
}

fn require(name: &str, value: &str) -> Result<(), PresentError> {
    if value.trim().is_empty() {
        return Err(PresentError::MissingField(name.to_string()));
    }
    Ok(())
}
