use chrono::{DateTime, Duration as Span, TimeZone, Utc};
use points_shared::{Duration, Flight, Layover, Segment};

const HUBS: [&str; 4] = ["DEN", "ORD", "DFW", "ATL"];

fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap() + Span::minutes(minutes)
}

/// JFK to LAX with `stops` connections through fixed hubs.
pub fn flight(carrier: &str, cabin: &str, stops: u32) -> Flight {
    let mut airports = vec!["JFK".to_string()];
    airports.extend(HUBS.iter().take(stops as usize).map(|h| h.to_string()));
    airports.push("LAX".to_string());

    let mut segments = Vec::new();
    let mut clock = 0;
    for (i, pair) in airports.windows(2).enumerate() {
        let departure = at(clock);
        let arrival = at(clock + 120);
        clock += 120;
        let layover = if i + 2 < airports.len() {
            let layover = Layover {
                layover_airport: pair[1].clone(),
                destination_airport: "LAX".to_string(),
                start_time: arrival,
                end_time: at(clock + 45),
                duration: Duration::new(0, 0, 45),
            };
            clock += 45;
            Some(layover)
        } else {
            None
        };
        segments.push(Segment {
            origin: pair[0].clone(),
            destination: pair[1].clone(),
            departure_time: departure,
            arrival_time: arrival,
            aircraft_type: "A321".to_string(),
            flight_num: format!("{}{}", carrier, 100 + i),
            flight_time: Duration::new(0, 2, 0),
            layover,
        });
    }

    Flight {
        carrier: carrier.to_string(),
        origin: "JFK".to_string(),
        destination: "LAX".to_string(),
        departure_time: at(0),
        arrival_time: at(clock),
        cabin_class: cabin.to_string(),
        point_cost: 25_000 + stops as i64 * 1_000,
        dollar_cost: 5.60,
        taxes: 0.0,
        value_per_point: None,
        duration: Duration::from_minutes(clock as u64),
        segments,
        stop_count: stops,
        layover_duration: if stops == 1 { Duration::new(0, 0, 45) } else { Duration::default() },
        days_difference: 0,
    }
}

pub fn record(carrier: &str, cabin: &str, stops: u32) -> serde_json::Value {
    serde_json::to_value(flight(carrier, cabin, stops)).unwrap()
}
