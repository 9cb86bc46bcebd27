use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Elapsed time as reported by the search endpoint. Never an absolute time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duration {
    #[serde(default)]
    pub days: u32,
    #[serde(default)]
    pub hours: u32,
    #[serde(default)]
    pub minutes: u32,
}

impl Duration {
    pub fn new(days: u32, hours: u32, minutes: u32) -> Self {
        Self { days, hours, minutes }
    }

    /// Normalizes a minute count into days/hours/minutes.
    pub fn from_minutes(total: u64) -> Self {
        let days = total / (24 * 60);
        let rem = total % (24 * 60);
        Self {
            days: days as u32,
            hours: (rem / 60) as u32,
            minutes: (rem % 60) as u32,
        }
    }

    /// Elapsed time between two instants; `None` if `end` precedes `start`.
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        let minutes = (end - start).num_minutes();
        if minutes < 0 {
            return None;
        }
        Some(Self::from_minutes(minutes as u64))
    }

    pub fn total_minutes(&self) -> u64 {
        self.days as u64 * 24 * 60 + self.hours as u64 * 60 + self.minutes as u64
    }
}

/// Connection gap attached to every segment except the last one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layover {
    pub layover_airport: String,
    pub destination_airport: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration: Duration,
}

/// One flown leg of an itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub origin: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub aircraft_type: String,
    pub flight_num: String,
    pub flight_time: Duration,
    #[serde(default)]
    pub layover: Option<Layover>,
}

/// A single award offer returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub carrier: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub cabin_class: String,
    pub point_cost: i64,
    /// Cash co-pay on top of the points. Older endpoint revisions send it as a string.
    #[serde(deserialize_with = "decimal")]
    pub dollar_cost: f64,
    #[serde(default, deserialize_with = "decimal")]
    pub taxes: f64,
    /// Cents of value per point, when the endpoint computed it.
    #[serde(default)]
    pub value_per_point: Option<f64>,
    pub duration: Duration,
    pub segments: Vec<Segment>,
    pub stop_count: u32,
    #[serde(default)]
    pub layover_duration: Duration,
    #[serde(default)]
    pub days_difference: u32,
}

impl Flight {
    /// Layovers in itinerary order, one per intermediate stop.
    pub fn layovers(&self) -> impl Iterator<Item = &Layover> {
        self.segments.iter().filter_map(|s| s.layover.as_ref())
    }

    pub fn is_nonstop(&self) -> bool {
        self.stop_count == 0
    }
}

fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => {
            let cleaned: String = s.chars().filter(|c| !matches!(c, '$' | ',' | ' ')).collect();
            cleaned.parse::<f64>().map_err(serde::de::Error::custom)
        }
    }
}
