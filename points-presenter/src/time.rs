use chrono::{DateTime, Timelike, Utc};
use points_shared::Duration;

/// 12-hour clock from the instant's UTC components, e.g. `"12:05AM"`, `"1:00PM"`.
///
/// The endpoint encodes airport-local wall time as UTC, so no zone conversion
/// is applied here.
pub fn format_clock_time(instant: DateTime<Utc>) -> String {
    let (is_pm, hour) = instant.hour12();
    format!("{}:{:02}{}", hour, instant.minute(), if is_pm { "PM" } else { "AM" })
}

/// `"{hours} hr {minutes} min"`, with whole days folded into the hours.
pub fn format_duration(duration: &Duration) -> String {
    let hours = u64::from(duration.days) * 24 + u64::from(duration.hours);
    format!("{} hr {} min", hours, duration.minutes)
}

/// `"+1"` style marker for arrivals on a later calendar day.
pub fn format_day_offset(days_difference: u32) -> Option<String> {
    (days_difference > 0).then(|| format!("+{}", days_difference))
}
