pub mod time;
pub mod money;
pub mod summary;
pub mod card;

pub use time::{format_clock_time, format_day_offset, format_duration};
pub use money::{format_money, format_points, format_value_per_point};
pub use summary::{format_layover_summary, format_stop_summary};
pub use card::{render, render_all, FlightCard, RenderedItem, SegmentLine};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PresentError {
    #[error("Missing field: {0}")]
    MissingField(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),
    #[error("Inconsistent itinerary: {0}")]
    Inconsistent(String),
}
