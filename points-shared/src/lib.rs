pub mod models;

pub use models::airport::Airport;
pub use models::events::DiagnosticEvent;
pub use models::flight::{Duration, Flight, Layover, Segment};
pub use models::query::SearchQuery;
