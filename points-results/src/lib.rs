pub mod facets;
pub mod filter;
pub mod sort;
pub mod paginate;
pub mod fetcher;
pub mod view;
pub mod driver;
pub mod diagnostics;
pub mod registry;

#[cfg(test)]
pub(crate) mod fixtures;

pub use facets::Facets;
pub use filter::FilterCriteria;
pub use sort::SortKey;
pub use paginate::{Paginator, PAGE_SIZE};
pub use fetcher::{FetchState, FetchTicket, ResultsFetcher};
pub use view::{ResultsView, ViewEvent};
pub use diagnostics::Diagnostics;
pub use registry::ViewRegistry;
