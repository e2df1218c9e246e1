pub mod catalog;
pub mod filter;
pub mod seed;
pub mod types;

pub use catalog::PropertyCatalog;
pub use filter::{filter_properties, find_property, matches_filters, matches_search};
pub use seed::sample_properties;
pub use types::{FilterChange, FilterState, TypeFilter};
