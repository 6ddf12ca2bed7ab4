//! Nearby-hospital search.
//!
//! Queries Nominatim inside a bounding box, ranks hits by great-circle
//! distance, and falls back to a built-in set when nothing usable comes back.

pub mod providers;
pub mod resolver;
pub mod types;

pub use providers::builtin_facilities;
pub use resolver::GeoSearchResolver;
pub use types::{Coordinate, CoordinateError, Facility, FacilitySearch, FacilitySource};
