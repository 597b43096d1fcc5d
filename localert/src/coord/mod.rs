//! Geographic coordinate types and great-circle distance.
//!
//! Provides the [`Coordinates`] value type used throughout the library and
//! the [`great_circle_km`] distance primitive the commute tracker evaluates
//! on every position sample.

mod distance;
mod types;

pub use distance::{great_circle_km, EARTH_RADIUS_KM};
pub use types::{CoordError, Coordinates, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};
