//! Great-circle distance via the haversine formula.

use super::types::Coordinates;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates in kilometers.
///
/// Haversine formula on a spherical Earth of radius [`EARTH_RADIUS_KM`].
/// Pure and deterministic: identical points return exactly 0.
///
/// The intermediate value is clamped to [0, 1] before the square roots so
/// that floating-point overshoot near antipodal points cannot produce NaN.
pub fn great_circle_km(a: Coordinates, b: Coordinates) -> f64 {
    if a == b {
        return 0.0;
    }

    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}
