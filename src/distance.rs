//! Great-circle distance on a spherical Earth (haversine).
//!
//! Accuracy is within ~0.5% of the ellipsoidal distance, which is plenty
//! for ranking hospitals inside a 20 km radius.

use crate::geo::Coordinate;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates, in kilometers.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    // h can drift a hair past 1.0 for antipodal points
    2.0 * EARTH_RADIUS_KM * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Round a distance to 2 decimal places, the precision reported to callers.
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}
