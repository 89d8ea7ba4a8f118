use super::types::LatLon;

/// Mean earth radius (IUGG) in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Great-circle distance collaborator used by the nearest-point search.
///
/// Implementations must be symmetric, non-negative and return zero exactly
/// for coincident points.
pub trait DistanceMetric: Send + Sync {
    fn distance_km(&self, a: LatLon, b: LatLon) -> f64;
}

impl<F> DistanceMetric for F
where
    F: Fn(LatLon, LatLon) -> f64 + Send + Sync,
{
    fn distance_km(&self, a: LatLon, b: LatLon) -> f64 {
        self(a, b)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Haversine;

impl DistanceMetric for Haversine {
    fn distance_km(&self, a: LatLon, b: LatLon) -> f64 {
        haversine_km(a, b)
    }
}

pub fn haversine_km(a: LatLon, b: LatLon) -> f64 {
    let LatLon(lat1, lon1) = a;
    let LatLon(lat2, lon2) = b;
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let h = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    // clamp guards against h creeping past 1.0 for antipodal points
    2.0 * EARTH_RADIUS_KM * h.min(1.0).sqrt().asin()
}
