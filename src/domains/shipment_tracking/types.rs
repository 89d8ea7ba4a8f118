use serde::{Deserialize, Serialize};

/// A point in decimal degrees.
///
/// The route generator speaks `[lon, lat]` pairs while persisted records use
/// `{latitude, longitude}` objects; both convert through this type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinate {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude }
    }

    pub fn from_lon_lat(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }

    pub fn to_lon_lat(self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    /// Ordering expected by the distance collaborator.
    pub fn to_lat_lon(self) -> LatLon {
        LatLon(self.latitude, self.longitude)
    }

    /// Planar interpolation in degree space, `t` in `[0, 1]`.
    pub fn lerp(self, other: Coordinate, t: f64) -> Coordinate {
        Coordinate {
            longitude: self.longitude + t * (other.longitude - self.longitude),
            latitude: self.latitude + t * (other.latitude - self.latitude),
        }
    }
}

/// `(latitude, longitude)` in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedRoute {
    pub coordinates: Vec<Coordinate>,
    pub length: f64,
    pub duration_hours: f64,
    pub units: String,
}

impl GeneratedRoute {
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}
