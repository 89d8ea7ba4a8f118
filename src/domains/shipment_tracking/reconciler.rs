use crate::common::{DomainError, DomainResult};

use super::geodesy::{DistanceMetric, Haversine};
use super::selector::IN_TRANSIT;
use super::types::Coordinate;

pub const DEFAULT_INTERPOLATION_POINTS: usize = 10;

/// How the remaining route was derived from the generated one.
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileMode {
    /// Generated route used as-is.
    FullRoute,
    /// Live position spliced onto the first generated leg through the
    /// nearest interpolated point.
    Connected {
        nearest_index: usize,
        nearest_distance_km: f64,
    },
    /// Generated route too short to interpolate; live position prepended.
    ShortRouteFallback {
        nearest_index: usize,
        nearest_distance_km: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub route: Vec<Coordinate>,
    pub mode: ReconcileMode,
}

/// Points strictly between `p0` and `p1` at `t = i / (count + 1)`.
pub fn interpolate_segment(p0: Coordinate, p1: Coordinate, count: usize) -> Vec<Coordinate> {
    let denom = (count + 1) as f64;
    (1..=count)
        .map(|i| p0.lerp(p1, i as f64 / denom))
        .collect()
}

/// Index and distance of the candidate nearest to `target`.
///
/// The first minimum wins, so equidistant candidates resolve to the lowest
/// index. Returns `None` for an empty slice.
pub fn find_nearest<M: DistanceMetric + ?Sized>(
    target: Coordinate,
    candidates: &[Coordinate],
    metric: &M,
) -> Option<(usize, f64)> {
    let target = target.to_lat_lon();
    let mut best: Option<(usize, f64)> = None;
    for (i, c) in candidates.iter().enumerate() {
        let d = metric.distance_km(target, c.to_lat_lon());
        let closer = match best {
            Some((_, best_d)) => d < best_d,
            None => true,
        };
        if closer {
            best = Some((i, d));
        }
    }
    best
}

pub struct Reconciler<M: DistanceMetric = Haversine> {
    interpolation_points: usize,
    in_transit_status: String,
    metric: M,
}

impl Default for Reconciler<Haversine> {
    fn default() -> Self {
        Self::new(Haversine)
    }
}

impl<M: DistanceMetric> Reconciler<M> {
    pub fn new(metric: M) -> Self {
        Self {
            interpolation_points: DEFAULT_INTERPOLATION_POINTS,
            in_transit_status: IN_TRANSIT.to_string(),
            metric,
        }
    }

    pub fn with_interpolation_points(mut self, count: usize) -> DomainResult<Self> {
        if count == 0 {
            return Err(DomainError::InvalidCommand {
                reason: "interpolation_points must be at least 1".to_string(),
            });
        }
        self.interpolation_points = count;
        Ok(self)
    }

    pub fn with_in_transit_status(mut self, status: impl Into<String>) -> Self {
        self.in_transit_status = status.into();
        self
    }

    pub fn interpolation_points(&self) -> usize {
        self.interpolation_points
    }

    pub fn in_transit_status(&self) -> &str {
        &self.in_transit_status
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Derive the route the vessel still has to travel.
    pub fn reconcile<T>(
        &self,
        current: Coordinate,
        generated: &[Coordinate],
        completed_route: &[T],
        status: &str,
    ) -> DomainResult<Reconciliation> {
        if completed_route.is_empty() || status != self.in_transit_status {
            return Ok(Reconciliation {
                route: generated.to_vec(),
                mode: ReconcileMode::FullRoute,
            });
        }

        if generated.len() < 2 {
            let (nearest_index, nearest_distance_km) = find_nearest(current, generated, &self.metric)
                .ok_or_else(|| DomainError::Reconciliation {
                    reason: "generated route has no points".to_string(),
                })?;
            let mut route = Vec::with_capacity(generated.len() + 1);
            route.push(current);
            route.extend_from_slice(generated);
            return Ok(Reconciliation {
                route,
                mode: ReconcileMode::ShortRouteFallback {
                    nearest_index,
                    nearest_distance_km,
                },
            });
        }

        // Only the first leg is searched; later legs are never considered.
        let dense = interpolate_segment(generated[0], generated[1], self.interpolation_points);
        let (nearest_index, nearest_distance_km) = find_nearest(current, &dense, &self.metric)
            .ok_or_else(|| DomainError::Reconciliation {
                reason: "no interpolated points to search".to_string(),
            })?;

        let mut route = Vec::with_capacity(generated.len() + 1);
        route.push(current);
        route.push(dense[nearest_index]);
        route.extend_from_slice(&generated[1..]);

        Ok(Reconciliation {
            route,
            mode: ReconcileMode::Connected {
                nearest_index,
                nearest_distance_km,
            },
        })
    }
}
