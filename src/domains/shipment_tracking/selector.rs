use crate::common::{DomainError, DomainResult};

use super::document::Shipment;
use super::types::Coordinate;

pub const IN_TRANSIT: &str = "in_transit";

/// Whether a shipment's remaining route must be (re)computed.
///
/// Shipments with no recorded history always qualify; shipments with history
/// qualify only while in transit. Only the length of the history matters.
pub fn should_process<T>(completed_route: &[T], status: &str) -> bool {
    should_process_with(completed_route, status, IN_TRANSIT)
}

pub fn should_process_with<T>(completed_route: &[T], status: &str, in_transit: &str) -> bool {
    completed_route.is_empty() || status == in_transit
}

/// Origin and destination extracted from a selected shipment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
}

impl RouteRequest {
    /// Fails with `MissingInput` naming every absent value.
    pub fn from_shipment(shipment: &Shipment) -> DomainResult<Self> {
        let position = shipment.current_position;
        let destination = shipment.destination;

        let values = [
            ("origin latitude", position.and_then(|p| p.latitude)),
            ("origin longitude", position.and_then(|p| p.longitude)),
            ("destination latitude", destination.and_then(|d| d.latitude)),
            ("destination longitude", destination.and_then(|d| d.longitude)),
        ];
        if let [(_, Some(olat)), (_, Some(olon)), (_, Some(dlat)), (_, Some(dlon))] = values {
            return Ok(Self {
                origin: Coordinate::new(olon, olat),
                destination: Coordinate::new(dlon, dlat),
            });
        }

        let missing: Vec<&str> = values
            .iter()
            .filter(|(_, v)| v.is_none())
            .map(|(name, _)| *name)
            .collect();
        Err(DomainError::MissingInput {
            shipment_id: shipment.display_id().to_string(),
            missing: missing.join(", "),
        })
    }
}
