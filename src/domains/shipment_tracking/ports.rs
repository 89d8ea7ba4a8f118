use std::path::Path;

use crate::common::DomainResult;

use super::document::TrackingDocument;
use super::types::{Coordinate, GeneratedRoute};

/// Port for the sea-route pathfinder. The domain treats it as opaque.
pub trait RouteGenerator: Send + Sync {
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        include_ports: bool,
    ) -> DomainResult<GeneratedRoute>;
}

/// Port for loading and persisting the tracking document.
pub trait ShipmentStore: Send + Sync {
    fn load(&self, path: &Path) -> DomainResult<TrackingDocument>;
    /// Overwrites `path` with the pretty-printed document.
    fn save(&self, path: &Path, document: &TrackingDocument) -> DomainResult<()>;
}
