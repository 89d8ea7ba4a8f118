use std::fs;
use std::path::Path;

use crate::common::{DomainError, DomainResult};
use crate::domains::shipment_tracking::document::TrackingDocument;
use crate::domains::shipment_tracking::ports::ShipmentStore;

/// Reads and overwrites the tracking document on the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FilesystemShipmentStore;

impl FilesystemShipmentStore {
    pub fn new() -> Self {
        Self
    }
}

impl ShipmentStore for FilesystemShipmentStore {
    fn load(&self, path: &Path) -> DomainResult<TrackingDocument> {
        if !path.exists() {
            return Err(DomainError::InfrastructureError(format!(
                "File not found: {}",
                path.display()
            )));
        }
        let s = fs::read_to_string(path)
            .map_err(|e| DomainError::InfrastructureError(format!("{}: {}", path.display(), e)))?;
        let document: TrackingDocument = serde_json::from_str(&s)?;
        Ok(document)
    }

    fn save(&self, path: &Path, document: &TrackingDocument) -> DomainResult<()> {
        let s = serde_json::to_string_pretty(document)?;
        fs::write(path, s)
            .map_err(|e| DomainError::InfrastructureError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }
}
