// Route Update Service - one synchronous pass over the tracking document
use std::path::Path;
use std::sync::Arc;

use crate::common::{ApplicationError, ApplicationResult, DomainError, DomainResult};
use crate::domains::logger::{DynLogger, Stage, StageEvent};
use crate::domains::shipment_tracking::{
    set_remaining_route, should_process_with, Coordinate, DistanceMetric, Haversine, ReconcileMode,
    Reconciler, RouteGenerator, RouteRequest, Shipment, ShipmentStore, TrackingDocument,
};
use serde_json::Value;

/// Counters for a single run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub examined: usize,
    pub selected: usize,
    pub updated: usize,
    pub skipped: usize,
    pub missing_input: usize,
    pub failed: usize,
    pub written: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Skipped,
    MissingInput,
    Updated,
    Failed,
    /// Record could not be read; never reached selection.
    Rejected,
}

pub struct RouteUpdateService<M: DistanceMetric = Haversine> {
    generator: Arc<dyn RouteGenerator>,
    reconciler: Reconciler<M>,
    logger: DynLogger,
}

impl RouteUpdateService<Haversine> {
    pub fn with_defaults(generator: Arc<dyn RouteGenerator>, logger: DynLogger) -> Self {
        Self::new(generator, Reconciler::default(), logger)
    }
}

impl<M: DistanceMetric> RouteUpdateService<M> {
    pub fn new(generator: Arc<dyn RouteGenerator>, reconciler: Reconciler<M>, logger: DynLogger) -> Self {
        Self { generator, reconciler, logger }
    }

    /// Load the document, update it in memory and write it back if anything changed.
    pub fn run(&self, store: &dyn ShipmentStore, path: &Path) -> ApplicationResult<RunSummary> {
        let mut document = store
            .load(path)
            .map_err(|e| ApplicationError::DocumentStore(e.to_string()))?;

        let mut summary = self.update_document(&mut document);

        if summary.updated > 0 {
            store
                .save(path, &document)
                .map_err(|e| ApplicationError::DocumentStore(e.to_string()))?;
            summary.written = true;
            self.logger.info(&format!("Updated {}", path.display()));
        } else {
            self.logger.info("No shipments required a route update");
        }
        Ok(summary)
    }

    pub fn update_document(&self, document: &mut TrackingDocument) -> RunSummary {
        let mut summary = RunSummary::default();
        for (index, record) in document.shipments_mut().iter_mut().enumerate() {
            summary.examined += 1;
            match self.process_shipment(index, record) {
                Outcome::Skipped => summary.skipped += 1,
                Outcome::MissingInput => {
                    summary.selected += 1;
                    summary.missing_input += 1;
                }
                Outcome::Updated => {
                    summary.selected += 1;
                    summary.updated += 1;
                }
                Outcome::Failed => {
                    summary.selected += 1;
                    summary.failed += 1;
                }
                Outcome::Rejected => summary.failed += 1,
            }
        }
        self.logger.info(&format!(
            "Run complete: examined={} selected={} updated={} skipped={} missing_input={} failed={}",
            summary.examined,
            summary.selected,
            summary.updated,
            summary.skipped,
            summary.missing_input,
            summary.failed
        ));
        summary
    }

    fn process_shipment(&self, index: usize, record: &mut Value) -> Outcome {
        let shipment = match Shipment::from_value(record) {
            Ok(s) => s,
            Err(e) => {
                let id = match &e {
                    DomainError::MalformedShipment { shipment_id, .. } if shipment_id != "<unknown>" => {
                        shipment_id.clone()
                    }
                    _ => format!("#{}", index),
                };
                self.emit(&id, Stage::Failed, e.to_string());
                return Outcome::Rejected;
            }
        };
        let id = shipment.display_id().to_string();
        let status = shipment.status().to_string();
        let completed_points = shipment.completed_route().len();

        if !should_process_with(shipment.completed_route(), &status, self.reconciler.in_transit_status()) {
            self.emit(&id, Stage::Skipped, format!("status={} completed_points={}", status, completed_points));
            return Outcome::Skipped;
        }

        let request = match RouteRequest::from_shipment(&shipment) {
            Ok(r) => r,
            Err(DomainError::MissingInput { missing, .. }) => {
                self.emit(&id, Stage::MissingInput, format!("missing={}", missing));
                return Outcome::MissingInput;
            }
            Err(e) => {
                self.emit(&id, Stage::Failed, e.to_string());
                return Outcome::Failed;
            }
        };

        self.emit(
            &id,
            Stage::Selected,
            format!(
                "status={} completed_points={} origin={} destination={}",
                status,
                completed_points,
                fmt_coord(request.origin),
                fmt_coord(request.destination)
            ),
        );

        let updated = self
            .remaining_route(&id, &shipment, request)
            .and_then(|route| set_remaining_route(record, &route).map(|_| route.len()));
        match updated {
            Ok(points) => {
                self.emit(&id, Stage::Updated, format!("points={}", points));
                Outcome::Updated
            }
            Err(e) => {
                self.emit(&id, Stage::Failed, e.to_string());
                Outcome::Failed
            }
        }
    }

    fn remaining_route(&self, id: &str, shipment: &Shipment, request: RouteRequest) -> DomainResult<Vec<Coordinate>> {
        let generated = self.generator.route(request.origin, request.destination, false)?;
        if generated.is_empty() {
            return Err(DomainError::RouteGeneration {
                reason: "generator returned an empty route".to_string(),
            });
        }
        self.emit(
            id,
            Stage::RouteGenerated,
            format!(
                "points={} length={:.2}{} duration_hours={:.2}",
                generated.len(),
                generated.length,
                generated.units,
                generated.duration_hours
            ),
        );

        let completed = shipment.completed_route();
        let reconciliation =
            self.reconciler
                .reconcile(request.origin, &generated.coordinates, completed, shipment.status())?;

        let mut detail = match &reconciliation.mode {
            ReconcileMode::FullRoute => "mode=full_route".to_string(),
            ReconcileMode::Connected { nearest_index, nearest_distance_km } => format!(
                "mode=connected nearest_index={} nearest_distance_km={:.2}",
                nearest_index, nearest_distance_km
            ),
            ReconcileMode::ShortRouteFallback { nearest_index, nearest_distance_km } => format!(
                "mode=short_route_fallback nearest_index={} nearest_distance_km={:.2}",
                nearest_index, nearest_distance_km
            ),
        };
        if let Some(last) = shipment.last_completed() {
            let d = self
                .reconciler
                .metric()
                .distance_km(request.origin.to_lat_lon(), last.to_lat_lon());
            detail.push_str(&format!(" last_completed_distance_km={:.2}", d));
        }
        detail.push_str(&format!(" points={}", reconciliation.route.len()));
        self.emit(id, Stage::Reconciled, detail);

        Ok(reconciliation.route)
    }

    fn emit(&self, id: &str, stage: Stage, detail: String) {
        self.logger.stage(&StageEvent::new(id, stage, detail));
    }
}

fn fmt_coord(c: Coordinate) -> String {
    format!("[{:.4}, {:.4}]", c.longitude, c.latitude)
}
