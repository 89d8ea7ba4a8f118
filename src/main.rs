use anyhow::Context;
use std::sync::Arc;
use tracing::{error, info};

use searoute_tracker::adapters::outbound::{
    flush_run_logger, init_run_logger, init_tracing, FilesystemShipmentStore, SeaLaneRouter,
};
use searoute_tracker::application::RouteUpdateService;
use searoute_tracker::domains::shipment_tracking::{Haversine, Reconciler, RouteGenerator};
use searoute_tracker::Config;

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());
    let config = Config::load_or_default(&config_path)?;
    info!("Configuration loaded from {}", config_path);
    info!("Tracking document: {}", config.tracking.document_path.display());

    let logger = init_run_logger(config.logging.file.as_deref());

    let router = SeaLaneRouter::open(
        &config.routing.network_path,
        config.routing.graph_cache_path.as_deref(),
        config.routing.speed_knots,
    )
    .with_context(|| format!("loading sea-lane network {}", config.routing.network_path.display()))?;
    info!(
        nodes = router.graph().node_count(),
        edges = router.graph().edge_count(),
        "Sea-lane network ready"
    );
    let generator: Arc<dyn RouteGenerator> = Arc::new(router);

    let reconciler = Reconciler::new(Haversine)
        .with_interpolation_points(config.reconciliation.interpolation_points)?
        .with_in_transit_status(config.tracking.in_transit_status.clone());

    let service = RouteUpdateService::new(generator, reconciler, logger);
    let store = FilesystemShipmentStore::new();

    let outcome = service.run(&store, &config.tracking.document_path);
    flush_run_logger();
    match outcome {
        Ok(summary) => {
            info!(
                updated = summary.updated,
                failed = summary.failed,
                written = summary.written,
                "Route update finished"
            );
            Ok(())
        }
        Err(e) => {
            error!("Route update aborted: {}", e);
            Err(e.into())
        }
    }
}
