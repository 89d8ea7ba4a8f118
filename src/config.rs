use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domains::shipment_tracking::{DEFAULT_INTERPOLATION_POINTS, IN_TRANSIT};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tracking: TrackingConfig,
    pub reconciliation: ReconciliationConfig,
    pub routing: RoutingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub document_path: PathBuf,
    pub in_transit_status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconciliationConfig {
    pub interpolation_points: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub network_path: PathBuf,
    pub graph_cache_path: Option<PathBuf>,
    pub speed_knots: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: Option<String>,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            document_path: PathBuf::from("data/shipmentTracking.json"),
            in_transit_status: IN_TRANSIT.to_string(),
        }
    }
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            interpolation_points: DEFAULT_INTERPOLATION_POINTS,
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            network_path: PathBuf::from("resources/sea_lanes/marnet.geojson"),
            graph_cache_path: None,
            speed_knots: 24.0,
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::from_file`], but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.reconciliation.interpolation_points == 0 {
            bail!("reconciliation.interpolation_points must be at least 1");
        }
        if self.routing.speed_knots.is_nan() || self.routing.speed_knots <= 0.0 {
            bail!("routing.speed_knots must be positive, got {}", self.routing.speed_knots);
        }
        if self.tracking.in_transit_status.is_empty() {
            bail!("tracking.in_transit_status must not be empty");
        }
        Ok(())
    }
}
