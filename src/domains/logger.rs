use chrono::Utc;
use log::{error as log_error, info as log_info, warn as log_warn};
use std::fmt;
use std::sync::Arc;

/// Domain-level logging port (Hexagonal port).
/// Keep this API intentionally small and non-fallible from the domain perspective.
pub trait DomainLogger: Send + Sync + 'static {
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);

    /// Structured per-shipment outcome. Adapters that only deal in text get
    /// a formatted line at the stage's severity.
    fn stage(&self, event: &StageEvent) {
        let line = event.to_string();
        match event.stage.severity() {
            Severity::Info => self.info(&line),
            Severity::Warn => self.warn(&line),
            Severity::Error => self.error(&line),
        }
    }
}

pub type DynLogger = Arc<dyn DomainLogger>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

/// Processing stages a shipment passes through during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Selected,
    Skipped,
    MissingInput,
    RouteGenerated,
    Reconciled,
    Updated,
    Failed,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Selected => "selected",
            Stage::Skipped => "skipped",
            Stage::MissingInput => "missing_input",
            Stage::RouteGenerated => "route_generated",
            Stage::Reconciled => "reconciled",
            Stage::Updated => "updated",
            Stage::Failed => "failed",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Stage::MissingInput => Severity::Warn,
            Stage::Failed => Severity::Error,
            _ => Severity::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StageEvent {
    pub shipment_id: String,
    pub stage: Stage,
    pub detail: String,
}

impl StageEvent {
    pub fn new(shipment_id: impl Into<String>, stage: Stage, detail: impl Into<String>) -> Self {
        Self {
            shipment_id: shipment_id.into(),
            stage,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for StageEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shipment={} stage={}", self.shipment_id, self.stage.as_str())?;
        if !self.detail.is_empty() {
            write!(f, " {}", self.detail)?;
        }
        Ok(())
    }
}

/// A file-based adapter using `fast_log` for file writing and rotation.
pub struct FileLogger;

impl FileLogger {
    /// Initialize the fast_log file logger.
    /// Console output is left to the console adapter.
    pub fn init(path: &str) -> Result<(), Box<dyn std::error::Error>> {
        fast_log::init(
            fast_log::config::Config::new()
                .file(path)
                .level(log::LevelFilter::Info),
        )?;
        Ok(())
    }
}

impl DomainLogger for FileLogger {
    fn info(&self, msg: &str) {
        log_info!("{} - {}", Utc::now().to_rfc3339(), msg);
    }

    fn warn(&self, msg: &str) {
        log_warn!("{} - {}", Utc::now().to_rfc3339(), msg);
    }

    fn error(&self, msg: &str) {
        log_error!("{} - {}", Utc::now().to_rfc3339(), msg);
    }
}
