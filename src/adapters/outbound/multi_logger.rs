use crate::domains::logger::{DomainLogger, StageEvent};
use std::sync::Arc;

/// Forwards every message to a primary and an optional secondary logger.
pub struct MultiLogger {
    primary: Arc<dyn DomainLogger>,
    secondary: Option<Arc<dyn DomainLogger>>,
}

impl MultiLogger {
    pub fn new(primary: Arc<dyn DomainLogger>, secondary: Option<Arc<dyn DomainLogger>>) -> Self {
        Self { primary, secondary }
    }
}

impl DomainLogger for MultiLogger {
    fn info(&self, msg: &str) {
        self.primary.info(msg);
        if let Some(sec) = &self.secondary {
            sec.info(msg);
        }
    }

    fn warn(&self, msg: &str) {
        self.primary.warn(msg);
        if let Some(sec) = &self.secondary {
            sec.warn(msg);
        }
    }

    fn error(&self, msg: &str) {
        self.primary.error(msg);
        if let Some(sec) = &self.secondary {
            sec.error(msg);
        }
    }

    fn stage(&self, event: &StageEvent) {
        self.primary.stage(event);
        if let Some(sec) = &self.secondary {
            sec.stage(event);
        }
    }
}

/// Initialize the run logger: file + console when a path is configured, console otherwise.
/// Falls back to the console if the file logger cannot be initialized.
pub fn init_run_logger(path: Option<&str>) -> Arc<dyn DomainLogger> {
    let console = crate::adapters::outbound::init_console_logger();
    let Some(path) = path else {
        return console;
    };
    match crate::adapters::outbound::file_logger::init_file_logger(path) {
        Ok(file_logger) => Arc::new(MultiLogger::new(file_logger, Some(console))) as Arc<dyn DomainLogger>,
        Err(e) => {
            console.warn(&format!("{}; logging to console only", e));
            console
        }
    }
}

/// Block until buffered log records have reached their sinks.
pub fn flush_run_logger() {
    log::logger().flush();
}
