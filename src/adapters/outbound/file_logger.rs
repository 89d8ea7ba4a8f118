use crate::domains::logger::{DomainLogger, FileLogger};
use std::sync::Arc;

/// Initialize the file logger and return a domain logger instance the application can inject.
pub fn init_file_logger(path: &str) -> Result<Arc<dyn DomainLogger>, String> {
    FileLogger::init(path).map_err(|e| format!("Failed to initialize fast_log: {}", e))?;
    Ok(Arc::new(FileLogger))
}
