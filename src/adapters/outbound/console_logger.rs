use crate::domains::logger::{DomainLogger, Severity, StageEvent};
use std::sync::Arc;

struct ConsoleBridge;

impl DomainLogger for ConsoleBridge {
    fn info(&self, msg: &str) { println!("{}", msg); }
    fn warn(&self, msg: &str) { println!("WARN: {}", msg); }
    fn error(&self, msg: &str) { eprintln!("ERROR: {}", msg); }

    // `[id] stage detail` reads better on a terminal than key=value pairs
    fn stage(&self, event: &StageEvent) {
        let mut line = format!("[{}] {}", event.shipment_id, event.stage.as_str());
        if !event.detail.is_empty() {
            line.push(' ');
            line.push_str(&event.detail);
        }
        match event.stage.severity() {
            Severity::Info => self.info(&line),
            Severity::Warn => self.warn(&line),
            Severity::Error => self.error(&line),
        }
    }
}

/// Initialize a simple console-backed DomainLogger (useful as a fallback)
pub fn init_console_logger() -> Arc<dyn DomainLogger> {
    Arc::new(ConsoleBridge {})
}

/// Install the process-wide `tracing` subscriber used by the binary.
///
/// The subscriber is installed without the `log` bridge, which leaves the
/// `log` facade free for the fast_log file adapter.
pub fn init_tracing() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
