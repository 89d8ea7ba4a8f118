use searoute_tracker::adapters::outbound::{init_noop_logger, init_run_logger, MultiLogger};
use searoute_tracker::domains::logger::{DomainLogger, Stage, StageEvent};
use std::sync::{Arc, Mutex};

struct BridgeCapture {
    messages: Arc<Mutex<Vec<String>>>,
}

impl BridgeCapture {
    fn new() -> Self { Self { messages: Arc::new(Mutex::new(Vec::new())) } }
}

impl DomainLogger for BridgeCapture {
    fn info(&self, msg: &str) { self.messages.lock().unwrap().push(format!("INFO:{}", msg)); }
    fn warn(&self, msg: &str) { self.messages.lock().unwrap().push(format!("WARN:{}", msg)); }
    fn error(&self, msg: &str) { self.messages.lock().unwrap().push(format!("ERR:{}", msg)); }
}

#[test]
fn test_stage_events_default_to_formatted_lines_by_severity() {
    let capture = Arc::new(BridgeCapture::new());

    capture.stage(&StageEvent::new("SHP-1", Stage::Updated, "points=4"));
    capture.stage(&StageEvent::new("SHP-2", Stage::MissingInput, "missing=origin latitude"));
    capture.stage(&StageEvent::new("SHP-3", Stage::Failed, ""));

    let msgs = capture.messages.lock().unwrap();
    assert_eq!(msgs[0], "INFO:shipment=SHP-1 stage=updated points=4");
    assert_eq!(msgs[1], "WARN:shipment=SHP-2 stage=missing_input missing=origin latitude");
    assert_eq!(msgs[2], "ERR:shipment=SHP-3 stage=failed");
}

#[test]
fn test_multi_logger_forwards_to_both() {
    let primary = Arc::new(BridgeCapture::new());
    let secondary = Arc::new(BridgeCapture::new());
    let multi = MultiLogger::new(primary.clone(), Some(secondary.clone() as Arc<dyn DomainLogger>));

    multi.info("one");
    multi.warn("two");
    multi.stage(&StageEvent::new("SHP-9", Stage::Skipped, "status=delivered"));

    for capture in [&primary, &secondary] {
        let msgs = capture.messages.lock().unwrap();
        assert!(msgs.iter().any(|m| m == "INFO:one"));
        assert!(msgs.iter().any(|m| m == "WARN:two"));
        assert!(msgs.iter().any(|m| m.contains("shipment=SHP-9 stage=skipped")));
    }
}

#[test]
fn test_noop_and_console_loggers_accept_calls() {
    let noop = init_noop_logger();
    noop.info("ignored");
    noop.stage(&StageEvent::new("SHP-1", Stage::Failed, "ignored"));

    let console = init_run_logger(None);
    console.info("console logger ready");
    console.stage(&StageEvent::new("SHP-1", Stage::Selected, ""));
}
