pub mod console_logger;
pub mod file_logger;
pub mod multi_logger;
pub mod noop_logger;
pub mod sea_lane_router;
pub mod shipment_store;

pub use console_logger::*;
pub use file_logger::*;
pub use multi_logger::*;
pub use noop_logger::*;
pub use sea_lane_router::*;
pub use shipment_store::*;
