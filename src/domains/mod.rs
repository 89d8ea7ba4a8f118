pub mod logger;
pub mod shipment_tracking;

pub use logger::*;
pub use shipment_tracking::*;
