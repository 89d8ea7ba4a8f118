pub mod document;
pub mod geodesy;
pub mod ports;
pub mod reconciler;
pub mod selector;
pub mod types;

pub use document::*;
pub use geodesy::*;
pub use ports::*;
pub use reconciler::*;
pub use selector::*;
pub use types::*;
