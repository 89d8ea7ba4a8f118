pub mod route_update_service;

pub use route_update_service::*;
