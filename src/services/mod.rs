pub mod admin_service;
pub mod intake_service;

pub use admin_service::*;
pub use intake_service::*;
