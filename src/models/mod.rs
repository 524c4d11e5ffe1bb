pub mod admin;
pub mod catalog;
pub mod common;
pub mod customer;
pub mod intake;

pub use admin::*;
pub use catalog::*;
pub use common::*;
pub use customer::*;
pub use intake::*;
