//! Admin dashboard engine: the in-memory copy of every collection, filtering,
//! local mutations and CSV rows. All of it is synchronous; remote calls live
//! in `services::AdminService`.

pub mod export;
pub mod filter;
pub mod state;

pub use export::*;
pub use filter::*;
pub use state::*;
