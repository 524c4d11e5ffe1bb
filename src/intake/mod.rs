//! Intake form engine: field state, validation and the submission lifecycle.

pub mod form;
pub mod session;
pub mod validation;

pub use form::*;
pub use session::*;
pub use validation::*;
