pub mod csv;
pub mod email;
pub mod phone;

pub use csv::*;
pub use email::*;
pub use phone::*;
