pub mod config;
pub mod dashboard;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod intake;
pub mod middlewares;
pub mod models;
pub mod services;
pub mod swagger;
pub mod utils;

pub use config::Config;
pub use error::{AppError, AppResult};
