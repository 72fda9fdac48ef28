pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod generator;
pub mod observability;
pub mod routes;

pub use config::Config;
pub use error::AppError;
pub use routes::{AppState, router};
