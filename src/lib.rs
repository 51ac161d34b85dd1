// src/lib.rs
pub mod api;
pub mod error;
pub mod loader;
pub mod models;

pub use error::{PortfolioError, PortfolioResult};
pub use models::{Portfolio, Stock};
