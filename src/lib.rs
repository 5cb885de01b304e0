pub mod client;
pub mod config;
pub mod errors;
pub mod extract;
pub mod models;
pub mod normalizer;
pub mod runner;
pub mod sitemap;
pub mod utils;

pub use config::Config;
pub use errors::{AppError, AppResult};
pub use runner::{RunSummary, SitemapRunner};
