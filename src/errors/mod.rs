//! Centralized error handling for the sitemap generator
//!
//! Every component returns [`AppResult`]. The run driver is the only place
//! that decides whether a failure is fatal.
//!
//! # Error Categories
//!
//! - **Transport Errors**: the request could not complete or the body was not JSON
//! - **API Errors**: a well-formed GraphQL response carrying an `errors` list
//! - **Output Errors**: the sitemap file could not be written
//! - **Configuration Errors**: invalid settings or a missing credential
//!
//! # Usage
//!
//! ```rust
//! use shop_sitemaps::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Err(AppError::configuration("shop domain is empty"))
//! }
//!
//! assert!(example_function().is_err());
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;
