//! # CLM Shared
//!
//! Common types and interfaces used across all CLM packages.

pub mod config;
pub mod error;
pub mod logging;
pub mod organization;
pub mod role_map;
pub mod user;

// Re-exports
pub use config::*;
pub use error::*;
pub use logging::*;
pub use organization::*;
pub use role_map::*;
pub use user::*;
