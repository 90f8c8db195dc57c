//! Wayfare Common Library
//!
//! Shared code for the Wayfare tourism platform:
//! - Domain models and the closed category vocabulary
//! - Filtering and partitioning of attraction/event collections
//! - Error types and handling
//! - Configuration management
//! - Bearer-token utilities
//! - Metrics and observability
//! - Database entities and repository (behind the `db` feature)

pub mod auth;
pub mod config;
#[cfg(feature = "db")]
pub mod db;
pub mod errors;
pub mod filter;
pub mod metrics;
pub mod models;

// Re-export commonly used types
pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use models::{Attraction, Category, CategoryFilter, Event, Favorite, UserProfile};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Service banner returned by the API root
pub const API_NAME: &str = "Wayfare Tourism API";
