//! # Dojade Core
//!
//! Client-side services for the Dojade trip planner. Wraps the backend
//! HTTP API and layers planning, caching, alert and session logic on top
//! of the data structures from `dojade-transit`.
//!
//! ## Features
//!
//! - **API client** typed access to every backend endpoint
//! - **Trip planner** routes between stop groups with shape enrichment
//! - **Cache** TTL-bound JSON cache for slow-moving reference data
//! - **Alert board** crowd-sourced incident reports with voting
//! - **Session** login, registration and token handling

pub mod alerts;
pub mod api;
pub mod cache;
pub mod config;
pub mod planner;
pub mod session;

// Re-export the data structures crate under a short path.
pub use dojade_transit as transit;

pub mod prelude {
    pub use crate::alerts::AlertBoard;
    pub use crate::api::{ApiClient, ApiError};
    pub use crate::cache::{CacheError, CacheStore};
    pub use crate::config::{ClientConfig, ConfigError};
    pub use crate::planner::TripPlanner;
    pub use crate::session::Session;
}

pub use prelude::*;
