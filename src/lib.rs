//! PLUR PGH - venue recommendations for Pittsburgh
//!
//! This library ranks a venue catalog against a visitor's zip code, budget
//! ceiling, accepted venue types and preference flags, and serves the top
//! three matches over HTTP.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{rank, Ranker};
pub use crate::models::{BudgetTier, Catalog, ScoredVenue, ScoringPolicy, UserQuery, VenueRecord};
pub use crate::services::{CatalogCache, CatalogLoader};
