use serde::{Deserialize, Serialize};
use crate::models::domain::{ScoredVenue, VenueRecord};

/// Response for the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    pub ranking_id: String,
    pub venues: Vec<ScoredVenue>,
    pub total_candidates: usize,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Choices offered by the quiz form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizOptionsResponse {
    pub types: Vec<String>,
    pub preferences: Vec<String>,
    pub budgets: Vec<String>,
}

/// Venues that can be placed on a map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueMapResponse {
    pub venues: Vec<VenueRecord>,
    pub count: usize,
}

/// Catalog refresh response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRefreshResponse {
    pub source: String,
    pub venue_count: usize,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub catalog_size: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
