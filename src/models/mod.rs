// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BudgetTier, Catalog, ScoreBreakdown, ScoredVenue, ScoringPolicy, UserQuery, VenueRecord,
    DEFAULT_PREFERENCES, PRICE_FIELD, TYPE_FIELD, ZIP_FIELD,
};
pub use requests::RecommendRequest;
pub use responses::{
    CatalogRefreshResponse, ErrorResponse, HealthResponse, QuizOptionsResponse, RecommendResponse,
    VenueMapResponse,
};
