use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::Ranker;
use crate::models::{
    BudgetTier, CatalogRefreshResponse, ErrorResponse, HealthResponse, QuizOptionsResponse,
    RecommendRequest, RecommendResponse, VenueMapResponse,
};
use crate::services::CatalogCache;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogCache>,
    pub ranker: Ranker,
    pub preferences: Arc<Vec<String>>,
}

/// Configure all venue-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/quiz/options", web::get().to(quiz_options))
        .route("/recommendations", web::post().to(recommend))
        .route("/venues/map", web::get().to(venue_map))
        .route("/catalog/refresh", web::post().to(refresh_catalog));
}

fn catalog_unavailable(source: &str) -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(ErrorResponse {
        error: "catalog_unavailable".to_string(),
        message: format!("Venue catalog {} could not be loaded", source),
        status_code: 503,
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let catalog = state.catalog.snapshot().await;

    let status = if catalog.is_empty() { "degraded" } else { "healthy" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog_size: catalog.len(),
        timestamp: chrono::Utc::now(),
    })
}

/// Quiz options endpoint
///
/// GET /api/v1/quiz/options
async fn quiz_options(state: web::Data<AppState>) -> impl Responder {
    let catalog = state.catalog.snapshot().await;
    if catalog.is_empty() {
        return catalog_unavailable(catalog.source());
    }

    HttpResponse::Ok().json(QuizOptionsResponse {
        types: catalog.unique_types(),
        preferences: state.preferences.as_ref().clone(),
        budgets: BudgetTier::ALL.iter().map(|t| t.label().to_string()).collect(),
    })
}

/// Recommendations endpoint
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "zip": "15201",
///   "budget": "$|$$|$$$",
///   "types": ["Bar / Pub"],
///   "prefs": ["LGBT +"]
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommendation request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let catalog = state.catalog.snapshot().await;
    if catalog.is_empty() {
        tracing::error!("Recommendation requested but catalog {} is unavailable", catalog.source());
        return catalog_unavailable(catalog.source());
    }

    let query = req.to_query();
    tracing::info!(
        "Ranking venues: zip={}, budget={}, types={}, prefs={}",
        query.zip,
        query.budget,
        query.types.len(),
        query.prefs.len()
    );

    let venues = state.ranker.rank(catalog.venues(), &query);

    let response = RecommendResponse {
        ranking_id: uuid::Uuid::new_v4().to_string(),
        venues,
        total_candidates: catalog.len(),
        generated_at: chrono::Utc::now(),
    };

    tracing::info!(
        "Returning {} venues (from {} candidates)",
        response.venues.len(),
        response.total_candidates
    );

    HttpResponse::Ok().json(response)
}

/// Venues with coordinates, for the map view
///
/// GET /api/v1/venues/map
async fn venue_map(state: web::Data<AppState>) -> impl Responder {
    let catalog = state.catalog.snapshot().await;
    let venues = catalog.with_coordinates();

    HttpResponse::Ok().json(VenueMapResponse {
        count: venues.len(),
        venues,
    })
}

/// Drop the cached catalog and load it again
///
/// POST /api/v1/catalog/refresh
async fn refresh_catalog(state: web::Data<AppState>) -> impl Responder {
    let catalog = state.catalog.refresh().await;
    if catalog.is_empty() {
        tracing::warn!("Catalog refresh found no venues at {}", catalog.source());
        return catalog_unavailable(catalog.source());
    }

    HttpResponse::Ok().json(CatalogRefreshResponse {
        source: catalog.source().to_string(),
        venue_count: catalog.len(),
        loaded_at: catalog.loaded_at(),
    })
}
