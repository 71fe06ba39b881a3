// Integration tests for PLUR PGH

use actix_web::{http::StatusCode, test as actix_test, web, App};
use plur_pgh::core::Ranker;
use plur_pgh::models::{
    BudgetTier, CatalogRefreshResponse, QuizOptionsResponse, RecommendResponse, UserQuery,
    VenueMapResponse,
};
use plur_pgh::routes::{configure_routes, handle_json_payload_error, AppState};
use plur_pgh::services::{CatalogCache, CatalogLoader};
use std::path::PathBuf;
use std::sync::Arc;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("venues.csv")
}

fn create_state() -> AppState {
    AppState {
        catalog: Arc::new(CatalogCache::new(CatalogLoader::new(fixture_path()), None)),
        ranker: Ranker::default(),
        preferences: Arc::new(vec![
            "LGBT +".to_string(),
            "Adult Club".to_string(),
            "Activity".to_string(),
        ]),
    }
}

fn titles(response: &RecommendResponse) -> Vec<&str> {
    response.venues.iter().map(|v| v.venue.field("title")).collect()
}

#[test]
fn test_integration_load_and_rank() {
    let venues = CatalogLoader::new(fixture_path()).load();
    assert_eq!(venues.len(), 7);

    let query = UserQuery::new("15201", BudgetTier::Budget)
        .with_types(["Bar / Pub"])
        .with_prefs(["LGBT +"]);

    let results = Ranker::default().rank(&venues, &query);

    let ranked: Vec<(&str, i32)> = results
        .iter()
        .map(|r| (r.venue.field("title"), r.match_score))
        .collect();
    assert_eq!(ranked, vec![("Blue Moon", 115), ("Remedy", 65), ("Unmarked", 50)]);
}

#[test]
fn test_integration_higher_budget() {
    let venues = CatalogLoader::new(fixture_path()).load();

    let query = UserQuery::new("15201", BudgetTier::HighEnd)
        .with_types(["Club"])
        .with_prefs(["Activity"]);

    let results = Ranker::default().rank(&venues, &query);

    let ranked: Vec<(&str, i32)> = results
        .iter()
        .map(|r| (r.venue.field("title"), r.match_score))
        .collect();
    assert_eq!(ranked, vec![("Cattivo", 110), ("Arsenal Lanes", 75), ("Spirit", 55)]);
    assert_eq!(results[0].matched_preferences, vec!["Activity"]);
}

#[test]
fn test_integration_missing_catalog_ranks_nothing() {
    let venues = CatalogLoader::new("tests/fixtures/absent.csv").load();
    let query = UserQuery::new("15201", BudgetTier::HighEnd).with_types(["Club"]);

    assert!(Ranker::default().rank(&venues, &query).is_empty());
}

#[actix_web::test]
async fn test_http_recommendations() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(create_state()))
            .configure(configure_routes),
    )
    .await;

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/recommendations")
        .set_json(serde_json::json!({
            "zip": "15201",
            "budget": "$",
            "types": ["Bar / Pub"],
            "prefs": ["LGBT +"]
        }))
        .to_request();

    let body: RecommendResponse = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(titles(&body), vec!["Blue Moon", "Remedy", "Unmarked"]);
    assert_eq!(body.venues[0].match_score, 115);
    assert_eq!(body.total_candidates, 7);
    assert!(!body.ranking_id.is_empty());
}

#[actix_web::test]
async fn test_http_unknown_budget_defaults_to_lowest() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(create_state()))
            .configure(configure_routes),
    )
    .await;

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/recommendations")
        .set_json(serde_json::json!({"zip": "15203", "budget": "lots"}))
        .to_request();

    let body: RecommendResponse = actix_test::call_and_read_body_json(&app, req).await;

    // Only "$" and unpriced venues survive a "$" ceiling
    for venue in &body.venues {
        assert!(matches!(venue.venue.field("price"), "$" | ""));
    }
    assert_eq!(body.venues.len(), 3);
}

#[actix_web::test]
async fn test_http_rejects_missing_zip() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(create_state()))
            .configure(configure_routes),
    )
    .await;

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/recommendations")
        .set_json(serde_json::json!({"zip": "", "budget": "$"}))
        .to_request();

    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_http_malformed_json() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(create_state()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .configure(configure_routes),
    )
    .await;

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/recommendations")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();

    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
}

#[actix_web::test]
async fn test_http_quiz_options() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(create_state()))
            .configure(configure_routes),
    )
    .await;

    let req = actix_test::TestRequest::get().uri("/api/v1/quiz/options").to_request();
    let body: QuizOptionsResponse = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.types, vec!["Activity", "Bar / Pub", "Club", "Gallery"]);
    assert_eq!(body.preferences, vec!["LGBT +", "Adult Club", "Activity"]);
    assert_eq!(body.budgets, vec!["$", "$$", "$$$"]);
}

#[actix_web::test]
async fn test_http_venue_map() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(create_state()))
            .configure(configure_routes),
    )
    .await;

    let req = actix_test::TestRequest::get().uri("/api/v1/venues/map").to_request();
    let body: VenueMapResponse = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.count, 5);
    assert!(body.venues.iter().all(|v| !v.field("latitude").is_empty()));
}

#[actix_web::test]
async fn test_http_catalog_refresh() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(create_state()))
            .configure(configure_routes),
    )
    .await;

    let req = actix_test::TestRequest::post().uri("/api/v1/catalog/refresh").to_request();
    let body: CatalogRefreshResponse = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.venue_count, 7);
    assert!(body.source.ends_with("venues.csv"));
}
