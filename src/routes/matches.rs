use actix_web::{web, HttpResponse, Responder};
use serde_json::Value;
use crate::core::{summarize, Matcher};
use crate::models::{ErrorResponse, HealthResponse, Listing, MatchResponse, ServiceInfo, UserPreferences};
use crate::services::{CatalogError, CatalogProvider};
use std::sync::Arc;

const SERVICE_NAME: &str = "Property Matching Service";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogProvider>,
    pub matcher: Matcher,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(service_info))
        .route("/health", web::get().to(health_check))
        .route("/match", web::post().to(find_matches))
        .route("/analytics", web::get().to(catalog_analytics));
}

async fn service_info() -> impl Responder {
    HttpResponse::Ok().json(ServiceInfo {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Health check endpoint
///
/// Reports whether the catalog can be read and how many rows it holds.
/// Always answers 200; the body carries the status.
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let (status, data_file, properties_count, error) = match load_catalog(&state).await {
        Ok(listings) => ("ok", "found", Some(listings.len()), None),
        Err(CatalogError::NotFound(path)) => (
            "error",
            "not_found",
            None,
            Some(format!("catalog not found at {}", path.display())),
        ),
        Err(e) => ("error", "unreadable", None, Some(e.to_string())),
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        service: SERVICE_NAME.to_string(),
        data_file: data_file.to_string(),
        properties_count,
        error,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// POST /match
///
/// Request body:
/// ```json
/// {
///   "safety": 5,
///   "affordability": 4,
///   "cleanliness": 3,
///   "commute": 3,
///   "greenery": 2,
///   "nightlife": 1,
///   "vibe": "quiet, family"
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> impl Responder {
    let body = body.into_inner();

    let preferences = match UserPreferences::from_json(&body) {
        Ok(prefs) => prefs,
        Err(e) => {
            tracing::info!("Rejected match request: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid preferences".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    let listings = match load_catalog(&state).await {
        Ok(listings) => listings,
        Err(e) => return catalog_failure(e),
    };

    tracing::info!(
        "Ranking {} listings (vibe: {:?}, top {})",
        listings.len(),
        preferences.vibe,
        state.matcher.top_k()
    );

    let matches = state.matcher.rank(&listings, &preferences);

    HttpResponse::Ok().json(MatchResponse {
        matches,
        user_preferences: body,
    })
}

/// Catalog summary for dashboards
async fn catalog_analytics(state: web::Data<AppState>) -> impl Responder {
    match load_catalog(&state).await {
        Ok(listings) => HttpResponse::Ok().json(summarize(&listings)),
        Err(e) => catalog_failure(e),
    }
}

/// Read a snapshot off the async executor
async fn load_catalog(state: &AppState) -> Result<Vec<Listing>, CatalogError> {
    let catalog = Arc::clone(&state.catalog);
    web::block(move || catalog.snapshot())
        .await
        .map_err(|e| CatalogError::Io(std::io::Error::new(std::io::ErrorKind::Other, e.to_string())))?
}

fn catalog_failure(e: CatalogError) -> HttpResponse {
    tracing::error!("Failed to load catalog: {}", e);
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: "Failed to load catalog".to_string(),
        message: e.to_string(),
        status_code: 500,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{CsvCatalog, StaticCatalog};
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    fn app_state(listings: Vec<Listing>) -> AppState {
        AppState {
            catalog: Arc::new(StaticCatalog::new(listings)),
            matcher: Matcher::default(),
        }
    }

    fn listing(name: &str, price: f64, description: &str) -> Listing {
        Listing {
            name: name.to_string(),
            price,
            description: description.to_string(),
            ..Default::default()
        }
    }

    #[actix_web::test]
    async fn test_match_echoes_preferences() {
        let state = app_state(vec![
            listing("a", 4_000_000.0, "safe and quiet"),
            listing("b", 25_000_000.0, ""),
        ]);
        let app = test::init_service(
            App::new().app_data(web::Data::new(state)).configure(configure),
        )
        .await;

        let body = json!({ "safety": 5, "vibe": "quiet", "ageGroup": "25-34" });
        let req = test::TestRequest::post().uri("/match").set_json(&body).to_request();
        let resp: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp["userPreferences"], body);
        let matches = resp["matches"].as_array().unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0]["Property_Name"], "a");
        assert!(matches[0]["why"]
            .as_str()
            .unwrap()
            .ends_with("Matches your preferred locality vibe"));
    }

    #[actix_web::test]
    async fn test_invalid_weight_is_rejected() {
        let app = test::init_service(
            App::new().app_data(web::Data::new(app_state(vec![]))).configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/match")
            .set_json(json!({ "safety": "very" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_empty_catalog_returns_no_matches() {
        let app = test::init_service(
            App::new().app_data(web::Data::new(app_state(vec![]))).configure(configure),
        )
        .await;

        let req = test::TestRequest::post().uri("/match").set_json(json!({})).to_request();
        let resp: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp["matches"], json!([]));
    }

    #[actix_web::test]
    async fn test_health_reports_missing_catalog() {
        let state = AppState {
            catalog: Arc::new(CsvCatalog::new("/nonexistent/data.csv")),
            matcher: Matcher::default(),
        };
        let app = test::init_service(
            App::new().app_data(web::Data::new(state)).configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp["status"], "error");
        assert_eq!(resp["data_file"], "not_found");
        assert!(resp.get("properties_count").is_none());
    }

    #[actix_web::test]
    async fn test_health_counts_rows() {
        let state = app_state(vec![listing("a", 0.0, ""), listing("b", 0.0, "")]);
        let app = test::init_service(
            App::new().app_data(web::Data::new(state)).configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp["status"], "ok");
        assert_eq!(resp["properties_count"], 2);
    }

    #[actix_web::test]
    async fn test_missing_catalog_fails_match() {
        let state = AppState {
            catalog: Arc::new(CsvCatalog::new("/nonexistent/data.csv")),
            matcher: Matcher::default(),
        };
        let app = test::init_service(
            App::new().app_data(web::Data::new(state)).configure(configure),
        )
        .await;

        let req = test::TestRequest::post().uri("/match").set_json(json!({})).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
