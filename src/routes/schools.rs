use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::config::{MatchingSettings, PromotionSettings};
use crate::core::Matcher;
use crate::models::{
    ErrorResponse, HealthResponse, InvalidateCacheResponse, PinnedSchoolSummary, RecommendRequest,
    RecommendResponse, SchoolRecord,
};
use crate::services::{CacheError, CacheKey, CacheManager, PostgresClient, PostgresError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub cache: Arc<CacheManager>,
    pub matcher: Matcher,
    pub matching: MatchingSettings,
    pub promotion: PromotionSettings,
}

/// Configure all school-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/schools", web::get().to(list_schools))
        .route("/schools/recommend", web::post().to(recommend))
        .route("/schools/cache", web::delete().to(invalidate_cache))
        .route("/schools/{slug}", web::get().to(get_school));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Catalog for a city, served from cache when possible
async fn load_catalog(state: &AppState, city: &str) -> Result<Vec<SchoolRecord>, PostgresError> {
    let key = CacheKey::catalog(city);

    match state.cache.get::<Vec<SchoolRecord>>(&key).await {
        Ok(catalog) => {
            tracing::debug!("Catalog cache hit for {} ({} schools)", city, catalog.len());
            return Ok(catalog);
        }
        Err(CacheError::CacheMiss(_)) => {}
        Err(e) => tracing::warn!("Catalog cache read failed for {}, falling back to database: {}", city, e),
    }

    let catalog = state.postgres.fetch_catalog(city).await?;

    if let Err(e) = state.cache.set(&key, &catalog).await {
        tracing::warn!("Failed to cache catalog for {}: {}", city, e);
    }

    Ok(catalog)
}

fn catalog_error(e: PostgresError) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: "Failed to load school catalog".to_string(),
        message: e.to_string(),
        status_code: 500,
    })
}

/// Copy the configured promotional fields onto the pinned school
fn attach_promotion(mut summary: PinnedSchoolSummary, promotion: &PromotionSettings) -> PinnedSchoolSummary {
    summary.registration_url = promotion.registration_url.clone();
    summary.documents = promotion.documents.clone();
    if let Some(hero_image) = &promotion.hero_image {
        summary.hero_image = Some(hero_image.clone());
    }
    summary
}

/// Recommend schools endpoint
///
/// POST /api/v1/schools/recommend
///
/// Request body:
/// ```json
/// {
///   "city": "Harare",
///   "learningEnvironment": "Advanced",
///   "curriculum": ["Cambridge"],
///   "type": ["Primary School"],
///   "type2": ["Day", "Boarding"],
///   "facilities": ["swimmingPool"],
///   "limit": 5
/// }
/// ```
///
/// List fields also accept comma-separated strings, as sent by the chat bot.
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let preferences = req.to_preferences_with_city(&state.matching.default_city);
    let limit = req
        .limit
        .unwrap_or(state.matching.default_limit)
        .min(state.matching.max_limit) as usize;

    tracing::info!("Recommending schools in {}, limit: {}", preferences.city, limit);

    let catalog = match load_catalog(&state, &preferences.city).await {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!("Failed to load catalog for {}: {}", preferences.city, e);
            return catalog_error(e);
        }
    };

    let result = state.matcher.recommend(&preferences, &catalog, limit);

    let response = RecommendResponse {
        request_id: uuid::Uuid::new_v4().to_string(),
        total_results: result.recommendations.len(),
        total_candidates: result.filtered_candidates,
        pinned_school: result
            .pinned_school
            .map(|summary| attach_promotion(summary, &state.promotion)),
        recommendations: result.recommendations,
    };

    tracing::info!(
        "Returning {} recommendations for {} (from {} candidates, {} in catalog)",
        response.total_results,
        preferences.city,
        result.filtered_candidates,
        result.total_candidates
    );

    HttpResponse::Ok().json(response)
}

#[derive(Debug, Deserialize)]
struct CatalogQuery {
    city: Option<String>,
}

/// List a city's catalog
///
/// GET /api/v1/schools?city={city}
async fn list_schools(
    state: web::Data<AppState>,
    query: web::Query<CatalogQuery>,
) -> impl Responder {
    let city = query
        .city
        .as_deref()
        .map(str::trim)
        .filter(|city| !city.is_empty())
        .unwrap_or(state.matching.default_city.as_str())
        .to_string();

    match load_catalog(&state, &city).await {
        Ok(mut catalog) => {
            catalog.sort_by(|a, b| a.catalog_order(b));
            HttpResponse::Ok().json(serde_json::json!({
                "city": city,
                "schools": catalog,
                "count": catalog.len(),
            }))
        }
        Err(e) => {
            tracing::error!("Failed to list schools for {}: {}", city, e);
            catalog_error(e)
        }
    }
}

/// Fetch one school
///
/// GET /api/v1/schools/{slug}
async fn get_school(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> impl Responder {
    match state.postgres.get_school(&slug).await {
        Ok(school) => HttpResponse::Ok().json(school),
        Err(PostgresError::NotFound(message)) => HttpResponse::NotFound().json(ErrorResponse {
            error: "School not found".to_string(),
            message,
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Failed to fetch school {}: {}", slug, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch school".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Drop cached catalogs after the catalog has been edited
///
/// DELETE /api/v1/schools/cache
///
/// Clears Redis and this instance's in-memory tier. Other instances refresh
/// within `SHARED_L1_TTL_SECS`.
async fn invalidate_cache(state: web::Data<AppState>) -> impl Responder {
    match state.cache.invalidate_pattern(CacheKey::CATALOG_PATTERN).await {
        Ok(invalidated) => {
            tracing::info!("Invalidated {} cached catalogs", invalidated);
            HttpResponse::Ok().json(InvalidateCacheResponse {
                success: true,
                invalidated,
            })
        }
        Err(e) => {
            tracing::error!("Failed to invalidate catalog cache: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to invalidate cache".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
