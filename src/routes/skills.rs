use actix_web::{http::header::ContentType, web, HttpResponse, Responder};
use serde::Serialize;
use validator::Validate;

use super::{validation_failed, AppState};
use crate::models::{MentorsResponse, TrendingQuery, TrendingResponse};
use crate::services::CacheKey;

/// Configure skill listing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/skills/trending", web::get().to(trending))
        .route("/skills/{skill}/mentors", web::get().to(mentors));
}

/// Most offered skills in the current population
///
/// GET /api/v1/skills/trending?limit=5
async fn trending(state: web::Data<AppState>, query: web::Query<TrendingQuery>) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_failed(errors);
    }

    let snapshot = state.store.snapshot();
    let limits = state.matcher.limits();
    let limit = limits.resolve(query.limit.map(usize::from), limits.trending);
    let key = CacheKey::trending(snapshot.revision, limit);

    if let Ok(bytes) = state.cache.get_bytes(&key).await {
        return json_bytes(bytes);
    }

    let response = TrendingResponse {
        revision: snapshot.revision,
        trends: state.matcher.trending(&snapshot.profiles, Some(limit)),
    };

    tracing::debug!(
        "Computed {} trending skills for revision {}",
        response.trends.len(),
        snapshot.revision
    );

    cache_and_respond(&state, &key, &response).await
}

/// Everyone offering one exact skill name
///
/// GET /api/v1/skills/{skill}/mentors
async fn mentors(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let skill = path.into_inner();
    let snapshot = state.store.snapshot();
    let key = CacheKey::mentors(snapshot.revision, &skill);

    if let Ok(bytes) = state.cache.get_bytes(&key).await {
        return json_bytes(bytes);
    }

    let mentors = state.matcher.mentors(&snapshot.profiles, &skill);
    let response = MentorsResponse {
        skill: &skill,
        count: mentors.len(),
        mentors,
    };

    cache_and_respond(&state, &key, &response).await
}

async fn cache_and_respond<T: Serialize>(state: &AppState, key: &str, response: &T) -> HttpResponse {
    match state.cache.set(key, response).await {
        Ok(bytes) => json_bytes(bytes),
        Err(e) => {
            tracing::warn!("Failed to cache {}: {}", key, e);
            HttpResponse::Ok().json(response)
        }
    }
}

fn json_bytes(bytes: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(bytes)
}
