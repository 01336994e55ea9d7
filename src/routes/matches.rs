use actix_web::{web, HttpResponse, Responder};
use std::collections::HashSet;
use validator::Validate;

use super::{validation_failed, AppState};
use crate::models::{
    HealthResponse, RecommendRequest, RecommendResponse, ScoreRequest, ScoreResponse, SearchHit,
    SearchQuery, SearchResponse,
};

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/match/score", web::post().to(score))
        .route("/friends/recommend", web::post().to(recommend))
        .route("/users/search", web::get().to(search));
}

/// Health check endpoint
///
/// Reports "starting" until the first population has been published.
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let snapshot = state.store.snapshot();
    let status = if snapshot.revision > 0 { "healthy" } else { "starting" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        revision: snapshot.revision,
        population: snapshot.profiles.len(),
        cached_results: state.cache.stats().entries,
        timestamp: chrono::Utc::now(),
    })
}

/// Score two profiles against each other
///
/// POST /api/v1/match/score
///
/// Request body:
/// ```json
/// {
///   "user": { "id": "a", "skillsOffered": ["Rust"], "skillsWanted": ["Go"] },
///   "other": { "id": "b", "skillsOffered": ["Go"], "skillsWanted": [] }
/// }
/// ```
async fn score(state: web::Data<AppState>, req: web::Json<ScoreRequest>) -> impl Responder {
    let user = req.user.as_ref();
    let other = req.other.as_ref();

    let response = ScoreResponse {
        match_score: state.matcher.score(user, other),
        shared_skills: state.matcher.shared_skills(user, other),
    };

    tracing::debug!(
        "Scored {:?} against {:?}: {}",
        user.map(|u| u.user_id()),
        other.map(|o| o.user_id()),
        response.match_score
    );

    HttpResponse::Ok().json(response)
}

/// Friend suggestions for a user in the current population
///
/// POST /api/v1/friends/recommend
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "friendIds": ["string"],
///   "limit": 3
/// }
/// ```
///
/// An unknown or missing `userId` falls back to population order.
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: {:?}", errors);
        return validation_failed(errors);
    }

    let snapshot = state.store.snapshot();
    let current_user = req.user_id.as_deref().and_then(|id| snapshot.find_member(id));

    if current_user.is_none() {
        tracing::debug!("Recommending without a known user (userId: {:?})", req.user_id);
    }

    let friend_ids: HashSet<String> = req.friend_ids.iter().cloned().collect();
    let recommendations = state.matcher.recommend(
        current_user,
        &snapshot.profiles,
        &friend_ids,
        req.limit.map(usize::from),
    );

    tracing::info!(
        "Returning {} recommendations for {:?} (revision {})",
        recommendations.len(),
        req.user_id,
        snapshot.revision
    );

    HttpResponse::Ok().json(RecommendResponse {
        revision: snapshot.revision,
        recommendations,
    })
}

/// Search the current population
///
/// GET /api/v1/users/search?q={term}&viewerId={userId}
async fn search(state: web::Data<AppState>, query: web::Query<SearchQuery>) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_failed(errors);
    }

    let snapshot = state.store.snapshot();
    let viewer = query.viewer_id.as_deref().and_then(|id| snapshot.find_member(id));
    let term = query.q.as_deref().unwrap_or_default();

    let results: Vec<SearchHit> = state
        .matcher
        .search(viewer, &snapshot.profiles, term)
        .into_iter()
        .map(|(profile, match_score)| SearchHit {
            profile,
            match_score,
            completion_percentage: profile.completion_percentage(),
        })
        .collect();

    tracing::debug!("Search {:?} matched {} profiles", term, results.len());

    let viewer_id = viewer.map(|v| v.user_id());
    let total_users = snapshot
        .profiles
        .iter()
        .filter(|profile| Some(profile.user_id()) != viewer_id)
        .count();

    HttpResponse::Ok().json(SearchResponse {
        results,
        total_users,
    })
}
