// Route exports
pub mod matches;
pub mod skills;

use actix_web::{web, HttpResponse};
use validator::ValidationErrors;

use crate::core::SkillMatcher;
use crate::models::ErrorResponse;
use crate::services::{PopulationStore, ResultCache};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PopulationStore>,
    pub cache: Arc<ResultCache>,
    pub matcher: SkillMatcher,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(skills::configure),
    );
}

/// 400 response for a request that failed validation
fn validation_failed(errors: ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}
