use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::UserProfile;

/// Request to score two profiles against each other
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub other: Option<UserProfile>,
}

/// Request for friend suggestions
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: Option<String>,
    #[serde(alias = "friend_ids", rename = "friendIds", default)]
    pub friend_ids: Vec<String>,
    #[validate(range(min = 1, max = 100))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Query parameters for the trending skills listing
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TrendingQuery {
    #[validate(range(min = 1, max = 100))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Query parameters for profile search
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(length(max = 200))]
    #[serde(default)]
    pub q: Option<String>,
    #[validate(length(min = 1))]
    #[serde(alias = "viewer_id", rename = "viewerId", default)]
    pub viewer_id: Option<String>,
}
