use serde::{Deserialize, Serialize};

use crate::models::domain::{FriendRecommendation, MatchScore, SharedSkills, SkillTrend, UserProfile};

/// Response for the score endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ScoreResponse {
    #[serde(rename = "matchScore")]
    pub match_score: MatchScore,
    #[serde(rename = "sharedSkills")]
    pub shared_skills: SharedSkills,
}

/// Response for the trending skills endpoint
#[derive(Debug, Clone, Serialize)]
pub struct TrendingResponse<'a> {
    pub revision: u64,
    pub trends: Vec<SkillTrend<'a>>,
}

/// Response for the mentors-by-skill endpoint
#[derive(Debug, Clone, Serialize)]
pub struct MentorsResponse<'a> {
    pub skill: &'a str,
    pub count: usize,
    pub mentors: Vec<&'a UserProfile>,
}

/// Response for the friend recommendation endpoint
#[derive(Debug, Clone, Serialize)]
pub struct RecommendResponse<'a> {
    pub revision: u64,
    pub recommendations: Vec<FriendRecommendation<'a>>,
}

/// One search result with its score against the viewer
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a> {
    #[serde(flatten)]
    pub profile: &'a UserProfile,
    #[serde(rename = "matchScore")]
    pub match_score: MatchScore,
    #[serde(rename = "completionPercentage")]
    pub completion_percentage: u8,
}

/// Response for the search endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse<'a> {
    pub results: Vec<SearchHit<'a>>,
    #[serde(rename = "totalUsers")]
    pub total_users: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub revision: u64,
    pub population: usize,
    /// Approximate, entries are counted lazily by the cache
    #[serde(rename = "cachedResults")]
    pub cached_results: u64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
