// Model exports
pub mod demo;
pub mod domain;
pub mod requests;
pub mod responses;

pub use demo::demo_profiles;
pub use domain::{UserProfile, MatchScore, SharedSkills, SkillTrend, FriendRecommendation, RankingLimits};
pub use requests::{ScoreRequest, RecommendRequest, TrendingQuery, SearchQuery};
pub use responses::{ScoreResponse, TrendingResponse, MentorsResponse, RecommendResponse, SearchHit, SearchResponse, HealthResponse, ErrorResponse};
