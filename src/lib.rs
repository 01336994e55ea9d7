//! SkillSwap Algo - skill matching service for the SkillSwap marketplace
//!
//! This library provides the matching core used by the marketplace: a
//! symmetric skill match score, trending skill aggregation and friend
//! recommendations, all computed over an in-memory population snapshot.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{calculate_match_score, recommend_friends, trending_skills, SkillMatcher};
pub use models::{UserProfile, MatchScore, SkillTrend, FriendRecommendation, RankingLimits};
pub use services::{PopulationStore, PopulationSnapshot};
