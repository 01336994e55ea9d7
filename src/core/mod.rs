// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod recommend;
pub mod scoring;
pub mod trending;

pub use filters::{is_listed, matches_search, search_profiles};
pub use matcher::SkillMatcher;
pub use recommend::{recommend_friends, DEFAULT_RECOMMENDATION_LIMIT};
pub use scoring::{calculate_match_score, shared_skills};
pub use trending::{mentors_for, trending_skills, DEFAULT_TRENDING_LIMIT};
