use std::collections::HashSet;

use crate::core::{
    filters::search_profiles,
    recommend::recommend_friends,
    scoring::{calculate_match_score, shared_skills},
    trending::{mentors_for, trending_skills},
};
use crate::models::{FriendRecommendation, MatchScore, RankingLimits, SharedSkills, SkillTrend, UserProfile};

/// Entry point for the skill matching computations
///
/// Holds the configured list sizes and delegates to the pure functions in
/// `scoring`, `trending`, `recommend` and `filters`. Nothing here keeps
/// state between calls, so one matcher can serve every snapshot.
#[derive(Debug, Clone, Copy)]
pub struct SkillMatcher {
    limits: RankingLimits,
}

impl SkillMatcher {
    pub fn new(limits: RankingLimits) -> Self {
        Self { limits }
    }

    pub fn with_default_limits() -> Self {
        Self {
            limits: RankingLimits::default(),
        }
    }

    pub fn limits(&self) -> RankingLimits {
        self.limits
    }

    /// Symmetric match score between two optional profiles
    pub fn score(&self, user: Option<&UserProfile>, other: Option<&UserProfile>) -> MatchScore {
        calculate_match_score(user, other)
    }

    pub fn shared_skills(
        &self,
        user: Option<&UserProfile>,
        other: Option<&UserProfile>,
    ) -> SharedSkills {
        shared_skills(user, other)
    }

    /// Top offered skills, `limit` defaulting to the configured trending size
    pub fn trending<'a>(
        &self,
        population: &'a [UserProfile],
        limit: Option<usize>,
    ) -> Vec<SkillTrend<'a>> {
        let top_n = self.limits.resolve(limit, self.limits.trending);
        trending_skills(population, top_n)
    }

    pub fn mentors<'a>(&self, population: &'a [UserProfile], skill: &str) -> Vec<&'a UserProfile> {
        mentors_for(population, skill)
    }

    /// Friend suggestions for `current_user`
    ///
    /// # Arguments
    /// * `current_user` - The viewer, `None` when unknown
    /// * `population` - Current population snapshot
    /// * `friend_ids` - Ids of the viewer's existing friends
    /// * `limit` - Requested size, defaulting to the configured size
    pub fn recommend<'a>(
        &self,
        current_user: Option<&UserProfile>,
        population: &'a [UserProfile],
        friend_ids: &HashSet<String>,
        limit: Option<usize>,
    ) -> Vec<FriendRecommendation<'a>> {
        let top_n = self.limits.resolve(limit, self.limits.recommendations);
        recommend_friends(current_user, population, friend_ids, top_n)
    }

    /// Profiles matching `term`, each scored against the viewer
    pub fn search<'a>(
        &self,
        viewer: Option<&UserProfile>,
        population: &'a [UserProfile],
        term: &str,
    ) -> Vec<(&'a UserProfile, MatchScore)> {
        let viewer_id = viewer.map(UserProfile::user_id).filter(|id| !id.is_empty());

        search_profiles(population, term, viewer_id)
            .into_iter()
            .map(|profile| (profile, calculate_match_score(viewer, Some(profile))))
            .collect()
    }
}

impl Default for SkillMatcher {
    fn default() -> Self {
        Self::with_default_limits()
    }
}
