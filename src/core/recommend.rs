use std::collections::HashSet;

use crate::core::scoring::calculate_match_score;
use crate::models::{FriendRecommendation, UserProfile};

/// Default number of friend suggestions returned
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 3;

/// Rank the population as friend suggestions for `current_user`
///
/// The current user and existing friends are left out, the rest are
/// scored against the current user and sorted by score. Equal scores keep
/// population order. Without a current user every score is 0, so the
/// result is the first `top_n` non-friend profiles.
pub fn recommend_friends<'a>(
    current_user: Option<&UserProfile>,
    population: &'a [UserProfile],
    existing_friend_ids: &HashSet<String>,
    top_n: usize,
) -> Vec<FriendRecommendation<'a>> {
    // A profile without any id cannot be anyone's self
    let self_id = current_user
        .map(UserProfile::user_id)
        .filter(|id| !id.is_empty());

    let mut recommendations: Vec<FriendRecommendation<'a>> = population
        .iter()
        .filter(|profile| Some(profile.user_id()) != self_id)
        .filter(|profile| !existing_friend_ids.contains(profile.user_id()))
        .map(|profile| FriendRecommendation {
            profile,
            match_score: calculate_match_score(current_user, Some(profile)),
        })
        .collect();

    recommendations.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    recommendations.truncate(top_n);

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchScore;

    fn create_candidate(id: &str, offered: &[&str], wanted: &[&str]) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            name: Some(format!("User {}", id)),
            skills_offered: offered.iter().map(|s| s.to_string()).collect(),
            skills_wanted: wanted.iter().map(|s| s.to_string()).collect(),
            ..UserProfile::default()
        }
    }

    fn ids<'a>(recommendations: &[FriendRecommendation<'a>]) -> Vec<&'a str> {
        recommendations.iter().map(|r| r.profile.user_id()).collect()
    }

    #[test]
    fn test_anonymous_user_excludes_nobody() {
        let current = UserProfile {
            skills_wanted: vec!["Go".to_string()],
            ..UserProfile::default()
        };
        let unnamed = UserProfile {
            name: Some("No Id".to_string()),
            skills_offered: vec!["Go".to_string()],
            ..UserProfile::default()
        };
        let population = vec![create_candidate("1", &[], &[]), unnamed];

        let result = recommend_friends(Some(&current), &population, &HashSet::new(), 3);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].profile.user_id(), "");
        assert_eq!(result[0].match_score, MatchScore::MAX);
    }

    #[test]
    fn test_excludes_self_and_friends() {
        let current = create_candidate("1", &[], &[]);
        let population = vec![
            create_candidate("1", &[], &[]),
            create_candidate("2", &[], &[]),
            create_candidate("3", &[], &[]),
        ];
        let friends = HashSet::from(["2".to_string()]);

        let result = recommend_friends(Some(&current), &population, &friends, 10);

        assert_eq!(ids(&result), vec!["3"]);
    }

    #[test]
    fn test_higher_score_ranks_first() {
        let current = create_candidate("1", &[], &["Go"]);
        let population = vec![
            create_candidate("3", &[], &[]),
            create_candidate("2", &["Go"], &[]),
        ];

        let result = recommend_friends(Some(&current), &population, &HashSet::new(), 3);

        assert_eq!(ids(&result), vec!["2", "3"]);
        assert_eq!(result[0].match_score, MatchScore::MAX);
        assert_eq!(result[1].match_score, MatchScore::ZERO);
    }

    #[test]
    fn test_ties_keep_population_order() {
        let current = create_candidate("0", &[], &["Go"]);
        let population = vec![
            create_candidate("a", &[], &[]),
            create_candidate("b", &["Go"], &[]),
            create_candidate("c", &[], &[]),
            create_candidate("d", &["Go"], &[]),
        ];

        let result = recommend_friends(Some(&current), &population, &HashSet::new(), 10);

        assert_eq!(ids(&result), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_without_current_user() {
        let population = vec![
            create_candidate("1", &["Go"], &["Rust"]),
            create_candidate("2", &["Rust"], &["Go"]),
            create_candidate("3", &[], &[]),
            create_candidate("4", &[], &[]),
            create_candidate("5", &[], &[]),
        ];
        let friends = HashSet::from(["2".to_string()]);

        let result = recommend_friends(None, &population, &friends, DEFAULT_RECOMMENDATION_LIMIT);

        assert_eq!(ids(&result), vec!["1", "3", "4"]);
        assert!(result.iter().all(|r| r.match_score == MatchScore::ZERO));
    }

    #[test]
    fn test_respects_limit() {
        let current = create_candidate("me", &[], &[]);
        let population: Vec<UserProfile> = (0..20)
            .map(|i| create_candidate(&i.to_string(), &[], &[]))
            .collect();

        let result = recommend_friends(Some(&current), &population, &HashSet::new(), 3);

        assert_eq!(result.len(), 3);
    }
}
