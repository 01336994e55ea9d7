use crate::models::{MatchScore, SharedSkills, UserProfile};

/// Calculate a symmetric match score (0-100) between two profiles
///
/// Scoring formula:
/// score = round(
///     (wanted_by_user ∩ offered_by_other + wanted_by_other ∩ offered_by_user)
///     / max(|wanted_by_user| + |wanted_by_other|, 1) * 100
/// )
///
/// Skill names are compared with exact, case-sensitive equality and
/// repeated entries are counted each time. A missing profile scores 0.
pub fn calculate_match_score(
    user: Option<&UserProfile>,
    other: Option<&UserProfile>,
) -> MatchScore {
    let (Some(user), Some(other)) = (user, other) else {
        return MatchScore::ZERO;
    };

    let matches_for_user = count_matches(&user.skills_wanted, &other.skills_offered);
    let matches_for_other = count_matches(&other.skills_wanted, &user.skills_offered);

    // Floor of 1 keeps two empty wanted lists at 0/1
    let denominator = (user.skills_wanted.len() + other.skills_wanted.len()).max(1);

    MatchScore::from_ratio((matches_for_user + matches_for_other) as f64 / denominator as f64)
}

/// List the skills each side would learn from the other
pub fn shared_skills(user: Option<&UserProfile>, other: Option<&UserProfile>) -> SharedSkills {
    let (Some(user), Some(other)) = (user, other) else {
        return SharedSkills::default();
    };

    SharedSkills {
        for_self: matching_skills(&user.skills_wanted, &other.skills_offered),
        for_other: matching_skills(&other.skills_wanted, &user.skills_offered),
    }
}

/// Count wanted entries that appear anywhere in `offered`
#[inline]
fn count_matches(wanted: &[String], offered: &[String]) -> usize {
    wanted.iter().filter(|skill| offered.contains(skill)).count()
}

#[inline]
fn matching_skills(wanted: &[String], offered: &[String]) -> Vec<String> {
    wanted
        .iter()
        .filter(|skill| offered.contains(skill))
        .cloned()
        .collect()
}
