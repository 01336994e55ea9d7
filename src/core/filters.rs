use crate::models::UserProfile;

/// Check if a profile should appear in the published population
///
/// A listed profile has a non-blank name and has not opted out of
/// public visibility.
#[inline]
pub fn is_listed(profile: &UserProfile) -> bool {
    let has_name = profile
        .name
        .as_deref()
        .map_or(false, |name| !name.trim().is_empty());

    has_name && profile.public()
}

/// Check if a profile matches a free-text search term
///
/// Case-insensitive substring match against name, location, bio and both
/// skill lists. A blank term matches every profile.
pub fn matches_search(profile: &UserProfile, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    let contains = |value: &str| value.to_lowercase().contains(&needle);

    [&profile.name, &profile.location, &profile.bio]
        .into_iter()
        .flatten()
        .any(|field| contains(field.as_str()))
        || profile.skills_offered.iter().any(|skill| contains(skill.as_str()))
        || profile.skills_wanted.iter().any(|skill| contains(skill.as_str()))
}

/// Filter the population down to search results, in population order
///
/// `exclude_id` drops the viewer from their own results.
pub fn search_profiles<'a>(
    population: &'a [UserProfile],
    term: &str,
    exclude_id: Option<&str>,
) -> Vec<&'a UserProfile> {
    population
        .iter()
        .filter(|profile| exclude_id != Some(profile.user_id()))
        .filter(|profile| matches_search(profile, term))
        .collect()
}
