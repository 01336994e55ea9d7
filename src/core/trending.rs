use std::collections::HashMap;

use crate::models::{SkillTrend, UserProfile};

/// Default number of trending skills returned
pub const DEFAULT_TRENDING_LIMIT: usize = 5;

/// Rank offered skills by how many times they are offered
///
/// Every entry of every profile's `skills_offered` counts, so a profile
/// listing a skill twice contributes 2. Skills with equal counts keep the
/// order in which they were first seen while walking the population.
pub fn trending_skills(population: &[UserProfile], top_n: usize) -> Vec<SkillTrend<'_>> {
    let mut first_seen: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for profile in population {
        for skill in &profile.skills_offered {
            let count = counts.entry(skill.as_str()).or_insert_with(|| {
                first_seen.push(skill.as_str());
                0
            });
            *count += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = first_seen
        .into_iter()
        .map(|skill| (skill, counts[skill]))
        .collect();

    // sort_by is stable, ties stay in first-seen order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(top_n);

    ranked
        .into_iter()
        .map(|(skill, count)| SkillTrend {
            skill,
            count,
            mentors: mentors_for(population, skill),
        })
        .collect()
}

/// Profiles offering `skill` at least once, in population order
pub fn mentors_for<'a>(population: &'a [UserProfile], skill: &str) -> Vec<&'a UserProfile> {
    population
        .iter()
        .filter(|profile| profile.skills_offered.iter().any(|offered| offered == skill))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offering(id: &str, offered: &[&str]) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            skills_offered: offered.iter().map(|s| s.to_string()).collect(),
            ..UserProfile::default()
        }
    }

    #[test]
    fn test_counts_and_tie_order() {
        let population = vec![
            offering("1", &["x"]),
            offering("2", &["x", "y"]),
            offering("3", &["y"]),
        ];

        let trends = trending_skills(&population, DEFAULT_TRENDING_LIMIT);

        assert_eq!(trends.len(), 2);
        assert_eq!((trends[0].skill, trends[0].count), ("x", 2));
        assert_eq!((trends[1].skill, trends[1].count), ("y", 2));
    }

    #[test]
    fn test_sorted_by_count() {
        let population = vec![
            offering("1", &["a", "b"]),
            offering("2", &["b", "c"]),
            offering("3", &["c", "b"]),
        ];

        let trends = trending_skills(&population, DEFAULT_TRENDING_LIMIT);
        let order: Vec<&str> = trends.iter().map(|t| t.skill).collect();

        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_mentors_reference_population() {
        let population = vec![
            offering("1", &["Rust"]),
            offering("2", &["Go"]),
            offering("3", &["Rust"]),
        ];

        let trends = trending_skills(&population, DEFAULT_TRENDING_LIMIT);
        let rust = &trends[0];

        assert_eq!(rust.skill, "Rust");
        assert_eq!(rust.mentors.len(), 2);
        assert!(std::ptr::eq(rust.mentors[0], &population[0]));
        assert!(std::ptr::eq(rust.mentors[1], &population[2]));
    }

    #[test]
    fn test_duplicate_offers_count_twice_but_mentor_once() {
        let population = vec![offering("1", &["Go", "Go"]), offering("2", &["Rust"])];

        let trends = trending_skills(&population, DEFAULT_TRENDING_LIMIT);

        assert_eq!(trends[0].skill, "Go");
        assert_eq!(trends[0].count, 2);
        assert_eq!(trends[0].mentors.len(), 1);
    }

    #[test]
    fn test_truncation() {
        let population: Vec<UserProfile> = (0..7)
            .map(|i| offering(&i.to_string(), &[format!("skill-{}", i).as_str()]))
            .collect();

        assert_eq!(trending_skills(&population, 5).len(), 5);
        assert_eq!(trending_skills(&population, 0).len(), 0);
    }

    #[test]
    fn test_empty_population() {
        assert!(trending_skills(&[], DEFAULT_TRENDING_LIMIT).is_empty());
    }
}
