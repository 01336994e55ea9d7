use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Marketplace member as published by the document database
///
/// Only `id` and the two skill lists take part in matching. Everything else
/// is carried through for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(rename = "skillsOffered", default, deserialize_with = "null_as_empty")]
    pub skills_offered: Vec<String>,
    #[serde(rename = "skillsWanted", default, deserialize_with = "null_as_empty")]
    pub skills_wanted: Vec<String>,
    #[serde(rename = "isPublic", default)]
    pub is_public: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub rating: Option<f64>,
    #[serde(rename = "completedSwaps", default, deserialize_with = "lenient")]
    pub completed_swaps: Option<u32>,
    #[serde(rename = "createdAt", default, deserialize_with = "lenient")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl UserProfile {
    /// Identifier used for self and friend exclusion, falling back to `uid`
    pub fn user_id(&self) -> &str {
        if self.id.is_empty() {
            self.uid.as_deref().unwrap_or_default()
        } else {
            &self.id
        }
    }

    /// Profiles are public unless the flag is explicitly false
    pub fn public(&self) -> bool {
        self.is_public.unwrap_or(true)
    }

    pub fn rating(&self) -> f64 {
        self.rating.unwrap_or(5.0)
    }

    pub fn completed_swaps(&self) -> u32 {
        self.completed_swaps.unwrap_or(0)
    }

    pub fn availability(&self) -> &str {
        self.availability.as_deref().unwrap_or("flexible")
    }

    /// Share of filled-in profile sections as a rounded percentage
    ///
    /// Sections: name, location, bio, offered skills, wanted skills.
    pub fn completion_percentage(&self) -> u8 {
        let filled = |field: &Option<String>| {
            field.as_deref().map_or(false, |value| !value.trim().is_empty())
        };

        let sections = [
            filled(&self.name),
            filled(&self.location),
            filled(&self.bio),
            !self.skills_offered.is_empty(),
            !self.skills_wanted.is_empty(),
        ];
        let complete = sections.iter().filter(|done| **done).count();

        ((complete as f64 / sections.len() as f64) * 100.0).round() as u8
    }
}

/// Treat an explicit `null` skill list the same as a missing one
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Display-only fields: a value of the wrong shape reads as missing
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Compatibility percentage between two profiles, always within 0..=100
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MatchScore(u8);

impl MatchScore {
    pub const ZERO: MatchScore = MatchScore(0);
    pub const MAX: MatchScore = MatchScore(100);

    /// Convert a match ratio into a rounded percentage
    pub fn from_ratio(ratio: f64) -> Self {
        if !ratio.is_finite() {
            return Self::ZERO;
        }
        Self((ratio * 100.0).round().clamp(0.0, 100.0) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<MatchScore> for u8 {
    fn from(score: MatchScore) -> Self {
        score.0
    }
}

impl std::fmt::Display for MatchScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Skills each side of a pairing can learn from the other
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SharedSkills {
    /// Skills the first profile wants and the second offers
    #[serde(rename = "forSelf")]
    pub for_self: Vec<String>,
    /// Skills the second profile wants and the first offers
    #[serde(rename = "forOther")]
    pub for_other: Vec<String>,
}

/// A skill ranked by how many offers it has across the population
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillTrend<'a> {
    pub skill: &'a str,
    pub count: usize,
    pub mentors: Vec<&'a UserProfile>,
}

/// Suggested connection for the current user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FriendRecommendation<'a> {
    #[serde(flatten)]
    pub profile: &'a UserProfile,
    #[serde(rename = "matchScore")]
    pub match_score: MatchScore,
}

/// Default and maximum result sizes for ranked lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingLimits {
    pub trending: usize,
    pub recommendations: usize,
    pub max: usize,
}

impl RankingLimits {
    /// Pick the requested size, or the default, capped at `max`
    pub fn resolve(&self, requested: Option<usize>, default: usize) -> usize {
        requested.unwrap_or(default).min(self.max)
    }
}

impl Default for RankingLimits {
    fn default() -> Self {
        Self {
            trending: 5,
            recommendations: 3,
            max: 50,
        }
    }
}
