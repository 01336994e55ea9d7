use super::UserProfile;

/// Demo members used when no document database is configured
pub fn demo_profiles() -> Vec<UserProfile> {
    vec![
        demo_profile(
            "demo_alice_johnson",
            "Alice Johnson",
            "San Francisco, CA",
            "evenings",
            &["JavaScript", "React", "Node.js"],
            &["Python", "Machine Learning", "Data Science"],
            "Full-stack developer passionate about learning new technologies.",
            4.8,
            12,
        ),
        demo_profile(
            "demo_bob_smith",
            "Bob Smith",
            "New York, NY",
            "weekends",
            &["Python", "Django", "PostgreSQL"],
            &["React", "TypeScript", "AWS"],
            "Backend engineer keen to pick up frontend and cloud platforms.",
            4.9,
            8,
        ),
        demo_profile(
            "demo_carol_davis",
            "Carol Davis",
            "Austin, TX",
            "flexible",
            &["UI/UX Design", "Figma", "Adobe Creative Suite"],
            &["Frontend Development", "CSS", "Animation"],
            "Designer expanding into development.",
            5.0,
            15,
        ),
        demo_profile(
            "demo_david_wilson",
            "David Wilson",
            "Seattle, WA",
            "weekdays",
            &["Data Science", "Machine Learning", "R"],
            &["Web Development", "JavaScript", "APIs"],
            "Data scientist moving into full-stack development.",
            4.7,
            6,
        ),
        demo_profile(
            "demo_emma_brown",
            "Emma Brown",
            "Los Angeles, CA",
            "evenings",
            &["Digital Marketing", "SEO", "Content Strategy"],
            &["Graphic Design", "Video Editing", "Photography"],
            "Marketing professional looking to grow creative skills.",
            4.6,
            10,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn demo_profile(
    id: &str,
    name: &str,
    location: &str,
    availability: &str,
    offered: &[&str],
    wanted: &[&str],
    bio: &str,
    rating: f64,
    completed_swaps: u32,
) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        uid: Some(id.to_string()),
        name: Some(name.to_string()),
        email: None,
        location: Some(location.to_string()),
        bio: Some(bio.to_string()),
        availability: Some(availability.to_string()),
        skills_offered: offered.iter().map(|s| s.to_string()).collect(),
        skills_wanted: wanted.iter().map(|s| s.to_string()).collect(),
        is_public: Some(true),
        rating: Some(rating),
        completed_swaps: Some(completed_swaps),
        created_at: None,
    }
}
