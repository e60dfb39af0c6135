use crate::db::Profile;

pub(crate) fn has_text(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}

// a profile with no name, or with neither skills nor interests, never shows
// up in the directory
pub(crate) fn is_displayable(profile: &Profile) -> bool {
    has_text(&profile.name) && (has_text(&profile.skills) || has_text(&profile.interests))
}

fn field_contains(field: &Option<String>, needle: &str) -> bool {
    field
        .as_deref()
        .is_some_and(|s| s.to_lowercase().contains(needle))
}

pub(crate) fn search<'a>(profiles: &'a [Profile], query: &str) -> Vec<&'a Profile> {
    if query.is_empty() {
        return profiles.iter().collect();
    }

    let needle = query.to_lowercase();
    profiles
        .iter()
        .filter(|p| {
            field_contains(&p.name, &needle)
                || field_contains(&p.skills, &needle)
                || field_contains(&p.interests, &needle)
        })
        .collect()
}

pub(crate) fn last_active(now: i64, created_at: i64) -> String {
    let hours = (now - created_at) / 3600;

    if hours < 1 {
        "Just now".to_owned()
    } else if hours < 24 {
        format!("{hours} hours ago")
    } else {
        format!("{} days ago", hours / 24)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, skills: &str, interests: &str) -> Profile {
        fn opt(s: &str) -> Option<String> {
            if s.is_empty() { None } else { Some(s.to_owned()) }
        }

        Profile {
            id: "google.com:42".to_owned(),
            name: opt(name),
            year: None,
            skills: opt(skills),
            interests: opt(interests),
            whatsapp: None,
            twitter: None,
            whatsapp_visible: true,
            twitter_visible: true,
            created_at: 0,
        }
    }

    #[test]
    fn nameless_profiles_never_display() {
        assert!(!is_displayable(&profile("", "Rust, C", "systems")));

        let mut p = profile("Asha", "Rust", "");
        p.name = Some(String::new());
        assert!(!is_displayable(&p));
    }

    #[test]
    fn named_but_empty_profiles_never_display() {
        assert!(!is_displayable(&profile("Asha", "", "")));
    }

    #[test]
    fn either_skills_or_interests_suffices() {
        assert!(is_displayable(&profile("Asha", "Rust", "")));
        assert!(is_displayable(&profile("Asha", "", "distributed systems")));
    }

    #[test]
    fn search_is_case_insensitive_substring_over_three_fields() {
        let profiles = vec![
            profile("Asha Patel", "Rust, Python", "systems programming"),
            profile("Ben", "JavaScript", "game dev"),
            profile("Chandra", "go", "RUSTACEAN meetups"),
        ];

        let hits = search(&profiles, "rust");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].name.as_deref(), Some("Asha Patel"));
        assert_eq!(hits[1].name.as_deref(), Some("Chandra"));

        let hits = search(&profiles, "BEN");
        assert_eq!(hits.len(), 1);

        assert!(search(&profiles, "cobol").is_empty());
    }

    #[test]
    fn empty_query_resets_to_the_full_set() {
        let profiles = vec![
            profile("Asha", "Rust", ""),
            profile("Ben", "JavaScript", ""),
        ];

        // narrowing then clearing must recompute from the full set, not the
        // previous subset
        let narrowed = search(&profiles, "rust");
        assert_eq!(narrowed.len(), 1);
        let reset = search(&profiles, "");
        assert_eq!(reset.len(), profiles.len());
    }

    #[test]
    fn freshness_label_boundaries() {
        assert_eq!(last_active(59 * 60, 0), "Just now");
        assert_eq!(last_active(60 * 60, 0), "1 hours ago");
        assert_eq!(last_active(23 * 3600, 0), "23 hours ago");
        assert_eq!(last_active(24 * 3600, 0), "1 days ago");
        assert_eq!(last_active(49 * 3600, 0), "2 days ago");
    }

    #[test]
    fn freshness_is_a_function_of_now() {
        let created = 1_000_000;
        assert_eq!(last_active(created, created), "Just now");
        assert_eq!(last_active(created + 3 * 3600, created), "3 hours ago");
    }
}
