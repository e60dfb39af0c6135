use time::{macros::format_description, OffsetDateTime};

use crate::{db::Team, include_res, res, AppResult};

fn has_text(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}

pub(crate) fn team_card(team: &Team) -> AppResult<String> {
    let skills = if has_text(&team.needed_skills) {
        format!(
            "<div class=\"muted small\">Looking for: {}</div>",
            res::escape(team.needed_skills.as_deref().unwrap_or(""))
        )
    } else {
        String::new()
    };

    let description = if has_text(&team.description) {
        format!(
            "<div class=\"muted tiny clamp-2\">{}</div>",
            res::escape(team.description.as_deref().unwrap_or(""))
        )
    } else {
        String::new()
    };

    let timeline = match team.timeline.as_deref() {
        Some(timeline) if !timeline.is_empty() => timeline,
        _ => "TBD",
    };

    let join = if has_text(&team.whatsapp_group) {
        format!(
            "<a class=\"button terminal\" href=\"{}\" target=\"_blank\" rel=\"noopener\">&gt; Join WhatsApp Group</a>",
            res::escape(team.whatsapp_group.as_deref().unwrap_or(""))
        )
    } else {
        String::new()
    };

    Ok(include_res!(str, "/pages/team_card.html")
        .replace("{skills}", &skills)
        .replace("{description}", &description)
        .replace("{join}", &join)
        .replace("{team_name}", &res::escape(&team.team_name))
        .replace("{hackathon_name}", &res::escape(&team.hackathon_name))
        .replace("{timeline}", &res::escape(timeline))
        .replace("{created}", &format_date(team.created_at)?))
}

fn format_date(ts: i64) -> AppResult<String> {
    let date = OffsetDateTime::from_unix_timestamp(ts)?;
    Ok(date.format(format_description!("[year]-[month]-[day]"))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team() -> Team {
        Team {
            id: "0192d3a0-0000-7000-8000-000000000000".to_owned(),
            user_id: "google.com:1".to_owned(),
            team_name: "Null Pointers".to_owned(),
            hackathon_name: "Smart India Hackathon 2024".to_owned(),
            needed_skills: Some("Frontend, UI/UX".to_owned()),
            timeline: Some("48 hours".to_owned()),
            whatsapp_group: Some("https://chat.whatsapp.com/abc".to_owned()),
            description: Some("Building a campus nav app".to_owned()),
            // 2024-03-01T00:00:00Z
            created_at: 1_709_251_200,
        }
    }

    #[test]
    fn card_renders_all_fields() {
        let html = team_card(&team()).unwrap();
        assert!(html.contains("Null Pointers"));
        assert!(html.contains("Event: Smart India Hackathon 2024"));
        assert!(html.contains("Looking for: Frontend, UI/UX"));
        assert!(html.contains("Timeline: 48 hours"));
        assert!(html.contains("Created: 2024-03-01"));
        assert!(html.contains("https://chat.whatsapp.com/abc"));
    }

    #[test]
    fn timeline_defaults_to_tbd() {
        let mut t = team();
        t.timeline = None;
        assert!(team_card(&t).unwrap().contains("Timeline: TBD"));

        t.timeline = Some(String::new());
        assert!(team_card(&t).unwrap().contains("Timeline: TBD"));
    }

    #[test]
    fn optional_blocks_drop_out_when_absent() {
        let mut t = team();
        t.needed_skills = None;
        t.description = Some(String::new());
        t.whatsapp_group = None;

        let html = team_card(&t).unwrap();
        assert!(!html.contains("Looking for:"));
        assert!(!html.contains("clamp-2"));
        assert!(!html.contains("Join WhatsApp Group"));
    }
}
