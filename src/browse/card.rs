use crate::{db::Profile, include_res, res};

use super::filter;

pub(crate) fn profile_card(profile: &Profile, now: i64) -> String {
    let name = match profile.name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => "Anonymous",
    };
    let year = match profile.year.as_deref() {
        Some(year) if !year.is_empty() => year,
        _ => "N/A",
    };
    let id_tag = profile
        .id
        .get(profile.id.len().saturating_sub(3)..)
        .unwrap_or("");

    include_res!(str, "/pages/browse_card.html")
        .replace("{skills_block}", &skills_block(&profile.skills))
        .replace("{interests_block}", &interests_block(&profile.interests))
        .replace("{contact_block}", &contact_block(profile))
        .replace("{name}", &res::escape(name))
        .replace("{id_tag}", &res::escape(id_tag))
        .replace("{year}", &res::escape(year))
        .replace("{active}", &filter::last_active(now, profile.created_at))
}

fn skills_block(skills: &Option<String>) -> String {
    if !filter::has_text(skills) {
        return String::new();
    }

    let mut tags = String::new();
    for skill in skills.as_deref().unwrap_or("").split(',') {
        let skill = skill.trim();
        if skill.is_empty() {
            continue;
        }
        tags += &format!("<span class=\"tag\">{}</span>", res::escape(skill));
    }

    format!(
        "<div class=\"card-label\">&gt; skills.list():</div><div class=\"tags\">{tags}</div>"
    )
}

fn interests_block(interests: &Option<String>) -> String {
    if !filter::has_text(interests) {
        return String::new();
    }

    format!(
        "<div class=\"card-label\">&gt; interests:</div><p class=\"muted small\">{}</p>",
        res::escape(interests.as_deref().unwrap_or(""))
    )
}

// contact actions show only when the handle exists and its visibility flag
// is still on
fn contact_block(profile: &Profile) -> String {
    let mut buttons = String::new();

    if filter::has_text(&profile.whatsapp) && profile.whatsapp_visible {
        buttons += &format!(
            "<a class=\"button terminal\" href=\"{}\" target=\"_blank\" rel=\"noopener\">&gt; WhatsApp</a>",
            whatsapp_url(profile.whatsapp.as_deref().unwrap_or(""))
        );
    }
    if filter::has_text(&profile.twitter) && profile.twitter_visible {
        buttons += &format!(
            "<a class=\"button terminal\" href=\"{}\" target=\"_blank\" rel=\"noopener\">&gt; X Handle</a>",
            x_url(profile.twitter.as_deref().unwrap_or(""))
        );
    }

    if buttons.is_empty() {
        String::new()
    } else {
        format!("<div class=\"contacts\">{buttons}</div>")
    }
}

pub(crate) fn whatsapp_url(number: &str) -> String {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    format!("https://wa.me/{digits}")
}

pub(crate) fn x_url(handle: &str) -> String {
    format!("https://x.com/{}", handle.strip_prefix('@').unwrap_or(handle))
}
