use axum::{debug_handler, extract::{Query, State}, response::{Html, IntoResponse, Response}};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{db::{self, Profile}, include_res, res, AppResult};

use super::{card, filter};

#[derive(Deserialize)]
pub(crate) struct BrowseQuery {
    q: Option<String>,
}

#[debug_handler]
pub(crate) async fn browse(
    Query(BrowseQuery { q }): Query<BrowseQuery>,
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let query = q.unwrap_or_default();

    let (rows, load_failed) = match sqlx::query_as::<_, Profile>(
        "SELECT id,name,year,skills,interests,whatsapp,twitter,whatsapp_visible,twitter_visible,created_at FROM profiles ORDER BY created_at DESC",
    )
    .fetch_all(&db_pool)
    .await
    {
        Ok(rows) => (rows, false),
        Err(err) => {
            tracing::error!("failed to fetch profiles: {err}");
            (Vec::new(), true)
        }
    };

    let displayable: Vec<Profile> = rows.into_iter().filter(filter::is_displayable).collect();
    let matches = filter::search(&displayable, &query);

    let now = db::now_unix();
    let mut cards = String::new();
    for profile in &matches {
        cards += &card::profile_card(profile, now);
    }

    let notice = if load_failed {
        res::error_banner("Error", "Failed to fetch profiles")
    } else {
        String::new()
    };

    let empty = if !load_failed && matches.is_empty() {
        if displayable.is_empty() {
            empty_state("No profiles found", "No users have created profiles yet")
        } else {
            empty_state("No results found", "Try adjusting your search terms")
        }
    } else {
        String::new()
    };

    Ok(Html(
        include_res!(str, "/pages/browse.html")
            .replace("{nav}", &res::nav("/browse", res::signed_in(&session).await?))
            .replace("{count}", &format!("Found {} active hackers", matches.len()))
            .replace("{notice}", &notice)
            .replace("{cards}", &cards)
            .replace("{empty}", &empty)
            .replace("{query}", &res::escape(&query)),
    )
    .into_response())
}

fn empty_state(title: &str, detail: &str) -> String {
    format!(
        concat!(
            "<div class=\"empty-state\">",
            "<div class=\"empty-title\">&gt; {}</div>",
            "<div class=\"muted small\">{}</div>",
            "</div>",
        ),
        res::escape(title),
        res::escape(detail),
    )
}
