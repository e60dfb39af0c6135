use axum::{debug_handler, extract::State, response::{Html, IntoResponse, Response}};
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{db::Team, include_res, res, AppResult};

use super::{card, new::TeamForm};

// browsing the list never requires a session; a failed read is logged and
// the page renders with an empty list
pub(crate) async fn fetch_teams(db_pool: &SqlitePool) -> Vec<Team> {
    match sqlx::query_as::<_, Team>(
        "SELECT id,user_id,team_name,hackathon_name,needed_skills,timeline,whatsapp_group,description,created_at FROM teams ORDER BY created_at DESC",
    )
    .fetch_all(db_pool)
    .await
    {
        Ok(rows) => rows,
        Err(err) => {
            tracing::warn!("failed to fetch teams: {err}");
            Vec::new()
        }
    }
}

#[debug_handler]
pub(crate) async fn teams(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let teams = fetch_teams(&db_pool).await;
    render(&TeamForm::default(), &teams, "", res::signed_in(&session).await?)
}

pub(crate) fn render(
    form: &TeamForm,
    teams: &[Team],
    banner: &str,
    signed_in: bool,
) -> AppResult<Response> {
    let mut cards = String::new();
    for team in teams {
        cards += &card::team_card(team)?;
    }

    let empty = if teams.is_empty() {
        concat!(
            "<div class=\"empty-state\">",
            "<div class=\"empty-title\">&gt; No active teams found</div>",
            "<div class=\"muted small\">Be the first to create a team!</div>",
            "</div>",
        )
    } else {
        ""
    };

    Ok(Html(
        include_res!(str, "/pages/teams.html")
            .replace("{nav}", &res::nav("/teams", signed_in))
            .replace("{banner}", banner)
            .replace("{cards}", &cards)
            .replace("{empty}", empty)
            .replace("{team_count}", &teams.len().to_string())
            .replace("{team_name}", &res::escape(&form.team_name))
            .replace("{hackathon_name}", &res::escape(&form.hackathon_name))
            .replace("{needed_skills}", &res::escape(&form.needed_skills))
            .replace("{timeline}", &res::escape(&form.timeline))
            .replace("{whatsapp_group}", &res::escape(&form.whatsapp_group))
            .replace("{description}", &res::escape(&form.description)),
    )
    .into_response())
}

#[cfg(test)]
mod tests {
    use crate::{db, teams::new};

    #[tokio::test]
    async fn list_is_newest_first() {
        let pool = db::test_pool().await;
        let form = new::TeamForm {
            team_name: "First".to_owned(),
            ..new::TeamForm::default()
        };
        new::insert_team(&pool, "google.com:1", &form, 100).await.unwrap();

        let form = new::TeamForm {
            team_name: "Second".to_owned(),
            ..new::TeamForm::default()
        };
        new::insert_team(&pool, "google.com:1", &form, 200).await.unwrap();

        let teams = super::fetch_teams(&pool).await;
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].team_name, "Second");
        assert_eq!(teams[1].team_name, "First");
    }
}
