use axum::{debug_handler, extract::State, response::Response, Form};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{db, res, session::USER_ID, AppResult};

use super::page;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TeamForm {
    #[serde(default)]
    pub(crate) team_name: String,
    #[serde(default)]
    pub(crate) hackathon_name: String,
    #[serde(default)]
    pub(crate) needed_skills: String,
    #[serde(default)]
    pub(crate) timeline: String,
    #[serde(default)]
    pub(crate) whatsapp_group: String,
    #[serde(default)]
    pub(crate) description: String,
}

#[debug_handler]
pub(crate) async fn create(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(form): Form<TeamForm>,
) -> AppResult<Response> {
    // precondition, checked before touching the table at all
    let Some(user_id) = session.get::<String>(USER_ID).await? else {
        let teams = page::fetch_teams(&db_pool).await;
        return page::render(
            &form,
            &teams,
            &res::error_banner("Authentication Required", "Please log in to create a team"),
            false,
        );
    };

    match insert_team(&db_pool, &user_id, &form, db::now_unix()).await {
        Ok(id) => {
            tracing::info!("team {id} created by {user_id}");
            // re-read only after the insert is acknowledged, so the new row
            // is in the list
            let teams = page::fetch_teams(&db_pool).await;
            page::render(
                &TeamForm::default(),
                &teams,
                &res::success_banner(
                    "Team creation request submitted",
                    "Broadcasting to all active users...",
                ),
                true,
            )
        }
        Err(err) => {
            tracing::error!("failed to create team for {user_id}: {err}");
            let teams = page::fetch_teams(&db_pool).await;
            page::render(
                &form,
                &teams,
                &res::error_banner("Error", "Failed to create team"),
                true,
            )
        }
    }
}

pub(crate) async fn insert_team(
    db_pool: &SqlitePool,
    user_id: &str,
    form: &TeamForm,
    now: i64,
) -> Result<String, sqlx::Error> {
    let id = Uuid::now_v7();
    sqlx::query(
        "INSERT INTO teams (id,user_id,team_name,hackathon_name,needed_skills,timeline,whatsapp_group,description,created_at)
         VALUES (?,?,?,?,?,?,?,?,?)",
    )
    .bind(id.to_string())
    .bind(user_id)
    .bind(&form.team_name)
    .bind(&form.hackathon_name)
    .bind(&form.needed_skills)
    .bind(&form.timeline)
    .bind(&form.whatsapp_group)
    .bind(&form.description)
    .bind(now)
    .execute(db_pool)
    .await?;

    Ok(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> TeamForm {
        TeamForm {
            team_name: "Null Pointers".to_owned(),
            hackathon_name: "Smart India Hackathon 2024".to_owned(),
            needed_skills: "Frontend, Backend".to_owned(),
            timeline: "48 hours".to_owned(),
            whatsapp_group: String::new(),
            description: "campus nav app".to_owned(),
        }
    }

    #[tokio::test]
    async fn identical_submissions_create_distinct_rows() {
        let pool = db::test_pool().await;

        let first = insert_team(&pool, "google.com:1", &form(), 100).await.unwrap();
        let second = insert_team(&pool, "google.com:1", &form(), 100).await.unwrap();
        assert_ne!(first, second);

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM teams")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn row_carries_the_creating_user() {
        let pool = db::test_pool().await;
        let id = insert_team(&pool, "github.com:7", &form(), 100).await.unwrap();

        let (user_id, team_name): (String, String) =
            sqlx::query_as("SELECT user_id,team_name FROM teams WHERE id=?")
                .bind(&id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(user_id, "github.com:7");
        assert_eq!(team_name, "Null Pointers");
    }
}
