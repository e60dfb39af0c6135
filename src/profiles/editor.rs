use axum::{debug_handler, extract::State, response::{Html, IntoResponse, Redirect, Response}, Form};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{db::{self, Profile}, include_res, res, session::USER_ID, AppResult};

#[derive(Debug, Deserialize)]
pub(crate) struct ProfileForm {
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) year: String,
    #[serde(default)]
    pub(crate) skills: String,
    #[serde(default)]
    pub(crate) interests: String,
    #[serde(default)]
    pub(crate) whatsapp: String,
    #[serde(default)]
    pub(crate) twitter: String,
    // unchecked switches are simply absent from the form body
    #[serde(default)]
    pub(crate) whatsapp_visible: bool,
    #[serde(default)]
    pub(crate) twitter_visible: bool,
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            year: String::new(),
            skills: String::new(),
            interests: String::new(),
            whatsapp: String::new(),
            twitter: String::new(),
            whatsapp_visible: true,
            twitter_visible: true,
        }
    }
}

impl ProfileForm {
    fn from_row(row: &Profile) -> Self {
        Self {
            name: row.name.clone().unwrap_or_default(),
            year: row.year.clone().unwrap_or_default(),
            skills: row.skills.clone().unwrap_or_default(),
            interests: row.interests.clone().unwrap_or_default(),
            whatsapp: row.whatsapp.clone().unwrap_or_default(),
            twitter: row.twitter.clone().unwrap_or_default(),
            whatsapp_visible: row.whatsapp_visible,
            twitter_visible: row.twitter_visible,
        }
    }
}

#[debug_handler]
pub(crate) async fn editor_page(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let Some(user_id) = session.get::<String>(USER_ID).await? else {
        return Ok(Redirect::to("/auth?return_url=/profile").into_response());
    };

    let form = match sqlx::query_as::<_, Profile>("SELECT id,name,year,skills,interests,whatsapp,twitter,whatsapp_visible,twitter_visible,created_at FROM profiles WHERE id=?")
        .bind(&user_id)
        .fetch_optional(&db_pool)
        .await
    {
        Ok(Some(row)) => ProfileForm::from_row(&row),
        Ok(None) => ProfileForm::default(),
        Err(err) => {
            tracing::warn!("failed to load profile for {user_id}: {err}");
            ProfileForm::default()
        }
    };

    Ok(render(&form, ""))
}

#[debug_handler]
pub(crate) async fn save(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(form): Form<ProfileForm>,
) -> AppResult<Response> {
    let Some(user_id) = session.get::<String>(USER_ID).await? else {
        return Ok(Redirect::to("/auth?return_url=/profile").into_response());
    };

    let banner = match upsert_profile(&db_pool, &user_id, &form, db::now_unix()).await {
        Ok(()) => {
            tracing::info!("profile saved for {user_id}");
            res::success_banner(
                "Profile initialized successfully",
                "Ready to connect with fellow hackers...",
            )
        }
        Err(err) => {
            tracing::error!("failed to save profile for {user_id}: {err}");
            res::error_banner("Error saving profile", &err.to_string())
        }
    };

    Ok(render(&form, &banner))
}

// full replacement keyed on id; created_at sticks with the first insert
pub(crate) async fn upsert_profile(
    db_pool: &SqlitePool,
    user_id: &str,
    form: &ProfileForm,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO profiles (id,name,year,skills,interests,whatsapp,twitter,whatsapp_visible,twitter_visible,created_at)
         VALUES (?,?,?,?,?,?,?,?,?,?)
         ON CONFLICT(id) DO UPDATE SET
            name=excluded.name,
            year=excluded.year,
            skills=excluded.skills,
            interests=excluded.interests,
            whatsapp=excluded.whatsapp,
            twitter=excluded.twitter,
            whatsapp_visible=excluded.whatsapp_visible,
            twitter_visible=excluded.twitter_visible",
    )
    .bind(user_id)
    .bind(&form.name)
    .bind(&form.year)
    .bind(&form.skills)
    .bind(&form.interests)
    .bind(&form.whatsapp)
    .bind(&form.twitter)
    .bind(form.whatsapp_visible)
    .bind(form.twitter_visible)
    .bind(now)
    .execute(db_pool)
    .await?;

    Ok(())
}

fn render(form: &ProfileForm, banner: &str) -> Response {
    Html(
        include_res!(str, "/pages/profile.html")
            .replace("{nav}", &res::nav("/profile", true))
            .replace("{banner}", banner)
            .replace("{whatsapp_checked}", checked(form.whatsapp_visible))
            .replace("{twitter_checked}", checked(form.twitter_visible))
            .replace("{name}", &res::escape(&form.name))
            .replace("{year}", &res::escape(&form.year))
            .replace("{skills}", &res::escape(&form.skills))
            .replace("{interests}", &res::escape(&form.interests))
            .replace("{whatsapp}", &res::escape(&form.whatsapp))
            .replace("{twitter}", &res::escape(&form.twitter)),
    )
    .into_response()
}

fn checked(on: bool) -> &'static str {
    if on { "checked" } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn filled_form() -> ProfileForm {
        ProfileForm {
            name: "Asha Patel".to_owned(),
            year: "2nd Year".to_owned(),
            skills: "Rust, Python".to_owned(),
            interests: "systems programming".to_owned(),
            whatsapp: "+919876543210".to_owned(),
            twitter: "@asha_dev".to_owned(),
            whatsapp_visible: true,
            twitter_visible: false,
        }
    }

    async fn load(pool: &SqlitePool, id: &str) -> Profile {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id=?")
            .bind(id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[test]
    fn empty_form_defaults_visibility_on() {
        let form = ProfileForm::default();
        assert!(form.whatsapp_visible);
        assert!(form.twitter_visible);
        assert!(form.name.is_empty());
    }

    #[tokio::test]
    async fn upsert_is_idempotent_and_keeps_created_at() {
        let pool = db::test_pool().await;
        let form = filled_form();

        upsert_profile(&pool, "google.com:1", &form, 100).await.unwrap();
        upsert_profile(&pool, "google.com:1", &form, 200).await.unwrap();

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM profiles")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);

        let row = load(&pool, "google.com:1").await;
        assert_eq!(row.name.as_deref(), Some("Asha Patel"));
        assert_eq!(row.skills.as_deref(), Some("Rust, Python"));
        assert!(!row.twitter_visible);
        assert_eq!(row.created_at, 100);
    }

    #[tokio::test]
    async fn resubmit_overwrites_the_whole_row() {
        let pool = db::test_pool().await;

        upsert_profile(&pool, "github.com:2", &filled_form(), 50).await.unwrap();

        let mut second = filled_form();
        second.name = "A. Patel".to_owned();
        second.whatsapp = String::new();
        second.twitter_visible = true;
        upsert_profile(&pool, "github.com:2", &second, 60).await.unwrap();

        let row = load(&pool, "github.com:2").await;
        assert_eq!(row.name.as_deref(), Some("A. Patel"));
        assert_eq!(row.whatsapp.as_deref(), Some(""));
        assert!(row.twitter_visible);
        assert_eq!(row.created_at, 50);
    }

    #[tokio::test]
    async fn all_blank_submission_is_accepted() {
        let pool = db::test_pool().await;

        upsert_profile(&pool, "google.com:3", &ProfileForm::default(), 10)
            .await
            .unwrap();

        let row = load(&pool, "google.com:3").await;
        assert_eq!(row.name.as_deref(), Some(""));
        assert_eq!(row.interests.as_deref(), Some(""));
        assert!(row.whatsapp_visible);
        assert!(row.twitter_visible);
    }
}
