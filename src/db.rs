use sqlx::SqlitePool;
use time::OffsetDateTime;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Profile {
    pub id: String,
    pub name: Option<String>,
    pub year: Option<String>,
    pub skills: Option<String>,
    pub interests: Option<String>,
    pub whatsapp: Option<String>,
    pub twitter: Option<String>,
    pub whatsapp_visible: bool,
    pub twitter_visible: bool,
    pub created_at: i64,

    // unique: id (one row per signed-in user, upsert keyed on it)
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Team {
    pub id: String,
    pub user_id: String,
    pub team_name: String,
    pub hackathon_name: String,
    pub needed_skills: Option<String>,
    pub timeline: Option<String>,
    pub whatsapp_group: Option<String>,
    pub description: Option<String>,
    pub created_at: i64,

    // unique: id (insert-only, any number of teams per user_id)
}

pub async fn init(db_pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS profiles (
            id TEXT PRIMARY KEY,
            name TEXT,
            year TEXT,
            skills TEXT,
            interests TEXT,
            whatsapp TEXT,
            twitter TEXT,
            whatsapp_visible INTEGER NOT NULL DEFAULT 1,
            twitter_visible INTEGER NOT NULL DEFAULT 1,
            created_at INTEGER NOT NULL
        )",
    )
    .execute(db_pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS teams (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            team_name TEXT NOT NULL,
            hackathon_name TEXT NOT NULL,
            needed_skills TEXT,
            timeline TEXT,
            whatsapp_group TEXT,
            description TEXT,
            created_at INTEGER NOT NULL
        )",
    )
    .execute(db_pool)
    .await?;

    Ok(())
}

pub(crate) fn now_unix() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    // a pool with more than one connection would hand each its own :memory: db
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    init(&pool).await.unwrap();
    pool
}
