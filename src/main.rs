use code_compass::{auth, browse, db, index, profiles, res, teams, AppState};
use axum::{routing::get, Router};
use sqlx::sqlite::SqlitePoolOptions;
use tower_http::catch_panic::CatchPanicLayer;
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::hours(24)));

    let db_pool = SqlitePoolOptions::new()
        .max_connections(16)
        .connect(
            dotenv::var("DATABASE_URL")
                .expect("DATABASE_URL must be set")
                .as_str(),
        )
        .await
        .expect("cannot open database");
    db::init(&db_pool).await.expect("cannot apply schema");

    let clients = auth::Clients::load(
        dotenv::var("CLIENT_SECRET").unwrap_or_else(|_| "client_secret.json".to_owned()),
    )
    .expect("cannot load OAuth client credentials");

    let app_state = AppState { db_pool, clients };

    let app = Router::new()
        .route("/", get(index::index))
        .route("/style.css", get(res::style))

        .merge(auth::router())
        .merge(browse::router())
        .merge(profiles::router())
        .merge(teams::router())

        .fallback(res::not_found)
        .with_state(app_state)
        .layer(session_layer)
        .layer(CatchPanicLayer::new());

    let bind_addr = dotenv::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("cannot bind listener");
    tracing::info!("listening on {bind_addr}");
    axum::serve(listener, app).await.unwrap();
}
