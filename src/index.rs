use axum::{debug_handler, response::{Html, IntoResponse, Response}};
use tower_sessions::Session;

use crate::{include_res, res, AppResult};

#[debug_handler]
pub async fn index(session: Session) -> AppResult<Response> {
    Ok(Html(
        include_res!(str, "/pages/index.html")
            .replace("{nav}", &res::nav("/", res::signed_in(&session).await?)),
    )
    .into_response())
}
