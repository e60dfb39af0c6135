mod card;
mod new;
mod page;

use axum::{routing::get, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/teams", get(page::teams).post(new::create))
}
