mod card;
mod filter;
mod page;

use axum::{routing::get, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/browse", get(page::browse))
}
