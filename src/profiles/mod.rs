mod editor;

use axum::{routing::get, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(editor::editor_page).post(editor::save))
}
