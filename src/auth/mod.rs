mod clients;
mod login;
mod lockin;
mod logout;

pub use clients::{ClientProvider, Clients};

use axum::{routing::get, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth", get(login::login_page))
        .route("/auth/{provider}", get(login::login))
        .route("/auth/callback/{provider}", get(lockin::lockin))
        .route("/logout", get(logout::logout))
}
