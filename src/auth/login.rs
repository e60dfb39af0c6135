use axum::{debug_handler, extract::{Path, Query, State}, response::{Html, IntoResponse, Redirect, Response}};
use oauth2::{CsrfToken, PkceCodeChallenge, Scope};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{include_res, res, session::{CSRF_STATE, PKCE_VERIFIER, RETURN_URL}, AppResult};

use super::{clients::ClientProvider, Clients};

#[derive(Deserialize)]
pub(crate) struct LoginQuery {
    pub(crate) return_url: Option<String>,
}

#[debug_handler]
pub(crate) async fn login_page(
    Query(LoginQuery { return_url }): Query<LoginQuery>,
    State(clients): State<Clients>,
    session: Session,
) -> AppResult<Response> {
    let suffix = match &return_url {
        Some(url) => format!("?return_url={}", res::escape(url)),
        None => String::new(),
    };

    let mut buttons = String::new();
    for provider in clients.available() {
        buttons += &format!(
            "<a class=\"button command\" href=\"/auth/{}{}\">&gt; sign_in --with {}</a>",
            provider.slug(),
            suffix,
            provider,
        );
    }
    if buttons.is_empty() {
        buttons = "<div class=\"muted\">No identity providers configured</div>".to_owned();
    }

    Ok(Html(
        include_res!(str, "/pages/auth.html")
            .replace("{nav}", &res::nav("/auth", res::signed_in(&session).await?))
            .replace("{providers}", &buttons),
    )
    .into_response())
}

#[debug_handler]
pub(crate) async fn login(
    Path(provider): Path<ClientProvider>,
    Query(LoginQuery { return_url }): Query<LoginQuery>,
    State(clients): State<Clients>,
    session: Session,
) -> AppResult<Response> {
    let client = clients.get_client(provider)?;

    let (pkce_code_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

    let (authorize_url, csrf_state) = client.authorize_url(CsrfToken::new_random)
        .add_scope(Scope::new("openid".to_string()))
        .set_pkce_challenge(pkce_code_challenge)
        .url();

    session.insert(CSRF_STATE, csrf_state.secret()).await?;
    session.insert(PKCE_VERIFIER, pkce_verifier.secret()).await?;
    if let Some(return_url) = return_url {
        session.insert(RETURN_URL, return_url).await?;
    }

    Ok(Redirect::to(authorize_url.as_str()).into_response())
}
