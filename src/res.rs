use axum::{debug_handler, extract::OriginalUri, http::{header, StatusCode}, response::{Html, IntoResponse, Response}};
use tower_sessions::Session;

use crate::{session::USER_ID, AppResult};

#[macro_export]
macro_rules! include_res {
    (bytes, $p:expr) => {
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
    (str, $p:expr) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
}

#[debug_handler]
pub async fn style() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css")],
        include_res!(str, "/style.css"),
    )
}

#[debug_handler]
pub async fn not_found(OriginalUri(uri): OriginalUri, session: Session) -> AppResult<Response> {
    tracing::warn!("attempted to access non-existent route: {}", uri.path());

    Ok((
        StatusCode::NOT_FOUND,
        Html(
            include_res!(str, "/pages/not_found.html")
                .replace("{nav}", &nav("", signed_in(&session).await?))
                .replace("{path}", &escape(uri.path())),
        ),
    )
        .into_response())
}

pub(crate) async fn signed_in(session: &Session) -> AppResult<bool> {
    Ok(session.get::<String>(USER_ID).await?.is_some())
}

pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const NAV_ITEMS: [(&str, &str); 4] = [
    ("home", "/"),
    ("browse", "/browse"),
    ("teams", "/teams"),
    ("profile", "/profile"),
];

pub(crate) fn nav(current: &str, signed_in: bool) -> String {
    let mut items = String::new();
    for (label, path) in NAV_ITEMS {
        items += &nav_item(label, path, current);
    }

    if signed_in {
        items += &nav_item("logout", "/logout", current);
    } else {
        items += &nav_item("login", "/auth", current);
    }

    include_res!(str, "/pages/nav.html").replace("{items}", &items)
}

fn nav_item(label: &str, path: &str, current: &str) -> String {
    let class = if current == path { "nav-item active" } else { "nav-item" };
    format!("<a class=\"{class}\" href=\"{path}\">{label}</a>")
}

pub(crate) fn success_banner(title: &str, detail: &str) -> String {
    // shown once per successful write, hidden again client-side after 3s
    format!(
        concat!(
            "<div class=\"banner success\" id=\"banner\">",
            "<div class=\"banner-title\">{}</div>",
            "<div class=\"banner-detail\">{}</div>",
            "</div>",
            "<script>setTimeout(function(){{var b=document.getElementById('banner');if(b)b.remove();}},3000);</script>",
        ),
        escape(title),
        escape(detail),
    )
}

pub(crate) fn error_banner(title: &str, detail: &str) -> String {
    format!(
        concat!(
            "<div class=\"banner error\">",
            "<div class=\"banner-title\">{}</div>",
            "<div class=\"banner-detail\">{}</div>",
            "</div>",
        ),
        escape(title),
        escape(detail),
    )
}
