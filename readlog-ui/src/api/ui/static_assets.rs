//! Static asset handlers
//!
//! Embeds and serves the stylesheet at compile time

use axum::{http::StatusCode, response::{IntoResponse, Response}};

const READLOG_UI_CSS: &str = include_str!("../../../static/readlog-ui.css");

/// GET /static/readlog-ui.css
pub async fn serve_readlog_ui_css() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "text/css"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        READLOG_UI_CSS,
    )
        .into_response()
}
