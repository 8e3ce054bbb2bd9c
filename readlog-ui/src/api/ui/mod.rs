//! UI Routes - HTML pages for the reading log
//!
//! Server-rendered HTML with one shared stylesheet and an inline SVG chart.
//!
//! # Structure
//! - **Static Assets** (`static_assets`): CSS serving
//! - **Layout** (`layout`): page shell, mode switch, sidebar summary, notices
//! - **Create** (`create`): new entry form and submit result
//! - **Review** (`review`): previous entries and the rating trend

use axum::{
    response::Redirect,
    routing::get,
    Router,
};
use readlog_common::ReadingEntry;
use tracing::warn;

use crate::AppState;

mod create;
mod layout;
mod review;
mod static_assets;

pub use layout::Notice;

use create::{create_page, submit_create};
use review::review_page;
use static_assets::serve_readlog_ui_css;

/// Shown when the entries file exists but cannot be read
pub const LOAD_ERROR_MESSAGE: &str = "Error loading data file. Starting with empty data.";

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/create") }))
        .route("/create", get(create_page).post(submit_create))
        .route("/review", get(review_page))
        .route("/static/readlog-ui.css", get(serve_readlog_ui_css))
}

/// Load entries for a page, turning a corrupt store into an on-page error
async fn load_entries(state: &AppState) -> (Vec<ReadingEntry>, Option<Notice>) {
    match state.store.load().await {
        Ok(entries) => (entries, None),
        Err(e) => {
            warn!("{}", e);
            (Vec::new(), Some(Notice::Error(LOAD_ERROR_MESSAGE.to_string())))
        }
    }
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }
}
