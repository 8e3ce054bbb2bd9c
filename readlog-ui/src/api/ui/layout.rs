//! Page shell shared by the create and review pages

use std::fmt::Write;

use readlog_common::stats::{format_average, Summary};
use readlog_common::ReadingEntry;

use super::escape_html;
use crate::api::buildinfo::BuildInfo;

/// Status message rendered above page content
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Info(String),
    Warning(String),
    Error(String),
}

impl Notice {
    pub fn render(&self) -> String {
        let (class, text) = match self {
            Notice::Success(text) => ("notice-success", text),
            Notice::Info(text) => ("notice-info", text),
            Notice::Warning(text) => ("notice-warning", text),
            Notice::Error(text) => ("notice-error", text),
        };
        format!(r#"<div class="notice {}">{}</div>"#, class, escape_html(text))
    }
}

/// Which mode the page belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Review,
}

/// Wrap page content in the document shell with header and sidebar
pub fn render_page(mode: Mode, entries: &[ReadingEntry], content: &str) -> String {
    let build = BuildInfo::current();
    let git_hash: String = build.git_hash.chars().take(8).collect();

    let (create_class, review_class) = match mode {
        Mode::Create => ("mode active", "mode"),
        Mode::Review => ("mode", "mode active"),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Reading Tool for Kids</title>
    <link rel="stylesheet" href="/static/readlog-ui.css">
</head>
<body>
    <header>
        <div class="header-content">
            <div class="header-left">
                <h1>📚 Reading Tool for Kids</h1>
                <p class="subtitle">What would you like to do?</p>
                <nav class="modes">
                    <a class="{create_class}" href="/create">Create new</a>
                    <a class="{review_class}" href="/review">Review previous</a>
                </nav>
            </div>
            <div class="header-right">
                <div class="build-info-line">readlog-ui v{version}</div>
                <div class="build-info-line">{git_hash} ({profile})</div>
                <div class="build-info-line">{timestamp}</div>
            </div>
        </div>
    </header>
    <div class="layout">
        <main class="content">
{content}
        </main>
{sidebar}
    </div>
</body>
</html>
"#,
        version = build.version,
        profile = escape_html(&build.build_profile),
        timestamp = escape_html(&build.build_timestamp),
        git_hash = escape_html(&git_hash),
        sidebar = render_sidebar(entries),
    )
}

/// Sidebar summary, empty when there are no entries
pub fn render_sidebar(entries: &[ReadingEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let summary = Summary::from_entries(entries);
    let mut html = String::from(r#"        <aside class="sidebar"><h2>📊 Summary</h2>"#);
    html.push_str(&metric("Total Entries", &summary.total_entries.to_string()));

    if let Some(average) = summary.average_rating {
        html.push_str(&metric("Average Rating", &format_average(average)));
        html.push_str(&metric("Rated Entries", &summary.rated_entries.to_string()));
    }

    html.push_str("<h3>Recent Books</h3><ul class=\"recent-books\">");
    for title in &summary.recent_books {
        let _ = write!(html, "<li>{}</li>", escape_html(title));
    }
    html.push_str("</ul></aside>");
    html
}

/// Labeled big-number display
pub fn metric(label: &str, value: &str) -> String {
    format!(
        r#"<div class="metric"><div class="metric-label">{}</div><div class="metric-value">{}</div></div>"#,
        escape_html(label),
        escape_html(value)
    )
}

/// Render a block of model or child text, keeping line breaks
pub fn text_block(heading: &str, text: &str) -> String {
    format!(
        r#"<section class="text-block"><h3>{}</h3><div class="prose">{}</div></section>"#,
        escape_html(heading),
        escape_html(text)
    )
}
