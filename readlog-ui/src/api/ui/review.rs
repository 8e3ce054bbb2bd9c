//! Review page handler - previous entries and the rating trend

use std::fmt::Write;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use readlog_common::stats::{format_average, RatingTrend, TrendStatus};
use readlog_common::ReadingEntry;
use serde::Deserialize;

use super::layout::{metric, render_page, text_block, Mode, Notice};
use super::{escape_html, load_entries};
use crate::chart::render_trend_svg;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ReviewQuery {
    /// Insertion index of the entry to show; newest when absent
    pub entry: Option<usize>,
}

/// GET /review
pub async fn review_page(
    State(state): State<AppState>,
    Query(query): Query<ReviewQuery>,
) -> Response {
    let (entries, load_notice) = load_entries(&state).await;

    let mut content = String::from("<h2>Review Previous Entries</h2>");
    if let Some(notice) = load_notice {
        content.push_str(&notice.render());
    }

    if entries.is_empty() {
        content.push_str(
            &Notice::Info("No previous entries yet. Create your first entry!".to_string()).render(),
        );
        return Html(render_page(Mode::Review, &entries, &content)).into_response();
    }

    let selected = query.entry.unwrap_or(entries.len() - 1);
    let Some(entry) = entries.get(selected) else {
        content.push_str(&Notice::Warning(format!("Entry {} not found.", selected)).render());
        content.push_str(&render_selector(&entries, None));
        return (
            StatusCode::NOT_FOUND,
            Html(render_page(Mode::Review, &entries, &content)),
        )
            .into_response();
    };

    content.push_str(&render_selector(&entries, Some(selected)));
    content.push_str(&render_entry(entry));
    content.push_str(&render_trend(&RatingTrend::from_entries(&entries)));

    Html(render_page(Mode::Review, &entries, &content)).into_response()
}

/// Entry picker, newest first
fn render_selector(entries: &[ReadingEntry], selected: Option<usize>) -> String {
    let mut html = String::from(
        r#"<form class="entry-select" method="get" action="/review"><label for="entry">Select entry</label><select id="entry" name="entry" onchange="this.form.submit()">"#,
    );

    for (index, entry) in entries.iter().enumerate().rev() {
        let marker = if Some(index) == selected { " selected" } else { "" };
        let _ = write!(
            html,
            r#"<option value="{}"{}>{}</option>"#,
            index,
            marker,
            escape_html(&entry.label())
        );
    }

    html.push_str(r#"</select><button type="submit" class="button">Show</button></form>"#);
    html
}

fn render_entry(entry: &ReadingEntry) -> String {
    let mut main = text_block("Your Write-up", &entry.writeup);

    let parsed = entry.reference_summary.is_some() || entry.explanation.is_some();
    if let Some(summary) = &entry.reference_summary {
        main.push_str(&text_block("Reference Summary", summary));
    }
    if let Some(explanation) = &entry.explanation {
        main.push_str(&text_block("Explanation", explanation));
    }

    if parsed {
        let _ = write!(
            main,
            r#"<details class="raw-feedback"><summary>Full AI Feedback</summary><div class="prose">{}</div></details>"#,
            escape_html(&entry.feedback)
        );
    } else {
        main.push_str(&text_block("AI Feedback", &entry.feedback));
    }

    let side = match entry.rating {
        Some(rating) => metric("Rating", &format!("{}/10", rating)),
        None => String::new(),
    };

    format!(
        r#"<div class="columns"><div class="column-main">{}</div><div class="column-side">{}</div></div>"#,
        main, side
    )
}

fn render_trend(trend: &RatingTrend) -> String {
    let mut html = String::from("<h3>📈 Rating Trend</h3>");

    match trend.status() {
        TrendStatus::Ready => {
            html.push_str(&render_trend_svg(trend));
            if let Some(average) = trend.average() {
                let message = format!(
                    "Average rating: {} across {} entries",
                    format_average(average),
                    trend.len()
                );
                html.push_str(&Notice::Info(message).render());
            }
        }
        TrendStatus::NeedMore => {
            html.push_str(
                &Notice::Info("Need at least 2 rated entries to show a trend.".to_string()).render(),
            );
        }
        TrendStatus::NoRatings => {
            html.push_str(
                &Notice::Info("No ratings available for trend analysis.".to_string()).render(),
            );
        }
    }

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(title: &str, day: u32, rating: Option<u8>) -> ReadingEntry {
        ReadingEntry {
            date: NaiveDate::from_ymd_opt(2024, 2, day).unwrap(),
            book_title: title.to_string(),
            writeup: format!("About {}", title),
            feedback: "Raw feedback".to_string(),
            rating,
            reference_summary: None,
            explanation: None,
        }
    }

    #[test]
    fn test_selector_newest_first_with_selection() {
        let entries = vec![entry("Old", 1, None), entry("New", 2, None)];
        let html = render_selector(&entries, Some(0));

        let new_pos = html.find("2024-02-02 - New").unwrap();
        let old_pos = html.find("2024-02-01 - Old").unwrap();
        assert!(new_pos < old_pos);
        assert!(html.contains(r#"<option value="0" selected>"#));
        assert!(html.contains(r#"<option value="1">"#));
    }

    #[test]
    fn test_entry_without_sections_shows_raw_feedback() {
        let html = render_entry(&entry("Holes", 1, Some(8)));
        assert!(html.contains("AI Feedback"));
        assert!(!html.contains("<details"));
        assert!(html.contains("8/10"));
    }

    #[test]
    fn test_entry_with_sections_folds_raw_feedback() {
        let mut e = entry("Holes", 1, None);
        e.reference_summary = Some("Stanley goes to camp.".to_string());
        let html = render_entry(&e);
        assert!(html.contains("Reference Summary"));
        assert!(html.contains("<details"));
        assert!(!html.contains("metric-value"));
    }

    #[test]
    fn test_trend_messages() {
        let none = RatingTrend::from_entries(&[entry("A", 1, None)]);
        assert!(render_trend(&none).contains("No ratings available for trend analysis."));

        let one = RatingTrend::from_entries(&[entry("A", 1, Some(5))]);
        assert!(render_trend(&one).contains("Need at least 2 rated entries to show a trend."));

        let two = RatingTrend::from_entries(&[entry("A", 1, Some(5)), entry("B", 3, Some(8))]);
        let html = render_trend(&two);
        assert!(html.contains("<svg"));
        assert!(html.contains("Average rating: 6.5/10 across 2 entries"));
    }
}
