//! Create page handler - new entry form and submit result

use axum::{
    extract::State,
    response::Html,
    Form,
};
use chrono::NaiveDate;
use readlog_common::entry::MISSING_FIELDS_MESSAGE;
use readlog_common::{NewEntry, MAX_WRITEUP_CHARS};
use serde::Deserialize;

use super::layout::{render_page, text_block, Mode, Notice};
use super::{escape_html, load_entries};
use crate::submission::{submit_entry, SubmitError};
use crate::AppState;

/// Create form fields as posted by the browser
#[derive(Debug, Default, Deserialize)]
pub struct CreateForm {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub book_title: String,
    #[serde(default)]
    pub writeup: String,
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// GET /create
pub async fn create_page(State(state): State<AppState>) -> Html<String> {
    let (entries, load_notice) = load_entries(&state).await;

    let mut content = String::new();
    if let Some(notice) = load_notice {
        content.push_str(&notice.render());
    }
    content.push_str(&render_form(&today().to_string(), "", ""));

    Html(render_page(Mode::Create, &entries, &content))
}

/// POST /create
///
/// Validates the form, requests feedback and saves the entry. Validation
/// problems re-render the form with the submitted values.
pub async fn submit_create(
    State(state): State<AppState>,
    Form(form): Form<CreateForm>,
) -> Html<String> {
    let mut content = String::new();

    let Ok(date) = NaiveDate::parse_from_str(form.date.trim(), "%Y-%m-%d") else {
        content.push_str(&Notice::Warning("Please pick a valid date.".to_string()).render());
        return finish(&state, content, Some(&form)).await;
    };

    if form.book_title.trim().is_empty() || form.writeup.trim().is_empty() {
        content.push_str(&Notice::Warning(MISSING_FIELDS_MESSAGE.to_string()).render());
        return finish(&state, content, Some(&form)).await;
    }

    let new_entry = NewEntry {
        date,
        book_title: form.book_title.clone(),
        writeup: form.writeup.clone(),
    };

    match submit_entry(&state, new_entry).await {
        Ok(submission) => {
            content.push_str(&Notice::Success("Feedback received!".to_string()).render());
            content.push_str(&text_block("AI Feedback", &submission.entry.feedback));

            let rating_notice = match submission.entry.rating {
                Some(rating) => Notice::Info(format!("Extracted rating: {}/10", rating)),
                None => Notice::Warning("Could not extract a rating from the feedback.".to_string()),
            };
            content.push_str(&rating_notice.render());

            let saved_notice = match &submission.saved {
                Ok(_) => Notice::Success("Entry saved successfully!".to_string()),
                Err(e) => Notice::Error(format!("Error saving data: {}", e)),
            };
            content.push_str(&saved_notice.render());

            finish(&state, content, None).await
        }
        Err(SubmitError::Invalid(msg)) => {
            content.push_str(&Notice::Warning(msg).render());
            finish(&state, content, Some(&form)).await
        }
        Err(err @ SubmitError::MissingApiKey) => {
            content.push_str(&Notice::Error(err.to_string()).render());
            finish(&state, content, Some(&form)).await
        }
        Err(err @ SubmitError::Feedback { .. }) => {
            content.push_str(&Notice::Error(err.to_string()).render());
            content.push_str(
                &Notice::Error("Failed to get feedback. Please try again.".to_string()).render(),
            );
            finish(&state, content, Some(&form)).await
        }
    }
}

/// Append the form (blank, or refilled from `form`) and wrap the page
///
/// Entries are loaded after the submission so the sidebar includes a new entry.
async fn finish(state: &AppState, mut content: String, form: Option<&CreateForm>) -> Html<String> {
    let (entries, load_notice) = load_entries(state).await;
    if let Some(notice) = load_notice {
        content.insert_str(0, &notice.render());
    }

    let form_html = match form {
        Some(form) => render_form(&form.date, &form.book_title, &form.writeup),
        None => render_form(&today().to_string(), "", ""),
    };
    content.push_str(&form_html);

    Html(render_page(Mode::Create, &entries, &content))
}

fn render_form(date: &str, book_title: &str, writeup: &str) -> String {
    let chars = writeup.chars().count();
    let counter = if chars > 0 {
        format!("Characters: {}/{}", chars, MAX_WRITEUP_CHARS)
    } else {
        String::new()
    };

    format!(
        r#"<h2>Create New Entry</h2>
<form class="entry-form" method="post" action="/create">
    <label for="date">Date</label>
    <input type="date" id="date" name="date" value="{date}" required>
    <label for="book_title">Book Title</label>
    <input type="text" id="book_title" name="book_title" value="{title}">
    <label for="writeup">Your Write-up (max {max} characters)</label>
    <textarea id="writeup" name="writeup" rows="12" maxlength="{max}">{writeup}</textarea>
    <p class="caption" id="char-count">{counter}</p>
    <button type="submit" class="button">Submit for Feedback</button>
</form>
<script>
    (function () {{
        const area = document.getElementById('writeup');
        const count = document.getElementById('char-count');
        area.addEventListener('input', function () {{
            const n = Array.from(area.value).length;
            count.textContent = n > 0 ? 'Characters: ' + n + '/{max}' : '';
        }});
    }})();
</script>"#,
        date = escape_html(date),
        title = escape_html(book_title),
        writeup = escape_html(writeup),
        max = MAX_WRITEUP_CHARS,
        counter = counter,
    )
}
