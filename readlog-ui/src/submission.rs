//! Submit flow: validate → request feedback → parse → append

use readlog_common::config::MISSING_API_KEY_MESSAGE;
use readlog_common::feedback::FeedbackReport;
use readlog_common::{Error, NewEntry, ReadingEntry};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::feedback::FeedbackError;
use crate::AppState;

/// Reasons a submission produced no feedback
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Blank or over-long form fields
    #[error("{0}")]
    Invalid(String),

    #[error("{}", MISSING_API_KEY_MESSAGE)]
    MissingApiKey,

    #[error("Error getting feedback from {provider}: {source}")]
    Feedback {
        provider: &'static str,
        #[source]
        source: FeedbackError,
    },
}

/// Feedback obtained for a submission
///
/// The entry is returned even when saving failed so the page can still show
/// the feedback.
#[derive(Debug)]
pub struct Submission {
    pub entry: ReadingEntry,
    /// Index of the stored entry, or why it could not be stored
    pub saved: Result<usize, Error>,
}

/// Run one submission end to end
///
/// The book title is stored trimmed, whichever surface submitted it.
pub async fn submit_entry(
    state: &AppState,
    mut new_entry: NewEntry,
) -> Result<Submission, SubmitError> {
    new_entry.book_title = new_entry.book_title.trim().to_string();
    new_entry.validate().map_err(|e| match e {
        Error::InvalidInput(msg) => SubmitError::Invalid(msg),
        other => SubmitError::Invalid(other.to_string()),
    })?;

    let provider = state.feedback.as_ref().ok_or_else(|| {
        warn!("Submission rejected: no API key configured");
        SubmitError::MissingApiKey
    })?;

    info!(
        book_title = %new_entry.book_title,
        chars = new_entry.writeup_chars(),
        provider = provider.name(),
        "Requesting feedback"
    );

    let text = match provider
        .request_feedback(&new_entry.book_title, &new_entry.writeup)
        .await
    {
        Ok(text) => text,
        Err(source) => {
            let err = SubmitError::Feedback {
                provider: provider.name(),
                source,
            };
            error!("{}", err);
            state.record_error(err.to_string()).await;
            return Err(err);
        }
    };

    let report = FeedbackReport::from_response(text);
    match report.rating {
        Some(rating) => info!(rating, "Extracted rating"),
        None => warn!("Could not extract a rating from the feedback"),
    }

    let entry = ReadingEntry::from_feedback(new_entry, report);
    let saved = state.store.append(entry.clone()).await;
    if let Err(e) = &saved {
        error!("Error saving data: {}", e);
        state.record_error(format!("Error saving data: {}", e)).await;
    }

    Ok(Submission { entry, saved })
}
