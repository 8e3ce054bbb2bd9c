//! Reading log entry model
//!
//! Entries are append-only and keyed by insertion order. The serialized
//! shape matches the `saved_entries.json` layout: `date`, `book_title`,
//! `writeup`, `feedback`, `rating`, plus the parsed feedback sections,
//! which older files may lack.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::feedback::FeedbackReport;
use crate::{Error, Result};

/// Maximum write-up length in characters
pub const MAX_WRITEUP_CHARS: usize = 1000;

/// Message shown when the form is submitted with blank fields
pub const MISSING_FIELDS_MESSAGE: &str =
    "Please fill in both the book title and write-up before submitting.";

/// A stored reading log record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingEntry {
    pub date: NaiveDate,
    pub book_title: String,
    pub writeup: String,
    /// Raw model response
    pub feedback: String,
    /// Rating 1-10 extracted from the feedback
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl ReadingEntry {
    /// Build a stored entry from the submitted form and the parsed model response
    pub fn from_feedback(new_entry: NewEntry, report: FeedbackReport) -> Self {
        Self {
            date: new_entry.date,
            book_title: new_entry.book_title,
            writeup: new_entry.writeup,
            feedback: report.raw,
            rating: report.rating,
            reference_summary: report.sections.reference_summary,
            explanation: report.sections.explanation,
        }
    }

    /// Selector label, `"{date} - {book_title}"`
    pub fn label(&self) -> String {
        format!("{} - {}", self.date, self.book_title)
    }
}

/// Entry as submitted by the create form, before feedback is requested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEntry {
    pub date: NaiveDate,
    pub book_title: String,
    pub writeup: String,
}

impl NewEntry {
    /// Check the submission can be sent for feedback
    ///
    /// Title and write-up must be non-blank; the write-up may not exceed
    /// [`MAX_WRITEUP_CHARS`] characters.
    pub fn validate(&self) -> Result<()> {
        if self.book_title.trim().is_empty() || self.writeup.trim().is_empty() {
            return Err(Error::InvalidInput(MISSING_FIELDS_MESSAGE.to_string()));
        }

        let chars = self.writeup.chars().count();
        if chars > MAX_WRITEUP_CHARS {
            return Err(Error::InvalidInput(format!(
                "Your write-up is {} characters long; the limit is {}.",
                chars, MAX_WRITEUP_CHARS
            )));
        }

        Ok(())
    }

    /// Number of characters in the write-up, as shown under the text area
    pub fn writeup_chars(&self) -> usize {
        self.writeup.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_entry(title: &str, writeup: &str) -> NewEntry {
        NewEntry {
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            book_title: title.to_string(),
            writeup: writeup.to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_filled_form() {
        assert!(new_entry("Charlotte's Web", "A pig and a spider.").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_title_or_writeup() {
        for entry in [new_entry("   ", "text"), new_entry("Title", "\n\t ")] {
            match entry.validate() {
                Err(Error::InvalidInput(msg)) => assert_eq!(msg, MISSING_FIELDS_MESSAGE),
                other => panic!("Expected InvalidInput, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_validate_counts_characters_not_bytes() {
        // 1000 multi-byte characters are within the limit
        let writeup = "é".repeat(MAX_WRITEUP_CHARS);
        let entry = new_entry("Title", &writeup);
        assert_eq!(entry.writeup_chars(), MAX_WRITEUP_CHARS);
        assert!(entry.validate().is_ok());

        let too_long = new_entry("Title", &"a".repeat(MAX_WRITEUP_CHARS + 1));
        assert!(matches!(too_long.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_label_format() {
        let entry = ReadingEntry {
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            book_title: "Matilda".to_string(),
            writeup: String::new(),
            feedback: String::new(),
            rating: None,
            reference_summary: None,
            explanation: None,
        };
        assert_eq!(entry.label(), "2024-03-09 - Matilda");
    }

    #[test]
    fn test_deserialize_legacy_record() {
        let json = r#"{
            "date": "2024-01-15",
            "book_title": "Holes",
            "writeup": "Stanley digs holes.",
            "feedback": "Rating: 7/10",
            "rating": null
        }"#;

        let entry: ReadingEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(entry.rating, None);
        assert!(entry.reference_summary.is_none());
        assert!(entry.explanation.is_none());
    }

    #[test]
    fn test_serialize_omits_missing_sections() {
        let entry = ReadingEntry {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            book_title: "Holes".to_string(),
            writeup: "w".to_string(),
            feedback: "f".to_string(),
            rating: Some(6),
            reference_summary: None,
            explanation: Some("Good start.".to_string()),
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["date"], "2024-01-15");
        assert_eq!(value["rating"], 6);
        assert!(value.get("reference_summary").is_none());
        assert_eq!(value["explanation"], "Good start.");
    }
}
