//! Feedback prompt and response parsing
//!
//! The model is asked for three sections: a sample summary, a 1-10 rating
//! and an explanation. Responses are free text, so parsing is best-effort:
//! a missing rating or section is `None`, never an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Rating patterns, tried in order. Only the first match of each pattern
/// is considered.
///
/// Digits are ASCII only (`(?-u:\d)`) so every capture parses as `u32`;
/// a rating written in another script is not recognized.
static RATING_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"[Rr]ating:?\s*((?-u:\d)+)",
        r"[Ss]core:?\s*((?-u:\d)+)",
        r"((?-u:\d)+)/10",
        r"((?-u:\d)+)\s*out\s*of\s*10",
        r"[Ii]\s*(?:would\s*)?rate\s*(?:this\s*)?(?:at\s*)?((?-u:\d)+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("rating pattern is valid"))
    .collect()
});

static NUMBERED_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+[.)]\s+\S").expect("numbered line pattern is valid"));

static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+[.)]\s*").expect("leading number pattern is valid"));

/// Longest bold or numbered heading label, in words. Longer lines are body
/// text. Markdown `#` headings are always headings.
const MAX_HEADING_WORDS: usize = 5;

/// Build the chat prompt for one write-up
pub fn build_prompt(book_title: &str, writeup: &str) -> String {
    format!(
        "A child wrote a summary about the book '{book_title}'.\n\
         Here is the write-up:\n\
         {writeup}\n\
         \n\
         Please do the following:\n\
         1. Provide a sample summary (about 500 words).\n\
         2. Rate the write-up from 1 to 10 based on key point coverage.\n\
         3. Explain the rating: what is good and what can be improved.\n\
         \n\
         Please format your response clearly with section headers.\n"
    )
}

/// Extract a 1-10 rating from model output
///
/// Returns the first in-range number found by the first pattern that
/// yields one; `None` if no pattern does.
pub fn extract_rating(text: &str) -> Option<u8> {
    if text.is_empty() {
        return None;
    }

    RATING_PATTERNS.iter().find_map(|pattern| {
        let captures = pattern.captures(text)?;
        let rating: u32 = captures.get(1)?.as_str().parse().ok()?;
        (1..=10).contains(&rating).then_some(rating as u8)
    })
}

/// Which part of the response a heading introduces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Summary,
    Rating,
    Explanation,
}

/// Response split into its requested sections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSections {
    pub reference_summary: Option<String>,
    pub rating_text: Option<String>,
    pub explanation: Option<String>,
}

/// Split a response on its section headers
///
/// Recognized headers are markdown headings (`## Sample Summary`), bold
/// lines (`**Rating:** 8/10`) and short numbered lines (`3. Explanation`).
/// Text before the first header is dropped.
pub fn split_sections(text: &str) -> FeedbackSections {
    let mut summary: Vec<String> = Vec::new();
    let mut rating: Vec<String> = Vec::new();
    let mut explanation: Vec<String> = Vec::new();
    let mut seen = [false; 3];
    let mut current: Option<Section> = None;

    for line in text.lines() {
        match parse_heading(line) {
            // A repeated header inside its own section is body text
            // ("**Areas to improve:**" within the explanation).
            Some((section, _)) if Some(section) == current => {
                push_line(&mut summary, &mut rating, &mut explanation, section, line);
            }
            Some((section, inline)) => {
                current = Some(section);
                seen[section as usize] = true;
                if !inline.is_empty() {
                    push_line(&mut summary, &mut rating, &mut explanation, section, &inline);
                }
            }
            None => {
                if let Some(section) = current {
                    push_line(&mut summary, &mut rating, &mut explanation, section, line);
                }
            }
        }
    }

    FeedbackSections {
        reference_summary: finish(seen[Section::Summary as usize], &summary),
        rating_text: finish(seen[Section::Rating as usize], &rating),
        explanation: finish(seen[Section::Explanation as usize], &explanation),
    }
}

fn push_line(
    summary: &mut Vec<String>,
    rating: &mut Vec<String>,
    explanation: &mut Vec<String>,
    section: Section,
    line: &str,
) {
    let target = match section {
        Section::Summary => summary,
        Section::Rating => rating,
        Section::Explanation => explanation,
    };
    target.push(line.trim_end().to_string());
}

fn finish(seen: bool, lines: &[String]) -> Option<String> {
    if !seen {
        return None;
    }
    let joined = lines.join("\n");
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Recognize a header line, returning its section and any inline text after the label
fn parse_heading(line: &str) -> Option<(Section, String)> {
    let trimmed = line.trim();

    let markdown = trimmed.starts_with('#');
    let (label, inline) = if markdown {
        split_label(trimmed.trim_start_matches('#').trim())
    } else if let Some(stripped) = trimmed.strip_prefix("**") {
        let end = stripped.find("**")?;
        let (label, inner_rest) = split_label(&stripped[..end]);
        let after = stripped[end + 2..].trim_start_matches(':').trim();
        let inline = [inner_rest.as_str(), after]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        (label, inline)
    } else if NUMBERED_LINE.is_match(trimmed) {
        split_label(trimmed)
    } else {
        return None;
    };

    let label = clean_label(&label);
    if label.is_empty() || (!markdown && label.split_whitespace().count() > MAX_HEADING_WORDS) {
        return None;
    }

    classify(&label).map(|section| (section, inline))
}

/// Split `"Rating: 8/10"` into `("Rating", "8/10")`
fn split_label(text: &str) -> (String, String) {
    match text.split_once(':') {
        Some((label, rest)) => (label.to_string(), rest.trim().trim_matches('*').trim().to_string()),
        None => (text.to_string(), String::new()),
    }
}

fn clean_label(label: &str) -> String {
    let label = label.trim().trim_matches(|c: char| c == '*' || c == '_').trim();
    LEADING_NUMBER
        .replace(label, "")
        .trim()
        .trim_end_matches(':')
        .trim()
        .to_string()
}

fn classify(label: &str) -> Option<Section> {
    let lower = label.to_lowercase();
    if ["explanation", "explain", "feedback", "improve"]
        .iter()
        .any(|k| lower.contains(k))
    {
        Some(Section::Explanation)
    } else if lower.contains("summary") {
        Some(Section::Summary)
    } else if lower.contains("rating") || lower.contains("score") {
        Some(Section::Rating)
    } else {
        None
    }
}

/// Parsed model response
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackReport {
    pub raw: String,
    pub rating: Option<u8>,
    pub sections: FeedbackSections,
}

impl FeedbackReport {
    pub fn from_response(text: impl Into<String>) -> Self {
        let raw = text.into();
        let rating = extract_rating(&raw);
        let sections = split_sections(&raw);
        Self { raw, rating, sections }
    }
}
