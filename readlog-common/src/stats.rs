//! Rating statistics for the trend chart and the sidebar summary

use chrono::NaiveDate;
use serde::Serialize;

use crate::entry::ReadingEntry;

/// Number of titles listed under "Recent Books"
pub const RECENT_BOOKS: usize = 3;

/// Whether there is enough rated data to draw a trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendStatus {
    /// No entry carries a rating
    NoRatings,
    /// Exactly one rated entry
    NeedMore,
    /// Two or more rated entries
    Ready,
}

/// A single point on the rating trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub rating: u8,
}

/// Rated entries ordered by date
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RatingTrend {
    pub points: Vec<TrendPoint>,
}

impl RatingTrend {
    /// Collect rated entries and sort them by date
    ///
    /// The sort is stable, so entries sharing a date keep insertion order.
    pub fn from_entries(entries: &[ReadingEntry]) -> Self {
        let mut points: Vec<TrendPoint> = entries
            .iter()
            .filter_map(|e| {
                e.rating.map(|rating| TrendPoint {
                    date: e.date,
                    rating,
                })
            })
            .collect();
        points.sort_by_key(|p| p.date);
        Self { points }
    }

    pub fn status(&self) -> TrendStatus {
        match self.points.len() {
            0 => TrendStatus::NoRatings,
            1 => TrendStatus::NeedMore,
            _ => TrendStatus::Ready,
        }
    }

    pub fn average(&self) -> Option<f64> {
        average(self.points.iter().map(|p| p.rating))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Sidebar summary
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_entries: usize,
    pub rated_entries: usize,
    pub average_rating: Option<f64>,
    /// Latest titles first, by insertion order
    pub recent_books: Vec<String>,
}

impl Summary {
    pub fn from_entries(entries: &[ReadingEntry]) -> Self {
        let ratings: Vec<u8> = entries.iter().filter_map(|e| e.rating).collect();

        Self {
            total_entries: entries.len(),
            rated_entries: ratings.len(),
            average_rating: average(ratings.iter().copied()),
            recent_books: entries
                .iter()
                .rev()
                .take(RECENT_BOOKS)
                .map(|e| e.book_title.clone())
                .collect(),
        }
    }
}

fn average(ratings: impl Iterator<Item = u8>) -> Option<f64> {
    let (sum, count) = ratings.fold((0u32, 0u32), |(sum, count), r| (sum + r as u32, count + 1));
    (count > 0).then(|| sum as f64 / count as f64)
}

/// Format a rating average the way the UI shows it, e.g. `7.5/10`
pub fn format_average(average: f64) -> String {
    format!("{:.1}/10", average)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, date: (i32, u32, u32), rating: Option<u8>) -> ReadingEntry {
        ReadingEntry {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            book_title: title.to_string(),
            writeup: String::new(),
            feedback: String::new(),
            rating,
            reference_summary: None,
            explanation: None,
        }
    }

    #[test]
    fn test_trend_sorted_by_date_skipping_unrated() {
        let entries = vec![
            entry("C", (2024, 3, 1), Some(8)),
            entry("A", (2024, 1, 1), Some(4)),
            entry("Unrated", (2024, 2, 1), None),
            entry("B", (2024, 2, 1), Some(6)),
        ];

        let trend = RatingTrend::from_entries(&entries);
        let ratings: Vec<u8> = trend.points.iter().map(|p| p.rating).collect();
        assert_eq!(ratings, vec![4, 6, 8]);
        assert_eq!(trend.status(), TrendStatus::Ready);
        assert_eq!(trend.average(), Some(6.0));
    }

    #[test]
    fn test_trend_same_date_keeps_insertion_order() {
        let entries = vec![
            entry("First", (2024, 1, 1), Some(3)),
            entry("Second", (2024, 1, 1), Some(9)),
        ];
        let trend = RatingTrend::from_entries(&entries);
        assert_eq!(trend.points[0].rating, 3);
        assert_eq!(trend.points[1].rating, 9);
    }

    #[test]
    fn test_trend_status_thresholds() {
        assert_eq!(RatingTrend::from_entries(&[]).status(), TrendStatus::NoRatings);

        let one = vec![entry("A", (2024, 1, 1), Some(5)), entry("B", (2024, 1, 2), None)];
        let trend = RatingTrend::from_entries(&one);
        assert_eq!(trend.status(), TrendStatus::NeedMore);
        assert_eq!(trend.len(), 1);
    }

    #[test]
    fn test_summary_counts_and_recent_books() {
        let entries = vec![
            entry("One", (2024, 1, 1), Some(7)),
            entry("Two", (2024, 1, 2), None),
            entry("Three", (2024, 1, 3), Some(8)),
            entry("Four", (2023, 12, 31), None),
        ];

        let summary = Summary::from_entries(&entries);
        assert_eq!(summary.total_entries, 4);
        assert_eq!(summary.rated_entries, 2);
        assert_eq!(summary.average_rating, Some(7.5));
        // Insertion order, not date order
        assert_eq!(summary.recent_books, vec!["Four", "Three", "Two"]);
    }

    #[test]
    fn test_summary_without_ratings() {
        let summary = Summary::from_entries(&[entry("Solo", (2024, 1, 1), None)]);
        assert_eq!(summary.average_rating, None);
        assert_eq!(summary.recent_books, vec!["Solo"]);
    }

    #[test]
    fn test_format_average_one_decimal() {
        assert_eq!(format_average(7.0), "7.0/10");
        assert_eq!(format_average(20.0 / 3.0), "6.7/10");
    }
}
