//! JSON API for entries and rating statistics

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use readlog_common::stats::{RatingTrend, Summary, TrendStatus};
use readlog_common::{NewEntry, ReadingEntry};
use serde::Serialize;

use crate::submission::submit_entry;
use crate::{ApiError, ApiResult, AppState};

/// Entry with its insertion index
#[derive(Debug, Serialize)]
pub struct IndexedEntry {
    pub index: usize,
    #[serde(flatten)]
    pub entry: ReadingEntry,
}

#[derive(Debug, Serialize)]
pub struct EntriesResponse {
    pub entries: Vec<IndexedEntry>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub summary: Summary,
    pub trend: RatingTrend,
    pub trend_status: TrendStatus,
    pub trend_average: Option<f64>,
}

/// GET /api/entries
///
/// All entries in insertion order
pub async fn list_entries(State(state): State<AppState>) -> ApiResult<Json<EntriesResponse>> {
    let entries = state.store.load().await?;

    Ok(Json(EntriesResponse {
        entries: entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| IndexedEntry { index, entry })
            .collect(),
    }))
}

/// GET /api/entries/:index
pub async fn get_entry(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> ApiResult<Json<IndexedEntry>> {
    let entry = state
        .store
        .load()
        .await?
        .into_iter()
        .nth(index)
        .ok_or_else(|| ApiError::NotFound(format!("entry {}", index)))?;

    Ok(Json(IndexedEntry { index, entry }))
}

/// POST /api/entries
///
/// Requests feedback for the submitted write-up and stores the result.
pub async fn create_entry(
    State(state): State<AppState>,
    Json(new_entry): Json<NewEntry>,
) -> ApiResult<(StatusCode, Json<IndexedEntry>)> {
    let submission = submit_entry(&state, new_entry).await?;
    let index = submission.saved?;

    Ok((
        StatusCode::CREATED,
        Json(IndexedEntry {
            index,
            entry: submission.entry,
        }),
    ))
}

/// GET /api/stats
///
/// Sidebar summary plus the rating trend
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<StatsResponse>> {
    let entries = state.store.load().await?;
    let trend = RatingTrend::from_entries(&entries);

    Ok(Json(StatsResponse {
        summary: Summary::from_entries(&entries),
        trend_status: trend.status(),
        trend_average: trend.average(),
        trend,
    }))
}

/// Build entry API routes
pub fn entry_routes() -> Router<AppState> {
    Router::new()
        .route("/api/entries", get(list_entries).post(create_entry))
        .route("/api/entries/:index", get(get_entry))
        .route("/api/stats", get(get_stats))
}
