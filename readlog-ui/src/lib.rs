//! readlog-ui library - reading log web service
//!
//! Serves the create/review pages, calls the feedback provider and appends
//! entries to the JSON store. Exposed as a library for router tests.

pub mod api;
pub mod chart;
pub mod error;
pub mod feedback;
pub mod submission;

pub use crate::error::{ApiError, ApiResult};

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use readlog_common::EntryStore;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use crate::feedback::FeedbackProvider;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Reading entry store
    pub store: Arc<dyn EntryStore>,
    /// Feedback provider; `None` when no API key is configured
    pub feedback: Option<Arc<dyn FeedbackProvider>>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last feedback/store error, reported by /health
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(store: Arc<dyn EntryStore>, feedback: Option<Arc<dyn FeedbackProvider>>) -> Self {
        Self {
            store,
            feedback,
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn record_error(&self, message: String) {
        *self.last_error.write().await = Some(message);
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // UI routes (HTML pages)
        .merge(api::ui_routes())
        // JSON API
        .merge(api::entry_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
