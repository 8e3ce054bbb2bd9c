//! # Readlog Common Library
//!
//! Shared code for the reading log service:
//! - Reading entry model and form validation
//! - JSON entry store
//! - Feedback parsing (rating extraction, section split)
//! - Rating statistics for the trend chart and sidebar
//! - Configuration loading

pub mod config;
pub mod entry;
pub mod error;
pub mod feedback;
pub mod stats;
pub mod store;

pub use entry::{NewEntry, ReadingEntry, MAX_WRITEUP_CHARS};
pub use error::{Error, Result};
pub use store::{EntryStore, JsonFileStore, MemoryStore};
