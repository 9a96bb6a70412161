#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Citizen suggestion storage.
//!
//! Suggestions live only in process memory. Each ward has its own
//! append-only log; entries are shared as [`Arc`]s and never mutated after
//! submission, so a listing taken earlier stays valid after later
//! submissions. Listings are most-recent-first.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use ward_aqi_dataset_models::Ward;

pub use ward_aqi_dataset_models::{Suggestion, SuggestionCategory};

/// Prefix of generated suggestion ids.
const ID_PREFIX: &str = "suggestion-";

/// Validation errors for a submitted suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuggestionError {
    /// No category was chosen.
    #[error("Please select a category")]
    MissingCategory,

    /// The category is not one of the known categories.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// The description is empty or only whitespace.
    #[error("Please provide a description")]
    EmptyDescription,
}

/// Parses a submitted category label.
///
/// # Errors
///
/// Returns [`SuggestionError::MissingCategory`] for a missing or blank
/// value and [`SuggestionError::UnknownCategory`] for an unrecognized one.
pub fn parse_category(raw: Option<&str>) -> Result<SuggestionCategory, SuggestionError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(SuggestionError::MissingCategory)?;
    raw.parse()
        .map_err(|_| SuggestionError::UnknownCategory(raw.to_string()))
}

/// Append-only log of suggestions for a single ward.
#[derive(Debug, Clone, Default)]
pub struct SuggestionLog {
    entries: Vec<Arc<Suggestion>>,
}

impl SuggestionLog {
    /// Appends a suggestion.
    pub fn append(&mut self, suggestion: Suggestion) -> Arc<Suggestion> {
        let entry = Arc::new(suggestion);
        self.entries.push(Arc::clone(&entry));
        entry
    }

    /// Entries, most recent first.
    #[must_use]
    pub fn newest_first(&self) -> Vec<Arc<Suggestion>> {
        self.entries.iter().rev().cloned().collect()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Suggestion logs for every ward.
#[derive(Debug, Default)]
pub struct SuggestionStore {
    logs: BTreeMap<String, SuggestionLog>,
}

impl SuggestionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and records a suggestion for `ward`.
    ///
    /// The description is stored trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError::EmptyDescription`] if the description is
    /// blank.
    pub fn submit(
        &mut self,
        ward: &Ward,
        category: SuggestionCategory,
        description: &str,
        now: DateTime<Utc>,
    ) -> Result<Arc<Suggestion>, SuggestionError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(SuggestionError::EmptyDescription);
        }

        let suggestion = Suggestion {
            id: format!("{ID_PREFIX}{}", uuid::Uuid::new_v4()),
            ward_id: ward.id.clone(),
            ward: ward.name.clone(),
            category,
            description: description.to_string(),
            created_at: now,
        };

        log::info!(
            "Suggestion {} recorded for {} ({category})",
            suggestion.id,
            ward.id
        );

        Ok(self
            .logs
            .entry(ward.id.clone())
            .or_default()
            .append(suggestion))
    }

    /// Suggestions for a ward, most recent first. Empty when there are
    /// none.
    #[must_use]
    pub fn list(&self, ward_id: &str) -> Vec<Arc<Suggestion>> {
        self.logs
            .get(ward_id)
            .map(SuggestionLog::newest_first)
            .unwrap_or_default()
    }

    /// Number of suggestions recorded for a ward.
    #[must_use]
    pub fn len(&self, ward_id: &str) -> usize {
        self.logs.get(ward_id).map_or(0, SuggestionLog::len)
    }

    /// Whether no suggestions have been recorded for any ward.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.logs.values().all(SuggestionLog::is_empty)
    }
}
