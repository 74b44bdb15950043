//! Bounded, deduplicated search history.
//!
//! DESIGN
//! ======
//! Stored as one JSON array under a fixed key, most recent first, capped at
//! `MAX_HISTORY_ITEMS`. Saving a query whose `(query, location, language)`
//! matches an existing entry removes the old entry and inserts a fresh one at
//! the head, so repeated searches refresh recency instead of duplicating.
//!
//! Missing or corrupt storage reads as an empty history; nothing here fails.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::net::types::{Language, SummaryQuery, TimeRange};
use crate::storage::{self, SharedStore};

pub const HISTORY_KEY: &str = "newsSummarizer_searchHistory";
pub const MAX_HISTORY_ITEMS: usize = 10;

/// One past query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryEntry {
    /// Creation time in milliseconds since the Unix epoch; unique per store.
    pub id: i64,
    pub query: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub language: Language,
    /// `None` is the unlimited marker.
    #[serde(default)]
    pub max_articles: Option<u32>,
    #[serde(default)]
    pub when: TimeRange,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl SearchHistoryEntry {
    fn same_search(&self, query: &SummaryQuery) -> bool {
        self.query == query.query && self.location == query.location && self.language == query.language
    }

    /// Creation time as RFC 3339 text.
    #[must_use]
    pub fn recorded_at(&self) -> String {
        self.timestamp.format(&Rfc3339).unwrap_or_default()
    }

    /// Rebuild the query this entry recorded.
    #[must_use]
    pub fn to_query(&self) -> SummaryQuery {
        SummaryQuery {
            query: self.query.clone(),
            location: self.location.clone(),
            max_articles: self.max_articles,
            language: self.language,
            when: self.when,
        }
    }
}

/// Search history over shared durable storage.
#[derive(Clone)]
pub struct SearchHistory {
    store: SharedStore,
}

impl std::fmt::Debug for SearchHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchHistory").finish_non_exhaustive()
    }
}

impl SearchHistory {
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Entries, most recent first. Empty when storage is absent or corrupt.
    #[must_use]
    pub fn list(&self) -> Vec<SearchHistoryEntry> {
        storage::load_json(self.store.as_ref(), HISTORY_KEY).unwrap_or_default()
    }

    /// Record `query` at the head, replacing any entry for the same search.
    /// Returns the updated history.
    pub fn save(&self, query: &SummaryQuery) -> Vec<SearchHistoryEntry> {
        self.save_at(query, OffsetDateTime::now_utc())
    }

    fn save_at(&self, query: &SummaryQuery, now: OffsetDateTime) -> Vec<SearchHistoryEntry> {
        let previous = self.list();

        // Millisecond clocks repeat under rapid saves; ids must stay unique.
        let now_ms = i64::try_from(now.unix_timestamp_nanos() / 1_000_000).unwrap_or(i64::MAX);
        let newest = previous.iter().map(|e| e.id).max().unwrap_or(i64::MIN);
        let id = match newest.checked_add(1) {
            Some(next) => now_ms.max(next),
            // A stored id sits at the ceiling; take the first free id from the clock.
            None => (now_ms..).find(|id| previous.iter().all(|e| e.id != *id)).unwrap_or(now_ms),
        };

        let entry = SearchHistoryEntry {
            id,
            query: query.query.clone(),
            location: query.location.clone(),
            language: query.language,
            max_articles: query.max_articles,
            when: query.when,
            timestamp: now,
        };

        let mut history = Vec::with_capacity(MAX_HISTORY_ITEMS);
        history.push(entry);
        history.extend(previous.into_iter().filter(|e| !e.same_search(query)));
        history.truncate(MAX_HISTORY_ITEMS);

        storage::save_json(self.store.as_ref(), HISTORY_KEY, &history);
        history
    }

    /// Look up one entry by id.
    #[must_use]
    pub fn get(&self, id: i64) -> Option<SearchHistoryEntry> {
        self.list().into_iter().find(|e| e.id == id)
    }

    /// Drop the entry with `id`, if present. Returns the remaining history.
    pub fn remove(&self, id: i64) -> Vec<SearchHistoryEntry> {
        let history = self.list();
        if !history.iter().any(|e| e.id == id) {
            return history;
        }
        let remaining: Vec<_> = history.into_iter().filter(|e| e.id != id).collect();
        storage::save_json(self.store.as_ref(), HISTORY_KEY, &remaining);
        remaining
    }

    /// Forget every entry.
    pub fn clear(&self) -> Vec<SearchHistoryEntry> {
        storage::remove_logged(self.store.as_ref(), HISTORY_KEY);
        Vec::new()
    }
}
