//! Bounded recent-destination history.
//!
//! Keeps the last five destinations, most recent first, deduplicated by
//! case-insensitive name, persisted as JSON through a [`KeyValueStore`].
//! Loading is best-effort: a corrupt or missing record yields an empty
//! history, never an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::commute::Destination;
use crate::coord::Coordinates;
use crate::storage::KeyValueStore;

/// Storage key for the serialized history list.
pub const HISTORY_KEY: &str = "localert.history";

/// Maximum number of entries kept.
pub const MAX_HISTORY_ENTRIES: usize = 5;

/// One remembered destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Millisecond epoch timestamp at insertion, as a string.
    pub id: String,
    pub destination_name: String,
    pub destination_coords: Coordinates,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    fn new(destination: &Destination) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis().to_string(),
            destination_name: destination.name.clone(),
            destination_coords: destination.coords,
            timestamp: now,
        }
    }

    /// Convert back into a destination for a repeat commute.
    pub fn to_destination(&self) -> Destination {
        Destination::new(self.destination_name.clone(), self.destination_coords)
    }
}

/// Recent-destination cache backed by a [`KeyValueStore`].
pub struct CommuteHistory<S> {
    store: S,
    entries: Vec<HistoryEntry>,
}

impl<S: KeyValueStore> CommuteHistory<S> {
    /// Load history from the store.
    ///
    /// Corrupt or missing state yields an empty list.
    pub fn load(store: S) -> Self {
        let entries = match store.get(HISTORY_KEY) {
            Some(json) => match serde_json::from_str(&json) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(error = %e, "Corrupt commute history, starting empty");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        Self { store, entries }
    }

    /// Record a destination at the front of the history.
    ///
    /// Any existing entry with a case-insensitively equal name is replaced,
    /// and the list is truncated to [`MAX_HISTORY_ENTRIES`].
    pub fn add(&mut self, destination: &Destination) {
        let entry = HistoryEntry::new(destination);
        let name_lower = entry.destination_name.to_lowercase();
        self.entries
            .retain(|e| e.destination_name.to_lowercase() != name_lower);
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_HISTORY_ENTRIES);
        self.persist();
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.store.remove(HISTORY_KEY);
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    fn persist(&self) {
        match serde_json::to_string(&self.entries) {
            Ok(json) => self.store.set(HISTORY_KEY, &json),
            Err(e) => tracing::error!(error = %e, "Failed to serialize commute history"),
        }
    }
}
