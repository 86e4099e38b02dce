//! Durable collection of watched movies.
//!
//! The whole collection is serialized as a JSON array after every mutation.
//! Persistence is best-effort: a failed write is logged and the in-memory
//! state stays authoritative for the running session.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ShioriError;

/// A movie the user has watched and rated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedItem {
    pub id: String,
    pub title: String,
    pub poster_url: Option<String>,
    pub catalog_rating: f32,
    pub runtime_minutes: u32,
    pub user_rating: u8,
    pub added_at: DateTime<Utc>,
}

/// Aggregates for the watched-summary panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatchlistSummary {
    pub count: usize,
    pub avg_catalog_rating: f32,
    pub avg_user_rating: f32,
    pub avg_runtime_minutes: f32,
}

/// Owns the watched collection, keyed by id, and mirrors it to disk.
#[derive(Debug)]
pub struct WatchlistStore {
    items: Vec<WatchedItem>,
    path: Option<PathBuf>,
}

impl WatchlistStore {
    /// Load the persisted watchlist, or start empty if the file is missing
    /// or unreadable. Never fails: a fresh device has no storage yet.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(items) => items,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "watchlist file unreadable, starting empty");
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no persisted watchlist, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read watchlist, starting empty");
                Vec::new()
            }
        };
        Self {
            items,
            path: Some(path),
        }
    }

    /// An ephemeral store with no backing file.
    pub fn in_memory() -> Self {
        Self {
            items: Vec::new(),
            path: None,
        }
    }

    /// Append an item. Duplicate ids are a no-op; returns whether the
    /// collection changed.
    pub fn add(&mut self, item: WatchedItem) -> bool {
        if self.contains(&item.id) {
            debug!(id = %item.id, "already in watchlist, ignoring add");
            return false;
        }
        self.items.push(item);
        self.persist();
        true
    }

    /// Remove by id; no-op if absent. Returns whether the collection changed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn items(&self) -> &[WatchedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn summary(&self) -> WatchlistSummary {
        let count = self.items.len();
        if count == 0 {
            return WatchlistSummary {
                count: 0,
                avg_catalog_rating: 0.0,
                avg_user_rating: 0.0,
                avg_runtime_minutes: 0.0,
            };
        }
        let n = count as f32;
        WatchlistSummary {
            count,
            avg_catalog_rating: self.items.iter().map(|i| i.catalog_rating).sum::<f32>() / n,
            avg_user_rating: self.items.iter().map(|i| f32::from(i.user_rating)).sum::<f32>() / n,
            avg_runtime_minutes: self.items.iter().map(|i| i.runtime_minutes as f32).sum::<f32>()
                / n,
        }
    }

    /// Mirror the full collection to disk. Failures are logged, not raised.
    fn persist(&self) {
        let Some(path) = &self.path else { return };
        if let Err(e) = self.write_to(path) {
            warn!(path = %path.display(), error = %e, "failed to persist watchlist");
        }
    }

    fn write_to(&self, path: &Path) -> Result<(), ShioriError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.items)?;
        // Atomic write: temp file, then rename.
        let temp = path.with_extension("tmp");
        std::fs::write(&temp, json)?;
        std::fs::rename(&temp, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, user_rating: u8) -> WatchedItem {
        WatchedItem {
            id: id.into(),
            title: format!("Movie {id}"),
            poster_url: None,
            catalog_rating: 7.5,
            runtime_minutes: 120,
            user_rating,
            added_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_is_idempotent_by_id() {
        let mut store = WatchlistStore::in_memory();
        assert!(store.add(item("tt1", 8)));
        let size = store.len();
        assert!(!store.add(item("tt1", 3)));
        assert_eq!(store.len(), size);
        // The original entry is untouched, not overwritten.
        assert_eq!(store.items()[0].user_rating, 8);
    }

    #[test]
    fn test_remove_then_add_round_trip() {
        let mut store = WatchlistStore::in_memory();
        store.add(item("tt1", 8));
        assert!(store.remove("tt1"));
        assert!(store.add(item("tt1", 9)));
        let matching: Vec<_> = store.items().iter().filter(|i| i.id == "tt1").collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].user_rating, 9);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = WatchlistStore::in_memory();
        store.add(item("tt1", 8));
        assert!(!store.remove("tt9"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = WatchlistStore::open(dir.path().join("watchlist.json"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watchlist.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = WatchlistStore::open(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn test_persistence_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watchlist.json");

        let mut store = WatchlistStore::open(&path);
        store.add(item("tt1", 8));
        store.add(item("tt2", 6));

        // The file mirrors in-memory state after every mutation.
        let on_disk: Vec<WatchedItem> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, store.items());

        store.remove("tt1");
        let on_disk: Vec<WatchedItem> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, store.items());

        // A fresh store reads the same collection back.
        let reloaded = WatchlistStore::open(&path);
        assert_eq!(reloaded.items(), store.items());
    }

    #[test]
    fn test_add_then_delete_restores_length_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watchlist.json");

        let mut store = WatchlistStore::open(&path);
        store.add(item("tt0", 5));
        let before = store.len();

        store.add(item("tt1", 8));
        store.remove("tt1");
        assert_eq!(store.len(), before);

        let on_disk: Vec<WatchedItem> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk.len(), before);
        assert!(!on_disk.iter().any(|i| i.id == "tt1"));
    }

    #[test]
    fn test_summary_averages() {
        let mut store = WatchlistStore::in_memory();
        assert_eq!(store.summary().count, 0);

        let mut a = item("tt1", 8);
        a.catalog_rating = 8.0;
        a.runtime_minutes = 100;
        let mut b = item("tt2", 6);
        b.catalog_rating = 6.0;
        b.runtime_minutes = 140;
        store.add(a);
        store.add(b);

        let summary = store.summary();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.avg_catalog_rating, 7.0);
        assert_eq!(summary.avg_user_rating, 7.0);
        assert_eq!(summary.avg_runtime_minutes, 120.0);
    }
}
