use std::path::PathBuf;

use crate::io::recovery;
use crate::io::store::{IDEAS_KEY, KeyValueStore, STATS_KEY, StoreError};
use crate::model::idea::Idea;
use crate::model::stats::ChannelStats;

/// Load/save contract between the in-memory board and durable storage.
///
/// Loads never fail: absent or unparseable data yields the empty list or the
/// zero stats record.
pub trait Repository {
    fn load_ideas(&mut self) -> Vec<Idea>;
    fn load_stats(&mut self) -> ChannelStats;
    /// Overwrite the stored list with `ideas`
    fn save_ideas(&mut self, ideas: &[Idea]) -> Result<(), StoreError>;
    /// Overwrite the stored stats record, zero state included
    fn save_stats(&mut self, stats: &ChannelStats) -> Result<(), StoreError>;
}

impl<R: Repository + ?Sized> Repository for Box<R> {
    fn load_ideas(&mut self) -> Vec<Idea> {
        (**self).load_ideas()
    }

    fn load_stats(&mut self) -> ChannelStats {
        (**self).load_stats()
    }

    fn save_ideas(&mut self, ideas: &[Idea]) -> Result<(), StoreError> {
        (**self).save_ideas(ideas)
    }

    fn save_stats(&mut self, stats: &ChannelStats) -> Result<(), StoreError> {
        (**self).save_stats(stats)
    }
}

/// A [`Repository`] that keeps each collection as one JSON entry in a
/// key-value store.
#[derive(Debug)]
pub struct KvRepository<S: KeyValueStore> {
    store: S,
    /// Board directory whose recovery log receives parse and write failures
    recovery_dir: Option<PathBuf>,
}

impl<S: KeyValueStore> KvRepository<S> {
    pub fn new(store: S) -> Self {
        KvRepository {
            store,
            recovery_dir: None,
        }
    }

    /// Record load and write failures in `board_dir`'s recovery log
    pub fn with_recovery_log(mut self, board_dir: impl Into<PathBuf>) -> Self {
        self.recovery_dir = Some(board_dir.into());
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Parse the entry at `key`. A corrupt entry is copied to `<key>.bak`
    /// so the next save cannot destroy it, then treated as absent.
    fn load_entry<T: serde::de::DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let raw = self.store.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                let backup_key = format!("{}.bak", key);
                if let Err(backup_err) = self.store.set(&backup_key, &raw) {
                    eprintln!("warning: could not back up {}: {}", key, backup_err);
                }
                if let Some(dir) = &self.recovery_dir {
                    recovery::log_load_failure(dir, key, &e.to_string(), &raw);
                }
                None
            }
        }
    }

    fn save_entry<T: serde::Serialize + ?Sized>(
        &mut self,
        key: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        let payload =
            serde_json::to_string(value).map_err(|source| StoreError::SerializeError {
                key: key.to_string(),
                source,
            })?;
        let result = self.store.set(key, &payload);
        if let (Err(e), Some(dir)) = (&result, &self.recovery_dir) {
            recovery::log_write_failure(dir, key, &e.to_string(), &payload);
        }
        result
    }
}

impl<S: KeyValueStore> Repository for KvRepository<S> {
    fn load_ideas(&mut self) -> Vec<Idea> {
        self.load_entry(IDEAS_KEY).unwrap_or_default()
    }

    fn load_stats(&mut self) -> ChannelStats {
        self.load_entry(STATS_KEY).unwrap_or_default()
    }

    /// An empty list removes the entry rather than writing `[]`
    fn save_ideas(&mut self, ideas: &[Idea]) -> Result<(), StoreError> {
        if ideas.is_empty() {
            return self.store.remove(IDEAS_KEY);
        }
        self.save_entry(IDEAS_KEY, ideas)
    }

    fn save_stats(&mut self, stats: &ChannelStats) -> Result<(), StoreError> {
        self.save_entry(STATS_KEY, stats)
    }
}
