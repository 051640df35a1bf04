use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use leptos::prelude::*;
use parking_lot::Mutex;

use crate::comment::CommentRecord;
use crate::constants::COMMENTS_QUERY_SCOPE;

/// Key of a cached query result
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum QueryKey {
    Comments(i64),
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::Comments(post_id) => write!(f, "{COMMENTS_QUERY_SCOPE}/{post_id}"),
        }
    }
}

struct CacheEntry {
    observer_count: usize,
    generation: ArcRwSignal<usize>,
    records: Option<Vec<CommentRecord>>,
}

impl CacheEntry {
    fn new() -> Self {
        CacheEntry {
            observer_count: 0,
            generation: ArcRwSignal::new(0),
            records: None,
        }
    }
}

/// Shared cache of the comments of the displayed posts.
///
/// An entry lives as long as at least one [`CacheSubscription`] observes it. Invalidating an entry
/// drops its records and bumps its generation, which reruns every reactive computation tracking it.
#[derive(Clone, Default)]
pub struct QueryCache {
    entry_map: Arc<Mutex<HashMap<QueryKey, CacheEntry>>>,
}

/// Observer of a cache entry, releases the entry when dropped
pub struct CacheSubscription {
    key: QueryKey,
    generation: ArcRwSignal<usize>,
    cache: QueryCache,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer of `key`, creating the entry if needed
    pub fn subscribe(&self, key: QueryKey) -> CacheSubscription {
        let generation = {
            let mut entry_map = self.entry_map.lock();
            let entry = entry_map.entry(key).or_insert_with(|| {
                log::debug!("Create cache entry {key}.");
                CacheEntry::new()
            });
            entry.observer_count += 1;
            entry.generation.clone()
        };
        CacheSubscription {
            key,
            generation,
            cache: self.clone(),
        }
    }

    fn release(&self, key: &QueryKey) {
        let mut entry_map = self.entry_map.lock();
        let is_unobserved = match entry_map.get_mut(key) {
            Some(entry) => {
                entry.observer_count = entry.observer_count.saturating_sub(1);
                entry.observer_count == 0
            },
            None => false,
        };
        if is_unobserved {
            log::debug!("Tear down cache entry {key}.");
            entry_map.remove(key);
        }
    }

    /// Discards the records of `key` and notifies its observers. Returns false if nobody observes `key`.
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        let generation = {
            let mut entry_map = self.entry_map.lock();
            entry_map.get_mut(key).map(|entry| {
                entry.records = None;
                entry.generation.clone()
            })
        };
        // observers rerun synchronously, the lock must be released by then
        match generation {
            Some(generation) => {
                log::debug!("Invalidate cache entry {key}.");
                generation.update(|generation| *generation += 1);
                true
            },
            None => false,
        }
    }

    pub fn cached(&self, key: &QueryKey) -> Option<Vec<CommentRecord>> {
        self.entry_map.lock().get(key).and_then(|entry| entry.records.clone())
    }

    /// Stores the result of a fetch started at `generation`. The result is discarded if the entry
    /// was invalidated or torn down in the meantime.
    pub fn store(&self, key: &QueryKey, generation: usize, records: Vec<CommentRecord>) -> bool {
        let mut entry_map = self.entry_map.lock();
        match entry_map.get_mut(key) {
            Some(entry) if entry.generation.get_untracked() == generation => {
                entry.records = Some(records);
                true
            },
            Some(_) => {
                log::debug!("Discard stale result for {key}.");
                false
            },
            None => false,
        }
    }

    pub fn generation(&self, key: &QueryKey) -> Option<usize> {
        self.entry_map.lock().get(key).map(|entry| entry.generation.get_untracked())
    }

    pub fn observer_count(&self, key: &QueryKey) -> usize {
        self.entry_map.lock().get(key).map(|entry| entry.observer_count).unwrap_or_default()
    }
}

impl CacheSubscription {
    pub fn key(&self) -> QueryKey {
        self.key
    }

    /// Current generation of the entry, tracked by the calling reactive computation
    pub fn track(&self) -> usize {
        self.generation.get()
    }
}

impl Drop for CacheSubscription {
    fn drop(&mut self) {
        self.cache.release(&self.key);
    }
}
