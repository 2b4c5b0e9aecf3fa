//! Bounded snapshot -> layout cache.
//!
//! Layouts are immutable once computed, so entries are shared as `Arc`s.
//! When full, the least recently used snapshot is evicted.

use super::tree::CityLayout;
use log::debug;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Cache of computed layouts keyed by snapshot id
#[derive(Debug)]
pub struct LayoutCache {
    entries: LruCache<String, Arc<CityLayout>>,
}

impl LayoutCache {
    /// Cache holding at most `capacity` layouts (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a snapshot is cached, without touching its recency
    pub fn contains(&self, snapshot_id: &str) -> bool {
        self.entries.contains(snapshot_id)
    }

    /// Cached layout, marking it most recently used
    pub fn get(&mut self, snapshot_id: &str) -> Option<Arc<CityLayout>> {
        self.entries.get(snapshot_id).cloned()
    }

    /// Store a layout, evicting the least recently used one if full
    pub fn insert(&mut self, snapshot_id: impl Into<String>, layout: CityLayout) -> Arc<CityLayout> {
        let snapshot_id = snapshot_id.into();
        let layout = Arc::new(layout);

        if let Some((evicted, _)) = self.entries.push(snapshot_id.clone(), Arc::clone(&layout)) {
            if evicted != snapshot_id {
                debug!("Evicting cached layout for snapshot {}", evicted);
            }
        }

        layout
    }

    /// Cached layout, or compute and cache it.
    ///
    /// Errors from `compute` are returned and nothing is cached.
    pub fn get_or_compute<E, F>(&mut self, snapshot_id: &str, compute: F) -> Result<Arc<CityLayout>, E>
    where
        F: FnOnce() -> Result<CityLayout, E>,
    {
        if let Some(layout) = self.get(snapshot_id) {
            debug!("Layout cache hit for snapshot {}", snapshot_id);
            return Ok(layout);
        }

        let layout = compute()?;
        Ok(self.insert(snapshot_id, layout))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
