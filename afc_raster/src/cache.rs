/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! the LRU tile cache and the second LRU over GDAL dataset handles (§5: raster
//! LRU caches are the only shared mutable state in the worker pool). Each
//! source gets a read-write lock; reads only ever take the shared read lock
//! and bump a per-entry access tick with a relaxed atomic store, so a cache
//! hit never blocks on another reader and only contends with the (rare)
//! write lock taken on a miss.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use gdal::Dataset;
use tracing::debug;

use crate::errors::{RasterError, Result};
use crate::tile::RasterTile;

/// identifies one cached tile extract: the source's base filename, the band
/// index, and the tile's (lat,lon) offset in tile units.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub base_filename: String,
    pub band: u32,
    pub tile_lat_offset: i64,
    pub tile_lon_offset: i64,
}

struct Entry<V> {
    value: Arc<V>,
    last_used: AtomicU64,
}

/// a bounded, approximately-LRU cache: hits are wait-free (a read lock plus
/// a relaxed atomic bump); eviction only happens on a miss, under the write
/// lock, and picks the entry with the oldest tick.
pub struct LruCache<K, V> {
    capacity: usize,
    clock: AtomicU64,
    map: RwLock<HashMap<K, Entry<V>>>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: usize) -> Self {
        LruCache { capacity, clock: AtomicU64::new(0), map: RwLock::new(HashMap::with_capacity(capacity)) }
    }

    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let guard = self.map.read().unwrap();
        let entry = guard.get(key)?;
        entry.last_used.store(self.tick(), Ordering::Relaxed);
        Some(entry.value.clone())
    }

    pub fn len(&self) -> usize {
        self.map.read().unwrap().len()
    }

    /// insert `value`, evicting the least-recently-used entry first if the
    /// cache is at capacity. Idempotent repeated inserts of the same key
    /// never grow the cache beyond `capacity` (invariant 5 of the spec).
    pub fn insert(&self, key: K, value: Arc<V>) {
        let mut guard = self.map.write().unwrap();
        if !guard.contains_key(&key) && guard.len() >= self.capacity {
            if let Some(victim) = guard
                .iter()
                .min_by_key(|(_, e)| e.last_used.load(Ordering::Relaxed))
                .map(|(k, _)| k.clone())
            {
                guard.remove(&victim);
            }
        }
        let tick = self.tick();
        guard.insert(key, Entry { value, last_used: AtomicU64::new(tick) });
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }
}

pub type TileCache = LruCache<TileKey, RasterTile>;

/// the second LRU, over open GDAL dataset handles. GDAL's C API is not
/// guaranteed thread-safe across opens/closes of distinct datasets, so those
/// are serialized through `open_mutex`; reads of an already-open dataset are
/// still gated by GDAL's own per-dataset locking, which this pool does not
/// second-guess.
pub struct DatasetPool {
    capacity: usize,
    open_mutex: Mutex<()>,
    handles: RwLock<HashMap<String, Arc<Mutex<Dataset>>>>,
    order: Mutex<Vec<String>>,
}

impl DatasetPool {
    pub fn new(capacity: usize) -> Self {
        DatasetPool {
            capacity,
            open_mutex: Mutex::new(()),
            handles: RwLock::new(HashMap::new()),
            order: Mutex::new(Vec::new()),
        }
    }

    /// get or open the dataset at `path`, evicting the least-recently-used
    /// handle if the pool is full.
    pub fn get_or_open(&self, path: &str) -> Result<Arc<Mutex<Dataset>>> {
        if let Some(ds) = self.handles.read().unwrap().get(path) {
            self.touch(path);
            return Ok(ds.clone());
        }

        let _open_guard = self.open_mutex.lock().unwrap();
        // re-check: another worker may have opened it while we waited for the lock
        if let Some(ds) = self.handles.read().unwrap().get(path) {
            self.touch(path);
            return Ok(ds.clone());
        }

        self.evict_if_full();

        debug!(path, "opening GDAL dataset handle");
        let dataset = Dataset::open(path).map_err(|e| RasterError::OpenFailed(path.to_string(), e.to_string()))?;
        let handle = Arc::new(Mutex::new(dataset));
        self.handles.write().unwrap().insert(path.to_string(), handle.clone());
        self.order.lock().unwrap().push(path.to_string());
        Ok(handle)
    }

    fn touch(&self, path: &str) {
        let mut order = self.order.lock().unwrap();
        if let Some(pos) = order.iter().position(|p| p == path) {
            let p = order.remove(pos);
            order.push(p);
        }
    }

    fn evict_if_full(&self) {
        let mut order = self.order.lock().unwrap();
        while order.len() >= self.capacity {
            let victim = order.remove(0);
            debug!(path = victim.as_str(), "closing GDAL dataset handle (LRU eviction)");
            self.handles.write().unwrap().remove(&victim);
        }
    }

    pub fn open_count(&self) -> usize {
        self.handles.read().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lru_cache_respects_capacity() {
        let cache: LruCache<i32, i32> = LruCache::new(2);
        cache.insert(1, Arc::new(10));
        cache.insert(2, Arc::new(20));
        cache.insert(3, Arc::new(30));
        assert_eq!(cache.len(), 2);
        // 1 was least-recently-used and should have been evicted
        assert!(cache.get(&1).is_none());
        assert!(cache.get(&2).is_some());
        assert!(cache.get(&3).is_some());
    }

    #[test]
    fn lru_cache_repeated_get_does_not_grow() {
        let cache: LruCache<i32, i32> = LruCache::new(5);
        cache.insert(1, Arc::new(10));
        for _ in 0..100 {
            assert_eq!(*cache.get(&1).unwrap(), 10);
        }
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn lru_cache_touch_protects_from_eviction() {
        let cache: LruCache<i32, i32> = LruCache::new(2);
        cache.insert(1, Arc::new(10));
        cache.insert(2, Arc::new(20));
        cache.get(&1); // bump 1's recency
        cache.insert(3, Arc::new(30)); // should evict 2, not 1
        assert!(cache.get(&1).is_some());
        assert!(cache.get(&2).is_none());
    }
}
