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
#![allow(unused)]

//! GDAL-backed access to terrain, building, and land-cover rasters behind a
//! single contract: `value_at(lat, lon, band) -> Option<f64>` and
//! `covers(lat, lon) -> bool`. Internally an LRU tile cache sits over a
//! second LRU of open GDAL dataset handles, so repeated lookups near each
//! other touch disk once per tile rather than once per point.

pub mod cache;
pub mod errors;
pub mod name_mapper;
pub mod source;
pub mod tile;

use std::collections::HashMap;
use std::sync::Arc;

use cache::{DatasetPool, TileCache};
use errors::Result;
use source::RasterSource;

pub const DEFAULT_TILE_CACHE_DEPTH: usize = 50;
pub const DEFAULT_MAX_OPEN_HANDLES: usize = 9;

/// one registered raster source plus the band it was registered under.
struct Registration {
    source: Box<dyn RasterSource>,
}

/// the façade every other AFC crate depends on. Owns the two LRU caches and
/// a priority-ordered list of sources per logical layer name (e.g.
/// `"srtm"`, `"3dep"`, `"nlcd"`); [`RasterDataLayer::value_at`] tries
/// sources for a layer in registration order and returns the first that
/// covers the point.
pub struct RasterDataLayer {
    tile_cache: Arc<TileCache>,
    dataset_pool: Arc<DatasetPool>,
    layers: HashMap<String, Vec<Registration>>,
}

impl RasterDataLayer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TILE_CACHE_DEPTH, DEFAULT_MAX_OPEN_HANDLES)
    }

    pub fn with_capacity(tile_cache_depth: usize, max_open_handles: usize) -> Self {
        RasterDataLayer {
            tile_cache: Arc::new(TileCache::new(tile_cache_depth)),
            dataset_pool: Arc::new(DatasetPool::new(max_open_handles)),
            layers: HashMap::new(),
        }
    }

    pub fn tile_cache(&self) -> &Arc<TileCache> {
        &self.tile_cache
    }

    pub fn dataset_pool(&self) -> &Arc<DatasetPool> {
        &self.dataset_pool
    }

    /// register a source under `layer`, in priority order (first registered,
    /// first tried).
    pub fn register(&mut self, layer: impl Into<String>, source: Box<dyn RasterSource>) {
        self.layers.entry(layer.into()).or_default().push(Registration { source });
    }

    pub fn covers(&self, layer: &str, lat: f64, lon: f64) -> bool {
        self.layers.get(layer).map(|sources| sources.iter().any(|r| r.source.covers(lat, lon))).unwrap_or(false)
    }

    /// the first non-`None` value among the layer's sources, in priority order.
    pub fn value_at(&self, layer: &str, lat: f64, lon: f64) -> Result<Option<f64>> {
        let Some(sources) = self.layers.get(layer) else { return Ok(None) };
        for reg in sources {
            if let Some(v) = reg.source.value_at(lat, lon)? {
                return Ok(Some(v));
            }
        }
        Ok(None)
    }
}

impl Default for RasterDataLayer {
    fn default() -> Self {
        Self::new()
    }
}
