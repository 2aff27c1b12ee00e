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

//! GDAL-backed raster sources. A source is either [`monolithic`](monolithic)
//! (one file covers the whole extent) or [`tiled`](tiled) (many files under
//! a directory, resolved per point by a [`NameMapper`]); both share the tile
//! cache and the rectification rules that keep neighboring cache tiles from
//! overlapping or gapping.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use gdal::raster::ResampleAlg;
use gdal::Dataset;
use tracing::debug;

use crate::cache::{DatasetPool, TileCache, TileKey};
use crate::errors::{RasterError, Result};
use crate::name_mapper::NameMapper;
use crate::tile::{RasterTile, DEFAULT_TILE_PIXELS};

/// governs how neighboring tiles of a source stitch together without
/// overlap or gap: a source may require `pixPerDeg` to be an integer
/// multiple of some value (so tile boundaries land on exact pixel grid
/// lines) and may extend each tile by a margin of pixels beyond its nominal
/// footprint (covering 3DEP's 12-pixel overlap, or SRTM's half-pixel
/// outside-origin convention when `half_pixel_origin` is set).
#[derive(Debug, Clone, Copy)]
pub struct Rectification {
    pub pix_per_deg_multiple: Option<f64>,
    pub margin_px: usize,
    pub half_pixel_origin: bool,
}

impl Default for Rectification {
    fn default() -> Self {
        Rectification { pix_per_deg_multiple: None, margin_px: 0, half_pixel_origin: false }
    }
}

impl Rectification {
    fn check(&self, pix_per_deg: f64) -> Result<()> {
        if let Some(m) = self.pix_per_deg_multiple {
            let ratio = pix_per_deg / m;
            if (ratio - ratio.round()).abs() > 1e-6 {
                return Err(RasterError::Rectification(format!(
                    "pixels-per-degree {pix_per_deg} is not a multiple of {m}"
                )));
            }
        }
        Ok(())
    }
}

pub trait RasterSource: Send + Sync {
    fn covers(&self, lat: f64, lon: f64) -> bool;
    fn value_at(&self, lat: f64, lon: f64) -> Result<Option<f64>>;
}

/// a single geotransform describing a file's pixel grid, read once at
/// open time; GDAL datasets don't mutate their own geotransform so this is
/// safe to cache alongside the dataset handle.
struct GridInfo {
    pix_per_deg_lat: f64,
    pix_per_deg_lon: f64,
    lat_pix_max: f64,
    lon_pix_min: f64,
    raster_lat_size: usize,
    raster_lon_size: usize,
    no_data: Option<f64>,
}

fn read_grid_info(dataset: &Dataset, band: u32, rectification: &Rectification) -> Result<GridInfo> {
    let gt = dataset.geo_transform()?;
    // GDAL geotransform: [originX, pixWidth, 0, originY, 0, pixHeight(negative, north-up)]
    let origin_lon = gt[0];
    let pix_width_deg = gt[1];
    let origin_lat = gt[3];
    let pix_height_deg = gt[5];
    if pix_width_deg <= 0.0 || pix_height_deg >= 0.0 {
        return Err(RasterError::Rectification("expected north-up, east-right geotransform".into()));
    }

    let pix_per_deg_lon = 1.0 / pix_width_deg;
    let pix_per_deg_lat = 1.0 / (-pix_height_deg);
    rectification.check(pix_per_deg_lat)?;
    rectification.check(pix_per_deg_lon)?;

    let half_shift_lat = if rectification.half_pixel_origin { 0.5 / pix_per_deg_lat } else { 0.0 };
    let half_shift_lon = if rectification.half_pixel_origin { 0.5 / pix_per_deg_lon } else { 0.0 };

    let (raster_lon_size, raster_lat_size) = dataset.raster_size();
    let rasterband = dataset.rasterband(band as isize)?;
    let no_data = rasterband.no_data_value();

    Ok(GridInfo {
        pix_per_deg_lat,
        pix_per_deg_lon,
        lat_pix_max: (origin_lat - half_shift_lat) * pix_per_deg_lat,
        lon_pix_min: (origin_lon + half_shift_lon) * pix_per_deg_lon,
        raster_lat_size,
        raster_lon_size,
        no_data,
    })
}

/// loads (and tile-caches) windows out of files resolved through a
/// [`NameMapper`]; this is the shared engine behind both [`MonolithicSource`]
/// and [`TiledSource`] -- the only difference between them is the mapper.
struct GdalSource {
    base_dir: PathBuf,
    mapper: Box<dyn NameMapper>,
    band: u32,
    tile_pixels: usize,
    rectification: Rectification,
    tile_cache: Arc<TileCache>,
    dataset_pool: Arc<DatasetPool>,
}

impl GdalSource {
    fn path_for(&self, lat: f64, lon: f64) -> Result<(String, PathBuf)> {
        let base = self.mapper.base_filename(lat, lon)?;
        let path = self.base_dir.join(&base);
        Ok((base, path))
    }

    fn load_tile(&self, base: &str, path: &Path, grid: &GridInfo, lat_off: i64, lon_off: i64) -> Result<Arc<RasterTile>> {
        let handle = self.dataset_pool.get_or_open(&path.to_string_lossy())?;
        let dataset = handle.lock().unwrap();
        let rasterband = dataset.rasterband(self.band as isize)?;

        let tp = self.tile_pixels as i64;
        let margin = self.rectification.margin_px as i64;

        let x_off = (lon_off * tp - margin).max(0);
        let y_off = (lat_off * tp - margin).max(0);
        let x_size = ((tp + 2 * margin).min(grid.raster_lon_size as i64 - x_off)).max(0) as usize;
        let y_size = ((tp + 2 * margin).min(grid.raster_lat_size as i64 - y_off)).max(0) as usize;

        if x_size == 0 || y_size == 0 {
            return Err(RasterError::NoMatchingTile { lat: f64::NAN, lon: f64::NAN });
        }

        debug!(base, x_off, y_off, x_size, y_size, "loading raster tile window");
        let buf = rasterband
            .read_as::<f64>((x_off as isize, y_off as isize), (x_size, y_size), (x_size, y_size), Some(ResampleAlg::NearestNeighbour))
            .map_err(RasterError::from)?;

        let lat_pix_max = grid.lat_pix_max - (lat_off * tp - margin) as f64;
        let lon_pix_min = grid.lon_pix_min + (lon_off * tp - margin) as f64;
        let left_lon_deg = lon_pix_min / grid.pix_per_deg_lon;

        let tile = RasterTile::new(
            grid.pix_per_deg_lat,
            grid.pix_per_deg_lon,
            lat_pix_max,
            lon_pix_min,
            y_size,
            x_size,
            self.rectification.margin_px,
            left_lon_deg,
            grid.no_data,
            buf.data().to_vec(),
        );
        Ok(Arc::new(tile))
    }
}

impl RasterSource for GdalSource {
    fn covers(&self, lat: f64, lon: f64) -> bool {
        self.value_at(lat, lon).map(|v| v.is_some() || true).unwrap_or(false)
    }

    fn value_at(&self, lat: f64, lon: f64) -> Result<Option<f64>> {
        let (base, path) = self.path_for(lat, lon)?;
        let handle = self.dataset_pool.get_or_open(&path.to_string_lossy())?;
        let grid = {
            let dataset = handle.lock().unwrap();
            read_grid_info(&dataset, self.band, &self.rectification)?
        };

        let tp = self.tile_pixels as f64;
        let lat_pix = grid.lat_pix_max - lat * grid.pix_per_deg_lat;
        let lon_pix = lon * grid.pix_per_deg_lon - grid.lon_pix_min;
        let lat_off = (lat_pix / tp).floor() as i64;
        let lon_off = (lon_pix / tp).floor() as i64;

        let key = TileKey { base_filename: base.clone(), band: self.band, tile_lat_offset: lat_off, tile_lon_offset: lon_off };

        let tile = match self.tile_cache.get(&key) {
            Some(t) => t,
            None => {
                let t = self.load_tile(&base, &path, &grid, lat_off, lon_off)?;
                self.tile_cache.insert(key, t.clone());
                t
            }
        };
        tile.value_at(lat, lon)
    }
}

/// source backed by a single file covering the whole extent (e.g. a
/// national NLCD mosaic).
pub struct MonolithicSource {
    inner: GdalSource,
}

struct ConstantMapper(String);
impl NameMapper for ConstantMapper {
    fn base_filename(&self, _lat: f64, _lon: f64) -> Result<String> {
        Ok(self.0.clone())
    }
}

impl MonolithicSource {
    pub fn new(
        path: impl Into<PathBuf>,
        band: u32,
        tile_pixels: Option<usize>,
        rectification: Rectification,
        tile_cache: Arc<TileCache>,
        dataset_pool: Arc<DatasetPool>,
    ) -> Self {
        let path: PathBuf = path.into();
        let base_dir = path.parent().map(|p| p.to_path_buf()).unwrap_or_default();
        let filename = path.file_name().map(|f| f.to_string_lossy().to_string()).unwrap_or_default();
        MonolithicSource {
            inner: GdalSource {
                base_dir,
                mapper: Box::new(ConstantMapper(filename)),
                band,
                tile_pixels: tile_pixels.unwrap_or(DEFAULT_TILE_PIXELS),
                rectification,
                tile_cache,
                dataset_pool,
            },
        }
    }
}

impl RasterSource for MonolithicSource {
    fn covers(&self, lat: f64, lon: f64) -> bool {
        self.inner.covers(lat, lon)
    }
    fn value_at(&self, lat: f64, lon: f64) -> Result<Option<f64>> {
        self.inner.value_at(lat, lon)
    }
}

/// source backed by many files under a directory, resolved per point by a
/// [`NameMapper`] (e.g. per-degree SRTM `.hgt` tiles).
pub struct TiledSource {
    inner: GdalSource,
}

impl TiledSource {
    pub fn new(
        base_dir: impl Into<PathBuf>,
        mapper: Box<dyn NameMapper>,
        band: u32,
        tile_pixels: Option<usize>,
        rectification: Rectification,
        tile_cache: Arc<TileCache>,
        dataset_pool: Arc<DatasetPool>,
    ) -> Self {
        TiledSource {
            inner: GdalSource {
                base_dir: base_dir.into(),
                mapper,
                band,
                tile_pixels: tile_pixels.unwrap_or(DEFAULT_TILE_PIXELS),
                rectification,
                tile_cache,
                dataset_pool,
            },
        }
    }
}

impl RasterSource for TiledSource {
    fn covers(&self, lat: f64, lon: f64) -> bool {
        self.inner.covers(lat, lon)
    }
    fn value_at(&self, lat: f64, lon: f64) -> Result<Option<f64>> {
        self.inner.value_at(lat, lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectification_rejects_non_multiple_pix_per_deg() {
        let r = Rectification { pix_per_deg_multiple: Some(3600.0), margin_px: 0, half_pixel_origin: false };
        assert!(r.check(3600.0).is_ok());
        assert!(r.check(1000.0).is_err());
    }

    #[test]
    fn rectification_default_accepts_anything() {
        let r = Rectification::default();
        assert!(r.check(1234.5).is_ok());
    }
}
