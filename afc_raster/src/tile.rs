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

//! rectangular single-band raster extracts ("tiles" in the LRU cache sense, not
//! necessarily one tile-on-disk). Pixel (0,0) is top-left; rounding errors of up
//! to one pixel are clamped to the tile edge, larger deviations are reported as
//! [`crate::errors::RasterError::PixelRoundingError`].

use crate::errors::{RasterError, Result};

pub const DEFAULT_TILE_PIXELS: usize = 1000;

/// a rectangular extract of one band of a raster source.
#[derive(Debug, Clone)]
pub struct RasterTile {
    pub lat_pix_per_deg: f64,
    pub lon_pix_per_deg: f64,
    /// pixel-space latitude of the tile's top row, in pixels-from-equator units
    pub lat_pix_max: f64,
    /// pixel-space longitude of the tile's left column
    pub lon_pix_min: f64,
    pub lat_size: usize,
    pub lon_size: usize,
    pub margin: usize,
    /// longitude of the tile's left edge, degrees; the tile's coordinate window
    /// is `[left, left+360)` so callers rebase arbitrary longitudes into it.
    pub left_lon_deg: f64,
    no_data: Option<f64>,
    /// row-major, `lat_size * lon_size` values.
    data: Vec<f64>,
}

impl RasterTile {
    pub fn new(
        lat_pix_per_deg: f64,
        lon_pix_per_deg: f64,
        lat_pix_max: f64,
        lon_pix_min: f64,
        lat_size: usize,
        lon_size: usize,
        margin: usize,
        left_lon_deg: f64,
        no_data: Option<f64>,
        data: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(data.len(), lat_size * lon_size);
        RasterTile { lat_pix_per_deg, lon_pix_per_deg, lat_pix_max, lon_pix_min, lat_size, lon_size, margin, left_lon_deg, no_data, data }
    }

    /// rebase an arbitrary longitude into this tile's `[left, left+360)` window.
    fn rebase_lon(&self, lon: f64) -> f64 {
        let mut x = lon;
        while x < self.left_lon_deg { x += 360.0; }
        while x >= self.left_lon_deg + 360.0 { x -= 360.0; }
        x
    }

    /// pixel indices for `(lat, lon)`, clamping rounding error of up to one pixel
    /// to the nearest edge. Larger deviations are a [`RasterError::PixelRoundingError`].
    pub fn pixel_index(&self, lat: f64, lon: f64) -> Result<(usize, usize)> {
        let lon = self.rebase_lon(lon);

        let lat_f = self.lat_pix_max - lat * self.lat_pix_per_deg;
        let lon_f = lon * self.lon_pix_per_deg - self.lon_pix_min;

        let lat_idx = clamp_index(lat_f, self.lat_size, lat, lon)?;
        let lon_idx = clamp_index(lon_f, self.lon_size, lat, lon)?;
        Ok((lat_idx, lon_idx))
    }

    pub fn covers(&self, lat: f64, lon: f64) -> bool {
        self.pixel_index(lat, lon).is_ok()
    }

    /// nearest-pixel lookup; `None` on a no-data sentinel.
    pub fn value_at(&self, lat: f64, lon: f64) -> Result<Option<f64>> {
        let (lat_idx, lon_idx) = self.pixel_index(lat, lon)?;
        let v = self.data[lat_idx * self.lon_size + lon_idx];
        Ok(self.is_no_data(v).then_some(()).map_or(Some(v), |_| None))
    }

    fn is_no_data(&self, v: f64) -> bool {
        match self.no_data {
            Some(nd) => v.is_nan() || (v - nd).abs() < 1e-9,
            None => v.is_nan(),
        }
    }

    pub fn no_data_sentinel(&self) -> Option<f64> { self.no_data }
}

/// floor the pixel coordinate, clamping to `[0, size-1]` when the rounding
/// error is within one pixel; reject larger deviations as an input error.
fn clamp_index(idx_f: f64, size: usize, lat: f64, lon: f64) -> Result<usize> {
    let floored = idx_f.floor();
    if floored >= 0.0 && (floored as usize) < size {
        return Ok(floored as usize);
    }
    let (clamped, delta) = if floored < 0.0 {
        (0usize, -floored)
    } else {
        (size - 1, floored - (size - 1) as f64)
    };
    if delta <= 1.0 {
        Ok(clamped)
    } else {
        Err(RasterError::PixelRoundingError { lat, lon, delta })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_tile() -> RasterTile {
        // 10x10 tile, 1 pixel per degree, top-left pixel at (lat=10, lon=0)
        let data: Vec<f64> = (0..100).map(|i| i as f64).collect();
        RasterTile::new(1.0, 1.0, 10.0, 0.0, 10, 10, 0, 0.0, Some(-9999.0), data)
    }

    #[test]
    fn pixel_index_top_left() {
        let t = unit_tile();
        let (r, c) = t.pixel_index(9.999, 0.001).unwrap();
        assert_eq!((r, c), (0, 0));
    }

    #[test]
    fn pixel_index_clamps_subpixel_rounding() {
        let t = unit_tile();
        // lat slightly above the tile's declared max -> floored index is -0.x, clamp to edge
        let (r, _c) = t.pixel_index(10.0005, 0.0).unwrap();
        assert_eq!(r, 0);
    }

    #[test]
    fn pixel_index_rejects_large_deviation() {
        let t = unit_tile();
        assert!(t.pixel_index(50.0, 0.0).is_err());
    }

    #[test]
    fn longitude_rebased_into_window() {
        let t = unit_tile();
        // 360 + 5 should rebase to 5 within [0,360)
        let a = t.pixel_index(5.0, 5.0).unwrap();
        let b = t.pixel_index(5.0, 365.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn no_data_sentinel_maps_to_none() {
        let mut data = vec![0.0; 100];
        data[0] = -9999.0;
        let t = RasterTile::new(1.0, 1.0, 10.0, 0.0, 10, 10, 0, 0.0, Some(-9999.0), data);
        assert_eq!(t.value_at(9.999, 0.001).unwrap(), None);
    }
}
