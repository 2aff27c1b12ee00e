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

//! denied regions: areas and frequency bands where every channel is forced
//! `Unavailable` regardless of the computed EIRP.

use crate::geometry::link_geometry;
use crate::spectral::FreqRangeMhz;

#[derive(Debug, Clone, Copy)]
pub struct RectDeg {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

impl RectDeg {
    fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.south && lat < self.north && lon >= self.west && lon < self.east
    }
}

/// the tagged sum replacing `DeniedRegionClass`'s inheritance hierarchy.
#[derive(Debug, Clone)]
pub enum DeniedRegionShape {
    RectList(Vec<RectDeg>),
    Circle { center_lat: f64, center_lon: f64, radius_m: f64 },
    /// radius derived from the horizon distance at `min_agl_m`, i.e.
    /// `sqrt(2*R_earth*h)` plus an observer-height term; computed lazily at
    /// hit-test time since it depends on the query point's own height.
    HorizonCircle { center_lat: f64, center_lon: f64, min_agl_m: f64 },
}

#[derive(Debug, Clone)]
pub struct DeniedRegion {
    pub shape: DeniedRegionShape,
    pub start_freq_mhz: f64,
    pub stop_freq_mhz: f64,
}

const EARTH_RADIUS_M: f64 = 6371000.0;

impl DeniedRegion {
    pub fn freq_range(&self) -> FreqRangeMhz {
        FreqRangeMhz { low: self.start_freq_mhz, high: self.stop_freq_mhz }
    }

    /// whether `(lat, lon)` at `height_amsl_m` falls inside this region.
    pub fn hits(&self, lat: f64, lon: f64, height_amsl_m: f64) -> bool {
        match &self.shape {
            DeniedRegionShape::RectList(rects) => rects.iter().any(|r| r.contains(lat, lon)),
            DeniedRegionShape::Circle { center_lat, center_lon, radius_m } => {
                link_geometry(*center_lat, *center_lon, 0.0, lat, lon, 0.0).distance_m <= *radius_m
            }
            DeniedRegionShape::HorizonCircle { center_lat, center_lon, min_agl_m } => {
                let horizon_m = (2.0 * EARTH_RADIUS_M * min_agl_m.max(0.0)).sqrt() + (2.0 * EARTH_RADIUS_M * height_amsl_m.max(0.0)).sqrt();
                link_geometry(*center_lat, *center_lon, 0.0, lat, lon, 0.0).distance_m <= horizon_m
            }
        }
    }
}

/// whether any region in `regions` denies `(lat, lon, height_amsl_m)` for a
/// channel overlapping `channel_freq`.
pub fn is_denied(regions: &[DeniedRegion], lat: f64, lon: f64, height_amsl_m: f64, channel_freq: FreqRangeMhz) -> bool {
    regions.iter().any(|r| r.freq_range().overlap_mhz(&channel_freq) > 0.0 && r.hits(lat, lon, height_amsl_m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_denies_inside_not_outside() {
        let region = DeniedRegion {
            shape: DeniedRegionShape::Circle { center_lat: 37.4, center_lon: -122.1, radius_m: 100_000.0 },
            start_freq_mhz: 5925.0,
            stop_freq_mhz: 7125.0,
        };
        let regions = vec![region];
        let channel = FreqRangeMhz { low: 5945.0, high: 5965.0 };
        assert!(is_denied(&regions, 37.4, -122.1, 30.0, channel));
        assert!(is_denied(&regions, 37.5, -122.0, 30.0, channel));
        assert!(!is_denied(&regions, 40.0, -120.0, 30.0, channel));
    }

    #[test]
    fn frequency_disjoint_region_never_denies() {
        let region = DeniedRegion {
            shape: DeniedRegionShape::Circle { center_lat: 37.4, center_lon: -122.1, radius_m: 1.0e9 },
            start_freq_mhz: 1000.0,
            stop_freq_mhz: 2000.0,
        };
        let regions = vec![region];
        let channel = FreqRangeMhz { low: 5945.0, high: 5965.0 };
        assert!(!is_denied(&regions, 37.4, -122.1, 30.0, channel));
    }
}
