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

//! samples terrain (plus building) height along the great-circle path
//! between two endpoints, for the ITM diffraction term and for deciding
//! whether a link has line of sight.

use afc_itu::itm::ProfilePoint;
use afc_pathloss::model::TerrainProfilePoint;
use afc_terrain::{TerrainHeight, TerrainResolver};

use crate::errors::Result;

/// samples `point_count` evenly spaced points (including both endpoints)
/// along the straight lat/lon interpolation between `from` and `to`,
/// recording the surface height (terrain plus any building) at each. A
/// sample that falls outside all registered raster sources is skipped
/// rather than aborting the whole profile, so a partially-covered path
/// still yields a usable (shorter) profile.
pub fn sample_profile(
    terrain: &TerrainResolver,
    from: (f64, f64),
    to: (f64, f64),
    distance_m: f64,
    point_count: usize,
) -> Result<Vec<ProfilePoint>> {
    let n = point_count.max(2);
    let mut points = Vec::with_capacity(n);
    for i in 0..n {
        let t = i as f64 / (n - 1) as f64;
        let lat = from.0 + (to.0 - from.0) * t;
        let lon = from.1 + (to.1 - from.1) * t;
        let (height, _) = terrain.resolve(lat, lon)?;
        let surface_m = match height {
            TerrainHeight::Building(t, b) => t + b,
            TerrainHeight::NoBuilding(t) => t,
            TerrainHeight::Outside | TerrainHeight::NoData => continue,
        };
        points.push(TerrainProfilePoint { distance_m: distance_m * t, terrain_height_m: surface_m });
    }
    Ok(points)
}

/// whether the straight line between `tx_height_m` and `rx_height_m` clears
/// every intermediate surface sample in `profile`. A profile shorter than
/// two points (e.g. both endpoints fell outside coverage) can't support a
/// LOS judgement and resolves to `None`.
pub fn profile_is_clear(profile: &[ProfilePoint], tx_height_m: f64, rx_height_m: f64) -> Option<bool> {
    if profile.len() < 2 {
        return None;
    }
    let d_total = profile.last().unwrap().distance_m;
    if d_total <= 0.0 {
        return None;
    }
    for p in profile {
        let t = p.distance_m / d_total;
        let los_height = tx_height_m + (rx_height_m - tx_height_m) * t;
        if p.terrain_height_m > los_height {
            return Some(false);
        }
    }
    Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use afc_raster::RasterDataLayer;
    use std::sync::Arc;

    #[test]
    fn uncovered_path_yields_empty_profile() {
        let terrain = TerrainResolver::new(Arc::new(RasterDataLayer::new()));
        let profile = sample_profile(&terrain, (37.0, -122.0), (37.1, -122.1), 10_000.0, 5).unwrap();
        assert!(profile.is_empty());
    }

    #[test]
    fn short_profile_has_no_los_judgement() {
        assert_eq!(profile_is_clear(&[], 30.0, 30.0), None);
    }
}
