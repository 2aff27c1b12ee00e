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

//! per-point terrain height resolution with fallback priority LiDAR → 3DEP →
//! SRTM → GLOBE, reporting which source answered and whether a building
//! surface was detected above bare earth.

pub mod errors;

use std::sync::Arc;

use afc_raster::RasterDataLayer;
use errors::Result;
use tracing::trace;

/// the minimum building-above-terrain delta that counts as a building hit
/// rather than measurement noise in the bare-earth band.
pub const BUILDING_DETECTION_THRESHOLD_M: f64 = 1.0;

pub const LAYER_LIDAR_BARE_EARTH: &str = "lidar_bare_earth";
pub const LAYER_LIDAR_BUILDING: &str = "lidar_building";
pub const LAYER_3DEP: &str = "3dep";
pub const LAYER_SRTM: &str = "srtm";
pub const LAYER_GLOBE: &str = "globe";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TerrainHeight {
    Outside,
    NoData,
    NoBuilding(f64),
    Building(f64, f64),
}

impl TerrainHeight {
    pub fn terrain_m(&self) -> Option<f64> {
        match self {
            TerrainHeight::NoBuilding(t) | TerrainHeight::Building(t, _) => Some(*t),
            _ => None,
        }
    }

    pub fn building_m(&self) -> Option<f64> {
        match self {
            TerrainHeight::Building(_, b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_building(&self) -> bool {
        matches!(self, TerrainHeight::Building(_, _))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainSourceTag {
    Lidar,
    ThreeDep,
    Srtm,
    Globe,
    Unknown,
}

/// policy applied when a scan point that must be retained (an AMSL-height
/// point, per spec 4.C) falls where terrain resolution fails. Policy A
/// (`Discard`) drops the point; policy B (`TruncateWithFallback`) proceeds
/// using a configured fallback terrain elevation rather than leaving the
/// point unresolved — see `DESIGN.md` for why a fallback elevation, not a
/// nearby-source search, was chosen here.
#[derive(Debug, Clone, Copy)]
pub enum TerrainFailurePolicy {
    Discard,
    TruncateWithFallback { fallback_terrain_m: f64 },
}

/// resolves terrain height and building presence at a point by trying
/// registered raster layers in priority order.
#[derive(Clone)]
pub struct TerrainResolver {
    raster: Arc<RasterDataLayer>,
}

impl TerrainResolver {
    pub fn new(raster: Arc<RasterDataLayer>) -> Self {
        TerrainResolver { raster }
    }

    /// iterate LiDAR → 3DEP → SRTM → GLOBE, returning the first hit with a
    /// non-no-data terrain value, or `NoData`/`Outside` if none of the
    /// registered sources cover the point at all.
    pub fn resolve(&self, lat: f64, lon: f64) -> Result<(TerrainHeight, TerrainSourceTag)> {
        if let Some(bare) = self.raster.value_at(LAYER_LIDAR_BARE_EARTH, lat, lon)? {
            let building = self.raster.value_at(LAYER_LIDAR_BUILDING, lat, lon)?;
            let height = match building {
                Some(b) if b > bare + BUILDING_DETECTION_THRESHOLD_M => TerrainHeight::Building(bare, b),
                _ => TerrainHeight::NoBuilding(bare),
            };
            trace!(lat, lon, source = "lidar", ?height, "terrain resolved");
            return Ok((height, TerrainSourceTag::Lidar));
        }
        if let Some(v) = self.raster.value_at(LAYER_3DEP, lat, lon)? {
            return Ok((TerrainHeight::NoBuilding(v), TerrainSourceTag::ThreeDep));
        }
        if let Some(v) = self.raster.value_at(LAYER_SRTM, lat, lon)? {
            return Ok((TerrainHeight::NoBuilding(v), TerrainSourceTag::Srtm));
        }
        if let Some(v) = self.raster.value_at(LAYER_GLOBE, lat, lon)? {
            return Ok((TerrainHeight::NoBuilding(v), TerrainSourceTag::Globe));
        }

        let covered = [LAYER_LIDAR_BARE_EARTH, LAYER_3DEP, LAYER_SRTM, LAYER_GLOBE]
            .iter()
            .any(|layer| self.raster.covers(layer, lat, lon));
        if covered {
            Ok((TerrainHeight::NoData, TerrainSourceTag::Unknown))
        } else {
            Ok((TerrainHeight::Outside, TerrainSourceTag::Unknown))
        }
    }

    /// resolve under a [`TerrainFailurePolicy`] for AMSL scan points that
    /// must be retained; returns `None` when policy A discards the point.
    pub fn resolve_amsl(
        &self,
        lat: f64,
        lon: f64,
        policy: TerrainFailurePolicy,
    ) -> Result<Option<(f64, Option<f64>, TerrainSourceTag)>> {
        let (height, tag) = self.resolve(lat, lon)?;
        if let Some(terrain) = height.terrain_m() {
            return Ok(Some((terrain, height.building_m(), tag)));
        }
        match policy {
            TerrainFailurePolicy::Discard => Ok(None),
            TerrainFailurePolicy::TruncateWithFallback { fallback_terrain_m } => Ok(Some((fallback_terrain_m, None, tag))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terrain_height_accessors() {
        let nb = TerrainHeight::NoBuilding(120.0);
        assert_eq!(nb.terrain_m(), Some(120.0));
        assert_eq!(nb.building_m(), None);
        assert!(!nb.is_building());

        let b = TerrainHeight::Building(120.0, 145.0);
        assert_eq!(b.terrain_m(), Some(120.0));
        assert_eq!(b.building_m(), Some(145.0));
        assert!(b.is_building());

        assert_eq!(TerrainHeight::NoData.terrain_m(), None);
        assert_eq!(TerrainHeight::Outside.terrain_m(), None);
    }

    #[test]
    fn resolver_with_no_registered_sources_is_outside() {
        let raster = Arc::new(RasterDataLayer::new());
        let resolver = TerrainResolver::new(raster);
        let (h, tag) = resolver.resolve(37.4, -122.1).unwrap();
        assert_eq!(h, TerrainHeight::Outside);
        assert_eq!(tag, TerrainSourceTag::Unknown);
    }

    #[test]
    fn resolve_amsl_discard_policy_returns_none_when_unresolved() {
        let raster = Arc::new(RasterDataLayer::new());
        let resolver = TerrainResolver::new(raster);
        let result = resolver.resolve_amsl(37.4, -122.1, TerrainFailurePolicy::Discard).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn resolve_amsl_truncate_policy_uses_fallback() {
        let raster = Arc::new(RasterDataLayer::new());
        let resolver = TerrainResolver::new(raster);
        let result = resolver
            .resolve_amsl(37.4, -122.1, TerrainFailurePolicy::TruncateWithFallback { fallback_terrain_m: 0.0 })
            .unwrap();
        assert_eq!(result, Some((0.0, None, TerrainSourceTag::Unknown)));
    }
}
