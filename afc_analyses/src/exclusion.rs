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

//! for one FS station and channel, sweeps a ring of bearings around the
//! station and bisects each ray's distance to the point where the link's
//! allowable EIRP equals a fixed RLAN EIRP — the contour where `I/N`
//! crosses the configured threshold.

use afc_fs::antenna::AntennaRegistry;
use afc_fs::FsStation;
use afc_interference::FreqRangeMhz;
use afc_scan::region::local_to_lat_lon;
use afc_scan::ScanPoint;
use afc_terrain::TerrainResolver;

use crate::config::AnalysisConfig;
use crate::errors::{AnalysesError, Result};
use crate::link::sample_link;

pub struct ExclusionZoneRequest<'a> {
    pub terrain: &'a TerrainResolver,
    pub antennas: &'a AntennaRegistry,
    pub station: &'a FsStation,
    pub channel: FreqRangeMhz,
    pub rlan_eirp_dbm: f64,
    pub rlan_height_amsl_m: f64,
    pub rlan_is_indoor: bool,
    pub bearing_step_deg: f64,
    pub min_distance_m: f64,
    pub max_distance_m: f64,
    pub tolerance_m: f64,
}

fn point_at_bearing(center_lat: f64, center_lon: f64, bearing_deg: f64, distance_m: f64) -> (f64, f64) {
    let rad = bearing_deg.to_radians();
    let dx = distance_m * rad.sin();
    let dy = distance_m * rad.cos();
    local_to_lat_lon(center_lat, center_lon, (dx, dy))
}

/// the vertex list of the `I/N = threshold` contour around `request.station`
/// for `request.channel`, one vertex per swept bearing that actually
/// brackets the crossing within `[min_distance_m, max_distance_m]`.
/// Bearings whose whole range is uniformly inside or outside the contour
/// (e.g. a spectrally non-overlapping channel) contribute no vertex.
pub fn exclusion_zone(request: &ExclusionZoneRequest, analysis: &AnalysisConfig) -> Result<Vec<(f64, f64)>> {
    let (Some(center_lat), Some(center_lon)) = (request.station.row.lat, request.station.row.lon) else {
        return Ok(Vec::new());
    };
    let pattern = request.antennas.bind(
        request.station.row.antenna_model.as_deref(),
        request.station.row.antenna_category.as_deref(),
        request.station.row.antenna_gain_dbi,
    );

    let eirp_at_distance = |bearing_deg: f64, distance_m: f64| -> Result<Option<f64>> {
        let (lat, lon) = point_at_bearing(center_lat, center_lon, bearing_deg, distance_m);
        let scan_point = ScanPoint { lat, lon, height_amsl_m: request.rlan_height_amsl_m, is_indoor: request.rlan_is_indoor };
        sample_link(request.terrain, &scan_point, request.station, request.channel, pattern, analysis)
    };

    let mut vertices = Vec::new();
    let mut bearing = 0.0;
    while bearing < 360.0 {
        if let Some(distance) = bisect_bearing(&eirp_at_distance, bearing, request)? {
            vertices.push(point_at_bearing(center_lat, center_lon, bearing, distance));
        }
        bearing += request.bearing_step_deg.max(1.0e-3);
    }

    if vertices.is_empty() {
        return Err(AnalysesError::ContourNotBracketed { max_distance_m: request.max_distance_m });
    }
    Ok(vertices)
}

fn bisect_bearing(
    eirp_at_distance: &dyn Fn(f64, f64) -> Result<Option<f64>>,
    bearing_deg: f64,
    request: &ExclusionZoneRequest,
) -> Result<Option<f64>> {
    let margin = |d: f64| -> Result<Option<f64>> { Ok(eirp_at_distance(bearing_deg, d)?.map(|e| e - request.rlan_eirp_dbm)) };

    let mut lo = request.min_distance_m;
    let mut hi = request.max_distance_m;
    let Some(f_lo) = margin(lo)? else { return Ok(None) };
    let Some(f_hi) = margin(hi)? else { return Ok(None) };
    if f_lo == 0.0 {
        return Ok(Some(lo));
    }
    if f_lo.signum() == f_hi.signum() {
        return Ok(None);
    }

    while hi - lo > request.tolerance_m.max(1.0e-6) {
        let mid = 0.5 * (lo + hi);
        let Some(f_mid) = margin(mid)? else { return Ok(None) };
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Ok(Some(0.5 * (lo + hi)))
}

#[cfg(test)]
mod tests {
    use super::point_at_bearing;
    use approx::assert_abs_diff_eq;

    #[test]
    fn due_north_bearing_increases_latitude_only() {
        let (lat, lon) = point_at_bearing(37.4, -122.1, 0.0, 1000.0);
        assert!(lat > 37.4);
        assert_abs_diff_eq!(lon, -122.1, epsilon = 1.0e-9);
    }

    #[test]
    fn due_east_bearing_increases_longitude_only() {
        let (lat, lon) = point_at_bearing(37.4, -122.1, 90.0, 1000.0);
        assert_abs_diff_eq!(lat, 37.4, epsilon = 1.0e-9);
        assert!(lon > -122.1);
    }
}
