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

//! grids a rectangle at a fixed RLAN height/EIRP and reports each cell's
//! `I/N` against one FS station and channel, rather than the EIRP ceiling
//! [`crate::point`] solves for.

use afc_fs::antenna::AntennaRegistry;
use afc_fs::FsStation;
use afc_interference::FreqRangeMhz;
use afc_scan::ScanPoint;
use afc_terrain::{TerrainHeight, TerrainResolver};

use crate::config::AnalysisConfig;
use crate::errors::Result;
use crate::link::{i_n_db, link_margin};

pub struct HeatmapRequest<'a> {
    pub terrain: &'a TerrainResolver,
    pub antennas: &'a AntennaRegistry,
    pub station: &'a FsStation,
    pub channel: FreqRangeMhz,
    pub rlan_eirp_dbm: f64,
    pub rlan_height_agl_m: f64,
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
    pub lat_step_deg: f64,
    pub lon_step_deg: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct HeatmapCell {
    pub lat: f64,
    pub lon: f64,
    /// `None` when the link contributes no sample at this cell (no spectral
    /// overlap, no terrain coverage, or rejected as too close).
    pub i_n_db: Option<f64>,
}

/// evaluates `I/N` at every grid cell inside `request`'s rectangle, at a
/// fixed RLAN EIRP and AGL height above whatever surface (ground or
/// rooftop) the terrain resolver reports for that cell.
pub fn heatmap(request: &HeatmapRequest, analysis: &AnalysisConfig) -> Result<Vec<HeatmapCell>> {
    let pattern = request.antennas.bind(
        request.station.row.antenna_model.as_deref(),
        request.station.row.antenna_category.as_deref(),
        request.station.row.antenna_gain_dbi,
    );

    let lat_step = request.lat_step_deg.max(1.0e-9);
    let lon_step = request.lon_step_deg.max(1.0e-9);
    let mut cells = Vec::new();

    let mut lat = request.min_lat;
    while lat <= request.max_lat {
        let mut lon = request.min_lon;
        while lon <= request.max_lon {
            let (height, _) = request.terrain.resolve(lat, lon)?;
            let (surface_height, is_building) = match height {
                TerrainHeight::Building(t, b) => (t + b, true),
                TerrainHeight::NoBuilding(t) => (t, false),
                TerrainHeight::Outside | TerrainHeight::NoData => {
                    cells.push(HeatmapCell { lat, lon, i_n_db: None });
                    lon += lon_step;
                    continue;
                }
            };

            let scan_point = ScanPoint { lat, lon, height_amsl_m: surface_height + request.rlan_height_agl_m, is_indoor: is_building };
            let margin = link_margin(request.terrain, &scan_point, request.station, request.channel, pattern, analysis)?;
            let value = margin.map(|m| i_n_db(&m, request.rlan_eirp_dbm));
            cells.push(HeatmapCell { lat, lon, i_n_db: value });
            lon += lon_step;
        }
        lat += lat_step;
    }

    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::LinkMargin;
    use approx::assert_abs_diff_eq;

    #[test]
    fn doubling_eirp_shifts_i_n_by_exactly_3db() {
        let margin = LinkMargin { i_rel_db: -10.0, noise_floor_dbm: -100.0, breakdown: Vec::new() };
        let low = i_n_db(&margin, 20.0);
        let high = i_n_db(&margin, 23.0103);
        assert_abs_diff_eq!(high - low, 3.0103, epsilon = 1.0e-9);
    }
}
