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

//! loads FS/RAS rows from a tabular source, resolves terrain for every
//! point that carries one (rx, tx, and any passive-repeater hops), and
//! filters to the set of stations that can plausibly interfere with a
//! given scan center. Malformed rows are collected as anomalies rather
//! than aborting the whole load.

use std::sync::Arc;

use afc_terrain::{TerrainFailurePolicy, TerrainResolver, TerrainSourceTag};
use tracing::{debug, warn};

use crate::antenna::AntennaRegistry;
use crate::errors::{Result, RowAnomaly};
use crate::row::FsRow;

/// an FS row with its rx/tx/PR terrain heights resolved, ready for the
/// interference engine.
#[derive(Debug, Clone)]
pub struct FsStation {
    pub row: FsRow,
    pub rx_terrain_m: f64,
    pub rx_terrain_source: TerrainSourceTag,
    pub tx_terrain_m: Option<f64>,
}

/// a lat/lon window, degrees, inclusive on both ends.
#[derive(Debug, Clone, Copy)]
pub struct LatLonWindow {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

impl LatLonWindow {
    fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.south && lat <= self.north && lon >= self.west && lon <= self.east
    }
}

/// an inclusive MHz band; a row overlaps it if `[start,stop]` intersects.
#[derive(Debug, Clone, Copy)]
pub struct FreqBandMhz {
    pub low: f64,
    pub high: f64,
}

impl FreqBandMhz {
    fn overlaps(&self, start: f64, stop: f64) -> bool {
        start <= self.high && stop >= self.low
    }
}

pub struct FsStore {
    terrain: TerrainResolver,
    antennas: AntennaRegistry,
    stations: Vec<FsStation>,
    anomalies: Vec<RowAnomaly>,
}

impl FsStore {
    pub fn new(terrain: TerrainResolver, antennas: AntennaRegistry) -> Self {
        FsStore { terrain, antennas, stations: Vec::new(), anomalies: Vec::new() }
    }

    pub fn antennas(&self) -> &AntennaRegistry {
        &self.antennas
    }

    pub fn anomalies(&self) -> &[RowAnomaly] {
        &self.anomalies
    }

    pub fn stations(&self) -> &[FsStation] {
        &self.stations
    }

    /// loads rows already split into pipe-delimited fields (the caller owns
    /// how the tabular source is read, matching spec 4.E's "treated as an
    /// opaque row iterator"), filtering to `window`/`band` and resolving
    /// terrain for each surviving row. A row with no resolvable rx location
    /// or terrain height is recorded as an anomaly and skipped; the run
    /// continues.
    pub fn load<'a, I>(&mut self, rows: I, window: &LatLonWindow, band: &FreqBandMhz) -> Result<()>
    where
        I: IntoIterator<Item = (usize, Vec<&'a str>)>,
    {
        for (row_number, fields) in rows {
            let row = FsRow::from_fields(&fields);

            let (lat, lon) = match (row.lat, row.lon) {
                (Some(lat), Some(lon)) => (lat, lon),
                _ => {
                    self.anomalies.push(RowAnomaly { row_number, reason: "missing rx lat/lon".to_string() });
                    continue;
                }
            };

            if !window.contains(lat, lon) {
                continue;
            }

            let (start, stop) = match (row.start_freq_mhz, row.stop_freq_mhz) {
                (Some(s), Some(e)) => (s, e),
                _ => {
                    self.anomalies.push(RowAnomaly { row_number, reason: "missing frequency range".to_string() });
                    continue;
                }
            };
            if !band.overlaps(start, stop) {
                continue;
            }

            let (height, tag) = match self.terrain.resolve(lat, lon) {
                Ok(r) => r,
                Err(e) => {
                    self.anomalies.push(RowAnomaly { row_number, reason: format!("terrain lookup failed: {e}") });
                    continue;
                }
            };
            let rx_terrain_m = match height.terrain_m() {
                Some(t) => t,
                None => {
                    self.anomalies.push(RowAnomaly { row_number, reason: "no terrain data at rx location".to_string() });
                    continue;
                }
            };

            let tx_terrain_m = match (row.tx_lat, row.tx_lon) {
                (Some(tlat), Some(tlon)) => match self.terrain.resolve(tlat, tlon) {
                    Ok((h, _)) => h.terrain_m(),
                    Err(_) => None,
                },
                _ => None,
            };

            debug!(row_number, lat, lon, rx_terrain_m, ?tag, "FS row loaded");
            self.stations.push(FsStation { row, rx_terrain_m, rx_terrain_source: tag, tx_terrain_m });
        }
        Ok(())
    }

    /// resolves with a configured failure policy instead of discarding rows
    /// whose rx terrain can't be resolved; used when the scan requires AMSL
    /// retention per spec 4.C.
    pub fn resolve_amsl_fallback(&self, lat: f64, lon: f64, policy: TerrainFailurePolicy) -> Result<Option<f64>> {
        Ok(self.terrain.resolve_amsl(lat, lon, policy)?.map(|(t, _, _)| t))
    }

    /// fast spatial filter: stations whose rx point lies within
    /// `max_interaction_radius_m` of `center`, using great-circle distance.
    pub fn within_interaction_radius(&self, center: (f64, f64), max_interaction_radius_m: f64) -> Vec<&FsStation> {
        use afc_common::geo::{GeoLine, GeoPoint};

        let center_pt = GeoPoint::from_lon_lat_degrees(center.1, center.0);
        self.stations
            .iter()
            .filter(|s| {
                let (Some(lat), Some(lon)) = (s.row.lat, s.row.lon) else { return false };
                let pt = GeoPoint::from_lon_lat_degrees(lon, lat);
                let d = GeoLine::from_geo_points(center_pt.clone(), pt).haversine_distance();
                d.get::<uom::si::length::meter>() <= max_interaction_radius_m
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use afc_raster::RasterDataLayer;

    fn empty_store() -> FsStore {
        let raster = Arc::new(RasterDataLayer::new());
        let terrain = TerrainResolver::new(raster);
        FsStore::new(terrain, AntennaRegistry::new())
    }

    #[test]
    fn unresolvable_terrain_becomes_anomaly_not_abort() {
        let mut store = empty_store();
        let window = LatLonWindow { south: -90.0, north: 90.0, west: -180.0, east: 180.0 };
        let band = FreqBandMhz { low: 5925.0, high: 7125.0 };
        let fields: Vec<&str> = vec![
            "FS", "1", "100", "W1AW", "A", "FIXED", "Acme Co", "40.0", "-105.0", "30.0", "A",
            "6100.0", "6150.0", "50M0D7W", "V", "ANT-1", "HP", "38.0", "15.0", "0.0", "N", "0.5",
            "4.0", "40.1", "-105.1",
        ];
        store.load(vec![(1usize, fields)], &window, &band).unwrap();
        assert_eq!(store.stations().len(), 0);
        assert_eq!(store.anomalies().len(), 1);
        assert!(store.anomalies()[0].reason.contains("terrain"));
    }

    #[test]
    fn missing_lat_lon_is_anomaly() {
        let mut store = empty_store();
        let window = LatLonWindow { south: -90.0, north: 90.0, west: -180.0, east: 180.0 };
        let band = FreqBandMhz { low: 5925.0, high: 7125.0 };
        let fields: Vec<&str> = vec!["FS", "1", "100", "W1AW"];
        store.load(vec![(1usize, fields)], &window, &band).unwrap();
        assert_eq!(store.anomalies().len(), 1);
        assert!(store.anomalies()[0].reason.contains("lat/lon"));
    }

    #[test]
    fn out_of_window_row_is_silently_skipped_not_anomaly() {
        let mut store = empty_store();
        let window = LatLonWindow { south: 0.0, north: 1.0, west: 0.0, east: 1.0 };
        let band = FreqBandMhz { low: 5925.0, high: 7125.0 };
        let fields: Vec<&str> = vec![
            "FS", "1", "100", "W1AW", "A", "FIXED", "Acme Co", "40.0", "-105.0", "30.0", "A",
            "6100.0", "6150.0", "50M0D7W", "V", "ANT-1", "HP", "38.0", "15.0", "0.0", "N", "0.5",
            "4.0", "40.1", "-105.1",
        ];
        store.load(vec![(1usize, fields)], &window, &band).unwrap();
        assert_eq!(store.stations().len(), 0);
        assert_eq!(store.anomalies().len(), 0);
    }
}
