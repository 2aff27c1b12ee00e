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

//! `Manager`: the single façade that owns the engine's run state machine
//! and drives an inquiry through region scanning, FS/RAS lookup, path
//! loss, and interference aggregation, producing one [`ResponseDoc`] per
//! inquiry. Configuration and database loading are separate calls from
//! `run_inquiry` so a CLI wrapper can report `Configured`/`DatabasesLoaded`
//! progress before the (potentially slow) first inquiry.

use std::sync::Arc;

use afc_analyses::{exclusion_zone, heatmap, scan_analysis, AnalysisConfig, AnalysisRequest, ExclusionZoneRequest, HeatmapRequest};
use afc_fs::store::{FreqBandMhz, LatLonWindow};
use afc_fs::{antenna::AntennaRegistry, FsStore};
use afc_interference::{tile_psd_segments, ChannelResult, ChannelSpec, DeniedRegion, FreqRangeMhz};
use afc_io::config::{EngineConfigDoc, SpectralAlgorithmDoc};
use afc_io::inquiry::{AnalysisType, InquiryDoc};
use afc_io::response::ResponseDoc;
use afc_io::status::RunStats;
use afc_pathloss::{PathLossConfig, PropagationEnvironment};
use afc_raster::RasterDataLayer;
use afc_terrain::TerrainResolver;
use tracing::{instrument, warn};

use crate::config::{analysis_config_from_doc, path_loss_config_from_doc};
use crate::errors::{EngineError, Result};
use crate::pool::{parallel_map_chunked, CancelFlag};
use crate::request::{channel_specs_from_inquiry, region_from_location, scan_config_from_location};
use crate::state::EngineState;

/// loaded-database inputs for [`Manager::load_databases`]. The tabular FS
/// source and RAS/denied-region set are external collaborators (spec
/// 4.E/4.J); the caller already parsed them into rows/shapes.
pub struct DatabaseInputs<'a, I>
where
    I: IntoIterator<Item = (usize, Vec<&'a str>)>,
{
    pub terrain_raster: Arc<RasterDataLayer>,
    pub antennas: AntennaRegistry,
    pub fs_rows: I,
    pub fs_window: LatLonWindow,
    pub fs_band: FreqBandMhz,
    pub denied_regions: Vec<DeniedRegion>,
}

pub struct Manager {
    state: EngineState,
    cancel: CancelFlag,
    path_loss: Option<PathLossConfig>,
    analysis: Option<AnalysisConfig>,
    min_rlan_height_above_terrain_m: f64,
    spectral_algorithm: SpectralAlgorithmDoc,
    terrain: Option<TerrainResolver>,
    fs_store: Option<FsStore>,
    denied_regions: Vec<DeniedRegion>,
    stats: RunStats,
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}

impl Manager {
    pub fn new() -> Self {
        Manager {
            state: EngineState::New,
            cancel: CancelFlag::new(),
            path_loss: None,
            analysis: None,
            min_rlan_height_above_terrain_m: 1.5,
            spectral_algorithm: SpectralAlgorithmDoc::Pwr,
            terrain: None,
            fs_store: None,
            denied_regions: Vec::new(),
            stats: RunStats::default(),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// a clone of the run's cancel flag; a caller can hand this to a
    /// supervising thread or signal handler to stop an in-flight run.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// `New -> Configured`: turns the engine configuration document into
    /// the internal path-loss/analysis configs every later inquiry reuses.
    #[instrument(skip_all)]
    pub fn configure(&mut self, config_doc: &EngineConfigDoc, environment: PropagationEnvironment) -> Result<()> {
        let path_loss = path_loss_config_from_doc(config_doc);
        let analysis = analysis_config_from_doc(config_doc, path_loss.clone(), environment);
        self.path_loss = Some(path_loss);
        self.analysis = Some(analysis);
        self.min_rlan_height_above_terrain_m = config_doc.min_rlan_height_above_terrain_m;
        self.spectral_algorithm = config_doc.spectral_algorithm;
        self.state.advance(EngineState::Configured)?;
        Ok(())
    }

    /// `Configured -> DatabasesLoaded`: builds the terrain resolver and
    /// loads the FS/RAS incumbent store, recording anomalies rather than
    /// aborting on individual malformed rows (spec 4.E).
    #[instrument(skip_all)]
    pub fn load_databases<'a, I>(&mut self, inputs: DatabaseInputs<'a, I>) -> Result<()>
    where
        I: IntoIterator<Item = (usize, Vec<&'a str>)>,
    {
        let terrain = TerrainResolver::new(inputs.terrain_raster);
        let mut fs_store = FsStore::new(terrain.clone(), inputs.antennas);
        fs_store.load(inputs.fs_rows, &inputs.fs_window, &inputs.fs_band)?;

        self.stats.fs_considered = fs_store.stations().len() + fs_store.anomalies().len();
        self.stats.anomalies = fs_store.anomalies().len();
        if !fs_store.anomalies().is_empty() {
            warn!(count = fs_store.anomalies().len(), "FS rows rejected as anomalies during load");
        }

        self.terrain = Some(terrain);
        self.fs_store = Some(fs_store);
        self.denied_regions = inputs.denied_regions;
        self.state.advance(EngineState::DatabasesLoaded)?;
        Ok(())
    }

    /// `DatabasesLoaded -> Analyzing -> Produced | Failed`: runs one
    /// inquiry to completion and returns its response document. A failure
    /// anywhere in the pipeline still yields a `ResponseDoc` (spec §7: "a
    /// single structured response is the only user-visible outcome of a
    /// failed run") rather than propagating the error past this call —
    /// the `Err` case is reserved for state-machine misuse and version
    /// rejection, which happen before `Analyzing` is even entered.
    #[instrument(skip_all, fields(request_id = %inquiry.request_id))]
    pub fn run_inquiry(&mut self, inquiry: &InquiryDoc) -> Result<ResponseDoc> {
        if !inquiry.is_supported_version() {
            self.state.advance(EngineState::Failed)?;
            return Ok(ResponseDoc::failure(&inquiry.request_id, afc_io::response::ResponseCode::VersionNotSupported, format!("unsupported inquiry version {}", inquiry.version)));
        }

        self.state.advance(EngineState::Analyzing)?;
        let outcome = self.evaluate_inquiry(inquiry);

        match outcome {
            Ok(response) => {
                self.state.advance(EngineState::Produced)?;
                Ok(response)
            }
            Err(err) => {
                self.state.advance(EngineState::Failed)?;
                Ok(ResponseDoc::failure(&inquiry.request_id, err.response_code(), err.to_string()))
            }
        }
    }

    fn evaluate_inquiry(&mut self, inquiry: &InquiryDoc) -> Result<ResponseDoc> {
        let terrain = self.terrain.as_ref().ok_or(EngineError::MissingParam("databases not loaded"))?;
        let fs_store = self.fs_store.as_ref().ok_or(EngineError::MissingParam("databases not loaded"))?;
        let analysis = self.analysis.as_ref().ok_or(EngineError::MissingParam("engine not configured"))?;

        let channels = channel_specs_from_inquiry(inquiry)?;
        let region = region_from_location(&inquiry.location);
        let scan_config = scan_config_from_location(&inquiry.location, self.min_rlan_height_above_terrain_m);

        match inquiry.analysis_type {
            AnalysisType::ApAfc => {
                let request = AnalysisRequest { terrain, fs_store, denied_regions: &self.denied_regions, channels: &channels, analysis };
                let (results, scan_point_count) = evaluate_channels_parallel(&self.cancel, &request, &region, &scan_config)?;
                self.stats.scan_points = scan_point_count;
                self.stats.links_evaluated += results.len();
                self.build_point_response(inquiry, results)
            }
            AnalysisType::ScanAnalysis => {
                let request = AnalysisRequest { terrain, fs_store, denied_regions: &self.denied_regions, channels: &channels, analysis };
                let scan_points = afc_scan::RegionScanner::new(terrain).scan(&region, &scan_config)?;
                self.stats.scan_points = scan_points.len();
                let results = scan_analysis(&request, &scan_points)?;
                self.stats.links_evaluated += results.len();
                self.build_point_response(inquiry, results)
            }
            AnalysisType::ExclusionZoneAnalysis => self.evaluate_exclusion_zone(inquiry, &region, &channels, analysis),
            AnalysisType::HeatmapAnalysis => self.evaluate_heatmap(inquiry, &region, &channels, analysis),
        }
    }

    /// `pwr`/`psd` (spec §6 `spectralAlgorithm`) differ only in response
    /// aggregation: `psd` additionally tiles the inquired frequency range
    /// into PSD-limited segments from the channel results already computed
    /// in full-channel mode.
    fn build_point_response(&self, inquiry: &InquiryDoc, results: Vec<ChannelResult>) -> Result<ResponseDoc> {
        let segments = match (self.spectral_algorithm, inquiry.inquired_frequency_ranges.first()) {
            (SpectralAlgorithmDoc::Psd, Some(range)) => {
                tile_psd_segments(FreqRangeMhz { low: range.low_mhz, high: range.high_mhz }, &results)
            }
            _ => Vec::new(),
        };

        let link_debug: Vec<_> = results
            .iter()
            .filter_map(|c| {
                c.debug_breakdown.as_ref().map(|breakdown| {
                    serde_json::json!({
                        "opClass": c.op_class,
                        "index": c.index,
                        "breakdown": breakdown.iter().map(|b| serde_json::json!({
                            "component": b.component,
                            "lossDb": b.loss_db,
                        })).collect::<Vec<_>>(),
                    })
                })
            })
            .collect();

        let mut response = ResponseDoc::success(&inquiry.request_id, results, segments);
        if !link_debug.is_empty() {
            response.vendor_extensions = Some(serde_json::json!({ "linkDebug": link_debug }));
        }
        Ok(response)
    }

    /// exclusion-zone analysis has no single "the" FS station in the
    /// inquiry document (spec §6 carries only the RLAN's own uncertainty
    /// region); this build computes the contour against every FS station
    /// within interaction range of the region's centroid, for every
    /// inquired channel, and reports the vertex lists as vendor
    /// extensions since `ResponseDoc`'s typed fields have no polygon slot.
    fn evaluate_exclusion_zone(&self, inquiry: &InquiryDoc, region: &afc_scan::Region, channels: &[ChannelSpec], analysis: &AnalysisConfig) -> Result<ResponseDoc> {
        let terrain = self.terrain.as_ref().ok_or(EngineError::MissingParam("databases not loaded"))?;
        let fs_store = self.fs_store.as_ref().ok_or(EngineError::MissingParam("databases not loaded"))?;

        let (south, north, west, east) = region.bbox();
        let center = ((south + north) / 2.0, (west + east) / 2.0);
        let stations = fs_store.within_interaction_radius(center, analysis.max_interaction_radius_m);

        let mut zones = Vec::new();
        for &station in &stations {
            for channel in channels {
                let request = ExclusionZoneRequest {
                    terrain,
                    antennas: fs_store.antennas(),
                    station,
                    channel: channel.freq,
                    rlan_eirp_dbm: analysis.max_eirp_dbm,
                    rlan_height_amsl_m: inquiry.location.height_m,
                    rlan_is_indoor: false,
                    bearing_step_deg: 5.0,
                    min_distance_m: 10.0,
                    max_distance_m: analysis.max_interaction_radius_m,
                    tolerance_m: 10.0,
                };
                match exclusion_zone(&request, analysis) {
                    Ok(vertices) => zones.push(serde_json::json!({
                        "fsId": station.row.fsid,
                        "opClass": channel.op_class,
                        "index": channel.index,
                        "vertices": vertices,
                    })),
                    Err(afc_analyses::AnalysesError::ContourNotBracketed { .. }) => continue,
                    Err(e) => return Err(e.into()),
                }
            }
        }

        let mut response = ResponseDoc::success(&inquiry.request_id, Vec::new(), Vec::new());
        response.vendor_extensions = Some(serde_json::json!({ "exclusionZones": zones }));
        Ok(response)
    }

    /// same single-station ambiguity as exclusion zone; heatmap grids the
    /// RLAN region's bounding box against every in-range FS station and
    /// channel, packing each station/channel grid as a vendor extension.
    fn evaluate_heatmap(&self, inquiry: &InquiryDoc, region: &afc_scan::Region, channels: &[ChannelSpec], analysis: &AnalysisConfig) -> Result<ResponseDoc> {
        let terrain = self.terrain.as_ref().ok_or(EngineError::MissingParam("databases not loaded"))?;
        let fs_store = self.fs_store.as_ref().ok_or(EngineError::MissingParam("databases not loaded"))?;

        let (south, north, west, east) = region.bbox();
        let center = ((south + north) / 2.0, (west + east) / 2.0);
        let stations = fs_store.within_interaction_radius(center, analysis.max_interaction_radius_m);
        let lat_step = ((north - south) / 20.0).max(1.0e-5);
        let lon_step = ((east - west) / 20.0).max(1.0e-5);

        let mut grids = Vec::new();
        for &station in &stations {
            for channel in channels {
                let request = HeatmapRequest {
                    terrain,
                    antennas: fs_store.antennas(),
                    station,
                    channel: channel.freq,
                    rlan_eirp_dbm: analysis.max_eirp_dbm,
                    rlan_height_agl_m: inquiry.location.height_m,
                    min_lat: south,
                    max_lat: north,
                    min_lon: west,
                    max_lon: east,
                    lat_step_deg: lat_step,
                    lon_step_deg: lon_step,
                };
                let cells = heatmap(&request, analysis)?;
                grids.push(serde_json::json!({
                    "fsId": station.row.fsid,
                    "opClass": channel.op_class,
                    "index": channel.index,
                    "cells": cells.iter().map(|c| serde_json::json!({"lat": c.lat, "lon": c.lon, "inDb": c.i_n_db})).collect::<Vec<_>>(),
                }));
            }
        }

        let mut response = ResponseDoc::success(&inquiry.request_id, Vec::new(), Vec::new());
        response.vendor_extensions = Some(serde_json::json!({ "heatmaps": grids }));
        Ok(response)
    }
}

/// dispatches one channel per worker-pool chunk ([`parallel_map_chunked`],
/// spec §5); the channel-level `min` reduction inside
/// `afc_interference::aggregate_channel` is associative and commutative,
/// so channels may complete in any order. A free function, not a method,
/// so its `request` argument can borrow `Manager`'s fields without also
/// needing a conflicting `&mut Manager` for itself.
fn evaluate_channels_parallel(
    cancel: &CancelFlag,
    request: &AnalysisRequest,
    region: &afc_scan::Region,
    scan_config: &afc_scan::ScanConfig,
) -> Result<(Vec<ChannelResult>, usize)> {
    let scanner = afc_scan::RegionScanner::new(request.terrain);
    let scan_points = scanner.scan(region, scan_config)?;
    let scan_point_count = scan_points.len();

    let outcomes = parallel_map_chunked(request.channels, cancel, |channel| afc_analyses::evaluate_channel(request, &scan_points, channel));
    if cancel.is_cancelled() {
        return Err(EngineError::Cancelled);
    }
    let mut results = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        results.push(outcome.ok_or(EngineError::Cancelled)??);
    }
    Ok((results, scan_point_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use afc_io::config::{ItmParametersDoc, PathLossModelDoc, Winner2UnknownLosStrategyDoc};
    use afc_io::inquiry::{ChannelsDoc, DeviceDescriptorDoc, FrequencyRangeDoc, LocationDoc, LocationShapeDoc, SUPPORTED_INQUIRY_VERSION};
    use afc_scan::region::HeightType;

    fn sample_config_doc() -> EngineConfigDoc {
        EngineConfigDoc {
            path_loss_model: PathLossModelDoc::Fspl,
            confidence_bldg_2109_pct: 50.0,
            confidence_clutter_2108_pct: 50.0,
            confidence_winner2_los_pct: 50.0,
            confidence_winner2_nlos_pct: 50.0,
            confidence_winner2_combined_pct: 50.0,
            confidence_itm_pct: 50.0,
            reliability_itm_pct: 50.0,
            winner2_unknown_los_strategy: Winner2UnknownLosStrategyDoc::Probabilistic,
            itm: ItmParametersDoc { dielectric_constant: 15.0, conductivity_s_per_m: 0.005, surface_refractivity_n_units: 301.0, min_spacing_m: 30.0, max_points: 1500 },
            near_field_enabled: false,
            body_loss_indoor_db: 0.0,
            body_loss_outdoor_db: 0.0,
            polarization_loss_db: 0.0,
            feeder_loss_db: 0.0,
            rlan_height_policy: HeightType::Agl,
            min_rlan_height_above_terrain_m: 1.5,
            spectral_algorithm: SpectralAlgorithmDoc::Pwr,
            aci_enabled: false,
            aci_mask_width_mhz: 0.0,
            apply_clutter: false,
            i_n_threshold_db: -6.0,
            max_eirp_dbm: 36.0,
            debug: false,
        }
    }

    fn sample_inquiry() -> InquiryDoc {
        InquiryDoc {
            version: SUPPORTED_INQUIRY_VERSION.to_string(),
            analysis_type: AnalysisType::ApAfc,
            request_id: "req-1".to_string(),
            ruleset_id: "US".to_string(),
            location: LocationDoc {
                shape: LocationShapeDoc::Ellipse { center_lat: 37.4, center_lon: -122.1, semi_major_m: 100.0, semi_minor_m: 100.0, orientation_deg: 0.0 },
                height_type: HeightType::Agl,
                height_m: 5.0,
                vertical_uncertainty_m: 0.0,
            },
            inquired_frequency_ranges: vec![FrequencyRangeDoc { low_mhz: 5925.0, high_mhz: 6425.0 }],
            inquired_channels: vec![ChannelsDoc { op_class: 131, indices: vec![1] }],
            device_descriptor: DeviceDescriptorDoc { serial_number: "SN-1".to_string(), certification_id: None, rulesets: vec!["US".to_string()] },
        }
    }

    #[test]
    fn rejects_inquiry_before_configure() {
        let mut manager = Manager::new();
        let err = manager.evaluate_inquiry(&sample_inquiry()).unwrap_err();
        assert!(matches!(err, EngineError::MissingParam(_)));
    }

    #[test]
    fn full_pipeline_on_empty_databases_yields_invalid_channel() {
        let mut manager = Manager::new();
        manager.configure(&sample_config_doc(), PropagationEnvironment::Rural).unwrap();

        let inputs = DatabaseInputs {
            terrain_raster: Arc::new(RasterDataLayer::new()),
            antennas: AntennaRegistry::new(),
            fs_rows: Vec::<(usize, Vec<&str>)>::new(),
            fs_window: LatLonWindow { south: -90.0, north: 90.0, west: -180.0, east: 180.0 },
            fs_band: FreqBandMhz { low: 5925.0, high: 7125.0 },
            denied_regions: Vec::new(),
        };
        manager.load_databases(inputs).unwrap();

        let response = manager.run_inquiry(&sample_inquiry()).unwrap();
        assert_eq!(response.response_code, afc_io::response::ResponseCode::Success);
        assert_eq!(response.available_channel_info.len(), 1);
        assert_eq!(manager.state(), EngineState::Produced);
    }

    #[test]
    fn unsupported_version_fails_without_touching_databases() {
        let mut manager = Manager::new();
        manager.configure(&sample_config_doc(), PropagationEnvironment::Rural).unwrap();
        let inputs = DatabaseInputs {
            terrain_raster: Arc::new(RasterDataLayer::new()),
            antennas: AntennaRegistry::new(),
            fs_rows: Vec::<(usize, Vec<&str>)>::new(),
            fs_window: LatLonWindow { south: -90.0, north: 90.0, west: -180.0, east: 180.0 },
            fs_band: FreqBandMhz { low: 5925.0, high: 7125.0 },
            denied_regions: Vec::new(),
        };
        manager.load_databases(inputs).unwrap();

        let mut inquiry = sample_inquiry();
        inquiry.version = "0.1".to_string();
        let response = manager.run_inquiry(&inquiry).unwrap();
        assert_eq!(response.response_code, afc_io::response::ResponseCode::VersionNotSupported);
        assert_eq!(manager.state(), EngineState::Failed);
    }
}
