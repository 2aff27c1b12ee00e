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

//! point analysis (the inquiry-response pipeline) and scan analysis (the
//! same channel aggregation over an externally supplied candidate list).

use afc_fs::FsStore;
use afc_interference::{aggregate_channel, eirp_max_dbm, is_denied, ChannelResult, ChannelSpec, DeniedRegion};
use afc_scan::{Region, RegionScanner, ScanConfig, ScanPoint};
use afc_terrain::TerrainResolver;

use crate::config::AnalysisConfig;
use crate::errors::Result;
use crate::link::link_margin;

pub struct AnalysisRequest<'a> {
    pub terrain: &'a TerrainResolver,
    pub fs_store: &'a FsStore,
    pub denied_regions: &'a [DeniedRegion],
    pub channels: &'a [ChannelSpec],
    pub analysis: &'a AnalysisConfig,
}

/// runs the full pipeline over the inquiry's uncertainty region and
/// frequency set: scan the region, then aggregate every channel's EIRP
/// ceiling and availability over all scan points and in-range FS stations.
pub fn point_analysis(request: &AnalysisRequest, region: &Region, scan_config: &ScanConfig) -> Result<Vec<ChannelResult>> {
    let scanner = RegionScanner::new(request.terrain);
    let scan_points = scanner.scan(region, scan_config)?;
    evaluate_channels(request, &scan_points)
}

/// like [`point_analysis`] but over an externally supplied candidate point
/// list, for batch studies that don't go through the region scanner.
pub fn scan_analysis(request: &AnalysisRequest, scan_points: &[ScanPoint]) -> Result<Vec<ChannelResult>> {
    evaluate_channels(request, scan_points)
}

fn evaluate_channels(request: &AnalysisRequest, scan_points: &[ScanPoint]) -> Result<Vec<ChannelResult>> {
    request.channels.iter().map(|channel| evaluate_channel(request, scan_points, channel)).collect()
}

/// one channel's aggregated result over every scan point and in-range FS
/// station. Exposed (not just an inner closure) so a caller — e.g.
/// `afc_engine`'s worker pool — can dispatch channels across threads
/// itself rather than going through [`evaluate_channels`]'s sequential
/// loop; the `min` reduction inside [`aggregate_channel`] is associative
/// and commutative, so per-channel results may be produced in any order.
pub fn evaluate_channel(request: &AnalysisRequest, scan_points: &[ScanPoint], channel: &ChannelSpec) -> Result<ChannelResult> {
    let denied =
        scan_points.iter().any(|sp| is_denied(request.denied_regions, sp.lat, sp.lon, sp.height_amsl_m, channel.freq));

    let mut candidates = Vec::new();
    let mut limiting_eirp = f64::INFINITY;
    let mut limiting_breakdown = None;
    if !denied {
        for scan_point in scan_points {
            let stations = request
                .fs_store
                .within_interaction_radius((scan_point.lat, scan_point.lon), request.analysis.max_interaction_radius_m);
            for station in stations {
                let pattern = request.fs_store.antennas().bind(
                    station.row.antenna_model.as_deref(),
                    station.row.antenna_category.as_deref(),
                    station.row.antenna_gain_dbi,
                );
                let Some(margin) = link_margin(request.terrain, scan_point, station, channel.freq, pattern, request.analysis)? else {
                    continue;
                };
                let eirp = eirp_max_dbm(request.analysis.i_n_threshold_db, margin.noise_floor_dbm, margin.i_rel_db);
                candidates.push(eirp);
                if request.analysis.debug && eirp < limiting_eirp {
                    limiting_eirp = eirp;
                    limiting_breakdown = Some(margin.breakdown);
                }
            }
        }
    }

    let mut result = aggregate_channel(*channel, candidates, denied, request.analysis.max_eirp_dbm);
    if request.analysis.debug {
        result.debug_breakdown = limiting_breakdown;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use afc_fs::antenna::AntennaRegistry;
    use afc_interference::{Availability, FreqRangeMhz, SpectralOverlapMode};
    use afc_itu::itm::{Climate, ItmParameters, Polarization};
    use afc_itu::p2109::BuildingType;
    use afc_itu::winner2::UnknownLosStrategy;
    use afc_pathloss::{PathLossConfig, PathLossModel, PropagationEnvironment};
    use afc_raster::RasterDataLayer;
    use afc_scan::{BelowGroundPolicy, HeightType, ScanMethod};
    use std::sync::Arc;

    fn analysis_config() -> AnalysisConfig {
        AnalysisConfig {
            path_loss: PathLossConfig {
                model: PathLossModel::Fspl,
                exclusion_dist_m: 1.0,
                close_in_dist_m: 0.0,
                close_in_model: PathLossModel::Fspl,
                apply_clutter: false,
                confidence_clutter_2108_pct: 50.0,
                confidence_bldg_2109_pct: 50.0,
                confidence_winner2_los_pct: 50.0,
                confidence_winner2_nlos_pct: 50.0,
                confidence_winner2_combined_pct: 50.0,
                confidence_itm_pct: 50.0,
                reliability_itm_pct: 50.0,
                itm_min_spacing_m: 30.0,
                itm_max_points: 1500,
                itm_params: ItmParameters {
                    dielectric_constant: 15.0,
                    conductivity_s_per_m: 0.005,
                    polarization: Polarization::Vertical,
                    climate: Climate::ContinentalTemperate,
                    surface_refractivity_n_units: 301.0,
                    confidence_pct: 50.0,
                    reliability_pct: 50.0,
                },
                winner2_unknown_los_strategy: UnknownLosStrategy::Probabilistic,
                building_type: BuildingType::Traditional,
                fixed_building_loss_db: None,
                polarization_loss_db: 0.0,
                body_loss_indoor_db: 0.0,
                body_loss_outdoor_db: 0.0,
                feeder_loss_db: 0.0,
                near_field_enabled: false,
                path_loss_clamp_fspl: true,
                density_thr_urban: 3000.0,
                density_thr_suburban: 500.0,
            },
            environment: PropagationEnvironment::Rural,
            spectral_mode: SpectralOverlapMode::FullChannel,
            i_n_threshold_db: -6.0,
            max_eirp_dbm: 36.0,
            d_over_lambda: 150.0,
            default_noise_figure_db: 4.0,
            profile_points: 8,
            max_interaction_radius_m: 50_000.0,
            debug: false,
        }
    }

    #[test]
    fn empty_store_yields_invalid_channels() {
        let terrain = TerrainResolver::new(Arc::new(RasterDataLayer::new()));
        let fs_store = FsStore::new(TerrainResolver::new(Arc::new(RasterDataLayer::new())), AntennaRegistry::new());
        let denied = Vec::new();
        let channels = vec![ChannelSpec { op_class: 131, index: 1, freq: FreqRangeMhz { low: 5945.0, high: 5965.0 } }];
        let analysis = analysis_config();
        let request = AnalysisRequest { terrain: &terrain, fs_store: &fs_store, denied_regions: &denied, channels: &channels, analysis: &analysis };

        let region = afc_scan::Region::Ellipse { center_lat: 37.4, center_lon: -122.1, semi_major_m: 100.0, semi_minor_m: 100.0, orientation_deg: 0.0 };
        let scan_config = ScanConfig {
            method: ScanMethod::XyAlignNorthEast,
            scan_resolution_m: 50.0,
            height_step_m: 10.0,
            points_per_degree: 3600.0,
            height_type: HeightType::Agl,
            center_height_m: 5.0,
            height_uncertainty_m: 0.0,
            fixed_height_amsl: false,
            min_rlan_height_above_terrain_m: 1.5,
            below_ground_policy: BelowGroundPolicy::Discard,
            max_points: 10_000,
        };

        let result = point_analysis(&request, &region, &scan_config).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].availability, Availability::Invalid);
    }

    #[test]
    fn repeated_runs_over_identical_inputs_are_bit_identical() {
        let terrain = TerrainResolver::new(Arc::new(RasterDataLayer::new()));
        let fs_store = FsStore::new(TerrainResolver::new(Arc::new(RasterDataLayer::new())), AntennaRegistry::new());
        let denied = Vec::new();
        let channels = vec![ChannelSpec { op_class: 131, index: 1, freq: FreqRangeMhz { low: 5945.0, high: 5965.0 } }];
        let analysis = analysis_config();
        let request = AnalysisRequest { terrain: &terrain, fs_store: &fs_store, denied_regions: &denied, channels: &channels, analysis: &analysis };
        let points = vec![ScanPoint { lat: 37.4, lon: -122.1, height_amsl_m: 30.0, is_indoor: false }];

        let first = scan_analysis(&request, &points).unwrap();
        let second = scan_analysis(&request, &points).unwrap();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.availability, b.availability);
            assert_eq!(a.eirp_dbm.to_bits(), b.eirp_dbm.to_bits());
        }
    }

    #[test]
    fn scan_analysis_over_empty_points_is_invalid() {
        let terrain = TerrainResolver::new(Arc::new(RasterDataLayer::new()));
        let fs_store = FsStore::new(TerrainResolver::new(Arc::new(RasterDataLayer::new())), AntennaRegistry::new());
        let denied = Vec::new();
        let channels = vec![ChannelSpec { op_class: 131, index: 1, freq: FreqRangeMhz { low: 5945.0, high: 5965.0 } }];
        let analysis = analysis_config();
        let request = AnalysisRequest { terrain: &terrain, fs_store: &fs_store, denied_regions: &denied, channels: &channels, analysis: &analysis };

        let points: Vec<ScanPoint> = Vec::new();
        let result = scan_analysis(&request, &points).unwrap();
        assert_eq!(result[0].availability, Availability::Invalid);
    }
}
