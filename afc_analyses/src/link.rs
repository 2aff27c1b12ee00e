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

//! samples one (RLAN scan point, FS station, channel) link: geometry,
//! spectral overlap, path loss and antenna discrimination, folded into the
//! candidate EIRP that keeps that single link's I/N at the configured
//! threshold.

use afc_fs::noise::noise_floor_dbm;
use afc_fs::row::emission_bandwidth_mhz;
use afc_fs::FsStation;
use afc_interference::{
    angle_off_boresight_deg, eirp_max_dbm, i_rel_db, link_geometry, spectral_overlap_loss_db, FreqRangeMhz, LinkInputs,
};
use afc_pathloss::{compose_path_loss, EnvironmentTags, LosOption};
use afc_scan::ScanPoint;

use crate::config::AnalysisConfig;
use crate::errors::Result;
use crate::gain::rx_discrimination_gain_dbi;
use crate::profile::{profile_is_clear, sample_profile};
use afc_terrain::TerrainResolver;

/// station-side height above sea level used for the link, AGL/AMSL
/// distinction already folded in from the row's `height_is_agl` flag.
fn rx_height_amsl_m(station: &FsStation) -> f64 {
    let declared = station.row.rx_height_m.unwrap_or(0.0);
    if station.row.height_is_agl {
        station.rx_terrain_m + declared
    } else {
        declared
    }
}

/// a link's `I_rel` and the FS receiver's noise floor, the two figures any
/// analysis (EIRP ceiling, raw I/N at a fixed EIRP) derives its answer
/// from.
#[derive(Debug, Clone)]
pub struct LinkMargin {
    pub i_rel_db: f64,
    pub noise_floor_dbm: f64,
    /// the composed path loss's per-component breakdown, populated only
    /// when `AnalysisConfig::debug` is set; empty otherwise.
    pub breakdown: Vec<afc_pathloss::DebugLinkBreakdown>,
}

/// `I/N` for this link at a given RLAN EIRP, dB.
pub fn i_n_db(margin: &LinkMargin, rlan_eirp_dbm: f64) -> f64 {
    margin.i_rel_db + rlan_eirp_dbm - margin.noise_floor_dbm
}

/// computes one link's margin, or `None` when it contributes no sample at
/// all (no spectral overlap with the FS's occupied band, or rejected as
/// too close per the path-loss composer's exclusion gate).
pub fn link_margin(
    terrain: &TerrainResolver,
    scan_point: &ScanPoint,
    station: &FsStation,
    channel_freq: FreqRangeMhz,
    antenna_pattern: afc_fs::antenna::AntennaPatternCategory,
    config: &AnalysisConfig,
) -> Result<Option<LinkMargin>> {
    let (Some(start), Some(stop)) = (station.row.start_freq_mhz, station.row.stop_freq_mhz) else {
        return Ok(None);
    };
    let fs_occupied = FreqRangeMhz { low: start, high: stop };
    let spectral_loss_db = spectral_overlap_loss_db(channel_freq, fs_occupied, config.spectral_mode);
    if spectral_loss_db.is_infinite() {
        // no frequency overlap at all: the link contributes no interference
        // (spec scenario S1), not "no sample" — `I_rel -> -inf` makes
        // `EIRP_max -> +inf`, which the channel aggregation's `min` against
        // `maxEIRP_dBm` resolves to the configured ceiling. Skip the
        // geometry/path-loss work, which can't change that outcome.
        return Ok(Some(LinkMargin { i_rel_db: f64::NEG_INFINITY, noise_floor_dbm: 0.0, breakdown: Vec::new() }));
    }

    let (Some(rx_lat), Some(rx_lon)) = (station.row.lat, station.row.lon) else {
        return Ok(None);
    };
    let rx_height = rx_height_amsl_m(station);

    let geometry = link_geometry(scan_point.lat, scan_point.lon, scan_point.height_amsl_m, rx_lat, rx_lon, rx_height);
    let bearing_from_fs = link_geometry(rx_lat, rx_lon, rx_height, scan_point.lat, scan_point.lon, scan_point.height_amsl_m).bearing_deg;
    let boresight = station.row.azimuth_deg.unwrap_or(0.0);
    let angle_off_boresight = angle_off_boresight_deg(bearing_from_fs, boresight);

    let max_gain_dbi = station.row.antenna_gain_dbi.unwrap_or(0.0);
    let rx_gain_dbi = rx_discrimination_gain_dbi(antenna_pattern, max_gain_dbi, angle_off_boresight, config.d_over_lambda)
        - station.row.feeder_loss_db.unwrap_or(0.0);

    let pr_discrimination_db: f64 = station.row.passive_repeaters.iter().map(|hop| hop.gain_dbi).sum();

    let profile = sample_profile(
        terrain,
        (scan_point.lat, scan_point.lon),
        (rx_lat, rx_lon),
        geometry.distance_m,
        config.profile_points,
    )?;
    let los = match profile_is_clear(&profile, scan_point.height_amsl_m, rx_height) {
        Some(clear) => LosOption::Known(clear),
        None => LosOption::Unknown,
    };
    let tags = if scan_point.is_indoor { EnvironmentTags::indoor() } else { EnvironmentTags::outdoor() };

    let freq_mid_mhz = (channel_freq.low + channel_freq.high) / 2.0;
    let outcome = compose_path_loss(
        &config.path_loss,
        geometry.distance_m,
        freq_mid_mhz,
        geometry.elevation_angle_deg.abs(),
        config.environment,
        los,
        tags,
        Some(&profile).filter(|p| p.len() >= 2),
        None,
        0.0,
        0.0,
        0.0,
        config.debug,
    )?;
    let path_loss_result = match outcome {
        Ok(result) => result,
        Err(_too_close) => return Ok(None),
    };

    let bandwidth_mhz = station
        .row
        .emission_designator
        .as_deref()
        .and_then(emission_bandwidth_mhz)
        .unwrap_or_else(|| (stop - start).max(1.0e-6));
    let noise_figure_db = station.row.noise_figure_db.unwrap_or(config.default_noise_figure_db);
    let noise_floor = noise_floor_dbm(bandwidth_mhz, noise_figure_db);

    let inputs = LinkInputs {
        path_loss_db: path_loss_result.total_loss_db,
        rx_gain_dbi,
        spectral_overlap_loss_db: spectral_loss_db,
        pr_discrimination_db,
    };
    let i_rel = i_rel_db(&inputs);
    Ok(Some(LinkMargin { i_rel_db: i_rel, noise_floor_dbm: noise_floor, breakdown: path_loss_result.breakdown }))
}

/// the candidate EIRP (dBm) that keeps this single link's I/N at
/// `config.i_n_threshold_db`, or `None` when the link contributes no
/// sample at all (see [`link_margin`]).
pub fn sample_link(
    terrain: &TerrainResolver,
    scan_point: &ScanPoint,
    station: &FsStation,
    channel_freq: FreqRangeMhz,
    antenna_pattern: afc_fs::antenna::AntennaPatternCategory,
    config: &AnalysisConfig,
) -> Result<Option<f64>> {
    let margin = link_margin(terrain, scan_point, station, channel_freq, antenna_pattern, config)?;
    Ok(margin.map(|m| eirp_max_dbm(config.i_n_threshold_db, m.noise_floor_dbm, m.i_rel_db)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use afc_fs::antenna::AntennaPatternCategory;
    use afc_fs::row::FsRow;
    use afc_fs::FsStation;
    use afc_itu::itm::{Climate, ItmParameters, Polarization};
    use afc_itu::p2109::BuildingType;
    use afc_itu::winner2::UnknownLosStrategy;
    use afc_pathloss::{PathLossConfig, PathLossModel, PropagationEnvironment};
    use afc_raster::RasterDataLayer;
    use afc_terrain::TerrainSourceTag;
    use std::sync::Arc;

    fn base_row() -> FsRow {
        FsRow {
            database_id: Some(1),
            fsid: Some(1),
            callsign: Some("W1AW".into()),
            status: Some('A'),
            radio_service: Some("FIXED".into()),
            entity_name: Some("Acme".into()),
            lat: Some(37.41),
            lon: Some(-122.0),
            rx_height_m: Some(30.0),
            height_is_agl: true,
            start_freq_mhz: Some(6100.0),
            stop_freq_mhz: Some(6150.0),
            emission_designator: Some("50M0D7W".into()),
            polarization: Some('V'),
            antenna_model: Some("ANT-1".into()),
            antenna_category: Some("HP".into()),
            antenna_gain_dbi: Some(38.0),
            azimuth_deg: Some(180.0),
            elevation_deg: Some(0.0),
            mobile_flag: false,
            feeder_loss_db: Some(1.0),
            noise_figure_db: Some(4.0),
            tx_lat: None,
            tx_lon: None,
            passive_repeaters: Vec::new(),
        }
    }

    fn base_config() -> AnalysisConfig {
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
            spectral_mode: afc_interference::SpectralOverlapMode::FullChannel,
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
    fn no_spectral_overlap_yields_an_unconstrained_candidate() {
        // scenario S1: a channel with zero frequency overlap contributes no
        // interference, not "no sample" - the channel still aggregates to
        // `maxEIRP_dBm` rather than `Invalid` when this is the only station.
        let terrain = TerrainResolver::new(Arc::new(RasterDataLayer::new()));
        let scan_point = ScanPoint { lat: 37.4, lon: -122.1, height_amsl_m: 30.0, is_indoor: false };
        let station = FsStation { row: base_row(), rx_terrain_m: 10.0, rx_terrain_source: TerrainSourceTag::Srtm, tx_terrain_m: None };
        let channel = FreqRangeMhz { low: 5945.0, high: 5965.0 };
        let config = base_config();
        let result = sample_link(&terrain, &scan_point, &station, channel, AntennaPatternCategory::Hp, &config).unwrap();
        assert!(result.is_some());
        assert!(result.unwrap().is_infinite());
    }

    #[test]
    fn overlapping_channel_yields_a_candidate_eirp() {
        let terrain = TerrainResolver::new(Arc::new(RasterDataLayer::new()));
        let scan_point = ScanPoint { lat: 37.4, lon: -122.1, height_amsl_m: 30.0, is_indoor: false };
        let station = FsStation { row: base_row(), rx_terrain_m: 10.0, rx_terrain_source: TerrainSourceTag::Srtm, tx_terrain_m: None };
        let channel = FreqRangeMhz { low: 6100.0, high: 6150.0 };
        let config = base_config();
        let result = sample_link(&terrain, &scan_point, &station, channel, AntennaPatternCategory::Hp, &config).unwrap();
        assert!(result.is_some());
        assert!(result.unwrap().is_finite());
    }
}
