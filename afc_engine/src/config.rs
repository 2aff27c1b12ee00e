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

//! turns the wire-facing `afc_io::EngineConfigDoc`/`InquiryDoc` shapes into
//! the internal config/request types `afc_pathloss`/`afc_analyses`/
//! `afc_scan` expect. The inquiry document's fields are a summary (spec
//! §6) of the full `afc_pathloss::PathLossConfig`; fields it doesn't carry
//! (exclusion distance, close-in model, fixed building loss, FSPL clamp,
//! NLCD density thresholds) take the same defaults `afc_pathloss`'s own
//! tests use, documented in DESIGN.md.

use afc_analyses::AnalysisConfig;
use afc_io::config::{EngineConfigDoc, PathLossModelDoc, Winner2UnknownLosStrategyDoc};
use afc_interference::SpectralOverlapMode;
use afc_itu::itm::{Climate, ItmParameters, Polarization};
use afc_itu::p2109::BuildingType;
use afc_itu::winner2::UnknownLosStrategy;
use afc_pathloss::{PathLossConfig, PathLossModel, PropagationEnvironment};

fn path_loss_model(doc: PathLossModelDoc) -> PathLossModel {
    match doc {
        PathLossModelDoc::Fspl => PathLossModel::Fspl,
        PathLossModelDoc::ItmBldg => PathLossModel::ItmBldg,
        PathLossModelDoc::Coalition6 => PathLossModel::Coalition6,
        PathLossModelDoc::FccSixGHzRO => PathLossModel::FccSixGHzRO,
        PathLossModelDoc::Custom => PathLossModel::Custom,
    }
}

fn winner2_unknown_los_strategy(doc: Winner2UnknownLosStrategyDoc) -> UnknownLosStrategy {
    match doc {
        Winner2UnknownLosStrategyDoc::AlwaysLos => UnknownLosStrategy::AlwaysLos,
        Winner2UnknownLosStrategyDoc::AlwaysNlos => UnknownLosStrategy::AlwaysNlos,
        Winner2UnknownLosStrategyDoc::Probabilistic => UnknownLosStrategy::Probabilistic,
    }
}

pub fn path_loss_config_from_doc(doc: &EngineConfigDoc) -> PathLossConfig {
    PathLossConfig {
        model: path_loss_model(doc.path_loss_model),
        exclusion_dist_m: 1.0,
        close_in_dist_m: 0.0,
        close_in_model: PathLossModel::Fspl,
        apply_clutter: doc.apply_clutter,
        confidence_clutter_2108_pct: doc.confidence_clutter_2108_pct,
        confidence_bldg_2109_pct: doc.confidence_bldg_2109_pct,
        confidence_winner2_los_pct: doc.confidence_winner2_los_pct,
        confidence_winner2_nlos_pct: doc.confidence_winner2_nlos_pct,
        confidence_winner2_combined_pct: doc.confidence_winner2_combined_pct,
        confidence_itm_pct: doc.confidence_itm_pct,
        reliability_itm_pct: doc.reliability_itm_pct,
        itm_min_spacing_m: doc.itm.min_spacing_m,
        itm_max_points: doc.itm.max_points,
        itm_params: ItmParameters {
            dielectric_constant: doc.itm.dielectric_constant,
            conductivity_s_per_m: doc.itm.conductivity_s_per_m,
            polarization: Polarization::Vertical,
            climate: Climate::ContinentalTemperate,
            surface_refractivity_n_units: doc.itm.surface_refractivity_n_units,
            confidence_pct: doc.confidence_itm_pct,
            reliability_pct: doc.reliability_itm_pct,
        },
        winner2_unknown_los_strategy: winner2_unknown_los_strategy(doc.winner2_unknown_los_strategy),
        building_type: BuildingType::Traditional,
        fixed_building_loss_db: None,
        polarization_loss_db: doc.polarization_loss_db,
        body_loss_indoor_db: doc.body_loss_indoor_db,
        body_loss_outdoor_db: doc.body_loss_outdoor_db,
        feeder_loss_db: doc.feeder_loss_db,
        near_field_enabled: doc.near_field_enabled,
        path_loss_clamp_fspl: true,
        density_thr_urban: 3000.0,
        density_thr_suburban: 500.0,
    }
}

pub fn analysis_config_from_doc(doc: &EngineConfigDoc, path_loss: PathLossConfig, environment: PropagationEnvironment) -> AnalysisConfig {
    // `pwr`/`psd` (spec §6 `spectralAlgorithm`) differ in how the *response*
    // is aggregated, not in the per-link sample: `psd` additionally runs
    // `afc_interference::tile_psd_segments`/`psd_segment_overlap_loss_db`
    // over the channel results afterward (see `Manager::run_inquiry`).
    // Every link sample itself uses the ACI-weighted overlap when
    // `aciEnabled`, full-channel overlap otherwise.
    let _ = doc.spectral_algorithm;
    let spectral_mode = if doc.aci_enabled {
        SpectralOverlapMode::AdjacentChannel { aci_mask_width_mhz: doc.aci_mask_width_mhz }
    } else {
        SpectralOverlapMode::FullChannel
    };
    AnalysisConfig {
        path_loss,
        environment,
        spectral_mode,
        i_n_threshold_db: doc.i_n_threshold_db,
        max_eirp_dbm: doc.max_eirp_dbm,
        d_over_lambda: afc_analyses::DEFAULT_D_OVER_LAMBDA,
        default_noise_figure_db: afc_analyses::DEFAULT_NOISE_FIGURE_DB,
        profile_points: afc_analyses::DEFAULT_PROFILE_POINTS,
        max_interaction_radius_m: 80_000.0,
        debug: doc.debug,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use afc_io::config::{ItmParametersDoc, PathLossModelDoc, SpectralAlgorithmDoc, Winner2UnknownLosStrategyDoc};

    fn sample_doc() -> EngineConfigDoc {
        EngineConfigDoc {
            path_loss_model: PathLossModelDoc::Coalition6,
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
            rlan_height_policy: afc_scan::region::HeightType::Agl,
            min_rlan_height_above_terrain_m: 1.5,
            spectral_algorithm: SpectralAlgorithmDoc::Psd,
            aci_enabled: false,
            aci_mask_width_mhz: 0.0,
            apply_clutter: false,
            i_n_threshold_db: -6.0,
            max_eirp_dbm: 36.0,
            debug: false,
        }
    }

    #[test]
    fn carries_i_n_threshold_and_max_eirp_through() {
        let doc = sample_doc();
        let path_loss = path_loss_config_from_doc(&doc);
        let analysis = analysis_config_from_doc(&doc, path_loss, PropagationEnvironment::Rural);
        assert_eq!(analysis.spectral_mode, SpectralOverlapMode::FullChannel);
        assert_eq!(analysis.i_n_threshold_db, -6.0);
        assert_eq!(analysis.max_eirp_dbm, 36.0);
    }

    #[test]
    fn aci_enabled_selects_adjacent_channel_mode() {
        let mut doc = sample_doc();
        doc.aci_enabled = true;
        doc.aci_mask_width_mhz = 10.0;
        let path_loss = path_loss_config_from_doc(&doc);
        let analysis = analysis_config_from_doc(&doc, path_loss, PropagationEnvironment::Rural);
        assert_eq!(analysis.spectral_mode, SpectralOverlapMode::AdjacentChannel { aci_mask_width_mhz: 10.0 });
    }

    #[test]
    fn apply_clutter_flag_reaches_path_loss_config() {
        let mut doc = sample_doc();
        doc.apply_clutter = true;
        let path_loss = path_loss_config_from_doc(&doc);
        assert!(path_loss.apply_clutter);
    }
}
