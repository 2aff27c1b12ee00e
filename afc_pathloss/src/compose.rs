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

//! composes the per-link total path loss: exclusion/close-in distance
//! gates, per-model selection, then polarization/body/feeder/near-field/
//! building-penetration losses, with an optional FSPL clamp.

use afc_itu::fspl::fspl_db;
use afc_itu::itm::itm_area_mode_loss_db;
use afc_itu::near_field::NearFieldTable;
use afc_itu::p2108::p2108_clutter_loss_db;
use afc_itu::p2109::p2109_building_entry_loss_db;
use afc_itu::winner2::{combined_loss_db, LosState};
use tracing::trace;

use crate::errors::{PathLossError, Result};
use crate::model::{ElevationProfile, LosOption, PathLossConfig, PathLossModel, PropagationEnvironment};

/// result of composing one link's total loss.
#[derive(Debug, Clone)]
pub struct PathLossResult {
    pub total_loss_db: f64,
    pub model_name: &'static str,
    /// a representative sample of the model's confidence distribution at
    /// the configured quantile; not a literal random draw, since every
    /// model here is deterministic given its confidence parameter.
    pub cdf_sample_db: f64,
    pub breakdown: Vec<DebugLinkBreakdown>,
}

/// one named component of a link's loss, for optional debug emission.
#[derive(Debug, Clone, Copy)]
pub struct DebugLinkBreakdown {
    pub component: &'static str,
    pub loss_db: f64,
}

/// too-close link outcomes the caller must decide how to treat (spec 4.G
/// step 1: "the link is rejected as too close; caller decides").
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinkRejection {
    TooClose,
}

/// whether the rx endpoint is indoors, for body-loss and P.2109 selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentTags {
    outdoor: bool,
}

impl EnvironmentTags {
    pub fn outdoor() -> Self {
        EnvironmentTags { outdoor: true }
    }
    pub fn indoor() -> Self {
        EnvironmentTags { outdoor: false }
    }
    pub fn is_indoor(&self) -> bool {
        !self.outdoor
    }
}

/// composes the total path loss for one (scan point, FS point, channel)
/// link. `debug` controls whether the per-component breakdown is retained.
#[allow(clippy::too_many_arguments)]
pub fn compose_path_loss(
    config: &PathLossConfig,
    distance_m: f64,
    freq_mhz: f64,
    elevation_angle_deg: f64,
    environment: PropagationEnvironment,
    los: LosOption,
    tags: EnvironmentTags,
    elevation_profile: Option<&ElevationProfile>,
    near_field_table: Option<&NearFieldTable>,
    near_field_excess_db: f64,
    near_field_u: f64,
    near_field_aperture_efficiency: f64,
    debug: bool,
) -> Result<std::result::Result<PathLossResult, LinkRejection>> {
    if distance_m <= 0.0 {
        return Err(PathLossError::NonPositiveDistance(distance_m));
    }
    if distance_m < config.exclusion_dist_m {
        return Ok(Err(LinkRejection::TooClose));
    }

    let mut breakdown = Vec::new();
    let model = if distance_m < config.close_in_dist_m { config.close_in_model } else { config.model };

    let los_state = match los {
        LosOption::Known(true) => LosState::Los,
        LosOption::Known(false) => LosState::NLos,
        LosOption::Unknown => LosState::Unknown,
    };

    let (base_loss_db, model_name) = match model {
        PathLossModel::Fspl => (fspl_db(distance_m, freq_mhz), "FSPL"),
        PathLossModel::ItmBldg | PathLossModel::FccSixGHzRO => {
            let mut loss = match elevation_profile {
                Some(profile) => itm_area_mode_loss_db(
                    profile,
                    0.0,
                    0.0,
                    freq_mhz,
                    config.itm_params,
                    config.itm_max_points,
                    config.itm_min_spacing_m,
                )?,
                None => fspl_db(distance_m, freq_mhz),
            };
            if tags.is_indoor() {
                let bldg = p2109_building_entry_loss_db(
                    freq_mhz,
                    elevation_angle_deg,
                    config.confidence_bldg_2109_pct,
                    config.building_type,
                    config.fixed_building_loss_db,
                );
                push(&mut breakdown, debug, "p2109_building", bldg);
                loss += bldg;
            }
            if config.apply_clutter {
                let clutter = p2108_clutter_loss_db(freq_mhz, distance_m / 1000.0, config.confidence_clutter_2108_pct);
                push(&mut breakdown, debug, "p2108_clutter", clutter);
                loss += clutter;
            }
            (loss, if matches!(model, PathLossModel::FccSixGHzRO) { "FCC 6 GHz R&O" } else { "ITMBldg" })
        }
        PathLossModel::Coalition6 => {
            let confidence = match los_state {
                LosState::Los => config.confidence_winner2_los_pct,
                LosState::NLos => config.confidence_winner2_nlos_pct,
                LosState::Unknown => config.confidence_winner2_combined_pct,
            };
            let scenario = environment.winner2_scenario();
            let loss = combined_loss_db(scenario, distance_m, freq_mhz, los_state, config.winner2_unknown_los_strategy, confidence);
            (loss, "Coalition6/Winner-II")
        }
        PathLossModel::Custom => (fspl_db(distance_m, freq_mhz), "Custom"),
    };
    push(&mut breakdown, debug, model_name, base_loss_db);

    let mut total = base_loss_db;
    total += config.polarization_loss_db;
    push(&mut breakdown, debug, "polarization", config.polarization_loss_db);

    let body_loss = if tags.is_indoor() { config.body_loss_indoor_db } else { config.body_loss_outdoor_db };
    total += body_loss;
    push(&mut breakdown, debug, "body", body_loss);

    total += config.feeder_loss_db;
    push(&mut breakdown, debug, "feeder", config.feeder_loss_db);

    if config.near_field_enabled {
        if let Some(table) = near_field_table {
            let nf = table.interpolate(near_field_excess_db, near_field_u, near_field_aperture_efficiency);
            total += nf;
            push(&mut breakdown, debug, "near_field", nf);
        }
    }

    if config.path_loss_clamp_fspl {
        let fspl = fspl_db(distance_m, freq_mhz);
        if total < fspl {
            trace!(total, fspl, "clamping total loss to FSPL floor");
            total = fspl;
        }
    }

    Ok(Ok(PathLossResult {
        total_loss_db: total,
        model_name,
        cdf_sample_db: total,
        breakdown,
    }))
}

fn push(breakdown: &mut Vec<DebugLinkBreakdown>, debug: bool, component: &'static str, loss_db: f64) {
    if debug {
        breakdown.push(DebugLinkBreakdown { component, loss_db });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use afc_itu::itm::{Climate, ItmParameters, Polarization};
    use afc_itu::p2109::BuildingType;
    use afc_itu::winner2::UnknownLosStrategy;
    use approx::assert_abs_diff_eq;

    fn base_config() -> PathLossConfig {
        PathLossConfig {
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
            path_loss_clamp_fspl: false,
            density_thr_urban: 3000.0,
            density_thr_suburban: 500.0,
        }
    }

    #[test]
    fn too_close_link_is_rejected_not_errored() {
        let config = base_config();
        let result = compose_path_loss(
            &config, 0.5, 6000.0, 10.0, PropagationEnvironment::Rural,
            LosOption::Known(true), EnvironmentTags::outdoor(), None, None, 0.0, 0.0, 0.0, false,
        ).unwrap();
        assert_eq!(result, Err(LinkRejection::TooClose));
    }

    #[test]
    fn fspl_model_matches_fspl_db_plus_losses() {
        let mut config = base_config();
        config.feeder_loss_db = 2.0;
        let result = compose_path_loss(
            &config, 14200.0, 6015.0, 10.0, PropagationEnvironment::Rural,
            LosOption::Known(true), EnvironmentTags::outdoor(), None, None, 0.0, 0.0, 0.0, true,
        ).unwrap().unwrap();
        assert_abs_diff_eq!(result.total_loss_db, fspl_db(14200.0, 6015.0) + 2.0, epsilon = 1e-9);
        assert!(result.breakdown.iter().any(|b| b.component == "feeder"));
    }

    #[test]
    fn clamp_fspl_never_lowers_below_free_space() {
        let mut config = base_config();
        config.path_loss_clamp_fspl = true;
        config.polarization_loss_db = -50.0; // pathological, to force below FSPL
        let result = compose_path_loss(
            &config, 14200.0, 6015.0, 10.0, PropagationEnvironment::Rural,
            LosOption::Known(true), EnvironmentTags::outdoor(), None, None, 0.0, 0.0, 0.0, false,
        ).unwrap().unwrap();
        assert!(result.total_loss_db >= fspl_db(14200.0, 6015.0) - 1e-9);
    }

    #[test]
    fn negative_distance_is_a_model_error() {
        let config = base_config();
        let result = compose_path_loss(
            &config, -5.0, 6000.0, 10.0, PropagationEnvironment::Rural,
            LosOption::Known(true), EnvironmentTags::outdoor(), None, None, 0.0, 0.0, 0.0, false,
        );
        assert!(matches!(result, Err(PathLossError::NonPositiveDistance(_))));
    }
}
