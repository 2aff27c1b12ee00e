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

//! the `_pathLossModel` selection and the per-link environment/config
//! inputs that pick among FSPL, ITM, Winner-II and a custom table.

use afc_itu::itm::{Climate, ItmParameters, Polarization as ItmPolarization, ProfilePoint};
use afc_itu::p2109::BuildingType;
use afc_itu::winner2::{Scenario, UnknownLosStrategy};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PathLossModel {
    Fspl,
    ItmBldg,
    Coalition6,
    FccSixGHzRO,
    Custom,
}

/// `_winner2LOSOption`: how LOS is decided when building data is available
/// for only one endpoint, or for neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LosOption {
    /// LOS known directly from the two endpoints' building data.
    Known(bool),
    /// building data missing for at least one endpoint; fall back to the
    /// configured Winner-II unknown-LOS strategy.
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationEnvironment {
    Urban,
    Suburban,
    Rural,
}

impl PropagationEnvironment {
    /// selects Winner-II C1/C2/D1 from NLCD-derived density thresholds, per
    /// `_pathLossModel == Coalition6`.
    pub fn from_density(population_density_per_km2: f64, density_thr_urban: f64, density_thr_suburban: f64) -> Self {
        if population_density_per_km2 > density_thr_urban {
            PropagationEnvironment::Urban
        } else if population_density_per_km2 > density_thr_suburban {
            PropagationEnvironment::Suburban
        } else {
            PropagationEnvironment::Rural
        }
    }

    pub fn winner2_scenario(&self) -> Scenario {
        match self {
            PropagationEnvironment::Urban => Scenario::C2Urban,
            PropagationEnvironment::Suburban => Scenario::C1Suburban,
            PropagationEnvironment::Rural => Scenario::D1Rural,
        }
    }
}

/// the engine-wide knobs threaded through every link, replacing the
/// original's global mutable `ULSClass::pathLossModel`/`RLANClass::
/// noiseLevelDBW` statics.
#[derive(Debug, Clone)]
pub struct PathLossConfig {
    pub model: PathLossModel,
    pub exclusion_dist_m: f64,
    pub close_in_dist_m: f64,
    pub close_in_model: PathLossModel,
    pub apply_clutter: bool,
    pub confidence_clutter_2108_pct: f64,
    pub confidence_bldg_2109_pct: f64,
    pub confidence_winner2_los_pct: f64,
    pub confidence_winner2_nlos_pct: f64,
    pub confidence_winner2_combined_pct: f64,
    pub confidence_itm_pct: f64,
    pub reliability_itm_pct: f64,
    pub itm_min_spacing_m: f64,
    pub itm_max_points: usize,
    pub itm_params: ItmParameters,
    pub winner2_unknown_los_strategy: UnknownLosStrategy,
    pub building_type: BuildingType,
    pub fixed_building_loss_db: Option<f64>,
    pub polarization_loss_db: f64,
    pub body_loss_indoor_db: f64,
    pub body_loss_outdoor_db: f64,
    pub feeder_loss_db: f64,
    pub near_field_enabled: bool,
    pub path_loss_clamp_fspl: bool,
    pub density_thr_urban: f64,
    pub density_thr_suburban: f64,
}

pub fn default_itm_params() -> ItmParameters {
    ItmParameters {
        dielectric_constant: 15.0,
        conductivity_s_per_m: 0.005,
        polarization: ItmPolarization::Vertical,
        climate: Climate::ContinentalTemperate,
        surface_refractivity_n_units: 301.0,
        confidence_pct: 50.0,
        reliability_pct: 50.0,
    }
}

pub use afc_itu::itm::ProfilePoint as TerrainProfilePoint;
pub type ElevationProfile = Vec<ProfilePoint>;
