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

//! the engine configuration document (spec §6): path-loss model selection,
//! confidence quantiles, Winner-II LOS strategy, near-field/body/
//! polarization losses, ITM parameters, spectral algorithm and ACI flag,
//! I/N threshold. A pure data shape — `afc_engine` is the one that turns it
//! into `afc_pathloss::PathLossConfig`/`afc_analyses::AnalysisConfig`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathLossModelDoc {
    Fspl,
    ItmBldg,
    Coalition6,
    FccSixGHzRO,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpectralAlgorithmDoc {
    Pwr,
    Psd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner2UnknownLosStrategyDoc {
    AlwaysLos,
    AlwaysNlos,
    Probabilistic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItmParametersDoc {
    pub dielectric_constant: f64,
    pub conductivity_s_per_m: f64,
    pub surface_refractivity_n_units: f64,
    pub min_spacing_m: f64,
    pub max_points: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfigDoc {
    pub path_loss_model: PathLossModelDoc,
    pub confidence_bldg_2109_pct: f64,
    pub confidence_clutter_2108_pct: f64,
    pub confidence_winner2_los_pct: f64,
    pub confidence_winner2_nlos_pct: f64,
    pub confidence_winner2_combined_pct: f64,
    pub confidence_itm_pct: f64,
    pub reliability_itm_pct: f64,
    pub winner2_unknown_los_strategy: Winner2UnknownLosStrategyDoc,
    pub itm: ItmParametersDoc,
    pub near_field_enabled: bool,
    pub body_loss_indoor_db: f64,
    pub body_loss_outdoor_db: f64,
    pub polarization_loss_db: f64,
    pub feeder_loss_db: f64,
    pub rlan_height_policy: afc_scan::region::HeightType,
    pub min_rlan_height_above_terrain_m: f64,
    pub spectral_algorithm: SpectralAlgorithmDoc,
    pub aci_enabled: bool,
    /// adjacent-channel mask half-width used when `aci_enabled`: the RLAN
    /// channel is weighted by its overlap with the FS passband expanded by
    /// this much on either side, rather than the FS passband alone.
    /// `#[serde(default)]` so configs predating this field still deserialize.
    #[serde(default)]
    pub aci_mask_width_mhz: f64,
    /// apply P.2108 statistical clutter loss (spec §4.D/§6 "clutter
    /// method") when the selected path-loss model supports it
    /// (`ItmBldg`'s "+ P.2108 clutter if applyClutter" step).
    #[serde(default)]
    pub apply_clutter: bool,
    pub i_n_threshold_db: f64,
    pub max_eirp_dbm: f64,
    /// emit per-link path-loss component breakdowns (spec §3
    /// `DebugLinkBreakdown`) as a `linkDebug` vendor extension on point
    /// analyses. Off by default: the breakdown is sized for troubleshooting
    /// a specific link, not for bulk inquiries.
    #[serde(default)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let doc = EngineConfigDoc {
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
        };
        let json = serde_json::to_string(&doc).unwrap();
        let back: EngineConfigDoc = serde_json::from_str(&json).unwrap();
        assert_eq!(back.i_n_threshold_db, doc.i_n_threshold_db);
    }
}
