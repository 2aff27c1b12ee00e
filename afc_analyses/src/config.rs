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

//! the engine-wide knobs an analysis needs beyond the path-loss composer's
//! own configuration: the I/N threshold, default noise figure, spectral
//! overlap mode, propagation environment and the antenna aperture ratio
//! used when an FS row carries no physical antenna diameter.

use afc_interference::SpectralOverlapMode;
use afc_pathloss::model::{PathLossConfig, PropagationEnvironment};

/// typical `D/lambda` for a mid-size FS parabolic dish at 6 GHz; the FS row
/// schema (spec 4.E) carries a declared gain but no physical diameter, so
/// this is supplied as a single engine-wide default rather than derived
/// per-row.
pub const DEFAULT_D_OVER_LAMBDA: f64 = 150.0;

/// the default noise figure used when an FS row's own field is absent.
pub const DEFAULT_NOISE_FIGURE_DB: f64 = 4.0;

/// number of intermediate points sampled along a link's great-circle path
/// for the ITM elevation profile and LOS determination.
pub const DEFAULT_PROFILE_POINTS: usize = 16;

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub path_loss: PathLossConfig,
    pub environment: PropagationEnvironment,
    pub spectral_mode: SpectralOverlapMode,
    pub i_n_threshold_db: f64,
    pub max_eirp_dbm: f64,
    pub d_over_lambda: f64,
    pub default_noise_figure_db: f64,
    pub profile_points: usize,
    pub max_interaction_radius_m: f64,
    /// when set, [`crate::link::link_margin`] retains the composed path
    /// loss's per-component breakdown instead of discarding it.
    pub debug: bool,
}
