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

//! the four top-level analyses (point, exclusion zone, heatmap, scan),
//! built on top of `afc_scan`'s region scanner, `afc_fs`'s station store and
//! `afc_interference`'s per-channel aggregation.

pub mod config;
pub mod errors;
pub mod exclusion;
pub mod gain;
pub mod heatmap;
pub mod link;
pub mod point;
pub mod profile;

pub use config::{AnalysisConfig, DEFAULT_D_OVER_LAMBDA, DEFAULT_NOISE_FIGURE_DB, DEFAULT_PROFILE_POINTS};
pub use errors::{AnalysesError, Result};
pub use exclusion::{exclusion_zone, ExclusionZoneRequest};
pub use heatmap::{heatmap, HeatmapCell, HeatmapRequest};
pub use link::{i_n_db, link_margin, sample_link, LinkMargin};
pub use point::{evaluate_channel, point_analysis, scan_analysis, AnalysisRequest};
