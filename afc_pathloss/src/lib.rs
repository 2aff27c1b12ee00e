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
#![allow(unused)]

//! picks a propagation model per link geometry/environment and composes
//! its loss with polarization, body, feeder, near-field and building
//! penetration losses into one total, with an optional FSPL floor clamp.

pub mod compose;
pub mod errors;
pub mod model;

pub use compose::{compose_path_loss, DebugLinkBreakdown, EnvironmentTags, LinkRejection, PathLossResult};
pub use errors::{PathLossError, Result};
pub use model::{default_itm_params, ElevationProfile, LosOption, PathLossConfig, PathLossModel, PropagationEnvironment, TerrainProfilePoint};
