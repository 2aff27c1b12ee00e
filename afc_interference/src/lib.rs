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

//! for each (FS/RAS receiver, channel) pair and every RLAN scan point in
//! range: link geometry, spectral overlap loss, I_rel and EIRP_max, then
//! the per-channel `min` reduction and PSD segment tiling that turn link
//! samples into the response's channel list and PSD segments.

pub mod denied;
pub mod engine;
pub mod errors;
pub mod geometry;
pub mod spectral;

pub use denied::{is_denied, DeniedRegion, DeniedRegionShape, RectDeg};
pub use engine::{aggregate_channel, eirp_max_dbm, i_rel_db, tile_psd_segments, Availability, ChannelResult, ChannelSpec, LinkInputs, PsdSegment};
pub use errors::{InterferenceError, Result};
pub use geometry::{angle_off_boresight_deg, initial_bearing_deg, link_geometry, LinkGeometry};
pub use spectral::{psd_segment_overlap_loss_db, spectral_overlap_loss_db, FreqRangeMhz, SpectralOverlapMode};
