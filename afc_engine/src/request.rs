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

//! turns an `afc_io::InquiryDoc` into the `afc_scan::Region`/`ScanConfig`
//! and `afc_interference::ChannelSpec` list the analyses crate expects.

use afc_interference::ChannelSpec;
use afc_io::inquiry::{InquiryDoc, LocationDoc, LocationShapeDoc};
use afc_scan::{BelowGroundPolicy, Region, ScanConfig, ScanMethod};

use crate::channelization::channel_freq_range;
use crate::errors::{EngineError, Result};

/// scan resolution/height-step/points-per-degree/max-points are not part
/// of the inquiry document (spec §6 doesn't name them); these mirror the
/// values `afc_scan`'s own tests use as a reasonable engine-wide default.
pub const DEFAULT_SCAN_RESOLUTION_M: f64 = 30.0;
pub const DEFAULT_HEIGHT_STEP_M: f64 = 10.0;
pub const DEFAULT_POINTS_PER_DEGREE: f64 = 3600.0;
pub const DEFAULT_MAX_SCAN_POINTS: usize = 20_000;

pub fn region_from_location(location: &LocationDoc) -> Region {
    match &location.shape {
        LocationShapeDoc::Ellipse { center_lat, center_lon, semi_major_m, semi_minor_m, orientation_deg } => {
            Region::Ellipse { center_lat: *center_lat, center_lon: *center_lon, semi_major_m: *semi_major_m, semi_minor_m: *semi_minor_m, orientation_deg: *orientation_deg }
        }
        LocationShapeDoc::LinearPolygon { vertices } => Region::LinearPolygon { vertices: vertices.clone() },
        LocationShapeDoc::RadialPolygon { center_lat, center_lon, points } => {
            Region::RadialPolygon { center_lat: *center_lat, center_lon: *center_lon, points: points.clone() }
        }
    }
}

pub fn scan_config_from_location(location: &LocationDoc, min_rlan_height_above_terrain_m: f64) -> ScanConfig {
    ScanConfig {
        method: ScanMethod::XyAlignNorthEast,
        scan_resolution_m: DEFAULT_SCAN_RESOLUTION_M,
        height_step_m: DEFAULT_HEIGHT_STEP_M,
        points_per_degree: DEFAULT_POINTS_PER_DEGREE,
        height_type: location.height_type,
        center_height_m: location.height_m,
        height_uncertainty_m: location.vertical_uncertainty_m,
        fixed_height_amsl: false,
        min_rlan_height_above_terrain_m,
        below_ground_policy: BelowGroundPolicy::Discard,
        max_points: DEFAULT_MAX_SCAN_POINTS,
    }
}

/// the inquiry's `inquiredChannels` expanded into concrete frequency
/// ranges; an operating class/index this build doesn't recognize is an
/// input error (spec §7 `InputError`), not a silently skipped channel.
pub fn channel_specs_from_inquiry(inquiry: &InquiryDoc) -> Result<Vec<ChannelSpec>> {
    let mut channels = Vec::new();
    for group in &inquiry.inquired_channels {
        for &index in &group.indices {
            let freq = channel_freq_range(group.op_class, index).ok_or_else(|| EngineError::InvalidValue {
                field: "inquiredChannels",
                reason: format!("unrecognized (opClass={}, index={index})", group.op_class),
            })?;
            channels.push(ChannelSpec { op_class: group.op_class, index, freq });
        }
    }
    Ok(channels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use afc_io::inquiry::{AnalysisType, ChannelsDoc, DeviceDescriptorDoc, FrequencyRangeDoc, InquiryDoc, SUPPORTED_INQUIRY_VERSION};
    use afc_scan::region::HeightType;

    fn sample_inquiry() -> InquiryDoc {
        InquiryDoc {
            version: SUPPORTED_INQUIRY_VERSION.to_string(),
            analysis_type: AnalysisType::ApAfc,
            request_id: "req-1".to_string(),
            ruleset_id: "US".to_string(),
            location: LocationDoc {
                shape: LocationShapeDoc::Ellipse { center_lat: 37.4, center_lon: -122.1, semi_major_m: 300.0, semi_minor_m: 100.0, orientation_deg: 45.0 },
                height_type: HeightType::Agl,
                height_m: 30.0,
                vertical_uncertainty_m: 5.0,
            },
            inquired_frequency_ranges: vec![FrequencyRangeDoc { low_mhz: 5925.0, high_mhz: 6425.0 }],
            inquired_channels: vec![ChannelsDoc { op_class: 131, indices: vec![1, 5] }],
            device_descriptor: DeviceDescriptorDoc { serial_number: "SN-1".to_string(), certification_id: None, rulesets: vec!["US".to_string()] },
        }
    }

    #[test]
    fn region_matches_the_ellipse_shape() {
        let region = region_from_location(&sample_inquiry().location);
        match region {
            Region::Ellipse { center_lat, .. } => assert_eq!(center_lat, 37.4),
            _ => panic!("expected an ellipse"),
        }
    }

    #[test]
    fn channel_specs_expand_every_index() {
        let channels = channel_specs_from_inquiry(&sample_inquiry()).unwrap();
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0].index, 1);
        assert_eq!(channels[1].index, 5);
    }

    #[test]
    fn unrecognized_operating_class_is_an_input_error() {
        let mut inquiry = sample_inquiry();
        inquiry.inquired_channels = vec![ChannelsDoc { op_class: 999, indices: vec![1] }];
        assert!(channel_specs_from_inquiry(&inquiry).is_err());
    }
}
