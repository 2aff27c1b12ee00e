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

//! the inquiry document (spec §6): what kind of analysis to run, over what
//! uncertainty region, for which frequencies/channels, on behalf of which
//! device. Deserialized straight off the wire; `afc_engine` is the one that
//! turns it into the analyses crate's own request types.

use serde::{Deserialize, Serialize};

use afc_scan::region::HeightType;

/// the version tag that selects the recognized option set (spec §6: "a
/// version tag selects recognized option set; unknown fields →
/// unexpectedParamResponseCode").
pub const SUPPORTED_INQUIRY_VERSION: &str = "1.4";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisType {
    #[serde(rename = "AP-AFC")]
    ApAfc,
    ExclusionZoneAnalysis,
    HeatmapAnalysis,
    ScanAnalysis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyRangeDoc {
    pub low_mhz: f64,
    pub high_mhz: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelsDoc {
    pub op_class: u16,
    pub indices: Vec<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "camelCase")]
pub enum LocationShapeDoc {
    Ellipse { center_lat: f64, center_lon: f64, semi_major_m: f64, semi_minor_m: f64, orientation_deg: f64 },
    LinearPolygon { vertices: Vec<(f64, f64)> },
    RadialPolygon { center_lat: f64, center_lon: f64, points: Vec<(f64, f64)> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDoc {
    #[serde(flatten)]
    pub shape: LocationShapeDoc,
    pub height_type: HeightType,
    pub height_m: f64,
    pub vertical_uncertainty_m: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDescriptorDoc {
    pub serial_number: String,
    pub certification_id: Option<String>,
    pub rulesets: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryDoc {
    pub version: String,
    pub analysis_type: AnalysisType,
    pub request_id: String,
    pub ruleset_id: String,
    pub location: LocationDoc,
    pub inquired_frequency_ranges: Vec<FrequencyRangeDoc>,
    pub inquired_channels: Vec<ChannelsDoc>,
    pub device_descriptor: DeviceDescriptorDoc,
}

impl InquiryDoc {
    /// whether `version` is one this build recognizes; an unrecognized
    /// version should be rejected with `versionNotSupported` before any
    /// field in the document is otherwise inspected (spec §6).
    pub fn is_supported_version(&self) -> bool {
        self.version == SUPPORTED_INQUIRY_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> InquiryDoc {
        InquiryDoc {
            version: SUPPORTED_INQUIRY_VERSION.to_string(),
            analysis_type: AnalysisType::ApAfc,
            request_id: "req-1".to_string(),
            ruleset_id: "US_47_CFR_PART_15_SUBPART_E".to_string(),
            location: LocationDoc {
                shape: LocationShapeDoc::Ellipse { center_lat: 37.4, center_lon: -122.1, semi_major_m: 300.0, semi_minor_m: 100.0, orientation_deg: 45.0 },
                height_type: HeightType::Agl,
                height_m: 30.0,
                vertical_uncertainty_m: 5.0,
            },
            inquired_frequency_ranges: vec![FrequencyRangeDoc { low_mhz: 5925.0, high_mhz: 6425.0 }],
            inquired_channels: vec![ChannelsDoc { op_class: 131, indices: vec![1, 5, 9] }],
            device_descriptor: DeviceDescriptorDoc { serial_number: "SN-1".to_string(), certification_id: None, rulesets: vec!["US".to_string()] },
        }
    }

    #[test]
    fn round_trips_through_json() {
        let doc = sample();
        let json = serde_json::to_string(&doc).unwrap();
        let back: InquiryDoc = serde_json::from_str(&json).unwrap();
        assert_eq!(back.request_id, doc.request_id);
        assert_eq!(back.inquired_channels[0].indices, doc.inquired_channels[0].indices);
    }

    #[test]
    fn recognizes_supported_version() {
        let mut doc = sample();
        assert!(doc.is_supported_version());
        doc.version = "0.9".to_string();
        assert!(!doc.is_supported_version());
    }
}
