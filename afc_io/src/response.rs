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

//! the response document (spec §6): one structured answer per inquiry,
//! built from `afc_interference::ChannelResult`/`PsdSegment` by `afc_engine`.

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use afc_interference::{Availability, ChannelResult, PsdSegment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ResponseCode {
    Success = 0,
    VersionNotSupported = 100,
    DeviceDisallowed = 101,
    MissingParam = 102,
    InvalidValue = 103,
    UnexpectedParam = 106,
    UnsupportedSpectrum = 300,
    GeneralFailure = -1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvailabilityDoc {
    Available,
    Unavailable,
    Invalid,
}

impl From<Availability> for AvailabilityDoc {
    fn from(value: Availability) -> Self {
        match value {
            Availability::Available => AvailabilityDoc::Available,
            Availability::Unavailable => AvailabilityDoc::Unavailable,
            Availability::Invalid => AvailabilityDoc::Invalid,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableChannelInfoDoc {
    pub op_class: u16,
    pub index: u16,
    pub low_mhz: f64,
    pub high_mhz: f64,
    pub availability: AvailabilityDoc,
    pub max_eirp_dbm: f64,
}

impl From<ChannelResult> for AvailableChannelInfoDoc {
    fn from(c: ChannelResult) -> Self {
        AvailableChannelInfoDoc {
            op_class: c.op_class,
            index: c.index,
            low_mhz: c.freq.low,
            high_mhz: c.freq.high,
            availability: c.availability.into(),
            max_eirp_dbm: c.eirp_dbm,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableFrequencyInfoDoc {
    pub low_mhz: f64,
    pub high_mhz: f64,
    pub max_psd_dbm_per_mhz: Option<f64>,
}

impl From<PsdSegment> for AvailableFrequencyInfoDoc {
    fn from(s: PsdSegment) -> Self {
        AvailableFrequencyInfoDoc { low_mhz: s.freq.low, high_mhz: s.freq.high, max_psd_dbm_per_mhz: s.psd_limit_dbm_per_mhz }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDoc {
    pub request_id: String,
    pub response_code: ResponseCode,
    pub message: Option<String>,
    pub available_channel_info: Vec<AvailableChannelInfoDoc>,
    pub available_frequency_info: Vec<AvailableFrequencyInfoDoc>,
    /// vendor-extension block (spec §6), carried opaquely rather than typed.
    pub vendor_extensions: Option<serde_json::Value>,
}

impl ResponseDoc {
    pub fn success(request_id: impl Into<String>, channels: Vec<ChannelResult>, segments: Vec<PsdSegment>) -> Self {
        ResponseDoc {
            request_id: request_id.into(),
            response_code: ResponseCode::Success,
            message: None,
            available_channel_info: channels.into_iter().map(Into::into).collect(),
            available_frequency_info: segments.into_iter().map(Into::into).collect(),
            vendor_extensions: None,
        }
    }

    pub fn failure(request_id: impl Into<String>, code: ResponseCode, message: impl Into<String>) -> Self {
        ResponseDoc {
            request_id: request_id.into(),
            response_code: code,
            message: Some(message.into()),
            available_channel_info: Vec::new(),
            available_frequency_info: Vec::new(),
            vendor_extensions: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use afc_interference::FreqRangeMhz;

    #[test]
    fn success_response_round_trips() {
        let channel = ChannelResult {
            op_class: 131,
            index: 1,
            freq: FreqRangeMhz { low: 5945.0, high: 5965.0 },
            availability: Availability::Available,
            eirp_dbm: 30.0,
            debug_breakdown: None,
        };
        let doc = ResponseDoc::success("req-1", vec![channel], Vec::new());
        let json = serde_json::to_string(&doc).unwrap();
        let back: ResponseDoc = serde_json::from_str(&json).unwrap();
        assert_eq!(back.response_code, ResponseCode::Success);
        assert_eq!(back.available_channel_info.len(), 1);
    }

    #[test]
    fn failure_response_carries_no_channels() {
        let doc = ResponseDoc::failure("req-2", ResponseCode::MissingParam, "missing location");
        assert!(doc.available_channel_info.is_empty());
        assert_eq!(doc.response_code, ResponseCode::MissingParam);
    }
}
