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

//! 6 GHz channel center frequency and bandwidth for the global operating
//! classes the inquiry's `inquiredChannels` refer to. `center_mhz = 5950 +
//! 5 * index` for every contiguous-bandwidth class; non-contiguous 80+80
//! (class 135) and the PSD-restricted indoor subset of class 136 are not
//! modeled (see DESIGN.md).

use afc_interference::FreqRangeMhz;

fn bandwidth_mhz(op_class: u16) -> Option<f64> {
    match op_class {
        131 => Some(20.0),
        132 => Some(40.0),
        133 => Some(80.0),
        134 => Some(160.0),
        137 => Some(320.0),
        _ => None,
    }
}

/// the channel's frequency range, or `None` for an operating class this
/// build doesn't recognize.
pub fn channel_freq_range(op_class: u16, index: u16) -> Option<FreqRangeMhz> {
    let bw = bandwidth_mhz(op_class)?;
    let center = 5950.0 + 5.0 * index as f64;
    Some(FreqRangeMhz { low: center - bw / 2.0, high: center + bw / 2.0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn twenty_mhz_channel_one_matches_the_known_plan() {
        let freq = channel_freq_range(131, 1).unwrap();
        assert_abs_diff_eq!(freq.low, 5945.0, epsilon = 1e-9);
        assert_abs_diff_eq!(freq.high, 5965.0, epsilon = 1e-9);
    }

    #[test]
    fn unknown_operating_class_yields_none() {
        assert!(channel_freq_range(135, 7).is_none());
    }
}
