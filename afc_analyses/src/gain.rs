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

//! binds an `afc_fs` antenna pattern category to the `afc_itu` gain function
//! that evaluates it at a given angle off boresight.

use afc_fs::antenna::AntennaPatternCategory;
use afc_itu::antenna::{r2_aip07_gain_db, AntennaCategory};

fn to_itu_category(pattern: AntennaPatternCategory) -> AntennaCategory {
    match pattern {
        AntennaPatternCategory::Hp => AntennaCategory::Hp,
        AntennaPatternCategory::B1 => AntennaCategory::B1,
        AntennaPatternCategory::Other => AntennaCategory::Other,
    }
}

/// FS receive (or passive repeater) antenna discrimination gain at
/// `angle_off_boresight_deg`, dBi.
pub fn rx_discrimination_gain_dbi(
    pattern: AntennaPatternCategory,
    max_gain_dbi: f64,
    angle_off_boresight_deg: f64,
    d_over_lambda: f64,
) -> f64 {
    r2_aip07_gain_db(angle_off_boresight_deg, max_gain_dbi, d_over_lambda, to_itu_category(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn boresight_gain_matches_configured_max() {
        let g = rx_discrimination_gain_dbi(AntennaPatternCategory::Hp, 38.0, 0.0, 150.0);
        assert_abs_diff_eq!(g, 38.0, epsilon = 1e-6);
    }

    #[test]
    fn off_boresight_gain_is_lower() {
        let on_axis = rx_discrimination_gain_dbi(AntennaPatternCategory::B1, 38.0, 0.0, 150.0);
        let off_axis = rx_discrimination_gain_dbi(AntennaPatternCategory::B1, 38.0, 30.0, 150.0);
        assert!(off_axis < on_axis);
    }
}
