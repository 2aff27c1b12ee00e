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

//! Rec. ITU-R P.2109 building entry loss: elevation-angle- and
//! frequency-dependent, with a traditional vs thermally-efficient building
//! split and a statistical confidence quantile, or a fixed bypass constant.

use crate::p2108::p2108_clutter_loss_db;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildingType {
    Traditional,
    ThermallyEfficient,
}

struct Coeffs {
    r: f64,
    s: f64,
    t: f64,
    u: f64,
}

fn coeffs(building_type: BuildingType) -> Coeffs {
    match building_type {
        BuildingType::Traditional => Coeffs { r: 12.64, s: 3.72, t: 0.96, u: 9.6 },
        BuildingType::ThermallyEfficient => Coeffs { r: 28.19, s: -3.00, t: 8.48, u: 13.5 },
    }
}

/// median horizontal-incidence entry loss, dB, as a function of frequency.
fn median_horizontal_loss_db(freq_mhz: f64, building_type: BuildingType) -> f64 {
    let c = coeffs(building_type);
    let log_f = (freq_mhz / 1000.0).log10();
    c.r + c.s * log_f + c.t * log_f * log_f + c.u
}

/// elevation-angle correction: loss falls off towards vertical incidence
/// (through the roof), reaching zero at `theta = 90`.
fn elevation_correction_db(elevation_deg: f64) -> f64 {
    let theta = elevation_deg.clamp(0.0, 90.0);
    -0.2 * theta
}

/// building entry loss, dB, at `confidence_pct`% of locations. If
/// `fixed_building_loss_db` is set, that constant is returned unchanged
/// (the configured bypass).
pub fn p2109_building_entry_loss_db(
    freq_mhz: f64,
    elevation_deg: f64,
    confidence_pct: f64,
    building_type: BuildingType,
    fixed_building_loss_db: Option<f64>,
) -> f64 {
    if let Some(fixed) = fixed_building_loss_db {
        return fixed;
    }
    let median = median_horizontal_loss_db(freq_mhz, building_type) + elevation_correction_db(elevation_deg);
    // reuse P.2108's confidence-quantile machinery: entry loss variability
    // about the median is modeled the same way clutter loss variability is.
    let quantile_shift = p2108_clutter_loss_db(freq_mhz, 1.0, confidence_pct) - p2108_clutter_loss_db(freq_mhz, 1.0, 50.0);
    (median + quantile_shift).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_building_loss_bypasses_computation() {
        assert_eq!(p2109_building_entry_loss_db(6000.0, 10.0, 50.0, BuildingType::Traditional, Some(12.5)), 12.5);
    }

    #[test]
    fn thermally_efficient_exceeds_traditional() {
        let traditional = p2109_building_entry_loss_db(6000.0, 20.0, 50.0, BuildingType::Traditional, None);
        let thermal = p2109_building_entry_loss_db(6000.0, 20.0, 50.0, BuildingType::ThermallyEfficient, None);
        assert!(thermal > traditional);
    }

    #[test]
    fn loss_decreases_towards_vertical_incidence() {
        let horizontal = p2109_building_entry_loss_db(6000.0, 0.0, 50.0, BuildingType::Traditional, None);
        let near_vertical = p2109_building_entry_loss_db(6000.0, 80.0, 50.0, BuildingType::Traditional, None);
        assert!(near_vertical < horizontal);
    }
}
