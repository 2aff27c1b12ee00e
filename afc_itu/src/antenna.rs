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

//! off-boresight antenna discrimination patterns: F.699, F.1245, the F.1336
//! omnidirectional average, and the R2-AIP-07 category patterns (HP/B1/Other)
//! used for FS receivers and passive repeaters. Every pattern is symmetric
//! in `phi_deg` (only `|phi_deg|` matters) and pure given its inputs.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AntennaCategory {
    Hp,
    B1,
    Other,
}

fn clamp_phi(phi_deg: f64) -> f64 {
    phi_deg.abs().min(180.0)
}

/// Rec. ITU-R F.699: the large-antenna reference pattern, with separate
/// envelopes for `D/lambda >= 100` and `D/lambda < 100`.
pub fn f699_gain_db(phi_deg: f64, max_gain_dbi: f64, d_over_lambda: f64) -> f64 {
    let phi = clamp_phi(phi_deg);
    let g1 = 2.0 + 15.0 * d_over_lambda.log10();
    let phi_m = 20.0 * (1.0 / d_over_lambda) * (max_gain_dbi - g1).max(0.0).sqrt();

    if d_over_lambda >= 100.0 {
        let phi_r = 15.85 * d_over_lambda.powf(-0.6);
        if phi < phi_m {
            max_gain_dbi - 2.5e-3 * (d_over_lambda * phi).powi(2)
        } else if phi < phi_r {
            g1
        } else if phi < 48.0 {
            32.0 - 25.0 * phi.log10()
        } else {
            -10.0
        }
    } else {
        let phi_r = 100.0 / d_over_lambda;
        if phi < phi_m {
            max_gain_dbi - 2.5e-3 * (d_over_lambda * phi).powi(2)
        } else if phi < phi_r {
            g1
        } else if phi < 48.0 {
            52.0 - 10.0 * d_over_lambda.log10() - 25.0 * phi.log10()
        } else {
            10.0 - 10.0 * d_over_lambda.log10()
        }
    }
}

/// Rec. ITU-R F.1245: the point-to-point microwave reference pattern,
/// structurally like F.699 with a tighter far-sidelobe floor.
pub fn f1245_gain_db(phi_deg: f64, max_gain_dbi: f64, d_over_lambda: f64) -> f64 {
    let phi = clamp_phi(phi_deg);
    let g1 = 2.0 + 15.0 * d_over_lambda.log10();
    let phi_m = 20.0 * (1.0 / d_over_lambda) * (max_gain_dbi - g1).max(0.0).sqrt();

    if d_over_lambda >= 100.0 {
        let phi_r = 15.85 * d_over_lambda.powf(-0.6);
        if phi < phi_m {
            max_gain_dbi - 2.5e-3 * (d_over_lambda * phi).powi(2)
        } else if phi < phi_r {
            g1
        } else if phi < 80.0 {
            29.0 - 25.0 * phi.log10()
        } else {
            -13.0
        }
    } else {
        let phi_r = 100.0 / d_over_lambda;
        if phi < phi_m {
            max_gain_dbi - 2.5e-3 * (d_over_lambda * phi).powi(2)
        } else if phi < phi_r {
            g1
        } else if phi < 80.0 {
            44.0 - 10.0 * d_over_lambda.log10() - 25.0 * phi.log10()
        } else {
            9.0 - 10.0 * d_over_lambda.log10()
        }
    }
}

/// Rec. ITU-R F.1336 omnidirectional-average reference pattern (single
/// plane). Beamwidth is derived from `D/lambda` the same way the other
/// patterns here derive their main-lobe width, rather than taking an
/// explicit beamwidth parameter, to keep the `(phi, maxGain, D/lambda)`
/// signature uniform across this module.
pub fn f1336_omni_gain_db(phi_deg: f64, max_gain_dbi: f64, d_over_lambda: f64) -> f64 {
    let phi = clamp_phi(phi_deg);
    let theta_3db = (107.6 / d_over_lambda).max(1.0);
    let floor_db = -10.0;
    (max_gain_dbi - 12.0 * (phi / theta_3db).powi(2)).max(floor_db)
}

/// R2-AIP-07 FS receive antenna discrimination categories. `Hp` (high
/// performance, category A1) follows the tighter F.1245 envelope, `B1`
/// follows the F.699 envelope, and `Other` is a conservative catch-all with
/// a flatter roll-off for antennas lacking a qualifying pattern.
pub fn r2_aip07_gain_db(phi_deg: f64, max_gain_dbi: f64, d_over_lambda: f64, category: AntennaCategory) -> f64 {
    match category {
        AntennaCategory::Hp => f1245_gain_db(phi_deg, max_gain_dbi, d_over_lambda),
        AntennaCategory::B1 => f699_gain_db(phi_deg, max_gain_dbi, d_over_lambda),
        AntennaCategory::Other => {
            let phi = clamp_phi(phi_deg);
            let g1 = 2.0 + 15.0 * d_over_lambda.log10();
            let phi_m = 20.0 * (1.0 / d_over_lambda) * (max_gain_dbi - g1).max(0.0).sqrt();
            if phi < phi_m {
                max_gain_dbi - 2.5e-3 * (d_over_lambda * phi).powi(2)
            } else if phi < 48.0 {
                (g1).min(25.0 - 20.0 * phi.log10())
            } else {
                -5.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn f699_symmetric_in_angle() {
        let a = f699_gain_db(30.0, 38.0, 150.0);
        let b = f699_gain_db(-30.0, 38.0, 150.0);
        assert_relative_eq!(a, b, epsilon = 1e-9);
    }

    #[test]
    fn f699_peaks_at_boresight() {
        let on_axis = f699_gain_db(0.0, 38.0, 150.0);
        let off_axis = f699_gain_db(20.0, 38.0, 150.0);
        assert!(on_axis > off_axis);
        assert_relative_eq!(on_axis, 38.0, epsilon = 1e-6);
    }

    #[test]
    fn f699_far_sidelobe_floor_differs_by_d_over_lambda_regime() {
        let large_d = f699_gain_db(180.0, 38.0, 150.0);
        let small_d = f699_gain_db(180.0, 38.0, 50.0);
        assert_relative_eq!(large_d, -10.0, epsilon = 1e-9);
        assert_ne!(large_d, small_d);
    }

    #[test]
    fn f1336_never_exceeds_max_gain() {
        for phi in [0.0, 10.0, 45.0, 90.0, 180.0] {
            assert!(f1336_omni_gain_db(phi, 12.0, 50.0) <= 12.0 + 1e-9);
        }
    }

    #[test]
    fn r2_aip07_categories_agree_with_their_base_pattern() {
        assert_relative_eq!(
            r2_aip07_gain_db(10.0, 38.0, 150.0, AntennaCategory::Hp),
            f1245_gain_db(10.0, 38.0, 150.0),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            r2_aip07_gain_db(10.0, 38.0, 150.0, AntennaCategory::B1),
            f699_gain_db(10.0, 38.0, 150.0),
            epsilon = 1e-9
        );
    }
}
