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

//! Rec. ITU-R P.2108 terrestrial statistical clutter loss.

/// Winitzki's rational approximation to the inverse error function, used to
/// turn a confidence percentile into the normal-distribution quantile `P.2108`
/// is defined in terms of.
pub(crate) fn erfinv(x: f64) -> f64 {
    let a = 0.147_f64;
    let ln_term = (1.0 - x * x).ln();
    let term1 = 2.0 / (std::f64::consts::PI * a) + ln_term / 2.0;
    let term2 = ln_term / a;
    x.signum() * (((term1 * term1 - term2).sqrt() - term1)).sqrt()
}

/// inverse complementary normal CDF, `Qinv(p)` for `p` in `(0, 1)`; shared
/// with `winner2`'s shadow-fading quantile shift.
pub(crate) fn q_inv(p: f64) -> f64 {
    std::f64::consts::SQRT_2 * erfinv(1.0 - 2.0 * p)
}

/// statistical clutter loss exceeded for `confidence_pct`% of locations, in dB.
/// `freq_mhz` is the link frequency, `distance_km` the terminal-to-clutter
/// path length.
pub fn p2108_clutter_loss_db(freq_mhz: f64, distance_km: f64, confidence_pct: f64) -> f64 {
    let f_ghz = freq_mhz / 1000.0;
    let ll = 23.5 + 9.6 * f_ghz.log10();
    let ls = 32.98 + 23.9 * distance_km.max(1e-6).log10() + 3.0 * f_ghz.log10();
    let p = (confidence_pct / 100.0).clamp(1e-6, 1.0 - 1e-6);
    -5.0 * (10f64.powf(-ll / 5.0) + 10f64.powf(-ls / 5.0)).log10() + 6.0 * q_inv(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increases_with_distance() {
        let near = p2108_clutter_loss_db(6000.0, 0.1, 50.0);
        let far = p2108_clutter_loss_db(6000.0, 1.0, 50.0);
        assert!(far > near);
    }

    #[test]
    fn higher_confidence_increases_loss() {
        let median = p2108_clutter_loss_db(6000.0, 0.5, 50.0);
        let conservative = p2108_clutter_loss_db(6000.0, 0.5, 95.0);
        assert!(conservative > median);
    }
}
