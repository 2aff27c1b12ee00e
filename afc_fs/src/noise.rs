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

//! receiver thermal noise floor, `N = k * T0 * B + NF`, in dBm given a
//! channel bandwidth in MHz and a noise figure in dB.

/// Boltzmann constant, J/K.
pub const BOLTZMANN_J_PER_K: f64 = 1.380649e-23;
/// reference temperature, K (ITU-R / FCC convention).
pub const REFERENCE_TEMPERATURE_K: f64 = 290.0;

/// thermal noise floor in dBm for a receiver with the given bandwidth and
/// noise figure: `10*log10(k*T0*B_hz*1000) + NF_dB`.
pub fn noise_floor_dbm(bandwidth_mhz: f64, noise_figure_db: f64) -> f64 {
    let bandwidth_hz = bandwidth_mhz * 1.0e6;
    let kt_b_watts = BOLTZMANN_J_PER_K * REFERENCE_TEMPERATURE_K * bandwidth_hz;
    let kt_b_dbm = 10.0 * (kt_b_watts * 1000.0).log10();
    kt_b_dbm + noise_figure_db
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn noise_floor_matches_known_kTB_reference() {
        // kTB at 1 Hz, 290K is about -174 dBm/Hz; a 1 MHz channel with 0 dB NF
        // should land close to -114 dBm.
        let n = noise_floor_dbm(1.0, 0.0);
        assert_abs_diff_eq!(n, -114.0, epsilon = 0.5);
    }

    #[test]
    fn noise_figure_adds_linearly() {
        let base = noise_floor_dbm(20.0, 0.0);
        let with_nf = noise_floor_dbm(20.0, 6.0);
        assert_abs_diff_eq!(with_nf - base, 6.0, epsilon = 1.0e-9);
    }

    #[test]
    fn wider_bandwidth_raises_noise_floor() {
        let narrow = noise_floor_dbm(1.0, 4.0);
        let wide = noise_floor_dbm(20.0, 4.0);
        assert!(wide > narrow);
    }
}
