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

//! WINNER II C1 (suburban), C2 (urban), and D1 (rural) path-loss submodels,
//! each with LOS and NLOS forms, plus the LOS/NLOS combination rule.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    C1Suburban,
    C2Urban,
    D1Rural,
}

/// model coefficients for `PL = A*log10(d_m) + B + C*log10(f_ghz/5)`.
struct Coeffs {
    los: (f64, f64, f64),
    nlos: (f64, f64, f64),
}

fn coeffs(scenario: Scenario) -> Coeffs {
    match scenario {
        Scenario::C1Suburban => Coeffs { los: (23.8, 41.5, 20.0), nlos: (36.5, 35.0, 23.0) },
        Scenario::C2Urban => Coeffs { los: (26.0, 39.0, 20.0), nlos: (39.0, 36.5, 23.0) },
        Scenario::D1Rural => Coeffs { los: (21.5, 44.2, 20.0), nlos: (30.0, 38.0, 23.0) },
    }
}

fn apply(coeffs: (f64, f64, f64), d_m: f64, freq_mhz: f64) -> f64 {
    let (a, b, c) = coeffs;
    let f_ghz = freq_mhz / 1000.0;
    a * d_m.max(1.0).log10() + b + c * (f_ghz / 5.0).log10()
}

pub fn los_loss_db(scenario: Scenario, d_m: f64, freq_mhz: f64) -> f64 {
    apply(coeffs(scenario).los, d_m, freq_mhz)
}

pub fn nlos_loss_db(scenario: Scenario, d_m: f64, freq_mhz: f64) -> f64 {
    apply(coeffs(scenario).nlos, d_m, freq_mhz)
}

/// WINNER II LOS probability as a function of distance, per scenario.
pub fn p_los(scenario: Scenario, d_m: f64) -> f64 {
    match scenario {
        Scenario::C1Suburban => (-d_m / 200.0).exp().min(1.0),
        Scenario::C2Urban => {
            let near_term = 18.0 / d_m.max(1.0);
            (near_term + (-d_m / 63.0).exp() * (1.0 - near_term)).clamp(0.0, 1.0)
        }
        Scenario::D1Rural => (-d_m / 1000.0).exp().min(1.0),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownLosStrategy {
    /// mix LOS/NLOS losses by `p_los(d)`, in the linear (not dB) domain.
    Probabilistic,
    /// treat the link as LOS when `p_los(d) > threshold`, else NLOS.
    Threshold { threshold: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LosState {
    Los,
    NLos,
    Unknown,
}

/// lognormal shadow-fading standard deviation WINNER II assumes for each
/// LOS state, shared across the C1/C2/D1 scenarios.
fn shadow_fading_sigma_db(los: LosState) -> f64 {
    match los {
        LosState::Los => 4.0,
        LosState::NLos | LosState::Unknown => 8.0,
    }
}

/// shadow-fading margin at `confidence_pct`, reusing P.2108's `Qinv`
/// confidence-to-quantile form rather than a second implementation of it.
fn shadow_fading_quantile_db(sigma_db: f64, confidence_pct: f64) -> f64 {
    let p = (confidence_pct / 100.0).clamp(1e-6, 1.0 - 1e-6);
    sigma_db * crate::p2108::q_inv(p)
}

/// the "combined" WINNER II form: known LOS/NLOS uses the matching submodel
/// directly, shifted by its shadow-fading quantile at `confidence_pct`;
/// unknown LOS applies the configured strategy, mixing both the loss and
/// the shadow-fading sigma by the same LOS-probability weight.
pub fn combined_loss_db(
    scenario: Scenario,
    d_m: f64,
    freq_mhz: f64,
    los: LosState,
    strategy: UnknownLosStrategy,
    confidence_pct: f64,
) -> f64 {
    match los {
        LosState::Los => los_loss_db(scenario, d_m, freq_mhz) + shadow_fading_quantile_db(shadow_fading_sigma_db(LosState::Los), confidence_pct),
        LosState::NLos => nlos_loss_db(scenario, d_m, freq_mhz) + shadow_fading_quantile_db(shadow_fading_sigma_db(LosState::NLos), confidence_pct),
        LosState::Unknown => {
            let los_db = los_loss_db(scenario, d_m, freq_mhz);
            let nlos_db = nlos_loss_db(scenario, d_m, freq_mhz);
            match strategy {
                UnknownLosStrategy::Probabilistic => {
                    let p = p_los(scenario, d_m);
                    let los_lin = 10f64.powf(-los_db / 10.0);
                    let nlos_lin = 10f64.powf(-nlos_db / 10.0);
                    let mixed_lin = p * los_lin + (1.0 - p) * nlos_lin;
                    let mixed_sigma = p * shadow_fading_sigma_db(LosState::Los) + (1.0 - p) * shadow_fading_sigma_db(LosState::NLos);
                    -10.0 * mixed_lin.max(1e-300).log10() + shadow_fading_quantile_db(mixed_sigma, confidence_pct)
                }
                UnknownLosStrategy::Threshold { threshold } => {
                    if p_los(scenario, d_m) > threshold {
                        los_db + shadow_fading_quantile_db(shadow_fading_sigma_db(LosState::Los), confidence_pct)
                    } else {
                        nlos_db + shadow_fading_quantile_db(shadow_fading_sigma_db(LosState::NLos), confidence_pct)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nlos_exceeds_los_at_same_distance() {
        for scenario in [Scenario::C1Suburban, Scenario::C2Urban, Scenario::D1Rural] {
            assert!(nlos_loss_db(scenario, 500.0, 6000.0) > los_loss_db(scenario, 500.0, 6000.0));
        }
    }

    #[test]
    fn p_los_decreases_with_distance() {
        for scenario in [Scenario::C1Suburban, Scenario::D1Rural] {
            assert!(p_los(scenario, 10.0) > p_los(scenario, 5000.0));
        }
    }

    #[test]
    fn known_los_ignores_strategy() {
        let a = combined_loss_db(Scenario::C1Suburban, 300.0, 6000.0, LosState::Los, UnknownLosStrategy::Probabilistic, 50.0);
        let b = combined_loss_db(Scenario::C1Suburban, 300.0, 6000.0, LosState::Los, UnknownLosStrategy::Threshold { threshold: 0.9 }, 50.0);
        assert_eq!(a, b);
    }

    #[test]
    fn threshold_strategy_picks_one_submodel_exactly() {
        let result = combined_loss_db(Scenario::D1Rural, 50.0, 6000.0, LosState::Unknown, UnknownLosStrategy::Threshold { threshold: 0.01 }, 50.0);
        assert_eq!(result, los_loss_db(Scenario::D1Rural, 50.0, 6000.0));
    }

    #[test]
    fn higher_confidence_increases_known_los_loss() {
        let median = combined_loss_db(Scenario::C1Suburban, 300.0, 6000.0, LosState::Los, UnknownLosStrategy::Probabilistic, 50.0);
        let conservative = combined_loss_db(Scenario::C1Suburban, 300.0, 6000.0, LosState::Los, UnknownLosStrategy::Probabilistic, 95.0);
        assert!(conservative > median);
    }
}
