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

//! per-link interference-to-noise accounting and the per-channel/per-PSD-
//! segment aggregation that turns many link samples into one EIRP ceiling.

use tracing::trace;

use afc_pathloss::DebugLinkBreakdown;

use crate::spectral::FreqRangeMhz;

/// everything needed to turn one (RLAN scan point, FS/PR, channel) sample
/// into an EIRP ceiling. `path_loss_db` is the *composed* total from
/// `afc_pathloss` — it already folds in polarization, body, feeder and
/// near-field losses (see `DESIGN.md`), so those terms are not taken again
/// here even though the spec's literal I_rel formula names them
/// separately.
#[derive(Debug, Clone, Copy)]
pub struct LinkInputs {
    pub path_loss_db: f64,
    pub rx_gain_dbi: f64,
    pub spectral_overlap_loss_db: f64,
    /// sum of passive-repeater discrimination gains along the chain, dB;
    /// zero for a direct (no-PR) link.
    pub pr_discrimination_db: f64,
}

/// `I_rel`: receive interference relative to a 0 dBm RLAN EIRP, dB.
pub fn i_rel_db(inputs: &LinkInputs) -> f64 {
    -inputs.path_loss_db + inputs.rx_gain_dbi - inputs.spectral_overlap_loss_db + inputs.pr_discrimination_db
}

/// `EIRP_max = I/N_threshold + noiseFloor - I_rel`, dBm.
pub fn eirp_max_dbm(i_n_threshold_db: f64, noise_floor_dbm: f64, i_rel_db: f64) -> f64 {
    i_n_threshold_db + noise_floor_dbm - i_rel_db
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Unavailable,
    Invalid,
}

#[derive(Debug, Clone, Copy)]
pub struct ChannelSpec {
    pub op_class: u16,
    pub index: u16,
    pub freq: FreqRangeMhz,
}

#[derive(Debug, Clone)]
pub struct ChannelResult {
    pub op_class: u16,
    pub index: u16,
    pub freq: FreqRangeMhz,
    pub availability: Availability,
    pub eirp_dbm: f64,
    /// the limiting link's path-loss breakdown, set by the caller when
    /// `AnalysisConfig::debug` is on; `aggregate_channel` itself has no
    /// notion of which candidate was limiting, so it always leaves this
    /// `None`.
    pub debug_breakdown: Option<Vec<DebugLinkBreakdown>>,
}

/// reduces every `(scan point, FS/RAS)` link's candidate `EIRP_max` for one
/// channel down to the channel's allowable EIRP via `min`, an associative
/// and commutative reduction that makes the aggregate order-independent
/// across a worker pool (spec §5). Forces `Unavailable` when
/// `denied_region_hit` and marks the channel `Invalid` when no link
/// contributed a sample at all (spec §7's "zero contributing links"
/// escalation).
pub fn aggregate_channel(
    channel: ChannelSpec,
    candidates: impl IntoIterator<Item = f64>,
    denied_region_hit: bool,
    max_eirp_dbm: f64,
) -> ChannelResult {
    let mut min_eirp = f64::INFINITY;
    let mut any = false;
    for candidate in candidates {
        any = true;
        min_eirp = min_eirp.min(candidate);
    }

    let availability = if denied_region_hit {
        Availability::Unavailable
    } else if !any {
        Availability::Invalid
    } else {
        Availability::Available
    };

    let eirp_dbm = if availability == Availability::Available { min_eirp.min(max_eirp_dbm) } else { f64::NEG_INFINITY };

    trace!(op_class = channel.op_class, index = channel.index, ?availability, eirp_dbm, "channel aggregated");
    ChannelResult { op_class: channel.op_class, index: channel.index, freq: channel.freq, availability, eirp_dbm, debug_breakdown: None }
}

#[derive(Debug, Clone, Copy)]
pub struct PsdSegment {
    pub freq: FreqRangeMhz,
    pub psd_limit_dbm_per_mhz: Option<f64>,
}

/// tiles `inquired_range` by the union of channel boundaries that fall
/// inside it, then takes the pointwise minimum PSD limit over channels
/// overlapping each resulting segment. A sub-range with no overlapping
/// available channel gets `psd_limit_dbm_per_mhz: None` (spec S5's
/// `Invalid` segment case).
pub fn tile_psd_segments(inquired_range: FreqRangeMhz, channels: &[ChannelResult]) -> Vec<PsdSegment> {
    let mut boundaries = vec![inquired_range.low, inquired_range.high];
    for c in channels {
        if c.freq.low > inquired_range.low && c.freq.low < inquired_range.high {
            boundaries.push(c.freq.low);
        }
        if c.freq.high > inquired_range.low && c.freq.high < inquired_range.high {
            boundaries.push(c.freq.high);
        }
    }
    boundaries.sort_by(|a, b| a.partial_cmp(b).unwrap());
    boundaries.dedup_by(|a, b| (*a - *b).abs() < 1e-9);

    boundaries
        .windows(2)
        .map(|w| {
            let seg = FreqRangeMhz { low: w[0], high: w[1] };
            let mid = (seg.low + seg.high) / 2.0;
            let limit = channels
                .iter()
                .filter(|c| c.availability == Availability::Available && c.freq.low <= mid && mid < c.freq.high)
                .map(|c| c.eirp_dbm - 10.0 * c.freq.bandwidth_mhz().log10())
                .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a: f64| a.min(v))));
            PsdSegment { freq: seg, psd_limit_dbm_per_mhz: limit }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn i_rel_matches_scenario_s2_shape() {
        // S2: FSPL ~= 131.1 dB, rx gain 34 dBi, no spectral overlap penalty,
        // no PR. I_rel = -131.1 + 34 - 0 + 0 = -97.1
        let inputs = LinkInputs { path_loss_db: 131.1, rx_gain_dbi: 34.0, spectral_overlap_loss_db: 0.0, pr_discrimination_db: 0.0 };
        let i_rel = i_rel_db(&inputs);
        assert_abs_diff_eq!(i_rel, -97.1, epsilon = 1e-9);
        let eirp = eirp_max_dbm(-6.0, -100.0, i_rel);
        assert_abs_diff_eq!(eirp, -8.9, epsilon = 1e-6);
    }

    #[test]
    fn min_reduction_is_order_independent() {
        let channel = ChannelSpec { op_class: 131, index: 1, freq: FreqRangeMhz { low: 5945.0, high: 5965.0 } };
        let forward = aggregate_channel(channel, vec![10.0, -5.0, 20.0], false, 36.0);
        let shuffled = aggregate_channel(channel, vec![20.0, 10.0, -5.0], false, 36.0);
        assert_eq!(forward.eirp_dbm, shuffled.eirp_dbm);
        assert_abs_diff_eq!(forward.eirp_dbm, -5.0, epsilon = 1e-9);
    }

    #[test]
    fn widening_the_candidate_set_never_raises_eirp() {
        // a wider scan region can only add candidate links on top of a
        // narrower region's, never remove one, so its min-reduction eirp
        // can only stay the same or drop.
        let channel = ChannelSpec { op_class: 131, index: 1, freq: FreqRangeMhz { low: 5945.0, high: 5965.0 } };
        let narrow = aggregate_channel(channel, vec![10.0, 20.0], false, 36.0);
        let wider = aggregate_channel(channel, vec![10.0, 20.0, -5.0], false, 36.0);
        assert!(wider.eirp_dbm <= narrow.eirp_dbm);
    }

    #[test]
    fn no_contributing_links_is_invalid_not_available() {
        let channel = ChannelSpec { op_class: 131, index: 1, freq: FreqRangeMhz { low: 5945.0, high: 5965.0 } };
        let result = aggregate_channel(channel, Vec::<f64>::new(), false, 36.0);
        assert_eq!(result.availability, Availability::Invalid);
    }

    #[test]
    fn denied_region_forces_unavailable_even_with_good_links() {
        let channel = ChannelSpec { op_class: 131, index: 1, freq: FreqRangeMhz { low: 5945.0, high: 5965.0 } };
        let result = aggregate_channel(channel, vec![30.0], true, 36.0);
        assert_eq!(result.availability, Availability::Unavailable);
    }

    #[test]
    fn eirp_never_exceeds_configured_max() {
        let channel = ChannelSpec { op_class: 131, index: 1, freq: FreqRangeMhz { low: 5945.0, high: 5965.0 } };
        let result = aggregate_channel(channel, vec![100.0], false, 36.0);
        assert_eq!(result.eirp_dbm, 36.0);
    }

    #[test]
    fn psd_segments_tile_scenario_s5() {
        let channels = vec![
            ChannelResult { op_class: 131, index: 1, freq: FreqRangeMhz { low: 5925.0, high: 5945.0 }, availability: Availability::Available, eirp_dbm: 30.0, debug_breakdown: None },
            ChannelResult { op_class: 131, index: 2, freq: FreqRangeMhz { low: 5945.0, high: 5965.0 }, availability: Availability::Available, eirp_dbm: 25.0, debug_breakdown: None },
            ChannelResult { op_class: 131, index: 3, freq: FreqRangeMhz { low: 5965.0, high: 5985.0 }, availability: Availability::Available, eirp_dbm: 35.0, debug_breakdown: None },
        ];
        let segments = tile_psd_segments(FreqRangeMhz { low: 5925.0, high: 6000.0 }, &channels);
        assert_eq!(segments.len(), 4);
        assert_abs_diff_eq!(segments[0].psd_limit_dbm_per_mhz.unwrap(), 30.0 - 10.0 * 20f64.log10(), epsilon = 1e-6);
        assert!(segments[3].psd_limit_dbm_per_mhz.is_none());
    }
}
