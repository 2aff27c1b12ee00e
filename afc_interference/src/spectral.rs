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

//! spectral overlap between an RLAN channel and an FS receiver's
//! occupied bandwidth: full-channel, adjacent-channel-fraction, and
//! PSD-segment integrated forms.

#[derive(Debug, Clone, Copy)]
pub struct FreqRangeMhz {
    pub low: f64,
    pub high: f64,
}

impl FreqRangeMhz {
    pub fn bandwidth_mhz(&self) -> f64 {
        (self.high - self.low).max(0.0)
    }

    /// overlap width in MHz with another range, zero if disjoint.
    pub fn overlap_mhz(&self, other: &FreqRangeMhz) -> f64 {
        (self.high.min(other.high) - self.low.max(other.low)).max(0.0)
    }
}

/// how the RLAN channel's interference into the FS is weighted by
/// frequency overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpectralOverlapMode {
    /// use the full RLAN channel bandwidth, no adjacent-channel weighting.
    FullChannel,
    /// weight by the fraction of the RLAN channel that falls in the FS
    /// receiver's adjacent-channel mask width (a fixed-width skirt on
    /// either side of the FS passband, per the ACI toggle).
    AdjacentChannel { aci_mask_width_mhz: f64 },
}

/// `-10*log10(overlapHz / rlanBwHz)`, dB; returns `f64::INFINITY` when
/// there is no overlap at all (no interference contribution).
pub fn spectral_overlap_loss_db(rlan_channel: FreqRangeMhz, fs_occupied: FreqRangeMhz, mode: SpectralOverlapMode) -> f64 {
    let rlan_bw = rlan_channel.bandwidth_mhz();
    if rlan_bw <= 0.0 {
        return f64::INFINITY;
    }
    let overlap = match mode {
        SpectralOverlapMode::FullChannel => rlan_channel.overlap_mhz(&fs_occupied),
        SpectralOverlapMode::AdjacentChannel { aci_mask_width_mhz } => {
            let masked = FreqRangeMhz { low: fs_occupied.low - aci_mask_width_mhz, high: fs_occupied.high + aci_mask_width_mhz };
            rlan_channel.overlap_mhz(&masked)
        }
    };
    if overlap <= 0.0 {
        return f64::INFINITY;
    }
    -10.0 * (overlap / rlan_bw).log10()
}

/// per-PSD-segment overlap loss: the RLAN's PSD is assumed flat across its
/// channel, so the overlap fraction for a sub-band segment is exact
/// (segment width / RLAN bandwidth), keeping the integration exact rather
/// than approximated even when the segment width isn't a whole multiple of
/// the 1 MHz PSD reference width.
pub fn psd_segment_overlap_loss_db(rlan_channel: FreqRangeMhz, segment: FreqRangeMhz, fs_occupied: FreqRangeMhz) -> f64 {
    let rlan_bw = rlan_channel.bandwidth_mhz();
    if rlan_bw <= 0.0 {
        return f64::INFINITY;
    }
    let segment_in_channel = rlan_channel.overlap_mhz(&segment);
    let segment_in_fs = segment.overlap_mhz(&fs_occupied);
    let effective_overlap = segment_in_channel.min(segment_in_fs);
    if effective_overlap <= 0.0 {
        return f64::INFINITY;
    }
    -10.0 * (effective_overlap / rlan_bw).log10()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn no_overlap_is_infinite_loss() {
        let rlan = FreqRangeMhz { low: 5945.0, high: 5965.0 };
        let fs = FreqRangeMhz { low: 6000.0, high: 6020.0 };
        let loss = spectral_overlap_loss_db(rlan, fs, SpectralOverlapMode::FullChannel);
        assert!(loss.is_infinite());
    }

    #[test]
    fn full_overlap_is_zero_loss() {
        let rlan = FreqRangeMhz { low: 6005.0, high: 6025.0 };
        let fs = FreqRangeMhz { low: 6000.0, high: 6030.0 };
        let loss = spectral_overlap_loss_db(rlan, fs, SpectralOverlapMode::FullChannel);
        assert_abs_diff_eq!(loss, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn half_overlap_is_three_db() {
        let rlan = FreqRangeMhz { low: 6000.0, high: 6020.0 };
        let fs = FreqRangeMhz { low: 6010.0, high: 6030.0 };
        let loss = spectral_overlap_loss_db(rlan, fs, SpectralOverlapMode::FullChannel);
        assert_abs_diff_eq!(loss, 3.0103, epsilon = 1e-3);
    }

    #[test]
    fn psd_segments_tile_exactly_for_non_integer_mhz_widths() {
        let rlan = FreqRangeMhz { low: 6000.0, high: 6020.0 };
        let fs = FreqRangeMhz { low: 5990.0, high: 6030.0 };
        let segments = [
            FreqRangeMhz { low: 6000.0, high: 6007.5 },
            FreqRangeMhz { low: 6007.5, high: 6020.0 },
        ];
        let total_overlap: f64 = segments
            .iter()
            .map(|s| {
                let l = psd_segment_overlap_loss_db(rlan, *s, fs);
                rlan.bandwidth_mhz() * 10f64.powf(-l / 10.0)
            })
            .sum();
        assert_abs_diff_eq!(total_overlap, rlan.overlap_mhz(&fs), epsilon = 1e-9);
    }
}
