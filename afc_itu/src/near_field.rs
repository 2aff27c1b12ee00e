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

//! near-field loss via trilinear interpolation on a `(excess_dB, u, aperture
//! efficiency)` table, with border clamping outside the table's domain.

/// an axis of the lookup table: sorted sample coordinates plus the loss
/// value at each.
#[derive(Debug, Clone)]
pub struct Axis {
    samples: Vec<f64>,
}

impl Axis {
    pub fn new(samples: Vec<f64>) -> Self {
        debug_assert!(samples.windows(2).all(|w| w[0] <= w[1]), "axis samples must be sorted");
        Axis { samples }
    }

    /// returns `(lo_index, hi_index, fraction)` with the query clamped to
    /// the axis's domain.
    fn locate(&self, x: f64) -> (usize, usize, f64) {
        let n = self.samples.len();
        if n == 1 {
            return (0, 0, 0.0);
        }
        if x <= self.samples[0] {
            return (0, 1, 0.0);
        }
        if x >= self.samples[n - 1] {
            return (n - 2, n - 1, 1.0);
        }
        let hi = self.samples.partition_point(|&s| s <= x).min(n - 1);
        let lo = hi - 1;
        let span = self.samples[hi] - self.samples[lo];
        let frac = if span.abs() < 1e-12 { 0.0 } else { (x - self.samples[lo]) / span };
        (lo, hi, frac)
    }
}

/// a 3-D table of near-field excess loss (dB) indexed by `(excess_dB_axis,
/// u_axis, aperture_efficiency_axis)`, row-major in that order.
pub struct NearFieldTable {
    excess_axis: Axis,
    u_axis: Axis,
    eff_axis: Axis,
    values: Vec<f64>,
}

impl NearFieldTable {
    pub fn new(excess_axis: Axis, u_axis: Axis, eff_axis: Axis, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), excess_axis.samples.len() * u_axis.samples.len() * eff_axis.samples.len());
        NearFieldTable { excess_axis, u_axis, eff_axis, values }
    }

    fn at(&self, ei: usize, ui: usize, fi: usize) -> f64 {
        let nu = self.u_axis.samples.len();
        let nf = self.eff_axis.samples.len();
        self.values[(ei * nu + ui) * nf + fi]
    }

    /// trilinear interpolation at `(excess_db, u, aperture_efficiency)`;
    /// queries outside the table's domain are clamped to the nearest edge
    /// rather than extrapolated.
    pub fn interpolate(&self, excess_db: f64, u: f64, aperture_efficiency: f64) -> f64 {
        let (e0, e1, fe) = self.excess_axis.locate(excess_db);
        let (u0, u1, fu) = self.u_axis.locate(u);
        let (f0, f1, ff) = self.eff_axis.locate(aperture_efficiency);

        let c000 = self.at(e0, u0, f0);
        let c001 = self.at(e0, u0, f1);
        let c010 = self.at(e0, u1, f0);
        let c011 = self.at(e0, u1, f1);
        let c100 = self.at(e1, u0, f0);
        let c101 = self.at(e1, u0, f1);
        let c110 = self.at(e1, u1, f0);
        let c111 = self.at(e1, u1, f1);

        let c00 = c000 * (1.0 - fe) + c100 * fe;
        let c01 = c001 * (1.0 - fe) + c101 * fe;
        let c10 = c010 * (1.0 - fe) + c110 * fe;
        let c11 = c011 * (1.0 - fe) + c111 * fe;

        let c0 = c00 * (1.0 - fu) + c10 * fu;
        let c1 = c01 * (1.0 - fu) + c11 * fu;

        c0 * (1.0 - ff) + c1 * ff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube_table() -> NearFieldTable {
        // 2x2x2 table where the value equals excess_db + u + eff, so trilinear
        // interpolation should reproduce exact sums at any interior point.
        let excess_axis = Axis::new(vec![0.0, 10.0]);
        let u_axis = Axis::new(vec![0.0, 1.0]);
        let eff_axis = Axis::new(vec![0.5, 1.0]);
        let mut values = Vec::with_capacity(8);
        for &e in &[0.0, 10.0] {
            for &u in &[0.0, 1.0] {
                for &f in &[0.5, 1.0] {
                    values.push(e + u + f);
                }
            }
        }
        NearFieldTable::new(excess_axis, u_axis, eff_axis, values)
    }

    #[test]
    fn interpolates_linear_function_exactly() {
        let t = unit_cube_table();
        let v = t.interpolate(5.0, 0.5, 0.75);
        assert!((v - (5.0 + 0.5 + 0.75)).abs() < 1e-9);
    }

    #[test]
    fn clamps_outside_domain() {
        let t = unit_cube_table();
        let inside_edge = t.interpolate(0.0, 0.0, 0.5);
        let outside = t.interpolate(-100.0, -5.0, -5.0);
        assert!((inside_edge - outside).abs() < 1e-9);
    }
}
