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

//! link geometry between an RLAN scan point and an FS receiver or passive
//! repeater: great-circle distance, initial bearing, elevation angle, and
//! angle off a boresight direction.

use afc_common::geo::{GeoLine, GeoPoint};
use uom::si::length::meter;

#[derive(Debug, Clone, Copy)]
pub struct LinkGeometry {
    pub distance_m: f64,
    pub bearing_deg: f64,
    pub elevation_angle_deg: f64,
}

/// great-circle distance (haversine, consistent with the rest of the
/// pipeline's distance calculations) plus initial bearing and elevation
/// angle between two points at given AMSL heights.
pub fn link_geometry(from_lat: f64, from_lon: f64, from_height_m: f64, to_lat: f64, to_lon: f64, to_height_m: f64) -> LinkGeometry {
    let from = GeoPoint::from_lon_lat_degrees(from_lon, from_lat);
    let to = GeoPoint::from_lon_lat_degrees(to_lon, to_lat);
    let distance_m = GeoLine::from_geo_points(from, to).haversine_distance().get::<meter>();

    let bearing_deg = initial_bearing_deg(from_lat, from_lon, to_lat, to_lon);
    let elevation_angle_deg = (to_height_m - from_height_m).atan2(distance_m.max(1.0e-6)).to_degrees();

    LinkGeometry { distance_m, bearing_deg, elevation_angle_deg }
}

/// the standard great-circle initial bearing formula, 0..360 clockwise
/// from true north.
pub fn initial_bearing_deg(from_lat: f64, from_lon: f64, to_lat: f64, to_lon: f64) -> f64 {
    let lat1 = from_lat.to_radians();
    let lat2 = to_lat.to_radians();
    let dlon = (to_lon - from_lon).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    let theta = y.atan2(x).to_degrees();
    (theta + 360.0) % 360.0
}

/// smallest absolute angular difference between a link bearing and an
/// antenna boresight azimuth, in `[0, 180]` degrees.
pub fn angle_off_boresight_deg(link_bearing_deg: f64, boresight_azimuth_deg: f64) -> f64 {
    let diff = (link_bearing_deg - boresight_azimuth_deg).rem_euclid(360.0);
    if diff > 180.0 { 360.0 - diff } else { diff }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn bearing_due_north_is_zero() {
        let b = initial_bearing_deg(0.0, 0.0, 1.0, 0.0);
        assert_abs_diff_eq!(b, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn bearing_due_east_is_ninety() {
        let b = initial_bearing_deg(0.0, 0.0, 0.0, 1.0);
        assert_abs_diff_eq!(b, 90.0, epsilon = 0.5);
    }

    #[test]
    fn angle_off_boresight_wraps_correctly() {
        assert_abs_diff_eq!(angle_off_boresight_deg(350.0, 10.0), 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(angle_off_boresight_deg(10.0, 350.0), 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(angle_off_boresight_deg(0.0, 180.0), 180.0, epsilon = 1e-9);
    }

    #[test]
    fn distance_between_identical_points_is_zero() {
        let g = link_geometry(37.4, -122.1, 30.0, 37.4, -122.1, 20.0);
        assert_abs_diff_eq!(g.distance_m, 0.0, epsilon = 1e-3);
    }
}
