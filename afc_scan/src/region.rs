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

//! RLAN uncertainty regions and a local tangent-plane projection used to
//! scan them in meters before converting candidate points back to degrees.

use afc_common::geo_constants::MEAN_EARTH_RADIUS;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum HeightType {
    Amsl,
    Agl,
}

/// a tagged sum replacing the original's `RlanRegionClass` inheritance
/// hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    Ellipse { center_lat: f64, center_lon: f64, semi_major_m: f64, semi_minor_m: f64, orientation_deg: f64 },
    LinearPolygon { vertices: Vec<(f64, f64)> },
    RadialPolygon { center_lat: f64, center_lon: f64, points: Vec<(f64, f64)> },
}

impl Region {
    /// a lat/lon bounding box guaranteed to contain the region, in degrees.
    pub fn bbox(&self) -> (f64, f64, f64, f64) {
        match self {
            Region::Ellipse { center_lat, center_lon, semi_major_m, semi_minor_m, .. } => {
                let r = semi_major_m.max(*semi_minor_m);
                let (south, north) = lat_span(*center_lat, r);
                let (west, east) = lon_span(*center_lat, *center_lon, r);
                (south, north, west, east)
            }
            Region::LinearPolygon { vertices } => bbox_of_points(vertices),
            Region::RadialPolygon { center_lat, center_lon, points } => {
                let cartesian: Vec<(f64, f64)> = points
                    .iter()
                    .map(|(angle_deg, radius_m)| local_to_lat_lon(*center_lat, *center_lon, polar_to_xy(*angle_deg, *radius_m)))
                    .collect();
                bbox_of_points(&cartesian)
            }
        }
    }

    /// whether `(lat, lon)` lies inside the region, using a local
    /// tangent-plane projection about the region's own center (adequate at
    /// the scanResolution/region-diameter scales this scanner operates at).
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        match self {
            Region::Ellipse { center_lat, center_lon, semi_major_m, semi_minor_m, orientation_deg } => {
                let (x, y) = lat_lon_to_local(*center_lat, *center_lon, lat, lon);
                point_in_ellipse(x, y, *semi_major_m, *semi_minor_m, *orientation_deg)
            }
            Region::LinearPolygon { vertices } => point_in_polygon(vertices, lat, lon),
            Region::RadialPolygon { center_lat, center_lon, points } => {
                let vertices: Vec<(f64, f64)> = points
                    .iter()
                    .map(|(angle_deg, radius_m)| local_to_lat_lon(*center_lat, *center_lon, polar_to_xy(*angle_deg, *radius_m)))
                    .collect();
                point_in_polygon(&vertices, lat, lon)
            }
        }
    }

    pub fn center(&self) -> (f64, f64) {
        match self {
            Region::Ellipse { center_lat, center_lon, .. } => (*center_lat, *center_lon),
            Region::RadialPolygon { center_lat, center_lon, .. } => (*center_lat, *center_lon),
            Region::LinearPolygon { vertices } => {
                let n = vertices.len().max(1) as f64;
                let (slat, slon) = vertices.iter().fold((0.0, 0.0), |(a, b), (lat, lon)| (a + lat, b + lon));
                (slat / n, slon / n)
            }
        }
    }
}

fn polar_to_xy(angle_deg: f64, radius_m: f64) -> (f64, f64) {
    let rad = angle_deg.to_radians();
    (radius_m * rad.sin(), radius_m * rad.cos())
}

/// `(dx_east_m, dy_north_m)` -> `(lat, lon)` about a local origin.
pub fn local_to_lat_lon(origin_lat: f64, origin_lon: f64, (dx, dy): (f64, f64)) -> (f64, f64) {
    let dlat_deg = (dy / MEAN_EARTH_RADIUS).to_degrees();
    let dlon_deg = (dx / (MEAN_EARTH_RADIUS * origin_lat.to_radians().cos())).to_degrees();
    (origin_lat + dlat_deg, origin_lon + dlon_deg)
}

/// `(lat, lon)` -> `(dx_east_m, dy_north_m)` relative to an origin.
pub fn lat_lon_to_local(origin_lat: f64, origin_lon: f64, lat: f64, lon: f64) -> (f64, f64) {
    let dlat_rad = (lat - origin_lat).to_radians();
    let dlon_rad = (lon - origin_lon).to_radians();
    let dy = dlat_rad * MEAN_EARTH_RADIUS;
    let dx = dlon_rad * MEAN_EARTH_RADIUS * origin_lat.to_radians().cos();
    (dx, dy)
}

fn point_in_ellipse(x: f64, y: f64, semi_major_m: f64, semi_minor_m: f64, orientation_deg: f64) -> bool {
    let theta = (-orientation_deg).to_radians();
    let xr = x * theta.cos() - y * theta.sin();
    let yr = x * theta.sin() + y * theta.cos();
    (xr / semi_major_m).powi(2) + (yr / semi_minor_m).powi(2) <= 1.0
}

fn lat_span(center_lat: f64, radius_m: f64) -> (f64, f64) {
    let dlat = (radius_m / MEAN_EARTH_RADIUS).to_degrees();
    (center_lat - dlat, center_lat + dlat)
}

fn lon_span(center_lat: f64, center_lon: f64, radius_m: f64) -> (f64, f64) {
    let dlon = (radius_m / (MEAN_EARTH_RADIUS * center_lat.to_radians().cos())).to_degrees();
    (center_lon - dlon, center_lon + dlon)
}

fn bbox_of_points(points: &[(f64, f64)]) -> (f64, f64, f64, f64) {
    let mut south = f64::MAX;
    let mut north = f64::MIN;
    let mut west = f64::MAX;
    let mut east = f64::MIN;
    for (lat, lon) in points {
        south = south.min(*lat);
        north = north.max(*lat);
        west = west.min(*lon);
        east = east.max(*lon);
    }
    (south, north, west, east)
}

/// ray-casting point-in-polygon with a top/left-inclusive, bottom/right-
/// exclusive edge tie-break, consistent with the rest of the geometry
/// toolkit's convention for boundary cases.
fn point_in_polygon(vertices: &[(f64, f64)], lat: f64, lon: f64) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let n = vertices.len();
    for i in 0..n {
        let (lat_i, lon_i) = vertices[i];
        let (lat_j, lon_j) = vertices[(i + n - 1) % n];
        let crosses = (lat_i > lat) != (lat_j > lat);
        if crosses {
            let lon_at_lat = lon_i + (lat - lat_i) * (lon_j - lon_i) / (lat_j - lat_i);
            if lon < lon_at_lat {
                inside = !inside;
            }
        }
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ellipse_center_is_always_contained() {
        let r = Region::Ellipse { center_lat: 37.4, center_lon: -122.1, semi_major_m: 300.0, semi_minor_m: 100.0, orientation_deg: 45.0 };
        assert!(r.contains(37.4, -122.1));
    }

    #[test]
    fn ellipse_far_point_is_excluded() {
        let r = Region::Ellipse { center_lat: 37.4, center_lon: -122.1, semi_major_m: 300.0, semi_minor_m: 100.0, orientation_deg: 0.0 };
        assert!(!r.contains(38.0, -122.1));
    }

    #[test]
    fn square_polygon_contains_interior_point() {
        let r = Region::LinearPolygon {
            vertices: vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)],
        };
        assert!(r.contains(0.5, 0.5));
        assert!(!r.contains(2.0, 2.0));
    }

    #[test]
    fn local_round_trip_is_consistent() {
        let (dx, dy) = lat_lon_to_local(37.4, -122.1, 37.401, -122.099);
        let (lat, lon) = local_to_lat_lon(37.4, -122.1, (dx, dy));
        assert!((lat - 37.401).abs() < 1e-9);
        assert!((lon - (-122.099)).abs() < 1e-9);
    }
}
