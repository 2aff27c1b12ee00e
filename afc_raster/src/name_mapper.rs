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

//! maps a `(lat, lon)` to the base filename of the tile that covers it.
//! Two implementations: [`PatternMapper`] compiles a filename template once
//! and renders it per point; [`DirectMapper`] probes a fixed set of files
//! with known bounding rectangles and does a linear search.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use regex::Regex;

use crate::errors::{RasterError, Result};

pub trait NameMapper: Send + Sync {
    fn base_filename(&self, lat: f64, lon: f64) -> Result<String>;
}

#[derive(Debug, Clone)]
enum Token {
    Literal(String),
    LatHem,
    LonHem,
    LatDeg { ceil: bool, width: usize },
    LonDeg { ceil: bool, width: usize },
}

/// a compiled filename template, e.g.
/// `"USGS_1_{latHem:ns}{latDegCeil:02}{lonHem:ew}{lonDegFloor:03}.tif"`.
#[derive(Debug, Clone)]
pub struct PatternTemplate {
    tokens: Vec<Token>,
}

impl PatternTemplate {
    pub fn compile(template: &str) -> Result<Self> {
        let field_re = Regex::new(r"\{(\w+):(\w+)\}").unwrap();
        let mut tokens = Vec::new();
        let mut last = 0;
        for cap in field_re.captures_iter(template) {
            let m = cap.get(0).unwrap();
            if m.start() > last {
                tokens.push(Token::Literal(template[last..m.start()].to_string()));
            }
            let name = &cap[1];
            let spec = &cap[2];
            let token = match name {
                "latHem" => Token::LatHem,
                "lonHem" => Token::LonHem,
                "latDegCeil" => Token::LatDeg { ceil: true, width: spec.parse().unwrap_or(0) },
                "latDegFloor" => Token::LatDeg { ceil: false, width: spec.parse().unwrap_or(0) },
                "lonDegCeil" => Token::LonDeg { ceil: true, width: spec.parse().unwrap_or(0) },
                "lonDegFloor" => Token::LonDeg { ceil: false, width: spec.parse().unwrap_or(0) },
                other => return Err(RasterError::BadTemplate(format!("unknown template field '{other}'"))),
            };
            tokens.push(token);
            last = m.end();
        }
        if last < template.len() {
            tokens.push(Token::Literal(template[last..].to_string()));
        }
        Ok(PatternTemplate { tokens })
    }

    pub fn render(&self, lat: f64, lon: f64) -> String {
        let mut out = String::new();
        for t in &self.tokens {
            match t {
                Token::Literal(s) => out.push_str(s),
                Token::LatHem => out.push(if lat >= 0.0 { 'n' } else { 's' }),
                Token::LonHem => out.push(if lon >= 0.0 { 'e' } else { 'w' }),
                Token::LatDeg { ceil, width } => out.push_str(&format_deg(lat, *ceil, *width)),
                Token::LonDeg { ceil, width } => out.push_str(&format_deg(lon, *ceil, *width)),
            }
        }
        out
    }

    fn has_wildcard(&self) -> bool {
        self.tokens.iter().any(|t| matches!(t, Token::Literal(s) if s.contains('*')))
    }
}

/// renders the degree component of a tile-naming field. Ceil fields apply
/// the "ceil+1 when exactly integer" boundary policy: a point lying exactly
/// on a tile edge resolves to the tile north/east of it rather than being
/// ambiguous between the two tiles that share that edge.
fn format_deg(v: f64, ceil: bool, width: usize) -> String {
    let mag = v.abs();
    let deg = if ceil {
        let c = mag.ceil();
        if (mag - mag.trunc()).abs() < 1e-9 { c as i64 + 1 } else { c as i64 }
    } else {
        mag.floor() as i64
    };
    format!("{deg:0width$}")
}

/// a [`PatternTemplate`] bound to a source directory. Templates containing a
/// literal `*` are resolved by a one-time directory listing, cached both as
/// the raw listing and per-rendered-prefix match.
pub struct PatternMapper {
    dir: PathBuf,
    template: PatternTemplate,
    listing: RwLock<Option<Vec<String>>>,
    resolved: RwLock<HashMap<String, String>>,
}

impl PatternMapper {
    pub fn new(dir: impl Into<PathBuf>, template: &str) -> Result<Self> {
        let template = PatternTemplate::compile(template)?;
        Ok(PatternMapper { dir: dir.into(), template, listing: RwLock::new(None), resolved: RwLock::new(HashMap::new()) })
    }

    fn ensure_listing(&self) -> Result<Vec<String>> {
        if let Some(l) = self.listing.read().unwrap().as_ref() {
            return Ok(l.clone());
        }
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                entries.push(name.to_string());
            }
        }
        *self.listing.write().unwrap() = Some(entries.clone());
        Ok(entries)
    }
}

impl NameMapper for PatternMapper {
    fn base_filename(&self, lat: f64, lon: f64) -> Result<String> {
        let rendered = self.template.render(lat, lon);
        if !self.template.has_wildcard() {
            return Ok(rendered);
        }
        if let Some(hit) = self.resolved.read().unwrap().get(&rendered) {
            return Ok(hit.clone());
        }
        let listing = self.ensure_listing()?;
        let pattern = glob_to_regex(&rendered)?;
        let matched = listing
            .iter()
            .find(|f| pattern.is_match(f))
            .ok_or(RasterError::NoMatchingTile { lat, lon })?
            .clone();
        self.resolved.write().unwrap().insert(rendered, matched.clone());
        Ok(matched)
    }
}

fn glob_to_regex(pattern: &str) -> Result<Regex> {
    let escaped = regex::escape(pattern).replace(r"\*", ".*");
    Regex::new(&format!("^{escaped}$")).map_err(|e| RasterError::BadTemplate(e.to_string()))
}

/// one probed candidate file and its bounding rectangle, in degrees,
/// `[min, max)` on both axes.
#[derive(Debug, Clone)]
pub struct DirectEntry {
    pub filename: String,
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl DirectEntry {
    fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat < self.max_lat && lon >= self.min_lon && lon < self.max_lon
    }
}

/// linear-search mapper over a fixed list of probed files.
pub struct DirectMapper {
    entries: Vec<DirectEntry>,
}

impl DirectMapper {
    pub fn new(entries: Vec<DirectEntry>) -> Self {
        DirectMapper { entries }
    }
}

impl NameMapper for DirectMapper {
    fn base_filename(&self, lat: f64, lon: f64) -> Result<String> {
        self.entries
            .iter()
            .find(|e| e.contains(lat, lon))
            .map(|e| e.filename.clone())
            .ok_or(RasterError::NoMatchingTile { lat, lon })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_literal_fields() {
        let t = PatternTemplate::compile("USGS_1_{latHem:ns}{latDegCeil:02}{lonHem:ew}{lonDegFloor:03}.tif").unwrap();
        // lat 37.4 -> ceil 38; lon -122.1 -> floor 122, hemisphere w
        assert_eq!(t.render(37.4, -122.1), "USGS_1_n38w122.tif");
    }

    #[test]
    fn ceil_plus_one_on_integer_boundary() {
        let t = PatternTemplate::compile("{latDegCeil:02}").unwrap();
        // exactly on a degree boundary: ceil(40.0) would be 40, policy bumps to 41
        assert_eq!(t.render(40.0, 0.0), "41");
        assert_eq!(t.render(40.3, 0.0), "41");
        assert_eq!(t.render(39.7, 0.0), "40");
    }

    #[test]
    fn floor_field_has_no_boundary_bump() {
        let t = PatternTemplate::compile("{lonDegFloor:03}").unwrap();
        assert_eq!(t.render(0.0, 122.0), "122");
    }

    #[test]
    fn direct_mapper_linear_search() {
        let mapper = DirectMapper::new(vec![
            DirectEntry { filename: "a.tif".into(), min_lat: 36.0, max_lat: 37.0, min_lon: -123.0, max_lon: -122.0 },
            DirectEntry { filename: "b.tif".into(), min_lat: 37.0, max_lat: 38.0, min_lon: -123.0, max_lon: -122.0 },
        ]);
        assert_eq!(mapper.base_filename(37.4, -122.5).unwrap(), "b.tif");
        assert!(mapper.base_filename(50.0, -122.5).is_err());
    }

    #[test]
    fn direct_mapper_edge_is_top_left_inclusive() {
        let mapper = DirectMapper::new(vec![DirectEntry {
            filename: "a.tif".into(),
            min_lat: 36.0,
            max_lat: 37.0,
            min_lon: -123.0,
            max_lon: -122.0,
        }]);
        assert!(mapper.base_filename(36.0, -123.0).is_ok());
        assert!(mapper.base_filename(37.0, -123.0).is_err());
    }
}
