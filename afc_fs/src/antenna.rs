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

//! binds an FS row's `(antenna_model, antenna_category, antenna_gain_dbi)`
//! triple to the pattern category `afc_itu::antenna` actually knows how to
//! evaluate, falling back on the row's declared category when the model
//! isn't in the registry.

use std::collections::HashMap;

/// key used to look up a specific antenna model's pattern category, falling
/// back to a category-only binding when the model string is unrecognized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AntennaKey {
    pub model: String,
    pub category: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AntennaPatternCategory {
    Hp,
    B1,
    Other,
}

impl AntennaPatternCategory {
    fn from_category_str(category: &str) -> Self {
        match category.trim().to_ascii_uppercase().as_str() {
            "HP" => AntennaPatternCategory::Hp,
            "B1" => AntennaPatternCategory::B1,
            _ => AntennaPatternCategory::Other,
        }
    }
}

/// immutable once loaded, mirroring the raster/FS registries' load-once
/// discipline.
#[derive(Debug, Default)]
pub struct AntennaRegistry {
    by_model: HashMap<AntennaKey, AntennaPatternCategory>,
}

impl AntennaRegistry {
    pub fn new() -> Self {
        AntennaRegistry { by_model: HashMap::new() }
    }

    pub fn register(&mut self, model: &str, category: &str, pattern: AntennaPatternCategory) {
        self.by_model.insert(
            AntennaKey { model: model.to_string(), category: category.to_string() },
            pattern,
        );
    }

    /// binds an FS row's declared model/category/gain to a pattern category.
    /// An unregistered model falls back to interpreting the category string
    /// directly, so a row is never left without a usable pattern.
    pub fn bind(&self, model: Option<&str>, category: Option<&str>, _gain_dbi: Option<f64>) -> AntennaPatternCategory {
        if let (Some(model), Some(category)) = (model, category) {
            let key = AntennaKey { model: model.to_string(), category: category.to_string() };
            if let Some(pattern) = self.by_model.get(&key) {
                return *pattern;
            }
        }
        category.map(AntennaPatternCategory::from_category_str).unwrap_or(AntennaPatternCategory::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregistered_model_falls_back_to_category_string() {
        let reg = AntennaRegistry::new();
        assert_eq!(reg.bind(Some("ANT-X"), Some("HP"), Some(38.0)), AntennaPatternCategory::Hp);
        assert_eq!(reg.bind(Some("ANT-X"), Some("B1"), Some(38.0)), AntennaPatternCategory::B1);
        assert_eq!(reg.bind(Some("ANT-X"), Some("UNKNOWN"), Some(38.0)), AntennaPatternCategory::Other);
        assert_eq!(reg.bind(None, None, None), AntennaPatternCategory::Other);
    }

    #[test]
    fn registered_model_overrides_category_string() {
        let mut reg = AntennaRegistry::new();
        reg.register("ANT-1", "OTHER", AntennaPatternCategory::Hp);
        assert_eq!(reg.bind(Some("ANT-1"), Some("OTHER"), Some(38.0)), AntennaPatternCategory::Hp);
    }
}
