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

//! minimal RON-backed config loading. The original ODIN `odin_build::define_load_config!`
//! macro resolves configs through an embedded-resource/filesystem search chain tied to
//! the build system; the AFC engine has no GUI/CLI embedding concern so this is the
//! filesystem-only half of that mechanism.

use std::fs;
use std::path::Path;
use serde::de::DeserializeOwned;

use crate::error::{CommonError, Result};

/// load and deserialize a RON config file at `path`.
pub fn load_config<C>(path: &Path) -> Result<C>
where
    C: DeserializeOwned,
{
    let data = fs::read_to_string(path)?;
    ron::de::from_str(&data).map_err(|e| CommonError::Ron(e.to_string()))
}

/// load a config, falling back to `C::default()` when `path` does not exist.
/// Used by components whose configuration is optional (e.g. scan policy
/// overrides) so a missing file is not treated as an `InputError`.
pub fn load_config_or_default<C>(path: &Path) -> Result<C>
where
    C: DeserializeOwned + Default,
{
    if path.exists() {
        load_config(path)
    } else {
        Ok(C::default())
    }
}
