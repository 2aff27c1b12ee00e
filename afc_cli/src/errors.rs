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
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

/// boundary errors the wrapper can hit before it ever has a `request_id` to
/// write a response document against (bad paths, malformed config/inquiry
/// JSON). Once a run reaches `Manager::run_inquiry`, failures are reported
/// through the response/status files instead, per spec §7.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed document: {0}")]
    Document(#[from] afc_io::IoDocError),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// only reachable via a state-machine transition error, since every
    /// other engine failure is already folded into a `ResponseDoc::failure`
    /// by `Manager::run_inquiry` before it returns.
    #[error("engine error: {0}")]
    Engine(#[from] afc_engine::EngineError),

    #[error("invalid --terrain-source {0:?}: expected LAYER=PATH")]
    TerrainSourceSyntax(String),

    #[error("invalid --fs-window: expected south,north,west,east")]
    FsWindowSyntax,

    #[error("invalid --fs-band: expected low,high")]
    FsBandSyntax,
}
