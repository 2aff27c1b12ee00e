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

use afc_io::response::ResponseCode;

pub type Result<T> = std::result::Result<T, EngineError>;

/// the top-level error taxonomy (spec §7), collecting every lower layer's
/// error and mapping each variant onto a `ResponseCode`.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("analysis error: {0}")]
    Analyses(#[from] afc_analyses::AnalysesError),

    #[error("fs/ras store error: {0}")]
    FsStore(#[from] afc_fs::FsStoreError),

    #[error("scan error: {0}")]
    Scan(#[from] afc_scan::ScanError),

    #[error("terrain error: {0}")]
    Terrain(#[from] afc_terrain::errors::TerrainError),

    #[error("document error: {0}")]
    Document(#[from] afc_io::IoDocError),

    #[error("missing required parameter: {0}")]
    MissingParam(&'static str),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("unrecognized field: {0}")]
    UnexpectedParam(String),

    #[error("inquiry requests an unsupported device/ruleset combination")]
    DeviceDisallowed,

    #[error("inquired spectrum is not supported by this ruleset")]
    UnsupportedSpectrum,

    #[error("run was cancelled")]
    Cancelled,

    #[error("run exceeded its wall-clock budget")]
    TimedOut,

    #[error("engine state transition {from:?} -> {to:?} is not permitted")]
    IllegalTransition { from: &'static str, to: &'static str },
}

impl EngineError {
    /// maps this error onto the response-code taxonomy of spec §6; a single
    /// structured response is the only user-visible outcome of a failed run
    /// (spec §7).
    pub fn response_code(&self) -> ResponseCode {
        match self {
            EngineError::MissingParam(_) => ResponseCode::MissingParam,
            EngineError::InvalidValue { .. } => ResponseCode::InvalidValue,
            EngineError::UnexpectedParam(_) => ResponseCode::UnexpectedParam,
            EngineError::DeviceDisallowed => ResponseCode::DeviceDisallowed,
            EngineError::UnsupportedSpectrum => ResponseCode::UnsupportedSpectrum,
            EngineError::Analyses(_)
            | EngineError::FsStore(_)
            | EngineError::Scan(_)
            | EngineError::Terrain(_)
            | EngineError::Document(_)
            | EngineError::Cancelled
            | EngineError::TimedOut
            | EngineError::IllegalTransition { .. } => ResponseCode::GeneralFailure,
        }
    }
}
