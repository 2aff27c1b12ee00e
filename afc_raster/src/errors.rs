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

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("raster I/O error opening {0}: {1}")]
    OpenFailed(String, String),

    #[error("gdal error {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("no spatial reference system on {0}")]
    NoSpatialReferenceSystem(String),

    #[error("pixel index rounding error of {delta} pixels at ({lat},{lon}), exceeds the 1-pixel clamp tolerance")]
    PixelRoundingError { lat: f64, lon: f64, delta: f64 },

    #[error("no name mapper match for ({lat},{lon})")]
    NoMatchingTile { lat: f64, lon: f64 },

    #[error("pattern mapper template error: {0}")]
    BadTemplate(String),

    #[error("rectification violated: {0}")]
    Rectification(String),

    #[error("common error {0}")]
    Common(#[from] afc_common::error::CommonError),

    #[error("io error {0}")]
    Io(#[from] std::io::Error),
}
