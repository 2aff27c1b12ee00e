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

//! small error taxonomy shared by every AFC engine crate. Each crate adds its
//! own `thiserror` enum for domain-specific failures and wraps `CommonError`
//! via `#[from]` where it needs to surface a geometry/config problem.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CommonError>;

#[derive(Error, Debug)]
pub enum CommonError {
    #[error("latitude {0} degrees out of range [-90,90]")]
    InvalidLatitude(f64),

    #[error("longitude {0} degrees out of range (-180,180]")]
    InvalidLongitude(f64),

    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error {0}")]
    Io(#[from] std::io::Error),

    #[error("ron deserialization error {0}")]
    Ron(String),
}
