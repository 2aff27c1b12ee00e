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
#![allow(unused)]

//! FS/RAS incumbent store: tabular row parsing, antenna pattern binding,
//! receiver noise floor, and the loaded, terrain-resolved station set a
//! scan center filters against.

pub mod antenna;
pub mod errors;
pub mod noise;
pub mod row;
pub mod store;

pub use errors::{FsStoreError, RowAnomaly, Result};
pub use row::FsRow;
pub use store::{FreqBandMhz, FsStation, FsStore, LatLonWindow};
