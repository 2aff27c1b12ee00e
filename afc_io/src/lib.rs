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

//! the wire-facing document shapes (spec §6): inquiry, engine configuration,
//! response, and the CLI wrapper's status/progress files. Everything here
//! is a plain serde data shape; turning a document into (or out of) the
//! engine's own request/result types is `afc_engine`'s job.
//!
//! KML/KMZ/GeoJSON writing, the ULS/population SQLite schema and CLI/config
//! parsing remain external collaborators and are not represented here.

pub mod config;
pub mod errors;
pub mod inquiry;
pub mod response;
pub mod status;

pub use config::EngineConfigDoc;
pub use errors::{IoDocError, Result};
pub use inquiry::InquiryDoc;
pub use response::ResponseDoc;
pub use status::{ProgressWriter, RunStats, StatusFileDoc};
