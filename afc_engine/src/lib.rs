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

//! the `Manager` façade and run state machine that glue region scanning,
//! FS/RAS lookup, path loss, and interference aggregation into one
//! inquiry-to-response pipeline, plus the channel-level worker pool and
//! 6 GHz channelization table this build supports.

pub mod channelization;
pub mod config;
pub mod errors;
pub mod manager;
pub mod pool;
pub mod request;
pub mod state;

pub use errors::{EngineError, Result};
pub use manager::{DatabaseInputs, Manager};
pub use pool::CancelFlag;
pub use state::EngineState;
